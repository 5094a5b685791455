//! Discrete operators on the staggered grid.
//!
//! All spatial derivatives in this crate are built from two-point stencils
//! precomputed once per geometry: interpolation, divergence, and gradient
//! coefficients at cell centers, faces, and edges, every one pre-scaled by
//! the local volume fraction. A fully solid neighbor therefore contributes
//! exactly zero flux, which is what lets the same evaluation loops cover
//! pure-fluid and cut-cell regions without branching.
//!
//! The pressure Laplacian is assembled as the exact composition of the
//! cell divergence with the face gradient, never re-derived independently:
//! this guarantees that the pressure correction removes exactly the
//! discrete divergence computed from the same tables.

mod pressure;
pub(crate) mod stencil;
mod tables;

pub use pressure::PressureOperator;
pub use stencil::{Coeff2, LaplacianEntry, HI, LO};
pub use tables::OperatorTables;
