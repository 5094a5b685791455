//! # mac-rs
//!
//! Discretization core for an incompressible Navier-Stokes solver on a
//! structured, staggered (MAC) grid with immersed-boundary support via
//! per-cell volume fractions.
//!
//! This crate provides the core building blocks of the pressure-projection
//! method:
//! - Structured staggered grid with ghost layers and volume fractions
//! - Two-point interpolation/divergence/gradient stencil tables, scaled by
//!   volume fraction so that cut cells and fully solid neighbors degenerate
//!   to zero contribution without branching
//! - Explicit momentum flux-divergence evaluation (convection, diffusion,
//!   pressure)
//! - Cell-centered velocity divergence (the pressure Poisson source term)
//! - The 7-point pressure Laplacian assembled as the exact composition of
//!   the discrete divergence and gradient operators
//! - Named boundary-condition regions materialized from caller predicates
//!
//! Time integration and the iterative Poisson solve are collaborators, not
//! part of this crate: the external solver consumes the assembled
//! [`PressureOperator`] rows, the integrator drives
//! [`compute_momentum_derivative`] and [`compute_divergence`] each step
//! while the operator tables stay fixed.

pub mod boundary;
pub mod grid;
pub mod operators;
pub mod solver;

// Re-export main types for convenience
pub use boundary::{BcKind, BcRegion, BcRegistry};
pub use grid::{Grid3D, GridError};
pub use operators::{Coeff2, LaplacianEntry, OperatorTables, PressureOperator, HI, LO};
pub use solver::{
    FlowState, FluidProperties, ScalarField, compute_divergence, compute_momentum_derivative,
    max_abs_divergence,
};

#[cfg(feature = "parallel")]
pub use solver::compute_momentum_derivative_parallel;
