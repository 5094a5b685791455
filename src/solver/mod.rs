//! Flux evaluation on top of the precomputed operator tables.
//!
//! The core is stateless across calls: the time-integration collaborator
//! owns the per-step cycle (predict, momentum derivative, pressure solve,
//! correct) and re-invokes [`compute_momentum_derivative`] and
//! [`compute_divergence`] with updated fields while the operator tables
//! stay fixed. Halos of all input fields must be exchanged before a call;
//! outputs cover the owned range only.

mod divergence;
mod fields;
mod momentum;

pub use divergence::{compute_divergence, max_abs_divergence};
pub use fields::{FlowState, ScalarField};
pub use momentum::{FluidProperties, compute_momentum_derivative};

#[cfg(feature = "parallel")]
pub use momentum::compute_momentum_derivative_parallel;
