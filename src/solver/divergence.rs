//! Cell-centered velocity divergence.
//!
//! Serves double duty: the source term of the pressure Poisson equation
//! and the post-projection diagnostic (near machine zero after a correct
//! projection).

use crate::grid::Grid3D;
use crate::operators::stencil::{shift, HI, LO};
use crate::operators::OperatorTables;
use crate::solver::fields::ScalarField;

/// Compute the velocity divergence over the owned range using the
/// pressure-cell divergence stencils.
///
/// Halos of `u`, `v`, `w` must have been exchanged by the caller. Ghost
/// entries of the output stay zero.
pub fn compute_divergence(
    grid: &Grid3D,
    ops: &OperatorTables,
    u: &ScalarField,
    v: &ScalarField,
    w: &ScalarField,
) -> ScalarField {
    let vel = [u, v, w];
    let mut div = ScalarField::new(grid);
    for k in grid.owned(2) {
        for j in grid.owned(1) {
            for i in grid.owned(0) {
                let p = [i, j, k];
                let id = grid.idx(i, j, k);
                let mut acc = 0.0;
                for d in 0..3 {
                    let lo = shift(p, d, -1);
                    let dv = ops.div_p[d][id];
                    acc += dv[LO] * vel[d].data[grid.idx(lo[0], lo[1], lo[2])]
                        + dv[HI] * vel[d].data[id];
                }
                div.data[id] = acc;
            }
        }
    }
    div
}

/// Maximum absolute divergence over the owned range.
pub fn max_abs_divergence(grid: &Grid3D, div: &ScalarField) -> f64 {
    div.max_abs_owned(grid)
}
