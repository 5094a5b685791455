//! Assembled 7-point pressure Laplacian.
//!
//! The Poisson operator handed to the external iterative solver is the
//! composition of the pressure-cell divergence with the face gradient
//! (which shares its coefficients with the own-direction face divergence),
//! negated and scaled by the geometric cell volume:
//!
//! `L = -vol * div_p(div_face(·))`
//!
//! Composing the stored tables, instead of re-deriving Laplacian weights,
//! makes the discrete Laplacian exactly the divergence of the discrete
//! gradient, so the pressure correction removes exactly the divergence
//! reported by [`crate::compute_divergence`].

use crate::grid::Grid3D;
use crate::operators::stencil::{shift, LaplacianEntry, HI, LO};
use crate::operators::OperatorTables;
use crate::solver::ScalarField;

/// Per-cell 7-entry rows of the assembled pressure operator.
///
/// Row entries are ordered by [`LaplacianEntry`]: center, then -x/+x,
/// -y/+y, -z/+z neighbors. Rows exist over the padded range but are only
/// populated for owned cells; the external solver reads them directly.
#[derive(Clone, PartialEq)]
pub struct PressureOperator {
    /// Stencil rows, indexed by [`Grid3D::idx`].
    pub rows: Vec<[f64; 7]>,
}

impl PressureOperator {
    /// Compose the divergence and gradient tables into Laplacian rows.
    pub fn assemble(grid: &Grid3D, ops: &OperatorTables) -> Self {
        let mut rows = vec![[0.0; 7]; grid.len()];

        for k in grid.owned(2) {
            for j in grid.owned(1) {
                for i in grid.owned(0) {
                    let p = [i, j, k];
                    let id = grid.idx(i, j, k);
                    let vol = grid.cell_volume(i, j, k);
                    let mut row = [0.0; 7];

                    for d in 0..3 {
                        let dv = ops.div_p[d][id];
                        let lo = shift(p, d, -1);
                        let g_lo = ops.div[d][d][grid.idx(lo[0], lo[1], lo[2])];
                        let g_hi = ops.div[d][d][id];

                        row[LaplacianEntry::Center.index()] +=
                            dv[LO] * g_lo[HI] + dv[HI] * g_hi[LO];
                        row[LaplacianEntry::minus(d).index()] = dv[LO] * g_lo[LO];
                        row[LaplacianEntry::plus(d).index()] = dv[HI] * g_hi[HI];
                    }

                    for e in &mut row {
                        *e *= -vol;
                    }
                    rows[id] = row;
                }
            }
        }

        Self { rows }
    }

    /// Apply the operator to a scalar field over the owned range.
    ///
    /// `p` must have valid ghost values (halo-exchanged or wrapped by
    /// [`ScalarField::sync_ghost`]). Used by collaborators for residual
    /// checks; the iterative solve itself is external.
    pub fn apply(&self, grid: &Grid3D, p: &ScalarField) -> ScalarField {
        let mut out = ScalarField::new(grid);
        for k in grid.owned(2) {
            for j in grid.owned(1) {
                for i in grid.owned(0) {
                    let id = grid.idx(i, j, k);
                    let row = &self.rows[id];
                    let mut acc = row[LaplacianEntry::Center.index()] * p.data[id];
                    for d in 0..3 {
                        let q = [i, j, k];
                        let lo = shift(q, d, -1);
                        let hi = shift(q, d, 1);
                        acc += row[LaplacianEntry::minus(d).index()]
                            * p.data[grid.idx(lo[0], lo[1], lo[2])];
                        acc += row[LaplacianEntry::plus(d).index()]
                            * p.data[grid.idx(hi[0], hi[1], hi[2])];
                    }
                    out.data[id] = acc;
                }
            }
        }
        out
    }
}
