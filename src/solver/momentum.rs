//! Explicit momentum flux-divergence evaluation.
//!
//! For each velocity component the six fluxes around its momentum cell are
//! evaluated from the two-point tables and then differenced with the
//! face-divergence stencils:
//!
//! - own-normal face (cell center): `-rho * uc * uc + 2 * mu * du/dx - p`
//! - cross faces (edges): `-rho * ve * ue + mu * (du/dy + dv/dx)`
//!
//! The convective product multiplies two *independently interpolated*
//! velocities (skew-symmetric form), the diffusive term sums the two cross
//! gradients of the Newtonian stress, and pressure appears only on the
//! component's own normal face. All volume-fraction handling is already
//! baked into the coefficients, so these loops carry no cut-cell branches.

use crate::grid::Grid3D;
use crate::operators::stencil::{shift, HI, LO};
use crate::operators::OperatorTables;
use crate::solver::fields::{FlowState, ScalarField};

/// Constant fluid properties for the momentum evaluation.
#[derive(Clone, Copy, Debug)]
pub struct FluidProperties {
    /// Density (constant, positive).
    pub density: f64,
    /// Dynamic viscosity (constant, positive).
    pub viscosity: f64,
}

impl FluidProperties {
    /// Create fluid properties.
    ///
    /// # Panics
    ///
    /// Panics if density or viscosity is not finite and positive; both are
    /// configuration constants validated once at setup.
    pub fn new(density: f64, viscosity: f64) -> Self {
        assert!(
            density.is_finite() && density > 0.0,
            "density must be positive, got {}",
            density
        );
        assert!(
            viscosity.is_finite() && viscosity > 0.0,
            "viscosity must be positive, got {}",
            viscosity
        );
        Self { density, viscosity }
    }
}

/// Compute the explicit momentum time derivative `d(rho u)/dt` for all
/// three components over the owned range.
///
/// Halos of `u`, `v`, `w`, `p` must have been exchanged by the caller.
/// Ghost entries of the outputs stay zero.
pub fn compute_momentum_derivative(
    grid: &Grid3D,
    ops: &OperatorTables,
    state: &FlowState,
    props: &FluidProperties,
) -> (ScalarField, ScalarField, ScalarField) {
    let mut out = [
        ScalarField::new(grid),
        ScalarField::new(grid),
        ScalarField::new(grid),
    ];
    for (c, dudt) in out.iter_mut().enumerate() {
        for k in grid.owned(2) {
            for j in grid.owned(1) {
                for i in grid.owned(0) {
                    let id = grid.idx(i, j, k);
                    dudt.data[id] = momentum_cell_derivative(grid, ops, state, props, c, [i, j, k]);
                }
            }
        }
    }
    let [du, dv, dw] = out;
    (du, dv, dw)
}

/// Parallel variant of [`compute_momentum_derivative`] using Rayon.
///
/// Parallelizes over k-slabs; results are identical to the sequential
/// version.
#[cfg(feature = "parallel")]
pub fn compute_momentum_derivative_parallel(
    grid: &Grid3D,
    ops: &OperatorTables,
    state: &FlowState,
    props: &FluidProperties,
) -> (ScalarField, ScalarField, ScalarField) {
    use rayon::prelude::*;

    let slab = grid.dims[0] * grid.dims[1];
    let mut out = [
        ScalarField::new(grid),
        ScalarField::new(grid),
        ScalarField::new(grid),
    ];
    for (c, dudt) in out.iter_mut().enumerate() {
        dudt.data
            .par_chunks_mut(slab)
            .enumerate()
            .for_each(|(k, chunk)| {
                if k < 1 || k > grid.n[2] {
                    return;
                }
                for j in grid.owned(1) {
                    for i in grid.owned(0) {
                        chunk[j * grid.dims[0] + i] =
                            momentum_cell_derivative(grid, ops, state, props, c, [i, j, k]);
                    }
                }
            });
    }
    let [du, dv, dw] = out;
    (du, dv, dw)
}

/// Flux divergence for one momentum cell of component `c` at padded index
/// `p` (an owned face position).
#[inline]
fn momentum_cell_derivative(
    grid: &Grid3D,
    ops: &OperatorTables,
    state: &FlowState,
    props: &FluidProperties,
    c: usize,
    p: [usize; 3],
) -> f64 {
    let rho = props.density;
    let mu = props.viscosity;
    let uc = state.vel(c);
    let id = grid.idx(p[0], p[1], p[2]);
    let mut dudt = 0.0;

    // Own-direction flux at the two bounding cell centers: normal stress
    // plus pressure.
    {
        let center_flux = |q: [usize; 3]| -> f64 {
            let qid = grid.idx(q[0], q[1], q[2]);
            let lo = shift(q, c, -1);
            let f_lo = uc.data[grid.idx(lo[0], lo[1], lo[2])];
            let f_hi = uc.data[qid];
            let a = ops.itp[c][c][qid];
            let g = ops.grad[c][c][qid];
            let ui = a[LO] * f_lo + a[HI] * f_hi;
            let dn = g[LO] * f_lo + g[HI] * f_hi;
            -rho * ui * ui + mu * (dn + dn) - state.p.data[qid]
        };
        let dv = ops.div[c][c][id];
        dudt += dv[LO] * center_flux(p) + dv[HI] * center_flux(shift(p, c, 1));
    }

    // Cross fluxes at the two bounding edges per transverse direction:
    // advection by the transverse component plus the symmetric shear pair.
    for d in 0..3 {
        if d == c {
            continue;
        }
        let ud = state.vel(d);
        let edge_flux = |q: [usize; 3]| -> f64 {
            let qid = grid.idx(q[0], q[1], q[2]);
            let qd = shift(q, d, 1);
            let qc = shift(q, c, 1);
            let uc_lo = uc.data[qid];
            let uc_hi = uc.data[grid.idx(qd[0], qd[1], qd[2])];
            let ud_lo = ud.data[qid];
            let ud_hi = ud.data[grid.idx(qc[0], qc[1], qc[2])];

            let ia = ops.itp[c][d][qid];
            let ib = ops.itp[d][c][qid];
            let ga = ops.grad[c][d][qid];
            let gb = ops.grad[d][c][qid];

            let ue = ia[LO] * uc_lo + ia[HI] * uc_hi;
            let ve = ib[LO] * ud_lo + ib[HI] * ud_hi;
            let du_dd = ga[LO] * uc_lo + ga[HI] * uc_hi;
            let dv_dc = gb[LO] * ud_lo + gb[HI] * ud_hi;
            -rho * ve * ue + mu * (du_dd + dv_dc)
        };
        let dv = ops.div[c][d][id];
        dudt += dv[LO] * edge_flux(shift(p, d, -1)) + dv[HI] * edge_flux(p);
    }

    dudt
}
