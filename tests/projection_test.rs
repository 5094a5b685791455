//! End-to-end pressure projection.
//!
//! Plays the role of the external collaborators for one correction step:
//! solve `L p = -vol * div(u)` with a plain conjugate-gradient loop built
//! on [`PressureOperator::apply`], subtract the face gradient of `p` from
//! the velocity, and check that the discrete divergence drops to solver
//! tolerance. Because the Laplacian is assembled as the exact composition
//! of the divergence and gradient tables, the residual divergence is
//! limited only by the CG tolerance, not by discretization mismatch.

use mac_rs::{
    compute_divergence, max_abs_divergence, FlowState, Grid3D, OperatorTables, PressureOperator,
    ScalarField, HI, LO,
};

/// Inner product over the owned range.
fn dot(grid: &Grid3D, a: &ScalarField, b: &ScalarField) -> f64 {
    let mut acc = 0.0;
    for k in grid.owned(2) {
        for j in grid.owned(1) {
            for i in grid.owned(0) {
                acc += a.get(i, j, k) * b.get(i, j, k);
            }
        }
    }
    acc
}

/// Unpreconditioned CG on the (singular, consistent) all-Neumann system.
fn solve_cg(
    grid: &Grid3D,
    lap: &PressureOperator,
    rhs: &ScalarField,
    tol: f64,
    max_iter: usize,
) -> ScalarField {
    let mut x = ScalarField::new(grid);
    let mut r = rhs.clone();
    let mut p = r.clone();
    let mut rr = dot(grid, &r, &r);

    for _ in 0..max_iter {
        if rr.sqrt() < tol {
            break;
        }
        p.sync_ghost(grid);
        let ap = lap.apply(grid, &p);
        let alpha = rr / dot(grid, &p, &ap);
        x.axpy(alpha, &p);
        r.axpy(-alpha, &ap);
        let rr_new = dot(grid, &r, &r);
        let beta = rr_new / rr;
        rr = rr_new;
        for idx in 0..p.data.len() {
            p.data[idx] = r.data[idx] + beta * p.data[idx];
        }
    }
    x
}

/// Subtract the face gradient of `p` from each velocity component, using
/// the same face stencils the Laplacian was composed from.
fn correct_velocity(grid: &Grid3D, ops: &OperatorTables, state: &mut FlowState, p: &ScalarField) {
    for c in 0..3 {
        for k in grid.owned(2) {
            for j in grid.owned(1) {
                for i in grid.owned(0) {
                    let id = grid.idx(i, j, k);
                    let mut q = [i, j, k];
                    q[c] += 1;
                    let g = ops.div[c][c][id];
                    let grad = g[LO] * p.data[id] + g[HI] * p.data[grid.idx(q[0], q[1], q[2])];
                    state.vel_mut(c).data[id] -= grad;
                }
            }
        }
    }
    state.sync_ghost(grid);
}

#[test]
fn projection_removes_divergence_periodic_box() {
    let n = 8;
    let g = Grid3D::uniform_box([0.0; 3], [n as f64; 3], [n; 3], [true; 3]).unwrap();
    let ops = OperatorTables::build(&g);
    let lap = PressureOperator::assemble(&g, &ops);

    // A deliberately divergent velocity field.
    let mut state = FlowState::new(&g);
    let f = std::f64::consts::TAU / n as f64;
    for k in g.owned(2) {
        for j in g.owned(1) {
            for i in g.owned(0) {
                state.u.set(i, j, k, (f * g.xf[0][i]).sin() * (f * g.xc[1][j]).cos());
                state.v.set(i, j, k, (f * g.xc[2][k]).sin());
                state.w.set(i, j, k, 0.5 * (f * g.xf[2][k]).cos());
            }
        }
    }
    state.sync_ghost(&g);

    let div = compute_divergence(&g, &ops, &state.u, &state.v, &state.w);
    let before = max_abs_divergence(&g, &div);
    assert!(before > 1e-3, "test field must actually be divergent");

    // Poisson right-hand side: L p = -vol * div(u).
    let mut rhs = ScalarField::new(&g);
    for k in g.owned(2) {
        for j in g.owned(1) {
            for i in g.owned(0) {
                let id = g.idx(i, j, k);
                rhs.data[id] = -g.cell_volume(i, j, k) * div.data[id];
            }
        }
    }

    let p = solve_cg(&g, &lap, &rhs, 1e-12, 2000);
    correct_velocity(&g, &ops, &mut state, &p);

    let div_after = compute_divergence(&g, &ops, &state.u, &state.v, &state.w);
    let after = max_abs_divergence(&g, &div_after);
    assert!(
        after < 1e-9,
        "projection left divergence {} (was {})",
        after,
        before
    );
}

#[test]
fn projection_around_solid_obstacle() {
    // Immersed block in a periodic box: the composed operator projects the
    // field onto the discretely divergence-free space of the cut geometry.
    let n = 8;
    let g = Grid3D::uniform_box([0.0; 3], [n as f64; 3], [n; 3], [true; 3])
        .unwrap()
        .with_volume_fraction(|x, y, z| {
            let inside = (3.0..5.0).contains(&x) && (3.0..5.0).contains(&y) && (3.0..5.0).contains(&z);
            if inside { 0.0 } else { 1.0 }
        });
    let ops = OperatorTables::build(&g);
    let lap = PressureOperator::assemble(&g, &ops);

    let mut state = FlowState::new(&g);
    state.u.fill(1.0);
    let f = std::f64::consts::TAU / n as f64;
    for k in g.owned(2) {
        for j in g.owned(1) {
            for i in g.owned(0) {
                state.v.set(i, j, k, 0.2 * (f * g.xf[0][i]).sin());
            }
        }
    }
    // The immersed-boundary treatment (a collaborator) imposes zero
    // velocity on faces straddling solid cells; the face-gradient stencils
    // there are zero, so the projection could not touch them anyway.
    for c in 0..3 {
        for k in g.owned(2) {
            for j in g.owned(1) {
                for i in g.owned(0) {
                    let mut q = [i, j, k];
                    q[c] += 1;
                    if g.vf_at(i, j, k) == 0.0 || g.vf_at(q[0], q[1], q[2]) == 0.0 {
                        state.vel_mut(c).set(i, j, k, 0.0);
                    }
                }
            }
        }
    }
    state.sync_ghost(&g);

    let div = compute_divergence(&g, &ops, &state.u, &state.v, &state.w);
    let mut rhs = ScalarField::new(&g);
    for k in g.owned(2) {
        for j in g.owned(1) {
            for i in g.owned(0) {
                let id = g.idx(i, j, k);
                rhs.data[id] = -g.cell_volume(i, j, k) * div.data[id];
            }
        }
    }

    let p = solve_cg(&g, &lap, &rhs, 1e-12, 4000);
    correct_velocity(&g, &ops, &mut state, &p);

    let div_after = compute_divergence(&g, &ops, &state.u, &state.v, &state.w);
    assert!(
        max_abs_divergence(&g, &div_after) < 1e-9,
        "cut-cell projection failed"
    );
}
