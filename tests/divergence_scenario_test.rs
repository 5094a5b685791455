//! Divergence evaluator scenarios on a periodic 8x1x1 channel.

use mac_rs::{compute_divergence, FlowState, Grid3D, OperatorTables};

fn channel() -> Grid3D {
    Grid3D::uniform_box([0.0; 3], [8.0, 1.0, 1.0], [8, 1, 1], [true, false, false]).unwrap()
}

#[test]
fn constant_velocity_has_zero_divergence() {
    let g = channel();
    let ops = OperatorTables::build(&g);
    let mut s = FlowState::new(&g);
    s.u.fill(1.0);

    let div = compute_divergence(&g, &ops, &s.u, &s.v, &s.w);
    for i in g.owned(0) {
        assert_eq!(div.get(i, 1, 1), 0.0, "cell {}", i);
    }
}

#[test]
fn velocity_jump_registers_only_at_adjacent_cells() {
    let g = channel();
    let ops = OperatorTables::build(&g);
    let mut s = FlowState::new(&g);
    s.u.fill(1.0);
    // Bump one face: u on face 3 (between cells 3 and 4) becomes 2.
    s.u.set(3, 1, 1, 2.0);
    s.u.sync_ghost(&g);

    let div = compute_divergence(&g, &ops, &s.u, &s.v, &s.w);
    for i in g.owned(0) {
        let expected = match i {
            3 => 1.0,  // (2 - 1) / dx
            4 => -1.0, // (1 - 2) / dx
            _ => 0.0,
        };
        assert!(
            (div.get(i, 1, 1) - expected).abs() < 1e-14,
            "cell {}: div = {}, expected {}",
            i,
            div.get(i, 1, 1),
            expected
        );
    }
}

#[test]
fn solid_left_neighbor_zeroes_gradient_toward_it() {
    // Single fluid cell with a fully solid left neighbor: the gradient
    // stencil keeps only its right entry.
    let mut g = channel();
    g.set_volume_fraction(2, 1, 1, 0.0);
    g.sync_ghost_vf();
    let ops = OperatorTables::build(&g);

    let id = g.idx(3, 1, 1);
    assert_eq!(ops.grad[0][0][id][mac_rs::LO], 0.0);
    assert!(ops.grad[0][0][id][mac_rs::HI] > 0.0);
}
