//! Metric/operator builder: volume-fraction-scaled two-point stencils.
//!
//! Index conventions (component `c`, direction `d`, padded triple `p`):
//!
//! - `itp[c][c]`, `grad[c][c]`: located at the *cell center* `p`, applied to
//!   the backward face pair `(u_c(p - e_c), u_c(p))`.
//! - `itp[c][d]`, `grad[c][d]` with `d != c`: located at the *edge* between
//!   the momentum cells of face `p` and face `p + e_d`, applied to the
//!   forward pair `(u_c(p), u_c(p + e_d))`.
//! - `div[c][c]`: located at the *face* `p` (between cells `p` and
//!   `p + e_c`), applied to the forward pair of cell-centered fluxes
//!   `(F(p), F(p + e_c))`.
//! - `div[c][d]` with `d != c`: divergence across the momentum cell of face
//!   `p` in direction `d`, applied to the backward pair of edge fluxes
//!   `(F(p - e_d), F(p))`.
//! - `div_p[d]`: pressure-cell divergence at `p`, applied to the backward
//!   face pair `(u_d(p - e_d), u_d(p))`.
//!
//! Every coefficient carries its volume-fraction scaling (the local value
//! at centers, the minimum over the stencil footprint at faces and edges),
//! so a fully solid neighbor contributes exactly zero at evaluation time.

use crate::grid::Grid3D;
use crate::operators::stencil::Coeff2;

/// Precomputed stencil-coefficient tables for one geometry.
///
/// Built once per geometry version by [`OperatorTables::build`]; read-only
/// afterward and safe to share across concurrent evaluation calls.
#[derive(Clone, PartialEq)]
pub struct OperatorTables {
    /// Interpolation of component `c` along direction `d`.
    pub itp: [[Vec<Coeff2>; 3]; 3],

    /// Gradient of component `c` along direction `d`.
    pub grad: [[Vec<Coeff2>; 3]; 3],

    /// Divergence over the momentum cell of component `c`, direction `d`.
    pub div: [[Vec<Coeff2>; 3]; 3],

    /// Divergence over the pressure cell, direction `d`.
    pub div_p: [Vec<Coeff2>; 3],
}

impl OperatorTables {
    /// Build all stencil tables from the grid's spacings and volume
    /// fractions.
    ///
    /// Pure function of the geometry: rebuilding on an identical grid
    /// reproduces bit-identical tables. Coefficients are defined over the
    /// full padded range; out-of-range neighbor references wrap through
    /// periodic seams and clamp on walls, so ghost entries match the owned
    /// entries they image.
    pub fn build(grid: &Grid3D) -> Self {
        let len = grid.len();
        let zeros: Vec<Coeff2> = vec![[0.0; 2]; len];

        let mut itp: [[Vec<Coeff2>; 3]; 3] = Default::default();
        let mut grad: [[Vec<Coeff2>; 3]; 3] = Default::default();
        let mut div: [[Vec<Coeff2>; 3]; 3] = Default::default();
        let mut div_p: [Vec<Coeff2>; 3] = Default::default();
        for c in 0..3 {
            div_p[c] = zeros.clone();
            for d in 0..3 {
                itp[c][d] = zeros.clone();
                grad[c][d] = zeros.clone();
                div[c][d] = zeros.clone();
            }
        }

        for k in 0..grid.dims[2] {
            for j in 0..grid.dims[1] {
                for i in 0..grid.dims[0] {
                    let p = [i, j, k];
                    let id = grid.idx(i, j, k);
                    let vfc = grid.vf[id];

                    for c in 0..3 {
                        let hc = grid.dx[c][p[c]];

                        // Cell-center stencils along the component's own
                        // direction: min-VF pairs on each side.
                        let vf_lo = vf_offset(grid, p, c, -1).min(vfc);
                        let vf_hi = vfc.min(vf_offset(grid, p, c, 1));
                        itp[c][c][id] = [0.5 * vfc * vf_lo, 0.5 * vfc * vf_hi];
                        grad[c][c][id] = [-vfc * vf_lo / hc, vfc * vf_hi / hc];
                        div_p[c][id] = [-vfc / hc, vfc / hc];

                        // Face stencils: min VF over the straddling pair;
                        // domain-bounding faces are zeroed on walls, the
                        // boundary mechanism supplies the face value there.
                        let on_boundary = grid.is_boundary_face(c, p[c]);
                        let vf_face = vfc.min(vf_offset(grid, p, c, 1));
                        let h_face =
                            0.5 * (hc + grid.dx[c][grid.neighbor(c, p[c], 1)]);
                        div[c][c][id] = if on_boundary {
                            [0.0; 2]
                        } else {
                            [-vf_face / h_face, vf_face / h_face]
                        };

                        for d in 0..3 {
                            if d == c {
                                continue;
                            }
                            let hn = grid.dx[d][p[d]];
                            let hf = grid.dx[d][grid.neighbor(d, p[d], 1)];

                            div[c][d][id] = if on_boundary {
                                [0.0; 2]
                            } else {
                                [-vf_face / hn, vf_face / hn]
                            };

                            // Edge stencils at the edge shared by the c- and
                            // d-face planes: 2x2 cell footprint.
                            let vf_near = vf_face;
                            let vf_far = vf_offset(grid, p, d, 1)
                                .min(vf_corner(grid, p, c, d));
                            let vf_edge = vf_near.min(vf_far);

                            // Inverse-distance interpolation between the two
                            // nodes (edge spacing is generally non-uniform).
                            itp[c][d][id] =
                                [vf_edge * hf / (hn + hf), vf_edge * hn / (hn + hf)];

                            // Effective distance weighted by blockage; no
                            // gradient can be formed when both sides are
                            // fully solid.
                            let delta = 0.5 * (vf_near * hn + vf_far * hf);
                            grad[c][d][id] = if delta <= 0.0 {
                                [0.0; 2]
                            } else {
                                [-vf_near / delta, vf_far / delta]
                            };
                        }
                    }
                }
            }
        }

        Self {
            itp,
            grad,
            div,
            div_p,
        }
    }
}

/// Volume fraction one step along `d`, wrapped/clamped through the grid.
#[inline(always)]
fn vf_offset(grid: &Grid3D, p: [usize; 3], d: usize, step: isize) -> f64 {
    let mut q = p;
    q[d] = grid.neighbor(d, p[d], step);
    grid.vf[grid.idx(q[0], q[1], q[2])]
}

/// Volume fraction one step along both `c` and `d` (the far corner of a
/// 2x2 edge footprint).
#[inline(always)]
fn vf_corner(grid: &Grid3D, p: [usize; 3], c: usize, d: usize) -> f64 {
    let mut q = p;
    q[c] = grid.neighbor(c, p[c], 1);
    q[d] = grid.neighbor(d, p[d], 1);
    grid.vf[grid.idx(q[0], q[1], q[2])]
}
