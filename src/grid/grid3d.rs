//! 3D structured grid core type.

use thiserror::Error;

/// Error type for grid construction.
#[derive(Debug, Error)]
pub enum GridError {
    /// Domain bounds are inverted or degenerate.
    #[error("invalid bounds on axis {axis}: lo = {lo}, hi = {hi}")]
    InvalidBounds { axis: usize, lo: f64, hi: f64 },

    /// An axis has no cells.
    #[error("axis {axis} must have at least one cell")]
    EmptyAxis { axis: usize },

    /// Spacing vector length does not match the cell count.
    #[error("axis {axis} expects {expected} cell widths, got {got}")]
    SpacingCount {
        axis: usize,
        expected: usize,
        got: usize,
    },

    /// A cell width is zero or negative.
    #[error("non-positive cell width {value} at index {index} on axis {axis}")]
    NonPositiveSpacing {
        axis: usize,
        index: usize,
        value: f64,
    },
}

/// Structured staggered grid with one ghost layer per side.
///
/// Geometry is fixed after construction; the discrete operators built from
/// it ([`crate::OperatorTables`]) are valid until the geometry changes.
///
/// The volume-fraction field `vf` encodes immersed geometry: 1 is fully
/// fluid, 0 fully solid, fractional values are cut cells. Ghost entries of
/// `vf` are kept consistent by [`Grid3D::sync_ghost_vf`], which stands in
/// for the halo exchange a distributed grid performs between ranks.
#[derive(Clone)]
pub struct Grid3D {
    /// Interior cell counts per direction.
    pub n: [usize; 3],

    /// Padded array extents per direction: `n + 2`.
    pub dims: [usize; 3],

    /// Cell widths per direction, over the padded range.
    pub dx: [Vec<f64>; 3],

    /// Cell-center coordinates per direction, over the padded range.
    pub xc: [Vec<f64>; 3],

    /// Face coordinates per direction: `xf[d][i]` is the right face of
    /// cell `i`, so `xf[d][0]` is the lower domain edge.
    pub xf: [Vec<f64>; 3],

    /// Volume fractions over the padded range (1 = fluid, 0 = solid).
    pub vf: Vec<f64>,

    /// Periodicity flags per direction.
    pub periodic: [bool; 3],

    /// True when this rank owns the first plane of the direction.
    pub first_rank: [bool; 3],

    /// True when this rank owns the last plane of the direction.
    pub last_rank: [bool; 3],
}

impl Grid3D {
    /// Create a uniform box `[lo, hi]` with `n` cells per direction.
    ///
    /// Volume fractions are initialized to 1 everywhere (pure fluid).
    pub fn uniform_box(
        lo: [f64; 3],
        hi: [f64; 3],
        n: [usize; 3],
        periodic: [bool; 3],
    ) -> Result<Self, GridError> {
        for d in 0..3 {
            if hi[d] <= lo[d] {
                return Err(GridError::InvalidBounds {
                    axis: d,
                    lo: lo[d],
                    hi: hi[d],
                });
            }
        }
        let widths = [
            vec![(hi[0] - lo[0]) / n[0].max(1) as f64; n[0]],
            vec![(hi[1] - lo[1]) / n[1].max(1) as f64; n[1]],
            vec![(hi[2] - lo[2]) / n[2].max(1) as f64; n[2]],
        ];
        Self::with_spacings(lo, widths, periodic)
    }

    /// Create a grid from per-direction interior cell widths (non-uniform).
    ///
    /// `widths[d]` must contain `n[d]` positive entries. Ghost widths are
    /// wrapped for periodic directions and mirrored otherwise.
    pub fn with_spacings(
        lo: [f64; 3],
        widths: [Vec<f64>; 3],
        periodic: [bool; 3],
    ) -> Result<Self, GridError> {
        let n = [widths[0].len(), widths[1].len(), widths[2].len()];
        for d in 0..3 {
            if n[d] == 0 {
                return Err(GridError::EmptyAxis { axis: d });
            }
            for (i, &w) in widths[d].iter().enumerate() {
                if w <= 0.0 || !w.is_finite() {
                    return Err(GridError::NonPositiveSpacing {
                        axis: d,
                        index: i + 1,
                        value: w,
                    });
                }
            }
        }
        let dims = [n[0] + 2, n[1] + 2, n[2] + 2];

        let mut dx: [Vec<f64>; 3] = Default::default();
        let mut xc: [Vec<f64>; 3] = Default::default();
        let mut xf: [Vec<f64>; 3] = Default::default();
        for d in 0..3 {
            let mut h = vec![0.0; dims[d]];
            h[1..=n[d]].copy_from_slice(&widths[d]);
            if periodic[d] {
                h[0] = widths[d][n[d] - 1];
                h[dims[d] - 1] = widths[d][0];
            } else {
                h[0] = widths[d][0];
                h[dims[d] - 1] = widths[d][n[d] - 1];
            }

            // Face i is the right face of cell i; face 0 is the domain edge.
            let mut f = vec![0.0; dims[d]];
            f[0] = lo[d];
            for i in 1..dims[d] {
                f[i] = f[i - 1] + h[i];
            }
            let mut c = vec![0.0; dims[d]];
            for i in 0..dims[d] {
                c[i] = f[i] - 0.5 * h[i];
            }

            dx[d] = h;
            xc[d] = c;
            xf[d] = f;
        }

        let vf = vec![1.0; dims[0] * dims[1] * dims[2]];
        Ok(Self {
            n,
            dims,
            dx,
            xc,
            xf,
            vf,
            periodic,
            first_rank: [true; 3],
            last_rank: [true; 3],
        })
    }

    /// Linear index into any padded per-cell array.
    #[inline(always)]
    pub fn idx(&self, i: usize, j: usize, k: usize) -> usize {
        (k * self.dims[1] + j) * self.dims[0] + i
    }

    /// Total padded array length.
    #[inline]
    pub fn len(&self) -> usize {
        self.dims[0] * self.dims[1] * self.dims[2]
    }

    /// True if the grid has no cells (never the case after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Volume fraction at a cell.
    #[inline(always)]
    pub fn vf_at(&self, i: usize, j: usize, k: usize) -> f64 {
        self.vf[self.idx(i, j, k)]
    }

    /// Geometric cell volume `dx * dy * dz` (volume fraction not included).
    #[inline(always)]
    pub fn cell_volume(&self, i: usize, j: usize, k: usize) -> f64 {
        self.dx[0][i] * self.dx[1][j] * self.dx[2][k]
    }

    /// Owned index range along a direction (ghosts excluded).
    #[inline]
    pub fn owned(&self, d: usize) -> std::ops::RangeInclusive<usize> {
        1..=self.n[d]
    }

    /// Neighbor index along direction `d`, wrapping through the periodic
    /// seam and clamping to the padded range on walls.
    ///
    /// Padded indices map to the periodic image of the same physical cell,
    /// so operator coefficients built in the ghost layer match the owned
    /// entries they mirror.
    #[inline]
    pub fn neighbor(&self, d: usize, i: usize, step: isize) -> usize {
        let r = i as isize + step;
        if self.periodic[d] {
            ((r - 1).rem_euclid(self.n[d] as isize) + 1) as usize
        } else {
            r.clamp(0, self.dims[d] as isize - 1) as usize
        }
    }

    /// True if face `i` along direction `d` lies on the (non-periodic)
    /// domain boundary owned by this rank. Face `i` sits between cells `i`
    /// and `i + 1`.
    #[inline]
    pub fn is_boundary_face(&self, d: usize, i: usize) -> bool {
        !self.periodic[d]
            && ((self.first_rank[d] && i == 0) || (self.last_rank[d] && i == self.n[d]))
    }

    /// Set the volume fraction of a single cell.
    pub fn set_volume_fraction(&mut self, i: usize, j: usize, k: usize, value: f64) {
        assert!(
            (0.0..=1.0).contains(&value),
            "volume fraction {} out of [0, 1]",
            value
        );
        let id = self.idx(i, j, k);
        self.vf[id] = value;
    }

    /// Fill owned volume fractions from a function of the cell center, then
    /// sync the ghost layer.
    pub fn with_volume_fraction<F>(mut self, f: F) -> Self
    where
        F: Fn(f64, f64, f64) -> f64,
    {
        for k in self.owned(2) {
            for j in self.owned(1) {
                for i in self.owned(0) {
                    let v = f(self.xc[0][i], self.xc[1][j], self.xc[2][k]);
                    self.set_volume_fraction(i, j, k, v);
                }
            }
        }
        self.sync_ghost_vf();
        self
    }

    /// Fill ghost volume fractions: periodic wrap where periodic, nearest
    /// interior value on walls. Stands in for the distributed halo
    /// exchange; single-rank grids call it after editing `vf`.
    pub fn sync_ghost_vf(&mut self) {
        for d in 0..3 {
            let last = self.dims[d] - 1;
            let (lo_src, hi_src) = if self.periodic[d] {
                (self.n[d], 1)
            } else {
                (1, self.n[d])
            };
            self.copy_plane(d, 0, lo_src);
            self.copy_plane(d, last, hi_src);
        }
    }

    /// Copy the vf plane `i_d = src` onto `i_d = dst`.
    fn copy_plane(&mut self, d: usize, dst: usize, src: usize) {
        let dims = self.dims;
        let mut p = [0usize; 3];
        for a in 0..dims[(d + 1) % 3] {
            for b in 0..dims[(d + 2) % 3] {
                p[(d + 1) % 3] = a;
                p[(d + 2) % 3] = b;
                p[d] = src;
                let from = self.idx(p[0], p[1], p[2]);
                p[d] = dst;
                let to = self.idx(p[0], p[1], p[2]);
                self.vf[to] = self.vf[from];
            }
        }
    }
}
