//! Velocity/pressure field storage.

use crate::grid::Grid3D;

/// A scalar field over the padded grid range, stored flat.
///
/// Used for both cell-centered quantities (pressure, divergence) and
/// staggered velocity components; the staggering convention lives in the
/// operator tables, not in the storage.
#[derive(Clone, PartialEq)]
pub struct ScalarField {
    /// Flat storage, indexed by [`Grid3D::idx`].
    pub data: Vec<f64>,

    /// Padded extents, mirrored from the grid.
    pub dims: [usize; 3],
}

impl ScalarField {
    /// Zero-initialized field matching the grid's padded range.
    pub fn new(grid: &Grid3D) -> Self {
        Self {
            data: vec![0.0; grid.len()],
            dims: grid.dims,
        }
    }

    /// Linear index (same layout as [`Grid3D::idx`]).
    #[inline(always)]
    pub fn idx(&self, i: usize, j: usize, k: usize) -> usize {
        (k * self.dims[1] + j) * self.dims[0] + i
    }

    /// Value at a point.
    #[inline(always)]
    pub fn get(&self, i: usize, j: usize, k: usize) -> f64 {
        self.data[self.idx(i, j, k)]
    }

    /// Set a value at a point.
    #[inline(always)]
    pub fn set(&mut self, i: usize, j: usize, k: usize, value: f64) {
        let id = self.idx(i, j, k);
        self.data[id] = value;
    }

    /// Fill the entire padded range with one value.
    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }

    /// Copy all values from another field of the same shape.
    pub fn copy_from(&mut self, other: &Self) {
        debug_assert_eq!(self.dims, other.dims);
        self.data.copy_from_slice(&other.data);
    }

    /// Add `c * other` to self (axpy operation).
    pub fn axpy(&mut self, c: f64, other: &Self) {
        debug_assert_eq!(self.dims, other.dims);
        for (a, b) in self.data.iter_mut().zip(other.data.iter()) {
            *a += c * b;
        }
    }

    /// Maximum absolute value over the owned range.
    pub fn max_abs_owned(&self, grid: &Grid3D) -> f64 {
        let mut m: f64 = 0.0;
        for k in grid.owned(2) {
            for j in grid.owned(1) {
                for i in grid.owned(0) {
                    m = m.max(self.data[self.idx(i, j, k)].abs());
                }
            }
        }
        m
    }

    /// Fill ghost planes by periodic wrap where the grid is periodic.
    ///
    /// Wall ghosts are left untouched: their values belong to the boundary
    /// condition mechanism. Stands in for the distributed halo exchange on
    /// a single-rank grid.
    pub fn sync_ghost(&mut self, grid: &Grid3D) {
        for d in 0..3 {
            if !grid.periodic[d] {
                continue;
            }
            let last = self.dims[d] - 1;
            self.copy_plane(d, 0, grid.n[d]);
            self.copy_plane(d, last, 1);
        }
    }

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
                self.data[to] = self.data[from];
            }
        }
    }
}

/// Staggered velocity components, pressure, and previous-step snapshots.
///
/// Zero-initialized at construction; the core only reads these fields, the
/// time-integration collaborator mutates them between calls.
#[derive(Clone)]
pub struct FlowState {
    /// x-face velocity.
    pub u: ScalarField,
    /// y-face velocity.
    pub v: ScalarField,
    /// z-face velocity.
    pub w: ScalarField,
    /// Cell-centered pressure.
    pub p: ScalarField,
    /// Previous-step u.
    pub u0: ScalarField,
    /// Previous-step v.
    pub v0: ScalarField,
    /// Previous-step w.
    pub w0: ScalarField,
}

impl FlowState {
    /// All-zero state over the grid's padded range.
    pub fn new(grid: &Grid3D) -> Self {
        Self {
            u: ScalarField::new(grid),
            v: ScalarField::new(grid),
            w: ScalarField::new(grid),
            p: ScalarField::new(grid),
            u0: ScalarField::new(grid),
            v0: ScalarField::new(grid),
            w0: ScalarField::new(grid),
        }
    }

    /// Velocity component by direction index (0 = u, 1 = v, 2 = w).
    #[inline(always)]
    pub fn vel(&self, d: usize) -> &ScalarField {
        match d {
            0 => &self.u,
            1 => &self.v,
            _ => &self.w,
        }
    }

    /// Mutable velocity component by direction index.
    #[inline(always)]
    pub fn vel_mut(&mut self, d: usize) -> &mut ScalarField {
        match d {
            0 => &mut self.u,
            1 => &mut self.v,
            _ => &mut self.w,
        }
    }

    /// Snapshot the current velocity into the previous-step fields.
    pub fn store_previous(&mut self) {
        self.u0.copy_from(&self.u);
        self.v0.copy_from(&self.v);
        self.w0.copy_from(&self.w);
    }

    /// Wrap the ghost planes of every field through periodic seams.
    pub fn sync_ghost(&mut self, grid: &Grid3D) {
        self.u.sync_ghost(grid);
        self.v.sync_ghost(grid);
        self.w.sync_ghost(grid);
        self.p.sync_ghost(grid);
    }
}
