//! Fixed-size stencil vocabulary.
//!
//! Stencil width is a compile-time invariant of the discretization: every
//! first-derivative and interpolation stencil has exactly two points, the
//! assembled Laplacian row exactly seven. They are stored as plain arrays
//! indexed by the constants and enum below, never as dynamic containers.

/// A two-point stencil coefficient pair.
///
/// Entry [`LO`] applies to the lower-index value of the pair, [`HI`] to the
/// higher-index value. Which pair a table addresses (backward `(i-1, i)` or
/// forward `(i, i+1)`) is fixed per table family and documented on
/// [`crate::OperatorTables`].
pub type Coeff2 = [f64; 2];

/// Index of the lower-offset entry of a [`Coeff2`].
pub const LO: usize = 0;

/// Index of the higher-offset entry of a [`Coeff2`].
pub const HI: usize = 1;

/// Entry order of an assembled 7-point Laplacian row: the cell itself
/// followed by its six face neighbors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LaplacianEntry {
    Center,
    XMinus,
    XPlus,
    YMinus,
    YPlus,
    ZMinus,
    ZPlus,
}

impl LaplacianEntry {
    /// Position of this entry within a `[f64; 7]` row.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The minus-side entry for a direction (0 = x, 1 = y, 2 = z).
    #[inline(always)]
    pub const fn minus(d: usize) -> Self {
        match d {
            0 => Self::XMinus,
            1 => Self::YMinus,
            _ => Self::ZMinus,
        }
    }

    /// The plus-side entry for a direction.
    #[inline(always)]
    pub const fn plus(d: usize) -> Self {
        match d {
            0 => Self::XPlus,
            1 => Self::YPlus,
            _ => Self::ZPlus,
        }
    }
}

/// Step a padded index triple along a direction. The caller guarantees the
/// result stays inside the padded range.
#[inline(always)]
pub(crate) fn shift(p: [usize; 3], d: usize, step: isize) -> [usize; 3] {
    let mut q = p;
    q[d] = (q[d] as isize + step) as usize;
    q
}
