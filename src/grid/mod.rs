//! Structured staggered (MAC) grid with ghost layers and volume fractions.
//!
//! Pressure lives at cell centers, each velocity component on the face
//! normal to its direction: `u(i,j,k)` is the value on the *right* x-face
//! of cell `(i,j,k)`, and likewise for `v`/`w` in y/z.
//!
//! Every per-cell array (coordinates, spacings, volume fractions, fields,
//! operator tables) spans `n + 2` entries per direction: index `0` and
//! `n + 1` are the ghost layer, `1..=n` is the owned range.

mod grid3d;

pub use grid3d::{Grid3D, GridError};
