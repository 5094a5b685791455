//! Named boundary-condition regions.
//!
//! A region is a condition kind plus the materialized set of grid indices
//! for which a caller-supplied predicate holds. The registry stores the
//! kind but never interprets it: how a Dirichlet region affects the
//! momentum equation is the consuming collaborator's business.
//!
//! Predicates are pure, total boolean tests (return `false` outside their
//! region, never error) evaluated once over the full owned+halo index
//! space at registration. The registry is append-only; duplicate names and
//! empty regions are legal but almost always unintended, so both draw a
//! diagnostic on stderr without changing behavior.

use crate::grid::Grid3D;

/// Boundary condition kind. Stored, not interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BcKind {
    Dirichlet,
    Neumann,
}

/// A named region: kind plus materialized member indices.
#[derive(Clone)]
pub struct BcRegion {
    /// Unique name used for lookup.
    pub name: String,
    /// Condition kind.
    pub kind: BcKind,
    /// Grid index triples for which the predicate held, in sweep order.
    pub cells: Vec<[usize; 3]>,
}

/// Append-ordered collection of boundary regions.
#[derive(Default)]
pub struct BcRegistry {
    regions: Vec<BcRegion>,
}

impl BcRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a region by evaluating `predicate` over the full padded
    /// index space and materializing the matches.
    ///
    /// Warns on stderr if the name is already taken or if the predicate
    /// matched nothing; neither is fatal.
    pub fn register<F>(&mut self, grid: &Grid3D, name: impl Into<String>, kind: BcKind, predicate: F)
    where
        F: Fn(&Grid3D, usize, usize, usize) -> bool,
    {
        let name = name.into();
        if self.get(&name).is_some() {
            eprintln!(
                "Warning: boundary region '{}' registered more than once; \
                 lookups resolve to the first registration",
                name
            );
        }

        let mut cells = Vec::new();
        for k in 0..grid.dims[2] {
            for j in 0..grid.dims[1] {
                for i in 0..grid.dims[0] {
                    if predicate(grid, i, j, k) {
                        cells.push([i, j, k]);
                    }
                }
            }
        }
        if cells.is_empty() {
            eprintln!("Warning: boundary region '{}' matched no cells", name);
        }

        self.regions.push(BcRegion { name, kind, cells });
    }

    /// Look up a region by name (first registration wins on duplicates).
    pub fn get(&self, name: &str) -> Option<&BcRegion> {
        self.regions.iter().find(|r| r.name == name)
    }

    /// Iterate regions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &BcRegion> {
        self.regions.iter()
    }

    /// Number of registered regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// True if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
