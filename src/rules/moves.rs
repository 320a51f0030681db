//! Moves and the per-position legality cache.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Error, Result, Square};

/// Ordered destination list produced by a piece or a board.
pub type Destinations = SmallVec<[Square; 8]>;

/// A single origin → destination move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    #[must_use]
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Mapping from each origin of the side to move to its ordered legal destinations.
///
/// A table is stamped with the board version it was built for. The owning
/// board only hands it out while the stamp matches its current version, so a
/// table is never read across a structural mutation.
///
/// Origins appear in scan order (rank 8 to rank 1, file a to h). Moves are
/// numbered by walking origins in that order and destinations in list order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveTable {
    built_for: Option<u64>,
    entries: Vec<(Square, Destinations)>,
    total: usize,
}

impl MoveTable {
    /// Create an empty table for the given board version.
    #[must_use]
    pub fn new(version: u64) -> Self {
        Self {
            built_for: Some(version),
            entries: Vec::new(),
            total: 0,
        }
    }

    /// Record an origin and its legal destinations (possibly empty).
    pub fn push(&mut self, origin: Square, destinations: Destinations) {
        self.total += destinations.len();
        self.entries.push((origin, destinations));
    }

    /// Whether this table was built for `version`.
    #[inline]
    #[must_use]
    pub fn is_built_for(&self, version: u64) -> bool {
        self.built_for == Some(version)
    }

    /// Total number of legal moves.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Legal destinations recorded for `origin`.
    #[must_use]
    pub fn destinations(&self, origin: Square) -> Option<&[Square]> {
        self.entries
            .iter()
            .find(|(sq, _)| *sq == origin)
            .map(|(_, dests)| dests.as_slice())
    }

    /// Origins with their destination lists.
    pub fn entries(&self) -> impl Iterator<Item = (Square, &[Square])> {
        self.entries.iter().map(|(sq, dests)| (*sq, dests.as_slice()))
    }

    /// Iterate over all moves in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = Move> + '_ {
        self.entries
            .iter()
            .flat_map(|(from, dests)| dests.iter().map(move |to| Move::new(*from, *to)))
    }

    /// The `index`-th move in enumeration order.
    pub fn nth(&self, index: usize) -> Result<Move> {
        let mut remaining = index;
        for (from, dests) in &self.entries {
            if remaining < dests.len() {
                return Ok(Move::new(*from, dests[remaining]));
            }
            remaining -= dests.len();
        }
        Err(Error::IndexOutOfRange {
            index,
            len: self.total,
        })
    }
}
