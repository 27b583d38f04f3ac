//! Immutable sheet snapshots

use std::collections::BTreeMap;

use crate::cell::{CellValue, Position};
use crate::error::{Error, Result};

/// The full state of a sheet at one point in time
///
/// A snapshot covers every position inside `n_cols` x `n_rows`: positions with no stored
/// value are empty cells. It cannot be changed once built; a new state from the engine
/// always means a new snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    n_cols: u32,
    n_rows: u32,
    cells: BTreeMap<Position, CellValue>,
}

impl Snapshot {
    /// A snapshot with no rows and no columns
    pub fn empty() -> Self {
        Self::default()
    }

    /// Start building a snapshot with the given dimensions
    pub fn builder(n_cols: u32, n_rows: u32) -> SnapshotBuilder {
        SnapshotBuilder {
            snapshot: Snapshot {
                n_cols,
                n_rows,
                cells: BTreeMap::new(),
            },
        }
    }

    /// Number of columns
    pub fn n_cols(&self) -> u32 {
        self.n_cols
    }

    /// Number of rows
    pub fn n_rows(&self) -> u32 {
        self.n_rows
    }

    /// Whether the position lies inside the snapshot's dimensions
    pub fn contains(&self, pos: Position) -> bool {
        pos.column < self.n_cols && pos.row < self.n_rows
    }

    /// Get the value at an in-bounds position (`None` for an empty cell)
    pub fn cell(&self, pos: Position) -> Result<Option<&CellValue>> {
        if !self.contains(pos) {
            return Err(self.out_of_bounds(pos));
        }
        Ok(self.cells.get(&pos))
    }

    /// Get the value at a position, treating out-of-bounds positions as empty
    pub fn get(&self, pos: Position) -> Option<&CellValue> {
        self.cells.get(&pos)
    }

    /// Render the value at a position as display text (empty string for empty cells)
    pub fn display_text(&self, pos: Position) -> String {
        self.get(pos).map(ToString::to_string).unwrap_or_default()
    }

    /// Number of non-empty cells
    pub fn value_count(&self) -> usize {
        self.cells.len()
    }

    /// Iterate over the non-empty cells in position order
    pub fn values(&self) -> impl Iterator<Item = (Position, &CellValue)> {
        self.cells.iter().map(|(pos, value)| (*pos, value))
    }

    /// Iterate over every in-bounds position row by row, with its value if it has one
    pub fn cells(&self) -> impl Iterator<Item = (Position, Option<&CellValue>)> + '_ {
        (0..self.n_rows).flat_map(move |row| {
            (0..self.n_cols).map(move |column| {
                let pos = Position::new(column, row);
                (pos, self.cells.get(&pos))
            })
        })
    }

    fn out_of_bounds(&self, pos: Position) -> Error {
        Error::PositionOutOfBounds {
            position: pos.to_location(),
            n_cols: self.n_cols,
            n_rows: self.n_rows,
        }
    }
}

/// Collects the values of a new [`Snapshot`]
#[derive(Debug)]
pub struct SnapshotBuilder {
    snapshot: Snapshot,
}

impl SnapshotBuilder {
    /// Add a value; the position must be in bounds and not already filled
    pub fn insert(&mut self, pos: Position, value: CellValue) -> Result<&mut Self> {
        if !self.snapshot.contains(pos) {
            return Err(self.snapshot.out_of_bounds(pos));
        }
        if self.snapshot.cells.contains_key(&pos) {
            return Err(Error::DuplicateCell(pos.to_location()));
        }
        self.snapshot.cells.insert(pos, value);
        Ok(self)
    }

    /// Finish the snapshot
    pub fn build(self) -> Snapshot {
        self.snapshot
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use serde::ser::{Serialize, SerializeStruct, Serializer};

    use super::Snapshot;

    #[derive(serde::Serialize)]
    struct Entry<'a> {
        location: String,
        value: &'a crate::CellValue,
    }

    impl Serialize for Snapshot {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let cells: Vec<Entry<'_>> = self
                .values()
                .map(|(pos, value)| Entry {
                    location: pos.to_location(),
                    value,
                })
                .collect();

            let mut state = serializer.serialize_struct("Snapshot", 3)?;
            state.serialize_field("n_cols", &self.n_cols)?;
            state.serialize_field("n_rows", &self.n_rows)?;
            state.serialize_field("cells", &cells)?;
            state.end()
        }
    }
}
