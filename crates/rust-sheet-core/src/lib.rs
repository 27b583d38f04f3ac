//! # rust-sheet-core
//!
//! Core data structures shared by the rust-sheet front-end crates.
//!
//! - [`Position`] - Grid positions and their spreadsheet locations (`A1`, `B12`, `AA3`)
//! - [`CellValue`] - Typed cell values decoded from engine output
//! - [`Snapshot`] - An immutable, fully-populated view of a sheet
//!
//! ## Example
//!
//! ```rust
//! use rust_sheet_core::{CellValue, Position, Snapshot};
//!
//! let pos: Position = "B2".parse().unwrap();
//! let mut builder = Snapshot::builder(2, 2);
//! builder.insert(pos, CellValue::decode("Int(5)").unwrap()).unwrap();
//! let snapshot = builder.build();
//!
//! assert_eq!(snapshot.get(pos), Some(&CellValue::Integer(5)));
//! assert_eq!(snapshot.get(Position::new(0, 0)), None);
//! ```

pub mod cell;
pub mod error;
pub mod snapshot;

pub use cell::{encode_for_write, CellValue, Position};
pub use error::{Error, Result};
pub use snapshot::{Snapshot, SnapshotBuilder};
