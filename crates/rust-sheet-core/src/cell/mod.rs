//! Cell-related types
//!
//! This module contains:
//! - [`Position`] - A zero-based grid position and its `"B12"`-style location
//! - [`CellValue`] - A typed value decoded from the engine's `Tag(payload)` format

mod position;
mod value;

pub use position::Position;
pub use value::{encode_for_write, CellValue};
