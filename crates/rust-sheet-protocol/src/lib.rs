//! Line protocol between the rust-sheet front-end and the engine process.
//!
//! The engine is invoked once per operation as `<engine> <subcommand> [args...]`. It
//! answers on stdout and writes free-form diagnostics on stderr, one message per line.
//!
//! Every sheet-level subcommand answers with the whole sheet:
//!
//! ```text
//! 2 2
//! A1 Int(5)
//! B2 Text("hi")
//! ```
//!
//! The first line holds `<n_cols> <n_rows>`; each following line holds one non-empty
//! cell as `<Location> <Tag>(<payload>)`. `read_cell` instead answers with a single
//! tagged value, or nothing when the cell is empty.
//!
//! Stdout must be UTF-8; [`decode_lines`] rejects anything else.

mod response;

use rust_sheet_core::{encode_for_write, Position};

pub use response::{
    decode_lines, parse_cell_reply, parse_snapshot, MalformedKind, MalformedResponse,
};

/// Subcommands understood by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Subcommand {
    /// Print the whole sheet.
    ReadSheet,

    /// Remove every cell and reset the dimensions to `0 0`.
    ClearSheet,

    /// Append an empty column.
    AddColumn,

    /// Append an empty row.
    AddRow,

    /// Trim trailing empty rows and columns.
    Shrink,

    /// Store user-entered text at a position; the engine infers its type.
    WriteCell { position: Position, text: String },

    /// Remove the value at a position.
    DeleteCell { position: Position },

    /// Print the raw value stored at a position (formulas unevaluated).
    ReadCell { position: Position },
}

impl Subcommand {
    /// The name passed to the engine as its first argument.
    pub fn name(&self) -> &'static str {
        match self {
            Subcommand::ReadSheet => "read_sheet",
            Subcommand::ClearSheet => "clear_sheet",
            Subcommand::AddColumn => "add_col",
            Subcommand::AddRow => "add_row",
            Subcommand::Shrink => "shrink",
            Subcommand::WriteCell { .. } => "write_cell",
            Subcommand::DeleteCell { .. } => "delete_cell",
            Subcommand::ReadCell { .. } => "read_cell",
        }
    }

    /// The encoded arguments following the name.
    pub fn args(&self) -> Vec<String> {
        match self {
            Subcommand::WriteCell { position, text } => {
                vec![position.to_location(), encode_for_write(text)]
            }
            Subcommand::DeleteCell { position } | Subcommand::ReadCell { position } => {
                vec![position.to_location()]
            }
            _ => Vec::new(),
        }
    }

    /// Whether the engine answers with a full sheet.
    pub fn returns_sheet(&self) -> bool {
        !matches!(self, Subcommand::ReadCell { .. })
    }
}
