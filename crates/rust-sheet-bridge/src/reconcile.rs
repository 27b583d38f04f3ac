//! Deciding whether an edited cell needs to be written back to the engine.
//!
//! A grid widget shows one text per cell. When the user leaves a cell, its text is
//! compared with the value the model holds for that position and written back only if
//! it actually changed. After a write the cell shows what the engine stored, never the
//! raw local edit.

use rust_sheet_core::{CellValue, Position};

use crate::error::Result;
use crate::model::SheetModel;
use crate::transport::Transport;

/// What to do with an edited cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditDecision<'a> {
    /// The text matches the model; nothing to send.
    Unchanged,
    /// Send this (trimmed) text to the engine.
    Write(&'a str),
}

/// The outcome of [`reconcile_edit`].
#[derive(Debug, Clone, PartialEq)]
pub enum Reconciled {
    Unchanged,
    /// The engine accepted a write and now holds `confirmed` at the position.
    Written { confirmed: Option<CellValue> },
}

/// Somewhere cell text is shown, e.g. the grid widget.
pub trait CellDisplay {
    fn show(&mut self, position: Position, text: &str);
}

impl<F> CellDisplay for F
where
    F: FnMut(Position, &str),
{
    fn show(&mut self, position: Position, text: &str) {
        self(position, text)
    }
}

/// Compare displayed text with the model's value for the same cell.
///
/// The text is trimmed first. An empty cell only needs a write when the trimmed text is
/// non-empty; a filled cell needs one when the trimmed text differs from the value's
/// rendered payload.
pub fn decide<'a>(displayed_text: &'a str, model_value: Option<&CellValue>) -> EditDecision<'a> {
    let text = displayed_text.trim();
    let changed = match model_value {
        None => !text.is_empty(),
        Some(value) => text != value.to_string(),
    };

    if changed {
        EditDecision::Write(text)
    } else {
        EditDecision::Unchanged
    }
}

/// Write an edited cell back to the engine if it changed, then show the stored value.
///
/// At most one `write_cell` is issued. Whatever happens, `display` ends up showing the
/// model's value for the position: the confirmed value after a write, the previous one
/// if the write failed.
pub fn reconcile_edit<T: Transport>(
    model: &mut SheetModel<T>,
    position: Position,
    displayed_text: &str,
    display: &mut impl CellDisplay,
) -> Result<Reconciled> {
    let text = match decide(displayed_text, model.snapshot().get(position)) {
        EditDecision::Unchanged => return Ok(Reconciled::Unchanged),
        EditDecision::Write(text) => text,
    };

    tracing::debug!("Cell {position} changed, writing {text:?}");
    match model.write_cell(position, text) {
        Ok(snapshot) => {
            let confirmed = snapshot.get(position).cloned();
            display.show(position, &snapshot.display_text(position));
            Ok(Reconciled::Written { confirmed })
        }
        Err(err) => {
            display.show(position, &model.snapshot().display_text(position));
            Err(err)
        }
    }
}
