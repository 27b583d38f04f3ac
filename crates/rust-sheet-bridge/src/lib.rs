//! Front-end bridge to the rust-sheet engine process.
//!
//! The engine owns the sheet: it stores it, evaluates formulas and is the only source
//! of truth. This crate runs it once per operation, forwards its stderr to a
//! diagnostics sink, and turns its stdout into an immutable [`Snapshot`] that the rest
//! of the application reads.
//!
//! # Architecture
//!
//! ```text
//! UI action
//!     └── SheetModel (this crate)          keeps the last good Snapshot
//!           └── ProtocolClient             stderr -> DiagnosticsSink, stdout -> lines
//!                 └── ProcessTransport     runs: <engine> <subcommand> [args...]
//! ```
//!
//! Engine calls block until the process exits. Every call that can reach the engine
//! takes `&mut self`, so two calls can never overlap and the snapshot is only read
//! between calls.
//!
//! # Example
//!
//! ```rust,no_run
//! use rust_sheet_bridge::{EngineConfig, Position, ProcessTransport, ProtocolClient, SheetModel};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transport = ProcessTransport::new(EngineConfig::new("rsheet-engine"));
//!     let client = ProtocolClient::new(transport)
//!         .with_sink(|source: &str, line: &str| eprintln!("[{source}] {line}"));
//!     let mut model = SheetModel::new(client);
//!
//!     model.read_sheet()?;
//!     model.write_cell(Position::new(0, 0), "42")?;
//!     println!("A1 = {}", model.snapshot().display_text(Position::new(0, 0)));
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod model;
mod reconcile;
mod transport;

pub use client::{DiagnosticsSink, ProtocolClient, TracingSink, BACKEND, FRONTEND};
pub use config::EngineConfig;
pub use error::{BridgeError, Result};
pub use model::{parse_location, Reply, SheetModel};
pub use reconcile::{decide, reconcile_edit, CellDisplay, EditDecision, Reconciled};
pub use transport::{ProcessTransport, RawOutput, Transport};

pub use rust_sheet_core::{CellValue, Position, Snapshot};
pub use rust_sheet_protocol::{MalformedKind, MalformedResponse, Subcommand};
