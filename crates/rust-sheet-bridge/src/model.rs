//! The sheet model: the last snapshot the engine reported.

use rust_sheet_core::{CellValue, Position, Snapshot};
use rust_sheet_protocol::{parse_cell_reply, parse_snapshot, MalformedResponse, Subcommand};

use crate::client::ProtocolClient;
use crate::error::{BridgeError, Result};
use crate::transport::Transport;

/// What a subcommand answered with.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// The stored snapshot was replaced; read it with [`SheetModel::snapshot`].
    Sheet,
    /// The raw value of a single cell.
    Cell(Option<CellValue>),
}

/// Holds the authoritative sheet state as last reported by the engine.
///
/// Every operation runs one engine subcommand. Operations that answer with a sheet
/// replace the stored snapshot as a whole on success and leave it untouched on any
/// error. Nothing is ever patched locally.
pub struct SheetModel<T> {
    client: ProtocolClient<T>,
    snapshot: Snapshot,
}

impl<T: Transport> SheetModel<T> {
    /// Create a model with an empty snapshot. Call [`read_sheet`](Self::read_sheet) to load.
    pub fn new(client: ProtocolClient<T>) -> Self {
        Self {
            client,
            snapshot: Snapshot::empty(),
        }
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn client(&self) -> &ProtocolClient<T> {
        &self.client
    }

    /// Load the full sheet.
    pub fn read_sheet(&mut self) -> Result<&Snapshot> {
        self.refresh(&Subcommand::ReadSheet)
    }

    /// Remove every cell.
    pub fn clear_sheet(&mut self) -> Result<&Snapshot> {
        self.refresh(&Subcommand::ClearSheet)
    }

    /// Append a column.
    pub fn add_column(&mut self) -> Result<&Snapshot> {
        self.refresh(&Subcommand::AddColumn)
    }

    /// Append a row.
    pub fn add_row(&mut self) -> Result<&Snapshot> {
        self.refresh(&Subcommand::AddRow)
    }

    /// Let the engine trim trailing empty rows and columns.
    pub fn shrink(&mut self) -> Result<&Snapshot> {
        self.refresh(&Subcommand::Shrink)
    }

    /// Store user-entered text at a position. The engine decides its type.
    pub fn write_cell(&mut self, position: Position, text: &str) -> Result<&Snapshot> {
        self.refresh(&Subcommand::WriteCell {
            position,
            text: text.to_string(),
        })
    }

    /// Remove the value at a position.
    pub fn delete_cell(&mut self, position: Position) -> Result<&Snapshot> {
        self.refresh(&Subcommand::DeleteCell { position })
    }

    /// Fetch the raw value stored at a position, without touching the snapshot.
    ///
    /// Unlike the snapshot, this shows formulas as written rather than evaluated.
    pub fn read_cell(&mut self, position: Position) -> Result<Option<CellValue>> {
        let cmd = Subcommand::ReadCell { position };
        let lines = self.client.invoke(cmd.name(), &cmd.args())?;
        parse_cell_reply(&lines).map_err(|response| self.malformed(&cmd, response))
    }

    /// Run any subcommand, e.g. one produced from a UI action.
    pub fn apply(&mut self, cmd: &Subcommand) -> Result<Reply> {
        match cmd {
            Subcommand::ReadCell { position } => self.read_cell(*position).map(Reply::Cell),
            _ => self.refresh(cmd).map(|_| Reply::Sheet),
        }
    }

    fn refresh(&mut self, cmd: &Subcommand) -> Result<&Snapshot> {
        let lines = self.client.invoke(cmd.name(), &cmd.args())?;
        let snapshot = parse_snapshot(&lines).map_err(|response| self.malformed(cmd, response))?;

        tracing::info!(
            "{}: sheet is now {} cols x {} rows with {} values",
            cmd.name(),
            snapshot.n_cols(),
            snapshot.n_rows(),
            snapshot.value_count()
        );
        self.snapshot = snapshot;
        Ok(&self.snapshot)
    }

    fn malformed(&mut self, cmd: &Subcommand, response: MalformedResponse) -> BridgeError {
        let err = BridgeError::MalformedEngineResponse {
            subcommand: cmd.name().to_string(),
            response,
        };
        self.client.report(&err);
        err
    }
}

/// Parse a location typed by the user, e.g. into a "go to cell" box.
pub fn parse_location(text: &str) -> Result<Position> {
    Position::parse(text.trim()).map_err(BridgeError::MalformedLocation)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::transport::testing::ScriptedTransport;
    use crate::transport::RawOutput;

    const SAMPLE: &str = "2 2\nA1 Int(5)\nB2 Text(\"hi\")\n";

    fn model(transport: ScriptedTransport) -> SheetModel<ScriptedTransport> {
        SheetModel::new(ProtocolClient::new(transport).with_sink(|_: &str, _: &str| {}))
    }

    fn calls(model: &SheetModel<ScriptedTransport>) -> Vec<(String, Vec<String>)> {
        model.client().transport().calls.clone()
    }

    #[test]
    fn test_starts_empty() {
        let model = model(ScriptedTransport::new());
        assert_eq!(model.snapshot(), &Snapshot::empty());
    }

    #[test]
    fn test_read_sheet() {
        let mut model = model(ScriptedTransport::new().reply(SAMPLE));

        let snapshot = model.read_sheet().unwrap();

        assert_eq!(snapshot.n_cols(), 2);
        assert_eq!(snapshot.n_rows(), 2);
        assert_eq!(snapshot.get(Position::new(0, 0)), Some(&CellValue::Integer(5)));
        assert_eq!(
            snapshot.get(Position::new(1, 1)),
            Some(&CellValue::Text("hi".into()))
        );
        assert_eq!(snapshot.cell(Position::new(0, 1)).unwrap(), None);
        assert_eq!(snapshot.cell(Position::new(1, 0)).unwrap(), None);
    }

    #[test]
    fn test_each_operation_sends_its_subcommand() {
        let mut model = model(
            ScriptedTransport::new()
                .reply("0 0")
                .reply("1 0")
                .reply("1 1")
                .reply("1 1\nA1 Text(\"x y\")")
                .reply("1 1")
                .reply("0 0"),
        );

        model.clear_sheet().unwrap();
        model.add_column().unwrap();
        model.add_row().unwrap();
        model.write_cell(Position::new(0, 0), "x y").unwrap();
        model.delete_cell(Position::new(0, 0)).unwrap();
        model.shrink().unwrap();

        let no_args = Vec::<String>::new();
        assert_eq!(
            calls(&model),
            vec![
                ("clear_sheet".to_string(), no_args.clone()),
                ("add_col".to_string(), no_args.clone()),
                ("add_row".to_string(), no_args.clone()),
                (
                    "write_cell".to_string(),
                    vec!["A1".to_string(), "x y".to_string()]
                ),
                ("delete_cell".to_string(), vec!["A1".to_string()]),
                ("shrink".to_string(), no_args),
            ]
        );
        assert_eq!(model.snapshot(), &Snapshot::empty());
    }

    #[test]
    fn test_each_operation_replaces_the_snapshot() {
        let mut model = model(ScriptedTransport::new().reply(SAMPLE).reply("3 2\nC1 Int(9)"));

        model.read_sheet().unwrap();
        let snapshot = model.add_column().unwrap();

        assert_eq!(snapshot.n_cols(), 3);
        assert_eq!(snapshot.get(Position::new(0, 0)), None);
        assert_eq!(snapshot.get(Position::new(2, 0)), Some(&CellValue::Integer(9)));
    }

    #[test]
    fn test_malformed_header_keeps_previous_snapshot() {
        let mut model = model(ScriptedTransport::new().reply(SAMPLE).reply("two 2\nA1 Int(1)"));
        let before = model.read_sheet().unwrap().clone();

        let err = model.read_sheet().unwrap_err();

        match err {
            BridgeError::MalformedEngineResponse {
                subcommand,
                response,
            } => {
                assert_eq!(subcommand, "read_sheet");
                assert_eq!(response.line, "two 2");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(model.snapshot(), &before);
    }

    #[test]
    fn test_invalid_utf8_keeps_previous_snapshot() {
        let mut model = model(
            ScriptedTransport::new()
                .reply(SAMPLE)
                .reply(b"2 2\nA1 Text(\"a\xffb\")\n".to_vec()),
        );
        let before = model.read_sheet().unwrap().clone();

        assert!(matches!(
            model.read_sheet(),
            Err(BridgeError::MalformedEngineResponse { .. })
        ));
        assert_eq!(model.snapshot(), &before);
    }

    #[test]
    fn test_malformed_cell_line_keeps_previous_snapshot() {
        let mut model = model(
            ScriptedTransport::new()
                .reply(SAMPLE)
                .reply("2 2\nA1 Int(6)\nB2 garbage"),
        );
        let before = model.read_sheet().unwrap().clone();

        assert!(model.write_cell(Position::new(0, 0), "6").is_err());
        assert_eq!(model.snapshot(), &before);
    }

    #[test]
    fn test_engine_failure_keeps_previous_snapshot() {
        let failed = RawOutput {
            success: false,
            code: Some(101),
            stdout: "9 9".into(),
            stderr: "panicked".into(),
        };
        let mut model = model(
            ScriptedTransport::new()
                .reply(SAMPLE)
                .reply_with(failed)
                .fail_launch(),
        );
        let before = model.read_sheet().unwrap().clone();

        assert!(matches!(
            model.add_row(),
            Err(BridgeError::EngineExecutionFailed { .. })
        ));
        assert!(matches!(
            model.shrink(),
            Err(BridgeError::EngineUnavailable { .. })
        ));
        assert_eq!(model.snapshot(), &before);
    }

    #[test]
    fn test_read_cell_leaves_snapshot_alone() {
        let mut model = model(
            ScriptedTransport::new()
                .reply(SAMPLE)
                .reply("Formula(\"=A1*2\")")
                .reply(""),
        );
        model.read_sheet().unwrap();

        assert_eq!(
            model.read_cell(Position::new(0, 1)).unwrap(),
            Some(CellValue::Text("=A1*2".into()))
        );
        assert_eq!(model.read_cell(Position::new(1, 0)).unwrap(), None);
        assert_eq!(model.snapshot().value_count(), 2);
        assert_eq!(calls(&model)[1], ("read_cell".to_string(), vec!["A2".to_string()]));
    }

    #[test]
    fn test_apply() {
        let mut model = model(ScriptedTransport::new().reply(SAMPLE).reply("Int(5)"));

        assert_eq!(model.apply(&Subcommand::ReadSheet).unwrap(), Reply::Sheet);
        assert_eq!(
            model
                .apply(&Subcommand::ReadCell {
                    position: Position::new(0, 0)
                })
                .unwrap(),
            Reply::Cell(Some(CellValue::Integer(5)))
        );
    }

    #[test]
    fn test_parse_location() {
        assert_eq!(parse_location(" b12 ").unwrap(), Position::new(1, 11));
        assert!(matches!(
            parse_location("12B"),
            Err(BridgeError::MalformedLocation(_))
        ));
    }
}
