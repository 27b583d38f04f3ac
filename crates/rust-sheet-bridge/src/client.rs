//! Invoking the engine and forwarding its diagnostics.

use rust_sheet_protocol::decode_lines;

use crate::error::{BridgeError, Result};
use crate::transport::Transport;

/// Source label for lines the engine wrote to stderr.
pub const BACKEND: &str = "BACKEND";

/// Source label for failures detected on this side of the process boundary.
pub const FRONTEND: &str = "FRONTEND";

/// Receives diagnostic lines for display, one line per call, in the order produced.
pub trait DiagnosticsSink {
    fn write(&mut self, source: &str, line: &str);
}

impl<F> DiagnosticsSink for F
where
    F: FnMut(&str, &str),
{
    fn write(&mut self, source: &str, line: &str) {
        self(source, line)
    }
}

/// Sends diagnostics to the `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn write(&mut self, source: &str, line: &str) {
        tracing::info!(target: "rust_sheet::diagnostics", source, "{line}");
    }
}

/// Runs engine subcommands and returns their stdout as lines.
pub struct ProtocolClient<T> {
    transport: T,
    sink: Box<dyn DiagnosticsSink>,
}

impl<T: Transport> ProtocolClient<T> {
    /// Create a client whose diagnostics go to [`TracingSink`].
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            sink: Box::new(TracingSink),
        }
    }

    /// Replace the diagnostics sink.
    pub fn with_sink(mut self, sink: impl DiagnosticsSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run `subcommand` with `args` and wait for it to finish.
    ///
    /// Every stderr line is forwarded to the sink under [`BACKEND`] before the exit
    /// status is looked at. A failed launch or an unsuccessful exit is an error and
    /// any stdout from that run is discarded. Stdout that is not valid UTF-8 is a
    /// malformed response.
    pub fn invoke(&mut self, subcommand: &str, args: &[String]) -> Result<Vec<String>> {
        tracing::debug!("Invoking engine: {subcommand} {args:?}");

        let output = match self.transport.execute(subcommand, args) {
            Ok(output) => output,
            Err(err) => {
                self.report(&err);
                return Err(err);
            }
        };

        for line in output.stderr.lines() {
            self.sink.write(BACKEND, line);
        }

        if !output.success {
            let err = BridgeError::EngineExecutionFailed {
                subcommand: subcommand.to_string(),
                code: output.code,
            };
            self.report(&err);
            return Err(err);
        }

        decode_lines(&output.stdout).map_err(|response| {
            let err = BridgeError::MalformedEngineResponse {
                subcommand: subcommand.to_string(),
                response,
            };
            self.report(&err);
            err
        })
    }

    /// Surface an error to the user through the diagnostics sink.
    pub(crate) fn report(&mut self, err: &BridgeError) {
        tracing::warn!("{err}");
        for line in err.to_string().lines() {
            self.sink.write(FRONTEND, line);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::transport::testing::ScriptedTransport;
    use crate::transport::RawOutput;
    use rust_sheet_protocol::MalformedKind;

    type Log = Rc<RefCell<Vec<(String, String)>>>;

    fn client(transport: ScriptedTransport) -> (ProtocolClient<ScriptedTransport>, Log) {
        let log: Log = Rc::default();
        let sink_log = Rc::clone(&log);
        let client = ProtocolClient::new(transport).with_sink(move |source: &str, line: &str| {
            sink_log
                .borrow_mut()
                .push((source.to_string(), line.to_string()));
        });
        (client, log)
    }

    fn entry(source: &str, line: &str) -> (String, String) {
        (source.to_string(), line.to_string())
    }

    #[test]
    fn test_invoke_returns_stdout_lines() {
        let (mut client, log) = client(ScriptedTransport::new().reply("2 2\nA1 Int(5)\n"));

        let lines = client.invoke("read_sheet", &[]).unwrap();

        assert_eq!(lines, vec!["2 2", "A1 Int(5)"]);
        assert!(log.borrow().is_empty());
        assert_eq!(
            client.transport().calls,
            vec![("read_sheet".to_string(), Vec::new())]
        );
    }

    #[test]
    fn test_stderr_is_forwarded_in_order() {
        let output = RawOutput {
            stderr: "loading sheet\nloaded 1 cells\n".into(),
            ..RawOutput::ok("1 1\nA1 Int(1)")
        };
        let (mut client, log) = client(ScriptedTransport::new().reply_with(output));

        client.invoke("read_sheet", &[]).unwrap();

        assert_eq!(
            *log.borrow(),
            vec![
                entry(BACKEND, "loading sheet"),
                entry(BACKEND, "loaded 1 cells"),
            ]
        );
    }

    #[test]
    fn test_failed_exit_forwards_stderr_then_errors() {
        let output = RawOutput {
            success: false,
            code: Some(1),
            stdout: "0 0".into(),
            stderr: "bad cell location: 1A".into(),
        };
        let (mut client, log) = client(ScriptedTransport::new().reply_with(output));

        let err = client
            .invoke("write_cell", &["1A".to_string(), "x".to_string()])
            .unwrap_err();

        assert!(matches!(
            err,
            BridgeError::EngineExecutionFailed { code: Some(1), .. }
        ));
        let log = log.borrow();
        assert_eq!(log[0], entry(BACKEND, "bad cell location: 1A"));
        assert_eq!(log[1].0, FRONTEND);
        assert_eq!(log[1].1, "Engine failed on 'write_cell' (exit code 1)");
    }

    #[test]
    fn test_launch_failure_is_reported() {
        let (mut client, log) = client(ScriptedTransport::new().fail_launch());

        let err = client.invoke("read_sheet", &[]).unwrap_err();

        assert!(matches!(err, BridgeError::EngineUnavailable { .. }));
        assert_eq!(log.borrow().len(), 1);
        assert_eq!(log.borrow()[0].0, FRONTEND);
    }

    #[test]
    fn test_invalid_utf8_stdout_is_malformed() {
        let output = RawOutput {
            stderr: "reading sheet".into(),
            ..RawOutput::ok(b"1 1\nA1 Text(\"a\xffb\")\n".to_vec())
        };
        let (mut client, log) = client(ScriptedTransport::new().reply_with(output));

        let err = client.invoke("read_sheet", &[]).unwrap_err();

        match err {
            BridgeError::MalformedEngineResponse {
                subcommand,
                response,
            } => {
                assert_eq!(subcommand, "read_sheet");
                assert_eq!(response.line_number, 2);
                assert!(matches!(response.kind, MalformedKind::Encoding(_)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        let log = log.borrow();
        assert_eq!(log[0], entry(BACKEND, "reading sheet"));
        assert_eq!(log[1].0, FRONTEND);
        assert_eq!(log.len(), 2);
    }
}
