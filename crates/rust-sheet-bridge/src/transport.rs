//! Running engine subcommands.

use std::process::{Command, Stdio};

use crate::config::EngineConfig;
use crate::error::{BridgeError, Result};

/// Everything one engine run produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawOutput {
    /// Whether the process exited normally with status zero
    pub success: bool,
    /// Exit code, if the process exited rather than being killed
    pub code: Option<i32>,
    /// Raw stdout; decoded by the client, which rejects invalid UTF-8
    pub stdout: Vec<u8>,
    pub stderr: String,
}

impl RawOutput {
    /// A successful run with the given stdout and no diagnostics.
    pub fn ok(stdout: impl Into<Vec<u8>>) -> Self {
        Self {
            success: true,
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }
}

/// Runs one engine subcommand to completion.
///
/// [`ProcessTransport`] launches the real executable; tests swap in a scripted one so
/// response handling can be checked without a process.
pub trait Transport {
    fn execute(&mut self, subcommand: &str, args: &[String]) -> Result<RawOutput>;
}

/// Launches the engine executable once per subcommand and waits for it to exit.
#[derive(Debug, Clone)]
pub struct ProcessTransport {
    config: EngineConfig,
}

impl ProcessTransport {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl Transport for ProcessTransport {
    fn execute(&mut self, subcommand: &str, args: &[String]) -> Result<RawOutput> {
        let mut cmd = Command::new(&self.config.executable);
        cmd.args(&self.config.leading_args).arg(subcommand).args(args);

        if let Some(dir) = &self.config.working_dir {
            cmd.current_dir(dir);
        }
        for (key, value) in &self.config.env {
            cmd.env(key, value);
        }
        cmd.stdin(Stdio::null());

        tracing::trace!("Running engine: {:?}", cmd);
        let output = cmd
            .output()
            .map_err(|error| BridgeError::EngineUnavailable {
                executable: self.config.executable.display().to_string(),
                error,
            })?;

        Ok(RawOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: output.stdout,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
