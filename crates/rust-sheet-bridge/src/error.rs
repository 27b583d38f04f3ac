//! Error types for the engine bridge.
//!
//! Each message includes its cause; no variant has a `source()`.

use rust_sheet_protocol::MalformedResponse;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("Engine unavailable: could not run '{executable}': {error}")]
    EngineUnavailable {
        executable: String,
        error: std::io::Error,
    },

    #[error("Engine failed on '{subcommand}' ({})", describe_exit(.code))]
    EngineExecutionFailed {
        subcommand: String,
        code: Option<i32>,
    },

    #[error("Malformed engine response to '{subcommand}': {response}")]
    MalformedEngineResponse {
        subcommand: String,
        response: MalformedResponse,
    },

    #[error(transparent)]
    MalformedLocation(rust_sheet_core::Error),
}

pub type Result<T> = std::result::Result<T, BridgeError>;

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}
