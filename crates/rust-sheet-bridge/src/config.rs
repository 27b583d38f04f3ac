//! Engine process configuration.

use std::path::PathBuf;

/// How to launch the engine executable.
///
/// Each operation runs `<executable> [leading_args...] <subcommand> [args...]`.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Path to the engine executable. Defaults to `rsheet-engine` on PATH.
    pub executable: PathBuf,

    /// Arguments placed before the subcommand, e.g. a script for an interpreter.
    pub leading_args: Vec<String>,

    /// Directory the engine runs in. The engine keeps its sheet file relative to it.
    /// If None, the current directory is inherited.
    pub working_dir: Option<PathBuf>,

    /// Extra environment variables for the engine process.
    pub env: Vec<(String, String)>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            executable: PathBuf::from("rsheet-engine"),
            leading_args: Vec::new(),
            working_dir: None,
            env: Vec::new(),
        }
    }
}

impl EngineConfig {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            ..Default::default()
        }
    }

    pub fn with_leading_arg(mut self, arg: impl Into<String>) -> Self {
        self.leading_args.push(arg.into());
        self
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = EngineConfig::default();
        assert_eq!(config.executable, PathBuf::from("rsheet-engine"));
        assert!(config.leading_args.is_empty());
        assert!(config.working_dir.is_none());
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::new("sh")
            .with_leading_arg("engine.sh")
            .with_working_dir("/tmp/sheet")
            .with_env("LANG", "C");
        assert_eq!(config.executable, PathBuf::from("sh"));
        assert_eq!(config.leading_args, vec!["engine.sh"]);
        assert_eq!(config.working_dir, Some(PathBuf::from("/tmp/sheet")));
        assert_eq!(config.env, vec![("LANG".to_string(), "C".to_string())]);
    }
}
