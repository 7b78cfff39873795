//! Failures of the `huevault` binary and the exit status each one maps to.
//!
//! clap exits with status 2 on its own before `run` starts. Everything
//! after that lands in [`CliError`]:
//!
//! | status | cause |
//! |--------|-------|
//! | 10 | a color, deficiency kind, scheme or engine parameter was rejected |
//! | 12 | `--params` is not valid JSON |
//! | 13 | the result could not be written as JSON |

use huevault_core::HueError;
use std::fmt;

pub enum CliError {
    /// Rejected by `huevault-core` (malformed hex, unknown kind or scheme,
    /// out-of-range tuning value).
    Engine(HueError),
    /// Malformed flag content the core never sees.
    Input(String),
    /// JSON output failed to encode.
    Serialization(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Engine(_) => 10,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Engine(e) => write!(f, "{e}"),
            CliError::Input(msg) => f.write_str(msg),
            CliError::Serialization(msg) => write!(f, "cannot encode output: {msg}"),
        }
    }
}

impl From<HueError> for CliError {
    fn from(e: HueError) -> Self {
        CliError::Engine(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_error_exit_code_is_10() {
        let err = CliError::Engine(HueError::InvalidColor("#12".into()));
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn input_error_exit_code_is_12() {
        let err = CliError::Input("bad params".into());
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn serialization_error_exit_code_is_13() {
        let err = CliError::Serialization("json fail".into());
        assert_eq!(err.exit_code(), 13);
    }

    #[test]
    fn from_hue_error_keeps_message() {
        let cli_err = CliError::from(HueError::UnknownDeficiency("sepia".into()));
        assert_eq!(cli_err.exit_code(), 10);
        assert!(cli_err.to_string().contains("sepia"));
    }

    #[test]
    fn unknown_scheme_is_an_engine_error() {
        let err: CliError = HueError::UnknownScheme("pastel".into()).into();
        assert_eq!(err.exit_code(), 10);
        assert_eq!(err.to_string(), "unknown scheme: pastel");
    }

    #[test]
    fn serialization_message_names_the_failure() {
        let err = CliError::Serialization("key must be a string".into());
        assert_eq!(err.to_string(), "cannot encode output: key must be a string");
    }

    #[test]
    fn from_serde_json_error_routes_to_serialization() {
        let bad_json = serde_json::from_str::<serde_json::Value>("{invalid");
        let cli_err = CliError::from(bad_json.unwrap_err());
        assert_eq!(cli_err.exit_code(), 13);
    }
}
