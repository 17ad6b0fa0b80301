//! CLI error handling

use std::fmt;

use pyndex_errors::UserFacingError;

/// CLI-specific error type
#[derive(Debug)]
pub enum CliError {
    /// Operations error
    Ops(pyndex_errors::Error),
    /// Invalid command arguments
    InvalidArguments(String),
    /// I/O error
    Io(std::io::Error),
}

impl CliError {
    /// Structured form printed on stdout in JSON mode
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            CliError::Ops(e) => serde_json::json!({
                "error": e.user_message(),
                "hint": e.user_hint(),
                "retryable": e.is_retryable(),
            }),
            other => serde_json::json!({
                "error": other.to_string(),
                "hint": serde_json::Value::Null,
                "retryable": false,
            }),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Ops(e) => {
                let message = e.user_message();
                write!(f, "{message}")?;
                if let Some(hint) = e.user_hint() {
                    write!(f, "\n  Hint: {hint}")?;
                }
                if e.is_retryable() {
                    write!(f, "\n  Retry: safe to retry this operation.")?;
                }
                Ok(())
            }
            CliError::InvalidArguments(msg) => write!(f, "Invalid arguments: {msg}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Ops(e) => Some(e),
            CliError::Io(e) => Some(e),
            CliError::InvalidArguments(_) => None,
        }
    }
}

impl From<pyndex_errors::Error> for CliError {
    fn from(e: pyndex_errors::Error) -> Self {
        CliError::Ops(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pyndex_errors::{Error, IndexError};

    #[test]
    fn json_payload_carries_message_and_hint() {
        let err: CliError = Error::from(IndexError::DistributionNotFound {
            requirement: "demo==1.0".to_string(),
        })
        .into();

        let payload = err.to_json();
        assert!(payload["error"].as_str().unwrap().contains("demo==1.0"));
        assert!(payload["hint"].as_str().unwrap().contains("package name"));
        assert_eq!(payload["retryable"], false);
    }

    #[test]
    fn json_payload_for_argument_errors_has_no_hint() {
        let err = CliError::InvalidArguments("bad flag".to_string());
        let payload = err.to_json();
        assert!(payload["error"].as_str().unwrap().contains("bad flag"));
        assert!(payload["hint"].is_null());
    }
}
