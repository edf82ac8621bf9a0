use thiserror::Error;

/// Result type alias for banter-core
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for the Banter chat client
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error for file operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Chat service errors (transport, status, decoding)
    #[error("backend error: {0}")]
    Backend(String),

    /// Parse/serialization errors
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let io_err: Error = Error::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"));
        assert_eq!(io_err.to_string(), "I/O error: file not found");

        let config_err = Error::Config("missing base_url".to_string());
        assert_eq!(config_err.to_string(), "configuration error: missing base_url");

        let backend_err = Error::Backend("connection refused".to_string());
        assert_eq!(backend_err.to_string(), "backend error: connection refused");

        let parse_err = Error::Parse("invalid JSON".to_string());
        assert_eq!(parse_err.to_string(), "parse error: invalid JSON");
    }

    #[test]
    fn test_error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error: Error = io_err.into();
        assert_eq!(error.to_string(), "I/O error: denied");
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let error: Error = json_err.into();
        assert!(error.to_string().starts_with("parse error:"));
    }

    #[test]
    fn test_result_type_alias() {
        let ok: Result<i32> = Ok(42);
        assert!(ok.is_ok());

        let err: Result<i32> = Err(Error::Backend("error".to_string()));
        assert!(err.is_err());
    }
}
