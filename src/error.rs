use thiserror::Error;

#[derive(Error, Debug)]
pub enum LogPuzzleError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read log file: {path}")]
    LogRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create destination directory: {path}")]
    DirectoryCreate {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Request failed for {url}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Server returned HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Invalid host URL: {host}")]
    InvalidHost { host: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for LogPuzzleError {
    fn user_message(&self) -> String {
        match self {
            LogPuzzleError::LogRead { path, source } => {
                format!("Cannot read log file {}: {}", path, source)
            }
            LogPuzzleError::DirectoryCreate { path, source } => {
                format!("Cannot create directory {}: {}", path, source)
            }
            LogPuzzleError::Write { path, source } => {
                format!("Cannot write {}: {}", path, source)
            }
            LogPuzzleError::Network { url, source } => {
                format!("Network error while fetching {}: {}", url, source)
            }
            LogPuzzleError::HttpStatus { url, status } => {
                format!("Server answered {} for {}", status, url)
            }
            LogPuzzleError::InvalidHost { host } => {
                format!("Invalid host URL: {}", host)
            }
            LogPuzzleError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            LogPuzzleError::LogRead { .. } => Some(
                "Check that the log file path is correct and readable.".to_string()
            ),
            LogPuzzleError::DirectoryCreate { .. } => Some(
                "Only the last path component is created. Make sure the parent directory exists and is writable.".to_string()
            ),
            LogPuzzleError::Write { .. } => Some(
                "Ensure the destination directory is writable and the disk is not full.".to_string()
            ),
            LogPuzzleError::Network { .. } => Some(
                "Check your internet connection or point --host at a reachable server.".to_string()
            ),
            LogPuzzleError::HttpStatus { .. } => Some(
                "Drop --require-success to save error responses as-is.".to_string()
            ),
            LogPuzzleError::InvalidHost { .. } => Some(
                "Use a full http(s) URL without a trailing slash, e.g. https://code.google.com".to_string()
            ),
            LogPuzzleError::Config { .. } => Some(
                "Check your configuration file syntax and ensure all fields hold valid values.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for LogPuzzleError {
    fn from(error: toml::de::Error) -> Self {
        LogPuzzleError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LogPuzzleError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_user_friendly_messages() {
        let error = LogPuzzleError::LogRead {
            path: "missing.log".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file"),
        };
        assert!(error.user_message().contains("missing.log"));
        assert!(error.user_message().contains("No such file"));
        assert!(error.suggestion().is_some());
    }

    #[test]
    fn test_http_status_message() {
        let error = LogPuzzleError::HttpStatus {
            url: "https://code.google.com/puzzle/a.jpg".to_string(),
            status: 404,
        };
        assert_eq!(
            error.to_string(),
            "Server returned HTTP 404 for https://code.google.com/puzzle/a.jpg"
        );
        assert!(error.user_message().contains("404"));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_error = toml::from_str::<toml::Value>("not = [valid").unwrap_err();
        let error = LogPuzzleError::from(toml_error);
        assert!(matches!(error, LogPuzzleError::Config { .. }));
    }

    #[test]
    fn test_io_error_has_no_suggestion() {
        let error = LogPuzzleError::from(io::Error::new(io::ErrorKind::Other, "boom"));
        assert!(error.suggestion().is_none());
        assert!(error.user_message().contains("boom"));
    }
}
