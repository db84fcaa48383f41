//! Dataset loading error types.

use std::path::PathBuf;

/// Errors that can occur when loading the route dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// Reading the dataset file failed
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote source returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Dataset document is not valid JSON of the expected shape
    #[error("JSON parse error: {message}")]
    Json { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let err = DatasetError::Api {
            status: 503,
            message: "unavailable".into(),
        };
        assert_eq!(err.to_string(), "API error 503: unavailable");

        let err = DatasetError::Io {
            path: PathBuf::from("routes.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.to_string(), "failed to read routes.json: missing");
    }
}
