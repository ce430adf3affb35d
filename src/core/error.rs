use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PeekError {
    #[error("Cannot parse config: {0}")]
    ConfigError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Empty file: {0}")]
    EmptyFile(String),
    #[error("Malformed query: {0}")]
    MalformedQuery(String),
    #[error("IO error: {0}")]
    IoFailure(String),
    #[error("Unknown label: {0}")]
    LabelUnknown(String),
}

impl From<std::io::Error> for PeekError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => {
                PeekError::NotFound(err.to_string())
            }
            _ => PeekError::IoFailure(err.to_string()),
        }
    }
}
