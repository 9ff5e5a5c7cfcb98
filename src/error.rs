use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingCredential,
    RequestFailed,
}

#[derive(Debug, Error)]
pub enum SolveError {
    #[error("OpenAI API key not found")]
    MissingCredential,
    #[error("Error: {0}")]
    RequestFailed(String),
}

impl SolveError {
    pub fn request_failed(msg: impl Into<String>) -> Self {
        SolveError::RequestFailed(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SolveError::MissingCredential => ErrorKind::MissingCredential,
            SolveError::RequestFailed(_) => ErrorKind::RequestFailed,
        }
    }

    /// The underlying failure text, without the display prefix.
    pub fn message(&self) -> &str {
        match self {
            SolveError::MissingCredential => "OpenAI API key not found",
            SolveError::RequestFailed(msg) => msg,
        }
    }
}

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Unsupported image format: {0} (expected png, jpg or jpeg)")]
    UnsupportedFormat(String),
    #[error("Failed to decode image: {0}")]
    Decode(String),
    #[error("Failed to encode image: {0}")]
    Encode(String),
    #[error("Failed to read image: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ImageError> for SolveError {
    fn from(e: ImageError) -> Self {
        SolveError::RequestFailed(e.to_string())
    }
}

impl From<reqwest::Error> for SolveError {
    fn from(e: reqwest::Error) -> Self {
        SolveError::RequestFailed(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SolveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_failed_keeps_message() {
        let err = SolveError::request_failed("HTTP 500 Internal Server Error: boom");
        assert_eq!(err.kind(), ErrorKind::RequestFailed);
        assert_eq!(err.message(), "HTTP 500 Internal Server Error: boom");
        assert_eq!(err.to_string(), "Error: HTTP 500 Internal Server Error: boom");
    }

    #[test]
    fn test_missing_credential_display() {
        let err = SolveError::MissingCredential;
        assert_eq!(err.kind(), ErrorKind::MissingCredential);
        assert_eq!(err.to_string(), "OpenAI API key not found");
    }

    #[test]
    fn test_image_error_collapses_to_request_failed() {
        let err: SolveError = ImageError::Encode("bad buffer".into()).into();
        assert_eq!(err.kind(), ErrorKind::RequestFailed);
        assert!(err.message().contains("bad buffer"));
    }
}
