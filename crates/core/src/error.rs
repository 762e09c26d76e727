//! Error types for ss3-core
//!
//! Every backend failure is reduced to one of these kinds so the session
//! can show a single message and keep running.

use thiserror::Error;

/// Result type alias for ss3-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for ss3-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// The bucket does not exist
    #[error("Bucket '{0}' does not exist. Please check the name.")]
    NoSuchBucket(String),

    /// The bucket name is malformed
    #[error("Invalid bucket name '{0}'. Please enter a valid bucket name.")]
    InvalidBucketName(String),

    /// Permission failure
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// Request rate exceeded
    #[error("Rate limit exceeded. Please wait a moment and try again. ({0})")]
    Throttled(String),

    /// Network error (retryable)
    #[error("Network error: {0}")]
    Network(String),

    /// Request timed out
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// No usable credentials
    #[error("Missing AWS credentials: {0}")]
    MissingCredentials(String),

    /// No region could be resolved
    #[error("No AWS region configured. Set AWS_REGION or add `region` under [aws] in the config file.")]
    MissingRegion,

    /// The object to download vanished
    #[error("The file does not exist in the bucket: {0}")]
    NoSuchKey(String),

    /// Only folders can be entered
    #[error("Not a folder: {0}")]
    NotAFolder(String),

    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Anything the backend reported that has no dedicated kind
    #[error("An unexpected error occurred: {0}")]
    Unknown(String),
}

impl Error {
    /// Get the appropriate exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) | Error::TomlParse(_) | Error::InvalidUrl(_) => 2, // UsageError
            Error::MissingRegion | Error::InvalidBucketName(_) => 2,           // UsageError
            Error::Network(_) | Error::Timeout(_) | Error::Throttled(_) => 3,  // NetworkError
            Error::AccessDenied(_) | Error::MissingCredentials(_) => 4,        // AuthError
            Error::NoSuchBucket(_) | Error::NoSuchKey(_) => 5,                 // NotFound
            _ => 1,                                                            // GeneralError
        }
    }

    /// Whether retrying the same call later may succeed
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::Throttled(_) | Error::Network(_) | Error::Timeout(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_exit_codes() {
        assert_eq!(Error::Config("test".into()).exit_code(), 2);
        assert_eq!(Error::MissingRegion.exit_code(), 2);
        assert_eq!(Error::Network("test".into()).exit_code(), 3);
        assert_eq!(Error::Timeout("test".into()).exit_code(), 3);
        assert_eq!(Error::AccessDenied("test".into()).exit_code(), 4);
        assert_eq!(Error::MissingCredentials("test".into()).exit_code(), 4);
        assert_eq!(Error::NoSuchBucket("test".into()).exit_code(), 5);
        assert_eq!(Error::NoSuchKey("test".into()).exit_code(), 5);
        assert_eq!(Error::Unknown("test".into()).exit_code(), 1);
    }

    #[test]
    fn test_error_display() {
        let err = Error::NoSuchBucket("photos".into());
        assert_eq!(
            err.to_string(),
            "Bucket 'photos' does not exist. Please check the name."
        );

        let err = Error::NotAFolder("a.txt".into());
        assert_eq!(err.to_string(), "Not a folder: a.txt");
    }

    #[test]
    fn test_retryable_kinds() {
        assert!(Error::Throttled("slow down".into()).is_retryable());
        assert!(Error::Network("reset".into()).is_retryable());
        assert!(!Error::AccessDenied("nope".into()).is_retryable());
        assert!(!Error::MissingRegion.is_retryable());
    }
}
