//! Mapping of AWS SDK failures onto the ss3-core error kinds

use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use ss3_core::Error;

/// What the failed request was about, for error messages
#[derive(Debug, Clone, Copy)]
pub(crate) struct Target<'a> {
    pub bucket: &'a str,
    pub key: Option<&'a str>,
}

impl<'a> Target<'a> {
    pub fn bucket(bucket: &'a str) -> Self {
        Self { bucket, key: None }
    }

    pub fn object(bucket: &'a str, key: &'a str) -> Self {
        Self {
            bucket,
            key: Some(key),
        }
    }
}

/// Classify an SDK error by service error code or failure kind
pub(crate) fn classify<E, R>(err: &SdkError<E, R>, target: Target<'_>) -> Error
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let detail = DisplayErrorContext(err).to_string();
    match err {
        SdkError::ServiceError(service) => {
            let service_err = service.err();
            let code = service_err.code().unwrap_or("Unknown");
            let message = service_err.message().unwrap_or_default();
            classify_code(code, message, target)
        }
        SdkError::TimeoutError(_) => Error::Timeout("the request did not complete in time".into()),
        SdkError::DispatchFailure(failure) if failure.is_timeout() => Error::Timeout(detail),
        SdkError::DispatchFailure(_) | SdkError::ConstructionFailure(_)
            if mentions_credentials(&detail) =>
        {
            Error::MissingCredentials(detail)
        }
        SdkError::DispatchFailure(_) | SdkError::ResponseError(_) => {
            Error::Network(format!("Unable to reach S3. Check your connection. ({detail})"))
        }
        _ => Error::Unknown(detail),
    }
}

/// Map an S3 error code onto an error kind
pub(crate) fn classify_code(code: &str, message: &str, target: Target<'_>) -> Error {
    let bucket = target.bucket.to_string();
    match code {
        "NoSuchBucket" => Error::NoSuchBucket(bucket),
        "InvalidBucketName" => Error::InvalidBucketName(bucket),
        "NoSuchKey" | "NotFound" => match target.key {
            Some(key) => Error::NoSuchKey(key.to_string()),
            None => Error::NoSuchBucket(bucket),
        },
        "AccessDenied" | "AllAccessDisabled" | "InvalidAccessKeyId" | "SignatureDoesNotMatch"
        | "Forbidden" => Error::AccessDenied(match target.key {
            Some(key) => format!("{bucket}/{key}"),
            None => format!("bucket '{bucket}'. Check your permissions"),
        }),
        "ExpiredToken" | "InvalidToken" | "TokenRefreshRequired" => {
            Error::MissingCredentials(format!("{code}: {message}"))
        }
        "Throttling" | "ThrottlingException" | "SlowDown" | "RequestLimitExceeded"
        | "TooManyRequests" => Error::Throttled(code.to_string()),
        "RequestTimeout" | "RequestTimeTooSkewed" => Error::Timeout(format!("{code}: {message}")),
        "PermanentRedirect" | "AuthorizationHeaderMalformed" | "IllegalLocationConstraintException" => {
            Error::Unknown(format!(
                "bucket '{bucket}' is in a different region than the one selected ({code})"
            ))
        }
        _ if message.is_empty() => Error::Unknown(code.to_string()),
        _ => Error::Unknown(format!("{code}: {message}")),
    }
}

fn mentions_credentials(detail: &str) -> bool {
    let lower = detail.to_lowercase();
    lower.contains("credential") || lower.contains("no identity") || lower.contains("identity resolver")
}
