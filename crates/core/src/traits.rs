//! Storage collaborator traits
//!
//! The navigator talks to the bucket only through `ObjectStore`, so the
//! browsing logic never depends on a specific S3 SDK.

use std::path::Path;

use async_trait::async_trait;
use jiff::Timestamp;

use crate::backend::BackendConfig;
use crate::error::Result;
use crate::item::SEPARATOR;

/// Metadata for one object returned by a listing
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectInfo {
    /// Full object key
    pub key: String,

    /// Size in bytes
    pub size_bytes: Option<i64>,

    /// Last modified timestamp
    pub last_modified: Option<Timestamp>,

    /// ETag (usually MD5 for single-part uploads)
    pub etag: Option<String>,
}

impl ObjectInfo {
    /// Create a new ObjectInfo with a key and size
    pub fn new(key: impl Into<String>, size: i64) -> Self {
        Self {
            key: key.into(),
            size_bytes: Some(size),
            last_modified: None,
            etag: None,
        }
    }

    /// Set the last modified timestamp
    pub fn modified_at(mut self, timestamp: Timestamp) -> Self {
        self.last_modified = Some(timestamp);
        self
    }
}

/// Result of a prefix + delimiter listing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Listing {
    /// Common prefixes (one level below the queried prefix)
    pub common_prefixes: Vec<String>,

    /// Objects directly matching the prefix
    pub objects: Vec<ObjectInfo>,
}

/// Options for list operations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Prefix to filter by
    pub prefix: String,

    /// Delimiter for grouping (usually "/"); `None` lists recursively
    pub delimiter: Option<String>,

    /// Request a single page of at most this many keys
    pub max_keys: Option<i32>,
}

impl ListOptions {
    /// One level below `prefix`, grouped by the separator
    pub fn delimited(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            delimiter: Some(SEPARATOR.to_string()),
            max_keys: None,
        }
    }

    /// Every object under `prefix`
    pub fn recursive(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            delimiter: None,
            max_keys: None,
        }
    }

    /// Smallest possible request, used to check that a bucket is reachable
    pub fn probe() -> Self {
        Self {
            prefix: String::new(),
            delimiter: None,
            max_keys: Some(1),
        }
    }
}

/// Trait for the bucket storage backend
///
/// Implemented by the S3 adapter and mocked in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List objects in a bucket.
    ///
    /// Without `max_keys` the whole listing is returned, following
    /// continuation tokens as needed.
    async fn list_objects(&self, bucket: &str, options: ListOptions) -> Result<Listing>;

    /// Stream an object to a local file, returning the bytes written
    async fn get_object(&self, bucket: &str, key: &str, destination: &Path) -> Result<u64>;

    /// The region this client talks to
    fn region(&self) -> Option<String>;
}

/// Builds a store from an explicit backend configuration.
///
/// Region or profile changes build a fresh store instead of mutating
/// the active one.
#[async_trait]
pub trait StoreFactory: Send + Sync {
    async fn connect(&self, config: &BackendConfig) -> Result<Box<dyn ObjectStore>>;
}
