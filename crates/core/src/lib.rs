//! ss3-core: Core library for the ss3 bucket browser
//!
//! This crate provides the SDK-independent parts of ss3:
//! - Item model and virtual folder navigation
//! - Pagination
//! - Configuration and backend settings
//! - ObjectStore trait for storage operations
//!
//! Nothing here depends on the AWS SDK, so the navigation logic can be
//! tested against mocks.

pub mod backend;
pub mod config;
pub mod error;
pub mod item;
pub mod navigator;
pub mod pager;
pub mod traits;

pub use backend::{BackendConfig, KNOWN_REGIONS, StaticCredentials};
pub use config::{Config, ConfigManager};
pub use error::{Error, Result};
pub use item::{Item, ItemKind, SEPARATOR};
pub use navigator::{Navigator, PathStack};
pub use pager::{PageView, Pager};
pub use traits::{ListOptions, Listing, ObjectInfo, ObjectStore, StoreFactory};
