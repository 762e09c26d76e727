//! Listing entries
//!
//! An `Item` is one row of a folder view: either a virtual folder built
//! from a common prefix or a file built from an object key, named
//! relative to the folder being listed.

use jiff::Timestamp;

/// Separator the backend groups keys by
pub const SEPARATOR: char = '/';

/// Whether an entry is a folder or a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Folder,
    File,
}

impl ItemKind {
    /// Folders carry exactly one trailing separator, files none
    pub fn of(name: &str) -> Self {
        if name.ends_with(SEPARATOR) {
            ItemKind::Folder
        } else {
            ItemKind::File
        }
    }
}

/// One entry of a folder listing
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// Name relative to the listed prefix
    pub name: String,

    /// Folder or file, derived from `name`
    pub kind: ItemKind,

    /// Last modified timestamp (folders usually have none)
    pub last_modified: Option<Timestamp>,

    /// Size in bytes (files only)
    pub size_bytes: Option<i64>,
}

impl Item {
    /// Create a folder item ending in exactly one added separator.
    ///
    /// Only a single trailing separator is replaced: `"/"` is the folder of
    /// an empty key segment and stays `"/"`.
    pub fn folder(name: &str) -> Self {
        let base = name.strip_suffix(SEPARATOR).unwrap_or(name);
        let name = format!("{base}{SEPARATOR}");
        Self {
            name,
            kind: ItemKind::Folder,
            last_modified: None,
            size_bytes: None,
        }
    }

    /// Create a file item
    pub fn file(name: impl Into<String>, size_bytes: Option<i64>) -> Self {
        let name = name.into();
        Self {
            kind: ItemKind::of(&name),
            name,
            last_modified: None,
            size_bytes,
        }
    }

    /// Set the last modified timestamp
    pub fn modified_at(mut self, timestamp: Option<Timestamp>) -> Self {
        self.last_modified = timestamp;
        self
    }

    pub fn is_folder(&self) -> bool {
        self.kind == ItemKind::Folder
    }
}

/// The part of a key after its last separator
pub fn base_name(key: &str) -> &str {
    key.trim_end_matches(SEPARATOR)
        .rsplit(SEPARATOR)
        .next()
        .unwrap_or_default()
}

/// Order items newest first; entries without a timestamp go last.
///
/// The sort is stable, so ties keep the backend order.
pub fn sort_newest_first(items: &mut [Item]) {
    items.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));
}
