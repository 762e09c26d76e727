//! Virtual folder navigation
//!
//! Turns a flat key space into a folder view: each listing asks the
//! backend for one level below the current prefix, and a stack of
//! cumulative prefixes makes every step into a folder reversible.

use std::path::Path;

use crate::error::{Error, Result};
use crate::item::{self, Item, SEPARATOR};
use crate::traits::{ListOptions, Listing, ObjectStore};

/// Stack of cumulative prefixes; the root sentinel `""` is never popped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathStack {
    prefixes: Vec<String>,
}

impl PathStack {
    pub fn new() -> Self {
        Self {
            prefixes: vec![String::new()],
        }
    }

    /// Enter `name` below the current prefix
    pub fn push(&mut self, name: &str) {
        let next = format!("{}{name}", self.current());
        self.prefixes.push(next);
    }

    /// Leave the current prefix. Returns false at root.
    pub fn pop(&mut self) -> bool {
        if self.is_root() {
            return false;
        }
        self.prefixes.pop();
        true
    }

    pub fn current(&self) -> &str {
        self.prefixes.last().map(String::as_str).unwrap_or_default()
    }

    pub fn is_root(&self) -> bool {
        self.prefixes.len() == 1
    }

    pub fn reset(&mut self) {
        self.prefixes.truncate(1);
    }
}

impl Default for PathStack {
    fn default() -> Self {
        Self::new()
    }
}

/// Owns the bucket identity and path history, and builds item lists
pub struct Navigator {
    store: Box<dyn ObjectStore>,
    bucket: Option<String>,
    path: PathStack,
    folder_timestamps: bool,
}

impl Navigator {
    /// Create a navigator with no bucket selected
    pub fn new(store: Box<dyn ObjectStore>) -> Self {
        Self {
            store,
            bucket: None,
            path: PathStack::new(),
            folder_timestamps: false,
        }
    }

    /// Fill in folder timestamps with the newest object below each folder.
    ///
    /// Costs one extra recursive listing per folder.
    pub fn with_folder_timestamps(mut self, enabled: bool) -> Self {
        self.folder_timestamps = enabled;
        self
    }

    /// Swap the backend after a region or profile change
    pub fn replace_store(&mut self, store: Box<dyn ObjectStore>) {
        self.store = store;
    }

    pub fn store(&self) -> &dyn ObjectStore {
        self.store.as_ref()
    }

    pub fn bucket(&self) -> Option<&str> {
        self.bucket.as_deref()
    }

    /// Target another bucket and start over at its root
    pub fn change_bucket(&mut self, name: impl Into<String>) {
        self.bucket = Some(name.into());
        self.path.reset();
    }

    /// Drop the folder history, keeping the bucket
    pub fn reset_path(&mut self) {
        self.path.reset();
    }

    pub fn current_path(&self) -> &str {
        self.path.current()
    }

    pub fn is_at_root(&self) -> bool {
        self.path.is_root()
    }

    /// Enter a folder item of the current listing
    pub fn enter_folder(&mut self, name: &str) -> Result<()> {
        if !name.ends_with(SEPARATOR) {
            return Err(Error::NotAFolder(name.to_string()));
        }
        self.path.push(name);
        tracing::debug!(path = %self.path.current(), "Entered folder");
        Ok(())
    }

    /// Go up one folder. Returns false (and does nothing) at root.
    pub fn go_back(&mut self) -> bool {
        self.path.pop()
    }

    /// Check that `bucket` is reachable before browsing it
    pub async fn probe(&self, bucket: &str) -> Result<()> {
        validate_bucket_name(bucket)?;
        tracing::debug!(bucket, "Probing bucket");
        self.store
            .list_objects(bucket, ListOptions::probe())
            .await
            .map(|_| ())
    }

    /// List the current folder of the current bucket
    pub async fn list_items(&self) -> Result<Vec<Item>> {
        let bucket = self
            .bucket
            .as_deref()
            .ok_or_else(|| Error::InvalidBucketName(String::new()))?;
        self.list_items_at(bucket, self.path.current()).await
    }

    /// List one level below `prefix`, newest first
    pub async fn list_items_at(&self, bucket: &str, prefix: &str) -> Result<Vec<Item>> {
        let listing = self
            .store
            .list_objects(bucket, ListOptions::delimited(prefix))
            .await?;
        tracing::debug!(
            bucket,
            prefix,
            folders = listing.common_prefixes.len(),
            objects = listing.objects.len(),
            "Listed folder"
        );

        let mut items = build_items(prefix, &listing);
        if self.folder_timestamps {
            self.fill_folder_timestamps(bucket, prefix, &mut items).await;
        }
        item::sort_newest_first(&mut items);
        Ok(items)
    }

    /// Download `key` from the current bucket into `destination`
    pub async fn download(&self, key: &str, destination: &Path) -> Result<u64> {
        let bucket = self
            .bucket
            .as_deref()
            .ok_or_else(|| Error::InvalidBucketName(String::new()))?;
        tracing::debug!(bucket, key, destination = %destination.display(), "Downloading");
        self.store.get_object(bucket, key, destination).await
    }

    async fn fill_folder_timestamps(&self, bucket: &str, prefix: &str, items: &mut [Item]) {
        for item in items.iter_mut().filter(|i| i.is_folder()) {
            let folder = format!("{prefix}{}", item.name);
            match self
                .store
                .list_objects(bucket, ListOptions::recursive(folder.as_str()))
                .await
            {
                Ok(listing) => {
                    item.last_modified = listing.objects.iter().filter_map(|o| o.last_modified).max();
                }
                Err(e) => {
                    tracing::warn!(folder = %folder, error = %e, "Could not fetch folder timestamp");
                }
            }
        }
    }
}

/// Translate a raw listing of `prefix` into items named relative to it.
///
/// Keys that still contain a separator after stripping live deeper than
/// one level and are dropped, as is the folder's own placeholder object.
pub fn build_items(prefix: &str, listing: &Listing) -> Vec<Item> {
    let folders = listing.common_prefixes.iter().filter_map(|common| {
        let name = common.strip_prefix(prefix).unwrap_or(common);
        (!name.is_empty()).then(|| Item::folder(name))
    });

    let files = listing.objects.iter().filter_map(|object| {
        let name = object.key.strip_prefix(prefix).unwrap_or(&object.key);
        if name.is_empty() || (name.contains(SEPARATOR) && name != prefix) {
            return None;
        }
        Some(Item::file(name, object.size_bytes).modified_at(object.last_modified))
    });

    folders.chain(files).collect()
}

/// Reject names no bucket can have before asking the backend
pub fn validate_bucket_name(name: &str) -> Result<()> {
    let valid_chars = name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'));
    if (3..=255).contains(&name.len()) && valid_chars {
        Ok(())
    } else {
        Err(Error::InvalidBucketName(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{MockObjectStore, ObjectInfo};
    use jiff::Timestamp;
    use mockall::predicate::eq;

    fn ts(secs: i64) -> Timestamp {
        Timestamp::from_second(secs).unwrap()
    }

    fn listing(prefixes: &[&str], objects: &[(&str, i64)]) -> Listing {
        Listing {
            common_prefixes: prefixes.iter().map(|p| p.to_string()).collect(),
            objects: objects
                .iter()
                .map(|(k, secs)| ObjectInfo::new(*k, 10).modified_at(ts(*secs)))
                .collect(),
        }
    }

    fn navigator_with(store: MockObjectStore) -> Navigator {
        let mut nav = Navigator::new(Box::new(store));
        nav.change_bucket("test-bucket");
        nav
    }

    #[test]
    fn test_path_stack_root_is_permanent() {
        let mut stack = PathStack::new();
        assert!(stack.is_root());
        assert!(!stack.pop());
        assert_eq!(stack.current(), "");

        stack.push("a/");
        stack.push("b/");
        assert_eq!(stack.current(), "a/b/");
        assert!(stack.pop());
        assert_eq!(stack.current(), "a/");

        stack.reset();
        assert!(stack.is_root());
    }

    #[test]
    fn test_build_items_keeps_empty_segment_folder() {
        let raw = listing(&["data//"], &[]);
        let items = build_items("data/", &raw);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "/");
        assert!(items[0].is_folder());

        let mut stack = PathStack::new();
        stack.push("data/");
        stack.push(&items[0].name);
        assert_eq!(stack.current(), "data//");
    }

    #[test]
    fn test_build_items_strips_prefix() {
        for prefix in ["", "data/", "data/2024/"] {
            let raw = Listing {
                common_prefixes: vec![format!("{prefix}a/"), format!("{prefix}b/")],
                objects: vec![ObjectInfo::new(format!("{prefix}f.txt"), 3)],
            };
            let items = build_items(prefix, &raw);

            let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();
            assert_eq!(names, ["a/", "b/", "f.txt"]);
            assert!(items[0].is_folder() && items[1].is_folder());
            assert!(!items[2].is_folder());
            assert!(
                items
                    .iter()
                    .all(|i| !i.name.trim_end_matches(SEPARATOR).contains(SEPARATOR))
            );
        }
    }

    #[test]
    fn test_build_items_drops_deeper_keys_and_placeholder() {
        let raw = Listing {
            common_prefixes: vec![],
            objects: vec![
                ObjectInfo::new("docs/", 0),
                ObjectInfo::new("docs/a.txt", 1),
                ObjectInfo::new("docs/deep/b.txt", 1),
            ],
        };
        let items = build_items("docs/", &raw);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "a.txt");
    }

    #[tokio::test]
    async fn test_list_items_sorted_newest_first() {
        let mut store = MockObjectStore::new();
        store
            .expect_list_objects()
            .with(eq("test-bucket"), eq(ListOptions::delimited("")))
            .returning(|_, _| {
                Ok(listing(
                    &["docs/", "img/"],
                    &[("old.txt", 100), ("new.txt", 300)],
                ))
            });

        let nav = navigator_with(store);
        let items = nav.list_items().await.unwrap();
        let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["new.txt", "old.txt", "docs/", "img/"]);
    }

    #[tokio::test]
    async fn test_list_items_empty_bucket_is_success() {
        let mut store = MockObjectStore::new();
        store
            .expect_list_objects()
            .returning(|_, _| Ok(Listing::default()));

        let nav = navigator_with(store);
        assert!(nav.list_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_items_surfaces_backend_error() {
        let mut store = MockObjectStore::new();
        store
            .expect_list_objects()
            .returning(|bucket, _| Err(Error::NoSuchBucket(bucket.to_string())));

        let nav = navigator_with(store);
        let err = nav.list_items().await.unwrap_err();
        assert!(matches!(err, Error::NoSuchBucket(b) if b == "test-bucket"));
    }

    #[tokio::test]
    async fn test_folder_timestamps_use_newest_child() {
        let mut store = MockObjectStore::new();
        store
            .expect_list_objects()
            .with(eq("test-bucket"), eq(ListOptions::delimited("")))
            .returning(|_, _| Ok(listing(&["logs/", "broken/"], &[("a.txt", 200)])));
        store
            .expect_list_objects()
            .with(eq("test-bucket"), eq(ListOptions::recursive("logs/")))
            .returning(|_, _| Ok(listing(&[], &[("logs/1", 100), ("logs/x/2", 500)])));
        store
            .expect_list_objects()
            .with(eq("test-bucket"), eq(ListOptions::recursive("broken/")))
            .returning(|_, _| Err(Error::AccessDenied("broken/".into())));

        let nav = navigator_with(store).with_folder_timestamps(true);
        let items = nav.list_items().await.unwrap();

        let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["logs/", "a.txt", "broken/"]);
        assert_eq!(items[0].last_modified, Some(ts(500)));
        assert_eq!(items[2].last_modified, None);
    }

    #[test]
    fn test_enter_folder_then_back_restores_path() {
        let mut nav = navigator_with(MockObjectStore::new());
        nav.enter_folder("docs/").unwrap();
        nav.enter_folder("2024/").unwrap();
        assert_eq!(nav.current_path(), "docs/2024/");

        assert!(nav.go_back());
        assert_eq!(nav.current_path(), "docs/");
        assert!(nav.go_back());
        assert!(nav.is_at_root());

        assert!(!nav.go_back());
        assert!(nav.is_at_root());
        assert_eq!(nav.current_path(), "");
    }

    #[test]
    fn test_enter_folder_rejects_files() {
        let mut nav = navigator_with(MockObjectStore::new());
        let err = nav.enter_folder("a.txt").unwrap_err();
        assert!(matches!(err, Error::NotAFolder(_)));
        assert!(nav.is_at_root());
    }

    #[test]
    fn test_change_bucket_resets_history() {
        let mut nav = navigator_with(MockObjectStore::new());
        nav.enter_folder("docs/").unwrap();
        nav.change_bucket("other-bucket");
        assert_eq!(nav.bucket(), Some("other-bucket"));
        assert!(nav.is_at_root());
    }

    #[tokio::test]
    async fn test_probe_validates_name_before_calling_backend() {
        let nav = Navigator::new(Box::new(MockObjectStore::new()));
        let err = nav.probe("a/b").await.unwrap_err();
        assert!(matches!(err, Error::InvalidBucketName(_)));
    }

    #[tokio::test]
    async fn test_probe_uses_single_key_listing() {
        let mut store = MockObjectStore::new();
        store
            .expect_list_objects()
            .with(eq("my-bucket"), eq(ListOptions::probe()))
            .times(1)
            .returning(|_, _| Ok(Listing::default()));

        let nav = Navigator::new(Box::new(store));
        nav.probe("my-bucket").await.unwrap();
    }

    #[test]
    fn test_validate_bucket_name() {
        assert!(validate_bucket_name("my-bucket.logs").is_ok());
        assert!(validate_bucket_name("ab").is_err());
        assert!(validate_bucket_name("").is_err());
        assert!(validate_bucket_name("has space").is_err());
        assert!(validate_bucket_name("colon:region").is_err());
    }
}
