//! Download naming
//!
//! The object lands in the download directory under the name the user
//! typed, or under its own base name when the prompt is left blank. The
//! typed name is a plain file name: anything that would leave the
//! download directory is refused.

use std::path::{Component, MAIN_SEPARATOR, Path, PathBuf};

use ss3_core::item;

/// Local name used when the user keeps the default
pub fn default_download_name(key: &str) -> String {
    item::base_name(key).to_string()
}

pub const INVALID_NAME: &str =
    "Enter a file name without folders; the file is saved to the download directory.";

/// Where a download goes for the given prompt input.
///
/// `None` when the name is not a single path component (absolute paths,
/// `..`, nested folders).
pub fn resolve_destination(download_dir: &Path, input: &str, default_name: &str) -> Option<PathBuf> {
    let input = input.trim();
    let name = if input.is_empty() { default_name } else { input };

    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !name.ends_with(['/', MAIN_SEPARATOR]) => {
            Some(download_dir.join(name))
        }
        _ => None,
    }
}

/// Prompt shown before a download
pub fn rename_prompt(default_name: &str) -> String {
    format!("Enter a new name for the file or press Enter to keep '{default_name}': ")
}

/// "Downloaded 'a.txt' (1.5 KiB)"
pub fn success_message(destination: &Path, bytes: u64) -> String {
    format!(
        "Downloaded '{}' ({})",
        destination.display(),
        humansize::format_size(bytes, humansize::BINARY)
    )
}
