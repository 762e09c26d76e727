//! Text for the folder listing screen

use jiff::Timestamp;
use ss3_core::Item;

/// Bottom bar listing the browsing keys
pub const OPTIONS_BAR: &str = "[H]: Help | [0-9]: Select item | [N]: New Bucket | [B]: Back | [P]: Prev Page | [F]: Next Page | [Q]: Quit";

pub const HELP_TEXT: &str = "\
  [0-9] to select item (folders are entered, files are downloaded)
  [Q] to quit
  [N] to change bucket
  [B] to go back
  [P] to prev page
  [F] to next page";

pub const EMPTY_FOLDER: &str = "No items to display in this folder.";

/// "Current Bucket: photos /2024/ (Page 1 of 3)"
pub fn page_header(bucket: &str, path: &str, page: usize, page_count: usize) -> String {
    format!(
        "Current Bucket: {bucket} /{path} (Page {} of {page_count})",
        page + 1
    )
}

/// Which paging keys apply on this page
pub fn page_hint(page: usize, page_count: usize) -> Option<&'static str> {
    if page_count <= 1 {
        None
    } else if page == 0 {
        Some("(Press 'F' for next page.)")
    } else if page + 1 == page_count {
        Some("(Press 'P' for previous page.)")
    } else {
        Some("(Press 'P' for previous page. Press 'F' for next page.)")
    }
}

/// Cells of one listing row: index, name, size, last modified
pub fn item_row(index: usize, item: &Item) -> [String; 4] {
    let icon = if item.is_folder() { "📁" } else { "📄" };
    let size = item
        .size_bytes
        .map(|s| humansize::format_size(s.max(0) as u64, humansize::BINARY))
        .unwrap_or_default();
    [
        format!("[{index}]"),
        format!("{icon} {}", item.name),
        size,
        format_timestamp(item.last_modified),
    ]
}

pub fn format_timestamp(timestamp: Option<Timestamp>) -> String {
    timestamp
        .map(|t| t.strftime("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_header_is_one_based() {
        assert_eq!(
            page_header("photos", "2024/", 0, 3),
            "Current Bucket: photos /2024/ (Page 1 of 3)"
        );
    }

    #[test]
    fn test_page_hint() {
        assert_eq!(page_hint(0, 1), None);
        assert_eq!(page_hint(0, 3), Some("(Press 'F' for next page.)"));
        assert_eq!(page_hint(2, 3), Some("(Press 'P' for previous page.)"));
        assert!(page_hint(1, 3).unwrap().contains("'F'"));
    }

    #[test]
    fn test_item_row_file() {
        let ts = Timestamp::from_second(0).unwrap();
        let item = Item::file("a.txt", Some(2048)).modified_at(Some(ts));
        let row = item_row(7, &item);
        assert_eq!(row[0], "[7]");
        assert_eq!(row[1], "📄 a.txt");
        assert_eq!(row[2], "2 KiB");
        assert_eq!(row[3], "1970-01-01 00:00:00");
    }

    #[test]
    fn test_item_row_folder_without_timestamp() {
        let row = item_row(0, &Item::folder("docs/"));
        assert_eq!(row[1], "📁 docs/");
        assert!(row[2].is_empty());
        assert!(row[3].is_empty());
    }
}
