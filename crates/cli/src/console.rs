//! Display and input surface used by the session
//!
//! The session only talks to the terminal through `Console`, so the
//! rendering technology is an adapter choice (see `output::TermConsole`).

use std::io;

use ss3_core::{Item, PageView};

/// Everything needed to draw one page of a folder
#[derive(Debug)]
pub struct ListingView<'a> {
    pub bucket: &'a str,
    pub path: &'a str,
    pub page: PageView<'a, Item>,
    pub at_root: bool,
}

/// Terminal capabilities the session needs.
///
/// Reads return `io::ErrorKind::Interrupted` on Ctrl-C and
/// `io::ErrorKind::UnexpectedEof` when input is closed.
pub trait Console {
    /// Ask for one line of free text
    fn prompt_line(&mut self, message: &str) -> io::Result<String>;

    fn render_listing(&mut self, view: &ListingView<'_>) -> io::Result<()>;

    /// Show a short message the user acknowledges before continuing
    fn render_message(&mut self, text: &str) -> io::Result<()>;

    fn render_help(&mut self) -> io::Result<()>;

    /// Read one browsing command
    fn read_command(&mut self) -> io::Result<String>;

    /// Let the user pick one of `options`; `None` when nothing valid was picked
    fn choose(&mut self, title: &str, options: &[String]) -> io::Result<Option<usize>>;

    /// Show a waiting indicator until `end_wait`
    fn begin_wait(&mut self, message: &str);

    fn end_wait(&mut self);
}
