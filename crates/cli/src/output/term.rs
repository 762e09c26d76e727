//! `Console` implementation on top of the `console` crate
//!
//! On a terminal the screen is redrawn for every page and messages wait
//! for a key press. With redirected stdin the same screens are written
//! as plain lines, which keeps the binary scriptable.

use std::io::{self, BufRead, IsTerminal};

use comfy_table::{Table, presets};
use console::{Term, style};

use super::listing::{self, EMPTY_FOLDER, HELP_TEXT, OPTIONS_BAR};
use super::progress::Spinner;
use crate::console::{Console, ListingView};

/// Terminal-backed console
pub struct TermConsole {
    term: Term,
    interactive: bool,
    spinner: Option<Spinner>,
}

impl TermConsole {
    pub fn new() -> Self {
        let term = Term::stdout();
        let interactive = term.is_term() && io::stdin().is_terminal();
        Self {
            term,
            interactive,
            spinner: None,
        }
    }

    fn read_input(&self) -> io::Result<String> {
        if self.interactive {
            return self.term.read_line();
        }

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn wait_for_key(&self) -> io::Result<()> {
        if !self.interactive {
            return Ok(());
        }
        self.term
            .write_str(&style("Press any key to continue.").dim().to_string())?;
        self.term.read_key()?;
        self.term.clear_line()
    }
}

impl Default for TermConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for TermConsole {
    fn prompt_line(&mut self, message: &str) -> io::Result<String> {
        self.term.write_str(&style(message).bold().to_string())?;
        self.term.flush()?;
        self.read_input()
    }

    fn render_listing(&mut self, view: &ListingView<'_>) -> io::Result<()> {
        if self.interactive {
            self.term.clear_screen()?;
        }

        let header = listing::page_header(view.bucket, view.path, view.page.page, view.page.page_count);
        self.term.write_line(&style(header).cyan().bold().to_string())?;

        if view.page.items.is_empty() {
            self.term.write_line(EMPTY_FOLDER)?;
        } else {
            let mut table = Table::new();
            table
                .load_preset(presets::NOTHING)
                .set_header(vec!["", "Name", "Size", "Last Modified"]);
            for (i, item) in view.page.items.iter().enumerate() {
                table.add_row(listing::item_row(view.page.offset + i, item));
            }
            self.term.write_line(&table.to_string())?;
        }

        if let Some(hint) = listing::page_hint(view.page.page, view.page.page_count) {
            self.term.write_line("")?;
            self.term.write_line(hint)?;
        }
        if !view.at_root {
            self.term.write_line(&style("[B] goes back one folder").dim().to_string())?;
        }
        self.term.write_line("")?;
        self.term
            .write_line(&style(OPTIONS_BAR).reverse().to_string())
    }

    fn render_message(&mut self, text: &str) -> io::Result<()> {
        self.term.write_line(&style(text).yellow().to_string())?;
        self.wait_for_key()
    }

    fn render_help(&mut self) -> io::Result<()> {
        self.term.write_line(&style("Help").bold().to_string())?;
        self.term.write_line(HELP_TEXT)?;
        self.wait_for_key()
    }

    fn read_command(&mut self) -> io::Result<String> {
        self.prompt_line("Input: ")
    }

    fn choose(&mut self, title: &str, options: &[String]) -> io::Result<Option<usize>> {
        self.term.write_line(&style(title).bold().to_string())?;
        for (i, option) in options.iter().enumerate() {
            self.term.write_line(&format!("  [{i}] {option}"))?;
        }
        let input = self.prompt_line("Select an option (Enter to cancel): ")?;
        Ok(input
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|i| *i < options.len()))
    }

    fn begin_wait(&mut self, message: &str) {
        self.spinner = Some(Spinner::start(self.interactive, message));
    }

    fn end_wait(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}
