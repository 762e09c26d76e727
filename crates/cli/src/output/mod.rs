//! Terminal output
//!
//! Listing text, the waiting spinner and the `Console` adapter for a
//! real terminal.

pub mod listing;
mod progress;
mod term;

pub use progress::Spinner;
pub use term::TermConsole;

/// Apply the configured color mode ("auto", "always" or "never")
pub fn apply_color_mode(mode: &str) {
    match mode {
        "always" => {
            console::set_colors_enabled(true);
            console::set_colors_enabled_stderr(true);
        }
        "never" => {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        }
        _ => {}
    }
}
