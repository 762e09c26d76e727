//! Browsing commands
//!
//! One case-insensitive token per line of input.

/// A command read while browsing a folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `q`
    Quit,
    /// `h`
    Help,
    /// `n`: pick another bucket
    NewBucket,
    /// `b`: up one folder
    Back,
    /// `f`
    NextPage,
    /// `p`
    PrevPage,
    /// An item index as shown in the listing
    Select(usize),
    /// Anything else
    Invalid(String),
}

impl Command {
    pub fn parse(input: &str) -> Self {
        let token = input.trim().to_lowercase();
        match token.as_str() {
            "q" => Command::Quit,
            "h" => Command::Help,
            "n" => Command::NewBucket,
            "b" => Command::Back,
            "f" => Command::NextPage,
            "p" => Command::PrevPage,
            t if !t.is_empty() && t.bytes().all(|b| b.is_ascii_digit()) => match t.parse() {
                Ok(index) => Command::Select(index),
                Err(_) => Command::Invalid(t.to_string()),
            },
            other => Command::Invalid(other.to_string()),
        }
    }
}
