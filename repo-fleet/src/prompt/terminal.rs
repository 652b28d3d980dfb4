//! Terminal prompter built on inquire.

use super::{PromptError, Prompter};
use inquire::{InquireError, Text};

/// [`Prompter`] reading from the interactive terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    /// Creates a terminal prompter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for TerminalPrompter {
    fn say(&mut self, line: &str) {
        println!("{line}");
    }

    fn ask(&mut self, message: &str) -> Result<String, PromptError> {
        match Text::new(message).prompt() {
            Ok(answer) => Ok(answer),
            Err(InquireError::NotTTY) => Err(PromptError::InputClosed),
            Err(e) => Err(PromptError::Terminal(e)),
        }
    }
}
