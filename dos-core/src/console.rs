//! Output sink abstraction for the DOS simulator.
//!
//! Commands and the dispatcher never talk to a terminal directly. They write
//! through `Outputter`, which works identically for tests (`HeadlessConsole`)
//! and for a real terminal implemented by the CLI.

use std::collections::VecDeque;

/// Text sink used by commands, the dispatcher and the session loop.
pub trait Outputter {
    /// Write text without a trailing newline.
    fn print(&mut self, text: &str);

    /// Write a newline.
    fn new_line(&mut self);

    /// Write text followed by exactly one newline.
    fn print_line(&mut self, line: &str) {
        self.print(line);
        self.new_line();
    }

    /// Read a single character (blocking). Intended for Yes/No prompts.
    fn read_single_character(&mut self) -> char;
}

/// Headless console for testing - captures output, provides queued input.
#[derive(Default)]
pub struct HeadlessConsole {
    output: String,
    input: VecDeque<char>,
}

impl HeadlessConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with pre-queued input.
    pub fn with_input(input: &str) -> Self {
        Self {
            output: String::new(),
            input: input.chars().collect(),
        }
    }

    /// Queue characters to be returned by `read_single_character`.
    pub fn queue_input(&mut self, input: &str) {
        self.input.extend(input.chars());
    }

    /// Everything written so far.
    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    /// Clear output buffer.
    pub fn clear_output(&mut self) {
        self.output.clear();
    }
}

impl Outputter for HeadlessConsole {
    fn print(&mut self, text: &str) {
        self.output.push_str(text);
    }

    fn new_line(&mut self) {
        self.output.push('\n');
    }

    fn read_single_character(&mut self) -> char {
        // Nothing queued reads as NUL instead of blocking
        self.input.pop_front().unwrap_or('\0')
    }
}
