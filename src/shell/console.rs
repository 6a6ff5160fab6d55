use std::io::{self, Write};

use crate::highlight::SyntaxHighlighter;
use crate::output::{OutputSink, OutputStyle};

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

/// Terminal side of the output channel: each emitted line is painted and
/// written to stdout.
pub struct Console {
    highlighter: SyntaxHighlighter,
}

impl Console {
    pub fn new(highlighter: SyntaxHighlighter) -> Self {
        Self { highlighter }
    }

    pub fn clear_screen(&mut self) {
        print!("{}", CLEAR_SCREEN);
        let _ = io::stdout().flush();
    }

    /// Lines shown at start-up and after `clear`.
    pub fn banner(&mut self, current_dir: &str) {
        self.info("Welcome to cinder - a small command console");
        self.info(&format!("Working directory: {}", current_dir));
        self.info("Type 'help' for available commands or 'exit' to quit.");
        self.info("");
    }
}

impl OutputSink for Console {
    fn emit(&mut self, text: &str, style: OutputStyle) {
        let mut stdout = io::stdout().lock();
        // A closed stdout leaves nothing to report to.
        let _ = writeln!(stdout, "{}", self.highlighter.paint(text, style));
    }
}
