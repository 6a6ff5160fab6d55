use std::fmt;

/// Style tag attached to every line a command emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputStyle {
    Output,
    Error,
    Success,
    Info,
    Directory,
    Prompt,
}

impl fmt::Display for OutputStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputStyle::Output => "output",
            OutputStyle::Error => "error",
            OutputStyle::Success => "success",
            OutputStyle::Info => "info",
            OutputStyle::Directory => "directory",
            OutputStyle::Prompt => "prompt",
        };
        f.write_str(name)
    }
}

/// Write side of the console. One `emit` call is one line of output; the
/// sink is responsible for the line break.
pub trait OutputSink {
    fn emit(&mut self, text: &str, style: OutputStyle);

    fn output(&mut self, text: &str) {
        self.emit(text, OutputStyle::Output);
    }

    fn error(&mut self, text: &str) {
        self.emit(text, OutputStyle::Error);
    }

    fn success(&mut self, text: &str) {
        self.emit(text, OutputStyle::Success);
    }

    fn info(&mut self, text: &str) {
        self.emit(text, OutputStyle::Info);
    }
}

/// Collects emitted lines in memory.
#[derive(Debug, Default, Clone)]
pub struct BufferSink {
    lines: Vec<(String, OutputStyle)>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[(String, OutputStyle)] {
        &self.lines
    }

    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(|(text, _)| text.as_str()).collect()
    }

    pub fn with_style(&self, style: OutputStyle) -> Vec<&str> {
        self.lines
            .iter()
            .filter(|(_, s)| *s == style)
            .map(|(text, _)| text.as_str())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl OutputSink for BufferSink {
    fn emit(&mut self, text: &str, style: OutputStyle) {
        self.lines.push((text.to_string(), style));
    }
}
