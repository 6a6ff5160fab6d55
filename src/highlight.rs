use inksac::prelude::*;

use crate::output::OutputStyle;

#[derive(Debug, Clone, Copy)]
pub struct SyntaxHighlighter {
    color_support: ColorSupport,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter {
    pub fn new() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color_support: support,
        }
    }

    /// A highlighter that never emits escape codes.
    pub fn plain() -> Self {
        Self {
            color_support: ColorSupport::NoColor,
        }
    }

    fn enabled(&self) -> bool {
        !matches!(self.color_support, ColorSupport::NoColor)
    }

    fn style_for(style: OutputStyle) -> Option<Style> {
        let style = match style {
            OutputStyle::Output => return None,
            OutputStyle::Prompt => Style::builder().foreground(Color::Green).bold().build(),
            OutputStyle::Error => Style::builder().foreground(Color::Red).build(),
            OutputStyle::Success => Style::builder().foreground(Color::Green).build(),
            OutputStyle::Info => Style::builder().foreground(Color::Cyan).build(),
            OutputStyle::Directory => Style::builder()
                .foreground(Color::RGB(190, 120, 255))
                .bold()
                .build(),
        };
        Some(style)
    }

    /// Colors one line of console output according to its tag.
    pub fn paint(&self, text: &str, style: OutputStyle) -> String {
        match Self::style_for(style) {
            Some(style) if self.enabled() => text.style(style).to_string(),
            _ => text.to_string(),
        }
    }

    /// Highlights the edit line in place: the command word is cyan when
    /// `is_known` accepts it and red otherwise, quoted arguments are yellow.
    /// Spacing is preserved so the cursor stays aligned.
    pub fn highlight_command(&self, input: &str, is_known: impl Fn(&str) -> bool) -> String {
        if !self.enabled() {
            return input.to_string();
        }

        let mut result = String::with_capacity(input.len());
        let mut seen_head = false;
        for (is_space, segment) in segments(input) {
            if is_space {
                result.push_str(segment);
            } else if !seen_head {
                seen_head = true;
                let style = if is_known(&segment.to_lowercase()) {
                    Style::builder().foreground(Color::Cyan).bold().build()
                } else {
                    Style::builder().foreground(Color::Red).build()
                };
                result.push_str(&segment.style(style).to_string());
            } else if segment.starts_with('"') {
                let style = Style::builder().foreground(Color::Yellow).build();
                result.push_str(&segment.style(style).to_string());
            } else {
                result.push_str(segment);
            }
        }
        result
    }

    pub fn highlight_hint(&self, hint: &str) -> String {
        if !self.enabled() {
            return hint.to_string();
        }

        let hint_style = Style::builder()
            .foreground(Color::RGB(128, 128, 128))
            .build();

        hint.style(hint_style).to_string()
    }
}

/// Splits a line into alternating runs of separators and words, keeping
/// quoted spaces inside their word. Concatenating the runs gives the input.
fn segments(input: &str) -> Vec<(bool, &str)> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut current: Option<bool> = None;

    for (i, c) in input.char_indices() {
        let is_space = c == ' ' && !in_quotes;
        if c == '"' {
            in_quotes = !in_quotes;
        }
        if let Some(kind) = current {
            if kind != is_space {
                runs.push((kind, &input[start..i]));
                start = i;
            }
        }
        current = Some(is_space);
    }
    if let Some(kind) = current {
        runs.push((kind, &input[start..]));
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_round_trip() {
        let line = "write  notes.txt \"two  words\" end";
        let runs = segments(line);
        let joined: String = runs.iter().map(|(_, s)| *s).collect();
        assert_eq!(joined, line);

        let words: Vec<&str> = runs.iter().filter(|(space, _)| !space).map(|(_, s)| *s).collect();
        assert_eq!(words, vec!["write", "notes.txt", "\"two  words\"", "end"]);
    }

    #[test]
    fn test_segments_empty() {
        assert!(segments("").is_empty());
    }

    #[test]
    fn test_plain_passthrough() {
        let highlighter = SyntaxHighlighter::plain();
        assert_eq!(highlighter.paint("Done!", OutputStyle::Success), "Done!");
        assert_eq!(
            highlighter.highlight_command("ls  -la", |_| true),
            "ls  -la"
        );
        assert_eq!(highlighter.highlight_hint("hint"), "hint");
    }
}
