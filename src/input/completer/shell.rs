use std::borrow::Cow;

use super::{command::CommandCompleter, path::PathCompleter};
use crate::core::commands::CommandRegistry;
use crate::core::env::AliasTable;
use crate::highlight::SyntaxHighlighter;
use crate::output::OutputStyle;

use rustyline::{
    completion::{Completer, Pair},
    highlight::{CmdKind, Highlighter},
    hint::Hinter,
    validate::Validator,
    Context, Helper,
};

/// Line editor helper: completion for the command word and paths, plus
/// live highlighting of the edit line.
#[derive(Clone)]
pub struct ShellCompleter {
    command_completer: CommandCompleter,
    path_completer: PathCompleter,
    highlighter: SyntaxHighlighter,
}

impl ShellCompleter {
    pub fn new(registry: &CommandRegistry) -> Self {
        ShellCompleter {
            command_completer: CommandCompleter::new(registry),
            path_completer: PathCompleter::new(),
            highlighter: SyntaxHighlighter::new(),
        }
    }

    pub fn update_aliases(&mut self, aliases: &AliasTable) {
        self.command_completer.update_aliases(aliases);
    }

    fn candidates(&self, line_up_to_cursor: &str, pos: usize) -> (usize, Vec<Pair>) {
        let word_start = line_up_to_cursor.rfind(' ').map_or(0, |i| i + 1);
        let word = &line_up_to_cursor[word_start..];
        let is_first_word = line_up_to_cursor[..word_start].trim().is_empty();

        if is_first_word {
            (word_start, self.command_completer.complete_command(word))
        } else if word.is_empty() {
            (pos, self.path_completer.complete_path(""))
        } else {
            (word_start, self.path_completer.complete_path(word))
        }
    }
}

impl Helper for ShellCompleter {}

impl Highlighter for ShellCompleter {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Owned(
            self.highlighter
                .highlight_command(line, |word| self.command_completer.is_known(word)),
        )
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        _default: bool,
    ) -> Cow<'b, str> {
        Cow::Owned(self.highlighter.paint(prompt, OutputStyle::Prompt))
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(self.highlighter.highlight_hint(hint))
    }
}

impl Hinter for ShellCompleter {
    type Hint = String;
}

impl Validator for ShellCompleter {}

impl Completer for ShellCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(self.candidates(&line[..pos], pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_word_completes_commands() {
        let completer = ShellCompleter::new(&CommandRegistry::with_builtins());
        let (start, pairs) = completer.candidates("  unal", 6);
        assert_eq!(start, 2);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].replacement, "unalias ");
    }

    #[test]
    fn test_later_words_complete_paths() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("data.csv"), "").unwrap();
        let completer = ShellCompleter::new(&CommandRegistry::with_builtins());

        let line = format!("cat {}/da", dir.path().display());
        let (start, pairs) = completer.candidates(&line, line.len());
        assert_eq!(start, 4);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].display, "data.csv");
    }
}
