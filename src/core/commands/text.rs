use std::fs::{self, OpenOptions};
use std::io::Write;

use super::files::resolve;
use super::{usage, Command, CommandResult, IoContext};
use crate::core::env::Environment;
use crate::output::{OutputSink, OutputStyle};

const DEFAULT_LINE_COUNT: usize = 10;

#[derive(Clone)]
pub struct ReadCommand;

impl Command for ReadCommand {
    fn execute(
        &self,
        args: &[String],
        env: &mut Environment,
        out: &mut dyn OutputSink,
    ) -> CommandResult {
        let Some(name) = args.first() else {
            return usage(out, "read FILENAME");
        };

        let content = fs::read_to_string(resolve(env, name)).context("read")?;
        for line in content.lines() {
            out.output(line);
        }
        Ok(None)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteMode {
    Truncate,
    Append,
}

/// `write` and `append`: store the remaining arguments, joined by spaces,
/// as one line.
#[derive(Clone)]
pub struct WriteCommand {
    mode: WriteMode,
}

impl WriteCommand {
    pub fn truncate() -> Self {
        Self {
            mode: WriteMode::Truncate,
        }
    }

    pub fn append() -> Self {
        Self {
            mode: WriteMode::Append,
        }
    }

    fn name(&self) -> &'static str {
        match self.mode {
            WriteMode::Truncate => "write",
            WriteMode::Append => "append",
        }
    }
}

impl Command for WriteCommand {
    fn execute(
        &self,
        args: &[String],
        env: &mut Environment,
        out: &mut dyn OutputSink,
    ) -> CommandResult {
        let [name, text @ ..] = args else {
            return usage(out, &format!("{} FILENAME CONTENT", self.name()));
        };
        if text.is_empty() {
            return usage(out, &format!("{} FILENAME CONTENT", self.name()));
        }

        let mut options = OpenOptions::new();
        match self.mode {
            WriteMode::Truncate => options.write(true).create(true).truncate(true),
            WriteMode::Append => options.append(true).create(true),
        };

        let mut file = options.open(resolve(env, name)).context(self.name())?;
        writeln!(file, "{}", text.join(" ")).context(self.name())?;

        let msg = match self.mode {
            WriteMode::Truncate => format!("Content written to: {}", name),
            WriteMode::Append => format!("Content appended to: {}", name),
        };
        out.success(&msg);
        Ok(None)
    }
}

/// Parses the optional line count of `head`/`tail`. Emits the error line
/// itself and returns `None` on a bad count.
fn line_count(command: &str, args: &[String], out: &mut dyn OutputSink) -> Option<usize> {
    match args.get(1) {
        None => Some(DEFAULT_LINE_COUNT),
        Some(raw) => match raw.parse::<usize>() {
            Ok(n) => Some(n),
            Err(_) => {
                out.error(&format!("{}: invalid line count", command));
                None
            }
        },
    }
}

#[derive(Clone)]
pub struct HeadCommand;

impl Command for HeadCommand {
    fn execute(
        &self,
        args: &[String],
        env: &mut Environment,
        out: &mut dyn OutputSink,
    ) -> CommandResult {
        let Some(name) = args.first() else {
            return usage(out, "head FILENAME [N]");
        };
        let Some(count) = line_count("head", args, out) else {
            return Ok(None);
        };

        let content = fs::read_to_string(resolve(env, name)).context("head")?;
        for line in content.lines().take(count) {
            out.output(line);
        }
        Ok(None)
    }
}

#[derive(Clone)]
pub struct TailCommand;

impl Command for TailCommand {
    fn execute(
        &self,
        args: &[String],
        env: &mut Environment,
        out: &mut dyn OutputSink,
    ) -> CommandResult {
        let Some(name) = args.first() else {
            return usage(out, "tail FILENAME [N]");
        };
        let Some(count) = line_count("tail", args, out) else {
            return Ok(None);
        };

        let content = fs::read_to_string(resolve(env, name)).context("tail")?;
        let lines: Vec<&str> = content.lines().collect();
        for line in &lines[lines.len().saturating_sub(count)..] {
            out.output(line);
        }
        Ok(None)
    }
}

#[derive(Clone)]
pub struct WcCommand;

impl Command for WcCommand {
    fn execute(
        &self,
        args: &[String],
        env: &mut Environment,
        out: &mut dyn OutputSink,
    ) -> CommandResult {
        let Some(name) = args.first() else {
            return usage(out, "wc FILENAME");
        };

        let content = fs::read_to_string(resolve(env, name)).context("wc")?;
        let lines = content.matches('\n').count();
        let words = content.split_whitespace().count();
        let chars = content.chars().count();

        out.output(&format!(
            "Lines: {}, Words: {}, Characters: {}",
            lines, words, chars
        ));
        Ok(None)
    }
}

#[derive(Clone)]
pub struct GrepCommand;

impl Command for GrepCommand {
    fn execute(
        &self,
        args: &[String],
        env: &mut Environment,
        out: &mut dyn OutputSink,
    ) -> CommandResult {
        let [pattern, name, ..] = args else {
            return usage(out, "grep PATTERN FILENAME");
        };

        let content = fs::read_to_string(resolve(env, name)).context("grep")?;
        let needle = pattern.to_lowercase();
        let matches: Vec<(usize, &str)> = content
            .lines()
            .enumerate()
            .filter(|(_, line)| line.to_lowercase().contains(&needle))
            .map(|(i, line)| (i + 1, line.trim_end()))
            .collect();

        if matches.is_empty() {
            out.info(&format!("No matches found for: {}", pattern));
            return Ok(None);
        }

        for (number, line) in &matches {
            out.output(&format!("{}: {}", number, line));
        }
        out.info("");
        out.info(&format!("Found {} match(es)", matches.len()));
        Ok(None)
    }
}

#[derive(Clone)]
pub struct ReplaceCommand;

impl Command for ReplaceCommand {
    fn execute(
        &self,
        args: &[String],
        env: &mut Environment,
        out: &mut dyn OutputSink,
    ) -> CommandResult {
        let [name, old, new, ..] = args else {
            return usage(out, "replace FILENAME OLD_TEXT NEW_TEXT");
        };

        let path = resolve(env, name);
        let content = fs::read_to_string(&path).context("replace")?;
        let count = content.matches(old.as_str()).count();

        if count == 0 {
            out.info(&format!("Text not found: {}", old));
            return Ok(None);
        }

        fs::write(&path, content.replace(old.as_str(), new)).context("replace")?;
        out.success(&format!(
            "Replaced {} occurrence(s) of '{}' with '{}'",
            count, old, new
        ));
        Ok(None)
    }
}

/// Positional line comparison; no alignment of inserted or removed lines.
#[derive(Clone)]
pub struct DiffCommand;

impl Command for DiffCommand {
    fn execute(
        &self,
        args: &[String],
        env: &mut Environment,
        out: &mut dyn OutputSink,
    ) -> CommandResult {
        let [first, second, ..] = args else {
            return usage(out, "diff FILE1 FILE2");
        };

        let left = fs::read_to_string(resolve(env, first)).context("diff")?;
        let right = fs::read_to_string(resolve(env, second)).context("diff")?;
        let left: Vec<&str> = left.lines().map(str::trim_end).collect();
        let right: Vec<&str> = right.lines().map(str::trim_end).collect();

        let mut differences = 0;
        for i in 0..left.len().max(right.len()) {
            let number = i + 1;
            match (left.get(i), right.get(i)) {
                (Some(a), Some(b)) if a == b => continue,
                (None, Some(b)) => {
                    out.emit(&format!("{}a: + {}", number, b), OutputStyle::Success);
                }
                (Some(a), None) => {
                    out.emit(&format!("{}d: - {}", number, a), OutputStyle::Error);
                }
                (Some(a), Some(b)) => {
                    out.emit(&format!("{}c: - {}", number, a), OutputStyle::Error);
                    out.emit(&format!("{}c: + {}", number, b), OutputStyle::Success);
                }
                (None, None) => continue,
            }
            differences += 1;
        }

        if differences == 0 {
            out.info("Files are identical");
        } else {
            out.info("");
            out.info(&format!("{} difference(s) found", differences));
        }
        Ok(None)
    }
}

#[derive(Clone)]
pub struct CmpCommand;

impl Command for CmpCommand {
    fn execute(
        &self,
        args: &[String],
        env: &mut Environment,
        out: &mut dyn OutputSink,
    ) -> CommandResult {
        let [first, second, ..] = args else {
            return usage(out, "cmp FILE1 FILE2");
        };

        let left = fs::read(resolve(env, first)).context("cmp")?;
        let right = fs::read(resolve(env, second)).context("cmp")?;

        if let Some(pos) = left.iter().zip(&right).position(|(a, b)| a != b) {
            out.error(&format!("Files differ at byte {}", pos + 1));
        } else if left.len() != right.len() {
            out.error("Files have different lengths");
        } else {
            out.success("Files are identical");
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::CommandError;
    use crate::output::BufferSink;

    fn setup() -> (tempfile::TempDir, Environment, BufferSink) {
        let dir = tempfile::tempdir().unwrap();
        let env = Environment::with_dir(dir.path());
        (dir, env, BufferSink::new())
    }

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_write_append_read() {
        let (dir, mut env, mut out) = setup();

        WriteCommand::truncate()
            .execute(&args(&["f.txt", "hello", "world"]), &mut env, &mut out)
            .unwrap();
        WriteCommand::append()
            .execute(&args(&["f.txt", "again"]), &mut env, &mut out)
            .unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("f.txt")).unwrap(),
            "hello world\nagain\n"
        );

        out.clear();
        ReadCommand.execute(&args(&["f.txt"]), &mut env, &mut out).unwrap();
        assert_eq!(out.texts(), vec!["hello world", "again"]);

        WriteCommand::truncate()
            .execute(&args(&["f.txt", "fresh"]), &mut env, &mut out)
            .unwrap();
        assert_eq!(fs::read_to_string(dir.path().join("f.txt")).unwrap(), "fresh\n");
    }

    #[test]
    fn test_write_usage() {
        let (_dir, mut env, mut out) = setup();
        WriteCommand::truncate()
            .execute(&args(&["only-name"]), &mut env, &mut out)
            .unwrap();
        WriteCommand::append().execute(&[], &mut env, &mut out).unwrap();
        assert_eq!(
            out.texts(),
            vec!["Usage: write FILENAME CONTENT", "Usage: append FILENAME CONTENT"]
        );
    }

    #[test]
    fn test_read_missing_is_error() {
        let (_dir, mut env, mut out) = setup();
        let result = ReadCommand.execute(&args(&["nope.txt"]), &mut env, &mut out);
        assert!(matches!(result, Err(CommandError::Io { command: "read", .. })));
        assert!(out.is_empty());
    }

    #[test]
    fn test_head_and_tail() {
        let (dir, mut env, mut out) = setup();
        let body: String = (1..=15).map(|i| format!("line {}\n", i)).collect();
        fs::write(dir.path().join("n.txt"), body).unwrap();

        HeadCommand.execute(&args(&["n.txt", "2"]), &mut env, &mut out).unwrap();
        assert_eq!(out.texts(), vec!["line 1", "line 2"]);

        out.clear();
        TailCommand.execute(&args(&["n.txt", "3"]), &mut env, &mut out).unwrap();
        assert_eq!(out.texts(), vec!["line 13", "line 14", "line 15"]);

        out.clear();
        HeadCommand.execute(&args(&["n.txt"]), &mut env, &mut out).unwrap();
        assert_eq!(out.lines().len(), 10);

        out.clear();
        TailCommand.execute(&args(&["n.txt", "100"]), &mut env, &mut out).unwrap();
        assert_eq!(out.lines().len(), 15);

        out.clear();
        HeadCommand.execute(&args(&["n.txt", "many"]), &mut env, &mut out).unwrap();
        assert_eq!(out.with_style(OutputStyle::Error), vec!["head: invalid line count"]);
    }

    #[test]
    fn test_wc() {
        let (dir, mut env, mut out) = setup();
        fs::write(dir.path().join("w.txt"), "one two\nthree é\n").unwrap();

        WcCommand.execute(&args(&["w.txt"]), &mut env, &mut out).unwrap();
        assert_eq!(out.texts(), vec!["Lines: 2, Words: 4, Characters: 16"]);
    }

    #[test]
    fn test_grep() {
        let (dir, mut env, mut out) = setup();
        fs::write(dir.path().join("g.txt"), "Alpha\nbeta\nALPHABET  \n").unwrap();

        GrepCommand.execute(&args(&["alpha", "g.txt"]), &mut env, &mut out).unwrap();
        assert_eq!(
            out.texts(),
            vec!["1: Alpha", "3: ALPHABET", "", "Found 2 match(es)"]
        );

        out.clear();
        GrepCommand.execute(&args(&["gamma", "g.txt"]), &mut env, &mut out).unwrap();
        assert_eq!(out.texts(), vec!["No matches found for: gamma"]);
    }

    #[test]
    fn test_replace() {
        let (dir, mut env, mut out) = setup();
        let path = dir.path().join("r.txt");
        fs::write(&path, "cat and cat").unwrap();

        ReplaceCommand
            .execute(&args(&["r.txt", "cat", "dog"]), &mut env, &mut out)
            .unwrap();
        ReplaceCommand
            .execute(&args(&["r.txt", "cow", "pig"]), &mut env, &mut out)
            .unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "dog and dog");
        assert_eq!(
            out.texts(),
            vec![
                "Replaced 2 occurrence(s) of 'cat' with 'dog'",
                "Text not found: cow",
            ]
        );
    }

    #[test]
    fn test_diff() {
        let (dir, mut env, mut out) = setup();
        fs::write(dir.path().join("a.txt"), "same\nold\ngone\n").unwrap();
        fs::write(dir.path().join("b.txt"), "same\nnew\n").unwrap();
        fs::write(dir.path().join("c.txt"), "same\nnew\nextra\n").unwrap();

        DiffCommand.execute(&args(&["a.txt", "b.txt"]), &mut env, &mut out).unwrap();
        assert_eq!(
            out.lines(),
            &[
                ("2c: - old".to_string(), OutputStyle::Error),
                ("2c: + new".to_string(), OutputStyle::Success),
                ("3d: - gone".to_string(), OutputStyle::Error),
                ("".to_string(), OutputStyle::Info),
                ("2 difference(s) found".to_string(), OutputStyle::Info),
            ]
        );

        out.clear();
        DiffCommand.execute(&args(&["b.txt", "c.txt"]), &mut env, &mut out).unwrap();
        assert_eq!(out.texts()[0], "3a: + extra");

        out.clear();
        DiffCommand.execute(&args(&["b.txt", "b.txt"]), &mut env, &mut out).unwrap();
        assert_eq!(out.texts(), vec!["Files are identical"]);
    }

    #[test]
    fn test_cmp() {
        let (dir, mut env, mut out) = setup();
        fs::write(dir.path().join("x"), b"abcd").unwrap();
        fs::write(dir.path().join("y"), b"abXd").unwrap();
        fs::write(dir.path().join("z"), b"abc").unwrap();

        CmpCommand.execute(&args(&["x", "y"]), &mut env, &mut out).unwrap();
        CmpCommand.execute(&args(&["x", "z"]), &mut env, &mut out).unwrap();
        CmpCommand.execute(&args(&["x", "x"]), &mut env, &mut out).unwrap();
        assert_eq!(
            out.lines(),
            &[
                ("Files differ at byte 3".to_string(), OutputStyle::Error),
                ("Files have different lengths".to_string(), OutputStyle::Error),
                ("Files are identical".to_string(), OutputStyle::Success),
            ]
        );
    }
}
