use std::thread;
use std::time::Duration;

use super::{usage, Command, CommandResult};
use crate::core::dispatch::ControlSignal;
use crate::core::env::Environment;
use crate::output::OutputSink;

const HELP_TEXT: &str = "\
Available Commands:

FILE OPERATIONS:
  echo [TEXT]              - Display text
  cd [DIRECTORY]           - Change directory
  pwd                      - Print working directory
  ls / dir [PATH]          - List directory contents
  mkdir [DIR]              - Create directory
  rmdir [DIR]              - Remove directory
  touch [FILE]             - Create file
  rm / del [FILE]          - Remove file
  rename/mv [OLD] [NEW]    - Rename/move file
  cp/copy [SRC] [DEST]     - Copy file or directory
  find/search [PATH] [PAT] - Search for files by pattern
  size [PATH]              - Show file/directory size

TEXT OPERATIONS:
  read/cat/type [FILE]     - Read file contents
  write [FILE] [TEXT]      - Write to file
  append [FILE] [TEXT]     - Append text to file
  head [FILE] [N]          - Show first N lines (default 10)
  tail [FILE] [N]          - Show last N lines (default 10)
  wc [FILE]                - Word count (lines, words, chars)
  grep [PATTERN] [FILE]    - Search for pattern in file
  replace [FILE] [OLD] [NEW] - Replace old with new in file
  diff [FILE1] [FILE2]     - Compare two files
  cmp [FILE1] [FILE2]      - Compare files byte by byte

SYSTEM:
  tree [PATH]              - Display directory tree
  date                     - Show current date/time
  env [VAR] [VALUE]        - Show/set environment variables
  whoami                   - Show current user
  uname                    - Show system information

UTILITIES:
  calc [EXPRESSION]        - Calculate mathematical expression
  sleep [SECONDS]          - Pause for specified seconds
  alias [NAME] [COMMAND]   - Show/create command aliases
  unalias [NAME]           - Remove a command alias
  history                  - Show command history
  last                     - Execute last command
  clear / cls              - Clear screen
  exit / quit              - Exit the shell
";

#[derive(Clone)]
pub struct HelpCommand;

impl Command for HelpCommand {
    fn execute(
        &self,
        _args: &[String],
        _env: &mut Environment,
        out: &mut dyn OutputSink,
    ) -> CommandResult {
        for line in HELP_TEXT.lines() {
            out.info(line);
        }
        Ok(None)
    }
}

#[derive(Clone)]
pub struct EchoCommand;

impl Command for EchoCommand {
    fn execute(
        &self,
        args: &[String],
        _env: &mut Environment,
        out: &mut dyn OutputSink,
    ) -> CommandResult {
        out.output(&args.join(" "));
        Ok(None)
    }
}

#[derive(Clone)]
pub struct ClearCommand;

impl Command for ClearCommand {
    fn execute(
        &self,
        _args: &[String],
        _env: &mut Environment,
        _out: &mut dyn OutputSink,
    ) -> CommandResult {
        Ok(Some(ControlSignal::Clear))
    }
}

#[derive(Clone)]
pub struct ExitCommand;

impl Command for ExitCommand {
    fn execute(
        &self,
        _args: &[String],
        _env: &mut Environment,
        _out: &mut dyn OutputSink,
    ) -> CommandResult {
        Ok(Some(ControlSignal::Exit))
    }
}

/// Blocks the calling thread; the console is unresponsive meanwhile.
#[derive(Clone)]
pub struct SleepCommand;

impl Command for SleepCommand {
    fn execute(
        &self,
        args: &[String],
        _env: &mut Environment,
        out: &mut dyn OutputSink,
    ) -> CommandResult {
        let Some(arg) = args.first() else {
            return usage(out, "sleep SECONDS");
        };

        // Negative, non-finite and out-of-range values are all rejected here.
        let parsed = arg.parse::<f64>().ok();
        let (seconds, duration) = match parsed.map(|s| (s, Duration::try_from_secs_f64(s))) {
            Some((s, Ok(duration))) => (s, duration),
            _ => {
                out.error("sleep: invalid number");
                return Ok(None);
            }
        };

        out.info(&format!("Sleeping for {} seconds...", seconds));
        thread::sleep(duration);
        out.success("Done!");
        Ok(None)
    }
}
