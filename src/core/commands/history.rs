use super::{Command, CommandResult};
use crate::core::dispatch::ControlSignal;
use crate::core::env::Environment;
use crate::output::OutputSink;

#[derive(Clone)]
pub struct HistoryCommand;

impl Command for HistoryCommand {
    fn execute(
        &self,
        _args: &[String],
        env: &mut Environment,
        out: &mut dyn OutputSink,
    ) -> CommandResult {
        let history = env.history();
        if history.is_empty() {
            out.info("No command history available.");
            return Ok(None);
        }

        for (i, line) in history.entries().iter().enumerate() {
            out.output(&format!("{}: {}", i + 1, line));
        }
        Ok(None)
    }
}

/// Asks the front end to run the most recent history entry again.
#[derive(Clone)]
pub struct LastCommand;

impl Command for LastCommand {
    fn execute(
        &self,
        _args: &[String],
        env: &mut Environment,
        out: &mut dyn OutputSink,
    ) -> CommandResult {
        match env.history().last() {
            Some(line) if !line.trim().eq_ignore_ascii_case("last") => {
                out.info(&format!("Executing: {}", line));
                Ok(Some(ControlSignal::Replay(line.to_string())))
            }
            _ => {
                out.info("No previous command to execute.");
                Ok(None)
            }
        }
    }
}
