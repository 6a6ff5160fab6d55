use std::env;
use std::io::ErrorKind;

use super::{usage, Command, CommandError, CommandResult, IoContext};
use crate::core::env::{EnvError, Environment};
use crate::output::OutputSink;
use crate::path::PathExpander;

#[derive(Clone)]
pub struct CdCommand {
    path_expander: PathExpander,
}

impl Default for CdCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CdCommand {
    pub fn new() -> Self {
        Self {
            path_expander: PathExpander::new(),
        }
    }
}

impl Command for CdCommand {
    fn execute(
        &self,
        args: &[String],
        env: &mut Environment,
        out: &mut dyn OutputSink,
    ) -> CommandResult {
        if args.is_empty() {
            return usage(out, "cd DIRECTORY");
        }

        let path_str = args.join(" ");
        let expanded = self
            .path_expander
            .expand(&path_str)
            .map_err(|e| CommandError::ExecutionError(format!("cd: {}", e)))?;
        let target = env.current_dir().join(expanded);

        match env.change_dir(&target) {
            Ok(dir) => {
                let msg = format!("Changed directory to: {}", dir.display());
                out.success(&msg);
            }
            Err(EnvError::IoError(e)) if e.kind() == ErrorKind::NotFound => {
                out.error(&format!("cd: directory does not exist: {}", path_str));
            }
            Err(EnvError::IoError(_)) if target.exists() && !target.is_dir() => {
                out.error(&format!("cd: not a directory: {}", path_str));
            }
            Err(e) => return Err(CommandError::ExecutionError(format!("cd: {}", e))),
        }
        Ok(None)
    }
}

#[derive(Clone)]
pub struct PwdCommand;

impl Command for PwdCommand {
    fn execute(
        &self,
        _args: &[String],
        _env: &mut Environment,
        out: &mut dyn OutputSink,
    ) -> CommandResult {
        let cwd = env::current_dir().context("pwd")?;
        out.output(&cwd.display().to_string());
        Ok(None)
    }
}
