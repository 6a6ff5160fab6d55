use super::{Command, CommandResult};
use crate::core::env::Environment;
use crate::output::OutputSink;

/// `env` lists, shows or sets session variables.
#[derive(Clone)]
pub struct EnvCommand;

impl Command for EnvCommand {
    fn execute(
        &self,
        args: &[String],
        env: &mut Environment,
        out: &mut dyn OutputSink,
    ) -> CommandResult {
        match args {
            [] => {
                for (key, value) in env.vars().iter() {
                    out.output(&format!("{}={}", key, value));
                }
            }
            [name] => match env.get_var(name) {
                Some(value) if !value.is_empty() => out.output(&format!("{}={}", name, value)),
                _ => out.info(&format!("Variable not set: {}", name)),
            },
            [name, rest @ ..] => {
                let value = rest.join(" ");
                env.set_var(name, &value)?;
                out.success(&format!("Variable set: {}={}", name, value));
            }
        }
        Ok(None)
    }
}
