//! Turns one raw input line into one command invocation.

use log::{debug, warn};

use crate::core::commands::{Command, CommandRegistry};
use crate::core::env::Environment;
use crate::core::tokenizer::tokenize;
use crate::output::OutputSink;

/// What a command asks of the front end after it ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlSignal {
    /// Wipe the displayed output and show the welcome banner again.
    Clear,
    /// Run this line as if the user had just typed it.
    Replay(String),
    /// End the session.
    Exit,
}

pub struct Dispatcher<'r> {
    registry: &'r CommandRegistry,
}

impl<'r> Dispatcher<'r> {
    pub fn new(registry: &'r CommandRegistry) -> Self {
        Self { registry }
    }

    /// Runs a single line. Unknown commands and command failures are
    /// reported through `out` as one error line each; neither is returned.
    pub fn execute(
        &self,
        line: &str,
        env: &mut Environment,
        out: &mut dyn OutputSink,
    ) -> Option<ControlSignal> {
        if line.trim().is_empty() {
            return None;
        }

        let mut tokens = tokenize(line);
        if tokens.is_empty() {
            return None;
        }

        if let Some(resolved) = env.aliases().resolve(&tokens) {
            debug!("alias {:?} -> {:?}", tokens[0], resolved);
            tokens = resolved;
        }

        let (head, args) = tokens.split_first()?;
        let name = head.to_lowercase();
        debug!("dispatch {:?} {:?}", name, args);

        let Some(command) = self.registry.get(&name) else {
            out.error(&format!(
                "Unknown command: {}. Type 'help' for available commands.",
                head
            ));
            return None;
        };

        match command.execute(args, env, out) {
            Ok(signal) => signal,
            Err(e) => {
                warn!("command {:?} failed: {}", name, e);
                out.error(&format!("Error: {}", e));
                None
            }
        }
    }
}
