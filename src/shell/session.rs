use log::debug;

use crate::core::commands::CommandRegistry;
use crate::core::config::{ConfigError, ConfigLoader, ConfigPaths};
use crate::core::dispatch::{ControlSignal, Dispatcher};
use crate::core::env::Environment;
use crate::input::NavState;
use crate::output::OutputSink;

/// What the front end should do once a submitted line has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Clear,
    Exit,
}

/// Everything a submitted line touches apart from the terminal itself.
pub struct Session {
    registry: CommandRegistry,
    env: Environment,
    nav: NavState,
}

impl Session {
    pub fn new(registry: CommandRegistry, env: Environment) -> Self {
        let nav = NavState::new();
        nav.sync(env.history());
        Self { registry, env, nav }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn nav(&self) -> &NavState {
        &self.nav
    }

    /// Replays a startup file. Its lines do not enter history.
    pub fn load_rc(
        &mut self,
        paths: &ConfigPaths,
        out: &mut dyn OutputSink,
    ) -> Result<usize, ConfigError> {
        ConfigLoader::new(paths, &self.registry).load(&mut self.env, out)
    }

    /// Runs a typed line and records it in history afterwards, so `last`
    /// sees the line before it. A replay runs once and is recorded in place
    /// of the line that asked for it; a replay requested by the replayed
    /// line is dropped.
    pub fn submit(&mut self, line: &str, out: &mut dyn OutputSink) -> Flow {
        let line = line.trim();
        if line.is_empty() {
            return Flow::Continue;
        }

        let dispatcher = Dispatcher::new(&self.registry);
        let (recorded, signal) = match dispatcher.execute(line, &mut self.env, out) {
            Some(ControlSignal::Replay(previous)) => {
                debug!("replaying {:?}", previous);
                let signal = dispatcher.execute(&previous, &mut self.env, out);
                (previous, signal)
            }
            signal => (line.to_string(), signal),
        };

        self.env.add_history(&recorded);
        self.nav.push(&recorded);

        match signal {
            Some(ControlSignal::Clear) => Flow::Clear,
            Some(ControlSignal::Exit) => Flow::Exit,
            Some(ControlSignal::Replay(_)) | None => Flow::Continue,
        }
    }
}
