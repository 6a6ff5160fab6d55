use std::fs;

use log::{debug, info};

use super::{ConfigError, ConfigPaths};
use crate::core::commands::CommandRegistry;
use crate::core::dispatch::{ControlSignal, Dispatcher};
use crate::core::env::Environment;
use crate::output::OutputSink;

/// Replays the startup file through the dispatcher, one line at a time.
pub struct ConfigLoader<'a> {
    paths: &'a ConfigPaths,
    dispatcher: Dispatcher<'a>,
}

impl<'a> ConfigLoader<'a> {
    pub fn new(paths: &'a ConfigPaths, registry: &'a CommandRegistry) -> Self {
        Self {
            paths,
            dispatcher: Dispatcher::new(registry),
        }
    }

    /// Returns how many lines were run. Lines are not added to history.
    /// An `exit` line stops the file; `clear` and `last` have nothing to act
    /// on here and are ignored.
    pub fn load(
        &self,
        env: &mut Environment,
        out: &mut dyn OutputSink,
    ) -> Result<usize, ConfigError> {
        let path = &self.paths.rc_path;
        if !path.exists() {
            if self.paths.explicit {
                return Err(ConfigError::ConfigFileNotFound(path.display().to_string()));
            }
            debug!("no rc file at {}", path.display());
            return Ok(0);
        }

        info!("reading rc file {}", path.display());
        let content = fs::read_to_string(path)?;

        let mut count = 0;
        for line in content.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            count += 1;
            if let Some(ControlSignal::Exit) = self.dispatcher.execute(line, env, out) {
                info!("rc file requested exit; skipping the rest");
                break;
            }
        }
        Ok(count)
    }
}
