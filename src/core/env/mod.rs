mod aliases;
mod history;
mod vars;

pub use aliases::AliasTable;
pub use history::History;
pub use vars::{VarTable, DEFAULT_PATH};

use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum EnvError {
    InvalidName(String),
    IoError(std::io::Error),
}

impl std::fmt::Display for EnvError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnvError::InvalidName(msg) => write!(f, "Invalid name: {}", msg),
            EnvError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for EnvError {}

impl From<std::io::Error> for EnvError {
    fn from(e: std::io::Error) -> Self {
        EnvError::IoError(e)
    }
}

/// Session state shared by every command: variables, aliases, history and
/// the working directory.
#[derive(Debug)]
pub struct Environment {
    vars: VarTable,
    aliases: AliasTable,
    history: History,
    current_dir: PathBuf,
}

impl Environment {
    pub fn new() -> Result<Self, EnvError> {
        Ok(Self::with_dir(env::current_dir()?))
    }

    /// Builds a state whose recorded directory is `dir`. The process working
    /// directory is left alone.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            vars: VarTable::new(),
            aliases: AliasTable::new(),
            history: History::new(),
            current_dir: dir.into(),
        }
    }

    pub fn vars(&self) -> &VarTable {
        &self.vars
    }

    pub fn get_var(&self, name: &str) -> Option<&str> {
        self.vars.get(name)
    }

    pub fn set_var(&mut self, name: &str, value: &str) -> Result<(), EnvError> {
        self.vars.set(name, value)
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn aliases_mut(&mut self) -> &mut AliasTable {
        &mut self.aliases
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn add_history(&mut self, line: &str) {
        self.history.add(line);
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    /// Changes the process working directory and records the result. The
    /// recorded directory only moves when the change succeeded.
    pub fn change_dir(&mut self, target: &Path) -> Result<&Path, EnvError> {
        env::set_current_dir(target)?;
        self.current_dir = env::current_dir()?;
        Ok(&self.current_dir)
    }
}
