use crate::error::ShellError;
use std::path::{Path, PathBuf};

/// Home-directory shorthand for paths typed at the prompt.
#[derive(Clone, Debug, Default)]
pub struct PathExpander {
    home: Option<PathBuf>,
}

impl PathExpander {
    pub fn new() -> Self {
        Self {
            home: dirs::home_dir(),
        }
    }

    /// Uses `home` instead of asking the platform.
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self {
            home: Some(home.into()),
        }
    }

    /// Expands a leading `~` or `~/`. `~user` forms are returned as typed.
    pub fn expand(&self, path: &str) -> Result<PathBuf, ShellError> {
        match path.strip_prefix('~') {
            Some("") => self.home_dir(),
            Some(rest) if rest.starts_with('/') => {
                let mut expanded = self.home_dir()?;
                expanded.extend(rest.split('/').filter(|part| !part.is_empty()));
                Ok(expanded)
            }
            _ => Ok(PathBuf::from(path)),
        }
    }

    /// Inverse of `expand` for display: a path under home is shown as `~/…`.
    pub fn contract(&self, path: &Path) -> String {
        let Some(home) = self.home.as_deref() else {
            return path.display().to_string();
        };
        match path.strip_prefix(home) {
            Ok(rest) if rest.as_os_str().is_empty() => "~".to_string(),
            Ok(rest) => format!("~/{}", rest.display()),
            Err(_) => path.display().to_string(),
        }
    }

    pub fn home_dir(&self) -> Result<PathBuf, ShellError> {
        self.home.clone().ok_or(ShellError::HomeDirNotFound)
    }
}
