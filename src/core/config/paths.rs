use super::ConfigError;
use std::path::PathBuf;

pub const RC_FILE_NAME: &str = ".cinderrc";

/// Where the startup file lives and whether the user asked for it by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    pub rc_path: PathBuf,
    pub explicit: bool,
}

impl ConfigPaths {
    /// `~/.cinderrc`.
    pub fn new() -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?;
        Ok(Self::in_home(home))
    }

    pub fn in_home(home: impl Into<PathBuf>) -> Self {
        ConfigPaths {
            rc_path: home.into().join(RC_FILE_NAME),
            explicit: false,
        }
    }

    /// A file passed with `--config`; it must exist.
    pub fn explicit(path: impl Into<PathBuf>) -> Self {
        ConfigPaths {
            rc_path: path.into(),
            explicit: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rc_path() {
        let paths = ConfigPaths::in_home("/home/testuser");
        assert_eq!(paths.rc_path, PathBuf::from("/home/testuser/.cinderrc"));
        assert!(!paths.explicit);
    }

    #[test]
    fn test_explicit_rc_path() {
        let paths = ConfigPaths::explicit("/etc/cinder/rc");
        assert_eq!(paths.rc_path, PathBuf::from("/etc/cinder/rc"));
        assert!(paths.explicit);
    }
}
