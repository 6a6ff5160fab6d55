use super::EnvError;
use std::collections::BTreeMap;

pub const DEFAULT_PATH: &str = "/usr/local/bin:/usr/bin:/bin";

/// Session variables. These live only inside the shell and are never
/// exported to the process environment.
#[derive(Clone, Debug)]
pub struct VarTable {
    vars: BTreeMap<Box<str>, Box<str>>,
}

impl Default for VarTable {
    fn default() -> Self {
        Self::new()
    }
}

impl VarTable {
    pub fn new() -> Self {
        let mut vars = BTreeMap::new();
        vars.insert("PATH".into(), DEFAULT_PATH.into());
        Self { vars }
    }

    pub fn set(&mut self, name: &str, value: &str) -> Result<(), EnvError> {
        if name.is_empty() {
            return Err(EnvError::InvalidName("empty variable name".to_string()));
        }
        if name.contains('=') {
            return Err(EnvError::InvalidName(format!(
                "variable name cannot contain '=': {}",
                name
            )));
        }

        self.vars.insert(name.into(), value.into());
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(|s| s.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_ref(), v.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
