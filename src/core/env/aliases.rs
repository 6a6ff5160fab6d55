use std::collections::BTreeMap;

use crate::core::tokenizer::tokenize;

/// Alias name to expansion text (a command name plus optional leading
/// arguments).
#[derive(Clone, Debug, Default)]
pub struct AliasTable {
    aliases: BTreeMap<Box<str>, Box<str>>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: &str, expansion: &str) {
        self.aliases.insert(name.into(), expansion.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.aliases.remove(name).map(String::from)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(|s| s.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.aliases.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(k, v)| (k.as_ref(), v.as_ref()))
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Substitutes the head token once. Returns `None` when the head is not
    /// an alias. The expansion is not looked up again, so an alias pointing
    /// at another alias name resolves to that name literally.
    pub fn resolve(&self, tokens: &[String]) -> Option<Vec<String>> {
        let (head, rest) = tokens.split_first()?;
        let expansion = self.get(head)?;

        let line = format!("{} {}", expansion, rest.join(" "));
        Some(tokenize(&line))
    }
}
