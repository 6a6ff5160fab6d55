use std::collections::{BTreeMap, BTreeSet};

use rustyline::completion::Pair;

use crate::core::commands::CommandRegistry;
use crate::core::env::AliasTable;

/// Completes the first word of a line from registered names and aliases.
#[derive(Clone, Default)]
pub struct CommandCompleter {
    commands: BTreeSet<String>,
    aliases: BTreeMap<String, String>,
}

impl CommandCompleter {
    pub fn new(registry: &CommandRegistry) -> Self {
        Self {
            commands: registry.names().map(String::from).collect(),
            aliases: BTreeMap::new(),
        }
    }

    pub fn update_aliases(&mut self, aliases: &AliasTable) {
        self.aliases = aliases
            .iter()
            .map(|(name, expansion)| (name.to_string(), expansion.to_string()))
            .collect();
    }

    pub fn is_known(&self, word: &str) -> bool {
        self.commands.contains(word) || self.aliases.contains_key(word)
    }

    pub fn complete_command(&self, word: &str) -> Vec<Pair> {
        let prefix = word.to_lowercase();
        let commands = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(&prefix))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: format!("{} ", cmd),
            });

        let aliases = self
            .aliases
            .iter()
            .filter(|(alias, _)| alias.starts_with(word))
            .map(|(alias, expansion)| Pair {
                display: format!("{} (alias: {})", alias, expansion),
                replacement: format!("{} ", alias),
            });

        commands.chain(aliases).collect()
    }
}
