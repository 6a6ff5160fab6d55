use std::{fs, path::PathBuf};

use rustyline::completion::Pair;

use crate::path::PathExpander;

/// Completes file and directory names. The typed directory part, `~`
/// included, is kept as-is in the replacement.
#[derive(Clone, Default)]
pub struct PathCompleter {
    expander: PathExpander,
}

impl PathCompleter {
    pub fn new() -> Self {
        Self {
            expander: PathExpander::new(),
        }
    }

    pub fn complete_path(&self, incomplete: &str) -> Vec<Pair> {
        let (typed_dir, file_prefix) = match incomplete.rfind('/') {
            Some(i) => incomplete.split_at(i + 1),
            None => ("", incomplete),
        };

        let search_dir = if typed_dir.is_empty() {
            PathBuf::from(".")
        } else {
            self.expander
                .expand(typed_dir)
                .unwrap_or_else(|_| PathBuf::from(typed_dir))
        };

        let Ok(entries) = fs::read_dir(&search_dir) else {
            return Vec::new();
        };

        let mut matches: Vec<Pair> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name().into_string().ok()?;
                if !name.starts_with(file_prefix) {
                    return None;
                }
                let candidate = format!("{}{}", typed_dir, name);
                let pair = if entry.path().is_dir() {
                    Pair {
                        display: format!("{}/", name),
                        replacement: format!("{}/", candidate),
                    }
                } else {
                    Pair {
                        display: name,
                        replacement: format!("{} ", candidate),
                    }
                };
                Some(pair)
            })
            .collect();

        matches.sort_by(|a, b| a.display.cmp(&b.display));
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_in_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("notes")).unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::write(dir.path().join("other.txt"), "").unwrap();

        let typed = format!("{}/no", dir.path().display());
        let pairs = PathCompleter::new().complete_path(&typed);

        let displays: Vec<&str> = pairs.iter().map(|p| p.display.as_str()).collect();
        assert_eq!(displays, vec!["notes.txt", "notes/"]);
        assert_eq!(
            pairs[1].replacement,
            format!("{}/notes/", dir.path().display())
        );
        assert_eq!(
            pairs[0].replacement,
            format!("{}/notes.txt ", dir.path().display())
        );
    }

    #[test]
    fn test_missing_directory() {
        assert!(PathCompleter::new()
            .complete_path("/definitely/not/here/x")
            .is_empty());
    }
}
