use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::{usage, Command, CommandResult, IoContext};
use crate::core::env::Environment;
use crate::output::{OutputSink, OutputStyle};
use crate::path::PathExpander;

const TREE_MAX_DEPTH: usize = 3;

/// Resolves a user-supplied path against the session's working directory.
pub(crate) fn resolve(env: &Environment, arg: &str) -> PathBuf {
    let expanded = PathExpander::new()
        .expand(arg)
        .unwrap_or_else(|_| PathBuf::from(arg));
    if expanded.is_absolute() {
        expanded
    } else {
        env.current_dir().join(expanded)
    }
}

#[derive(Clone)]
pub struct LsCommand;

impl Command for LsCommand {
    fn execute(
        &self,
        args: &[String],
        env: &mut Environment,
        out: &mut dyn OutputSink,
    ) -> CommandResult {
        let path = resolve(env, args.first().map(String::as_str).unwrap_or("."));

        let mut items: Vec<(String, bool)> = fs::read_dir(&path)
            .context("ls")?
            .filter_map(Result::ok)
            .map(|entry| {
                let name = entry.file_name().to_string_lossy().into_owned();
                (name, entry.path().is_dir())
            })
            .collect();

        if items.is_empty() {
            out.info("Directory is empty");
            return Ok(None);
        }

        items.sort();
        for (name, is_dir) in items {
            if is_dir {
                out.emit(&format!("[DIR]  {}", name), OutputStyle::Directory);
            } else {
                out.output(&format!("[FILE] {}", name));
            }
        }
        Ok(None)
    }
}

#[derive(Clone)]
pub struct MkdirCommand;

impl Command for MkdirCommand {
    fn execute(
        &self,
        args: &[String],
        env: &mut Environment,
        out: &mut dyn OutputSink,
    ) -> CommandResult {
        let Some(name) = args.first() else {
            return usage(out, "mkdir DIRECTORY");
        };

        fs::create_dir_all(resolve(env, name)).context("mkdir")?;
        out.success(&format!("Directory created: {}", name));
        Ok(None)
    }
}

#[derive(Clone)]
pub struct RmdirCommand;

impl Command for RmdirCommand {
    fn execute(
        &self,
        args: &[String],
        env: &mut Environment,
        out: &mut dyn OutputSink,
    ) -> CommandResult {
        let Some(name) = args.first() else {
            return usage(out, "rmdir DIRECTORY");
        };

        let path = resolve(env, name);
        if !path.is_dir() {
            out.error(&format!("rmdir: not a directory: {}", name));
            return Ok(None);
        }

        fs::remove_dir_all(&path).context("rmdir")?;
        out.success(&format!("Directory deleted: {}", name));
        Ok(None)
    }
}

#[derive(Clone)]
pub struct TouchCommand;

impl Command for TouchCommand {
    fn execute(
        &self,
        args: &[String],
        env: &mut Environment,
        out: &mut dyn OutputSink,
    ) -> CommandResult {
        let Some(name) = args.first() else {
            return usage(out, "touch FILENAME");
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(resolve(env, name))
            .context("touch")?;
        file.set_modified(SystemTime::now()).context("touch")?;

        out.success(&format!("File created: {}", name));
        Ok(None)
    }
}

#[derive(Clone)]
pub struct RmCommand;

impl Command for RmCommand {
    fn execute(
        &self,
        args: &[String],
        env: &mut Environment,
        out: &mut dyn OutputSink,
    ) -> CommandResult {
        let Some(name) = args.first() else {
            return usage(out, "rm FILENAME");
        };

        let path = resolve(env, name);
        if path.is_file() {
            fs::remove_file(&path).context("rm")?;
            out.success(&format!("File deleted: {}", name));
        } else if path.is_dir() {
            out.error(&format!("rm: is a directory: {} (use rmdir)", name));
        } else {
            out.error(&format!("rm: file does not exist: {}", name));
        }
        Ok(None)
    }
}

#[derive(Clone)]
pub struct RenameCommand;

impl Command for RenameCommand {
    fn execute(
        &self,
        args: &[String],
        env: &mut Environment,
        out: &mut dyn OutputSink,
    ) -> CommandResult {
        let [old, new, ..] = args else {
            return usage(out, "rename OLD_NAME NEW_NAME");
        };

        fs::rename(resolve(env, old), resolve(env, new)).context("rename")?;
        out.success(&format!("Renamed: {} -> {}", old, new));
        Ok(None)
    }
}

#[derive(Clone)]
pub struct CopyCommand;

impl CopyCommand {
    /// Copies a directory tree. Fails if `dst` already exists.
    fn copy_tree(src: &Path, dst: &Path) -> std::io::Result<()> {
        fs::create_dir(dst)?;
        for entry in fs::read_dir(src)? {
            let entry = entry?;
            let target = dst.join(entry.file_name());
            if entry.file_type()?.is_dir() {
                Self::copy_tree(&entry.path(), &target)?;
            } else {
                fs::copy(entry.path(), &target)?;
            }
        }
        Ok(())
    }
}

impl Command for CopyCommand {
    fn execute(
        &self,
        args: &[String],
        env: &mut Environment,
        out: &mut dyn OutputSink,
    ) -> CommandResult {
        let [src, dst, ..] = args else {
            return usage(out, "cp SOURCE DESTINATION");
        };

        let src_path = resolve(env, src);
        let mut dst_path = resolve(env, dst);

        if src_path.is_file() {
            if dst_path.is_dir() {
                if let Some(file_name) = src_path.file_name() {
                    dst_path.push(file_name);
                }
            }
            fs::copy(&src_path, &dst_path).context("cp")?;
            out.success(&format!("File copied: {} -> {}", src, dst));
        } else if src_path.is_dir() {
            Self::copy_tree(&src_path, &dst_path).context("cp")?;
            out.success(&format!("Directory copied: {} -> {}", src, dst));
        } else {
            out.error(&format!("cp: source does not exist: {}", src));
        }
        Ok(None)
    }
}

#[derive(Clone)]
pub struct FindCommand;

impl FindCommand {
    /// Depth-first walk collecting entries whose name contains `needle`
    /// (already lowercased). Unreadable directories are skipped.
    fn walk(dir: &Path, shown: &Path, needle: &str, matches: &mut Vec<PathBuf>) {
        let Ok(entries) = fs::read_dir(dir) else {
            return;
        };

        let mut entries: Vec<_> = entries.filter_map(Result::ok).collect();
        entries.sort_by_key(|e| e.file_name());

        for entry in entries {
            let name = entry.file_name();
            let shown_path = shown.join(&name);
            if name.to_string_lossy().to_lowercase().contains(needle) {
                matches.push(shown_path.clone());
            }
            if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                Self::walk(&entry.path(), &shown_path, needle, matches);
            }
        }
    }
}

impl Command for FindCommand {
    fn execute(
        &self,
        args: &[String],
        env: &mut Environment,
        out: &mut dyn OutputSink,
    ) -> CommandResult {
        let (base, pattern) = match args {
            [] => return usage(out, "find [PATH] PATTERN"),
            [pattern] => (".", pattern),
            [base, pattern, ..] => (base.as_str(), pattern),
        };

        let mut matches = Vec::new();
        Self::walk(
            &resolve(env, base),
            Path::new(base),
            &pattern.to_lowercase(),
            &mut matches,
        );

        if matches.is_empty() {
            out.info(&format!("No matches found for: {}", pattern));
            return Ok(None);
        }

        for path in &matches {
            out.output(&path.display().to_string());
        }
        out.info("");
        out.info(&format!("Found {} match(es)", matches.len()));
        Ok(None)
    }
}

#[derive(Clone)]
pub struct SizeCommand;

impl SizeCommand {
    fn total_size(path: &Path) -> u64 {
        let Ok(meta) = fs::symlink_metadata(path) else {
            return 0;
        };
        if !meta.is_dir() {
            return fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        }

        fs::read_dir(path)
            .map(|entries| {
                entries
                    .filter_map(Result::ok)
                    .map(|entry| Self::total_size(&entry.path()))
                    .sum()
            })
            .unwrap_or(0)
    }
}

impl Command for SizeCommand {
    fn execute(
        &self,
        args: &[String],
        env: &mut Environment,
        out: &mut dyn OutputSink,
    ) -> CommandResult {
        let Some(name) = args.first() else {
            return usage(out, "size PATH");
        };

        let bytes = Self::total_size(&resolve(env, name));
        out.output(&format!(
            "{}: {} ({} bytes)",
            name,
            format_size(bytes),
            group_thousands(bytes)
        ));
        Ok(None)
    }
}

pub(crate) fn format_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    for unit in ["B", "KB", "MB", "GB", "TB"] {
        if size < 1024.0 {
            return format!("{:.2} {}", size, unit);
        }
        size /= 1024.0;
    }
    format!("{:.2} PB", size)
}

pub(crate) fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

#[derive(Clone)]
pub struct TreeCommand;

impl TreeCommand {
    fn print_tree(
        dir: &Path,
        prefix: &str,
        depth: usize,
        out: &mut dyn OutputSink,
    ) -> std::io::Result<()> {
        if depth > TREE_MAX_DEPTH {
            return Ok(());
        }

        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::PermissionDenied => return Ok(()),
            Err(e) => return Err(e),
        };
        let mut names: Vec<_> = entries.filter_map(Result::ok).map(|e| e.file_name()).collect();
        names.sort();

        let count = names.len();
        for (i, name) in names.into_iter().enumerate() {
            let is_last = i + 1 == count;
            let connector = if is_last { "└── " } else { "├── " };
            out.output(&format!("{}{}{}", prefix, connector, name.to_string_lossy()));

            let child = dir.join(&name);
            if child.is_dir() {
                let extension = if is_last { "    " } else { "│   " };
                Self::print_tree(&child, &format!("{}{}", prefix, extension), depth + 1, out)?;
            }
        }
        Ok(())
    }
}

impl Command for TreeCommand {
    fn execute(
        &self,
        args: &[String],
        env: &mut Environment,
        out: &mut dyn OutputSink,
    ) -> CommandResult {
        let root = resolve(env, args.first().map(String::as_str).unwrap_or("."));
        out.output(&root.display().to_string());
        Self::print_tree(&root, "", 0, out).context("tree")?;
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::CommandError;
    use crate::output::BufferSink;

    fn setup() -> (tempfile::TempDir, Environment, BufferSink) {
        let dir = tempfile::tempdir().unwrap();
        let env = Environment::with_dir(dir.path());
        (dir, env, BufferSink::new())
    }

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_ls_sorted_and_tagged() {
        let (dir, mut env, mut out) = setup();
        fs::create_dir(dir.path().join("zeta")).unwrap();
        fs::write(dir.path().join("alpha.txt"), "a").unwrap();

        LsCommand.execute(&[], &mut env, &mut out).unwrap();
        assert_eq!(
            out.lines(),
            &[
                ("[FILE] alpha.txt".to_string(), OutputStyle::Output),
                ("[DIR]  zeta".to_string(), OutputStyle::Directory),
            ]
        );
    }

    #[test]
    fn test_ls_empty_and_missing() {
        let (_dir, mut env, mut out) = setup();
        LsCommand.execute(&[], &mut env, &mut out).unwrap();
        assert_eq!(out.texts(), vec!["Directory is empty"]);

        let result = LsCommand.execute(&args(&["missing"]), &mut env, &mut out);
        assert!(matches!(result, Err(CommandError::Io { command: "ls", .. })));
    }

    #[test]
    fn test_mkdir_touch_rm_rmdir() {
        let (dir, mut env, mut out) = setup();

        MkdirCommand.execute(&args(&["a/b"]), &mut env, &mut out).unwrap();
        assert!(dir.path().join("a/b").is_dir());

        TouchCommand.execute(&args(&["a/file.txt"]), &mut env, &mut out).unwrap();
        assert!(dir.path().join("a/file.txt").is_file());

        RmCommand.execute(&args(&["a"]), &mut env, &mut out).unwrap();
        RmCommand.execute(&args(&["a/file.txt"]), &mut env, &mut out).unwrap();
        RmCommand.execute(&args(&["a/file.txt"]), &mut env, &mut out).unwrap();
        assert!(!dir.path().join("a/file.txt").exists());

        RmdirCommand.execute(&args(&["nothing"]), &mut env, &mut out).unwrap();
        RmdirCommand.execute(&args(&["a"]), &mut env, &mut out).unwrap();
        assert!(!dir.path().join("a").exists());

        assert_eq!(
            out.texts(),
            vec![
                "Directory created: a/b",
                "File created: a/file.txt",
                "rm: is a directory: a (use rmdir)",
                "File deleted: a/file.txt",
                "rm: file does not exist: a/file.txt",
                "rmdir: not a directory: nothing",
                "Directory deleted: a",
            ]
        );
    }

    #[test]
    fn test_usage_lines() {
        let (_dir, mut env, mut out) = setup();
        RenameCommand.execute(&args(&["only"]), &mut env, &mut out).unwrap();
        CopyCommand.execute(&[], &mut env, &mut out).unwrap();
        FindCommand.execute(&[], &mut env, &mut out).unwrap();
        assert_eq!(
            out.with_style(OutputStyle::Error),
            vec![
                "Usage: rename OLD_NAME NEW_NAME",
                "Usage: cp SOURCE DESTINATION",
                "Usage: find [PATH] PATTERN",
            ]
        );
    }

    #[test]
    fn test_rename() {
        let (dir, mut env, mut out) = setup();
        fs::write(dir.path().join("old.txt"), "x").unwrap();

        RenameCommand
            .execute(&args(&["old.txt", "new.txt"]), &mut env, &mut out)
            .unwrap();
        assert!(dir.path().join("new.txt").exists());
        assert_eq!(out.texts(), vec!["Renamed: old.txt -> new.txt"]);
    }

    #[test]
    fn test_copy_file_and_tree() {
        let (dir, mut env, mut out) = setup();
        fs::create_dir_all(dir.path().join("src/inner")).unwrap();
        fs::write(dir.path().join("src/inner/f.txt"), "data").unwrap();
        fs::write(dir.path().join("one.txt"), "1").unwrap();

        CopyCommand.execute(&args(&["one.txt", "two.txt"]), &mut env, &mut out).unwrap();
        CopyCommand.execute(&args(&["src", "dst"]), &mut env, &mut out).unwrap();
        CopyCommand.execute(&args(&["ghost", "x"]), &mut env, &mut out).unwrap();

        assert_eq!(fs::read_to_string(dir.path().join("two.txt")).unwrap(), "1");
        assert_eq!(
            fs::read_to_string(dir.path().join("dst/inner/f.txt")).unwrap(),
            "data"
        );
        assert_eq!(out.with_style(OutputStyle::Error), vec!["cp: source does not exist: ghost"]);

        let result = CopyCommand.execute(&args(&["src", "dst"]), &mut env, &mut out);
        assert!(result.is_err());
    }

    #[test]
    fn test_find_case_insensitive() {
        let (dir, mut env, mut out) = setup();
        fs::create_dir_all(dir.path().join("Notes/old")).unwrap();
        fs::write(dir.path().join("Notes/old/NOTE.md"), "").unwrap();
        fs::write(dir.path().join("other.txt"), "").unwrap();

        FindCommand.execute(&args(&["note"]), &mut env, &mut out).unwrap();
        assert_eq!(
            out.texts(),
            vec!["./Notes", "./Notes/old/NOTE.md", "", "Found 2 match(es)"]
        );

        out.clear();
        FindCommand.execute(&args(&["Notes", "zzz"]), &mut env, &mut out).unwrap();
        assert_eq!(out.texts(), vec!["No matches found for: zzz"]);
    }

    #[test]
    fn test_size() {
        let (dir, mut env, mut out) = setup();
        fs::create_dir(dir.path().join("d")).unwrap();
        fs::write(dir.path().join("d/a"), vec![0u8; 1000]).unwrap();
        fs::write(dir.path().join("d/b"), vec![0u8; 536]).unwrap();

        SizeCommand.execute(&args(&["d"]), &mut env, &mut out).unwrap();
        SizeCommand.execute(&args(&["missing"]), &mut env, &mut out).unwrap();
        assert_eq!(
            out.texts(),
            vec!["d: 1.50 KB (1,536 bytes)", "missing: 0.00 B (0 bytes)"]
        );
    }

    #[test]
    fn test_size_formatting() {
        assert_eq!(format_size(0), "0.00 B");
        assert_eq!(format_size(1023), "1023.00 B");
        assert_eq!(format_size(1024 * 1024), "1.00 MB");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_tree() {
        let (dir, mut env, mut out) = setup();
        fs::create_dir_all(dir.path().join("a/b")).unwrap();
        fs::write(dir.path().join("a/b/c.txt"), "").unwrap();
        fs::write(dir.path().join("z.txt"), "").unwrap();

        TreeCommand.execute(&[], &mut env, &mut out).unwrap();
        let texts = out.texts();
        assert_eq!(
            &texts[1..],
            &["├── a", "│   └── b", "│       └── c.txt", "└── z.txt"]
        );
    }

    #[test]
    fn test_tree_depth_limit() {
        let (dir, mut env, mut out) = setup();
        fs::create_dir_all(dir.path().join("1/2/3/4/5")).unwrap();

        TreeCommand.execute(&[], &mut env, &mut out).unwrap();
        assert_eq!(out.lines().len(), 5);
        assert!(out.texts()[4].ends_with("4"));
    }
}
