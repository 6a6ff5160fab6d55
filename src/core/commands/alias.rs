use super::{usage, Command, CommandResult};
use crate::core::env::Environment;
use crate::output::OutputSink;

#[derive(Clone)]
pub struct AliasCommand;

impl Command for AliasCommand {
    fn execute(
        &self,
        args: &[String],
        env: &mut Environment,
        out: &mut dyn OutputSink,
    ) -> CommandResult {
        match args {
            [] => {
                if env.aliases().is_empty() {
                    out.info("No aliases defined");
                }
                for (name, command) in env.aliases().iter() {
                    out.output(&format!("{}='{}'", name, command));
                }
            }
            [name] => match env.aliases().get(name) {
                Some(command) => out.output(&format!("{}='{}'", name, command)),
                None => out.info(&format!("Alias not found: {}", name)),
            },
            [name, rest @ ..] => {
                let command = rest.join(" ");
                env.aliases_mut().add(name, &command);
                out.success(&format!("Alias created: {}='{}'", name, command));
            }
        }
        Ok(None)
    }
}

#[derive(Clone)]
pub struct UnaliasCommand;

impl Command for UnaliasCommand {
    fn execute(
        &self,
        args: &[String],
        env: &mut Environment,
        out: &mut dyn OutputSink,
    ) -> CommandResult {
        let Some(name) = args.first() else {
            return usage(out, "unalias NAME");
        };

        match env.aliases_mut().remove(name) {
            Some(_) => out.success(&format!("Alias removed: {}", name)),
            None => out.info(&format!("Alias not found: {}", name)),
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{BufferSink, OutputStyle};

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_alias_add() {
        let mut env = Environment::with_dir("/");
        let mut out = BufferSink::new();

        AliasCommand
            .execute(&args(&["ll", "ls", "-la"]), &mut env, &mut out)
            .unwrap();

        assert_eq!(env.aliases().get("ll"), Some("ls -la"));
        assert_eq!(
            out.lines(),
            &[("Alias created: ll='ls -la'".to_string(), OutputStyle::Success)]
        );
    }

    #[test]
    fn test_alias_list() {
        let mut env = Environment::with_dir("/");
        let mut out = BufferSink::new();

        AliasCommand.execute(&[], &mut env, &mut out).unwrap();
        assert_eq!(out.texts(), vec!["No aliases defined"]);

        env.aliases_mut().add("gs", "git status");
        env.aliases_mut().add("ll", "ls -la");
        out.clear();
        AliasCommand.execute(&[], &mut env, &mut out).unwrap();
        assert_eq!(out.texts(), vec!["gs='git status'", "ll='ls -la'"]);
    }

    #[test]
    fn test_alias_show_one() {
        let mut env = Environment::with_dir("/");
        let mut out = BufferSink::new();
        env.aliases_mut().add("ll", "ls -la");

        AliasCommand.execute(&args(&["ll"]), &mut env, &mut out).unwrap();
        AliasCommand.execute(&args(&["nope"]), &mut env, &mut out).unwrap();
        assert_eq!(out.texts(), vec!["ll='ls -la'", "Alias not found: nope"]);
    }

    #[test]
    fn test_unalias() {
        let mut env = Environment::with_dir("/");
        let mut out = BufferSink::new();
        env.aliases_mut().add("ll", "ls -la");

        UnaliasCommand.execute(&args(&["ll"]), &mut env, &mut out).unwrap();
        assert!(env.aliases().is_empty());

        UnaliasCommand.execute(&[], &mut env, &mut out).unwrap();
        assert_eq!(out.with_style(OutputStyle::Error), vec!["Usage: unalias NAME"]);
    }
}
