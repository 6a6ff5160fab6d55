use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

mod alias;
mod builtin;
mod calc;
mod cd;
mod env;
mod files;
mod history;
mod system;
mod text;

pub use alias::{AliasCommand, UnaliasCommand};
pub use builtin::{ClearCommand, EchoCommand, ExitCommand, HelpCommand, SleepCommand};
pub use calc::CalcCommand;
pub use cd::{CdCommand, PwdCommand};
pub use env::EnvCommand;
pub use files::{
    CopyCommand, FindCommand, LsCommand, MkdirCommand, RenameCommand, RmCommand, RmdirCommand,
    SizeCommand, TouchCommand, TreeCommand,
};
pub use history::{HistoryCommand, LastCommand};
pub use system::{DateCommand, UnameCommand, WhoamiCommand};
pub use text::{
    CmpCommand, DiffCommand, GrepCommand, HeadCommand, ReadCommand, ReplaceCommand, TailCommand,
    WcCommand, WriteCommand,
};

use crate::core::dispatch::ControlSignal;
use crate::core::env::{EnvError, Environment};
use crate::output::OutputSink;

#[derive(Debug)]
pub enum CommandError {
    ExecutionError(String),
    Io {
        command: &'static str,
        source: std::io::Error,
    },
    EnvError(EnvError),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::ExecutionError(msg) => write!(f, "{}", msg),
            CommandError::Io { command, source } => write!(f, "{}: {}", command, source),
            CommandError::EnvError(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CommandError::Io { source, .. } => Some(source),
            CommandError::EnvError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<EnvError> for CommandError {
    fn from(e: EnvError) -> Self {
        CommandError::EnvError(e)
    }
}

/// Tags an I/O failure with the command that hit it.
pub(crate) trait IoContext<T> {
    fn context(self, command: &'static str) -> Result<T, CommandError>;
}

impl<T> IoContext<T> for std::io::Result<T> {
    fn context(self, command: &'static str) -> Result<T, CommandError> {
        self.map_err(|source| CommandError::Io { command, source })
    }
}

pub type CommandResult = Result<Option<ControlSignal>, CommandError>;

pub trait Command {
    fn execute(
        &self,
        args: &[String],
        env: &mut Environment,
        out: &mut dyn OutputSink,
    ) -> CommandResult;
}

#[derive(Clone)]
pub enum CommandType {
    Help(HelpCommand),
    Echo(EchoCommand),
    Clear(ClearCommand),
    Exit(ExitCommand),
    Sleep(SleepCommand),
    Cd(CdCommand),
    Pwd(PwdCommand),
    Alias(AliasCommand),
    Unalias(UnaliasCommand),
    Env(EnvCommand),
    History(HistoryCommand),
    Last(LastCommand),
    Ls(LsCommand),
    Mkdir(MkdirCommand),
    Rmdir(RmdirCommand),
    Touch(TouchCommand),
    Rm(RmCommand),
    Rename(RenameCommand),
    Copy(CopyCommand),
    Find(FindCommand),
    Size(SizeCommand),
    Tree(TreeCommand),
    Read(ReadCommand),
    Write(WriteCommand),
    Head(HeadCommand),
    Tail(TailCommand),
    Wc(WcCommand),
    Grep(GrepCommand),
    Replace(ReplaceCommand),
    Diff(DiffCommand),
    Cmp(CmpCommand),
    Date(DateCommand),
    Whoami(WhoamiCommand),
    Uname(UnameCommand),
    Calc(CalcCommand),
    /// A command supplied by the embedding front end.
    External(Rc<dyn Command>),
}

impl Command for CommandType {
    fn execute(
        &self,
        args: &[String],
        env: &mut Environment,
        out: &mut dyn OutputSink,
    ) -> CommandResult {
        match self {
            CommandType::Help(cmd) => cmd.execute(args, env, out),
            CommandType::Echo(cmd) => cmd.execute(args, env, out),
            CommandType::Clear(cmd) => cmd.execute(args, env, out),
            CommandType::Exit(cmd) => cmd.execute(args, env, out),
            CommandType::Sleep(cmd) => cmd.execute(args, env, out),
            CommandType::Cd(cmd) => cmd.execute(args, env, out),
            CommandType::Pwd(cmd) => cmd.execute(args, env, out),
            CommandType::Alias(cmd) => cmd.execute(args, env, out),
            CommandType::Unalias(cmd) => cmd.execute(args, env, out),
            CommandType::Env(cmd) => cmd.execute(args, env, out),
            CommandType::History(cmd) => cmd.execute(args, env, out),
            CommandType::Last(cmd) => cmd.execute(args, env, out),
            CommandType::Ls(cmd) => cmd.execute(args, env, out),
            CommandType::Mkdir(cmd) => cmd.execute(args, env, out),
            CommandType::Rmdir(cmd) => cmd.execute(args, env, out),
            CommandType::Touch(cmd) => cmd.execute(args, env, out),
            CommandType::Rm(cmd) => cmd.execute(args, env, out),
            CommandType::Rename(cmd) => cmd.execute(args, env, out),
            CommandType::Copy(cmd) => cmd.execute(args, env, out),
            CommandType::Find(cmd) => cmd.execute(args, env, out),
            CommandType::Size(cmd) => cmd.execute(args, env, out),
            CommandType::Tree(cmd) => cmd.execute(args, env, out),
            CommandType::Read(cmd) => cmd.execute(args, env, out),
            CommandType::Write(cmd) => cmd.execute(args, env, out),
            CommandType::Head(cmd) => cmd.execute(args, env, out),
            CommandType::Tail(cmd) => cmd.execute(args, env, out),
            CommandType::Wc(cmd) => cmd.execute(args, env, out),
            CommandType::Grep(cmd) => cmd.execute(args, env, out),
            CommandType::Replace(cmd) => cmd.execute(args, env, out),
            CommandType::Diff(cmd) => cmd.execute(args, env, out),
            CommandType::Cmp(cmd) => cmd.execute(args, env, out),
            CommandType::Date(cmd) => cmd.execute(args, env, out),
            CommandType::Whoami(cmd) => cmd.execute(args, env, out),
            CommandType::Uname(cmd) => cmd.execute(args, env, out),
            CommandType::Calc(cmd) => cmd.execute(args, env, out),
            CommandType::External(cmd) => cmd.execute(args, env, out),
        }
    }
}

/// Name to command table consulted by the dispatcher. Names are stored
/// lowercased; synonyms are separate entries.
#[derive(Clone, Default)]
pub struct CommandRegistry {
    commands: BTreeMap<String, CommandType>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtins() -> Self {
        let mut registry = Self::new();

        registry.register("help", CommandType::Help(HelpCommand));
        registry.register("echo", CommandType::Echo(EchoCommand));
        registry.register_all(&["clear", "cls"], CommandType::Clear(ClearCommand));
        registry.register_all(&["exit", "quit"], CommandType::Exit(ExitCommand));
        registry.register("sleep", CommandType::Sleep(SleepCommand));

        registry.register("cd", CommandType::Cd(CdCommand::new()));
        registry.register("pwd", CommandType::Pwd(PwdCommand));
        registry.register("alias", CommandType::Alias(AliasCommand));
        registry.register("unalias", CommandType::Unalias(UnaliasCommand));
        registry.register("env", CommandType::Env(EnvCommand));
        registry.register("history", CommandType::History(HistoryCommand));
        registry.register("last", CommandType::Last(LastCommand));

        registry.register_all(&["ls", "dir"], CommandType::Ls(LsCommand));
        registry.register("mkdir", CommandType::Mkdir(MkdirCommand));
        registry.register("rmdir", CommandType::Rmdir(RmdirCommand));
        registry.register("touch", CommandType::Touch(TouchCommand));
        registry.register_all(&["rm", "del"], CommandType::Rm(RmCommand));
        registry.register_all(&["rename", "mv"], CommandType::Rename(RenameCommand));
        registry.register_all(&["cp", "copy"], CommandType::Copy(CopyCommand));
        registry.register_all(&["find", "search"], CommandType::Find(FindCommand));
        registry.register("size", CommandType::Size(SizeCommand));
        registry.register("tree", CommandType::Tree(TreeCommand));

        registry.register_all(&["read", "cat", "type"], CommandType::Read(ReadCommand));
        registry.register("write", CommandType::Write(WriteCommand::truncate()));
        registry.register("append", CommandType::Write(WriteCommand::append()));
        registry.register("head", CommandType::Head(HeadCommand));
        registry.register("tail", CommandType::Tail(TailCommand));
        registry.register("wc", CommandType::Wc(WcCommand));
        registry.register("grep", CommandType::Grep(GrepCommand));
        registry.register("replace", CommandType::Replace(ReplaceCommand));
        registry.register("diff", CommandType::Diff(DiffCommand));
        registry.register("cmp", CommandType::Cmp(CmpCommand));

        registry.register("date", CommandType::Date(DateCommand));
        registry.register("whoami", CommandType::Whoami(WhoamiCommand));
        registry.register("uname", CommandType::Uname(UnameCommand));
        registry.register("calc", CommandType::Calc(CalcCommand));

        registry
    }

    /// Adds or replaces a command under `name` (stored lowercased).
    pub fn register(&mut self, name: &str, command: CommandType) {
        self.commands.insert(name.to_lowercase(), command);
    }

    pub fn register_all(&mut self, names: &[&str], command: CommandType) {
        for name in names {
            self.register(name, command.clone());
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommandType> {
        self.commands.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Emits a usage line and finishes the command without a signal.
pub(crate) fn usage(out: &mut dyn OutputSink, text: &str) -> CommandResult {
    out.error(&format!("Usage: {}", text));
    Ok(None)
}
