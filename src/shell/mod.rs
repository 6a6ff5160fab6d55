use log::{debug, warn};
use rustyline::{
    config::Configurer, error::ReadlineError, history::DefaultHistory, Editor, EventHandler,
};

mod console;
mod session;

pub use console::Console;
pub use session::{Flow, Session};

use crate::{
    core::{
        commands::CommandRegistry,
        config::{ConfigError, ConfigPaths},
        env::Environment,
    },
    error::ShellError,
    flags::Flags,
    highlight::SyntaxHighlighter,
    input::{Direction, HistoryNavigator, ShellCompleter},
    output::OutputSink,
    path::PathExpander,
};

const PROMPT: &str = "cinder> ";

pub struct Shell {
    pub(crate) editor: Editor<ShellCompleter, DefaultHistory>,
    pub(crate) session: Session,
    pub(crate) console: Console,
    pub(crate) expander: PathExpander,
    pub(crate) flags: Flags,
}

impl Shell {
    pub fn new(flags: Flags) -> Result<Self, ShellError> {
        let mut session = Session::new(CommandRegistry::with_builtins(), Environment::new()?);
        let mut console = Console::new(SyntaxHighlighter::new());

        let paths = match flags.get_value("config") {
            Some(path) => Some(ConfigPaths::explicit(path)),
            None => match ConfigPaths::new() {
                Ok(paths) => Some(paths),
                Err(ConfigError::HomeDirNotFound) => {
                    warn!("no home directory; skipping rc file");
                    None
                }
                Err(e) => return Err(e.into()),
            },
        };
        if let Some(paths) = paths {
            let count = session.load_rc(&paths, &mut console)?;
            debug!("ran {} rc line(s) from {}", count, paths.rc_path.display());
        }

        let mut editor = Editor::<ShellCompleter, DefaultHistory>::new()?;
        let mut helper = ShellCompleter::new(session.registry());
        helper.update_aliases(session.env().aliases());
        editor.set_helper(Some(helper));
        editor.set_auto_add_history(false);
        for direction in [Direction::Older, Direction::Newer] {
            let navigator = HistoryNavigator::new(session.nav().clone(), direction);
            editor.bind_sequence(direction.key(), EventHandler::Conditional(Box::new(navigator)));
        }

        // Fires while a command blocks; at the prompt the editor reports
        // Ctrl-C as `Interrupted` instead.
        ctrlc::set_handler(move || {
            println!("\nUse 'exit' to leave cinder");
        })?;

        Ok(Shell {
            editor,
            session,
            console,
            expander: PathExpander::new(),
            flags,
        })
    }

    pub fn run(&mut self) -> Result<(), ShellError> {
        if let Some(line) = self.flags.get_value("execute") {
            self.session.submit(line, &mut self.console);
            return Ok(());
        }

        if !self.flags.is_set("quiet") {
            self.show_banner();
        }

        loop {
            if let Some(helper) = self.editor.helper_mut() {
                helper.update_aliases(self.session.env().aliases());
            }

            match self.editor.readline(PROMPT) {
                Ok(line) => match self.session.submit(&line, &mut self.console) {
                    Flow::Continue => {}
                    Flow::Clear => {
                        self.console.clear_screen();
                        self.show_banner();
                    }
                    Flow::Exit => break,
                },
                Err(ReadlineError::Interrupted) => {
                    self.console.info("Use 'exit' to leave cinder");
                }
                Err(ReadlineError::Eof) => break,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    fn show_banner(&mut self) {
        let dir = self.expander.contract(self.session.env().current_dir());
        self.console.banner(&dir);
    }
}
