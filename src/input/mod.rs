mod completer;
mod navigation;

pub use completer::ShellCompleter;
pub use navigation::{Direction, HistoryNavigator, NavState};
