//! Up/Down recall driven by the session history rather than the line
//! editor's own.

use std::sync::{Arc, Mutex, MutexGuard};

use rustyline::{
    Cmd, ConditionalEventHandler, Event, EventContext, KeyCode, KeyEvent, Modifiers, Movement,
    RepeatCount,
};

use crate::core::env::History;

/// Mirror of the session history plus the recall cursor. Key handlers run
/// inside the editor and need shared ownership.
#[derive(Debug, Default)]
pub struct Navigation {
    history: History,
    cursor: usize,
}

#[derive(Clone, Debug, Default)]
pub struct NavState {
    inner: Arc<Mutex<Navigation>>,
}

impl NavState {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Navigation> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Copies the session history and parks the cursor past the newest entry.
    pub fn sync(&self, history: &History) {
        let mut nav = self.lock();
        nav.history = history.clone();
        nav.cursor = nav.history.end();
    }

    /// Appends one recorded line and parks the cursor past it.
    pub fn push(&self, entry: &str) {
        let mut nav = self.lock();
        nav.history.add(entry);
        nav.cursor = nav.history.end();
    }

    pub fn cursor(&self) -> usize {
        self.lock().cursor
    }

    /// Moves the cursor one step and returns the text the edit line should
    /// show. `None` means the history is empty and the line stays as is.
    pub fn step(&self, direction: Direction) -> Option<String> {
        let mut nav = self.lock();
        let (cursor, entry) = match direction {
            Direction::Older => nav.history.move_older(nav.cursor),
            Direction::Newer => nav.history.move_newer(nav.cursor),
        };
        let text = match (direction, entry) {
            (_, Some(entry)) => Some(entry.to_string()),
            (Direction::Newer, None) if !nav.history.is_empty() => Some(String::new()),
            _ => None,
        };
        nav.cursor = cursor;
        text
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Older,
    Newer,
}

impl Direction {
    pub fn key(self) -> KeyEvent {
        match self {
            Direction::Older => KeyEvent(KeyCode::Up, Modifiers::NONE),
            Direction::Newer => KeyEvent(KeyCode::Down, Modifiers::NONE),
        }
    }
}

pub struct HistoryNavigator {
    state: NavState,
    direction: Direction,
}

impl HistoryNavigator {
    pub fn new(state: NavState, direction: Direction) -> Self {
        Self { state, direction }
    }
}

impl ConditionalEventHandler for HistoryNavigator {
    fn handle(
        &self,
        _evt: &Event,
        _n: RepeatCount,
        _positive: bool,
        _ctx: &EventContext,
    ) -> Option<Cmd> {
        let text = self.state.step(self.direction)?;
        Some(Cmd::Replace(Movement::WholeLine, Some(text)))
    }
}
