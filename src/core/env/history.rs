/// Lines typed during the session, oldest first. Append-only.
#[derive(Clone, Debug, Default)]
pub struct History {
    entries: Vec<String>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: &str) {
        self.entries.push(entry.to_owned());
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cursor position for fresh input: one past the newest entry.
    pub fn end(&self) -> usize {
        self.entries.len()
    }

    /// Steps the cursor toward older entries. Stops at the oldest entry and
    /// keeps returning it.
    pub fn move_older(&self, cursor: usize) -> (usize, Option<&str>) {
        if self.entries.is_empty() {
            return (0, None);
        }
        let index = cursor.min(self.entries.len()).saturating_sub(1);
        (index, Some(self.entries[index].as_str()))
    }

    /// Steps the cursor toward newer entries. Past the newest entry the
    /// cursor parks at `end()` with no entry, meaning empty input.
    pub fn move_newer(&self, cursor: usize) -> (usize, Option<&str>) {
        let next = cursor.saturating_add(1);
        if next < self.entries.len() {
            (next, Some(self.entries[next].as_str()))
        } else {
            (self.entries.len(), None)
        }
    }
}
