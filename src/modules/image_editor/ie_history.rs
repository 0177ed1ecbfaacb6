/// Linear undo history. The last entry is always the image on screen, and
/// `undo` never removes the first one.
#[derive(Debug, Clone)]
pub struct HistoryStack<T> { entries: Vec<T> }

impl<T> Default for HistoryStack<T> {
    fn default() -> Self { Self { entries: Vec::new() } }
}

impl<T> HistoryStack<T> {
    pub fn new() -> Self { Self::default() }

    /// Starts a fresh history holding only `original`.
    pub fn reset(&mut self, original: T) {
        self.entries.clear();
        self.entries.push(original);
    }

    pub fn push(&mut self, item: T) { self.entries.push(item); }

    /// Drops the newest entry. Returns `false` (and does nothing) when only the
    /// original is left or nothing was loaded.
    pub fn undo(&mut self) -> bool {
        if self.entries.len() > 1 {
            self.entries.pop();
            true
        } else {
            false
        }
    }

    pub fn current(&self) -> Option<&T> { self.entries.last() }

    /// Entry an `undo` would reveal.
    pub fn previous(&self) -> Option<&T> {
        self.entries.len().checked_sub(2).and_then(|i| self.entries.get(i))
    }

    pub fn can_undo(&self) -> bool { self.entries.len() > 1 }
    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
    pub fn clear(&mut self) { self.entries.clear(); }
    pub fn iter(&self) -> impl Iterator<Item = &T> { self.entries.iter() }
}
