//! Display window: how many leading results are revealed.
//!
//! Pagination is by reveal, not by re-querying. The window only tracks a
//! count; the results themselves come from a `QuerySet`.

use serde::{Deserialize, Serialize};

/// Rows revealed before any "load more"
pub const DEFAULT_INITIAL: usize = 1000;

/// Rows added by each "load more"
pub const DEFAULT_STEP: usize = 12;

/// Display-count cursor over an ordered result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayWindow {
    initial: usize,
    step: usize,
    shown: usize,
}

impl Default for DisplayWindow {
    fn default() -> Self {
        Self::new(DEFAULT_INITIAL)
    }
}

impl DisplayWindow {
    /// Window revealing `initial` rows, growing by the default step
    pub fn new(initial: usize) -> Self {
        Self {
            initial,
            step: DEFAULT_STEP,
            shown: initial,
        }
    }

    /// Builder: rows added per `load_more`
    pub fn step(mut self, step: usize) -> Self {
        self.step = step;
        self
    }

    /// Current reveal count (may exceed the result length)
    pub fn shown(&self) -> usize {
        self.shown
    }

    /// Reveal one more step
    pub fn load_more(&mut self) {
        self.shown = self.shown.saturating_add(self.step);
    }

    /// Back to the initial count, as after any filter change
    pub fn reset(&mut self) {
        self.shown = self.initial;
    }

    /// Leading revealed slice of `items`
    pub fn visible<'s, T>(&self, items: &'s [T]) -> &'s [T] {
        &items[..self.shown.min(items.len())]
    }

    /// Whether a list of `len` results has rows still hidden
    pub fn has_more(&self, len: usize) -> bool {
        self.shown < len
    }
}
