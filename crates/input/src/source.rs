use std::collections::VecDeque;

use crate::keymap::{KeyCode, KeyEvent};

/// Host-side event delivery. Events come out one at a time, in arrival order.
pub trait InputSource {
    /// Next pending key-down event, or `None` when the source is drained.
    fn next_key_down(&mut self) -> Option<KeyEvent>;
}

/// A fixed queue of key-down events, for replays, the CLI and tests.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    pending: VecDeque<KeyEvent>,
}

impl ScriptedInput {
    pub fn new(codes: impl IntoIterator<Item = KeyCode>) -> Self {
        Self {
            pending: codes.into_iter().map(KeyEvent::new).collect(),
        }
    }

    pub fn push(&mut self, code: KeyCode) {
        self.pending.push_back(KeyEvent::new(code));
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl InputSource for ScriptedInput {
    fn next_key_down(&mut self) -> Option<KeyEvent> {
        self.pending.pop_front()
    }
}
