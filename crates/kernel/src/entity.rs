use burnout_common::{CameraOffset, Direction, GridRect};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::viewport::ViewportTracker;

/// Record of one accepted move.
///
/// Rejected moves leave no record; the history only ever describes state
/// changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveEvent {
    pub direction: Direction,
    pub from: GridRect,
    pub to: GridRect,
    /// Camera offset after the move.
    pub offset: CameraOffset,
}

/// Accepted moves kept by default. Older events are dropped first.
pub const DEFAULT_HISTORY_LIMIT: usize = 1024;

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

/// The avatar's grid position and the accumulated camera offset.
///
/// Created once when the avatar is defined and owned by the input
/// dispatcher afterwards. The offset is never reset.
///
/// The move history is a bounded ring: once it holds `history_limit`
/// events the oldest is dropped for each new one. Hosts that need the full
/// record drain it with [`drain_history`](Self::drain_history).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityState {
    position: GridRect,
    camera_offset: CameraOffset,
    #[serde(skip)]
    history: VecDeque<MoveEvent>,
    #[serde(skip, default = "default_history_limit")]
    history_limit: usize,
}

impl EntityState {
    /// New state at `start` with a zero camera offset.
    pub fn new(start: GridRect) -> Self {
        Self {
            position: start,
            camera_offset: CameraOffset::ZERO,
            history: VecDeque::new(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Keep at most `limit` events. Zero disables recording.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self.trim_history();
        self
    }

    pub fn position(&self) -> GridRect {
        self.position
    }

    pub fn camera_offset(&self) -> CameraOffset {
        self.camera_offset
    }

    /// Retained accepted moves, oldest first.
    pub fn history(&self) -> &VecDeque<MoveEvent> {
        &self.history
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    /// Drain and return the move history.
    pub fn drain_history(&mut self) -> Vec<MoveEvent> {
        self.history.drain(..).collect()
    }

    fn trim_history(&mut self) {
        while self.history.len() > self.history_limit {
            self.history.pop_front();
        }
    }

    fn record(&mut self, event: MoveEvent) {
        if self.history_limit == 0 {
            return;
        }
        self.history.push_back(event);
        self.trim_history();
    }

    /// Commit an accepted move: replace the position, scroll the viewport and
    /// record the event.
    ///
    /// Returns `None` and changes nothing when the scrolled offset does not
    /// fit in `i32`.
    pub fn commit(
        &mut self,
        direction: Direction,
        to: GridRect,
        viewport: &ViewportTracker,
    ) -> Option<MoveEvent> {
        let offset = viewport.scrolled(self.camera_offset, direction)?;
        let event = MoveEvent {
            direction,
            from: self.position,
            to,
            offset,
        };
        self.position = to;
        self.camera_offset = offset;
        self.record(event);
        Some(event)
    }

    /// Rebuild a state from its start position and a move history.
    ///
    /// Events carry absolute positions and offsets, so a trimmed tail of the
    /// history still yields the same final state.
    pub fn replay<'a>(start: GridRect, events: impl IntoIterator<Item = &'a MoveEvent>) -> Self {
        let mut state = Self::new(start);
        for event in events {
            state.position = event.to;
            state.camera_offset = event.offset;
            state.record(*event);
        }
        state
    }

    /// FNV-1a hash of position and offset, for cheap comparison.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325;
        let mut mix = |v: i32| {
            for b in v.to_le_bytes() {
                h ^= b as u64;
                h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        mix(self.position.row_start);
        mix(self.position.col_start);
        mix(self.position.row_end);
        mix(self.position.col_end);
        mix(self.camera_offset.x);
        mix(self.camera_offset.y);
        h
    }
}
