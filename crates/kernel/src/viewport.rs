use burnout_common::{CameraOffset, Direction};
use glam::IVec2;

/// Scrolls the world opposite to the avatar's motion.
///
/// The offset is in pixels: each accepted move shifts it by exactly one
/// `block_size` along the move's axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportTracker {
    block_size: i32,
}

impl ViewportTracker {
    pub fn new(block_size: i32) -> Self {
        Self { block_size }
    }

    pub fn block_size(&self) -> i32 {
        self.block_size
    }

    /// Offset change for one accepted step in `direction`.
    pub fn scroll_delta(&self, direction: Direction) -> Option<IVec2> {
        let (d_row, d_col) = direction.delta();
        Some(IVec2::new(
            d_col.checked_mul(self.block_size)?.checked_neg()?,
            d_row.checked_mul(self.block_size)?.checked_neg()?,
        ))
    }

    /// `offset` after one accepted step in `direction`. `None` when the
    /// result does not fit in `i32`; the move must then be refused.
    pub fn scrolled(&self, offset: CameraOffset, direction: Direction) -> Option<CameraOffset> {
        let delta = self.scroll_delta(direction)?;
        Some(IVec2::new(
            offset.x.checked_add(delta.x)?,
            offset.y.checked_add(delta.y)?,
        ))
    }
}
