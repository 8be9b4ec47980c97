//! Movement Kernel: collision detection, movement transforms, viewport scrolling
//! and the authoritative avatar state.
//!
//! # Invariants
//! - Movement transforms and collision tests are pure.
//! - The obstacle set is immutable once built.
//! - Avatar state changes only through `EntityState::commit`, and only for
//!   accepted moves.

pub mod bounds;
pub mod collision;
pub mod entity;
pub mod movement;
pub mod viewport;

pub use bounds::BoundsPolicy;
pub use collision::{ObstacleSet, was_bumped};
pub use entity::{DEFAULT_HISTORY_LIMIT, EntityState, MoveEvent};
pub use movement::{move_down, move_left, move_right, move_up, resolve};
pub use viewport::ViewportTracker;

pub fn crate_info() -> &'static str {
    "burnout-kernel v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("kernel"));
    }
}
