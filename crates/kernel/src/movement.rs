//! One-cell movement transforms. Pure geometry: no obstacle or bounds checks.
//!
//! Each transform returns `None` when the step would take a coordinate past
//! the `i32` range; such a cell cannot be represented and is never entered.

use burnout_common::{Direction, GridRect};

pub fn move_up(rect: &GridRect) -> Option<GridRect> {
    rect.translated(-1, 0)
}

pub fn move_down(rect: &GridRect) -> Option<GridRect> {
    rect.translated(1, 0)
}

pub fn move_left(rect: &GridRect) -> Option<GridRect> {
    rect.translated(0, -1)
}

pub fn move_right(rect: &GridRect) -> Option<GridRect> {
    rect.translated(0, 1)
}

/// The candidate region one step from `rect` in `direction`.
pub fn resolve(direction: Direction, rect: &GridRect) -> Option<GridRect> {
    match direction {
        Direction::Up => move_up(rect),
        Direction::Down => move_down(rect),
        Direction::Left => move_left(rect),
        Direction::Right => move_right(rect),
    }
}
