//! Shared grid types for the burnout movement engine.
//!
//! # Invariants
//! - Every `GridRect` satisfies `row_start <= row_end` and `col_start <= col_end`.
//! - The avatar and every obstacle occupy exactly one cell.

mod types;

pub use types::{Block, CameraOffset, Direction, GeometryError, GridExtent, GridRect};

pub fn crate_info() -> &'static str {
    "burnout-common v0.1.0"
}
