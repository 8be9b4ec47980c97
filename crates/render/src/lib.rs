//! Rendering Adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers receive structured values, never style strings.
//! - Renderers cannot mutate avatar or obstacle state.
//! - `set_entity_position` and `set_world_offset` arrive as a pair, once per
//!   accepted move.
//!
//! `DebugTextRenderer` draws the visible window as ASCII. It stands in for a
//! real visual backend; the trait is stable and a backend can be swapped in
//! without changing consumers.

mod renderer;

pub use renderer::{DebugTextRenderer, Placement, Renderer, SceneLayout};

pub fn crate_info() -> &'static str {
    "burnout-render v0.1.0"
}
