//! Input: key-code mapping and the dispatcher that turns key-down events into
//! avatar moves.
//!
//! # Invariants
//! - Directions match in the fixed order up, down, left, right. On duplicate
//!   key codes the earlier direction wins.
//! - Each event runs to completion (ignore, reject or commit) before the next
//!   one is read.
//! - Rejected and ignored events change nothing and never reach the renderer.

pub mod dispatcher;
pub mod keymap;
pub mod source;

pub use dispatcher::{InputDispatcher, KeyHandler, MoveOutcome, RunSummary};
pub use keymap::{InputError, KeyCode, KeyEvent, KeyMap};
pub use source::{InputSource, ScriptedInput};

pub fn crate_info() -> &'static str {
    "burnout-input v0.1.0"
}
