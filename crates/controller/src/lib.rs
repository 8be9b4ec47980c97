//! Game Controller: builds the obstacle set, places the avatar and attaches
//! the input dispatcher, in that order.
//!
//! # Invariants
//! - Setup order is enforced by types: blocks, then avatar, then controls.
//!   There is no way to obtain a dispatcher before the avatar exists, or to
//!   add a block after it does.
//! - Configuration is validated once, at setup. Gameplay never errors.
//! - A missing keyboard map leaves the game inert rather than failing.

pub mod config;
pub mod error;
pub mod setup;

pub use config::{AvatarConfig, ControlsConfig, GameConfig, MapConfig};
pub use error::{ConfigError, SetupError};
pub use setup::{AvatarPlaced, Blocks, Game, GameController, Setup};

pub fn crate_info() -> &'static str {
    "burnout-controller v0.1.0"
}
