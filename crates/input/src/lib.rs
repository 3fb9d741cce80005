//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] plus the
//! front-end commands that never reach the game (hint toggle, quit).

pub mod map;

pub use tui_dice_types as types;

pub use map::{handle_key_event, is_hint_toggle, should_quit};
