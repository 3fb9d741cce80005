//! TUI Dice (workspace facade crate).
//!
//! Re-exports the workspace crates as `tui_dice::{core,input,term,types}` and
//! hosts the runner configuration shared by the binary and the tests.

pub mod config;

pub use tui_dice_core as core;
pub use tui_dice_input as input;
pub use tui_dice_term as term;
pub use tui_dice_types as types;
