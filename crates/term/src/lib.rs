//! Terminal rendering for the dice puzzle.
//!
//! Rendering goes through a plain framebuffer rather than a widget toolkit:
//! [`GameView`] paints a [`core::GameSnapshot`](crate::core::GameSnapshot)
//! into a [`FrameBuffer`], and [`TerminalRenderer`] flushes it with
//! `crossterm`, rewriting only the glyphs that changed since the last frame.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_dice_core as core;
pub use tui_dice_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
