//! Core puzzle logic - pure, deterministic, and testable
//!
//! This crate holds the rules of the rolling-die puzzle: the board and its
//! target cells, the die's orientation and roll state machine, and the game
//! loop that ties them together. It performs no I/O; the terminal front-end
//! drives it with player actions and fixed-step ticks.
//!
//! # Module Structure
//!
//! - [`board`]: grid, target registry and highlight classification
//! - [`cube`]: die position and the Idle/Rotating roll state machine
//! - [`orientation`]: face values and the roll permutation table
//! - [`game_state`]: collection progress, move counting and win detection
//! - [`hint`]: breadth-first search for the next target
//! - [`rng`]: injectable random source for layouts
//! - [`snapshot`]: plain-data view for renderers
//!
//! # Rules
//!
//! - The die starts in the centre cell with 1 on top, 6 on the bottom,
//!   3 left, 4 right, 2 front and 5 back.
//! - A roll tips the die one cell over an edge. Rolls that would leave the
//!   board are rejected, and so is any roll requested while one is in flight.
//! - Landing on a target with the target's value on top collects that value.
//!   Each value is collected at most once; collecting every target wins.
//!
//! # Example
//!
//! ```
//! use tui_dice_core::{Board, Cube, Game, SeededRng};
//! use tui_dice_types::{Direction, Position};
//!
//! let board = Board::with_targets(5, 5, &[(Position::new(1, 2), 4)]);
//! let cube = Cube::new(board.start_position());
//! let mut game = Game::new(board, cube, SeededRng::new(1));
//! game.start();
//!
//! assert!(game.move_cube(Direction::Left));
//! while !game.tick(9.0) {}
//!
//! assert_eq!(game.cube().top_value(), 4);
//! assert!(game.is_won());
//! ```
//!
//! # Timing
//!
//! A roll sweeps 90° and completes on the tick that reaches it. With the
//! default step of 9° and a 16ms tick that is ten ticks, about 160ms.
//! Call [`Game::tick`](game_state::Game::tick) once per frame.

pub mod board;
pub mod cube;
pub mod game_state;
pub mod hint;
pub mod orientation;
pub mod rng;
pub mod snapshot;

pub use tui_dice_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Cell, Target, TargetHighlight};
pub use cube::{Cube, Pivot, Roll, RotationState};
pub use game_state::{Game, RollEvent};
pub use hint::{shortest_route, Route};
pub use orientation::{apply_roll, Orientation};
pub use rng::{RandomSource, RngSource, SeededRng};
pub use snapshot::{CubeSnapshot, GameSnapshot, HintSnapshot, RollSnapshot};
