//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so the same
//! definitions serve the puzzle engine, the terminal view and the key map.
//!
//! # Board
//!
//! - Default playfield is **5x5**; dimensions are clamped to `1..=32`.
//! - Coordinates are `(x, y)` with `x` growing to the right and `y` growing
//!   downwards; the start cell is `(width / 2, height / 2)`.
//! - At most **6** target cells are registered, one per die value.
//!
//! # Rolls
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `ROLL_TARGET_ANGLE` | 90° | Angle a single roll sweeps |
//! | `DEFAULT_ANGLE_STEP` | 9° | Angle advanced per tick (10 ticks per roll) |
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//!
//! # Examples
//!
//! ```
//! use tui_dice_types::{Axis, Direction, GameAction};
//!
//! let dir = Direction::from_str("left").unwrap();
//! assert_eq!(dir.offset(), (-1, 0));
//! assert_eq!(dir.opposite(), Direction::Right);
//! assert_eq!(dir.axis(), Axis::Z);
//!
//! assert_eq!(GameAction::from_str("rollUp"), Some(GameAction::Roll(Direction::Up)));
//! ```

/// Default board width in cells
pub const DEFAULT_BOARD_WIDTH: u8 = 5;

/// Default board height in cells
pub const DEFAULT_BOARD_HEIGHT: u8 = 5;

/// Largest accepted board dimension (both axes)
pub const MAX_BOARD_DIMENSION: u8 = 32;

/// Maximum number of target cells (one per die value)
pub const MAX_TARGETS: usize = 6;

/// Number of faces on the die
pub const FACE_COUNT: usize = 6;

/// Opposite faces of a standard die always sum to this value
pub const OPPOSITE_FACE_SUM: u8 = 7;

/// Angle swept by one roll, in degrees
pub const ROLL_TARGET_ANGLE: f32 = 90.0;

/// Default angle advanced per tick, in degrees
pub const DEFAULT_ANGLE_STEP: f32 = 9.0;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Edge length of one board cell in world units (rendering only)
pub const DEFAULT_CELL_SIZE: f32 = 1.0;

/// Cardinal roll directions.
///
/// `Up` moves towards `y - 1`, `Down` towards `y + 1`, `Left` towards
/// `x - 1` and `Right` towards `x + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions, in a fixed order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit grid offset `(dx, dy)` of a roll in this direction.
    pub fn offset(&self) -> (i8, i8) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// The direction that undoes a roll in this direction.
    ///
    /// ```
    /// use tui_dice_types::Direction;
    ///
    /// for dir in Direction::ALL {
    ///     assert_eq!(dir.opposite().opposite(), dir);
    /// }
    /// ```
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Horizontal axis the die turns about when rolling this way.
    pub fn axis(&self) -> Axis {
        match self {
            Direction::Up | Direction::Down => Axis::X,
            Direction::Left | Direction::Right => Axis::Z,
        }
    }

    /// Parse direction from string (case-insensitive)
    ///
    /// Accepts full names or single letters: "up" | "u", "down" | "d",
    /// "left" | "l", "right" | "r".
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            "left" | "l" => Some(Direction::Left),
            "right" | "r" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Single-glyph arrow used by the terminal view.
    pub fn arrow(&self) -> char {
        match self {
            Direction::Up => '↑',
            Direction::Down => '↓',
            Direction::Left => '←',
            Direction::Right => '→',
        }
    }
}

/// Rotation axis of a roll in world space.
///
/// The board lies in the X/Z plane, so vertical (`Up`/`Down`) rolls turn
/// about X and horizontal (`Left`/`Right`) rolls turn about Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Z,
}

/// The six faces of the die, named from the viewer's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Face {
    Top,
    Bottom,
    Left,
    Right,
    Front,
    Back,
}

impl Face {
    /// All faces in storage order.
    pub const ALL: [Face; FACE_COUNT] = [
        Face::Top,
        Face::Bottom,
        Face::Left,
        Face::Right,
        Face::Front,
        Face::Back,
    ];

    /// Index into a `[u8; 6]` face table.
    #[inline]
    pub fn index(&self) -> usize {
        match self {
            Face::Top => 0,
            Face::Bottom => 1,
            Face::Left => 2,
            Face::Right => 3,
            Face::Front => 4,
            Face::Back => 5,
        }
    }

    /// The face on the other side of the die.
    pub fn opposite(&self) -> Self {
        match self {
            Face::Top => Face::Bottom,
            Face::Bottom => Face::Top,
            Face::Left => Face::Right,
            Face::Right => Face::Left,
            Face::Front => Face::Back,
            Face::Back => Face::Front,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Face::Top => "top",
            Face::Bottom => "bottom",
            Face::Left => "left",
            Face::Right => "right",
            Face::Front => "front",
            Face::Back => "back",
        }
    }
}

/// Display classification of a target cell relative to collection progress.
///
/// Purely advisory: the renderer picks colours from it, the engine never
/// consults it when matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightState {
    Collected,
    Current,
    Future,
}

/// Result of advancing a roll by one angle step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationStatus {
    /// No roll was in progress; nothing changed.
    Idle,
    /// The roll advanced but has not reached its target angle yet.
    InProgress,
    /// The roll finished this step; position and orientation were updated.
    Completed,
}

/// Player-level actions that can be applied to a game
///
/// These are produced by the key map and consumed by `Game::apply_action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Start rolling the die one cell in the given direction
    Roll(Direction),
    /// Restart the round on the same board layout
    Restart,
    /// Generate a fresh board layout and restart
    NewLayout,
    /// End the round without winning
    Stop,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_dice_types::{Direction, GameAction};
    ///
    /// assert_eq!(GameAction::from_str("rollLeft"), Some(GameAction::Roll(Direction::Left)));
    /// assert_eq!(GameAction::from_str("restart"), Some(GameAction::Restart));
    /// assert_eq!(GameAction::from_str("newLayout"), Some(GameAction::NewLayout));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "rollup" => Some(GameAction::Roll(Direction::Up)),
            "rolldown" => Some(GameAction::Roll(Direction::Down)),
            "rollleft" => Some(GameAction::Roll(Direction::Left)),
            "rollright" => Some(GameAction::Roll(Direction::Right)),
            "restart" => Some(GameAction::Restart),
            "newlayout" => Some(GameAction::NewLayout),
            "stop" => Some(GameAction::Stop),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Roll(Direction::Up) => "rollUp",
            GameAction::Roll(Direction::Down) => "rollDown",
            GameAction::Roll(Direction::Left) => "rollLeft",
            GameAction::Roll(Direction::Right) => "rollRight",
            GameAction::Restart => "restart",
            GameAction::NewLayout => "newLayout",
            GameAction::Stop => "stop",
        }
    }
}

/// A board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    pub x: i8,
    pub y: i8,
}

impl Position {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one roll away. Does not check bounds.
    pub fn step(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

impl From<(i8, i8)> for Position {
    fn from((x, y): (i8, i8)) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roll_timing_defaults() {
        assert_eq!(ROLL_TARGET_ANGLE, 90.0);
        assert_eq!(DEFAULT_ANGLE_STEP, 9.0);
        assert_eq!((ROLL_TARGET_ANGLE / DEFAULT_ANGLE_STEP) as u32, 10);
        assert_eq!(TICK_MS, 16);
    }

    #[test]
    fn offsets_cancel_with_opposite() {
        for dir in Direction::ALL {
            let (dx, dy) = dir.offset();
            let (ox, oy) = dir.opposite().offset();
            assert_eq!((dx + ox, dy + oy), (0, 0), "{:?}", dir);
            assert_eq!(dir.axis(), dir.opposite().axis());
        }
    }

    #[test]
    fn face_indices_are_a_permutation() {
        let mut seen = [false; FACE_COUNT];
        for face in Face::ALL {
            assert!(!seen[face.index()]);
            seen[face.index()] = true;
            assert_eq!(face.opposite().opposite(), face);
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn position_step_saturates() {
        let p = Position::new(i8::MIN, 0);
        assert_eq!(p.step(Direction::Left), Position::new(i8::MIN, 0));
        assert_eq!(Position::new(1, 1).step(Direction::Up), Position::new(1, 0));
    }

    #[test]
    fn action_string_roundtrip() {
        for action in [
            GameAction::Roll(Direction::Up),
            GameAction::Roll(Direction::Down),
            GameAction::Roll(Direction::Left),
            GameAction::Roll(Direction::Right),
            GameAction::Restart,
            GameAction::NewLayout,
            GameAction::Stop,
        ] {
            assert_eq!(GameAction::from_str(action.as_str()), Some(action));
        }
    }
}
