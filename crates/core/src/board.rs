//! Board module - the grid and its registry of target cells
//!
//! The board is a `width x height` grid stored as a flat row-major array.
//! Up to six cells are targets, each bound to a distinct die value; the
//! start cell in the middle of the board is never a target.
//! Coordinates: (x, y) where x ranges 0..width (left to right), y ranges
//! 0..height (top to bottom).

use arrayvec::ArrayVec;
use log::{debug, warn};

use crate::rng::RandomSource;
use crate::types::{
    HighlightState, Position, DEFAULT_CELL_SIZE, FACE_COUNT, MAX_BOARD_DIMENSION, MAX_TARGETS,
};

/// A single board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Normal,
    /// Target cell requiring the given die value (1..=6)
    Target(u8),
}

impl Cell {
    pub fn is_target(&self) -> bool {
        matches!(self, Cell::Target(_))
    }

    /// Required value, for target cells
    pub fn value(&self) -> Option<u8> {
        match self {
            Cell::Normal => None,
            Cell::Target(v) => Some(*v),
        }
    }
}

/// A registered target cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Target {
    pub position: Position,
    pub value: u8,
}

/// Display state of one target, produced by [`Board::update_highlight`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetHighlight {
    pub position: Position,
    pub value: u8,
    pub state: HighlightState,
}

/// The game board
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    width: u8,
    height: u8,
    cell_size: f32,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
    /// Targets in registration order
    targets: ArrayVec<Target, MAX_TARGETS>,
    /// Parallel to `targets`
    highlights: ArrayVec<HighlightState, MAX_TARGETS>,
}

impl Board {
    /// Create a board with no targets. Dimensions are clamped to
    /// `1..=MAX_BOARD_DIMENSION`.
    pub fn empty(width: u8, height: u8) -> Self {
        let width = width.clamp(1, MAX_BOARD_DIMENSION);
        let height = height.clamp(1, MAX_BOARD_DIMENSION);
        Self {
            width,
            height,
            cell_size: DEFAULT_CELL_SIZE,
            cells: vec![Cell::Normal; width as usize * height as usize],
            targets: ArrayVec::new(),
            highlights: ArrayVec::new(),
        }
    }

    /// Build a board and place up to six targets at random.
    ///
    /// Every cell except the start cell is a candidate. `min(6, candidates)`
    /// of them are picked uniformly and given a random permutation of 1..=6
    /// truncated to that count.
    pub fn initialize(width: u8, height: u8, rng: &mut impl RandomSource) -> Self {
        let mut board = Self::empty(width, height);
        let start = board.start_position();

        let mut free: Vec<Position> = board
            .positions()
            .filter(|&p| p != start)
            .collect();
        rng.shuffle(&mut free);

        let mut values: [u8; FACE_COUNT] = [1, 2, 3, 4, 5, 6];
        rng.shuffle(&mut values);

        let count = free.len().min(MAX_TARGETS);
        for (&position, &value) in free.iter().zip(values.iter()).take(count) {
            board.register(position, value);
        }

        debug!(
            "board {}x{} initialized with {} targets",
            board.width,
            board.height,
            board.targets.len()
        );
        board.update_highlight(1);
        board
    }

    /// Build a board with a fixed target layout.
    ///
    /// Targets that are out of bounds, on the start cell, on an occupied
    /// cell, or that repeat a value or use a value outside 1..=6 are skipped.
    pub fn with_targets(width: u8, height: u8, targets: &[(Position, u8)]) -> Self {
        let mut board = Self::empty(width, height);
        let start = board.start_position();

        for &(position, value) in targets {
            let usable = board.in_bounds(position.x, position.y)
                && position != start
                && (1..=FACE_COUNT as u8).contains(&value)
                && !board.is_target(position.x, position.y)
                && !board.targets.iter().any(|t| t.value == value)
                && !board.targets.is_full();
            if !usable {
                warn!("skipping target {} at ({}, {})", value, position.x, position.y);
                continue;
            }
            board.register(position, value);
        }

        board.update_highlight(1);
        board
    }

    fn register(&mut self, position: Position, value: u8) {
        if let Some(idx) = self.index(position.x, position.y) {
            self.cells[idx] = Cell::Target(value);
            self.targets.push(Target { position, value });
            self.highlights.push(HighlightState::Future);
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    /// All board coordinates in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let (w, h) = (self.width as i8, self.height as i8);
        (0..h).flat_map(move |y| (0..w).map(move |x| Position::new(x, y)))
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Board dimensions `(width, height)`
    pub fn size(&self) -> (u8, u8) {
        (self.width, self.height)
    }

    /// Edge length of a cell in world units (rendering only)
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn set_cell_size(&mut self, cell_size: f32) {
        self.cell_size = cell_size;
    }

    /// Check if position is inside the board
    pub fn in_bounds(&self, x: i8, y: i8) -> bool {
        x >= 0 && y >= 0 && (x as u8) < self.width && (y as u8) < self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    pub fn is_target(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Cell::Target(_)))
    }

    /// Start cell of the cube: `(width / 2, height / 2)`
    pub fn start_position(&self) -> Position {
        Position::new((self.width / 2) as i8, (self.height / 2) as i8)
    }

    /// True iff (x, y) is a target cell requiring exactly `value`.
    pub fn check_target_cell(&self, x: i8, y: i8, value: u8) -> bool {
        matches!(self.get(x, y), Some(Cell::Target(v)) if v == value)
    }

    /// Number of registered targets (at most 6)
    pub fn target_cells_count(&self) -> usize {
        self.targets.len()
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Target registered at `position`, if any
    pub fn target_at(&self, position: Position) -> Option<Target> {
        match self.get(position.x, position.y)? {
            Cell::Target(value) => Some(Target { position, value }),
            Cell::Normal => None,
        }
    }

    /// Reclassify every target for display.
    ///
    /// Values below `next_value_to_collect - 1` are Collected, the value equal
    /// to `next_value_to_collect - 1` is Current, anything else is Future.
    pub fn update_highlight(&mut self, next_value_to_collect: u8) -> ArrayVec<TargetHighlight, MAX_TARGETS> {
        let current = next_value_to_collect.saturating_sub(1);
        for (target, state) in self.targets.iter().zip(self.highlights.iter_mut()) {
            *state = if target.value < current {
                HighlightState::Collected
            } else if target.value == current {
                HighlightState::Current
            } else {
                HighlightState::Future
            };
        }
        self.highlights()
    }

    /// Display state from the last [`Board::update_highlight`] call
    pub fn highlights(&self) -> ArrayVec<TargetHighlight, MAX_TARGETS> {
        self.targets
            .iter()
            .zip(self.highlights.iter())
            .map(|(t, &state)| TargetHighlight {
                position: t.position,
                value: t.value,
                state,
            })
            .collect()
    }

    /// Create from a text layout for testing: `.` is a normal cell, `1`..`6`
    /// a target with that value.
    #[cfg(test)]
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len() as u8;
        let width = rows.first().map(|r| r.len()).unwrap_or(0) as u8;
        let mut targets = Vec::new();
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                if let Some(v) = ch.to_digit(10) {
                    targets.push((Position::new(x as i8, y as i8), v as u8));
                }
            }
        }
        Self::with_targets(width, height, &targets)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty(
            crate::types::DEFAULT_BOARD_WIDTH,
            crate::types::DEFAULT_BOARD_HEIGHT,
        )
    }
}
