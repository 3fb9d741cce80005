//! Game state module - orchestrates the board, the die and collection progress
//!
//! `Game` validates moves, drives the cube's roll one tick at a time, checks
//! the landing cell when a roll completes and tracks which target values have
//! been collected. It is the only writer of cube state and board highlights.

use std::collections::BTreeSet;
use std::fmt;

use log::{debug, info};

use crate::board::Board;
use crate::cube::Cube;
use crate::hint::{shortest_route, Route};
use crate::rng::{RandomSource, SeededRng};
use crate::snapshot::{CubeSnapshot, GameSnapshot};
use crate::types::{Direction, GameAction, Position, RotationStatus};

/// Outcome of a completed roll (consumed by observers).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollEvent {
    pub direction: Direction,
    pub position: Position,
    pub top_value: u8,
    /// Value newly collected by this landing, if any
    pub collected: Option<u8>,
    /// This landing finished the round
    pub won: bool,
}

type CountListener = Box<dyn FnMut(usize)>;

/// Complete puzzle state
pub struct Game<R: RandomSource = SeededRng> {
    board: Board,
    cube: Cube,
    rng: R,
    collected: BTreeSet<u8>,
    /// Rolls started this round (counted at initiation, not completion).
    move_count: u32,
    active: bool,
    won: bool,
    /// Monotonic round id (increments on every start/reset).
    round_id: u32,
    last_event: Option<RollEvent>,
    on_collected_count_changed: Option<CountListener>,
}

impl Game<SeededRng> {
    /// Create a game on a random `width x height` layout from `seed`
    pub fn with_seed(width: u8, height: u8, seed: u64) -> Self {
        let mut rng = SeededRng::new(seed);
        let board = Board::initialize(width, height, &mut rng);
        let cube = Cube::new(board.start_position());
        Self::new(board, cube, rng)
    }
}

impl<R: RandomSource> Game<R> {
    /// Create a game from explicit parts. The game is inactive until
    /// [`Game::start`] is called.
    pub fn new(board: Board, cube: Cube, rng: R) -> Self {
        Self {
            board,
            cube,
            rng,
            collected: BTreeSet::new(),
            move_count: 0,
            active: false,
            won: false,
            round_id: 0,
            last_event: None,
            on_collected_count_changed: None,
        }
    }

    /// Register the listener fired with the new collected count every time a
    /// new target value is collected.
    pub fn on_collected_count_changed(&mut self, listener: impl FnMut(usize) + 'static) {
        self.on_collected_count_changed = Some(Box::new(listener));
    }

    /// Start a round: clear progress, put the die back on the start cell in
    /// its initial orientation and accept moves.
    pub fn start(&mut self) {
        self.collected.clear();
        self.move_count = 0;
        self.cube.reset(self.board.start_position());
        self.active = true;
        self.won = false;
        self.last_event = None;
        self.round_id = self.round_id.wrapping_add(1);
        self.refresh_highlight();
        debug!(
            "round {} started with {} targets",
            self.round_id,
            self.board.target_cells_count()
        );
    }

    /// Restart on the same layout. Same as [`Game::start`].
    pub fn reset(&mut self) {
        self.start();
    }

    /// Deactivate the game without winning. A roll already in flight still
    /// completes on later ticks but collects nothing.
    pub fn stop(&mut self) {
        self.active = false;
    }

    /// Re-initialise the board from the owned random source, keeping its
    /// dimensions, and start a new round.
    pub fn new_layout(&mut self) {
        let (width, height) = self.board.size();
        let cell_size = self.board.cell_size();
        self.board = Board::initialize(width, height, &mut self.rng);
        self.board.set_cell_size(cell_size);
        info!("new {}x{} layout", width, height);
        self.start();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    pub fn is_cube_rotating(&self) -> bool {
        self.cube.is_rotating()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cube(&self) -> &Cube {
        &self.cube
    }

    pub fn collected_values(&self) -> &BTreeSet<u8> {
        &self.collected
    }

    pub fn collected_count(&self) -> usize {
        self.collected.len()
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn round_id(&self) -> u32 {
        self.round_id
    }

    /// Begin rolling the die one cell towards `direction`.
    ///
    /// Rejected (false, nothing changes) while inactive, while a roll is in
    /// flight, or when the destination is off the board. A successful start
    /// counts as a move immediately.
    pub fn move_cube(&mut self, direction: Direction) -> bool {
        if !self.active || self.cube.is_rotating() {
            return false;
        }

        if !self.cube.start_rotation(direction, self.board.size()) {
            return false;
        }

        self.move_count = self.move_count.saturating_add(1);
        debug!(
            "roll {} from ({}, {}), move {}",
            direction.as_str(),
            self.cube.position().x,
            self.cube.position().y,
            self.move_count
        );
        true
    }

    /// Advance the roll in flight by `angle_step` degrees.
    ///
    /// Returns true on the tick a roll completes. That tick is also the only
    /// point where position, orientation and collection progress change.
    pub fn tick(&mut self, angle_step: f32) -> bool {
        let Some(direction) = self.rolling_direction() else {
            return false;
        };

        if self.cube.advance(angle_step) != RotationStatus::Completed {
            return false;
        }

        let position = self.cube.position();
        let top_value = self.cube.top_value();
        let mut event = RollEvent {
            direction,
            position,
            top_value,
            collected: None,
            won: false,
        };

        if self.active
            && self.board.check_target_cell(position.x, position.y, top_value)
            && self.collected.insert(top_value)
        {
            event.collected = Some(top_value);
            let count = self.collected.len();
            info!(
                "collected {} at ({}, {}), {}/{}",
                top_value,
                position.x,
                position.y,
                count,
                self.board.target_cells_count()
            );
            self.refresh_highlight();
            if let Some(listener) = self.on_collected_count_changed.as_mut() {
                listener(count);
            }

            if count == self.board.target_cells_count() {
                self.active = false;
                self.won = true;
                event.won = true;
                info!("round {} won in {} moves", self.round_id, self.move_count);
            }
        }

        self.last_event = Some(event);
        true
    }

    /// Apply a player action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Roll(direction) => self.move_cube(direction),
            GameAction::Restart => {
                self.reset();
                true
            }
            GameAction::NewLayout => {
                self.new_layout();
                true
            }
            GameAction::Stop => {
                let was_active = self.active;
                self.stop();
                was_active
            }
        }
    }

    /// Take and clear the last completed-roll event.
    pub fn take_last_event(&mut self) -> Option<RollEvent> {
        self.last_event.take()
    }

    /// Shortest route from the current die state to any uncollected target.
    ///
    /// `None` while inactive, mid-roll, or when nothing is reachable.
    pub fn hint(&self) -> Option<Route> {
        if !self.active || self.cube.is_rotating() {
            return None;
        }
        shortest_route(
            &self.board,
            self.cube.position(),
            self.cube.orientation(),
            &self.collected,
            None,
        )
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        let (width, height) = self.board.size();
        out.width = width;
        out.height = height;
        out.cube = CubeSnapshot::from(&self.cube);
        out.targets = self.board.highlights();
        out.collected = self.collected.iter().copied().collect();
        out.target_count = self.board.target_cells_count();
        out.move_count = self.move_count;
        out.round_id = self.round_id;
        out.active = self.active;
        out.won = self.won;
        out.hint = None;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    fn rolling_direction(&self) -> Option<Direction> {
        match self.cube.rotation() {
            crate::cube::RotationState::Rotating(roll) => Some(roll.direction),
            crate::cube::RotationState::Idle => None,
        }
    }

    fn refresh_highlight(&mut self) {
        let next = (self.collected.len() as u8).saturating_add(1);
        self.board.update_highlight(next);
    }
}

impl<R: RandomSource> fmt::Debug for Game<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("board", &self.board)
            .field("cube", &self.cube)
            .field("collected", &self.collected)
            .field("move_count", &self.move_count)
            .field("active", &self.active)
            .field("won", &self.won)
            .field("round_id", &self.round_id)
            .field("last_event", &self.last_event)
            .finish_non_exhaustive()
    }
}

impl Default for Game<SeededRng> {
    fn default() -> Self {
        Self::with_seed(
            crate::types::DEFAULT_BOARD_WIDTH,
            crate::types::DEFAULT_BOARD_HEIGHT,
            1,
        )
    }
}
