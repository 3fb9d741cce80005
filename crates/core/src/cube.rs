//! Cube module - the die's position and its roll state machine
//!
//! A roll is not instantaneous. [`Cube::start_rotation`] moves the cube from
//! `Idle` to `Rotating`; each [`Cube::advance`] sweeps a bit more of the 90°
//! arc; the step that reaches the target angle commits the new orientation
//! and position in one go and returns the cube to `Idle`.
//!
//! ```text
//! Idle --start_rotation(ok)--> Rotating --advance(reaches 90°)--> Idle
//! Idle --start_rotation(out of bounds)--> Idle (unchanged)
//! ```

use crate::orientation::{apply_roll, Orientation};
use crate::types::{Axis, Direction, Position, RotationStatus, ROLL_TARGET_ANGLE};

/// A roll in flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Roll {
    pub direction: Direction,
    pub axis: Axis,
    /// Degrees swept so far, in `[0, target_angle)`
    pub progress_angle: f32,
    pub target_angle: f32,
}

impl Roll {
    fn new(direction: Direction) -> Self {
        Self {
            direction,
            axis: direction.axis(),
            progress_angle: 0.0,
            target_angle: ROLL_TARGET_ANGLE,
        }
    }

    /// Fraction of the roll completed, `0.0..1.0`
    pub fn fraction(&self) -> f32 {
        self.progress_angle / self.target_angle
    }
}

/// Rotation phase of the cube.
///
/// Progress only exists while `Rotating`, so an idle cube always has a
/// progress angle of zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RotationState {
    #[default]
    Idle,
    Rotating(Roll),
}

impl RotationState {
    pub fn is_rotating(&self) -> bool {
        matches!(self, RotationState::Rotating(_))
    }

    pub fn progress_angle(&self) -> f32 {
        match self {
            RotationState::Idle => 0.0,
            RotationState::Rotating(roll) => roll.progress_angle,
        }
    }
}

/// Edge the die tips over during a roll (rendering only).
///
/// The anchor is in cell units with the cube's cell centre at
/// `(x + 0.5, 0, y + 0.5)` and the board surface at height 0; the die turns
/// about `axis` through the anchor by `angle` degrees (signed).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pivot {
    pub anchor: [f32; 3],
    pub axis: Axis,
    pub angle: f32,
}

/// The rolling die.
#[derive(Debug, Clone, PartialEq)]
pub struct Cube {
    position: Position,
    orientation: Orientation,
    rotation: RotationState,
}

impl Cube {
    /// Create an idle cube at `position` with the initial orientation
    pub fn new(position: Position) -> Self {
        Self {
            position,
            orientation: Orientation::INITIAL,
            rotation: RotationState::Idle,
        }
    }

    /// Move the cube to `position`, restore the initial orientation and drop
    /// any roll in progress.
    pub fn reset(&mut self, position: Position) {
        self.position = position;
        self.orientation = Orientation::INITIAL;
        self.rotation = RotationState::Idle;
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    pub fn is_rotating(&self) -> bool {
        self.rotation.is_rotating()
    }

    pub fn top_value(&self) -> u8 {
        self.orientation.top()
    }

    pub fn bottom_value(&self) -> u8 {
        self.orientation.bottom()
    }

    /// Begin a roll one cell towards `direction`.
    ///
    /// `bounds` is the board size `(width, height)`. Returns false, changing
    /// nothing, if a roll is already in flight or the destination cell lies
    /// outside the board.
    pub fn start_rotation(&mut self, direction: Direction, bounds: (u8, u8)) -> bool {
        if self.is_rotating() {
            return false;
        }

        let dest = self.position.step(direction);
        let (width, height) = bounds;
        if dest.x < 0 || dest.y < 0 || dest.x as i16 >= width as i16 || dest.y as i16 >= height as i16 {
            return false;
        }

        self.rotation = RotationState::Rotating(Roll::new(direction));
        true
    }

    /// Sweep the current roll by `angle_step` degrees.
    ///
    /// Progress is clamped to the target angle. On the step that reaches it,
    /// the orientation and position are updated and the cube returns to idle.
    /// Negative or NaN steps count as zero; an infinite step finishes the roll.
    pub fn advance(&mut self, angle_step: f32) -> RotationStatus {
        let RotationState::Rotating(mut roll) = self.rotation else {
            return RotationStatus::Idle;
        };

        let step = if angle_step.is_nan() { 0.0 } else { angle_step.max(0.0) };
        roll.progress_angle = (roll.progress_angle + step).min(roll.target_angle);

        if roll.progress_angle >= roll.target_angle {
            self.orientation = apply_roll(self.orientation, roll.direction);
            self.position = self.position.step(roll.direction);
            self.rotation = RotationState::Idle;
            return RotationStatus::Completed;
        }

        self.rotation = RotationState::Rotating(roll);
        RotationStatus::InProgress
    }

    /// Pivot of the roll in progress, if any
    pub fn pivot(&self) -> Option<Pivot> {
        let RotationState::Rotating(roll) = self.rotation else {
            return None;
        };

        let (dx, dy) = roll.direction.offset();
        let cx = self.position.x as f32 + 0.5;
        let cz = self.position.y as f32 + 0.5;
        // Right-handed: rolling towards +x turns about +z by a negative angle,
        // rolling towards +z (down the screen) turns about +x by a positive one.
        let sign = match roll.direction {
            Direction::Right | Direction::Up => -1.0,
            Direction::Left | Direction::Down => 1.0,
        };

        Some(Pivot {
            anchor: [cx + dx as f32 * 0.5, 0.0, cz + dy as f32 * 0.5],
            axis: roll.axis,
            angle: sign * roll.progress_angle,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: (u8, u8) = (3, 3);

    #[test]
    fn test_new_cube_is_idle() {
        let cube = Cube::new(Position::new(1, 1));
        assert!(!cube.is_rotating());
        assert_eq!(cube.rotation().progress_angle(), 0.0);
        assert_eq!(cube.top_value(), 1);
        assert_eq!(cube.bottom_value(), 6);
        assert!(cube.pivot().is_none());
    }

    #[test]
    fn test_start_rotation_records_axis() {
        let mut cube = Cube::new(Position::new(1, 1));
        assert!(cube.start_rotation(Direction::Up, BOUNDS));
        match cube.rotation() {
            RotationState::Rotating(roll) => {
                assert_eq!(roll.axis, Axis::X);
                assert_eq!(roll.direction, Direction::Up);
                assert_eq!(roll.progress_angle, 0.0);
                assert_eq!(roll.target_angle, 90.0);
            }
            RotationState::Idle => panic!("expected rotating"),
        }

        let mut cube = Cube::new(Position::new(1, 1));
        assert!(cube.start_rotation(Direction::Right, BOUNDS));
        assert!(matches!(
            cube.rotation(),
            RotationState::Rotating(Roll { axis: Axis::Z, .. })
        ));
    }

    #[test]
    fn test_start_rotation_out_of_bounds() {
        let mut cube = Cube::new(Position::new(0, 1));
        let before = cube.clone();
        assert!(!cube.start_rotation(Direction::Left, BOUNDS));
        assert_eq!(cube, before);

        let mut cube = Cube::new(Position::new(2, 2));
        assert!(!cube.start_rotation(Direction::Right, BOUNDS));
        assert!(!cube.start_rotation(Direction::Down, BOUNDS));
        assert!(!cube.is_rotating());
    }

    #[test]
    fn test_start_rotation_rejected_while_rotating() {
        let mut cube = Cube::new(Position::new(1, 1));
        assert!(cube.start_rotation(Direction::Left, BOUNDS));
        assert!(!cube.start_rotation(Direction::Right, BOUNDS));
        match cube.rotation() {
            RotationState::Rotating(roll) => assert_eq!(roll.direction, Direction::Left),
            RotationState::Idle => panic!("expected rotating"),
        }
    }

    #[test]
    fn test_advance_commits_only_at_target() {
        let mut cube = Cube::new(Position::new(1, 1));
        assert!(cube.start_rotation(Direction::Left, BOUNDS));

        for _ in 0..9 {
            assert_eq!(cube.advance(9.0), RotationStatus::InProgress);
            assert_eq!(cube.position(), Position::new(1, 1));
            assert_eq!(cube.top_value(), 1);
        }
        assert_eq!(cube.advance(9.0), RotationStatus::Completed);
        assert_eq!(cube.position(), Position::new(0, 1));
        assert_eq!(cube.top_value(), 4);
        assert!(!cube.is_rotating());
        assert_eq!(cube.rotation().progress_angle(), 0.0);
    }

    #[test]
    fn test_advance_clamps_overshoot() {
        let mut cube = Cube::new(Position::new(1, 1));
        assert!(cube.start_rotation(Direction::Down, BOUNDS));
        assert_eq!(cube.advance(500.0), RotationStatus::Completed);
        assert_eq!(cube.position(), Position::new(1, 2));
        assert_eq!(cube.top_value(), 2);
    }

    #[test]
    fn test_advance_idle_and_degenerate_steps() {
        let mut cube = Cube::new(Position::new(1, 1));
        assert_eq!(cube.advance(10.0), RotationStatus::Idle);

        assert!(cube.start_rotation(Direction::Up, BOUNDS));
        assert_eq!(cube.advance(-5.0), RotationStatus::InProgress);
        assert_eq!(cube.advance(f32::NAN), RotationStatus::InProgress);
        assert_eq!(cube.advance(f32::NEG_INFINITY), RotationStatus::InProgress);
        assert_eq!(cube.rotation().progress_angle(), 0.0);
        assert_eq!(cube.advance(f32::INFINITY), RotationStatus::Completed);
        assert_eq!(cube.position(), Position::new(1, 0));
        assert_eq!(cube.top_value(), 5);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut cube = Cube::new(Position::new(1, 1));
        assert!(cube.start_rotation(Direction::Up, BOUNDS));
        cube.advance(90.0);
        assert!(cube.start_rotation(Direction::Left, BOUNDS));
        cube.advance(45.0);

        cube.reset(Position::new(2, 2));
        assert_eq!(cube, Cube::new(Position::new(2, 2)));
    }

    #[test]
    fn test_pivot_tracks_progress() {
        let mut cube = Cube::new(Position::new(1, 1));
        assert!(cube.start_rotation(Direction::Right, BOUNDS));
        cube.advance(30.0);

        let pivot = cube.pivot().unwrap();
        assert_eq!(pivot.axis, Axis::Z);
        assert_eq!(pivot.anchor, [2.0, 0.0, 1.5]);
        assert_eq!(pivot.angle, -30.0);

        match cube.rotation() {
            RotationState::Rotating(roll) => assert!((roll.fraction() - 1.0 / 3.0).abs() < 1e-6),
            RotationState::Idle => panic!("expected rotating"),
        }
    }
}
