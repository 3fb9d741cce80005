use arrayvec::ArrayVec;

use crate::board::{Target, TargetHighlight};
use crate::cube::{Cube, RotationState};
use crate::hint::Route;
use crate::orientation::Orientation;
use crate::types::{Direction, Position, MAX_TARGETS};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RollSnapshot {
    pub direction: Direction,
    pub progress_angle: f32,
    pub fraction: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeSnapshot {
    pub position: Position,
    pub orientation: Orientation,
    pub rolling: Option<RollSnapshot>,
}

impl From<&Cube> for CubeSnapshot {
    fn from(cube: &Cube) -> Self {
        let rolling = match cube.rotation() {
            RotationState::Idle => None,
            RotationState::Rotating(roll) => Some(RollSnapshot {
                direction: roll.direction,
                progress_angle: roll.progress_angle,
                fraction: roll.fraction(),
            }),
        };
        Self {
            position: cube.position(),
            orientation: cube.orientation(),
            rolling,
        }
    }
}

impl Default for CubeSnapshot {
    fn default() -> Self {
        Self {
            position: Position::default(),
            orientation: Orientation::INITIAL,
            rolling: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HintSnapshot {
    pub next: Direction,
    pub rolls: usize,
    pub target: Target,
}

impl HintSnapshot {
    pub fn from_route(route: &Route) -> Option<Self> {
        Some(Self {
            next: route.first()?,
            rolls: route.len(),
            target: route.target,
        })
    }
}

/// Plain-data view of a game for renderers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GameSnapshot {
    pub width: u8,
    pub height: u8,
    pub cube: CubeSnapshot,
    pub targets: ArrayVec<TargetHighlight, MAX_TARGETS>,
    /// Collected values in ascending order
    pub collected: ArrayVec<u8, MAX_TARGETS>,
    pub target_count: usize,
    pub move_count: u32,
    pub round_id: u32,
    pub active: bool,
    pub won: bool,
    pub hint: Option<HintSnapshot>,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether the player can currently start a roll
    pub fn playable(&self) -> bool {
        self.active && self.cube.rolling.is_none()
    }

    /// Target at `position`, if any
    pub fn target_at(&self, position: Position) -> Option<&TargetHighlight> {
        self.targets.iter().find(|t| t.position == position)
    }
}
