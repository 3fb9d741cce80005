//! Orientation module - die face values and the roll permutation table
//!
//! An [`Orientation`] assigns the values 1..=6 to the six faces of the die.
//! Opposite faces always sum to 7, and every roll permutes the four faces
//! around the roll axis while the two faces on the axis stay put.
//!
//! Rolls are a group action: each direction has order 4 and opposite
//! directions are mutual inverses, so exactly 24 orientations are reachable
//! from any starting one.

use crate::types::{Direction, Face, FACE_COUNT, OPPOSITE_FACE_SUM};

/// Values shown on each face of the die.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Orientation {
    /// Indexed by [`Face::index`]
    faces: [u8; FACE_COUNT],
}

impl Orientation {
    /// Starting orientation: top=1, bottom=6, left=3, right=4, front=2, back=5.
    pub const INITIAL: Orientation = Orientation {
        faces: [1, 6, 3, 4, 2, 5],
    };

    /// Value on the given face
    #[inline]
    pub fn value(&self, face: Face) -> u8 {
        self.faces[face.index()]
    }

    pub fn top(&self) -> u8 {
        self.value(Face::Top)
    }

    pub fn bottom(&self) -> u8 {
        self.value(Face::Bottom)
    }

    pub fn left(&self) -> u8 {
        self.value(Face::Left)
    }

    pub fn right(&self) -> u8 {
        self.value(Face::Right)
    }

    pub fn front(&self) -> u8 {
        self.value(Face::Front)
    }

    pub fn back(&self) -> u8 {
        self.value(Face::Back)
    }

    /// Face currently showing `value`, if `value` is a die value.
    pub fn face_of(&self, value: u8) -> Option<Face> {
        Face::ALL.into_iter().find(|&f| self.value(f) == value)
    }

    /// Check the die invariants: values are 1..=6, each used once, and
    /// opposite faces sum to 7.
    pub fn is_valid(&self) -> bool {
        let mut seen = [false; FACE_COUNT];
        for &v in &self.faces {
            if !(1..=FACE_COUNT as u8).contains(&v) || seen[(v - 1) as usize] {
                return false;
            }
            seen[(v - 1) as usize] = true;
        }
        Face::ALL
            .iter()
            .all(|&f| self.value(f) + self.value(f.opposite()) == OPPOSITE_FACE_SUM)
    }

    /// Orientation after one 90° roll in `direction`. See [`apply_roll`].
    #[inline]
    pub fn rolled(self, direction: Direction) -> Self {
        apply_roll(self, direction)
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// Source face for each destination face, per roll direction.
///
/// `ROLL_TABLE[d][f]` is the face whose value lands on face `f` after a roll
/// in direction `d` (indexed by [`Face::index`]).
const ROLL_TABLE: [[Face; FACE_COUNT]; 4] = [
    // Up: top<-back, bottom<-front, front<-top, back<-bottom
    [Face::Back, Face::Front, Face::Left, Face::Right, Face::Top, Face::Bottom],
    // Down: top<-front, bottom<-back, front<-bottom, back<-top
    [Face::Front, Face::Back, Face::Left, Face::Right, Face::Bottom, Face::Top],
    // Left: top<-right, bottom<-left, left<-top, right<-bottom
    [Face::Right, Face::Left, Face::Top, Face::Bottom, Face::Front, Face::Back],
    // Right: top<-left, bottom<-right, left<-bottom, right<-top
    [Face::Left, Face::Right, Face::Bottom, Face::Top, Face::Front, Face::Back],
];

#[inline]
fn table_index(direction: Direction) -> usize {
    match direction {
        Direction::Up => 0,
        Direction::Down => 1,
        Direction::Left => 2,
        Direction::Right => 3,
    }
}

/// Apply one 90° roll to an orientation, returning the new orientation.
///
/// ```
/// use tui_dice_core::orientation::{apply_roll, Orientation};
/// use tui_dice_core::types::Direction;
///
/// let o = Orientation::INITIAL;
/// assert_eq!(apply_roll(o, Direction::Left).top(), 4);
/// assert_eq!(apply_roll(apply_roll(o, Direction::Up), Direction::Down), o);
/// ```
pub fn apply_roll(orientation: Orientation, direction: Direction) -> Orientation {
    let sources = &ROLL_TABLE[table_index(direction)];
    let mut faces = [0u8; FACE_COUNT];
    for face in Face::ALL {
        faces[face.index()] = orientation.value(sources[face.index()]);
    }
    Orientation { faces }
}

/// Every orientation reachable from [`Orientation::INITIAL`] by rolling.
///
/// Always 24 entries: the rotation group of the cube.
pub fn reachable_orientations() -> Vec<Orientation> {
    let mut seen = vec![Orientation::INITIAL];
    let mut frontier = vec![Orientation::INITIAL];
    while let Some(o) = frontier.pop() {
        for dir in Direction::ALL {
            let next = apply_roll(o, dir);
            if !seen.contains(&next) {
                seen.push(next);
                frontier.push(next);
            }
        }
    }
    seen
}
