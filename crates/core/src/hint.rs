//! Hint search - shortest roll sequence to an uncollected target
//!
//! Breadth-first search over `(position, orientation)` states. There are at
//! most `width * height * 24` of them, so the search is cheap enough to run
//! on demand from the UI.

use std::collections::{BTreeSet, HashMap, VecDeque};

use crate::board::{Board, Target};
use crate::orientation::Orientation;
use crate::types::{Direction, Position};

/// A roll sequence and the target it collects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub directions: Vec<Direction>,
    pub target: Target,
}

impl Route {
    pub fn len(&self) -> usize {
        self.directions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directions.is_empty()
    }

    /// First roll of the route
    pub fn first(&self) -> Option<Direction> {
        self.directions.first().copied()
    }
}

type State = (Position, Orientation);

/// Find the fewest rolls from `(start, orientation)` that land on an
/// uncollected target with its value on top.
///
/// With `goal = Some(v)` only the target for `v` is accepted, and states that
/// would collect a different uncollected value along the way are not
/// expanded. Returns `None` if no such route exists.
pub fn shortest_route(
    board: &Board,
    start: Position,
    orientation: Orientation,
    collected: &BTreeSet<u8>,
    goal: Option<u8>,
) -> Option<Route> {
    let mut came_from: HashMap<State, (State, Direction)> = HashMap::new();
    let mut queue: VecDeque<State> = VecDeque::new();
    let origin = (start, orientation);
    came_from.insert(origin, (origin, Direction::Up));
    queue.push_back(origin);

    while let Some(state) = queue.pop_front() {
        let (pos, o) = state;
        for dir in Direction::ALL {
            let next_pos = pos.step(dir);
            if !board.in_bounds(next_pos.x, next_pos.y) {
                continue;
            }
            let next = (next_pos, o.rolled(dir));
            if came_from.contains_key(&next) {
                continue;
            }
            came_from.insert(next, (state, dir));

            let top = next.1.top();
            let collects = board.check_target_cell(next_pos.x, next_pos.y, top)
                && !collected.contains(&top);
            if collects {
                if goal.map_or(true, |g| g == top) {
                    return Some(Route {
                        directions: unwind(&came_from, origin, next),
                        target: Target {
                            position: next_pos,
                            value: top,
                        },
                    });
                }
                // Landing here would collect the wrong value.
                continue;
            }
            queue.push_back(next);
        }
    }

    None
}

fn unwind(came_from: &HashMap<State, (State, Direction)>, origin: State, end: State) -> Vec<Direction> {
    let mut path = Vec::new();
    let mut at = end;
    while at != origin {
        let Some(&(prev, dir)) = came_from.get(&at) else {
            break;
        };
        path.push(dir);
        at = prev;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replay(start: Position, mut o: Orientation, route: &Route) -> (Position, Orientation) {
        let mut p = start;
        for &d in &route.directions {
            p = p.step(d);
            o = o.rolled(d);
        }
        (p, o)
    }

    #[test]
    fn test_single_roll_route() {
        // Rolling left from the centre shows 4 on top.
        let board = Board::with_targets(5, 5, &[(Position::new(1, 2), 4)]);
        let route = shortest_route(
            &board,
            board.start_position(),
            Orientation::INITIAL,
            &BTreeSet::new(),
            None,
        )
        .unwrap();
        assert_eq!(route.directions, vec![Direction::Left]);
        assert_eq!(route.target, Target { position: Position::new(1, 2), value: 4 });
    }

    #[test]
    fn test_route_lands_with_value_on_top() {
        let board = Board::with_targets(5, 5, &[(Position::new(0, 0), 6)]);
        let start = board.start_position();
        let route = shortest_route(&board, start, Orientation::INITIAL, &BTreeSet::new(), None).unwrap();

        let (p, o) = replay(start, Orientation::INITIAL, &route);
        assert_eq!(p, Position::new(0, 0));
        assert_eq!(o.top(), 6);
        assert!(route.len() >= 4);
    }

    #[test]
    fn test_collected_values_are_ignored() {
        let board = Board::with_targets(5, 5, &[(Position::new(1, 2), 4)]);
        let collected: BTreeSet<u8> = [4].into_iter().collect();
        assert!(shortest_route(&board, board.start_position(), Orientation::INITIAL, &collected, None).is_none());
    }

    #[test]
    fn test_goal_avoids_other_matches() {
        let board = Board::with_targets(
            5,
            5,
            &[(Position::new(1, 2), 4), (Position::new(4, 4), 1)],
        );
        let start = board.start_position();
        let route = shortest_route(&board, start, Orientation::INITIAL, &BTreeSet::new(), Some(1)).unwrap();
        assert_eq!(route.target.value, 1);

        // No intermediate landing collects the 4.
        let mut p = start;
        let mut o = Orientation::INITIAL;
        for &d in &route.directions[..route.len() - 1] {
            p = p.step(d);
            o = o.rolled(d);
            assert!(!board.check_target_cell(p.x, p.y, o.top()));
        }
    }

    #[test]
    fn test_no_targets_no_route() {
        let board = Board::empty(3, 3);
        assert!(shortest_route(&board, board.start_position(), Orientation::INITIAL, &BTreeSet::new(), None).is_none());
    }
}
