#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Single-step move application over maze grids.

use maze_quest_core::{Cell, Direction, Grid, Position};

/// Result of applying one directional step.
///
/// The engine never mutates the caller's grid: an accepted move yields a
/// fresh snapshot and a rejected move echoes the input unchanged, so the
/// caller can detect rejection by comparing positions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Grid after the step, a fresh snapshot when the move was accepted.
    pub grid: Grid,
    /// Player position after the step.
    pub position: Position,
    /// Whether the step landed on the goal cell.
    pub reached_goal: bool,
}

/// Applies one directional step to the provided grid and position.
///
/// A candidate cell off the grid or holding a wall rejects the move: the
/// returned outcome carries the unchanged grid and position with
/// `reached_goal` false. Otherwise the move is accepted: the current cell is
/// cleared to empty, `reached_goal` captures whether the candidate held the
/// goal before it is overwritten with the player, and the new snapshot is
/// returned. Exactly one cell is traversed per invocation; there are no
/// diagonal moves.
#[must_use]
pub fn apply_move(grid: &Grid, position: Position, direction: Direction) -> MoveOutcome {
    let rejected = || MoveOutcome {
        grid: grid.clone(),
        position,
        reached_goal: false,
    };

    let Some(candidate) = position.stepped(direction) else {
        return rejected();
    };
    let Some(cell) = grid.get(candidate) else {
        return rejected();
    };
    if cell.is_wall() {
        return rejected();
    }

    let mut next = grid.clone();
    next.set(position, Cell::Empty);
    let reached_goal = cell == Cell::Goal;
    next.set(candidate, Cell::Player);

    MoveOutcome {
        grid: next,
        position: candidate,
        reached_goal,
    }
}

#[cfg(test)]
mod tests {
    use super::apply_move;
    use maze_quest_core::{Cell, Direction, Grid, Position};

    fn grid(lines: &[&str]) -> Grid {
        Grid::parse(lines).expect("test layout parses")
    }

    #[test]
    fn stepping_into_a_wall_is_identity() {
        let start = grid(&["#####", "#P.G#", "#####"]);
        let outcome = apply_move(&start, Position::new(1, 1), Direction::Up);
        assert_eq!(outcome.position, Position::new(1, 1));
        assert_eq!(outcome.grid, start);
        assert!(!outcome.reached_goal);
    }

    #[test]
    fn stepping_off_the_grid_is_identity() {
        let start = grid(&["P.G"]);
        let outcome = apply_move(&start, Position::new(0, 0), Direction::Left);
        assert_eq!(outcome.position, Position::new(0, 0));
        assert_eq!(outcome.grid, start);
        assert!(!outcome.reached_goal);
    }

    #[test]
    fn accepted_step_moves_the_player_one_cell() {
        let start = grid(&["#####", "#P.G#", "#####"]);
        let outcome = apply_move(&start, Position::new(1, 1), Direction::Right);
        assert_eq!(outcome.position, Position::new(1, 2));
        assert!(!outcome.reached_goal);
        assert_eq!(outcome.grid.to_lines(), ["#####", "#.PG#", "#####"]);
    }

    #[test]
    fn stepping_onto_the_goal_reports_and_overwrites_it() {
        let start = grid(&["#####", "#.PG#", "#####"]);
        let outcome = apply_move(&start, Position::new(1, 2), Direction::Right);
        assert!(outcome.reached_goal);
        assert_eq!(outcome.position, Position::new(1, 3));
        assert_eq!(outcome.grid.to_lines(), ["#####", "#..P#", "#####"]);
        assert_eq!(outcome.grid.count(Cell::Goal), 0);
    }

    #[test]
    fn the_input_grid_is_never_mutated() {
        let start = grid(&["#####", "#P.G#", "#####"]);
        let before = start.clone();
        let _ = apply_move(&start, Position::new(1, 1), Direction::Right);
        assert_eq!(start, before);
    }
}
