#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Breadth-first shortest-path solver over maze grids.

use std::collections::VecDeque;

use maze_quest_core::{Direction, Grid, Position};

/// Minimum number of steps between two cells, or `None` when unreachable.
///
/// Breadth-first search over 4-connected non-wall cells with a dense visited
/// buffer; the frontier is processed strictly first-in first-out, so the
/// distance recorded when the goal is dequeued is minimal. Runs in O(N²) for
/// an N×N grid. Engine-generated mazes are always connected, but the solver
/// reports the sentinel rather than assuming so: a `None` for a generated
/// level signals a construction defect upstream.
#[must_use]
pub fn shortest_path_length(grid: &Grid, start: Position, goal: Position) -> Option<usize> {
    if !grid.contains(start) || !grid.contains(goal) {
        return None;
    }
    if grid.get(start).is_some_and(|cell| cell.is_wall()) {
        return None;
    }

    let cols = grid.cols();
    let mut visited = vec![false; grid.rows() * cols];
    visited[start.row() * cols + start.col()] = true;

    let mut frontier = VecDeque::new();
    frontier.push_back((start, 0));

    while let Some((position, distance)) = frontier.pop_front() {
        if position == goal {
            return Some(distance);
        }

        for direction in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            let Some(neighbor) = position.stepped(direction) else {
                continue;
            };
            let Some(cell) = grid.get(neighbor) else {
                continue;
            };
            if cell.is_wall() {
                continue;
            }

            let index = neighbor.row() * cols + neighbor.col();
            if visited[index] {
                continue;
            }
            visited[index] = true;
            frontier.push_back((neighbor, distance + 1));
        }
    }

    None
}
