#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic level generation for Maze Quest.
//!
//! Composition runs in two independent passes: a recursive-backtracker pass
//! carves a perfect maze (a spanning tree of corridors), then a loop
//! injection pass reopens a handful of walls to add alternate routes. Both
//! passes draw from one [`SequenceGenerator`] seeded purely from the
//! (difficulty, level) pair, so two players on the same level always see an
//! identical maze.

mod rng;

pub use rng::SequenceGenerator;

use maze_quest_core::{Cell, Difficulty, Grid, LevelLayout, LevelNumber, Position};

/// Two-step jumps between odd-lattice cells, in Up/Down/Left/Right order.
const CARVE_JUMPS: [(isize, isize); 4] = [(-2, 0), (2, 0), (0, -2), (0, 2)];

/// Probe allowance for loop injection before accepting a sparser maze.
const LOOP_PROBE_LIMIT: usize = 100;

/// Fixed flavor-text table cycled by level number, independent of the seed.
const FLAVOR_TEXTS: [&str; 30] = [
    "Welcome to the mud! Follow the path.",
    "Walls are solid. Bacon is not.",
    "Twists and turns... don't get dizzy!",
    "Is that a shortcut? Or a trap?",
    "Calculate your steps carefully.",
    "The path is never straight.",
    "Mud is waiting... if you can find it.",
    "Left? Right? Maybe... Up?",
    "Think before you oink.",
    "Level 10! The labyrinth tightens!",
    "Don't get lost in the sauce.",
    "A true Super Pig knows the way.",
    "Dead ends are just resting spots.",
    "Almost there... theoretically.",
    "Use your big brain!",
    "The goal smells like truffles.",
    "Watch out for the long way around.",
    "Speed is good, accuracy is better.",
    "Only one path is the shortest.",
    "Level 20! It's getting serious.",
    "Getting harder, isn't it?",
    "Navigate the chaos.",
    "Every step counts.",
    "Don't backtrack if you don't have to.",
    "Focus on the destination.",
    "The walls are closing in!",
    "Master of the Maze!",
    "Two levels left! Stay sharp!",
    "One... last... puzzle.",
    "FINAL LEVEL! PROVE YOUR WORTH!",
];

/// Composes the finished layout for the provided level and difficulty.
///
/// The grid side length, loop count, and seed all come from the static
/// difficulty tables; the start is fixed at (1, 1) and the goal at
/// (size-2, size-2), both open by carving construction. The returned layout
/// holds exactly one player cell and one goal cell.
#[must_use]
pub fn compose_level(level: LevelNumber, difficulty: Difficulty) -> LevelLayout {
    let mut rng = SequenceGenerator::new(difficulty.seed(level));
    let size = difficulty.grid_size(level);

    let mut grid = carve_maze(size, &mut rng);
    // Under-attainment after the probe limit is a silent degradation.
    let _ = inject_loops(&mut grid, difficulty.loop_target(), &mut rng);

    grid.set(Position::new(1, 1), Cell::Player);
    grid.set(Position::new(size - 2, size - 2), Cell::Goal);

    let flavor = FLAVOR_TEXTS[level.flavor_index()];
    LevelLayout::new(grid, format!("Lvl {}: {flavor}", level.get()))
}

/// Carves a perfect maze into an all-wall grid of the provided odd size.
///
/// Randomized depth-first carving over the lattice of odd coordinates with
/// an explicit position stack: at every visit the four two-step jumps are
/// freshly shuffled, the first jump landing on a strictly interior wall
/// cell is taken (opening the midpoint wall on the way), and the stack pops
/// when no jump qualifies. Every reachable odd-coordinate cell is visited
/// exactly once, so the carved corridors form a spanning tree with a unique
/// path between any two open cells.
///
/// `size` must be odd and at least 5 so the border stays solid and the
/// fixed start and goal cells are distinct interior odd cells.
#[must_use]
pub fn carve_maze(size: usize, rng: &mut SequenceGenerator) -> Grid {
    debug_assert!(
        size >= 5 && size % 2 == 1,
        "carving requires an odd size of at least 5"
    );

    let mut grid = Grid::filled(size, size, Cell::Wall);
    let start = Position::new(1, 1);
    grid.set(start, Cell::Empty);
    let mut stack = vec![start];

    while let Some(&current) = stack.last() {
        let mut jumps = CARVE_JUMPS;
        rng.shuffle(&mut jumps);

        let mut advanced = false;
        for (row_jump, col_jump) in jumps {
            let Some(neighbor) = interior_offset(current, row_jump, col_jump, size) else {
                continue;
            };
            if grid.get(neighbor) != Some(Cell::Wall) {
                continue;
            }

            let midpoint = Position::new(
                (current.row() + neighbor.row()) / 2,
                (current.col() + neighbor.col()) / 2,
            );
            grid.set(midpoint, Cell::Empty);
            grid.set(neighbor, Cell::Empty);
            stack.push(neighbor);
            advanced = true;
            break;
        }

        if !advanced {
            let _ = stack.pop();
        }
    }

    grid
}

/// Opens up to `count` additional walls to reintroduce cycles.
///
/// Each of at most 100 probes picks a uniformly random interior wall cell
/// and accepts it only when exactly one of its axis pairs (both vertical
/// neighbors, or both horizontal neighbors) is already open. The exclusive
/// or rejects four-way junctions, which would carve wide rooms, and walls
/// touching no corridor pair, which would merely extend a dead end. Returns
/// the number of accepted carves, which may fall short of `count` when the
/// probes run out.
pub fn inject_loops(grid: &mut Grid, count: usize, rng: &mut SequenceGenerator) -> usize {
    let size = grid.rows();
    let mut accepted = 0;
    let mut probes = 0;

    while accepted < count && probes < LOOP_PROBE_LIMIT {
        probes += 1;
        let row = rng.range_int(1, size - 1);
        let col = rng.range_int(1, size - 1);
        let candidate = Position::new(row, col);

        if grid.get(candidate) != Some(Cell::Wall) {
            continue;
        }

        let opens_vertical = is_open(grid, row - 1, col) && is_open(grid, row + 1, col);
        let opens_horizontal = is_open(grid, row, col - 1) && is_open(grid, row, col + 1);
        if opens_vertical != opens_horizontal {
            grid.set(candidate, Cell::Empty);
            accepted += 1;
        }
    }

    accepted
}

fn is_open(grid: &Grid, row: usize, col: usize) -> bool {
    grid.get(Position::new(row, col))
        .is_some_and(|cell| !cell.is_wall())
}

fn interior_offset(
    position: Position,
    row_delta: isize,
    col_delta: isize,
    size: usize,
) -> Option<Position> {
    let row = position.row().checked_add_signed(row_delta)?;
    let col = position.col().checked_add_signed(col_delta)?;
    if row == 0 || col == 0 || row >= size - 1 || col >= size - 1 {
        return None;
    }
    Some(Position::new(row, col))
}
