#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Quest engine.
//!
//! This crate defines the data model that connects the pure systems, the
//! authoritative world, and the adapters. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for collaborators
//! (rendering, audio, progress tracking) to react to deterministically. The
//! grid text format defined here is the only boundary representation of a
//! maze and must round-trip exactly.

use std::{error::Error, fmt};

use serde::{Deserialize, Serialize};

/// Number of flavor-text entries cycled through by the level composer.
pub const FLAVOR_TABLE_LENGTH: u32 = 30;

/// Contents of a single maze cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Open corridor floor a player may occupy.
    Empty,
    /// Solid wall that blocks movement.
    Wall,
    /// Cell currently occupied by the player.
    Player,
    /// Cell holding the level goal.
    Goal,
}

impl Cell {
    /// Single-character symbol used by the grid text format.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Wall => '#',
            Self::Player => 'P',
            Self::Goal => 'G',
        }
    }

    /// Parses a cell from its text-format symbol.
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' => Some(Self::Empty),
            '#' => Some(Self::Wall),
            'P' => Some(Self::Player),
            'G' => Some(Self::Goal),
            _ => None,
        }
    }

    /// Reports whether the cell blocks movement and pathfinding.
    #[must_use]
    pub const fn is_wall(self) -> bool {
        matches!(self, Self::Wall)
    }
}

/// Location of a single grid cell expressed as row and column indices.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct Position {
    row: usize,
    col: usize,
}

impl Position {
    /// Creates a new grid position.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Zero-based row index of the position.
    #[must_use]
    pub const fn row(&self) -> usize {
        self.row
    }

    /// Zero-based column index of the position.
    #[must_use]
    pub const fn col(&self) -> usize {
        self.col
    }

    /// Position one cell away in the provided direction.
    ///
    /// Returns `None` when the step would leave the non-negative index
    /// space; grid bounds are checked separately by the consumer holding
    /// the grid.
    #[must_use]
    pub fn stepped(self, direction: Direction) -> Option<Self> {
        let (row_delta, col_delta) = direction.delta();
        let row = self.row.checked_add_signed(row_delta)?;
        let col = self.col.checked_add_signed(col_delta)?;
        Some(Self { row, col })
    }
}

/// Cardinal movement directions available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Unit (row, col) delta applied by one step in this direction.
    #[must_use]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }
}

/// Difficulty tier driving the static size, loop, seed, and budget tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    /// Small mazes with a generous move budget.
    Easy,
    /// Mid-sized mazes with a moderate budget.
    Medium,
    /// Large mazes whose budget forces near-optimal play.
    Hard,
}

impl Difficulty {
    /// Base value folded into the deterministic seed for this tier.
    #[must_use]
    pub const fn seed_base(self) -> i64 {
        match self {
            Self::Easy => 1_000,
            Self::Medium => 2_000,
            Self::Hard => 3_000,
        }
    }

    /// Deterministic seed for the provided level, a pure function of
    /// (difficulty, level) so every player sees an identical maze.
    #[must_use]
    pub const fn seed(self, level: LevelNumber) -> i64 {
        self.seed_base() + level.get() as i64 * 7
    }

    /// Odd grid side length for the provided level, stepped at fixed
    /// thresholds and non-decreasing in the level number.
    #[must_use]
    pub const fn grid_size(self, level: LevelNumber) -> usize {
        let level = level.get();
        match self {
            Self::Easy => {
                if level < 15 {
                    7
                } else {
                    9
                }
            }
            Self::Medium => {
                if level < 10 {
                    9
                } else if level < 20 {
                    11
                } else {
                    13
                }
            }
            Self::Hard => {
                if level <= 5 {
                    13
                } else if level <= 12 {
                    15
                } else if level <= 20 {
                    17
                } else {
                    19
                }
            }
        }
    }

    /// Number of extra wall openings requested from the loop injector.
    #[must_use]
    pub const fn loop_target(self) -> usize {
        match self {
            Self::Easy => 1,
            Self::Medium => 2,
            Self::Hard => 4,
        }
    }

    /// Move-budget buffer granted on top of the shortest-path length.
    ///
    /// Hard's buffer floors at 2 so every level keeps a minimum of two
    /// moves of headroom over the optimal walk.
    #[must_use]
    pub const fn move_buffer(self, shortest_path: usize) -> usize {
        match self {
            Self::Easy => shortest_path / 2 + 5,
            Self::Medium => shortest_path * 3 / 10 + 4,
            Self::Hard => {
                let tenth = shortest_path / 10;
                if tenth < 2 {
                    2
                } else {
                    tenth
                }
            }
        }
    }
}

/// One-based level index within a difficulty tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LevelNumber(u32);

impl LevelNumber {
    /// Creates a new level number with the provided value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the level.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Index into the fixed flavor-text table for this level.
    #[must_use]
    pub const fn flavor_index(&self) -> usize {
        (self.0.saturating_sub(1) % FLAVOR_TABLE_LENGTH) as usize
    }
}

/// Maximum number of accepted moves permitted before forced failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MoveBudget(u32);

impl MoveBudget {
    /// Creates a budget with an explicit move count.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Derives the budget from a shortest-path length and difficulty.
    ///
    /// This formula is authoritative for difficulty balancing and must be
    /// reproduced identically by any caller that recomputes budgets.
    #[must_use]
    pub const fn for_path(shortest_path: usize, difficulty: Difficulty) -> Self {
        let total = shortest_path + difficulty.move_buffer(shortest_path);
        Self(total as u32)
    }

    /// Retrieves the numeric move allowance.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Rectangular maze grid stored in dense row-major order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid of the provided dimensions filled with one cell value.
    #[must_use]
    pub fn filled(rows: usize, cols: usize, cell: Cell) -> Self {
        Self {
            rows,
            cols,
            cells: vec![cell; rows * cols],
        }
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Reports whether the position lies within the grid bounds.
    #[must_use]
    pub const fn contains(&self, position: Position) -> bool {
        position.row() < self.rows && position.col() < self.cols
    }

    /// Cell stored at the provided position, if it lies within bounds.
    #[must_use]
    pub fn get(&self, position: Position) -> Option<Cell> {
        self.index(position).map(|index| self.cells[index])
    }

    /// Overwrites the cell at the provided position.
    ///
    /// Positions outside the grid are ignored so mutation passes never
    /// write out of bounds.
    pub fn set(&mut self, position: Position, cell: Cell) {
        if let Some(index) = self.index(position) {
            self.cells[index] = cell;
        }
    }

    /// First position holding the provided cell value in row-major order.
    #[must_use]
    pub fn find(&self, cell: Cell) -> Option<Position> {
        self.cells
            .iter()
            .position(|candidate| *candidate == cell)
            .map(|index| Position::new(index / self.cols, index % self.cols))
    }

    /// Number of cells holding the provided value.
    #[must_use]
    pub fn count(&self, cell: Cell) -> usize {
        self.cells
            .iter()
            .filter(|candidate| **candidate == cell)
            .count()
    }

    /// Number of traversable (non-wall) cells.
    #[must_use]
    pub fn open_cell_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_wall()).count()
    }

    /// Serializes the grid into the text format, one string per row.
    #[must_use]
    pub fn to_lines(&self) -> Vec<String> {
        self.cells
            .chunks(self.cols)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect()
    }

    /// Parses a grid from the text format.
    ///
    /// Every row must have the same length and contain only the symbols
    /// `.`, `#`, `P`, and `G`; parsing and [`Grid::to_lines`] round-trip
    /// exactly.
    pub fn parse<S>(lines: &[S]) -> Result<Self, GridParseError>
    where
        S: AsRef<str>,
    {
        let Some(first) = lines.first() else {
            return Err(GridParseError::EmptyLayout);
        };
        let cols = first.as_ref().chars().count();
        if cols == 0 {
            return Err(GridParseError::EmptyLayout);
        }

        let mut cells = Vec::with_capacity(lines.len() * cols);
        for (row, line) in lines.iter().enumerate() {
            let mut width = 0;
            for (col, symbol) in line.as_ref().chars().enumerate() {
                let cell = Cell::from_symbol(symbol)
                    .ok_or(GridParseError::UnknownSymbol { row, col, symbol })?;
                cells.push(cell);
                width += 1;
            }
            if width != cols {
                return Err(GridParseError::RaggedRow {
                    row,
                    length: width,
                    expected: cols,
                });
            }
        }

        Ok(Self {
            rows: lines.len(),
            cols,
            cells,
        })
    }

    fn index(&self, position: Position) -> Option<usize> {
        if self.contains(position) {
            Some(position.row() * self.cols + position.col())
        } else {
            None
        }
    }
}

/// Errors that can occur while parsing the grid text format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridParseError {
    /// The layout contained no rows or an empty first row.
    EmptyLayout,
    /// A row's length differed from the first row's length.
    RaggedRow {
        /// Zero-based index of the offending row.
        row: usize,
        /// Number of cells found in the row.
        length: usize,
        /// Number of cells expected from the first row.
        expected: usize,
    },
    /// A character outside the `.#PG` alphabet was encountered.
    UnknownSymbol {
        /// Zero-based row of the offending character.
        row: usize,
        /// Zero-based column of the offending character.
        col: usize,
        /// The character that failed to parse.
        symbol: char,
    },
}

impl fmt::Display for GridParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLayout => write!(formatter, "grid layout contains no cells"),
            Self::RaggedRow {
                row,
                length,
                expected,
            } => write!(
                formatter,
                "row {row} holds {length} cells but {expected} were expected"
            ),
            Self::UnknownSymbol { row, col, symbol } => write!(
                formatter,
                "unknown cell symbol {symbol:?} at row {row}, column {col}"
            ),
        }
    }
}

impl Error for GridParseError {}

/// Finished level produced by the composer, immutable once returned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelLayout {
    grid: Grid,
    flavor_text: String,
}

impl LevelLayout {
    /// Creates a new layout from a finished grid and its flavor text.
    #[must_use]
    pub fn new(grid: Grid, flavor_text: String) -> Self {
        Self { grid, flavor_text }
    }

    /// Finished grid holding exactly one player and one goal cell.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Narrative text shown alongside the level.
    #[must_use]
    pub fn flavor_text(&self) -> &str {
        &self.flavor_text
    }

    /// Consumes the layout, yielding the grid and flavor text.
    #[must_use]
    pub fn into_parts(self) -> (Grid, String) {
        (self.grid, self.flavor_text)
    }
}

/// Lifecycle state of a play session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionStatus {
    /// No level has been loaded yet.
    Idle,
    /// A level is loaded and accepting moves.
    Playing,
    /// The goal was reached within the move budget.
    Won,
    /// The move budget was exhausted before reaching the goal.
    GameOver,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Composes and installs the level for the provided tier and number.
    LoadLevel {
        /// Level number to compose.
        level: LevelNumber,
        /// Difficulty tier driving the generation tables.
        difficulty: Difficulty,
    },
    /// Attempts to step the player one cell in the provided direction.
    MovePlayer {
        /// Direction of the requested step.
        direction: Direction,
    },
    /// Regenerates the current level, resetting position and move count.
    RetryLevel,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that a level was composed and installed.
    LevelLoaded {
        /// Level number that was loaded.
        level: LevelNumber,
        /// Difficulty tier of the loaded level.
        difficulty: Difficulty,
        /// Move budget derived from the level's shortest path.
        budget: MoveBudget,
        /// Narrative text attached to the level.
        flavor_text: String,
    },
    /// Reports that a composed level failed its solvability check.
    ///
    /// Connectivity is a carving contract, so this event signals a
    /// construction defect rather than an expected outcome.
    LevelGenerationFailed {
        /// Level number whose composition failed.
        level: LevelNumber,
        /// Difficulty tier of the failed composition.
        difficulty: Difficulty,
    },
    /// Confirms that the player advanced one cell.
    MoveAccepted {
        /// Cell the player occupied before the step.
        from: Position,
        /// Cell the player occupies after the step.
        to: Position,
    },
    /// Reports that a step into a wall or off the grid was refused.
    MoveRejected {
        /// Direction of the refused step.
        direction: Direction,
    },
    /// Announces that the player reached the goal cell.
    GoalReached {
        /// Number of accepted moves spent reaching the goal.
        moves_used: u32,
    },
    /// Announces that the move budget ran out before the goal.
    BudgetExhausted {
        /// Budget that was exhausted.
        budget: MoveBudget,
    },
}
