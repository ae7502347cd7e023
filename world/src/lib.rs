#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative play-session state for Maze Quest.
//!
//! The world owns the grid between level load and level change. Adapters
//! submit [`Command`] values through [`apply`], the only mutation entry
//! point, and react to the broadcast [`Event`] values; read access goes
//! through the [`query`] module. Presentation concerns (rendering, audio,
//! input capture) live entirely in the adapters that consume those events.

use maze_quest_core::{
    Cell, Command, Difficulty, Direction, Event, Grid, LevelNumber, MoveBudget, Position,
    SessionStatus,
};
use maze_quest_system_generation::compose_level;
use maze_quest_system_movement::apply_move;
use maze_quest_system_pathfinding::shortest_path_length;

/// Represents the authoritative Maze Quest session state.
#[derive(Debug)]
pub struct World {
    status: SessionStatus,
    level: LevelNumber,
    difficulty: Option<Difficulty>,
    active: Option<ActiveLevel>,
}

/// Live state of the level currently being played.
#[derive(Debug)]
struct ActiveLevel {
    grid: Grid,
    player: Position,
    goal: Position,
    flavor_text: String,
    budget: MoveBudget,
    moves_used: u32,
}

impl World {
    /// Creates a new idle world with no level loaded.
    #[must_use]
    pub fn new() -> Self {
        Self {
            status: SessionStatus::Idle,
            level: LevelNumber::new(1),
            difficulty: None,
            active: None,
        }
    }

    fn load_level(
        &mut self,
        level: LevelNumber,
        difficulty: Difficulty,
        out_events: &mut Vec<Event>,
    ) {
        let layout = compose_level(level, difficulty);
        let (grid, flavor_text) = layout.into_parts();

        let endpoints = grid.find(Cell::Player).zip(grid.find(Cell::Goal));
        let solved = endpoints
            .and_then(|(player, goal)| {
                shortest_path_length(&grid, player, goal).map(|distance| (player, goal, distance))
            });

        // Carving guarantees connectivity, so a missing endpoint or an
        // unreachable goal is a construction defect: report it instead of
        // installing an unwinnable level.
        let Some((player, goal, distance)) = solved else {
            self.status = SessionStatus::Idle;
            self.active = None;
            out_events.push(Event::LevelGenerationFailed { level, difficulty });
            return;
        };

        let budget = MoveBudget::for_path(distance, difficulty);
        self.level = level;
        self.difficulty = Some(difficulty);
        self.status = SessionStatus::Playing;
        self.active = Some(ActiveLevel {
            grid,
            player,
            goal,
            flavor_text: flavor_text.clone(),
            budget,
            moves_used: 0,
        });

        out_events.push(Event::LevelLoaded {
            level,
            difficulty,
            budget,
            flavor_text,
        });
    }

    fn move_player(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        if self.status != SessionStatus::Playing {
            return;
        }
        let Some(active) = self.active.as_mut() else {
            return;
        };

        let outcome = apply_move(&active.grid, active.player, direction);
        if outcome.position == active.player {
            out_events.push(Event::MoveRejected { direction });
            return;
        }

        let from = active.player;
        active.grid = outcome.grid;
        active.player = outcome.position;
        active.moves_used += 1;
        out_events.push(Event::MoveAccepted {
            from,
            to: outcome.position,
        });

        if outcome.reached_goal {
            self.status = SessionStatus::Won;
            out_events.push(Event::GoalReached {
                moves_used: active.moves_used,
            });
        } else if active.moves_used >= active.budget.get() {
            self.status = SessionStatus::GameOver;
            out_events.push(Event::BudgetExhausted {
                budget: active.budget,
            });
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::LoadLevel { level, difficulty } => {
            world.load_level(level, difficulty, out_events);
        }
        Command::MovePlayer { direction } => {
            world.move_player(direction, out_events);
        }
        Command::RetryLevel => {
            if let Some(difficulty) = world.difficulty {
                world.load_level(world.level, difficulty, out_events);
            }
        }
    }
}

/// Query functions that provide read-only access to the session state.
pub mod query {
    use super::World;
    use maze_quest_core::{Difficulty, Grid, LevelNumber, MoveBudget, Position, SessionStatus};

    /// Current lifecycle status of the session.
    #[must_use]
    pub fn status(world: &World) -> SessionStatus {
        world.status
    }

    /// Level and difficulty of the loaded session, when one exists.
    #[must_use]
    pub fn level(world: &World) -> Option<(LevelNumber, Difficulty)> {
        world.difficulty.map(|difficulty| (world.level, difficulty))
    }

    /// Grid of the active level.
    #[must_use]
    pub fn grid(world: &World) -> Option<&Grid> {
        world.active.as_ref().map(|active| &active.grid)
    }

    /// Active grid rendered in the boundary text format, empty when idle.
    #[must_use]
    pub fn grid_lines(world: &World) -> Vec<String> {
        world
            .active
            .as_ref()
            .map(|active| active.grid.to_lines())
            .unwrap_or_default()
    }

    /// Player position within the active level.
    #[must_use]
    pub fn player_position(world: &World) -> Option<Position> {
        world.active.as_ref().map(|active| active.player)
    }

    /// Goal position within the active level.
    #[must_use]
    pub fn goal_position(world: &World) -> Option<Position> {
        world.active.as_ref().map(|active| active.goal)
    }

    /// Narrative text attached to the active level.
    #[must_use]
    pub fn flavor_text(world: &World) -> Option<&str> {
        world.active.as_ref().map(|active| active.flavor_text.as_str())
    }

    /// Move budget of the active level.
    #[must_use]
    pub fn move_budget(world: &World) -> Option<MoveBudget> {
        world.active.as_ref().map(|active| active.budget)
    }

    /// Number of accepted moves spent in the active level.
    #[must_use]
    pub fn moves_used(world: &World) -> u32 {
        world
            .active
            .as_ref()
            .map_or(0, |active| active.moves_used)
    }

    /// Accepted moves still available before the budget runs out.
    #[must_use]
    pub fn moves_remaining(world: &World) -> Option<u32> {
        world
            .active
            .as_ref()
            .map(|active| active.budget.get().saturating_sub(active.moves_used))
    }
}

#[cfg(test)]
mod tests {
    use super::{apply, query, World};
    use maze_quest_core::{Command, Difficulty, Direction, Event, LevelNumber, SessionStatus};

    #[test]
    fn idle_world_ignores_movement() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::MovePlayer {
                direction: Direction::Down,
            },
            &mut events,
        );
        assert!(events.is_empty());
        assert_eq!(query::status(&world), SessionStatus::Idle);
    }

    #[test]
    fn idle_world_ignores_retry() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(&mut world, Command::RetryLevel, &mut events);
        assert!(events.is_empty());
    }

    #[test]
    fn loading_installs_a_playing_session() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::LoadLevel {
                level: LevelNumber::new(1),
                difficulty: Difficulty::Easy,
            },
            &mut events,
        );

        assert_eq!(query::status(&world), SessionStatus::Playing);
        assert_eq!(query::moves_used(&world), 0);
        assert!(query::grid(&world).is_some());
        assert!(matches!(events.as_slice(), [Event::LevelLoaded { .. }]));
    }

    #[test]
    fn retry_replays_the_identical_level() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::LoadLevel {
                level: LevelNumber::new(4),
                difficulty: Difficulty::Medium,
            },
            &mut events,
        );
        let first_lines = query::grid_lines(&world);

        apply(
            &mut world,
            Command::MovePlayer {
                direction: Direction::Down,
            },
            &mut events,
        );
        apply(&mut world, Command::RetryLevel, &mut events);

        assert_eq!(query::grid_lines(&world), first_lines);
        assert_eq!(query::moves_used(&world), 0);
        assert_eq!(query::status(&world), SessionStatus::Playing);
    }
}
