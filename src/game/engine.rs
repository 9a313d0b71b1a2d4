use super::{
    action::Direction,
    config::GameConfig,
    grid::{CONSUME_AMOUNT, Grid},
    state::{GameState, Position, Snake},
};
use anyhow::{Result, bail, ensure};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

/// What a single tick did to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game is over; nothing changed
    Idle,
    /// The snake moved onto an empty cell
    Moved { head: Position },
    /// The snake ate from a cell and grew by one segment
    Consumed { at: Position, remaining: u8 },
    /// The snake ran into itself; the game is now over
    Collided { at: Position },
}

impl TickOutcome {
    /// Whether the tick changed anything the adapter should redraw
    pub fn changed(&self) -> bool {
        !matches!(self, TickOutcome::Idle)
    }
}

/// The game engine: owns the game state and every rule that changes it
#[derive(Debug)]
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
    state: GameState,
}

impl GameEngine {
    /// Create a new game engine with a fresh game
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = Self::seeded_rng(&config);
        let state = Self::initial_state(&config, &mut rng);

        Ok(Self { config, rng, state })
    }

    /// Create an engine around an existing state
    ///
    /// The state's grid must match `config.grid_size` and every snake
    /// segment must lie inside it.
    pub fn with_state(config: GameConfig, state: GameState) -> Result<Self> {
        config.validate()?;
        ensure!(
            state.grid_size() == config.grid_size,
            "grid is {0}x{0} but config expects {1}x{1}",
            state.grid_size(),
            config.grid_size
        );
        if let Some(outside) = state
            .snake
            .body()
            .iter()
            .find(|pos| !pos.is_within(config.grid_size))
        {
            bail!("snake segment ({}, {}) is outside the grid", outside.x, outside.y);
        }
        let rng = Self::seeded_rng(&config);

        Ok(Self { config, rng, state })
    }

    fn seeded_rng(config: &GameConfig) -> StdRng {
        match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    fn initial_state(config: &GameConfig, rng: &mut StdRng) -> GameState {
        let (x, y) = config.start_position();
        GameState::new(
            Snake::new(Position::new(x, y)),
            Direction::Right,
            Grid::random(config.grid_size, rng),
        )
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Read-only view of the current game
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state.game_over
    }

    /// Reset the game to its initial state with a freshly sampled grid
    pub fn reset(&mut self) {
        self.state = Self::initial_state(&self.config, &mut self.rng);
        info!(grid_size = self.config.grid_size, "game reset");
    }

    /// Change the direction read by the next tick
    ///
    /// Ignored once the game is over. Reversing straight into the neck is
    /// allowed and ends the game on the next tick.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self.state.game_over {
            return false;
        }

        self.state.direction = direction;
        true
    }

    /// Advance the game by one cell
    pub fn tick(&mut self) -> TickOutcome {
        let state = &mut self.state;
        if state.game_over {
            return TickOutcome::Idle;
        }

        let new_head = state
            .snake
            .head()
            .stepped(state.direction, self.config.grid_size);

        if state.snake.collides_with_body(new_head) {
            state.game_over = true;
            info!(
                score = state.score,
                length = state.snake.len(),
                x = new_head.x,
                y = new_head.y,
                "snake collided with itself"
            );
            return TickOutcome::Collided { at: new_head };
        }

        let ate = state.grid.level(new_head) > 0;
        state.snake = state.snake.advanced(new_head, ate);
        state.steps += 1;

        if ate {
            let remaining = state.grid.consume(new_head);
            state.score += u32::from(CONSUME_AMOUNT);
            debug!(
                x = new_head.x,
                y = new_head.y,
                remaining,
                score = state.score,
                "consumed"
            );
            TickOutcome::Consumed {
                at: new_head,
                remaining,
            }
        } else {
            debug!(x = new_head.x, y = new_head.y, "moved");
            TickOutcome::Moved { head: new_head }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::GamePhase;

    fn engine_with(snake: Vec<Position>, direction: Direction, grid: Grid) -> GameEngine {
        let config = GameConfig::new(grid.size()).with_seed(1);
        let state = GameState::new(Snake::from_body(snake).unwrap(), direction, grid);
        GameEngine::with_state(config, state).unwrap()
    }

    #[test]
    fn test_new_game() {
        let engine = GameEngine::new(GameConfig::default().with_seed(5)).unwrap();
        let state = engine.state();

        assert!(!state.game_over);
        assert_eq!(state.phase(), GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.steps, 0);
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.snake.body(), &[Position::new(10, 10)]);
        assert_eq!(state.grid_size(), 20);
    }

    #[test]
    fn test_consume_scenario() {
        let mut grid = Grid::filled(20, 0);
        grid.set_level(Position::new(11, 10), 4);
        let mut engine = engine_with(vec![Position::new(10, 10)], Direction::Right, grid);

        let outcome = engine.tick();

        let state = engine.state();
        assert_eq!(
            outcome,
            TickOutcome::Consumed {
                at: Position::new(11, 10),
                remaining: 2
            }
        );
        assert_eq!(state.snake.head(), Position::new(11, 10));
        assert_eq!(state.grid.level(Position::new(11, 10)), 2);
        assert_eq!(state.score, 2);
        assert_eq!(state.snake.len(), 2);
    }

    #[test]
    fn test_consume_low_cell_floors_at_zero() {
        let mut grid = Grid::filled(20, 0);
        grid.set_level(Position::new(11, 10), 1);
        let mut engine = engine_with(vec![Position::new(10, 10)], Direction::Right, grid);

        engine.tick();

        assert_eq!(engine.state().grid.level(Position::new(11, 10)), 0);
        assert_eq!(engine.state().score, 2);
        assert_eq!(engine.state().snake.len(), 2);
    }

    #[test]
    fn test_wraparound_scenario() {
        let mut engine = engine_with(
            vec![Position::new(19, 10)],
            Direction::Right,
            Grid::filled(20, 0),
        );

        let outcome = engine.tick();

        assert_eq!(
            outcome,
            TickOutcome::Moved {
                head: Position::new(0, 10)
            }
        );
        assert_eq!(engine.state().snake.head(), Position::new(0, 10));
    }

    #[test]
    fn test_head_stays_in_bounds_at_every_edge() {
        let cases = [
            (Position::new(0, 5), Direction::Left, Position::new(19, 5)),
            (Position::new(5, 0), Direction::Up, Position::new(5, 19)),
            (Position::new(5, 19), Direction::Down, Position::new(5, 0)),
            (Position::new(19, 19), Direction::Right, Position::new(0, 19)),
        ];

        for (start, direction, expected) in cases {
            let mut engine = engine_with(vec![start], direction, Grid::filled(20, 0));
            engine.tick();
            let head = engine.state().snake.head();
            assert_eq!(head, expected);
            assert!(head.is_within(20));
        }
    }

    #[test]
    fn test_empty_cell_keeps_length_and_score() {
        let mut engine = engine_with(
            vec![Position::new(5, 5), Position::new(4, 5), Position::new(3, 5)],
            Direction::Right,
            Grid::filled(10, 0),
        );

        engine.tick();

        let state = engine.state();
        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.score, 0);
        assert_eq!(
            state.snake.body(),
            &[Position::new(6, 5), Position::new(5, 5), Position::new(4, 5)]
        );
        assert_eq!(state.steps, 1);
    }

    #[test]
    fn test_self_collision_leaves_snake_unchanged() {
        // Head at (5,5) heading Up into (5,4), which is part of the body
        let body = vec![
            Position::new(5, 5),
            Position::new(6, 5),
            Position::new(6, 4),
            Position::new(5, 4),
            Position::new(4, 4),
        ];
        let mut engine = engine_with(body.clone(), Direction::Up, Grid::filled(10, 3));

        let outcome = engine.tick();

        assert_eq!(
            outcome,
            TickOutcome::Collided {
                at: Position::new(5, 4)
            }
        );
        let state = engine.state();
        assert!(state.game_over);
        assert_eq!(state.snake.body(), body.as_slice());
        assert_eq!(state.score, 0);
        assert_eq!(state.grid, Grid::filled(10, 3));
    }

    #[test]
    fn test_reversal_into_neck_collides() {
        let mut engine = engine_with(
            vec![Position::new(5, 5), Position::new(4, 5)],
            Direction::Right,
            Grid::filled(10, 0),
        );

        assert!(engine.set_direction(Direction::Left));
        let outcome = engine.tick();

        assert!(matches!(outcome, TickOutcome::Collided { .. }));
        assert!(engine.is_game_over());
    }

    #[test]
    fn test_moving_into_tail_cell_collides() {
        // Square loop of four: the head steps onto the cell the tail occupies
        let mut engine = engine_with(
            vec![
                Position::new(1, 1),
                Position::new(1, 2),
                Position::new(2, 2),
                Position::new(2, 1),
            ],
            Direction::Right,
            Grid::filled(10, 0),
        );

        // The tail is still part of the body while collision is checked
        let outcome = engine.tick();
        assert!(matches!(outcome, TickOutcome::Collided { .. }));
    }

    #[test]
    fn test_direction_change_applies_next_tick() {
        let mut engine = engine_with(
            vec![Position::new(5, 5)],
            Direction::Right,
            Grid::filled(10, 0),
        );

        engine.set_direction(Direction::Down);
        engine.tick();

        assert_eq!(engine.state().snake.head(), Position::new(5, 6));
    }

    #[test]
    fn test_game_over_freezes_state() {
        let mut engine = engine_with(
            vec![Position::new(5, 5), Position::new(4, 5)],
            Direction::Left,
            Grid::filled(10, 4),
        );
        engine.tick();
        assert!(engine.is_game_over());
        let frozen = engine.state().clone();

        for _ in 0..5 {
            assert_eq!(engine.tick(), TickOutcome::Idle);
            assert!(!engine.set_direction(Direction::Up));
        }

        assert_eq!(engine.state(), &frozen);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut engine = engine_with(
            vec![Position::new(5, 5), Position::new(4, 5)],
            Direction::Left,
            Grid::filled(10, 0),
        );
        engine.tick();
        assert!(engine.is_game_over());

        engine.reset();

        let state = engine.state();
        assert!(!state.game_over);
        assert_eq!(state.score, 0);
        assert_eq!(state.steps, 0);
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.snake.body(), &[Position::new(5, 5)]);
        for row in state.grid.rows() {
            assert!(row.iter().all(|level| (1..=4).contains(level)));
        }
    }

    #[test]
    fn test_reset_while_running_is_safe() {
        let mut engine = GameEngine::new(GameConfig::small().with_seed(9)).unwrap();
        engine.set_direction(Direction::Down);
        engine.tick();
        engine.tick();

        engine.reset();

        assert_eq!(engine.state().snake.len(), 1);
        assert_eq!(engine.state().direction, Direction::Right);
        assert_eq!(engine.state().score, 0);
    }

    #[test]
    fn test_tick_outcome_changed() {
        assert!(!TickOutcome::Idle.changed());
        assert!(
            TickOutcome::Moved {
                head: Position::new(0, 0)
            }
            .changed()
        );
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        assert!(GameEngine::new(GameConfig::new(0).with_seed(1)).is_err());

        let config = GameConfig {
            tick_interval_ms: 0,
            ..GameConfig::default()
        };
        assert!(GameEngine::new(config).is_err());
    }

    #[test]
    fn test_with_state_rejects_mismatched_grid() {
        let state = GameState::new(
            Snake::new(Position::new(1, 1)),
            Direction::Right,
            Grid::filled(5, 0),
        );

        let err = GameEngine::with_state(GameConfig::new(20), state).unwrap_err();
        assert!(err.to_string().contains("config expects 20x20"));
    }

    #[test]
    fn test_with_state_rejects_snake_outside_grid() {
        let state = GameState::new(
            Snake::from_body(vec![Position::new(4, 4), Position::new(5, 4)]).unwrap(),
            Direction::Right,
            Grid::filled(5, 0),
        );

        let err = GameEngine::with_state(GameConfig::new(5), state).unwrap_err();
        assert!(err.to_string().contains("(5, 4)"));
    }

    #[test]
    fn test_with_state_rejects_zero_grid() {
        let state = GameState::new(
            Snake::new(Position::new(0, 0)),
            Direction::Right,
            Grid::filled(0, 0),
        );
        assert!(GameEngine::with_state(GameConfig::new(0), state).is_err());
    }
}
