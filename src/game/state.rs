use super::action::Direction;
use super::grid::Grid;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move one cell in a direction, wrapping around a square grid of `size`
    pub fn stepped(&self, direction: Direction, size: usize) -> Self {
        let (dx, dy) = direction.delta();
        let size = size as i32;
        Self {
            x: (self.x + dx).rem_euclid(size),
            y: (self.y + dy).rem_euclid(size),
        }
    }

    /// Whether the position lies inside a square grid of `size`
    pub fn is_within(&self, size: usize) -> bool {
        let size = size as i32;
        (0..size).contains(&self.x) && (0..size).contains(&self.y)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    /// Body segments, with head at index 0
    body: Vec<Position>,
}

impl Snake {
    /// Create a one-segment snake
    pub fn new(head: Position) -> Self {
        Self { body: vec![head] }
    }

    /// Create a snake from explicit segments, head first
    ///
    /// Returns `None` for an empty body.
    pub fn from_body(body: Vec<Position>) -> Option<Self> {
        if body.is_empty() {
            None
        } else {
            Some(Self { body })
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// All segments, head first
    pub fn body(&self) -> &[Position] {
        &self.body
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    /// Check if any segment, head included, sits on `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Build the next body: `new_head` in front, tail kept only when growing
    pub fn advanced(&self, new_head: Position, grow: bool) -> Snake {
        let keep = if grow {
            self.body.len()
        } else {
            self.body.len() - 1
        };

        let mut body = Vec::with_capacity(keep + 1);
        body.push(new_head);
        body.extend_from_slice(&self.body[..keep]);
        Snake { body }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Coarse lifecycle of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Running,
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub direction: Direction,
    pub grid: Grid,
    pub score: u32,
    pub steps: u32,
    pub game_over: bool,
}

impl GameState {
    /// Create a running game state
    pub fn new(snake: Snake, direction: Direction, grid: Grid) -> Self {
        Self {
            snake,
            direction,
            grid,
            score: 0,
            steps: 0,
            game_over: false,
        }
    }

    pub fn phase(&self) -> GamePhase {
        if self.game_over {
            GamePhase::GameOver
        } else {
            GamePhase::Running
        }
    }

    pub fn grid_size(&self) -> usize {
        self.grid.size()
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }
}
