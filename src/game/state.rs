use super::direction::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position one cell in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
}

impl Snake {
    /// Create a new single-segment snake at the given cell
    pub fn new(start: Position) -> Self {
        Self { body: vec![start] }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    /// Check if position is occupied by any segment, head included
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Advance the snake one cell to the given head position.
    ///
    /// A plain move drops the tail. Eating keeps the tail and duplicates it
    /// once, so the snake comes out two segments longer; the stacked pair
    /// unstacks as the tail moves on over the following ticks.
    pub fn advance(&mut self, new_head: Position, ate_pellet: bool) {
        self.body.insert(0, new_head);
        if ate_pellet {
            let tail = *self.body.last().unwrap();
            self.body.push(tail);
        } else {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Why the round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverCause {
    /// Snake left the grid
    Wall,
    /// Snake ran into its own body
    SelfCollision,
}

/// Complete game state
///
/// One round of snake: the board contents plus the flags driving the
/// start/pause/game-over flow. Owned by the app and mutated only by the
/// tick engine and the key handling path.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub pellet: Position,
    /// Direction the snake moves on the next tick; None until the first
    /// steer of the round
    pub heading: Option<Direction>,
    /// Set when a direction change has been accepted this tick; cleared by
    /// the engine at the start of the next tick
    pub steer_latched: bool,
    pub is_paused: bool,
    pub is_active: bool,
    pub has_started: bool,
    /// Score shown to the player; mirrors snake length
    pub score: u32,
    pub high_score: u32,
    pub grid_width: usize,
    pub grid_height: usize,
}

impl GameState {
    /// Create a fresh round with the given snake and pellet
    pub fn new(snake: Snake, pellet: Position, grid_width: usize, grid_height: usize) -> Self {
        let score = snake.len() as u32;
        Self {
            snake,
            pellet,
            heading: None,
            steer_latched: false,
            is_paused: false,
            is_active: false,
            has_started: false,
            score,
            high_score: 0,
            grid_width,
            grid_height,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x < self.grid_width as i32
            && pos.y >= 0
            && pos.y < self.grid_height as i32
    }

    /// True while ticks should advance the simulation
    pub fn is_running(&self) -> bool {
        self.has_started && self.is_active && !self.is_paused
    }

    /// True once a round has ended and Space means "restart"
    pub fn is_game_over(&self) -> bool {
        self.has_started && !self.is_active
    }

    /// Attempt a direction change.
    ///
    /// At most one change is accepted per tick, and the snake cannot
    /// reverse onto itself. Returns whether the steer was accepted.
    pub fn try_steer(&mut self, direction: Direction) -> bool {
        if self.steer_latched {
            return false;
        }
        if let Some(current) = self.heading {
            if current.is_opposite(direction) {
                return false;
            }
        }
        self.heading = Some(direction);
        self.steer_latched = true;
        true
    }

    /// Mark the round as underway; the app arms the tick clock alongside
    pub fn begin_round(&mut self) {
        self.has_started = true;
        self.is_active = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state(snake: Snake) -> GameState {
        GameState::new(snake, Position::new(8, 8), 10, 10)
    }

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 4));
        assert_eq!(pos.moved_in_direction(Direction::Down), Position::new(5, 6));
        assert_eq!(pos.moved_in_direction(Direction::Left), Position::new(4, 5));
        assert_eq!(pos.moved_in_direction(Direction::Right), Position::new(6, 5));
    }

    #[test]
    fn test_new_snake_is_single_segment() {
        let snake = Snake::new(Position::new(2, 2));
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Position::new(2, 2));
        assert!(snake.body_segments().is_empty());
    }

    #[test]
    fn test_plain_advance_keeps_length() {
        let mut snake = Snake::new(Position::new(2, 2));
        snake.advance(Position::new(3, 2), false);
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Position::new(3, 2));
    }

    #[test]
    fn test_eating_grows_by_two() {
        let mut snake = Snake::new(Position::new(2, 2));
        snake.advance(Position::new(3, 2), true);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(3, 2));
        // the grown segments stack on the old tail
        assert_eq!(snake.body[1], Position::new(2, 2));
        assert_eq!(snake.body[2], Position::new(2, 2));
    }

    #[test]
    fn test_stacked_tail_unstacks_as_snake_moves() {
        let mut snake = Snake::new(Position::new(2, 2));
        snake.advance(Position::new(3, 2), true);
        snake.advance(Position::new(4, 2), false);
        snake.advance(Position::new(5, 2), false);

        assert_eq!(snake.len(), 3);
        let mut cells = snake.body.clone();
        cells.sort_by_key(|p| (p.x, p.y));
        cells.dedup();
        assert_eq!(cells.len(), 3);
    }

    #[test]
    fn test_collision_detection_excludes_head() {
        let snake = Snake {
            body: vec![Position::new(5, 5), Position::new(4, 5), Position::new(3, 5)],
        };
        assert!(!snake.collides_with_body(Position::new(5, 5)));
        assert!(snake.collides_with_body(Position::new(4, 5)));
        assert!(!snake.collides_with_body(Position::new(9, 9)));
        assert!(snake.occupies(Position::new(5, 5)));
    }

    #[test]
    fn test_bounds_checking() {
        let state = test_state(Snake::new(Position::new(5, 5)));

        assert!(state.is_in_bounds(Position::new(0, 0)));
        assert!(state.is_in_bounds(Position::new(9, 9)));
        assert!(!state.is_in_bounds(Position::new(-1, 0)));
        assert!(!state.is_in_bounds(Position::new(10, 0)));
        assert!(!state.is_in_bounds(Position::new(0, 10)));
    }

    #[test]
    fn test_fresh_state_flags() {
        let state = test_state(Snake::new(Position::new(5, 5)));
        assert_eq!(state.heading, None);
        assert!(!state.steer_latched);
        assert!(!state.has_started);
        assert!(!state.is_active);
        assert!(!state.is_paused);
        assert!(!state.is_running());
        assert!(!state.is_game_over());
        assert_eq!(state.score, 1);
        assert_eq!(state.high_score, 0);
    }

    #[test]
    fn test_first_steer_accepts_any_direction() {
        for dir in [Direction::Up, Direction::Right, Direction::Down, Direction::Left] {
            let mut state = test_state(Snake::new(Position::new(5, 5)));
            assert!(state.try_steer(dir));
            assert_eq!(state.heading, Some(dir));
        }
    }

    #[test]
    fn test_steer_rejects_reversal() {
        let mut state = test_state(Snake::new(Position::new(5, 5)));
        assert!(state.try_steer(Direction::Right));
        state.steer_latched = false;

        assert!(!state.try_steer(Direction::Left));
        assert_eq!(state.heading, Some(Direction::Right));
        assert!(!state.steer_latched);

        assert!(state.try_steer(Direction::Down));
        assert_eq!(state.heading, Some(Direction::Down));
    }

    #[test]
    fn test_one_steer_per_tick() {
        let mut state = test_state(Snake::new(Position::new(5, 5)));
        assert!(state.try_steer(Direction::Right));
        // second change within the same tick is dropped, even a legal one
        assert!(!state.try_steer(Direction::Down));
        assert_eq!(state.heading, Some(Direction::Right));
    }

    #[test]
    fn test_begin_round() {
        let mut state = test_state(Snake::new(Position::new(5, 5)));
        state.begin_round();
        assert!(state.has_started);
        assert!(state.is_active);
        assert!(!state.is_paused);
    }
}
