use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit vector for this heading. `y` grows downward.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// A turn is only legal when it moves along the other axis.
    pub fn is_orthogonal(&self, other: Direction) -> bool {
        other != *self && other != self.opposite()
    }

    /// Maps DOM-style key identifiers ("ArrowUp", ...) to a heading.
    pub fn from_key(key: &str) -> Option<Direction> {
        match key {
            "ArrowUp" => Some(Direction::Up),
            "ArrowDown" => Some(Direction::Down),
            "ArrowLeft" => Some(Direction::Left),
            "ArrowRight" => Some(Direction::Right),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    pub fn step(&self, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        Position {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn in_bounds(&self, grid_size: u16) -> bool {
        let size = grid_size as i32;
        self.x >= 0 && self.x < size && self.y >= 0 && self.y < size
    }
}

/// Snake body with the head at the front.
#[derive(Clone, Debug, PartialEq)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
}

impl Snake {
    pub fn new(head: Position, direction: Direction) -> Self {
        Snake {
            body: VecDeque::from([head]),
            direction,
        }
    }

    #[cfg(test)]
    pub fn from_segments(
        segments: impl IntoIterator<Item = Position>,
        direction: Direction,
    ) -> Self {
        let body: VecDeque<Position> = segments.into_iter().collect();
        assert!(!body.is_empty(), "a snake needs at least a head");
        Snake { body, direction }
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Applies a turn if it passes the axis-lock rule. Returns whether it was taken.
    pub fn turn(&mut self, new_direction: Direction) -> bool {
        if self.direction.is_orthogonal(new_direction) {
            self.direction = new_direction;
            true
        } else {
            false
        }
    }

    /// Where the head would land on the next move.
    pub fn next_head(&self) -> Position {
        self.head().step(self.direction)
    }

    /// Pushes `new_head` and drops the tail unless growing.
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.push_front(new_head);
        if !grow {
            self.body.pop_back();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_directions() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn test_axis_lock() {
        assert!(Direction::Right.is_orthogonal(Direction::Up));
        assert!(Direction::Right.is_orthogonal(Direction::Down));
        assert!(Direction::Up.is_orthogonal(Direction::Left));

        assert!(!Direction::Right.is_orthogonal(Direction::Left));
        assert!(!Direction::Right.is_orthogonal(Direction::Right));
        assert!(!Direction::Up.is_orthogonal(Direction::Down));
    }

    #[test]
    fn test_key_names() {
        assert_eq!(Direction::from_key("ArrowUp"), Some(Direction::Up));
        assert_eq!(Direction::from_key("ArrowDown"), Some(Direction::Down));
        assert_eq!(Direction::from_key("ArrowLeft"), Some(Direction::Left));
        assert_eq!(Direction::from_key("ArrowRight"), Some(Direction::Right));
        assert_eq!(Direction::from_key("w"), None);
    }

    #[test]
    fn test_bounds() {
        assert!(Position::new(0, 0).in_bounds(20));
        assert!(Position::new(19, 19).in_bounds(20));
        assert!(!Position::new(-1, 10).in_bounds(20));
        assert!(!Position::new(20, 10).in_bounds(20));
        assert!(!Position::new(10, 20).in_bounds(20));
    }

    #[test]
    fn test_turn_rejects_reversal() {
        let mut snake = Snake::new(Position::new(10, 10), Direction::Right);

        assert!(!snake.turn(Direction::Left));
        assert_eq!(snake.direction(), Direction::Right);

        assert!(snake.turn(Direction::Up));
        assert_eq!(snake.direction(), Direction::Up);

        assert!(!snake.turn(Direction::Down));
        assert_eq!(snake.direction(), Direction::Up);
    }

    #[test]
    fn test_advance_keeps_length() {
        let mut snake = Snake::from_segments(
            [Position::new(5, 5), Position::new(4, 5), Position::new(3, 5)],
            Direction::Right,
        );

        let head = snake.next_head();
        snake.advance(head, false);

        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(6, 5));
        assert!(!snake.occupies(Position::new(3, 5)), "Tail was removed");
    }

    #[test]
    fn test_advance_grows() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Down);

        let head = snake.next_head();
        snake.advance(head, true);

        assert_eq!(snake.len(), 2);
        assert_eq!(snake.head(), Position::new(5, 6));
        assert!(snake.occupies(Position::new(5, 5)));
    }
}
