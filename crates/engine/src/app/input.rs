use crate::sim::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

const DIRECTION_COUNT: usize = 4;

impl Direction {
    pub const ALL: [Direction; DIRECTION_COUNT] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    const fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "up" | "north" | "n" => Some(Self::Up),
            "down" | "south" | "s" => Some(Self::Down),
            "left" | "west" | "w" => Some(Self::Left),
            "right" | "east" | "e" => Some(Self::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionalIntent {
    down: [bool; DIRECTION_COUNT],
}

impl DirectionalIntent {
    pub fn set(&mut self, direction: Direction, is_down: bool) {
        self.down[direction.index()] = is_down;
    }

    pub fn with(mut self, direction: Direction, is_down: bool) -> Self {
        self.set(direction, is_down);
        self
    }

    pub fn is_down(&self, direction: Direction) -> bool {
        self.down[direction.index()]
    }

    pub fn clear(&mut self) {
        self.down = [false; DIRECTION_COUNT];
    }

    pub fn delta(&self, speed: f32) -> Vec2 {
        let mut x = 0.0f32;
        let mut y = 0.0f32;

        if self.is_down(Direction::Left) {
            x -= speed;
        }
        if self.is_down(Direction::Right) {
            x += speed;
        }
        if self.is_down(Direction::Up) {
            y -= speed;
        }
        if self.is_down(Direction::Down) {
            y += speed;
        }

        Vec2 { x, y }
    }
}
