use std::fmt;
use std::ops::{Add, Mul};

use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Position) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, other: Position) -> Position {
        Position::new(self.x + other.x, self.y + other.y)
    }
}

impl Mul<i32> for Position {
    type Output = Position;

    fn mul(self, factor: i32) -> Position {
        Position::new(self.x * factor, self.y * factor)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "UP" => Some(Self::Up),
            "DOWN" => Some(Self::Down),
            "LEFT" => Some(Self::Left),
            "RIGHT" => Some(Self::Right),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Up => "UP",
            Self::Down => "DOWN",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
        }
    }

    pub fn offset(self) -> Position {
        match self {
            Self::Up => Position::new(0, -1),
            Self::Down => Position::new(0, 1),
            Self::Left => Position::new(-1, 0),
            Self::Right => Position::new(1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    Chase,
    Scatter,
    Frightened,
}

impl Phase {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "CHASE" => Some(Self::Chase),
            "SCATTER" => Some(Self::Scatter),
            "FRIGHTENED" => Some(Self::Frightened),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Chase => "CHASE",
            Self::Scatter => "SCATTER",
            Self::Frightened => "FRIGHTENED",
        }
    }

    pub fn default_duration(self) -> u32 {
        crate::constants::get_phase_duration(self)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GhostKind {
    Blinky,
    Inky,
    Pinky,
    Clyde,
}

impl GhostKind {
    /// Slot order used by the game and the save file.
    pub const ALL: [GhostKind; 4] = [
        GhostKind::Blinky,
        GhostKind::Inky,
        GhostKind::Pinky,
        GhostKind::Clyde,
    ];

    pub fn slot(self) -> usize {
        match self {
            Self::Blinky => 0,
            Self::Inky => 1,
            Self::Pinky => 2,
            Self::Clyde => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Blinky => "blinky",
            Self::Inky => "inky",
            Self::Pinky => "pinky",
            Self::Clyde => "clyde",
        }
    }

    pub fn colour(self) -> &'static str {
        match self {
            Self::Blinky => "#d54e53",
            Self::Inky => "#7aa6da",
            Self::Pinky => "#c397d8",
            Self::Clyde => "#e78c45",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HunterKind {
    Hungry,
    Phasey,
    Speedy,
    Phil,
}

impl HunterKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "HUNGRY" => Some(Self::Hungry),
            "PHASEY" => Some(Self::Phasey),
            "SPEEDY" => Some(Self::Speedy),
            "PHIL" => Some(Self::Phil),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hungry => "HUNGRY",
            Self::Phasey => "PHASEY",
            Self::Speedy => "SPEEDY",
            Self::Phil => "PHIL",
        }
    }
}

impl fmt::Display for HunterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct HunterView {
    pub kind: HunterKind,
    pub x: i32,
    pub y: i32,
    pub dir: Direction,
    pub dead: bool,
    #[serde(rename = "specialActive")]
    pub special_active: bool,
    #[serde(rename = "specialRemaining")]
    pub special_remaining: u32,
}

#[derive(Clone, Debug, Serialize)]
pub struct GhostView {
    pub kind: GhostKind,
    pub x: i32,
    pub y: i32,
    pub dir: Direction,
    pub phase: Phase,
    #[serde(rename = "phaseRemaining")]
    pub phase_remaining: u32,
    pub colour: &'static str,
}

#[derive(Clone, Debug, Serialize)]
pub struct Snapshot {
    pub title: String,
    pub author: String,
    pub tick: u32,
    pub level: u32,
    pub lives: u32,
    pub score: u32,
    pub width: i32,
    pub height: i32,
    pub tiles: Vec<String>,
    pub hunter: HunterView,
    pub ghosts: Vec<GhostView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_opposites_are_symmetric() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_eq!(dir.offset() + dir.opposite().offset(), Position::new(0, 0));
        }
    }

    #[test]
    fn position_arithmetic() {
        let pos = Position::new(3, 4);
        assert_eq!(pos + Position::new(-1, 2), Position::new(2, 6));
        assert_eq!(Direction::Left.offset() * 4, Position::new(-4, 0));
        assert_eq!(Position::new(0, 0).distance(pos), 5.0);
        assert_eq!(pos.to_string(), "3,4");
    }

    #[test]
    fn enum_literals_parse_only_uppercase() {
        assert_eq!(Direction::parse("LEFT"), Some(Direction::Left));
        assert_eq!(Direction::parse("left"), None);
        assert_eq!(Phase::parse("FRIGHTENED"), Some(Phase::Frightened));
        assert_eq!(Phase::parse("Scatter"), None);
        assert_eq!(HunterKind::parse("PHIL"), Some(HunterKind::Phil));
        assert_eq!(HunterKind::parse(" PHIL"), None);
    }

    #[test]
    fn ghost_slots_follow_fixed_order() {
        for (idx, kind) in GhostKind::ALL.iter().enumerate() {
            assert_eq!(kind.slot(), idx);
        }
    }
}
