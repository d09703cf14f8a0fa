use std::fmt;

use serde::Serialize;

use crate::constants::{BIG_DOT_SCORE, DOT_SCORE};
use crate::error::BoardError;
use crate::types::Position;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardItem {
    None,
    Wall,
    Dot,
    BigDot,
    BigDotSpawn,
    GhostSpawn,
    PacmanSpawn,
}

impl BoardItem {
    pub fn from_char(key: char) -> Option<Self> {
        match key {
            '0' => Some(Self::None),
            'X' => Some(Self::Wall),
            '1' => Some(Self::Dot),
            'B' => Some(Self::BigDot),
            'b' => Some(Self::BigDotSpawn),
            '$' => Some(Self::GhostSpawn),
            'P' => Some(Self::PacmanSpawn),
            _ => None,
        }
    }

    pub fn char_key(self) -> char {
        match self {
            Self::None => '0',
            Self::Wall => 'X',
            Self::Dot => '1',
            Self::BigDot => 'B',
            Self::BigDotSpawn => 'b',
            Self::GhostSpawn => '$',
            Self::PacmanSpawn => 'P',
        }
    }

    pub fn score(self) -> u32 {
        match self {
            Self::Dot => DOT_SCORE,
            Self::BigDot => BIG_DOT_SCORE,
            _ => 0,
        }
    }

    pub fn is_pathable(self) -> bool {
        self != Self::Wall
    }

    pub fn is_pickup(self) -> bool {
        matches!(self, Self::Dot | Self::BigDot)
    }
}

/// Bordered grid of tiles. `(0, 0)` is the top-left corner and tiles are
/// stored row-major, so every access goes through `index_of`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    width: i32,
    height: i32,
    tiles: Vec<BoardItem>,
}

impl Board {
    pub fn new(width: i32, height: i32) -> Result<Self, BoardError> {
        if width <= 0 || height <= 0 {
            return Err(BoardError::InvalidDimensions { width, height });
        }
        let Some(area) = width.checked_mul(height) else {
            return Err(BoardError::InvalidDimensions { width, height });
        };
        let mut tiles = Vec::with_capacity(area as usize);
        for y in 0..height {
            for x in 0..width {
                let border = x == 0 || y == 0 || x == width - 1 || y == height - 1;
                tiles.push(if border {
                    BoardItem::Wall
                } else {
                    BoardItem::None
                });
            }
        }
        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    fn index_of(&self, pos: Position) -> Result<usize, BoardError> {
        if !self.contains(pos) {
            return Err(BoardError::OutOfBounds {
                x: pos.x,
                y: pos.y,
                width: self.width,
                height: self.height,
            });
        }
        Ok((pos.y * self.width + pos.x) as usize)
    }

    fn position_of(&self, index: usize) -> Position {
        let index = index as i32;
        Position::new(index % self.width, index / self.width)
    }

    pub fn get(&self, pos: Position) -> Result<BoardItem, BoardError> {
        let idx = self.index_of(pos)?;
        Ok(self.tiles[idx])
    }

    /// Pathability of `pos`; off-board tiles are never pathable.
    pub fn is_pathable(&self, pos: Position) -> bool {
        self.get(pos).map(BoardItem::is_pathable).unwrap_or(false)
    }

    pub fn set(&mut self, pos: Position, item: BoardItem) -> Result<(), BoardError> {
        let idx = self.index_of(pos)?;
        if matches!(item, BoardItem::GhostSpawn | BoardItem::PacmanSpawn) {
            if let Some(previous) = self.find(item) {
                self.tiles[previous] = BoardItem::None;
            }
        }
        self.tiles[idx] = item;
        Ok(())
    }

    /// Consumes the pickup at `pos` and returns what was there before.
    pub fn eat(&mut self, pos: Position) -> Result<BoardItem, BoardError> {
        let idx = self.index_of(pos)?;
        let item = self.tiles[idx];
        match item {
            BoardItem::Dot => self.tiles[idx] = BoardItem::None,
            BoardItem::BigDot => self.tiles[idx] = BoardItem::BigDotSpawn,
            _ => {}
        }
        Ok(item)
    }

    fn find(&self, item: BoardItem) -> Option<usize> {
        self.tiles.iter().position(|tile| *tile == item)
    }

    pub fn ghost_spawn(&self) -> Option<Position> {
        self.find(BoardItem::GhostSpawn)
            .map(|idx| self.position_of(idx))
    }

    pub fn pacman_spawn(&self) -> Option<Position> {
        self.find(BoardItem::PacmanSpawn)
            .map(|idx| self.position_of(idx))
    }

    pub fn is_empty(&self) -> bool {
        !self.tiles.iter().any(|tile| tile.is_pickup())
    }

    pub fn remaining_pickups(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_pickup()).count()
    }

    pub fn reset(&mut self) {
        for tile in &mut self.tiles {
            *tile = match *tile {
                BoardItem::None => BoardItem::Dot,
                BoardItem::BigDotSpawn => BoardItem::BigDot,
                other => other,
            };
        }
    }

    pub fn rows(&self) -> Vec<String> {
        self.tiles
            .chunks(self.width as usize)
            .map(|row| row.iter().map(|tile| tile.char_key()).collect())
            .collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rows().join("\n"))
    }
}
