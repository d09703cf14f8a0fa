use std::fmt;

use crate::board::Board;
use crate::constants::{
    get_next_phase, CLYDE_SHY_DISTANCE, FRIGHTENED_X_FACTOR, FRIGHTENED_Y_FACTOR, INKY_OFFSET,
    PINKY_OFFSET,
};
use crate::types::{Direction, GhostKind, Phase, Position};

use super::hunter::Hunter;

/// Evaluation order for greedy pathing. Later entries win distance ties.
const SEARCH_ORDER: [Direction; 4] = [
    Direction::Right,
    Direction::Down,
    Direction::Left,
    Direction::Up,
];

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Ghost {
    kind: GhostKind,
    position: Position,
    direction: Direction,
    dead: bool,
    phase: Phase,
    phase_remaining: u32,
}

impl Ghost {
    pub fn new(kind: GhostKind) -> Self {
        Self {
            kind,
            position: Position::default(),
            direction: Direction::default(),
            dead: false,
            phase: Phase::Scatter,
            phase_remaining: Phase::Scatter.default_duration(),
        }
    }

    pub fn kind(&self) -> GhostKind {
        self.kind
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn phase_remaining(&self) -> u32 {
        self.phase_remaining
    }

    pub fn set_phase(&mut self, phase: Phase, duration: i32) {
        self.phase = phase;
        self.phase_remaining = duration.max(0) as u32;
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn kill(&mut self) {
        self.dead = true;
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.kind);
    }

    pub fn advance(&mut self, board: &Board, hunter: &Hunter) {
        self.next_phase();
        let target = self.target(board, hunter);
        let (direction, position) = self.choose_step(board, target);
        self.direction = direction;
        self.position = position;
    }

    fn next_phase(&mut self) {
        self.phase_remaining = self.phase_remaining.saturating_sub(1);
        if self.phase_remaining == 0 {
            let next = get_next_phase(self.phase);
            self.phase = next;
            self.phase_remaining = next.default_duration();
        }
    }

    fn target(&self, board: &Board, hunter: &Hunter) -> Position {
        match self.phase {
            Phase::Chase => self.chase_target(board, hunter),
            Phase::Scatter => self.home(board),
            Phase::Frightened => self.frightened_target(board),
        }
    }

    /// Where this ghost heads while chasing. Outside CHASE every ghost but
    /// Clyde just reports its own tile.
    pub fn chase_target(&self, board: &Board, hunter: &Hunter) -> Position {
        let hunter_pos = hunter.position();
        let facing = hunter.direction().offset();
        match self.kind {
            GhostKind::Clyde if self.position.distance(hunter_pos) >= CLYDE_SHY_DISTANCE => {
                hunter_pos
            }
            GhostKind::Clyde => self.home(board),
            _ if self.phase != Phase::Chase => self.position,
            GhostKind::Blinky => hunter_pos,
            GhostKind::Inky => hunter_pos + facing * -INKY_OFFSET,
            GhostKind::Pinky => hunter_pos + facing * PINKY_OFFSET,
        }
    }

    /// Scatter corner just outside the board. Like `chase_target`, only
    /// Clyde answers outside its own phase.
    pub fn home(&self, board: &Board) -> Position {
        let (w, h) = (board.width(), board.height());
        match self.kind {
            GhostKind::Clyde => Position::new(-1, h),
            _ if self.phase != Phase::Scatter => self.position,
            GhostKind::Blinky => Position::new(w, -1),
            GhostKind::Inky => Position::new(w, h),
            GhostKind::Pinky => Position::new(-1, -1),
        }
    }

    fn frightened_target(&self, board: &Board) -> Position {
        let (w, h) = (board.width(), board.height());
        Position::new(
            (self.position.x * FRIGHTENED_X_FACTOR) % (2 * w) - w,
            (self.position.y * FRIGHTENED_Y_FACTOR) % (2 * h) - h,
        )
    }

    fn choose_step(&self, board: &Board, target: Position) -> (Direction, Position) {
        let mut best_distance = board.width().max(board.height()) as f64;
        let mut chosen = (self.direction, self.position);
        let reverse = self.direction.opposite();

        for dir in SEARCH_ORDER {
            if dir == reverse {
                continue;
            }
            let next = self.position + dir.offset();
            if !board.is_pathable(next) {
                continue;
            }
            let distance = next.distance(target);
            if distance <= best_distance {
                best_distance = distance;
                chosen = (dir, next);
            }
        }
        chosen
    }
}

impl fmt::Display for Ghost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{}:{}",
            self.position, self.direction, self.phase, self.phase_remaining
        )
    }
}
