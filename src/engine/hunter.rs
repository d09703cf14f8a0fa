use std::fmt;

use crate::board::Board;
use crate::score_board::ScoreBoard;
use crate::types::{Direction, HunterKind, Phase, Position};

use super::ghost::Ghost;

/// The player-controlled entity. All four variants share this state; the
/// kind only changes how collisions and movement resolve.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Hunter {
    kind: HunterKind,
    position: Position,
    direction: Direction,
    dead: bool,
    special_used: bool,
    special_remaining: u32,
}

impl Hunter {
    pub fn new(kind: HunterKind) -> Self {
        Self {
            kind,
            position: Position::default(),
            direction: Direction::default(),
            dead: false,
            special_used: false,
            special_remaining: 0,
        }
    }

    /// Same hunter state carried over to another variant.
    pub fn with_kind(&self, kind: HunterKind) -> Self {
        Self {
            kind,
            ..self.clone()
        }
    }

    pub fn kind(&self) -> HunterKind {
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

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn is_special_used(&self) -> bool {
        self.special_used
    }

    pub fn special_duration_remaining(&self) -> u32 {
        self.special_remaining
    }

    /// One shot per life: only the first positive duration after
    /// construction or `reset` takes effect.
    pub fn activate_special(&mut self, duration: i32) {
        if self.special_used || duration <= 0 {
            return;
        }
        self.special_used = true;
        self.special_remaining = duration as u32;
    }

    pub fn is_special_active(&self) -> bool {
        match self.kind {
            HunterKind::Phil => false,
            _ => self.special_remaining > 0,
        }
    }

    pub fn advance(&mut self, board: &mut Board, scores: &mut ScoreBoard) {
        self.step_once(board, scores);
        if self.kind == HunterKind::Speedy && self.is_special_active() {
            self.step_once(board, scores);
        }
    }

    fn step_once(&mut self, board: &mut Board, scores: &mut ScoreBoard) {
        let next = self.position + self.direction.offset();
        if board.is_pathable(next) {
            self.position = next;
            if let Ok(item) = board.eat(next) {
                scores.increase_score(item.score() as i32);
            }
        }
        self.special_remaining = self.special_remaining.saturating_sub(1);
    }

    pub fn hit(&mut self, ghost: &mut Ghost) {
        match self.kind {
            HunterKind::Hungry => {
                if self.position == ghost.position() && self.is_special_active() {
                    ghost.kill();
                    return;
                }
            }
            HunterKind::Phasey => {
                if self.is_special_active() && ghost.phase() != Phase::Frightened {
                    return;
                }
            }
            HunterKind::Speedy | HunterKind::Phil => {}
        }
        self.default_hit(ghost);
    }

    fn default_hit(&mut self, ghost: &mut Ghost) {
        if self.position != ghost.position() {
            return;
        }
        if ghost.phase() == Phase::Frightened {
            ghost.kill();
        } else {
            self.dead = true;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.kind);
    }
}

impl fmt::Display for Hunter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.position, self.direction, self.special_remaining, self.kind
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardItem;
    use crate::types::GhostKind;

    fn open_board() -> Board {
        Board::new(7, 7).expect("valid board")
    }

    fn hunter_at(kind: HunterKind, x: i32, y: i32, dir: Direction) -> Hunter {
        let mut hunter = Hunter::new(kind);
        hunter.set_position(Position::new(x, y));
        hunter.set_direction(dir);
        hunter
    }

    fn ghost_at(x: i32, y: i32, phase: Phase) -> Ghost {
        let mut ghost = Ghost::new(GhostKind::Blinky);
        ghost.set_position(Position::new(x, y));
        ghost.set_phase(phase, phase.default_duration() as i32);
        ghost
    }

    #[test]
    fn special_is_one_shot_until_reset() {
        let mut hunter = Hunter::new(HunterKind::Hungry);
        hunter.activate_special(0);
        assert!(!hunter.is_special_used());
        hunter.activate_special(20);
        hunter.activate_special(50);
        assert_eq!(hunter.special_duration_remaining(), 20);
        assert!(hunter.is_special_active());

        hunter.reset();
        assert!(!hunter.is_special_used());
        hunter.activate_special(5);
        assert_eq!(hunter.special_duration_remaining(), 5);
    }

    #[test]
    fn phil_never_reports_special_but_counts_down() {
        let mut board = open_board();
        let mut scores = ScoreBoard::new();
        let mut hunter = hunter_at(HunterKind::Phil, 1, 1, Direction::Right);
        hunter.activate_special(3);
        assert!(!hunter.is_special_active());
        hunter.advance(&mut board, &mut scores);
        assert_eq!(hunter.special_duration_remaining(), 2);
    }

    #[test]
    fn move_eats_pickups_and_scores() {
        let mut board = open_board();
        board.set(Position::new(2, 1), BoardItem::Dot).expect("in bounds");
        board.set(Position::new(3, 1), BoardItem::BigDot).expect("in bounds");
        let mut scores = ScoreBoard::new();
        let mut hunter = hunter_at(HunterKind::Hungry, 1, 1, Direction::Right);

        hunter.advance(&mut board, &mut scores);
        hunter.advance(&mut board, &mut scores);
        assert_eq!(hunter.position(), Position::new(3, 1));
        assert_eq!(scores.score(), 25);
        assert_eq!(board.get(Position::new(2, 1)), Ok(BoardItem::None));
        assert_eq!(board.get(Position::new(3, 1)), Ok(BoardItem::BigDotSpawn));
    }

    #[test]
    fn blocked_move_still_ticks_special() {
        let mut board = open_board();
        let mut scores = ScoreBoard::new();
        let mut hunter = hunter_at(HunterKind::Hungry, 1, 1, Direction::Up);
        hunter.activate_special(2);
        hunter.advance(&mut board, &mut scores);
        assert_eq!(hunter.position(), Position::new(1, 1));
        assert_eq!(hunter.special_duration_remaining(), 1);
    }

    #[test]
    fn off_board_move_is_ignored() {
        let mut board = Board::new(3, 3).expect("valid board");
        board.set(Position::new(0, 1), BoardItem::None).expect("in bounds");
        let mut scores = ScoreBoard::new();
        let mut hunter = hunter_at(HunterKind::Phil, 0, 1, Direction::Left);
        hunter.advance(&mut board, &mut scores);
        assert_eq!(hunter.position(), Position::new(0, 1));
    }

    #[test]
    fn speedy_moves_twice_while_special_active() {
        let mut board = open_board();
        let mut scores = ScoreBoard::new();
        let mut hunter = hunter_at(HunterKind::Speedy, 1, 1, Direction::Right);
        hunter.activate_special(3);

        hunter.advance(&mut board, &mut scores);
        assert_eq!(hunter.position(), Position::new(3, 1));
        assert_eq!(hunter.special_duration_remaining(), 1);

        // First step drains the counter, so the second step is skipped.
        hunter.advance(&mut board, &mut scores);
        assert_eq!(hunter.position(), Position::new(4, 1));
        assert_eq!(hunter.special_duration_remaining(), 0);

        hunter.advance(&mut board, &mut scores);
        assert_eq!(hunter.position(), Position::new(5, 1));
    }

    #[test]
    fn speedy_eats_on_both_steps() {
        let mut board = open_board();
        board.set(Position::new(2, 1), BoardItem::Dot).expect("in bounds");
        board.set(Position::new(3, 1), BoardItem::BigDot).expect("in bounds");
        let mut scores = ScoreBoard::new();
        let mut hunter = hunter_at(HunterKind::Speedy, 1, 1, Direction::Right);
        hunter.activate_special(5);

        hunter.advance(&mut board, &mut scores);
        assert_eq!(hunter.position(), Position::new(3, 1));
        assert_eq!(scores.score(), 25);
        assert_eq!(hunter.special_duration_remaining(), 3);
        assert_eq!(board.get(Position::new(2, 1)), Ok(BoardItem::None));
        assert_eq!(board.get(Position::new(3, 1)), Ok(BoardItem::BigDotSpawn));
    }

    #[test]
    fn speedy_second_step_into_wall_still_ticks_twice() {
        let mut board = open_board();
        board.set(Position::new(2, 2), BoardItem::Dot).expect("in bounds");
        board.set(Position::new(3, 2), BoardItem::Wall).expect("in bounds");
        let mut scores = ScoreBoard::new();
        let mut hunter = hunter_at(HunterKind::Speedy, 1, 2, Direction::Right);
        hunter.activate_special(5);

        hunter.advance(&mut board, &mut scores);
        assert_eq!(hunter.position(), Position::new(2, 2));
        assert_eq!(scores.score(), 10);
        assert_eq!(hunter.special_duration_remaining(), 3);
    }

    #[test]
    fn default_hit_kills_frightened_ghost_or_hunter() {
        let mut hunter = hunter_at(HunterKind::Phil, 2, 2, Direction::Up);
        let mut frightened = ghost_at(2, 2, Phase::Frightened);
        hunter.hit(&mut frightened);
        assert!(frightened.is_dead());
        assert!(!hunter.is_dead());

        let mut chasing = ghost_at(2, 2, Phase::Chase);
        hunter.hit(&mut chasing);
        assert!(!chasing.is_dead());
        assert!(hunter.is_dead());
    }

    #[test]
    fn hit_ignores_ghost_on_other_tile() {
        let mut hunter = hunter_at(HunterKind::Speedy, 2, 2, Direction::Up);
        let mut ghost = ghost_at(3, 2, Phase::Chase);
        hunter.hit(&mut ghost);
        assert!(!hunter.is_dead());
        assert!(!ghost.is_dead());
    }

    #[test]
    fn hungry_special_eats_any_ghost() {
        let mut hunter = hunter_at(HunterKind::Hungry, 2, 2, Direction::Up);
        hunter.activate_special(5);
        let mut ghost = ghost_at(2, 2, Phase::Chase);
        hunter.hit(&mut ghost);
        assert!(ghost.is_dead());
        assert!(!hunter.is_dead());
    }

    #[test]
    fn phasey_special_passes_through_non_frightened_ghosts() {
        let mut hunter = hunter_at(HunterKind::Phasey, 2, 2, Direction::Up);
        hunter.activate_special(5);
        let mut ghost = ghost_at(2, 2, Phase::Scatter);
        hunter.hit(&mut ghost);
        assert!(!ghost.is_dead());
        assert!(!hunter.is_dead());

        let mut frightened = ghost_at(2, 2, Phase::Frightened);
        hunter.hit(&mut frightened);
        assert!(frightened.is_dead());
    }

    #[test]
    fn display_matches_save_format() {
        let mut hunter = hunter_at(HunterKind::Hungry, 4, 5, Direction::Left);
        hunter.activate_special(12);
        assert_eq!(hunter.to_string(), "4,5,LEFT,12,HUNGRY");
    }

    #[test]
    fn with_kind_preserves_state() {
        let mut hunter = hunter_at(HunterKind::Hungry, 4, 5, Direction::Down);
        hunter.activate_special(7);
        let converted = hunter.with_kind(HunterKind::Speedy);
        assert_eq!(converted.kind(), HunterKind::Speedy);
        assert_eq!(converted.position(), hunter.position());
        assert_eq!(converted.special_duration_remaining(), 7);
        assert!(converted.is_special_used());
    }

    #[test]
    fn reset_restores_defaults() {
        let mut hunter = hunter_at(HunterKind::Phasey, 3, 3, Direction::Left);
        hunter.activate_special(4);
        let mut ghost = ghost_at(3, 3, Phase::Chase);
        hunter.special_remaining = 0;
        hunter.hit(&mut ghost);
        assert!(hunter.is_dead());

        hunter.reset();
        assert_eq!(hunter, Hunter::new(HunterKind::Phasey));
    }
}
