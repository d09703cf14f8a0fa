use std::collections::{HashSet, VecDeque};

use crate::board::{Board, BoardItem};
use crate::rng::Rng;
use crate::types::{Direction, HunterKind, Phase, Position};

use super::utils::{manhattan, pathable_neighbours};
use super::Game;

const DANGER_RADIUS: i32 = 1;
const KEEP_HEADING_CHANCE: f64 = 0.6;

/// Picks a heading for the hunter: the first step of the shortest path to
/// the nearest pickup that stays clear of threatening ghosts. Falls back to
/// a random safe neighbour, then to the current heading.
pub fn choose_direction(game: &Game, rng: &mut Rng) -> Direction {
    let board = game.board();
    let hunter = game.hunter();
    let start = hunter.position();
    let threats = threat_positions(game);
    let is_safe = |pos: Position| {
        threats
            .iter()
            .all(|ghost| manhattan(*ghost, pos) > DANGER_RADIUS)
    };

    if let Some(dir) = first_step_to_pickup(board, start, &is_safe) {
        return dir;
    }

    let options: Vec<Direction> = pathable_neighbours(board, start)
        .filter(|(_, next)| is_safe(*next))
        .map(|(dir, _)| dir)
        .collect();
    if options.is_empty() {
        return hunter.direction();
    }
    if options.contains(&hunter.direction()) && rng.chance(KEEP_HEADING_CHANCE) {
        return hunter.direction();
    }
    options[rng.pick_index(options.len())]
}

fn threat_positions(game: &Game) -> Vec<Position> {
    let hunter = game.hunter();
    let shielded = hunter.is_special_active()
        && matches!(hunter.kind(), HunterKind::Hungry | HunterKind::Phasey);
    if shielded {
        return Vec::new();
    }
    game.ghosts()
        .iter()
        .filter(|ghost| ghost.phase() != Phase::Frightened)
        .map(|ghost| ghost.position())
        .collect()
}

fn first_step_to_pickup(
    board: &Board,
    start: Position,
    is_safe: &impl Fn(Position) -> bool,
) -> Option<Direction> {
    let mut visited = HashSet::from([start]);
    let mut queue = VecDeque::new();
    for (dir, next) in pathable_neighbours(board, start) {
        if is_safe(next) && visited.insert(next) {
            queue.push_back((next, dir));
        }
    }

    while let Some((pos, first)) = queue.pop_front() {
        if board.get(pos).is_ok_and(BoardItem::is_pickup) {
            return Some(first);
        }
        for (_, next) in pathable_neighbours(board, pos) {
            if is_safe(next) && visited.insert(next) {
                queue.push_back((next, first));
            }
        }
    }
    None
}
