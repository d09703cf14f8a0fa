use crate::board::Board;
use crate::types::{Direction, Position};

pub(super) fn manhattan(a: Position, b: Position) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

pub(super) fn pathable_neighbours(
    board: &Board,
    pos: Position,
) -> impl Iterator<Item = (Direction, Position)> + '_ {
    Direction::ALL
        .into_iter()
        .map(move |dir| (dir, pos + dir.offset()))
        .filter(|(_, next)| board.is_pathable(*next))
}
