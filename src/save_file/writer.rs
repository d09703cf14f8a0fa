use crate::engine::Game;
use crate::types::GhostKind;

use super::{BOARD_HEADER, GAME_HEADER, SCORES_HEADER};

/// Serialises `game` into the save format. Score entries come out in name
/// order and the last one carries no trailing newline.
pub fn write_string(game: &Game) -> String {
    let board = game.board();
    let mut lines = vec![
        BOARD_HEADER.to_string(),
        format!("{},{}", board.width(), board.height()),
    ];
    lines.extend(board.rows());
    lines.push(String::new());

    lines.push(GAME_HEADER.to_string());
    lines.push(format!("title = {}", game.title()));
    lines.push(format!("author = {}", game.author()));
    lines.push(format!("lives = {}", game.lives()));
    lines.push(format!("level = {}", game.level()));
    lines.push(format!("score = {}", game.scores().score()));
    lines.push(format!("hunter = {}", game.hunter()));
    for kind in GhostKind::ALL {
        lines.push(format!("{} = {}", kind.name(), game.ghost(kind)));
    }
    lines.push(String::new());

    lines.push(SCORES_HEADER.to_string());
    let mut out = lines.join("\n");
    out.push('\n');
    out.push_str(&game.scores().order_by_name().join("\n"));
    out
}
