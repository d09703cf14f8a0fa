//! Line-oriented save files: a `[Board]`, `[Game]` and `[Scores]` block,
//! separated by exactly one blank line. Lines starting with `;` are comments.

mod reader;
mod writer;

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::engine::Game;
use crate::error::{FormatError, FormatErrorKind, LoadError, SaveError};

pub use reader::read_str;
pub use writer::write_string;

pub const BOARD_HEADER: &str = "[Board]";
pub const GAME_HEADER: &str = "[Game]";
pub const SCORES_HEADER: &str = "[Scores]";

/// Reads a whole game from a stream. Nothing is returned unless the full
/// file is valid. Bytes that are not UTF-8 are a format error, not an IO one.
pub fn read<R: Read>(mut reader: R) -> Result<Game, LoadError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let text = String::from_utf8(bytes)
        .map_err(|_| FormatError::eof(FormatErrorKind::InvalidEncoding))?;
    Ok(read_str(&text)?)
}

pub fn write<W: Write>(mut writer: W, game: &Game) -> Result<(), SaveError> {
    writer.write_all(write_string(game).as_bytes())?;
    writer.flush()?;
    Ok(())
}

pub fn load_path(path: impl AsRef<Path>) -> Result<Game, LoadError> {
    let path = path.as_ref();
    let game = read(BufReader::new(File::open(path)?))?;
    tracing::info!(path = %path.display(), title = game.title(), "loaded save file");
    Ok(game)
}

pub fn save_path(path: impl AsRef<Path>, game: &Game) -> Result<(), SaveError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    write(BufWriter::new(File::create(path)?), game)?;
    tracing::info!(path = %path.display(), "wrote save file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, BoardItem};
    use crate::engine::{Ghost, Hunter};
    use crate::types::{Direction, GhostKind, HunterKind, Phase, Position};
    use proptest::prelude::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    const SAMPLE: &str = "[Board]\n5,4\nXXXXX\nXP1$X\nX0B1X\nXXXXX\n\n[Game]\ntitle = Tiny\nauthor = Someone\nlives = 2\nlevel = 1\nscore = 30\nhunter = 1,1,RIGHT,0,SPEEDY\nblinky = 3,1,UP,SCATTER:10\ninky = 3,1,UP,SCATTER:10\npinky = 3,1,UP,SCATTER:10\nclyde = 3,1,LEFT,CHASE:5\n\n[Scores]\nalice : 40\nbob : 12";

    fn temp_path(name: &str) -> std::path::PathBuf {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock after epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("maze-chase-{name}-{stamp}.map"))
    }

    #[test]
    fn stream_read_and_write_agree() {
        let game = read(SAMPLE.as_bytes()).expect("sample loads");
        let mut out = Vec::new();
        write(&mut out, &game).expect("write to memory");
        assert_eq!(String::from_utf8(out).expect("utf8"), SAMPLE);
    }

    #[test]
    fn format_errors_surface_as_format_variant() {
        let err = read("[Game]\n".as_bytes()).expect_err("wrong first block");
        assert!(matches!(err, LoadError::Format(_)));
    }

    #[test]
    fn non_utf8_input_is_format_error() {
        let err = read(&[b'[', 0xff, 0xfe, b']'][..]).expect_err("invalid bytes");
        match err {
            LoadError::Format(format) => {
                assert_eq!(format.kind, FormatErrorKind::InvalidEncoding);
                assert_eq!(format.line, None);
            }
            other => panic!("expected format error, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_path(temp_path("missing")).expect_err("no such file");
        assert!(matches!(err, LoadError::Io(_)));
    }

    #[test]
    fn save_then_load_from_disk() {
        let path = temp_path("disk");
        let game = read_str(SAMPLE).expect("sample loads");
        save_path(&path, &game).expect("save succeeds");
        let loaded = load_path(&path).expect("load succeeds");
        assert_eq!(write_string(&loaded), SAMPLE);
        let _ = std::fs::remove_file(path);
    }

    fn arb_item() -> impl Strategy<Value = BoardItem> {
        prop::sample::select(vec![
            BoardItem::None,
            BoardItem::Wall,
            BoardItem::Dot,
            BoardItem::BigDot,
            BoardItem::BigDotSpawn,
            BoardItem::GhostSpawn,
            BoardItem::PacmanSpawn,
        ])
    }

    fn arb_direction() -> impl Strategy<Value = Direction> {
        prop::sample::select(Direction::ALL.to_vec())
    }

    fn arb_phase() -> impl Strategy<Value = Phase> {
        prop::sample::select(vec![Phase::Chase, Phase::Scatter, Phase::Frightened])
    }

    fn arb_hunter_kind() -> impl Strategy<Value = HunterKind> {
        prop::sample::select(vec![
            HunterKind::Hungry,
            HunterKind::Phasey,
            HunterKind::Speedy,
            HunterKind::Phil,
        ])
    }

    proptest! {
        #[test]
        fn round_trip_preserves_game(
            width in 1i32..9,
            height in 1i32..9,
            tiles in prop::collection::vec(arb_item(), 64),
            hunter in (0i32..9, 0i32..9, arb_direction(), 0i32..40, arb_hunter_kind()),
            ghosts in prop::collection::vec((0i32..9, 0i32..9, arb_direction(), arb_phase(), 0i32..40), 4),
            lives in 0i32..10,
            level in 0i32..50,
            score in 0i32..100_000,
            table in prop::collection::btree_map("[A-Za-z0-9]{1,8}", 0i32..10_000, 0..6),
        ) {
            let mut board = Board::new(width, height).expect("valid board");
            for (index, item) in tiles.into_iter().enumerate() {
                let pos = Position::new(index as i32 % 8, index as i32 / 8);
                if board.contains(pos) {
                    board.set(pos, item).expect("in bounds");
                }
            }

            let (hx, hy, hdir, duration, kind) = hunter;
            let mut hunter = Hunter::new(kind);
            hunter.set_position(Position::new(hx % width, hy % height));
            hunter.set_direction(hdir);
            hunter.activate_special(duration);

            let mut game = Game::new("Round trip", "Prop Tester", hunter, board).expect("valid game");
            game.set_lives(lives);
            game.set_level(level);
            game.scores_mut().increase_score(score);
            game.scores_mut().set_scores(Some(table));
            for (kind, (gx, gy, gdir, phase, duration)) in GhostKind::ALL.into_iter().zip(ghosts) {
                let mut ghost = Ghost::new(kind);
                ghost.set_position(Position::new(gx % width, gy % height));
                ghost.set_direction(gdir);
                ghost.set_phase(phase, duration);
                game.set_ghost(ghost);
            }

            let text = write_string(&game);
            let loaded = read_str(&text).expect("written game reads back");
            prop_assert_eq!(loaded.board(), game.board());
            prop_assert_eq!(loaded.title(), game.title());
            prop_assert_eq!(loaded.author(), game.author());
            prop_assert_eq!(loaded.lives(), game.lives());
            prop_assert_eq!(loaded.level(), game.level());
            prop_assert_eq!(loaded.hunter(), game.hunter());
            prop_assert_eq!(loaded.ghosts(), game.ghosts());
            prop_assert_eq!(loaded.scores(), game.scores());
            prop_assert_eq!(write_string(&loaded), text);
        }
    }
}
