use std::collections::BTreeMap;

use crate::board::{Board, BoardItem};
use crate::engine::{Game, Ghost, Hunter};
use crate::error::{FormatError, FormatErrorKind};
use crate::score_board::is_valid_name;
use crate::types::{Direction, GhostKind, HunterKind, Phase, Position};

use super::{BOARD_HEADER, GAME_HEADER, SCORES_HEADER};

const GAME_KEYS: [&str; 10] = [
    "title", "author", "lives", "level", "score", "hunter", "blinky", "inky", "pinky", "clyde",
];

/// Where the parser is between blocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    Board,
    AfterBoard,
    Game,
    AfterGame,
    Scores,
    Done,
}

/// Non-comment lines with their 1-based line numbers.
struct Lines<'a> {
    inner: std::iter::Enumerate<std::str::Lines<'a>>,
}

impl<'a> Lines<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.lines().enumerate(),
        }
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .by_ref()
            .map(|(index, line)| (index + 1, line))
            .find(|(_, line)| !line.starts_with(';'))
    }
}

struct GameBlock<'a> {
    line: usize,
    fields: BTreeMap<&'static str, (usize, &'a str)>,
}

impl<'a> GameBlock<'a> {
    fn value(&self, key: &'static str) -> Result<(usize, &'a str), FormatError> {
        self.fields
            .get(key)
            .copied()
            .ok_or_else(|| FormatError::at(self.line, FormatErrorKind::MissingKey(key)))
    }
}

/// Parses a complete save file. Fails atomically: no partial game is ever
/// produced.
pub fn read_str(text: &str) -> Result<Game, FormatError> {
    let mut lines = Lines::new(text);
    let mut stage = Stage::Board;
    let mut board = None;
    let mut game = None;

    while let Some((number, line)) = lines.next() {
        stage = match (stage, line) {
            (Stage::Board, BOARD_HEADER) => {
                board = Some(read_board(&mut lines, number)?);
                Stage::AfterBoard
            }
            (Stage::AfterBoard, "") => Stage::Game,
            (Stage::Game, GAME_HEADER) => {
                let block = read_game_block(&mut lines, number)?;
                let Some(board) = board.take() else {
                    return Err(FormatError::at(number, FormatErrorKind::MissingBlock(BOARD_HEADER)));
                };
                game = Some(build_game(board, &block)?);
                Stage::AfterGame
            }
            (Stage::AfterGame, "") => Stage::Scores,
            (Stage::AfterGame, line) if line.contains(" = ") => {
                return Err(FormatError::at(
                    number,
                    FormatErrorKind::ExtraAssignment {
                        expected: GAME_KEYS.len(),
                    },
                ))
            }
            (Stage::Scores, SCORES_HEADER) => {
                let Some(game) = game.as_mut() else {
                    return Err(FormatError::at(number, FormatErrorKind::MissingBlock(GAME_HEADER)));
                };
                read_scores(&mut lines, game)?;
                Stage::Done
            }
            (_, "") => return Err(FormatError::at(number, FormatErrorKind::MisplacedBlankLine)),
            (stage, _) => {
                return Err(FormatError::at(
                    number,
                    FormatErrorKind::UnexpectedLine {
                        expected: expected_at(stage),
                    },
                ))
            }
        };
    }

    match (stage, game) {
        (Stage::Done, Some(game)) => Ok(game),
        (Stage::Board, _) => Err(FormatError::eof(FormatErrorKind::MissingBlock(BOARD_HEADER))),
        (Stage::AfterBoard | Stage::Game, _) => {
            Err(FormatError::eof(FormatErrorKind::MissingBlock(GAME_HEADER)))
        }
        _ => Err(FormatError::eof(FormatErrorKind::MissingBlock(SCORES_HEADER))),
    }
}

fn expected_at(stage: Stage) -> &'static str {
    match stage {
        Stage::Board => BOARD_HEADER,
        Stage::AfterBoard | Stage::AfterGame => "a blank line",
        Stage::Game => GAME_HEADER,
        Stage::Scores => SCORES_HEADER,
        Stage::Done => "end of file",
    }
}

fn next_in_block<'a>(
    lines: &mut Lines<'a>,
    header_line: usize,
    expected: &'static str,
) -> Result<(usize, &'a str), FormatError> {
    match lines.next() {
        Some((number, "")) => Err(FormatError::at(number, FormatErrorKind::MisplacedBlankLine)),
        Some(line) => Ok(line),
        None => Err(FormatError::at(
            header_line,
            FormatErrorKind::UnexpectedLine { expected },
        )),
    }
}

fn read_board(lines: &mut Lines<'_>, header_line: usize) -> Result<Board, FormatError> {
    let (number, dims) = next_in_block(lines, header_line, "board dimensions")?;
    let bad_dims = || FormatError::at(number, FormatErrorKind::BadDimensions);
    let (width, height) = dims.split_once(',').ok_or_else(bad_dims)?;
    let width: i32 = width.parse().map_err(|_| bad_dims())?;
    let height: i32 = height.parse().map_err(|_| bad_dims())?;
    if width < 1 || height < 1 {
        return Err(bad_dims());
    }

    // Rows are checked before the grid exists, so its size is bounded by the input.
    let mut rows = Vec::new();
    for _ in 0..height {
        let (number, row) = next_in_block(lines, header_line, "board row")?;
        let found = row.chars().count();
        if found != width as usize {
            return Err(FormatError::at(
                number,
                FormatErrorKind::BadRowLength {
                    expected: width as usize,
                    found,
                },
            ));
        }
        let items = row
            .chars()
            .map(|key| {
                BoardItem::from_char(key)
                    .ok_or_else(|| FormatError::at(number, FormatErrorKind::BadBoardChar(key)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        rows.push((number, items));
    }

    let mut board = Board::new(width, height).map_err(|_| bad_dims())?;
    for (y, (number, items)) in rows.into_iter().enumerate() {
        for (x, item) in items.into_iter().enumerate() {
            board
                .set(Position::new(x as i32, y as i32), item)
                .map_err(|_| FormatError::at(number, FormatErrorKind::BadDimensions))?;
        }
    }
    Ok(board)
}

fn read_game_block<'a>(
    lines: &mut Lines<'a>,
    header_line: usize,
) -> Result<GameBlock<'a>, FormatError> {
    let mut fields = BTreeMap::new();
    for _ in 0..GAME_KEYS.len() {
        let (number, line) = next_in_block(lines, header_line, "a game assignment")?;
        let (key, value) = line
            .split_once(" = ")
            .ok_or_else(|| FormatError::at(number, FormatErrorKind::BadAssignment))?;
        let key = GAME_KEYS
            .iter()
            .copied()
            .find(|known| *known == key)
            .ok_or_else(|| FormatError::at(number, FormatErrorKind::UnknownKey(key.to_string())))?;
        if value.is_empty() {
            return Err(FormatError::at(number, FormatErrorKind::EmptyValue(key)));
        }
        if fields.insert(key, (number, value)).is_some() {
            return Err(FormatError::at(
                number,
                FormatErrorKind::DuplicateKey(key.to_string()),
            ));
        }
    }
    Ok(GameBlock {
        line: header_line,
        fields,
    })
}

fn build_game(board: Board, block: &GameBlock<'_>) -> Result<Game, FormatError> {
    let (_, title) = block.value("title")?;
    let (_, author) = block.value("author")?;
    let lives = parse_count(block.value("lives")?, "lives")?;
    let level = parse_count(block.value("level")?, "level")?;
    let score = parse_count(block.value("score")?, "score")?;
    let hunter = parse_hunter(block.value("hunter")?, &board)?;
    let ghosts = GhostKind::ALL
        .iter()
        .map(|kind| parse_ghost(block.value(kind.name())?, *kind, &board))
        .collect::<Result<Vec<_>, _>>()?;

    let mut game = Game::new(title, author, hunter, board)
        .map_err(|err| FormatError::at(block.line, FormatErrorKind::InvalidGame(err)))?;
    game.set_lives(lives);
    game.set_level(level);
    game.scores_mut().increase_score(score);
    for ghost in ghosts {
        game.set_ghost(ghost);
    }
    Ok(game)
}

fn parse_int(number: usize, raw: &str) -> Result<i32, FormatError> {
    raw.parse()
        .map_err(|_| FormatError::at(number, FormatErrorKind::BadInteger(raw.to_string())))
}

fn parse_count((number, raw): (usize, &str), field: &'static str) -> Result<i32, FormatError> {
    let value = parse_int(number, raw)?;
    if value < 0 {
        return Err(FormatError::at(number, FormatErrorKind::NegativeValue(field)));
    }
    Ok(value)
}

fn parse_position(number: usize, x: &str, y: &str, board: &Board) -> Result<Position, FormatError> {
    let pos = Position::new(parse_int(number, x)?, parse_int(number, y)?);
    if !board.contains(pos) {
        return Err(FormatError::at(
            number,
            FormatErrorKind::OutOfRange { x: pos.x, y: pos.y },
        ));
    }
    Ok(pos)
}

fn parse_direction(number: usize, raw: &str) -> Result<Direction, FormatError> {
    Direction::parse(raw).ok_or_else(|| bad_literal(number, "direction", raw))
}

fn bad_literal(number: usize, field: &'static str, raw: &str) -> FormatError {
    FormatError::at(
        number,
        FormatErrorKind::BadLiteral {
            field,
            value: raw.to_string(),
        },
    )
}

fn parse_hunter((number, raw): (usize, &str), board: &Board) -> Result<Hunter, FormatError> {
    let [x, y, dir, duration, kind] = split_fields::<5>(number, raw)?;
    let position = parse_position(number, x, y, board)?;
    let direction = parse_direction(number, dir)?;
    let duration = parse_count((number, duration), "special duration")?;
    let kind = HunterKind::parse(kind).ok_or_else(|| bad_literal(number, "hunter type", kind))?;

    let mut hunter = Hunter::new(kind);
    hunter.set_position(position);
    hunter.set_direction(direction);
    hunter.activate_special(duration);
    Ok(hunter)
}

fn parse_ghost(
    (number, raw): (usize, &str),
    kind: GhostKind,
    board: &Board,
) -> Result<Ghost, FormatError> {
    let [x, y, dir, phase] = split_fields::<4>(number, raw)?;
    let position = parse_position(number, x, y, board)?;
    let direction = parse_direction(number, dir)?;
    let (phase, duration) = phase
        .split_once(':')
        .ok_or_else(|| bad_literal(number, "phase", phase))?;
    let phase = Phase::parse(phase).ok_or_else(|| bad_literal(number, "phase", phase))?;
    let duration = parse_count((number, duration), "phase duration")?;

    let mut ghost = Ghost::new(kind);
    ghost.set_position(position);
    ghost.set_direction(direction);
    ghost.set_phase(phase, duration);
    Ok(ghost)
}

fn split_fields<const N: usize>(number: usize, raw: &str) -> Result<[&str; N], FormatError> {
    let fields: Vec<&str> = raw.split(',').collect();
    fields
        .try_into()
        .map_err(|_| FormatError::at(number, FormatErrorKind::BadFieldCount { expected: N }))
}

fn read_scores(lines: &mut Lines<'_>, game: &mut Game) -> Result<(), FormatError> {
    let mut previous: Option<&str> = None;
    for (number, line) in lines {
        if line.is_empty() {
            return Err(FormatError::at(number, FormatErrorKind::MisplacedBlankLine));
        }
        let (name, value) = line
            .split_once(" : ")
            .ok_or_else(|| FormatError::at(number, FormatErrorKind::BadScoreEntry))?;
        if !is_valid_name(name) {
            return Err(FormatError::at(number, FormatErrorKind::BadScoreEntry));
        }
        let value = parse_count((number, value), "score entry")?;
        if let Some(previous) = previous {
            if name == previous {
                return Err(FormatError::at(
                    number,
                    FormatErrorKind::DuplicateScore(name.to_string()),
                ));
            }
            if name < previous {
                return Err(FormatError::at(
                    number,
                    FormatErrorKind::ScoreOrder(name.to_string()),
                ));
            }
        }
        game.scores_mut().set_score(name, value);
        previous = Some(name);
    }
    Ok(())
}
