use std::io;

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    #[error("position ({x}, {y}) is outside the {width}x{height} board")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },

    #[error("board dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatErrorKind {
    #[error("unexpected line, expected {expected}")]
    UnexpectedLine { expected: &'static str },

    #[error("blank line out of place")]
    MisplacedBlankLine,

    #[error("missing block {0}")]
    MissingBlock(&'static str),

    #[error("save file is not valid UTF-8")]
    InvalidEncoding,

    #[error("malformed board dimensions")]
    BadDimensions,

    #[error("board row has length {found}, expected {expected}")]
    BadRowLength { expected: usize, found: usize },

    #[error("unknown board character '{0}'")]
    BadBoardChar(char),

    #[error("malformed assignment")]
    BadAssignment,

    #[error("unknown key '{0}'")]
    UnknownKey(String),

    #[error("duplicate key '{0}'")]
    DuplicateKey(String),

    #[error("game block has more than {expected} assignments")]
    ExtraAssignment { expected: usize },

    #[error("missing key '{0}'")]
    MissingKey(&'static str),

    #[error("empty value for '{0}'")]
    EmptyValue(&'static str),

    #[error("invalid {field} literal '{value}'")]
    BadLiteral { field: &'static str, value: String },

    #[error("invalid integer '{0}'")]
    BadInteger(String),

    #[error("{0} must not be negative")]
    NegativeValue(&'static str),

    #[error("wrong number of fields, expected {expected}")]
    BadFieldCount { expected: usize },

    #[error("coordinate ({x}, {y}) outside the board")]
    OutOfRange { x: i32, y: i32 },

    #[error("malformed score entry")]
    BadScoreEntry,

    #[error("duplicate score name '{0}'")]
    DuplicateScore(String),

    #[error("score '{0}' is out of name order")]
    ScoreOrder(String),

    #[error(transparent)]
    InvalidGame(GameError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct FormatError {
    pub line: Option<usize>,
    pub kind: FormatErrorKind,
}

impl std::fmt::Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "invalid save file at line {line}: {}", self.kind),
            None => write!(f, "invalid save file: {}", self.kind),
        }
    }
}

impl FormatError {
    pub fn at(line: usize, kind: FormatErrorKind) -> Self {
        Self {
            line: Some(line),
            kind,
        }
    }

    pub fn eof(kind: FormatErrorKind) -> Self {
        Self { line: None, kind }
    }
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read save file: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Format(#[from] FormatError),
}

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("failed to write save file: {0}")]
    Io(#[from] io::Error),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("{0} must not be empty")]
    EmptyText(&'static str),

    #[error("{0} must fit on a single line")]
    MultilineText(&'static str),
}
