pub mod board;
pub mod constants;
pub mod engine;
pub mod error;
pub mod rng;
pub mod save_file;
pub mod score_board;
pub mod types;
