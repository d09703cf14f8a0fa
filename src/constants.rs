use crate::types::Phase;

pub const DEFAULT_LIVES: u32 = 4;
pub const GHOST_BOUNTY: u32 = 200;
pub const SPECIAL_DURATION: u32 = 20;

pub const CHASE_DURATION: u32 = 20;
pub const SCATTER_DURATION: u32 = 10;
pub const FRIGHTENED_DURATION: u32 = 30;

pub const DOT_SCORE: u32 = 10;
pub const BIG_DOT_SCORE: u32 = 15;

// Clyde gives up the chase inside this radius.
pub const CLYDE_SHY_DISTANCE: f64 = 8.0;

pub const FRIGHTENED_X_FACTOR: i32 = 24;
pub const FRIGHTENED_Y_FACTOR: i32 = 36;

pub const INKY_OFFSET: i32 = 2;
pub const PINKY_OFFSET: i32 = 4;

pub fn get_phase_duration(phase: Phase) -> u32 {
    match phase {
        Phase::Chase => CHASE_DURATION,
        Phase::Scatter => SCATTER_DURATION,
        Phase::Frightened => FRIGHTENED_DURATION,
    }
}

/// Phase a ghost falls into once its current phase runs out.
pub fn get_next_phase(phase: Phase) -> Phase {
    match phase {
        Phase::Chase => Phase::Scatter,
        Phase::Scatter | Phase::Frightened => Phase::Chase,
    }
}
