use crate::board::Board;
use crate::constants::{DEFAULT_LIVES, FRIGHTENED_DURATION, GHOST_BOUNTY};
use crate::error::GameError;
use crate::score_board::ScoreBoard;
use crate::types::{GhostKind, GhostView, HunterView, Phase, Snapshot};

pub mod autopilot;
pub mod ghost;
pub mod hunter;
mod utils;

pub use self::ghost::Ghost;
pub use self::hunter::Hunter;

const FRIGHTENED_COLOUR: &str = "#0000FF";

/// Owns every piece of simulation state. Collaborators read through the
/// accessors and drive the game with `tick` plus the few direct mutators.
#[derive(Clone, Debug)]
pub struct Game {
    title: String,
    author: String,
    board: Board,
    hunter: Hunter,
    ghosts: [Ghost; 4],
    scores: ScoreBoard,
    lives: u32,
    level: u32,
    tick: u32,
}

impl Game {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        hunter: Hunter,
        board: Board,
    ) -> Result<Self, GameError> {
        let title = title.into();
        let author = author.into();
        validate_text("title", &title)?;
        validate_text("author", &author)?;

        let mut ghosts = GhostKind::ALL.map(Ghost::new);
        if let Some(spawn) = board.ghost_spawn() {
            for ghost in &mut ghosts {
                ghost.set_position(spawn);
            }
        }

        Ok(Self {
            title,
            author,
            board,
            hunter,
            ghosts,
            scores: ScoreBoard::new(),
            lives: DEFAULT_LIVES,
            level: 0,
            tick: 0,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn hunter(&self) -> &Hunter {
        &self.hunter
    }

    pub fn hunter_mut(&mut self) -> &mut Hunter {
        &mut self.hunter
    }

    /// Owned copy in slot order; changing it never reaches the game.
    pub fn ghosts(&self) -> [Ghost; 4] {
        self.ghosts.clone()
    }

    pub fn ghost(&self, kind: GhostKind) -> &Ghost {
        &self.ghosts[kind.slot()]
    }

    pub(crate) fn set_ghost(&mut self, ghost: Ghost) {
        let slot = ghost.kind().slot();
        self.ghosts[slot] = ghost;
    }

    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    pub fn scores_mut(&mut self) -> &mut ScoreBoard {
        &mut self.scores
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn set_lives(&mut self, lives: i32) {
        self.lives = lives.max(0) as u32;
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn set_level(&mut self, level: i32) {
        self.level = level.max(0) as u32;
    }

    pub fn tick_count(&self) -> u32 {
        self.tick
    }

    pub fn is_over(&self) -> bool {
        self.lives == 0
    }

    pub fn tick(&mut self) {
        if self.lives == 0 {
            return;
        }

        self.hunter.advance(&mut self.board, &mut self.scores);

        let ghosts_move = self.tick % 2 == 0;
        for ghost in &mut self.ghosts {
            self.hunter.hit(ghost);
            if !ghost.is_dead() && ghosts_move {
                ghost.advance(&self.board, &self.hunter);
            }
            self.hunter.hit(ghost);
            if ghost.is_dead() {
                tracing::debug!(ghost = ghost.kind().name(), tick = self.tick, "ghost eaten");
                ghost.reset();
                if let Some(spawn) = self.board.ghost_spawn() {
                    ghost.set_position(spawn);
                }
                self.scores.increase_score(GHOST_BOUNTY as i32);
            }
        }

        if self.hunter.is_dead() {
            self.lives = self.lives.saturating_sub(1);
            tracing::debug!(lives = self.lives, tick = self.tick, "hunter lost a life");
            self.respawn_ghosts();
            self.respawn_hunter();
        }

        if self.board.is_empty() {
            self.level += 1;
            tracing::debug!(level = self.level, "board cleared");
            self.tick = 0;
            self.board.reset();
            self.respawn_ghosts();
            self.respawn_hunter();
        } else {
            self.tick += 1;
        }
    }

    pub fn reset(&mut self) {
        self.lives = DEFAULT_LIVES;
        self.level = 0;
        self.scores.reset();
        self.board.reset();
        self.respawn_ghosts();
        self.respawn_hunter();
        self.tick = 0;
        tracing::debug!(title = %self.title, "game reset");
    }

    pub fn set_ghosts_frightened(&mut self) {
        for ghost in &mut self.ghosts {
            ghost.set_phase(Phase::Frightened, FRIGHTENED_DURATION as i32);
        }
    }

    fn respawn_ghosts(&mut self) {
        let spawn = self.board.ghost_spawn();
        for ghost in &mut self.ghosts {
            ghost.reset();
            if let Some(spawn) = spawn {
                ghost.set_position(spawn);
            }
        }
    }

    fn respawn_hunter(&mut self) {
        self.hunter.reset();
        if let Some(spawn) = self.board.pacman_spawn() {
            self.hunter.set_position(spawn);
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        let hunter = &self.hunter;
        Snapshot {
            title: self.title.clone(),
            author: self.author.clone(),
            tick: self.tick,
            level: self.level,
            lives: self.lives,
            score: self.scores.score(),
            width: self.board.width(),
            height: self.board.height(),
            tiles: self.board.rows(),
            hunter: HunterView {
                kind: hunter.kind(),
                x: hunter.position().x,
                y: hunter.position().y,
                dir: hunter.direction(),
                dead: hunter.is_dead(),
                special_active: hunter.is_special_active(),
                special_remaining: hunter.special_duration_remaining(),
            },
            ghosts: self
                .ghosts
                .iter()
                .map(|ghost| GhostView {
                    kind: ghost.kind(),
                    x: ghost.position().x,
                    y: ghost.position().y,
                    dir: ghost.direction(),
                    phase: ghost.phase(),
                    phase_remaining: ghost.phase_remaining(),
                    colour: if ghost.phase() == Phase::Frightened {
                        FRIGHTENED_COLOUR
                    } else {
                        ghost.kind().colour()
                    },
                })
                .collect(),
        }
    }
}

fn validate_text(field: &'static str, value: &str) -> Result<(), GameError> {
    if value.is_empty() {
        return Err(GameError::EmptyText(field));
    }
    if value.contains(['\n', '\r']) {
        return Err(GameError::MultilineText(field));
    }
    Ok(())
}
