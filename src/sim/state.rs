//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in `GameState`; nothing is ambient.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::Bird;
use super::stream::PipeStream;
use super::world::World;

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Bird at rest, waiting for the first input
    Idle,
    /// Ticks are advancing the simulation
    Running,
    /// Frozen on the last frame, score final
    Terminated,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndCause {
    Pipe,
    Ground,
}

/// Complete game state for one session (plus the carried best score)
#[derive(Debug, Clone)]
pub struct GameState {
    pub world: World,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Gap sampling RNG, seeded from `seed`
    pub rng: Pcg32,
    pub bird: Bird,
    pub pipes: PipeStream,
    pub score: u32,
    /// Highest score seen so far, survives resets
    pub best_score: u32,
    /// Ticks simulated this session
    pub frames: u64,
    pub phase: GamePhase,
    /// Set on the transition to `Terminated`
    pub end_cause: Option<EndCause>,
}

impl GameState {
    /// Idle state with the bird centred and no pipes
    pub fn new(world: World, seed: u64, best_score: u32) -> Self {
        Self {
            world,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            bird: Bird::new(world.height),
            pipes: PipeStream::new(),
            score: 0,
            best_score,
            frames: 0,
            phase: GamePhase::Idle,
            end_cause: None,
        }
    }

    /// Fresh run values (bird, pipes, score, frames) with a new seed; keeps the best score
    pub fn reset(&mut self, seed: u64) {
        *self = Self::new(self.world, seed, self.best_score);
    }

    /// Raise the best score if the current score beats it
    pub fn record_best(&mut self) -> bool {
        if self.score > self.best_score {
            self.best_score = self.score;
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }
}
