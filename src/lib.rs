//! Flappy Gates - a single-screen gate-dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, pipes, collisions, game state)
//! - `session`: Session controller driving the simulation for a front-end
//! - `highscores`: Best-score persistence (best effort)
//! - `render`: Presentation contract consumed by the front-ends
//! - `settings`: Runtime configuration

pub mod highscores;
pub mod render;
pub mod session;
pub mod settings;
pub mod sim;

pub use highscores::{BestScoreStore, MemoryStore};
pub use session::{FrameOutcome, FrameTicket, PhaseObserver, Session, Snapshot};
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Downward acceleration (units per tick²)
    pub const GRAVITY: f32 = 0.25;
    /// Velocity a flap sets (negative is up)
    pub const FLAP_SPEED: f32 = -5.5;

    /// Bird defaults
    pub const BIRD_RADIUS: f32 = 12.0;
    pub const BIRD_X: f32 = 60.0;

    /// Pipe defaults
    pub const PIPE_WIDTH: f32 = 52.0;
    /// Vertical gap between the top and bottom pipe
    pub const PIPE_SPACING: f32 = 140.0;
    /// Leftward scroll (units per tick)
    pub const PIPE_SPEED: f32 = 2.5;
    /// Smallest visible pipe height above/below the gap
    pub const MIN_PIPE_HEIGHT: f32 = 50.0;
    /// A new pipe enters every this many ticks
    pub const SPAWN_INTERVAL_TICKS: u64 = 90;

    /// Forgiveness margin shrinking the bird's hitbox on every side
    pub const HITBOX_MARGIN: f32 = 2.0;

    /// Height of the ground strip below the floor line
    pub const GROUND_HEIGHT: f32 = 20.0;
    /// Smallest world that still leaves a valid gap range
    pub const MIN_WORLD_HEIGHT: f32 = GROUND_HEIGHT + PIPE_SPACING + 2.0 * MIN_PIPE_HEIGHT;

    /// Default canvas dimensions
    pub const DEFAULT_WORLD_WIDTH: f32 = 400.0;
    pub const DEFAULT_WORLD_HEIGHT: f32 = 600.0;
}
