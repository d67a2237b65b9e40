//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick
//! - Seeded RNG only
//! - Stable iteration order (pipe creation order)
//! - No rendering, scheduling or platform dependencies

pub mod body;
pub mod collision;
pub mod pipe;
pub mod state;
pub mod stream;
pub mod tick;
pub mod world;

pub use body::{Bird, Contact};
pub use collision::collides;
pub use pipe::Pipe;
pub use state::{EndCause, GamePhase, GameState};
pub use stream::PipeStream;
pub use tick::{GameEvent, TickInput, tick};
pub use world::World;
