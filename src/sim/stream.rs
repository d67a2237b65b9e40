//! Ordered pipe collection: spawning, scrolling and pruning

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::pipe::Pipe;
use super::world::World;
use crate::consts::SPAWN_INTERVAL_TICKS;

/// Pipes in creation order (oldest, i.e. leftmost, first)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipeStream {
    pipes: Vec<Pipe>,
}

impl PipeStream {
    pub fn new() -> Self {
        Self { pipes: Vec::new() }
    }

    /// Spawn a pipe on every `SPAWN_INTERVAL_TICKS`-th tick, tick 0 included
    pub fn spawn_if_due<R: Rng>(&mut self, tick: u64, world: &World, rng: &mut R) -> bool {
        if tick % SPAWN_INTERVAL_TICKS != 0 {
            return false;
        }
        let pipe = Pipe::spawn(world, rng);
        log::debug!(
            "tick {}: spawned pipe with gap {:.1}..{:.1}",
            tick,
            pipe.top_height,
            pipe.bottom_y
        );
        self.pipes.push(pipe);
        true
    }

    pub fn advance_all(&mut self) {
        for pipe in &mut self.pipes {
            pipe.advance();
        }
    }

    /// Drop pipes that have left the screen, returning how many went
    pub fn prune_offscreen(&mut self) -> usize {
        let before = self.pipes.len();
        self.pipes.retain(|p| !p.is_offscreen());
        before - self.pipes.len()
    }

    pub fn push(&mut self, pipe: Pipe) {
        self.pipes.push(pipe);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pipe> {
        self.pipes.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Pipe> {
        self.pipes.iter_mut()
    }

    pub fn as_slice(&self) -> &[Pipe] {
        &self.pipes
    }

    pub fn len(&self) -> usize {
        self.pipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipes.is_empty()
    }
}
