//! Pipe pairs scrolling right to left

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::world::World;
use crate::consts::*;

/// A top/bottom pipe pair with a passable gap between them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipe {
    /// Left edge
    pub x: f32,
    /// Height of the top pipe (gap starts here)
    pub top_height: f32,
    /// Y where the bottom pipe starts (`top_height + PIPE_SPACING`)
    pub bottom_y: f32,
    pub width: f32,
    /// Set once the bird has cleared this pipe
    pub passed: bool,
}

impl Pipe {
    /// Spawn a pipe at the right edge with a uniformly random gap
    ///
    /// # Panics
    ///
    /// If the world is too short to fit the gap range. `World::new` rejects
    /// such sizes, so this only fires on a hand-built world.
    pub fn spawn<R: Rng>(world: &World, rng: &mut R) -> Self {
        let max_height = world.max_pipe_height();
        assert!(
            max_height >= MIN_PIPE_HEIGHT,
            "world height {} too small for pipe gap (need at least {})",
            world.height,
            MIN_WORLD_HEIGHT
        );
        let top_height = rng.random_range(MIN_PIPE_HEIGHT..=max_height);
        Self::with_gap(world.width, top_height)
    }

    /// Pipe at `x` whose top pipe is `top_height` tall
    pub fn with_gap(x: f32, top_height: f32) -> Self {
        Self {
            x,
            top_height,
            bottom_y: top_height + PIPE_SPACING,
            width: PIPE_WIDTH,
            passed: false,
        }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.x -= PIPE_SPEED;
    }

    /// Fully past the left edge
    #[inline]
    pub fn is_offscreen(&self) -> bool {
        self.x + self.width < 0.0
    }

    /// Trailing edge is behind the bird's leading (left) edge
    #[inline]
    pub fn has_been_passed(&self, bird_x: f32, bird_radius: f32) -> bool {
        self.x + self.width < bird_x - bird_radius
    }
}
