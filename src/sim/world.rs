//! Playfield dimensions
//!
//! The floor line sits `GROUND_HEIGHT` above the bottom edge; everything below
//! it is ground strip that the bird can never enter.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::settings::SettingsError;

/// Size of the playfield in world units (canvas pixels)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub width: f32,
    pub height: f32,
}

impl Default for World {
    fn default() -> Self {
        Self {
            width: DEFAULT_WORLD_WIDTH,
            height: DEFAULT_WORLD_HEIGHT,
        }
    }
}

impl World {
    /// Create a world, rejecting sizes that cannot hold a pipe gap
    pub fn new(width: f32, height: f32) -> Result<Self, SettingsError> {
        if !(width.is_finite() && width > 0.0) {
            return Err(SettingsError::InvalidWidth(width));
        }
        if !(height.is_finite() && height >= MIN_WORLD_HEIGHT) {
            return Err(SettingsError::WorldTooShort {
                height,
                min: MIN_WORLD_HEIGHT,
            });
        }
        Ok(Self { width, height })
    }

    /// Y coordinate of the ground line
    #[inline]
    pub fn floor_y(&self) -> f32 {
        self.height - GROUND_HEIGHT
    }

    /// Largest top-pipe height that still leaves `MIN_PIPE_HEIGHT` below the gap
    #[inline]
    pub fn max_pipe_height(&self) -> f32 {
        self.floor_y() - PIPE_SPACING - MIN_PIPE_HEIGHT
    }
}
