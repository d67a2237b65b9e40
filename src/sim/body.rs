//! The bird: a circle falling under constant gravity
//!
//! The bird never moves horizontally; the world scrolls past it. The floor
//! and ceiling are handled differently: touching the ceiling is a hard stop,
//! touching the floor is reported back to the caller as a crash.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Result of one integration step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Still airborne (possibly pinned to the ceiling)
    None,
    /// Reached the floor line this step
    Floor,
}

/// The player-controlled bird
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bird {
    /// Centre position; x stays fixed for the whole session
    pub pos: Vec2,
    /// Vertical velocity (units per tick, positive is down)
    pub velocity: f32,
    pub radius: f32,
}

impl Bird {
    /// Bird at rest, vertically centred in a world of the given height
    pub fn new(world_height: f32) -> Self {
        Self {
            pos: Vec2::new(BIRD_X, world_height / 2.0),
            velocity: 0.0,
            radius: BIRD_RADIUS,
        }
    }

    /// Apply one tick of gravity and clamp to the playfield
    pub fn integrate(&mut self, floor_y: f32) -> Contact {
        self.velocity += GRAVITY;
        self.pos.y += self.velocity;

        let mut contact = Contact::None;

        // Floor: pin the position but keep the velocity
        if self.pos.y + self.radius >= floor_y {
            self.pos.y = floor_y - self.radius;
            contact = Contact::Floor;
        }

        // Ceiling: hard stop
        if self.pos.y - self.radius <= 0.0 {
            self.pos.y = self.radius;
            self.velocity = 0.0;
        }

        contact
    }

    /// Overwrite the velocity with the flap impulse
    #[inline]
    pub fn flap(&mut self) {
        self.velocity = FLAP_SPEED;
    }

    /// Nose tilt for drawing, in radians
    pub fn rotation(&self) -> f32 {
        use std::f32::consts::FRAC_PI_4;
        (self.velocity * 0.1).clamp(-FRAC_PI_4, FRAC_PI_4)
    }
}
