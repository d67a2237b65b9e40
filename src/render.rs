//! Presentation contract
//!
//! Front-ends get a read-only `FrameView` once per tick and never feed
//! anything back into the simulation.

use crate::consts::PIPE_SPEED;
use crate::sim::{Bird, GamePhase, GameState, Pipe, World};

/// Width of one ground stripe period
pub const GROUND_STRIPE_PERIOD: f32 = 20.0;

/// Everything a renderer may look at for one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub world: &'a World,
    pub bird: &'a Bird,
    pub pipes: &'a [Pipe],
    pub frames: u64,
    pub score: u32,
    pub best_score: u32,
    pub phase: GamePhase,
}

impl<'a> FrameView<'a> {
    pub fn of(state: &'a GameState) -> Self {
        Self {
            world: &state.world,
            bird: &state.bird,
            pipes: state.pipes.as_slice(),
            frames: state.frames,
            score: state.score,
            best_score: state.best_score,
            phase: state.phase,
        }
    }

    /// Wing flaps on a 10-frame cycle while flying
    pub fn wing_up(&self) -> bool {
        self.phase == GamePhase::Running && self.frames % 10 < 5
    }

    /// Horizontal scroll of the ground stripes
    pub fn ground_offset(&self) -> f32 {
        // Whole scroll steps per stripe period; reduce before going to f32
        let steps = (GROUND_STRIPE_PERIOD / PIPE_SPEED) as u64;
        (self.frames % steps) as f32 * PIPE_SPEED
    }
}

/// Draws frames
pub trait Renderer {
    fn draw(&mut self, frame: &FrameView<'_>);
}

impl<F: FnMut(&FrameView<'_>)> Renderer for F {
    fn draw(&mut self, frame: &FrameView<'_>) {
        self(frame)
    }
}

/// Prompt shown to the player in each phase
pub fn status_line(phase: GamePhase) -> &'static str {
    match phase {
        GamePhase::Idle => "Ready for takeoff",
        GamePhase::Running => "Flying · Space / ↑ / click to flap",
        GamePhase::Terminated => "Hit an obstacle, ready for another run",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wing_cycle() {
        let mut state = GameState::new(World::default(), 1, 0);
        state.phase = GamePhase::Running;
        state.frames = 4;
        assert!(FrameView::of(&state).wing_up());
        state.frames = 5;
        assert!(!FrameView::of(&state).wing_up());
        state.frames = 10;
        assert!(FrameView::of(&state).wing_up());

        state.phase = GamePhase::Idle;
        assert!(!FrameView::of(&state).wing_up());
    }

    #[test]
    fn test_ground_offset_wraps() {
        let mut state = GameState::new(World::default(), 1, 0);
        state.frames = 7;
        assert_eq!(FrameView::of(&state).ground_offset(), 17.5);
        state.frames = 8;
        assert_eq!(FrameView::of(&state).ground_offset(), 0.0);
    }

    #[test]
    fn test_ground_offset_exact_for_long_runs() {
        let mut state = GameState::new(World::default(), 1, 0);
        // Past the point where frames stop being exact in f32
        state.frames = (1 << 24) + 3;
        assert_eq!(FrameView::of(&state).ground_offset(), 7.5);
        state.frames = u64::MAX;
        assert_eq!(FrameView::of(&state).ground_offset(), 17.5);
    }

    #[test]
    fn test_status_lines_differ() {
        let lines = [
            status_line(GamePhase::Idle),
            status_line(GamePhase::Running),
            status_line(GamePhase::Terminated),
        ];
        assert_ne!(lines[0], lines[1]);
        assert_ne!(lines[1], lines[2]);
    }
}
