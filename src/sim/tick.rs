//! Fixed-step simulation tick
//!
//! One call advances the game by exactly one frame. The caller decides when
//! frames happen; nothing here knows about timers or animation callbacks.

use serde::{Deserialize, Serialize};

use super::body::Contact;
use super::collision::collides;
use super::state::{EndCause, GamePhase, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Primary action received since the previous tick
    pub flap: bool,
}

/// Things that happened during a tick, for front-ends and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Flapped,
    PipeSpawned,
    /// Cleared a pipe; carries the new score
    Scored { score: u32 },
    /// Best score raised during play
    NewBest { best: u32 },
    /// Run ended with this final score
    Crashed { cause: EndCause, score: u32 },
}

/// Advance the game state by one tick
///
/// Order within a tick: queued flap, spawn, scroll, prune, pipe checks in
/// creation order, bird integration, frame counter. The first pipe hit ends
/// the tick on the spot; the bird does not move and the frame counter does
/// not advance.
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if state.phase != GamePhase::Running {
        return events;
    }

    if input.flap {
        state.bird.flap();
        events.push(GameEvent::Flapped);
    }

    // Pipes: spawn, scroll, prune
    if state
        .pipes
        .spawn_if_due(state.frames, &state.world, &mut state.rng)
    {
        events.push(GameEvent::PipeSpawned);
    }
    state.pipes.advance_all();
    state.pipes.prune_offscreen();

    // Collisions and scoring, oldest pipe first
    let bird = &state.bird;
    let mut hit = false;
    for pipe in state.pipes.iter_mut() {
        if collides(bird, pipe) {
            hit = true;
            break;
        }

        if !pipe.passed && pipe.has_been_passed(bird.pos.x, bird.radius) {
            pipe.passed = true;
            state.score += 1;
            events.push(GameEvent::Scored { score: state.score });
            log::debug!("scored: {}", state.score);

            if state.score > state.best_score {
                state.best_score = state.score;
                events.push(GameEvent::NewBest {
                    best: state.best_score,
                });
            }
        }
    }
    if hit {
        terminate(state, EndCause::Pipe, &mut events);
        return events;
    }

    // Bird
    if state.bird.integrate(state.world.floor_y()) == Contact::Floor {
        terminate(state, EndCause::Ground, &mut events);
    }

    state.frames += 1;
    events
}

fn terminate(state: &mut GameState, cause: EndCause, events: &mut Vec<GameEvent>) {
    state.phase = GamePhase::Terminated;
    state.end_cause = Some(cause);
    state.record_best();
    events.push(GameEvent::Crashed {
        cause,
        score: state.score,
    });
}
