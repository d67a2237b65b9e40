//! Session controller
//!
//! Owns the game state, the best-score store and the phase observer. A
//! front-end only ever calls `start_session`, `handle_flap_input`,
//! `on_frame` and `snapshot`.
//!
//! Frames are scheduled by the front-end. Each session hands out a
//! `FrameTicket` tagged with its generation; a ticket from an earlier session
//! is ignored, so a callback left over from the previous run can never
//! advance the new one.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::highscores::BestScoreStore;
use crate::render::{FrameView, Renderer};
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, World, tick};

/// Proof that a frame callback belongs to the current session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTicket {
    generation: u64,
}

/// Whether the front-end should schedule another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Halt,
}

/// Read-only view of the scores for HUDs and status text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub score: u32,
    pub best_score: u32,
    /// Score of the last finished run
    pub final_score: Option<u32>,
    pub phase: GamePhase,
    pub frames: u64,
}

/// Notified on every phase change
pub trait PhaseObserver {
    fn phase_changed(&mut self, phase: GamePhase, snapshot: &Snapshot);
}

impl<F: FnMut(GamePhase, &Snapshot)> PhaseObserver for F {
    fn phase_changed(&mut self, phase: GamePhase, snapshot: &Snapshot) {
        self(phase, snapshot)
    }
}

pub struct Session<S: BestScoreStore> {
    state: GameState,
    store: S,
    observer: Option<Box<dyn PhaseObserver>>,
    /// Source of per-run seeds
    seeds: Pcg32,
    generation: u64,
    /// Input queued between frames
    pending: TickInput,
    /// Last value handed to the store
    persisted_best: u32,
    final_score: Option<u32>,
    last_events: Vec<GameEvent>,
}

impl<S: BestScoreStore> Session<S> {
    /// Idle session with the best score read from `store`
    pub fn new(world: World, store: S, seed: u64) -> Self {
        let best = store.load();
        let mut seeds = Pcg32::seed_from_u64(seed);
        let state = GameState::new(world, seeds.next_u64(), best);
        log::info!("Session ready (best score {})", best);

        Self {
            state,
            store,
            observer: None,
            seeds,
            generation: 0,
            pending: TickInput::default(),
            persisted_best: best,
            final_score: None,
            last_events: Vec::new(),
        }
    }

    /// Attach the status observer; it is told the current phase right away
    pub fn set_observer(&mut self, observer: impl PhaseObserver + 'static) {
        self.observer = Some(Box::new(observer));
        self.notify();
    }

    /// Reset everything but the best score and start flying
    ///
    /// Has no effect while a run is already in progress.
    pub fn start_session(&mut self) -> FrameTicket {
        if self.state.is_running() {
            log::debug!("start_session ignored: already running");
            return self.ticket();
        }

        let seed = self.seeds.next_u64();
        self.state.reset(seed);
        self.state.phase = GamePhase::Running;
        self.generation += 1;
        self.final_score = None;
        self.last_events.clear();
        // The bird launches on start
        self.pending = TickInput { flap: true };

        log::info!(
            "Session {} started (seed {}, best {})",
            self.generation,
            seed,
            self.state.best_score
        );
        self.notify();
        self.ticket()
    }

    /// Primary action: flap while running, otherwise start a new run
    ///
    /// Returns a ticket when a new run was started.
    pub fn handle_flap_input(&mut self) -> Option<FrameTicket> {
        match self.state.phase {
            GamePhase::Running => {
                self.pending.flap = true;
                None
            }
            GamePhase::Idle | GamePhase::Terminated => Some(self.start_session()),
        }
    }

    /// Run one tick and draw it, if `ticket` belongs to the live run
    pub fn on_frame<R: Renderer + ?Sized>(
        &mut self,
        ticket: FrameTicket,
        renderer: &mut R,
    ) -> FrameOutcome {
        if ticket.generation != self.generation {
            log::debug!(
                "Dropping stale frame from session {} (current {})",
                ticket.generation,
                self.generation
            );
            return FrameOutcome::Halt;
        }
        if !self.state.is_running() {
            return FrameOutcome::Halt;
        }

        let input = std::mem::take(&mut self.pending);
        self.last_events = tick(&mut self.state, &input);
        self.persist_best();
        renderer.draw(&FrameView::of(&self.state));

        if self.state.is_running() {
            FrameOutcome::Continue
        } else {
            self.finish();
            FrameOutcome::Halt
        }
    }

    /// Draw the current state without advancing it
    pub fn draw<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        renderer.draw(&FrameView::of(&self.state));
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            score: self.state.score,
            best_score: self.state.best_score,
            final_score: self.final_score,
            phase: self.state.phase,
            frames: self.state.frames,
        }
    }

    /// Ticket for the current generation
    pub fn ticket(&self) -> FrameTicket {
        FrameTicket {
            generation: self.generation,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Events produced by the most recent tick
    pub fn last_events(&self) -> &[GameEvent] {
        &self.last_events
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn finish(&mut self) {
        let score = self.state.score;
        self.final_score = Some(score);

        self.persist_best();

        log::info!(
            "Session {} over: {:?}, score {}, best {}",
            self.generation,
            self.state.end_cause,
            score,
            self.state.best_score
        );
        self.notify();
    }

    /// Hand the best score to the store whenever it beats what was last written
    fn persist_best(&mut self) {
        let best = self.state.best_score;
        if best > self.persisted_best {
            log::debug!("New best score {} persisted", best);
            self.store.save(best);
            self.persisted_best = best;
        }
    }

    fn notify(&mut self) {
        let snapshot = self.snapshot();
        if let Some(observer) = self.observer.as_mut() {
            observer.phase_changed(snapshot.phase, &snapshot);
        }
    }
}
