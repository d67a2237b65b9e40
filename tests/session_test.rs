use flappy_gates::consts::MIN_WORLD_HEIGHT;
use flappy_gates::highscores::BestScoreStore;
use flappy_gates::render::FrameView;
use flappy_gates::sim::{EndCause, GameEvent, GamePhase, World};
use flappy_gates::{FrameOutcome, MemoryStore, Session};

// On the smallest world every gap spans 50..190, so a simple autopilot that
// flaps whenever the bird sinks below y=140 threads every pipe.
fn small_world() -> World {
    World::new(400.0, MIN_WORLD_HEIGHT).unwrap()
}

fn no_draw(_: &FrameView<'_>) {}

#[test]
fn test_autopilot_scores_and_persists_best() {
    let mut session = Session::new(small_world(), MemoryStore::new(), 3);
    let ticket = session.handle_flap_input().unwrap();

    let mut scored = 0;
    for _ in 0..1000 {
        let bird = &session.state().bird;
        if bird.pos.y > 140.0 && bird.velocity > 0.0 {
            assert!(session.handle_flap_input().is_none());
        }
        assert_eq!(session.on_frame(ticket, &mut no_draw), FrameOutcome::Continue);
        scored += session
            .last_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::Scored { .. }))
            .count();
    }

    let snap = session.snapshot();
    assert!(snap.score >= 5, "autopilot only scored {}", snap.score);
    assert_eq!(scored as u32, snap.score);
    assert_eq!(snap.best_score, snap.score);
    // Written as soon as it is beaten, so quitting mid-run keeps the record
    assert_eq!(session.store().load(), snap.best_score);

    // Stop flapping and let the run end
    let mut ticks = 0;
    while session.on_frame(ticket, &mut no_draw) == FrameOutcome::Continue {
        ticks += 1;
        assert!(ticks < 500, "run never ended");
    }

    let snap = session.snapshot();
    let best = snap.best_score;
    assert_eq!(snap.phase, GamePhase::Terminated);
    assert_eq!(snap.final_score, Some(snap.score));
    assert_eq!(best, snap.score);
    assert_eq!(session.store().load(), best);
}

#[test]
fn test_second_run_keeps_best() {
    let mut session = Session::new(small_world(), MemoryStore::with_raw("12"), 9);
    assert_eq!(session.snapshot().best_score, 12);

    // Launch once and never flap again: the bird drops to the floor
    let ticket = session.start_session();
    while session.on_frame(ticket, &mut no_draw) == FrameOutcome::Continue {}

    let snap = session.snapshot();
    assert_eq!(snap.final_score, Some(0));
    assert_eq!(snap.best_score, 12);
    assert_eq!(session.state().end_cause, Some(EndCause::Ground));
    // Not beaten, so the stored text is left alone
    assert_eq!(session.store().raw(), Some("12"));

    let next = session.handle_flap_input().unwrap();
    assert_ne!(next, ticket);
    let snap = session.snapshot();
    assert_eq!(snap.phase, GamePhase::Running);
    assert_eq!(snap.score, 0);
    assert_eq!(snap.best_score, 12);
    assert_eq!(snap.final_score, None);
}

#[test]
fn test_corrupt_store_starts_at_zero() {
    let session = Session::new(World::default(), MemoryStore::with_raw("not a number"), 1);
    assert_eq!(session.snapshot().best_score, 0);
}

#[test]
fn test_read_only_store_does_not_break_play() {
    let mut store = MemoryStore::new();
    store.read_only = true;
    let mut session = Session::new(small_world(), store, 5);

    let ticket = session.start_session();
    for _ in 0..300 {
        let bird = &session.state().bird;
        if bird.pos.y > 140.0 && bird.velocity > 0.0 {
            session.handle_flap_input();
        }
        session.on_frame(ticket, &mut no_draw);
    }
    while session.on_frame(ticket, &mut no_draw) == FrameOutcome::Continue {}

    let snap = session.snapshot();
    assert!(snap.best_score >= 1);
    assert_eq!(session.store().raw(), None);
    assert_eq!(session.store().load(), 0);
}
