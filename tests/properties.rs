use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use flappy_gates::consts::*;
use flappy_gates::highscores::parse_best_score;
use flappy_gates::render::FrameView;
use flappy_gates::sim::{Bird, GameEvent, GamePhase, GameState, Pipe, TickInput, World, tick};
use flappy_gates::{FrameOutcome, MemoryStore, Session};

fn no_draw(_: &FrameView<'_>) {}

proptest! {
    #[test]
    fn bird_stays_inside_playfield(
        start in 0.0f32..1.0,
        velocity in -12.0f32..12.0,
        flaps in prop::collection::vec(any::<bool>(), 1..200),
    ) {
        let world = World::default();
        let floor = world.floor_y();
        let mut bird = Bird::new(world.height);
        bird.pos.y = BIRD_RADIUS + start * (floor - 2.0 * BIRD_RADIUS);
        bird.velocity = velocity;

        for flap in flaps {
            if flap {
                bird.flap();
            }
            bird.integrate(floor);
            prop_assert!(bird.pos.y - bird.radius >= -1e-3);
            prop_assert!(bird.pos.y + bird.radius <= floor + 1e-3);
        }
    }

    #[test]
    fn flap_overwrites_velocity(velocity in -50.0f32..50.0) {
        let mut bird = Bird::new(600.0);
        bird.velocity = velocity;
        bird.flap();
        prop_assert_eq!(bird.velocity, FLAP_SPEED);
    }

    #[test]
    fn gap_is_always_in_range(seed in any::<u64>(), height in MIN_WORLD_HEIGHT..2000.0f32) {
        let world = World::new(400.0, height).unwrap();
        let mut rng = Pcg32::seed_from_u64(seed);
        for _ in 0..8 {
            let pipe = Pipe::spawn(&world, &mut rng);
            prop_assert!(pipe.top_height >= MIN_PIPE_HEIGHT);
            prop_assert!(pipe.top_height <= world.max_pipe_height());
            prop_assert!((pipe.bottom_y - pipe.top_height - PIPE_SPACING).abs() < 1e-3);
            prop_assert!(pipe.bottom_y <= world.floor_y() - MIN_PIPE_HEIGHT + 1e-3);
        }
    }

    #[test]
    fn score_counts_scored_events(
        seed in any::<u64>(),
        flaps in prop::collection::vec(prop::bool::weighted(0.08), 0..600),
    ) {
        let mut state = GameState::new(World::default(), seed, 0);
        state.phase = GamePhase::Running;

        let mut scored = 0u32;
        for flap in flaps {
            let before = state.score;
            let events = tick(&mut state, &TickInput { flap });
            prop_assert!(state.score - before <= 1);
            scored += events
                .iter()
                .filter(|e| matches!(e, GameEvent::Scored { .. }))
                .count() as u32;
            if !state.is_running() {
                break;
            }
        }
        prop_assert_eq!(scored, state.score);
        prop_assert!(state.best_score >= state.score);
    }

    #[test]
    fn best_score_never_drops(
        seed in any::<u64>(),
        stored in 0u32..20,
        runs in prop::collection::vec(prop::collection::vec(any::<bool>(), 0..300), 1..4),
    ) {
        let mut session = Session::new(World::default(), MemoryStore::with_raw(stored.to_string()), seed);
        let mut best = session.snapshot().best_score;
        prop_assert_eq!(best, stored);

        for flaps in runs {
            let ticket = session.start_session();
            for flap in flaps {
                if flap {
                    session.handle_flap_input();
                }
                if session.on_frame(ticket, &mut no_draw) == FrameOutcome::Halt {
                    break;
                }
            }
            while session.on_frame(ticket, &mut no_draw) == FrameOutcome::Continue {}

            let snap = session.snapshot();
            prop_assert!(snap.best_score >= best);
            prop_assert!(snap.best_score >= snap.final_score.unwrap_or(0));
            prop_assert_eq!(parse_best_score(session.store().raw()), snap.best_score);
            best = snap.best_score;
        }
    }

    #[test]
    fn parse_never_panics(raw in ".*") {
        let _ = parse_best_score(Some(raw.as_str()));
    }
}
