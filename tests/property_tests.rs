//! Property tests for dealing and the match engine.

use std::time::Duration;

use proptest::prelude::*;

use sound_memory::audio::{AudioCue, CueRecorder};
use sound_memory::core::{Board, GameRng, MatchConfig, PlayerId, TileId, ToneId, PAIR_COUNT};
use sound_memory::rules::{GameResult, MatchEngine, SelectOutcome};
use sound_memory::schedule::ManualClock;
use sound_memory::theme::Theme;

#[derive(Clone, Debug)]
enum Event {
    Select(u8),
    Advance(u64),
    Replay,
    Theme(bool),
}

fn event() -> impl Strategy<Value = Event> {
    prop_oneof![
        8 => (0u8..20).prop_map(Event::Select),
        4 => (0u64..1500).prop_map(Event::Advance),
        1 => Just(Event::Replay),
        1 => any::<bool>().prop_map(Event::Theme),
    ]
}

fn seeded(seed: u64) -> (MatchEngine<CueRecorder, ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    let config = MatchConfig::default().with_seed(seed);
    let engine = MatchEngine::with_parts(config, CueRecorder::new(), clock.clone());
    (engine, clock)
}

proptest! {
    #[test]
    fn prop_every_deal_pairs_every_tone(seed in any::<u64>()) {
        let mut rng = GameRng::new(seed);
        for _ in 0..4 {
            let board = Board::deal(&mut rng);
            for tone in 0..PAIR_COUNT as u8 {
                prop_assert_eq!(board.positions_of(ToneId::new(tone)).len(), 2);
            }
            prop_assert!(board.iter().all(|t| !t.is_flipped && !t.is_matched));
        }
    }

    #[test]
    fn prop_same_seed_same_deals(seed in any::<u64>()) {
        let (mut a, _) = seeded(seed);
        let (mut b, _) = seeded(seed);
        prop_assert_eq!(&a.state().board, &b.state().board);

        a.play_again();
        b.play_again();
        prop_assert_eq!(&a.state().board, &b.state().board);
    }

    #[test]
    fn prop_invariants_hold_under_any_events(
        seed in any::<u64>(),
        events in prop::collection::vec(event(), 1..200),
    ) {
        let (mut engine, clock) = seeded(seed);

        for ev in events {
            let before = engine.snapshot();
            match ev {
                Event::Select(id) => {
                    let outcome = engine.select_tile(TileId::new(id));
                    if !outcome.is_accepted() {
                        prop_assert_eq!(engine.state(), &before);
                    }
                }
                Event::Advance(ms) => {
                    clock.advance(Duration::from_millis(ms));
                    engine.tick();
                }
                Event::Replay => engine.play_again(),
                Event::Theme(minecraft) => engine.set_theme(if minecraft {
                    Theme::Minecraft
                } else {
                    Theme::Classic
                }),
            }

            let state = engine.state();
            prop_assert_eq!(state.validate(), Ok(()));
            prop_assert!(state.total_score() <= PAIR_COUNT as u32);
            prop_assert!(state.selection.len() <= 2);
            prop_assert_eq!(state.game_over, state.board.all_matched());
        }
    }

    #[test]
    fn prop_perfect_memory_game_finishes(seed in any::<u64>(), miss_first in any::<bool>()) {
        let (mut engine, _) = seeded(seed);

        if miss_first {
            let a = engine.state().board.positions_of(ToneId::new(0))[0];
            let b = engine.state().board.positions_of(ToneId::new(1))[0];
            engine.select_tile(a);
            engine.select_tile(b);
            engine.resolve_selection();
        }

        for tone in 0..PAIR_COUNT as u8 {
            let pair = engine.state().board.positions_of(ToneId::new(tone));
            prop_assert_eq!(engine.select_tile(pair[0]), SelectOutcome::Flipped);
            prop_assert!(matches!(
                engine.select_tile(pair[1]),
                SelectOutcome::AwaitingResolution(_)
            ));
            prop_assert!(engine.resolve_selection().is_some());
        }

        let state = engine.state();
        let scorer = if miss_first { PlayerId::new(1) } else { PlayerId::new(0) };
        prop_assert!(state.game_over);
        prop_assert_eq!(state.total_score(), PAIR_COUNT as u32);
        prop_assert_eq!(state.outcome(), Some(GameResult::Winner(scorer)));
        prop_assert_eq!(
            engine.audio().cues().iter().filter(|c| **c == AudioCue::Victory).count(),
            1
        );
    }
}
