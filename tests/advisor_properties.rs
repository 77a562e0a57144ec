//! Invariant and scenario tests for the advisor engine.
//!
//! Randomised sequences are driven by seeded `StdRng`s so failures reproduce.

mod common;

use std::{sync::Arc, thread};

use chicken_advisor::{
    adapters::{ScriptedRandom, StdRandom},
    app::{Advisor, AdvisorConfig},
    engine::{
        ExplorationSchedule, FallbackTier, Learner, Policy, StateStore, Strategy,
        epsilon_from_game_count,
    },
    grid::{Cell, Zone, ZoneLayout, ZoneSpec},
};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

fn cell(id: usize) -> Cell {
    Cell::new(id).unwrap()
}

fn default_policy() -> Policy {
    Policy::new(ZoneLayout::from_spec(&ZoneSpec::default()).unwrap(), 3)
}

fn assert_store_invariants(store: &StateStore) {
    for (cell, value) in store.value_estimates() {
        assert!(
            (0.0..=1.0).contains(&value),
            "cell {cell} value {value} left [0,1]"
        );
    }
    assert!(store.memory().len() <= store.memory().capacity());
    let schedule = store.schedule();
    assert!(store.epsilon() >= schedule.min_epsilon);
    assert!(store.epsilon() <= schedule.initial_epsilon);
}

#[test]
fn values_memory_and_epsilon_stay_bounded_under_random_play() {
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let policy = default_policy();
        let learner = Learner::default();
        let mut store = StateStore::new(ExplorationSchedule::default(), 7).unwrap();
        let mut source = StdRandom::seeded(seed);

        let mut previous_epsilon = store.epsilon();
        for _ in 0..400 {
            let revealed_count = rng.random_range(0..25);
            let mut ids: Vec<usize> = (1..=25).collect();
            ids.shuffle(&mut rng);
            let revealed: Vec<Cell> = ids[..revealed_count].iter().map(|&id| cell(id)).collect();

            let pick = policy.select_next(&mut store, &revealed, &mut source).unwrap();
            let reward = rng.random_range(-3.0..3.0);
            learner
                .update(&mut store, pick.cell, rng.random_bool(0.6), reward)
                .unwrap();

            assert_store_invariants(&store);
            assert!(store.epsilon() <= previous_epsilon, "epsilon increased");
            previous_epsilon = store.epsilon();
        }
        assert_eq!(store.epsilon(), 0.05, "400 decays reach the floor");
    }
}

#[test]
fn selection_never_returns_a_revealed_cell() {
    let policy = default_policy();
    let learner = Learner::default();

    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut store = StateStore::new(ExplorationSchedule::default(), 3).unwrap();
        let mut source = StdRandom::seeded(seed.wrapping_mul(31));

        // Fill the memory so the anti-repetition filter is active.
        for id in [1, 15, 17] {
            learner.update(&mut store, cell(id), true, 1.0).unwrap();
        }

        let mut ids: Vec<usize> = (1..=25).collect();
        ids.shuffle(&mut rng);
        for revealed_count in 0..25 {
            let revealed: Vec<Cell> = ids[..revealed_count].iter().map(|&id| cell(id)).collect();
            let pick = policy.select_next(&mut store, &revealed, &mut source).unwrap();
            assert!(
                !revealed.contains(&pick.cell),
                "picked revealed cell {} with {} revealed",
                pick.cell,
                revealed_count
            );
        }

        let all: Vec<Cell> = ids.iter().map(|&id| cell(id)).collect();
        assert!(policy.select_next(&mut store, &all, &mut source).is_err());
    }
}

#[test]
fn memory_does_not_block_until_full() {
    let learner = Learner::default();
    let mut store = StateStore::new(ExplorationSchedule::default(), 7).unwrap();

    for id in 1..=6 {
        learner.update(&mut store, cell(id), true, 1.0).unwrap();
        assert!(Cell::all().all(|c| !store.is_in_memory(c)));
    }

    learner.update(&mut store, cell(7), true, 1.0).unwrap();
    assert!(store.memory().is_full());
    assert!(store.is_in_memory(cell(1)));
    assert!(store.is_in_memory(cell(7)));
    assert!(!store.is_in_memory(cell(8)));

    learner.update(&mut store, cell(8), true, 1.0).unwrap();
    assert!(!store.is_in_memory(cell(1)), "oldest entry evicted");
    assert_eq!(store.memory().len(), 7);
}

#[test]
fn full_memory_excludes_recent_cells_from_rotated_zone() {
    let policy = default_policy();
    let learner = Learner::default();
    let mut store = StateStore::new(ExplorationSchedule::default(), 4).unwrap();
    for id in [1, 3, 5, 7] {
        learner.update(&mut store, cell(id), true, 1.0).unwrap();
    }

    let pool = policy.candidate_pool(&store, &[]).unwrap();
    assert_eq!(pool.tier, FallbackTier::RotatedZone);
    assert_eq!(pool.cells, vec![cell(9), cell(11)]);
}

#[test]
fn initialize_twice_matches_once() {
    let advisor = Advisor::new(AdvisorConfig::default().with_seed(5)).unwrap();
    for _ in 0..10 {
        let pick = advisor.select_next(&[]).unwrap();
        advisor.update(pick.cell, true, 1.0).unwrap();
    }

    advisor.reset().unwrap();
    let once = advisor.inspect(StateStore::clone).unwrap();
    advisor.reset().unwrap();
    let twice = advisor.inspect(StateStore::clone).unwrap();
    assert_eq!(once, twice);
    assert_eq!(once, StateStore::new(ExplorationSchedule::default(), 7).unwrap());
}

#[test]
fn greedy_selection_takes_best_of_top_three_preferred_cells() {
    let config = AdvisorConfig::default().with_exploration(ExplorationSchedule::new(0.0, 0.0, 0.995));
    let history = [
        common::game(&[7], &[20]),
        common::game(&[7], &[20]),
        common::game(&[7], &[7]),
        common::game(&[5], &[20]),
        common::game(&[11], &[11]),
    ];

    // Upper preferred ranked: 5 (1.0), 7 (0.667), 1 (0.5), 3, 9 (0.5), 11 (0.0)
    for (index, expected) in [(0, 5), (1, 7), (2, 1)] {
        let advisor = Advisor::with_random_source(
            config.clone(),
            Box::new(ScriptedRandom::exploiting().with_indices([index])),
        )
        .unwrap();
        advisor.seed_from_history(&history).unwrap();

        let pick = advisor.select_next(&[]).unwrap();
        assert_eq!(pick.strategy, Strategy::Exploit);
        assert_eq!(pick.zone, Zone::Upper);
        assert_eq!(pick.cell, cell(expected));
        assert_eq!(pick.epsilon_at_selection, 0.0);
    }

    let advisor = Advisor::new(config.with_seed(11)).unwrap();
    advisor.seed_from_history(&history).unwrap();
    let pick = advisor.select_next(&[]).unwrap();
    assert!([5, 7, 1].contains(&pick.cell.id()));
    assert_eq!(pick.confidence, (pick.value_estimate_at_selection * 100.0).round() as u8);
}

#[test]
fn single_successful_update_from_neutral() {
    let advisor = Advisor::new(AdvisorConfig::default()).unwrap();
    advisor.update_id(5, true, 1.0).unwrap();

    advisor
        .inspect(|store| {
            assert!((store.value_estimate(cell(5)) - 0.595).abs() < 1e-12);
            let counter = store.outcome_counter(cell(5));
            assert_eq!((counter.success, counter.total), (1, 1));
            assert_eq!(store.memory().iter().next(), Some(cell(5)));
        })
        .unwrap();
}

#[test]
fn twenty_five_alternating_updates_decay_epsilon() {
    let advisor = Advisor::new(AdvisorConfig::default()).unwrap();
    for i in 0..25 {
        advisor.update_id(1 + i % 25, i % 2 == 0, 1.0).unwrap();
    }

    let epsilon = advisor.diagnostics().unwrap().epsilon;
    assert!((epsilon - 0.30 * 0.995_f64.powi(25)).abs() < 1e-12);
    assert!((epsilon - 0.2649).abs() < 1e-4);
    assert!((epsilon - epsilon_from_game_count(0.30, 0.995, 0.05, 25)).abs() < 1e-12);
}

#[test]
fn invalid_update_leaves_state_unchanged() {
    let advisor = Advisor::new(AdvisorConfig::default()).unwrap();
    advisor.update_id(3, true, 1.0).unwrap();
    let before = advisor.inspect(StateStore::clone).unwrap();

    assert!(advisor.update_id(0, true, 1.0).is_err());
    assert!(advisor.update_id(26, false, 1.0).is_err());

    assert_eq!(advisor.inspect(StateStore::clone).unwrap(), before);
}

#[test]
fn non_finite_rewards_on_valid_cells_are_clamped() {
    let advisor = Advisor::new(AdvisorConfig::default()).unwrap();
    advisor.update_id(5, false, f64::INFINITY).unwrap();
    advisor.update_id(6, true, f64::INFINITY).unwrap();
    advisor.update_id(7, true, f64::NAN).unwrap();

    advisor
        .inspect(|store| {
            assert_eq!(store.value_estimate(cell(5)), 0.0);
            assert_eq!(store.value_estimate(cell(6)), 1.0);
            assert!((0.0..=1.0).contains(&store.value_estimate(cell(7))));
            assert_eq!(store.games_processed(), 3);
            assert_store_invariants(store);
        })
        .unwrap();
}

#[test]
fn diagnostics_do_not_mutate() {
    let advisor = Advisor::new(AdvisorConfig::default().with_seed(2)).unwrap();
    let pick = advisor.select_next(&[]).unwrap();
    advisor.update(pick.cell, false, 1.0).unwrap();

    let before = advisor.inspect(StateStore::clone).unwrap();
    let first = advisor.diagnostics().unwrap();
    let second = advisor.diagnostics().unwrap();
    assert_eq!(first, second);
    assert_eq!(advisor.inspect(StateStore::clone).unwrap(), before);
    assert_eq!(first.top_cells.len(), 5);
}

#[test]
fn concurrent_readers_never_see_half_applied_updates() {
    let advisor = Arc::new(Advisor::new(AdvisorConfig::default().with_seed(77)).unwrap());

    let writers: Vec<_> = (0..4)
        .map(|worker| {
            let advisor = Arc::clone(&advisor);
            thread::spawn(move || {
                let mut rng = StdRng::seed_from_u64(worker);
                for _ in 0..100 {
                    let revealed: Vec<usize> = (1..=rng.random_range(0..10)).collect();
                    let pick = advisor.select_next_ids(&revealed).unwrap();
                    advisor.update(pick.cell, rng.random_bool(0.7), 1.0).unwrap();
                }
            })
        })
        .collect();

    let readers: Vec<_> = (0..2)
        .map(|_| {
            let advisor = Arc::clone(&advisor);
            thread::spawn(move || {
                for _ in 0..200 {
                    advisor.inspect(assert_store_invariants).unwrap();
                    let snapshot = advisor.diagnostics().unwrap();
                    // Every update decays once, so epsilon tracks the game count exactly.
                    let expected = ExplorationSchedule::default()
                        .after_games(snapshot.games_processed as usize);
                    assert!((snapshot.epsilon - expected).abs() < 1e-9);
                }
            })
        })
        .collect();

    for handle in writers.into_iter().chain(readers) {
        handle.join().unwrap();
    }

    let snapshot = advisor.diagnostics().unwrap();
    assert_eq!(snapshot.games_processed, 400);
    assert_eq!(snapshot.explore_count + snapshot.exploit_count, 400);
}
