//! Property-based tests for the transition engine.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use crossing::agent::{Agent, AgentRole};
use crossing::core::{TransitionTable, Visibility};
use crossing::intersection::Intersection;
use proptest::prelude::*;

const STATES: [&str; 9] = [
    "car drive",
    "car stop",
    "car signalStop",
    "man walk",
    "man stop",
    "man signalStop",
    "signal green",
    "signal orange",
    "signal red",
];

const CYCLE: [&str; 3] = ["signal green", "signal orange", "signal red"];

prop_compose! {
    fn arbitrary_state()(index in 0..STATES.len()) -> &'static str {
        STATES[index]
    }
}

prop_compose! {
    fn car_request()(
        target in prop::sample::select(vec!["car drive", "car stop", "car signalStop", "man walk"]),
        allow_invisible in any::<bool>(),
    ) -> (&'static str, bool) {
        (target, allow_invisible)
    }
}

#[derive(Clone, Debug)]
enum Command {
    Car(&'static str),
    Pedestrian(&'static str),
    Signal,
}

fn arbitrary_command() -> impl Strategy<Value = Command> {
    prop_oneof![
        prop::sample::select(vec!["drive", "stop", "signalStop", "walk"]).prop_map(Command::Car),
        prop::sample::select(vec!["walk", "stop", "signalStop", "drive"])
            .prop_map(Command::Pedestrian),
        Just(Command::Signal),
    ]
}

proptest! {
    #[test]
    fn visible_lookup_matches_visible_entries(from in arbitrary_state(), to in arbitrary_state()) {
        let table = TransitionTable::intersection();
        let expected = table
            .iter()
            .any(|t| t.from == from && t.to == to && t.visibility == Visibility::Visible);

        prop_assert_eq!(table.find_transition(from, to, false).is_some(), expected);
    }

    #[test]
    fn allowing_invisible_never_loses_a_match(from in arbitrary_state(), to in arbitrary_state()) {
        let table = TransitionTable::intersection();

        if table.find_transition(from, to, false).is_some() {
            prop_assert!(table.find_transition(from, to, true).is_some());
        }
    }

    #[test]
    fn every_destination_has_an_entry(index in 0..19usize) {
        let table = TransitionTable::intersection();
        let to = &table[index].to;

        prop_assert!(
            table.find_state_entry(to, Visibility::Visible).is_some()
                || table.find_state_entry(to, Visibility::Invisible).is_some()
        );
    }

    #[test]
    fn car_state_only_changes_on_success(
        requests in prop::collection::vec(car_request(), 0..30)
    ) {
        let table = TransitionTable::intersection();
        let mut car = Agent::new(&table, "car drive").unwrap();

        for (target, allow_invisible) in requests {
            let before = car.current_state_name();
            let recorded = car.history().len();

            match car.request_transition(target, allow_invisible) {
                Ok(_) => {
                    prop_assert_eq!(car.current_state_name(), target);
                    prop_assert_eq!(car.history().len(), recorded + 1);
                }
                Err(err) => {
                    prop_assert!(err.is_illegal());
                    prop_assert_eq!(car.current_state_name(), before);
                    prop_assert_eq!(car.history().len(), recorded);
                }
            }

            let resting = &table[car.current_index()];
            prop_assert!(resting.is_self_loop());
            prop_assert!(resting.from.starts_with("car "));
        }
    }

    #[test]
    fn user_requests_never_reach_system_states(
        targets in prop::collection::vec(
            prop::sample::select(vec!["car drive", "car stop", "car signalStop"]),
            0..30,
        )
    ) {
        let table = TransitionTable::intersection();
        let mut car = Agent::new(&table, "car drive").unwrap();

        for target in targets {
            let _ = car.request(target);
            prop_assert_ne!(car.current_state_name(), "car signalStop");
        }
    }

    #[test]
    fn signal_follows_its_cycle(advances in 0..20usize) {
        let table = TransitionTable::intersection();
        let mut crossing = Intersection::standard(&table).unwrap();

        for _ in 0..advances {
            crossing.advance_signal().unwrap();
        }

        prop_assert_eq!(crossing.signal().current_state_name(), CYCLE[advances % 3]);
        prop_assert_eq!(crossing.signal().history().len(), advances);
    }

    #[test]
    fn forcing_always_applies(commands in prop::collection::vec(arbitrary_command(), 0..40)) {
        let table = TransitionTable::intersection();
        let mut crossing = Intersection::standard(&table).unwrap();

        for command in commands {
            match command {
                Command::Car(verb) => {
                    let _ = crossing.command(AgentRole::Car, verb);
                }
                Command::Pedestrian(verb) => {
                    let _ = crossing.command(AgentRole::Pedestrian, verb);
                }
                Command::Signal => {
                    let report = crossing.advance_signal().unwrap();
                    prop_assert!(report.fully_propagated());

                    let snapshot = crossing.snapshot();
                    match snapshot.signal {
                        "signal red" => {
                            prop_assert_eq!(snapshot.car, "car signalStop");
                            prop_assert_eq!(snapshot.pedestrian, "man walk");
                        }
                        "signal green" => {
                            prop_assert_eq!(snapshot.car, "car drive");
                            prop_assert_eq!(snapshot.pedestrian, "man signalStop");
                        }
                        _ => prop_assert!(report.forced.is_empty()),
                    }
                }
            }
        }
    }
}
