//! Coin-Operated Turnstile
//!
//! This example drives a turnstile through a ride, a failure and a repair.
//!
//! Key concepts:
//! - Rules that read event payloads (coin value)
//! - Self-transitions that still emit side effects (alarm)
//! - States that carry a previous state (broken turnstile)
//! - Observers on a shared, in-place machine
//! - Checkpointing the position as JSON
//!
//! Run with: cargo run --example turnstile

use cascade::graph::Outcome;
use cascade::{GraphBuilder, SharedStateMachine, Transition, Variant};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const FARE: u32 = 50;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
enum TurnstileTag {
    Locked,
    Unlocked,
    Broken,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
enum Turnstile {
    Locked { credit: u32 },
    Unlocked,
    Broken { old_state: Box<Turnstile> },
}

impl Variant for Turnstile {
    type Tag = TurnstileTag;

    fn tag(&self) -> TurnstileTag {
        match self {
            Self::Locked { .. } => TurnstileTag::Locked,
            Self::Unlocked => TurnstileTag::Unlocked,
            Self::Broken { .. } => TurnstileTag::Broken,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
enum EventTag {
    InsertCoin,
    AdmitPerson,
    MachineDidFail,
    MachineRepairDidComplete,
}

#[derive(Clone, PartialEq, Debug)]
enum Event {
    InsertCoin(u32),
    AdmitPerson,
    MachineDidFail,
    MachineRepairDidComplete,
}

impl Variant for Event {
    type Tag = EventTag;

    fn tag(&self) -> EventTag {
        match self {
            Self::InsertCoin(_) => EventTag::InsertCoin,
            Self::AdmitPerson => EventTag::AdmitPerson,
            Self::MachineDidFail => EventTag::MachineDidFail,
            Self::MachineRepairDidComplete => EventTag::MachineRepairDidComplete,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Command {
    SoundAlarm,
    CloseDoors,
    OpenDoors,
    OrderRepair,
}

// Pure rule: coins accumulate until the fare is reached
fn insert_coin(state: &Turnstile, event: &Event) -> Outcome<Turnstile, Command> {
    match (state, event) {
        (Turnstile::Locked { credit }, Event::InsertCoin(value)) if credit + value >= FARE => {
            Outcome::transition_to(Turnstile::Unlocked).emit(Command::OpenDoors)
        }
        (Turnstile::Locked { credit }, Event::InsertCoin(value)) => {
            Outcome::transition_to(Turnstile::Locked {
                credit: credit + value,
            })
        }
        _ => Outcome::dont_transition(),
    }
}

fn main() {
    println!("=== Turnstile State Machine ===\n");

    let machine = SharedStateMachine::create(
        GraphBuilder::new()
            .initial_state(Turnstile::Locked { credit: 0 })
            .state(TurnstileTag::Locked, |s| {
                s.on_event(EventTag::InsertCoin, insert_coin)
                    .on_event(EventTag::AdmitPerson, |_, _| {
                        Outcome::dont_transition().emit(Command::SoundAlarm)
                    })
                    .on_event(EventTag::MachineDidFail, |state, _| {
                        Outcome::transition_to(Turnstile::Broken {
                            old_state: Box::new(state.clone()),
                        })
                        .emit(Command::OrderRepair)
                    })
            })
            .state(TurnstileTag::Unlocked, |s| {
                s.on_event(EventTag::AdmitPerson, |_, _| {
                    Outcome::transition_to(Turnstile::Locked { credit: 0 })
                        .emit(Command::CloseDoors)
                })
            })
            .state(TurnstileTag::Broken, |s| {
                s.on_event(EventTag::MachineRepairDidComplete, |state, _| match state {
                    Turnstile::Broken { old_state } => {
                        Outcome::transition_to((**old_state).clone())
                    }
                    _ => Outcome::dont_transition(),
                })
            }),
    )
    .unwrap();

    let printer = Arc::new(|transition: &Transition<Turnstile, Event, Command>| {
        match transition {
            Transition::Valid {
                from_state,
                event,
                to_state,
                side_effects,
            } => println!("  {from_state:?} --{event:?}--> {to_state:?} {side_effects:?}"),
            Transition::Invalid { from_state, event } => {
                println!("  {from_state:?} ignores {event:?}")
            }
        }
    });
    machine.start_observing(&printer);

    println!("Ride:");
    machine.transition(Event::InsertCoin(20)).unwrap();
    machine.transition(Event::AdmitPerson).unwrap();
    machine.transition(Event::InsertCoin(30)).unwrap();
    machine.transition(Event::InsertCoin(10)).unwrap();
    machine.transition(Event::AdmitPerson).unwrap();

    println!("\nFailure and repair:");
    machine.transition(Event::InsertCoin(15)).unwrap();
    machine.transition(Event::MachineDidFail).unwrap();
    machine.transition(Event::InsertCoin(10)).unwrap();

    let checkpoint = machine.checkpoint().to_json().unwrap();
    println!("\nCheckpoint: {checkpoint}\n");

    machine.transition(Event::MachineRepairDidComplete).unwrap();
    println!("\nFinal state: {:?}", machine.state());

    println!("\n=== Example Complete ===");
}
