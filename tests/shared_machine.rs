//! In-place machine: observers, recursion detection and concurrent use.

mod common;

use cascade::machine::TransitionObserver;
use cascade::{SharedStateMachine, Transition, TransitionError};
use common::{player, turnstile, Button, Command, Player, Turnstile, TurnstileEvent};
use parking_lot::Mutex;
use std::sync::{mpsc, Arc, Weak};
use std::thread;
use std::time::Duration;

type Gate = SharedStateMachine<Turnstile, TurnstileEvent, Command>;
type GateTransition = Transition<Turnstile, TurnstileEvent, Command>;

/// Counts the doors opened by the machines it observes.
#[derive(Default)]
struct DoorAudit {
    openings: Mutex<u32>,
}

impl TransitionObserver<Turnstile, TurnstileEvent, Command> for DoorAudit {
    fn on_transition(&self, transition: &GateTransition) {
        if transition.side_effects().contains(&Command::OpenDoors) {
            *self.openings.lock() += 1;
        }
    }
}

#[test]
fn observer_sees_transitions_while_alive() {
    let gate = Gate::create(turnstile()).unwrap();
    let audit = Arc::new(DoorAudit::default());
    gate.start_observing(&audit);

    gate.transition(TurnstileEvent::InsertCoin(50)).unwrap();
    gate.transition(TurnstileEvent::AdmitPerson).unwrap();
    gate.transition(TurnstileEvent::InsertCoin(60)).unwrap();

    assert_eq!(*audit.openings.lock(), 2);
    assert_eq!(gate.observer_count(), 1);

    drop(audit);
    gate.transition(TurnstileEvent::AdmitPerson).unwrap();

    assert_eq!(gate.observer_count(), 0);
}

#[test]
fn observers_notified_in_registration_order() {
    let gate = Gate::create(turnstile()).unwrap();
    let order = Arc::new(Mutex::new(Vec::new()));

    let first_log = Arc::clone(&order);
    let first = Arc::new(move |_: &GateTransition| first_log.lock().push(1));
    let second_log = Arc::clone(&order);
    let second = Arc::new(move |_: &GateTransition| second_log.lock().push(2));
    gate.start_observing(&first);
    gate.start_observing(&second);

    gate.transition(TurnstileEvent::InsertCoin(5)).unwrap();
    gate.transition(TurnstileEvent::MachineRepairDidComplete).unwrap();

    assert_eq!(*order.lock(), vec![1, 2, 1, 2]);
}

#[test]
fn recursion_from_enter_listener_is_rejected() {
    let handle: Arc<Mutex<Weak<SharedStateMachine<Player, Button, String>>>> =
        Arc::new(Mutex::new(Weak::new()));
    let nested = Arc::new(Mutex::new(Vec::new()));

    let machine_slot = Arc::clone(&handle);
    let results = Arc::clone(&nested);
    let builder = player().state(common::PlayerTag::Off, move |s| {
        s.on_enter(move |_, _| {
            if let Some(machine) = machine_slot.lock().upgrade() {
                results.lock().push(machine.transition(Button::PowerOn));
            }
            vec!["reentry attempted".to_string()]
        })
    });
    let machine = Arc::new(SharedStateMachine::create(builder).unwrap());
    *handle.lock() = Arc::downgrade(&machine);

    machine.transition(Button::PowerOn).unwrap();
    let transition = machine.transition(Button::PowerOff).unwrap();

    assert_eq!(*nested.lock(), vec![Err(TransitionError::Recursion)]);
    assert_eq!(machine.state(), Player::Off);
    assert!(transition
        .side_effects()
        .contains(&"reentry attempted".to_string()));
}

#[test]
fn recursion_from_global_listener_is_rejected() {
    let handle: Arc<Mutex<Weak<Gate>>> = Arc::new(Mutex::new(Weak::new()));
    let nested = Arc::new(Mutex::new(Vec::new()));

    let machine_slot = Arc::clone(&handle);
    let results = Arc::clone(&nested);
    let gate = Arc::new(
        Gate::create(turnstile().on_transition(move |_| {
            if let Some(gate) = machine_slot.lock().upgrade() {
                results
                    .lock()
                    .push(gate.transition(TurnstileEvent::AdmitPerson));
            }
        }))
        .unwrap(),
    );
    *handle.lock() = Arc::downgrade(&gate);

    let outer = gate.transition(TurnstileEvent::InsertCoin(50));

    assert!(outer.is_ok());
    assert_eq!(*nested.lock(), vec![Err(TransitionError::Recursion)]);
    assert_eq!(gate.state(), Turnstile::Unlocked);
}

#[test]
fn listener_can_hand_off_transition_to_another_thread() {
    let handle: Arc<Mutex<Weak<Gate>>> = Arc::new(Mutex::new(Weak::new()));
    let handed_off = Arc::new(Mutex::new(None));

    let machine_slot = Arc::clone(&handle);
    let outcome = Arc::clone(&handed_off);
    let gate = Arc::new(
        Gate::create(turnstile().on_transition(move |transition| {
            if transition.event() != &TurnstileEvent::InsertCoin(50) {
                return;
            }
            let Some(gate) = machine_slot.lock().upgrade() else {
                return;
            };
            let (sender, receiver) = mpsc::channel();
            thread::spawn(move || {
                let _ = sender.send(gate.transition(TurnstileEvent::AdmitPerson));
            });
            let received = receiver.recv_timeout(Duration::from_secs(5));
            *outcome.lock() = Some(received);
        }))
        .unwrap(),
    );
    *handle.lock() = Arc::downgrade(&gate);

    gate.transition(TurnstileEvent::InsertCoin(50)).unwrap();

    let worker = handed_off.lock().take().expect("listener ran");
    let transition = worker.expect("worker finished while listener waited").unwrap();
    assert_eq!(transition.side_effects(), &[Command::CloseDoors]);
    assert_eq!(gate.state(), Turnstile::Locked { credit: 0 });
}

#[test]
fn concurrent_coins_are_all_counted() {
    let gate = Arc::new(Gate::create(turnstile()).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let gate = Arc::clone(&gate);
            thread::spawn(move || {
                for _ in 0..10 {
                    gate.transition(TurnstileEvent::InsertCoin(1)).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(gate.state(), Turnstile::Locked { credit: 40 });
}

#[test]
fn with_starts_fresh_machine_without_observers() {
    let gate = Gate::create(turnstile()).unwrap();
    let audit = Arc::new(DoorAudit::default());
    gate.start_observing(&audit);

    let derived = gate
        .with(cascade::Overrides::new().initial_state(Turnstile::Locked { credit: 45 }))
        .unwrap();
    derived.transition(TurnstileEvent::InsertCoin(5)).unwrap();

    assert_eq!(derived.state(), Turnstile::Unlocked);
    assert_eq!(derived.observer_count(), 0);
    assert_eq!(gate.state(), Turnstile::Locked { credit: 0 });
    assert_eq!(*audit.openings.lock(), 0);
}
