//! Graphs shared by the integration tests.

#![allow(dead_code)]

use cascade::graph::Outcome;
use cascade::{GraphBuilder, Variant};
use serde::{Deserialize, Serialize};

pub const FARE: u32 = 50;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum TurnstileTag {
    Locked,
    Unlocked,
    Broken,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub enum Turnstile {
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
pub enum TurnstileEventTag {
    InsertCoin,
    AdmitPerson,
    MachineDidFail,
    MachineRepairDidComplete,
}

#[derive(Clone, PartialEq, Debug)]
pub enum TurnstileEvent {
    InsertCoin(u32),
    AdmitPerson,
    MachineDidFail,
    MachineRepairDidComplete,
}

impl Variant for TurnstileEvent {
    type Tag = TurnstileEventTag;

    fn tag(&self) -> TurnstileEventTag {
        match self {
            Self::InsertCoin(_) => TurnstileEventTag::InsertCoin,
            Self::AdmitPerson => TurnstileEventTag::AdmitPerson,
            Self::MachineDidFail => TurnstileEventTag::MachineDidFail,
            Self::MachineRepairDidComplete => TurnstileEventTag::MachineRepairDidComplete,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    SoundAlarm,
    CloseDoors,
    OpenDoors,
    OrderRepair,
}

pub fn turnstile() -> GraphBuilder<Turnstile, TurnstileEvent, Command> {
    GraphBuilder::new()
        .initial_state(Turnstile::Locked { credit: 0 })
        .state(TurnstileTag::Locked, |s| {
            s.on_event(TurnstileEventTag::InsertCoin, |state, event| {
                match (state, event) {
                    (Turnstile::Locked { credit }, TurnstileEvent::InsertCoin(value))
                        if credit + value >= FARE =>
                    {
                        Outcome::transition_to(Turnstile::Unlocked).emit(Command::OpenDoors)
                    }
                    (Turnstile::Locked { credit }, TurnstileEvent::InsertCoin(value)) => {
                        Outcome::transition_to(Turnstile::Locked {
                            credit: credit + value,
                        })
                    }
                    _ => Outcome::dont_transition(),
                }
            })
            .on_event(TurnstileEventTag::AdmitPerson, |_, _| {
                Outcome::dont_transition().emit(Command::SoundAlarm)
            })
            .on_event(TurnstileEventTag::MachineDidFail, |state, _| {
                Outcome::transition_to(Turnstile::Broken {
                    old_state: Box::new(state.clone()),
                })
                .emit(Command::OrderRepair)
            })
        })
        .state(TurnstileTag::Unlocked, |s| {
            s.on_event(TurnstileEventTag::AdmitPerson, |_, _| {
                Outcome::transition_to(Turnstile::Locked { credit: 0 }).emit(Command::CloseDoors)
            })
        })
        .state(TurnstileTag::Broken, |s| {
            s.on_event(
                TurnstileEventTag::MachineRepairDidComplete,
                |state, _| match state {
                    Turnstile::Broken { old_state } => Outcome::transition_to((**old_state).clone()),
                    _ => Outcome::dont_transition(),
                },
            )
        })
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum PlayerTag {
    Powered,
    Playback,
    Stopped,
    Playing,
    Paused,
    Off,
}

/// A media player: `Powered` contains `Stopped` and the `Playback` group,
/// which contains `Playing` and `Paused`.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub enum Player {
    Stopped,
    Playing { track: u8 },
    Paused { track: u8 },
    Off,
}

impl Variant for Player {
    type Tag = PlayerTag;

    fn tag(&self) -> PlayerTag {
        match self {
            Self::Stopped => PlayerTag::Stopped,
            Self::Playing { .. } => PlayerTag::Playing,
            Self::Paused { .. } => PlayerTag::Paused,
            Self::Off => PlayerTag::Off,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum ButtonTag {
    PowerOn,
    PowerOff,
    Play,
    Pause,
    Resume,
    Next,
}

#[derive(Clone, PartialEq, Debug)]
pub enum Button {
    PowerOn,
    PowerOff,
    Play,
    Pause,
    Resume,
    Next,
}

impl Variant for Button {
    type Tag = ButtonTag;

    fn tag(&self) -> ButtonTag {
        match self {
            Self::PowerOn => ButtonTag::PowerOn,
            Self::PowerOff => ButtonTag::PowerOff,
            Self::Play => ButtonTag::Play,
            Self::Pause => ButtonTag::Pause,
            Self::Resume => ButtonTag::Resume,
            Self::Next => ButtonTag::Next,
        }
    }
}

fn track_of(state: &Player) -> u8 {
    match state {
        Player::Playing { track } | Player::Paused { track } => *track,
        _ => 1,
    }
}

fn log(label: &'static str) -> impl Fn(&Player, &Button) -> Vec<String> + Send + Sync {
    move |_, _| vec![label.to_string()]
}

pub fn player() -> GraphBuilder<Player, Button, String> {
    GraphBuilder::new()
        .initial_state(Player::Off)
        .group(PlayerTag::Powered, |g| {
            g.default_state(|| Player::Stopped)
                .on_event(ButtonTag::PowerOff, |_, _| Outcome::transition_to(Player::Off))
                .on_event(ButtonTag::Next, |_, _| {
                    Outcome::dont_transition().emit("nothing to skip".to_string())
                })
                .on_enter(log("enter:powered"))
                .on_exit(log("exit:powered"))
        })
        .group(PlayerTag::Playback, |g| {
            g.child_of(PlayerTag::Powered)
                .default_state(|| Player::Playing { track: 1 })
                .on_enter(log("enter:playback"))
                .on_exit(log("exit:playback"))
        })
        .state(PlayerTag::Stopped, |s| {
            s.child_of(PlayerTag::Powered)
                .on_event(ButtonTag::Play, |_, _| {
                    Outcome::transition_to_group(PlayerTag::Playback)
                })
                .on_enter(log("enter:stopped"))
                .on_exit(log("exit:stopped"))
        })
        .state(PlayerTag::Playing, |s| {
            s.child_of(PlayerTag::Playback)
                .on_event(ButtonTag::Pause, |state, _| {
                    Outcome::transition_to(Player::Paused {
                        track: track_of(state),
                    })
                })
                .on_event(ButtonTag::Next, |state, _| {
                    Outcome::transition_to(Player::Playing {
                        track: track_of(state) + 1,
                    })
                })
                .on_enter(log("enter:playing"))
                .on_exit(log("exit:playing"))
        })
        .state(PlayerTag::Paused, |s| {
            s.child_of(PlayerTag::Playback)
                .on_event(ButtonTag::Resume, |state, _| {
                    Outcome::transition_to(Player::Playing {
                        track: track_of(state),
                    })
                })
                .on_enter(log("enter:paused"))
                .on_exit(log("exit:paused"))
        })
        .state(PlayerTag::Off, |s| {
            s.on_event(ButtonTag::PowerOn, |_, _| {
                Outcome::transition_to_group(PlayerTag::Powered)
            })
            .on_enter(log("enter:off"))
            .on_exit(log("exit:off"))
        })
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}
