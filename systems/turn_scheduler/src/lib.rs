#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Timer-driven system that sequences leader turns, player turns and rounds.
//!
//! The scheduler holds at most one pending timer. Timers are armed in reaction
//! to world events and count down on `Event::TimeAdvanced`; when one expires
//! the scheduler emits the matching command tagged with the generation it was
//! armed under. A new timer is only armed after the previous one's effects are
//! observed, so leader ticks stay strictly sequential.

use std::time::Duration;

use follow_leader_core::{Command, Event, Generation};
use log::debug;

/// What happens when the pending timer expires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TurnKind {
    /// Fire the next leader turn tick.
    LeaderTick,
    /// Hand the board over to the player.
    PlayerTurn,
    /// Start the next round after a win.
    NextRound,
}

/// Timer waiting for simulated time to pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingTurn {
    /// Action performed when the timer expires.
    pub kind: TurnKind,
    /// Generation the timer was armed under.
    pub generation: Generation,
    /// Simulated time left before the timer expires.
    pub due_in: Duration,
}

/// Turn scheduler that converts elapsed time into turn commands.
#[derive(Debug, Default)]
pub struct TurnScheduler {
    pending: Option<PendingTurn>,
    generation: Option<Generation>,
    turn_duration: Duration,
    surplus: Duration,
    charged: Duration,
}

impl TurnScheduler {
    /// Creates an idle scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Timer currently waiting to expire, if any.
    #[must_use]
    pub fn pending(&self) -> Option<PendingTurn> {
        self.pending
    }

    /// Drops the pending timer and forgets the round it belonged to.
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            debug!(
                "cancelled pending {:?} from generation {}",
                pending.kind,
                pending.generation.get()
            );
        }
        self.generation = None;
        self.surplus = Duration::ZERO;
        self.charged = Duration::ZERO;
    }

    /// Consumes world events and emits a command when the pending timer expires.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::RoundStarted {
                    generation,
                    turn_duration,
                    ..
                } => {
                    self.cancel();
                    self.generation = Some(*generation);
                    self.turn_duration = *turn_duration;
                    self.arm(TurnKind::LeaderTick, *generation, Duration::ZERO);
                }
                Event::LeaderAdvanced { generation, .. } => {
                    self.arm(TurnKind::LeaderTick, *generation, self.turn_duration);
                }
                Event::LeaderFinished { generation } => {
                    self.arm(TurnKind::PlayerTurn, *generation, self.turn_duration);
                }
                Event::PlayerTurnStarted { .. } => {
                    self.pending = None;
                    self.surplus = Duration::ZERO;
                    self.charged = Duration::ZERO;
                }
                Event::RoundWon {
                    generation,
                    turn_duration,
                    ..
                } => {
                    self.turn_duration = *turn_duration;
                    self.arm(TurnKind::NextRound, *generation, *turn_duration);
                }
                Event::RoundLost { .. } | Event::SessionReset | Event::SessionStarted { .. } => {
                    self.cancel();
                }
                Event::TimeAdvanced { dt } => self.advance(*dt),
                _ => {}
            }
        }

        self.fire_due(out);
    }

    fn arm(&mut self, kind: TurnKind, generation: Generation, delay: Duration) {
        if self.generation != Some(generation) {
            debug!(
                "not arming {kind:?} for superseded generation {}",
                generation.get()
            );
            return;
        }

        // A replaced timer hands back the surplus it was credited with.
        if self.pending.take().is_some() {
            self.surplus = self.surplus.saturating_add(self.charged);
        }
        let due_in = delay.saturating_sub(self.surplus);
        self.charged = self.surplus.min(delay);
        self.surplus = self.surplus.saturating_sub(delay);
        self.pending = Some(PendingTurn {
            kind,
            generation,
            due_in,
        });
    }

    fn advance(&mut self, dt: Duration) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };
        if dt >= pending.due_in {
            self.surplus = self.surplus.saturating_add(dt - pending.due_in);
            pending.due_in = Duration::ZERO;
        } else {
            pending.due_in -= dt;
        }
    }

    fn fire_due(&mut self, out: &mut Vec<Command>) {
        let Some(pending) = self.pending else {
            return;
        };
        if !pending.due_in.is_zero() {
            return;
        }
        self.pending = None;
        self.charged = Duration::ZERO;
        if self.generation != Some(pending.generation) {
            debug!(
                "discarding expired {:?} from generation {}",
                pending.kind,
                pending.generation.get()
            );
            return;
        }

        let generation = pending.generation;
        out.push(match pending.kind {
            TurnKind::LeaderTick => Command::TickLeader { generation },
            TurnKind::PlayerTurn => Command::BeginPlayerTurn { generation },
            TurnKind::NextRound => Command::StartRound { generation },
        });
    }
}
