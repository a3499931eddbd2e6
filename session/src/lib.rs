#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Round controller that owns a Follow the Leader session.
//!
//! The [`RoundController`] holds the only [`World`] and the systems that react
//! to it. Every external input becomes a [`Command`]; the controller applies it,
//! forwards the resulting events to the presentation and the systems, and keeps
//! pumping until no system has anything left to say.

use std::time::Duration;

use follow_leader_core::{
    CellIndex, Command, DifficultyCatalog, Event, MoveRequest, Phase, LEADER_PROMPT,
};
use follow_leader_rendering::{Frame, InputMode, Presentation};
use follow_leader_system_leader_pathing::{LeaderPathing, RandomChooser, StepChooser};
use follow_leader_system_move_validator::{clickable_targets, MoveValidator};
use follow_leader_system_turn_scheduler::TurnScheduler;
use follow_leader_world::{self as world, query, World};
use log::{info, warn};
use thiserror::Error;

/// Errors raised at the session boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// The requested difficulty is not in the catalog.
    #[error("unknown difficulty `{name}`")]
    UnknownDifficulty {
        /// Name that failed to match a catalog entry.
        name: String,
    },
}

/// Drives rounds for a single player and reports them to a [`Presentation`].
#[derive(Debug)]
pub struct RoundController<P, C = RandomChooser> {
    world: World,
    catalog: DifficultyCatalog,
    scheduler: TurnScheduler,
    pathing: LeaderPathing<C>,
    validator: MoveValidator,
    presentation: P,
    input_mode: InputMode,
}

impl<P: Presentation> RoundController<P, RandomChooser> {
    /// Creates a controller whose random decisions come from OS entropy.
    #[must_use]
    pub fn new(catalog: DifficultyCatalog, presentation: P) -> Self {
        Self::with_components(
            catalog,
            presentation,
            RandomChooser::from_entropy(),
            MoveValidator::from_entropy(),
        )
    }

    /// Creates a controller whose random decisions replay identically for `seed`.
    #[must_use]
    pub fn seeded(catalog: DifficultyCatalog, presentation: P, seed: u64) -> Self {
        Self::with_components(
            catalog,
            presentation,
            RandomChooser::seeded(seed),
            MoveValidator::seeded(seed.rotate_left(32)),
        )
    }
}

impl<P: Presentation, C: StepChooser> RoundController<P, C> {
    /// Creates a controller from explicit pathing and validation components.
    #[must_use]
    pub fn with_components(
        catalog: DifficultyCatalog,
        presentation: P,
        chooser: C,
        validator: MoveValidator,
    ) -> Self {
        let input_mode = InputMode::from_narrow(presentation.viewport_is_narrow());
        Self {
            world: World::new(),
            catalog,
            scheduler: TurnScheduler::new(),
            pathing: LeaderPathing::new(chooser),
            validator,
            presentation,
            input_mode,
        }
    }

    /// Starts a fresh session at zero score and begins its first round.
    ///
    /// Any running session is discarded. Unknown names leave the controller
    /// untouched.
    pub fn select_difficulty(&mut self, name: &str) -> Result<(), SessionError> {
        let Some(difficulty) = self.catalog.find(name).cloned() else {
            warn!("difficulty `{name}` is not in the catalog");
            return Err(SessionError::UnknownDifficulty {
                name: name.to_owned(),
            });
        };

        self.submit(Command::StartSession { difficulty });
        let generation = query::generation(&self.world);
        self.submit(Command::StartRound { generation });
        Ok(())
    }

    /// Discards the session and returns to the intro.
    pub fn reset_session(&mut self) {
        self.scheduler.cancel();
        self.submit(Command::ResetSession);
    }

    /// Advances simulated time, firing any turn timers that fall due.
    pub fn advance(&mut self, dt: Duration) {
        self.submit(Command::Tick { dt });
    }

    /// Forwards a player move request to the move validator.
    pub fn move_requested(&mut self, request: MoveRequest) {
        let Some(board) = query::board(&self.world) else {
            return;
        };
        let mut commands = Vec::new();
        self.validator.handle(
            request,
            query::phase(&self.world),
            board,
            query::player_position(&self.world),
            &query::trail_view(&self.world),
            &mut commands,
        );
        for command in commands {
            self.submit(command);
        }
    }

    /// Input mode sampled at the most recent round start.
    #[must_use]
    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    /// Cells a pointer user may tap right now; empty outside the player turn.
    #[must_use]
    pub fn clickable_targets(&self) -> Vec<CellIndex> {
        match query::board(&self.world) {
            Some(board) if query::phase(&self.world) == Phase::PlayerTurn => {
                clickable_targets(board, query::player_position(&self.world))
            }
            _ => Vec::new(),
        }
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        query::phase(&self.world)
    }

    /// Rounds won in the running session.
    #[must_use]
    pub fn score(&self) -> u32 {
        query::score(&self.world)
    }

    /// Read-only access to the authoritative state.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Difficulties the player may choose from.
    #[must_use]
    pub fn catalog(&self) -> &DifficultyCatalog {
        &self.catalog
    }

    /// Presentation the controller reports to.
    #[must_use]
    pub fn presentation(&self) -> &P {
        &self.presentation
    }

    /// Mutable access to the presentation, e.g. to change the viewport.
    pub fn presentation_mut(&mut self) -> &mut P {
        &mut self.presentation
    }

    /// Consumes the controller and returns its presentation.
    #[must_use]
    pub fn into_presentation(self) -> P {
        self.presentation
    }

    fn submit(&mut self, command: Command) {
        let mut pending = vec![command];
        while !pending.is_empty() {
            let mut events = Vec::new();
            for command in pending.drain(..) {
                world::apply(&mut self.world, command, &mut events);
            }
            if events.is_empty() {
                break;
            }

            self.present(&events);
            self.scheduler.handle(&events, &mut pending);
            if let Some(board) = query::board(&self.world) {
                self.pathing.handle(&events, board, &mut pending);
            }
        }
    }

    fn present(&mut self, events: &[Event]) {
        let mutated = events
            .iter()
            .any(|event| !matches!(event, Event::TimeAdvanced { .. }));
        if mutated {
            let frame = Frame::capture(
                query::phase(&self.world),
                query::board(&self.world),
                query::leader_position(&self.world),
                query::player_position(&self.world),
                query::trail_view(&self.world).cells(),
            );
            self.presentation.render(&frame);
        }

        for event in events {
            match event {
                Event::RoundStarted { .. } => {
                    self.input_mode = InputMode::from_narrow(self.presentation.viewport_is_narrow());
                    self.presentation.on_input_mode(self.input_mode);
                    self.presentation.on_prompt(LEADER_PROMPT);
                }
                Event::ScoreChanged { score } => self.presentation.on_score_changed(*score),
                Event::RoundWon { message, score, .. } => {
                    self.presentation.on_round_won(message, *score);
                }
                Event::RoundLost { final_score } => {
                    info!("session over with {final_score} rounds won");
                    self.presentation.on_round_lost(*final_score);
                }
                _ => {}
            }
        }
    }
}
