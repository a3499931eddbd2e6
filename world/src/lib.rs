#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game state management for Follow the Leader.
//!
//! The [`World`] is the single `GameState` value of a session. It is mutated
//! exclusively through [`apply`], which validates each [`Command`] against the
//! current phase, generation and board geometry before touching anything.
//! Requests that fail validation are dropped without emitting events.

mod trail;

use follow_leader_core::{
    Board, CellIndex, Command, Difficulty, Event, Generation, MoveVerdict, Phase,
};
use log::{debug, info};

use self::trail::Trail;

/// Represents the authoritative Follow the Leader game state.
#[derive(Debug)]
pub struct World {
    phase: Phase,
    difficulty: Option<Difficulty>,
    leader: CellIndex,
    player: CellIndex,
    trail: Trail,
    score: u32,
    generation: Generation,
}

impl World {
    /// Creates a world showing the intro with no session running.
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: Phase::Intro,
            difficulty: None,
            leader: CellIndex::ORIGIN,
            player: CellIndex::ORIGIN,
            trail: Trail::default(),
            score: 0,
            generation: Generation::default(),
        }
    }

    fn board(&self) -> Option<Board> {
        self.difficulty.as_ref().map(Difficulty::board)
    }

    fn is_stale(&self, generation: Generation, command: &str) -> bool {
        if generation == self.generation {
            return false;
        }
        debug!(
            "dropping stale {command}: scheduled under generation {}, current is {}",
            generation.get(),
            self.generation.get()
        );
        true
    }

    fn start_session(&mut self, difficulty: Difficulty, out_events: &mut Vec<Event>) {
        self.generation = self.generation.next();
        info!(
            "session started on {} ({}x{} board, {:.0} ms turns)",
            difficulty.name(),
            difficulty.side_length(),
            difficulty.side_length(),
            difficulty.base_turn_duration_ms()
        );
        self.phase = Phase::Intro;
        self.leader = CellIndex::ORIGIN;
        self.player = CellIndex::ORIGIN;
        self.trail.clear();
        self.score = 0;
        self.difficulty = Some(difficulty.clone());
        out_events.push(Event::SessionStarted {
            difficulty,
            generation: self.generation,
        });
        out_events.push(Event::ScoreChanged { score: 0 });
    }

    fn reset_session(&mut self, out_events: &mut Vec<Event>) {
        self.generation = self.generation.next();
        info!("session reset after scoring {}", self.score);
        self.phase = Phase::Intro;
        self.difficulty = None;
        self.leader = CellIndex::ORIGIN;
        self.player = CellIndex::ORIGIN;
        self.trail.clear();
        self.score = 0;
        out_events.push(Event::SessionReset);
    }

    fn start_round(&mut self, out_events: &mut Vec<Event>) {
        let Some(difficulty) = self.difficulty.as_ref() else {
            debug!("ignoring round start without an active session");
            return;
        };
        if !matches!(self.phase, Phase::Intro | Phase::Won) {
            debug!("ignoring round start during {:?}", self.phase);
            return;
        }

        let board = difficulty.board();
        let turn_duration = difficulty.turn_duration();
        self.generation = self.generation.next();
        self.leader = CellIndex::ORIGIN;
        self.player = CellIndex::ORIGIN;
        self.trail.restart(board);
        self.phase = Phase::LeaderTurn;
        info!(
            "round started (generation {}, score {})",
            self.generation.get(),
            self.score
        );
        out_events.push(Event::RoundStarted {
            generation: self.generation,
            board,
            turn_duration,
        });
    }

    fn advance_leader(&mut self, to: CellIndex, out_events: &mut Vec<Event>) {
        let Some(board) = self.board() else {
            return;
        };
        if self.phase != Phase::LeaderTurn || self.leader == board.final_cell() {
            debug!("ignoring leader step to {} during {:?}", to.get(), self.phase);
            return;
        }

        let from = self.leader;
        let forward =
            board.neighbor_right(from) == Some(to) || board.neighbor_down(from) == Some(to);
        if !forward || !self.trail.push(to) {
            debug!(
                "rejecting leader step {} -> {}: not a right or down neighbour",
                from.get(),
                to.get()
            );
            return;
        }

        self.leader = to;
        out_events.push(Event::LeaderAdvanced {
            generation: self.generation,
            from,
            to,
        });
        if to == board.final_cell() {
            out_events.push(Event::LeaderFinished {
                generation: self.generation,
            });
        }
    }

    fn begin_player_turn(&mut self, out_events: &mut Vec<Event>) {
        let Some(board) = self.board() else {
            return;
        };
        if self.phase != Phase::LeaderTurn || self.leader != board.final_cell() {
            debug!("ignoring player turn hand-off during {:?}", self.phase);
            return;
        }
        self.phase = Phase::PlayerTurn;
        self.player = CellIndex::ORIGIN;
        out_events.push(Event::PlayerTurnStarted {
            generation: self.generation,
        });
    }

    fn move_player(&mut self, to: CellIndex, verdict: MoveVerdict, out_events: &mut Vec<Event>) {
        let Some(board) = self.board() else {
            return;
        };
        if self.phase != Phase::PlayerTurn {
            debug!("ignoring player move during {:?}", self.phase);
            return;
        }

        let from = self.player;
        if board.direction_between(from, to).is_none() {
            debug!(
                "ignoring player move {} -> {}: cells are not adjacent",
                from.get(),
                to.get()
            );
            return;
        }

        let reached_goal = to == board.final_cell();
        let consistent = match &verdict {
            MoveVerdict::ReachedGoal { .. } => reached_goal,
            MoveVerdict::OnTrail => !reached_goal && self.trail.contains(to),
            MoveVerdict::OffTrail => !reached_goal && !self.trail.contains(to),
        };
        if !consistent {
            debug!(
                "rejecting player move to {}: verdict {verdict:?} disagrees with trail",
                to.get()
            );
            return;
        }

        self.player = to;
        out_events.push(Event::PlayerMoved { from, to });

        match verdict {
            MoveVerdict::OnTrail => {}
            MoveVerdict::ReachedGoal { message } => {
                let Some(difficulty) = self.difficulty.as_mut() else {
                    return;
                };
                difficulty.decay_speed();
                let turn_duration = difficulty.turn_duration();
                self.score = self.score.saturating_add(1);
                self.phase = Phase::Won;
                info!("round won, score is now {}", self.score);
                out_events.push(Event::ScoreChanged { score: self.score });
                out_events.push(Event::RoundWon {
                    generation: self.generation,
                    message,
                    score: self.score,
                    turn_duration,
                });
            }
            MoveVerdict::OffTrail => {
                self.phase = Phase::Lost;
                info!(
                    "player left the trail at cell {}, final score {}",
                    to.get(),
                    self.score
                );
                out_events.push(Event::RoundLost {
                    final_score: self.score,
                });
            }
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::StartSession { difficulty } => world.start_session(difficulty, out_events),
        Command::ResetSession => world.reset_session(out_events),
        Command::StartRound { generation } => {
            if !world.is_stale(generation, "round start") {
                world.start_round(out_events);
            }
        }
        Command::Tick { dt } => out_events.push(Event::TimeAdvanced { dt }),
        Command::TickLeader { generation } => {
            if world.is_stale(generation, "leader tick") {
                return;
            }
            if world.phase != Phase::LeaderTurn {
                debug!("ignoring leader tick during {:?}", world.phase);
                return;
            }
            out_events.push(Event::LeaderTurnTicked {
                generation,
                position: world.leader,
            });
        }
        Command::AdvanceLeader { generation, to } => {
            if !world.is_stale(generation, "leader step") {
                world.advance_leader(to, out_events);
            }
        }
        Command::BeginPlayerTurn { generation } => {
            if !world.is_stale(generation, "player turn hand-off") {
                world.begin_player_turn(out_events);
            }
        }
        Command::MovePlayer { to, verdict } => world.move_player(to, verdict, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use follow_leader_core::{Board, CellIndex, Difficulty, Generation, Phase};

    use super::World;

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(world: &World) -> Phase {
        world.phase
    }

    /// Number of rounds won in the running session.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.score
    }

    /// Generation timers must carry to be accepted right now.
    #[must_use]
    pub fn generation(world: &World) -> Generation {
        world.generation
    }

    /// Session-local difficulty, including any speed decay from won rounds.
    #[must_use]
    pub fn active_difficulty(world: &World) -> Option<&Difficulty> {
        world.difficulty.as_ref()
    }

    /// Board of the running session, if any.
    #[must_use]
    pub fn board(world: &World) -> Option<Board> {
        world.board()
    }

    /// Cell the leader currently occupies.
    #[must_use]
    pub fn leader_position(world: &World) -> CellIndex {
        world.leader
    }

    /// Cell the player currently occupies.
    #[must_use]
    pub fn player_position(world: &World) -> CellIndex {
        world.player
    }

    /// Exposes a read-only view of the leader's trail.
    #[must_use]
    pub fn trail_view(world: &World) -> TrailView<'_> {
        TrailView {
            cells: world.trail.cells(),
            membership: world.trail.membership(),
        }
    }

    /// Read-only view of the cells the leader visited this round.
    #[derive(Clone, Copy, Debug)]
    pub struct TrailView<'a> {
        cells: &'a [CellIndex],
        membership: &'a [bool],
    }

    impl<'a> TrailView<'a> {
        /// Reports whether the leader visited the cell this round.
        #[must_use]
        pub fn contains(&self, cell: CellIndex) -> bool {
            usize::try_from(cell.get())
                .ok()
                .and_then(|index| self.membership.get(index).copied())
                .unwrap_or(false)
        }

        /// Visited cells in the order the leader entered them.
        #[must_use]
        pub fn cells(&self) -> &'a [CellIndex] {
            self.cells
        }

        /// Number of visited cells.
        #[must_use]
        pub fn len(&self) -> usize {
            self.cells.len()
        }

        /// Reports whether the trail has no cells, which only happens outside a round.
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.cells.is_empty()
        }
    }
}
