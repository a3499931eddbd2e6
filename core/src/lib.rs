#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Follow the Leader engine.
//!
//! This crate defines the message surface that connects the round controller,
//! the authoritative world, and the pure systems. The controller and systems
//! submit [`Command`] values describing desired mutations, the world executes
//! those commands via its `apply` entry point, and then broadcasts [`Event`]
//! values for systems and presentation to react to. Systems consume event
//! streams, query immutable views, and respond exclusively with new command
//! batches.
//!
//! The [`Board`] predicates are the single source of truth for grid
//! legality; every component that moves a character goes through them.

mod board;
mod difficulty;

use std::time::Duration;

pub use board::Board;
pub use difficulty::{
    exact_side_length, CatalogError, Difficulty, DifficultyCatalog, DifficultyEntry,
    MIN_SIDE_LENGTH,
};

/// Line the leader announces at the start of every leader turn.
pub const LEADER_PROMPT: &str = "This way private. Follow me!";

/// Factor applied to the active turn duration each time a round is won.
pub const SPEED_DECAY_FACTOR: f64 = 0.95;

/// Pool of celebratory lines, one of which is chosen uniformly per win.
pub const CELEBRATION_MESSAGES: [&str; 5] = [
    "Well done soldier! Keep going!",
    "Another one, home safe",
    "Mission successful, good job!",
    "Good work private!",
    "Nicely done, let's keep moving!",
];

/// Lifecycle stage of the game state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No session is running; the difficulty picker is showing.
    Intro,
    /// The leader is walking the board and laying down the trail.
    LeaderTurn,
    /// The player is retracing the trail.
    PlayerTurn,
    /// The player reached the final cell; the next round is pending.
    Won,
    /// The player stepped off the trail. Terminal until the session resets.
    Lost,
}

/// Orthogonal movement directions on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Every direction in a stable order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

/// Row-major index of a single board cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellIndex(u32);

impl CellIndex {
    /// The top-left cell, where every round begins.
    pub const ORIGIN: CellIndex = CellIndex(0);

    /// Creates a new cell index with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the index.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Counter identifying the round or session a timer was scheduled under.
///
/// The world bumps the generation on every session start, session reset and
/// round start. Timer-driven commands carry the generation they were
/// scheduled under, and the world discards any whose generation is stale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Generation(u64);

impl Generation {
    /// Creates a generation from its raw counter value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Retrieves the raw counter value.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Returns the generation that supersedes this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Player input forwarded by the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveRequest {
    /// Keyboard-style request to step one cell in a direction.
    Step(Direction),
    /// Pointer-style request to step onto a specific neighbouring cell.
    Target(CellIndex),
}

/// Outcome of a legal player step, decided before the world applies it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveVerdict {
    /// The destination is on the trail and is not the final cell.
    OnTrail,
    /// The destination is the final cell; the round is won.
    ReachedGoal {
        /// Celebratory line picked for this win.
        message: String,
    },
    /// The destination is not on the trail; the session is lost.
    OffTrail,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Replaces any running session with a fresh one at zero score.
    StartSession {
        /// Catalog difficulty the session runs under. The world keeps its own copy.
        difficulty: Difficulty,
    },
    /// Discards all session state and returns to the intro phase.
    ResetSession,
    /// Resets positions and trail and hands the board to the leader.
    StartRound {
        /// Generation the request was issued under.
        generation: Generation,
    },
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Fires one leader turn tick.
    TickLeader {
        /// Generation the tick was scheduled under.
        generation: Generation,
    },
    /// Moves the leader onto the provided neighbouring cell.
    AdvanceLeader {
        /// Generation the step was planned under.
        generation: Generation,
        /// Destination cell; must be the right or down neighbour of the leader.
        to: CellIndex,
    },
    /// Ends the leader turn and enables player input.
    BeginPlayerTurn {
        /// Generation the hand-off was scheduled under.
        generation: Generation,
    },
    /// Moves the player onto the provided neighbouring cell.
    MovePlayer {
        /// Destination cell; must be an orthogonal neighbour of the player.
        to: CellIndex,
        /// Classification of the destination decided by the move validator.
        verdict: MoveVerdict,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces that a new session started at zero score.
    SessionStarted {
        /// Session-local copy of the selected difficulty.
        difficulty: Difficulty,
        /// Generation assigned to the new session.
        generation: Generation,
    },
    /// Announces that the session was discarded and the intro is showing.
    SessionReset,
    /// Announces that a round began and the leader is about to move.
    RoundStarted {
        /// Generation assigned to the round.
        generation: Generation,
        /// Board the round is played on.
        board: Board,
        /// Delay between consecutive turn ticks for this round.
        turn_duration: Duration,
    },
    /// Confirms that a leader turn tick fired for the current round.
    LeaderTurnTicked {
        /// Generation of the round the tick belongs to.
        generation: Generation,
        /// Cell the leader occupies when the tick fired.
        position: CellIndex,
    },
    /// Confirms that the leader moved and the trail grew by one cell.
    LeaderAdvanced {
        /// Generation of the round the step belongs to.
        generation: Generation,
        /// Cell the leader occupied before moving.
        from: CellIndex,
        /// Cell the leader occupies after moving.
        to: CellIndex,
    },
    /// Reports that the leader reached the final cell.
    LeaderFinished {
        /// Generation of the round that finished its leader turn.
        generation: Generation,
    },
    /// Reports that player input is now accepted.
    PlayerTurnStarted {
        /// Generation of the round the player turn belongs to.
        generation: Generation,
    },
    /// Confirms that the player moved between two cells.
    PlayerMoved {
        /// Cell the player occupied before moving.
        from: CellIndex,
        /// Cell the player occupies after moving.
        to: CellIndex,
    },
    /// Reports a new score value.
    ScoreChanged {
        /// Score after the change.
        score: u32,
    },
    /// Reports that the player reached the final cell.
    RoundWon {
        /// Generation of the round that was won.
        generation: Generation,
        /// Celebratory line chosen for the win.
        message: String,
        /// Score after the win was counted.
        score: u32,
        /// Decayed delay before the next round starts.
        turn_duration: Duration,
    },
    /// Reports that the player stepped off the trail.
    RoundLost {
        /// Score the session ended with.
        final_score: u32,
    },
}
