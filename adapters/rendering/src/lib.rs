#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared presentation contracts for Follow the Leader adapters.

use follow_leader_core::{Board, CellIndex, Phase};

/// Viewport width, in pixels, below which pointer input is used.
pub const NARROW_VIEWPORT_WIDTH: u32 = 992;

/// How the player is expected to submit moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputMode {
    /// Arrow keys step the player one cell at a time.
    Keyboard,
    /// The player taps one of the highlighted neighbouring cells.
    Pointer,
}

impl InputMode {
    /// Picks the input mode for a viewport of the provided width.
    #[must_use]
    pub const fn for_viewport_width(width: u32) -> Self {
        if width < NARROW_VIEWPORT_WIDTH {
            Self::Pointer
        } else {
            Self::Keyboard
        }
    }

    /// Picks the input mode from a narrow/wide flag.
    #[must_use]
    pub const fn from_narrow(narrow: bool) -> Self {
        if narrow {
            Self::Pointer
        } else {
            Self::Keyboard
        }
    }

    /// Instruction line shown on the intro screen for this mode.
    #[must_use]
    pub const fn instructions(self) -> &'static str {
        match self {
            Self::Keyboard => {
                "Watch the leader, then retrace the path with the arrow keys. \
                 Step off the trail and the game is over."
            }
            Self::Pointer => {
                "Watch the leader, then retrace the path by tapping the highlighted squares. \
                 Step off the trail and the game is over."
            }
        }
    }
}

/// Snapshot of everything a presentation needs to draw the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Lifecycle phase the frame was captured in.
    pub phase: Phase,
    /// Board being played, absent outside a session.
    pub board: Option<Board>,
    /// Leader marker, shown only while the leader walks.
    pub leader: Option<CellIndex>,
    /// Player marker, shown once the leader has finished.
    pub player: Option<CellIndex>,
    /// Cells visited by the leader in the order they were entered.
    pub trail: Vec<CellIndex>,
}

impl Frame {
    /// Builds a frame, deciding which character is visible from `phase`.
    #[must_use]
    pub fn capture(
        phase: Phase,
        board: Option<Board>,
        leader: CellIndex,
        player: CellIndex,
        trail: &[CellIndex],
    ) -> Self {
        let (leader, player) = match phase {
            Phase::Intro => (None, None),
            Phase::LeaderTurn => (Some(leader), None),
            Phase::PlayerTurn | Phase::Won | Phase::Lost => (None, Some(player)),
        };
        Self {
            phase,
            board,
            leader,
            player,
            trail: trail.to_vec(),
        }
    }

    /// Renders the board as text rows.
    ///
    /// `L` marks the leader, `P` the player, `*` the trail and `.` any other
    /// cell. The trail is hidden during the player turn so the player has to
    /// rely on memory.
    #[must_use]
    pub fn text_rows(&self) -> Vec<String> {
        let Some(board) = self.board else {
            return Vec::new();
        };
        let show_trail = matches!(self.phase, Phase::LeaderTurn | Phase::Won | Phase::Lost);
        let side = board.side_length();

        (0..side)
            .map(|row| {
                (0..side)
                    .map(|column| {
                        let cell = CellIndex::new(row * side + column);
                        if self.leader == Some(cell) {
                            'L'
                        } else if self.player == Some(cell) {
                            'P'
                        } else if show_trail && self.trail.contains(&cell) {
                            '*'
                        } else {
                            '.'
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

/// Collaborator that draws frames and surfaces round outcomes.
///
/// Only [`Presentation::render`] is required; the notification hooks default
/// to doing nothing so simple adapters can ignore them.
pub trait Presentation {
    /// Draws the latest frame. Called after every state mutation.
    fn render(&mut self, frame: &Frame);

    /// Reports whether the viewport is narrow. Sampled once per round start.
    fn viewport_is_narrow(&self) -> bool {
        false
    }

    /// Announces the input mode chosen for the round that is starting.
    fn on_input_mode(&mut self, _mode: InputMode) {}

    /// Shows the leader's line at the start of a leader turn.
    fn on_prompt(&mut self, _message: &str) {}

    /// Shows the score after it changed.
    fn on_score_changed(&mut self, _score: u32) {}

    /// Celebrates a won round.
    fn on_round_won(&mut self, _message: &str, _score: u32) {}

    /// Shows the game-over screen with the final score.
    fn on_round_lost(&mut self, _final_score: u32) {}
}
