#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that walks the leader from the origin to the final cell.
//!
//! Every leader tick the system picks one step using a fixed bias policy:
//! the right edge forces a step down, the bottom row forces a step right, and
//! anywhere else a [`StepChooser`] decides. Each step increases the cell
//! index, and the forced rules never point off the board, so the walk always
//! reaches the final cell in at most `2 * (side - 1)` steps.

use follow_leader_core::{Board, CellIndex, Command, Direction, Event};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// One of the two directions the leader may take at a free-choice cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FreeStep {
    /// Continue along the current row.
    Right,
    /// Drop to the next row.
    Down,
}

impl FreeStep {
    /// Board direction matching the step.
    #[must_use]
    pub const fn direction(self) -> Direction {
        match self {
            Self::Right => Direction::Right,
            Self::Down => Direction::Down,
        }
    }
}

/// Source of the leader's decisions at free-choice cells.
pub trait StepChooser {
    /// Picks the next step for a leader standing on `from`.
    fn choose(&mut self, from: CellIndex) -> FreeStep;
}

/// Uniform 50/50 chooser backed by a seeded ChaCha generator.
#[derive(Clone, Debug)]
pub struct RandomChooser {
    rng: ChaCha8Rng,
}

impl RandomChooser {
    /// Creates a chooser whose decisions are fully determined by `seed`.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Creates a chooser seeded from operating system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl StepChooser for RandomChooser {
    fn choose(&mut self, _from: CellIndex) -> FreeStep {
        if self.rng.gen_bool(0.5) {
            FreeStep::Right
        } else {
            FreeStep::Down
        }
    }
}

/// Chooser that always answers with the same step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedChooser(pub FreeStep);

impl StepChooser for FixedChooser {
    fn choose(&mut self, _from: CellIndex) -> FreeStep {
        self.0
    }
}

/// Returns the step the boundary rules force on `position`, if any.
///
/// The right edge wins over the bottom row, so the final cell itself maps to
/// [`FreeStep::Down`]; callers check for completion first.
#[must_use]
pub fn forced_step(board: Board, position: CellIndex) -> Option<FreeStep> {
    if board.is_right_edge(position) {
        Some(FreeStep::Down)
    } else if board.is_bottom_row(position) {
        Some(FreeStep::Right)
    } else {
        None
    }
}

/// Leader pathing system that answers leader ticks with step commands.
#[derive(Debug)]
pub struct LeaderPathing<C = RandomChooser> {
    chooser: C,
}

impl<C: StepChooser> LeaderPathing<C> {
    /// Creates a pathing system drawing free choices from `chooser`.
    #[must_use]
    pub const fn new(chooser: C) -> Self {
        Self { chooser }
    }

    /// Consumes world events and emits one `AdvanceLeader` per leader tick.
    pub fn handle(&mut self, events: &[Event], board: Board, out: &mut Vec<Command>) {
        for event in events {
            if let Event::LeaderTurnTicked {
                generation,
                position,
            } = event
            {
                if let Some(to) = self.next_cell(board, *position) {
                    out.push(Command::AdvanceLeader {
                        generation: *generation,
                        to,
                    });
                }
            }
        }
    }

    /// Picks the cell the leader moves to from `position`.
    ///
    /// Returns `None` once the leader stands on the final cell or off the board.
    pub fn next_cell(&mut self, board: Board, position: CellIndex) -> Option<CellIndex> {
        if !board.contains(position) || position == board.final_cell() {
            return None;
        }

        let step = match forced_step(board, position) {
            Some(step) => step,
            None => self.chooser.choose(position),
        };
        board.neighbor(position, step.direction())
    }
}
