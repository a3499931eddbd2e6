#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that turns player move requests into world commands.
//!
//! Keyboard and pointer requests are normalised to a single step in one
//! direction. Requests outside the player turn, steps across a board edge and
//! pointer targets other than the right and down neighbours are dropped
//! without consuming the turn. Legal steps are classified against the leader's trail before the
//! world applies them.

use follow_leader_core::{
    Board, CellIndex, Command, Direction, MoveRequest, MoveVerdict, Phase, CELEBRATION_MESSAGES,
};
use follow_leader_world::query::TrailView;
use log::debug;
use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Move validation system that also picks the celebratory line for each win.
#[derive(Clone, Debug)]
pub struct MoveValidator {
    rng: ChaCha8Rng,
}

impl MoveValidator {
    /// Creates a validator whose message choices are fully determined by `seed`.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Creates a validator seeded from operating system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Validates a move request and emits at most one `MovePlayer` command.
    pub fn handle(
        &mut self,
        request: MoveRequest,
        phase: Phase,
        board: Board,
        player: CellIndex,
        trail: &TrailView<'_>,
        out: &mut Vec<Command>,
    ) {
        if phase != Phase::PlayerTurn {
            debug!("ignoring {request:?} during {phase:?}");
            return;
        }

        let Some(direction) = requested_direction(board, player, request) else {
            debug!("ignoring {request:?}: target is not clickable from {}", player.get());
            return;
        };
        let Some(to) = board.neighbor(player, direction) else {
            debug!("ignoring {direction:?} from {}: crosses the board edge", player.get());
            return;
        };

        let verdict = if to == board.final_cell() {
            MoveVerdict::ReachedGoal {
                message: self.celebration().to_owned(),
            }
        } else if trail.contains(to) {
            MoveVerdict::OnTrail
        } else {
            MoveVerdict::OffTrail
        };
        out.push(Command::MovePlayer { to, verdict });
    }

    fn celebration(&mut self) -> &'static str {
        CELEBRATION_MESSAGES
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(CELEBRATION_MESSAGES[0])
    }
}

/// Normalises a request into the direction of a single step.
///
/// Pointer targets resolve only when they are one of the
/// [`clickable_targets`] of `player`.
#[must_use]
pub fn requested_direction(
    board: Board,
    player: CellIndex,
    request: MoveRequest,
) -> Option<Direction> {
    match request {
        MoveRequest::Step(direction) => Some(direction),
        MoveRequest::Target(target) => {
            if !clickable_targets(board, player).contains(&target) {
                return None;
            }
            board.direction_between(player, target)
        }
    }
}

/// Cells a pointer user may tap from `position`: the right and down neighbours.
#[must_use]
pub fn clickable_targets(board: Board, position: CellIndex) -> Vec<CellIndex> {
    [board.neighbor_right(position), board.neighbor_down(position)]
        .into_iter()
        .flatten()
        .collect()
}
