//! Leader trail bookkeeping used by the world crate.

use follow_leader_core::{Board, CellIndex};

/// Insertion-ordered set of cells the leader has visited this round.
///
/// Membership is mirrored into a dense per-cell table so the player's
/// on-trail check stays constant time regardless of the trail length.
#[derive(Clone, Debug, Default)]
pub(crate) struct Trail {
    cells: Vec<CellIndex>,
    visited: Vec<bool>,
}

impl Trail {
    /// Clears the trail and seeds it with the origin cell of `board`.
    pub(crate) fn restart(&mut self, board: Board) {
        let capacity = usize::try_from(board.square_count()).unwrap_or(0);
        self.cells.clear();
        self.visited.clear();
        self.visited.resize(capacity, false);
        if capacity > 0 {
            let _ = self.push(CellIndex::ORIGIN);
        }
    }

    /// Drops every cell, leaving an empty trail with no backing board.
    pub(crate) fn clear(&mut self) {
        self.cells.clear();
        self.visited.clear();
    }

    /// Appends a cell, returning `false` when it is off the board or already present.
    pub(crate) fn push(&mut self, cell: CellIndex) -> bool {
        let Some(slot) = self.slot_mut(cell) else {
            return false;
        };
        if *slot {
            return false;
        }
        *slot = true;
        self.cells.push(cell);
        true
    }

    pub(crate) fn contains(&self, cell: CellIndex) -> bool {
        usize::try_from(cell.get())
            .ok()
            .and_then(|index| self.visited.get(index).copied())
            .unwrap_or(false)
    }

    pub(crate) fn cells(&self) -> &[CellIndex] {
        &self.cells
    }

    pub(crate) fn membership(&self) -> &[bool] {
        &self.visited
    }

    fn slot_mut(&mut self, cell: CellIndex) -> Option<&mut bool> {
        let index = usize::try_from(cell.get()).ok()?;
        self.visited.get_mut(index)
    }
}
