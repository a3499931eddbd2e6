//! Square grid geometry and neighbour predicates.

use crate::{CellIndex, Direction};

/// Square board of `side_length²` cells laid out in row-major order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    side_length: u32,
    square_count: u32,
}

impl Board {
    /// Creates a board with the provided side length.
    #[must_use]
    pub const fn with_side_length(side_length: u32) -> Self {
        Self {
            side_length,
            square_count: side_length.saturating_mul(side_length),
        }
    }

    /// Number of cells along each edge.
    #[must_use]
    pub const fn side_length(&self) -> u32 {
        self.side_length
    }

    /// Total number of cells.
    #[must_use]
    pub const fn square_count(&self) -> u32 {
        self.square_count
    }

    /// Bottom-right cell both characters are heading for.
    #[must_use]
    pub const fn final_cell(&self) -> CellIndex {
        CellIndex::new(self.square_count.saturating_sub(1))
    }

    /// Reports whether the index lies on the board.
    #[must_use]
    pub const fn contains(&self, index: CellIndex) -> bool {
        index.get() < self.square_count
    }

    /// Reports whether the cell sits in the rightmost column.
    #[must_use]
    pub const fn is_right_edge(&self, index: CellIndex) -> bool {
        self.side_length != 0 && index.get() % self.side_length == self.side_length - 1
    }

    /// Reports whether the cell sits on or past the bottom row boundary.
    #[must_use]
    pub const fn is_bottom_row(&self, index: CellIndex) -> bool {
        index.get() >= self.square_count.saturating_sub(self.side_length)
    }

    /// Reports whether the cell sits in the leftmost column.
    #[must_use]
    pub const fn is_left_edge(&self, index: CellIndex) -> bool {
        self.side_length == 0 || index.get() % self.side_length == 0
    }

    /// Reports whether the cell sits in the top row.
    #[must_use]
    pub const fn is_top_row(&self, index: CellIndex) -> bool {
        index.get() < self.side_length
    }

    /// Cell to the right, unless the index is on the right edge.
    #[must_use]
    pub const fn neighbor_right(&self, index: CellIndex) -> Option<CellIndex> {
        if !self.contains(index) || self.is_right_edge(index) {
            None
        } else {
            Some(CellIndex::new(index.get() + 1))
        }
    }

    /// Cell to the left, unless the index is on the left edge.
    #[must_use]
    pub const fn neighbor_left(&self, index: CellIndex) -> Option<CellIndex> {
        if !self.contains(index) || self.is_left_edge(index) {
            None
        } else {
            Some(CellIndex::new(index.get() - 1))
        }
    }

    /// Cell below, unless the index is on the bottom row.
    #[must_use]
    pub const fn neighbor_down(&self, index: CellIndex) -> Option<CellIndex> {
        if !self.contains(index) || self.is_bottom_row(index) {
            None
        } else {
            Some(CellIndex::new(index.get() + self.side_length))
        }
    }

    /// Cell above, unless the index is on the top row.
    #[must_use]
    pub const fn neighbor_up(&self, index: CellIndex) -> Option<CellIndex> {
        if !self.contains(index) || self.is_top_row(index) {
            None
        } else {
            Some(CellIndex::new(index.get() - self.side_length))
        }
    }

    /// Neighbouring cell in the provided direction, if it lies on the board.
    #[must_use]
    pub const fn neighbor(&self, index: CellIndex, direction: Direction) -> Option<CellIndex> {
        match direction {
            Direction::Up => self.neighbor_up(index),
            Direction::Down => self.neighbor_down(index),
            Direction::Left => self.neighbor_left(index),
            Direction::Right => self.neighbor_right(index),
        }
    }

    /// Direction leading from `from` to `to` when they are orthogonal neighbours.
    #[must_use]
    pub fn direction_between(&self, from: CellIndex, to: CellIndex) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|direction| self.neighbor(from, *direction) == Some(to))
    }

    /// Iterates every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellIndex> {
        (0..self.square_count).map(CellIndex::new)
    }
}
