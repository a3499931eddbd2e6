//! Scripted player that retraces the leader's trail.

use follow_leader_core::{Board, CellIndex, MoveRequest};
use follow_leader_rendering::InputMode;

/// Queue of move requests planned at the start of a player turn.
#[derive(Clone, Debug)]
pub(crate) struct Autopilot {
    route: Vec<MoveRequest>,
    next: usize,
}

impl Autopilot {
    /// Plans a faithful replay of `trail`.
    ///
    /// Keyboard mode steps in directions, pointer mode taps the next cell.
    pub(crate) fn replay(board: Board, trail: &[CellIndex], mode: InputMode) -> Self {
        let route = trail
            .windows(2)
            .filter_map(|pair| {
                let direction = board.direction_between(pair[0], pair[1])?;
                Some(match mode {
                    InputMode::Keyboard => MoveRequest::Step(direction),
                    InputMode::Pointer => MoveRequest::Target(pair[1]),
                })
            })
            .collect();
        Self { route, next: 0 }
    }

    /// Plans a single tap on the origin neighbour the leader did not take.
    pub(crate) fn stumble(board: Board, trail: &[CellIndex]) -> Self {
        let taken = trail.get(1).copied();
        let route = [
            board.neighbor_right(CellIndex::ORIGIN),
            board.neighbor_down(CellIndex::ORIGIN),
        ]
        .into_iter()
        .flatten()
        .find(|cell| Some(*cell) != taken)
        .map(MoveRequest::Target)
        .into_iter()
        .collect();
        Self { route, next: 0 }
    }

    /// Next request to submit, if the plan is not exhausted.
    pub(crate) fn next_request(&mut self) -> Option<MoveRequest> {
        let request = self.route.get(self.next).copied()?;
        self.next += 1;
        Some(request)
    }
}

#[cfg(test)]
mod tests {
    use follow_leader_core::Direction;

    use super::*;

    fn cells(indices: &[u32]) -> Vec<CellIndex> {
        indices.iter().copied().map(CellIndex::new).collect()
    }

    #[test]
    fn keyboard_replay_steps_along_the_trail() {
        let board = Board::with_side_length(4);
        let mut pilot =
            Autopilot::replay(board, &cells(&[0, 1, 5, 9, 13, 14, 15]), InputMode::Keyboard);

        let mut requests = Vec::new();
        while let Some(request) = pilot.next_request() {
            requests.push(request);
        }

        assert_eq!(
            requests,
            vec![
                MoveRequest::Step(Direction::Right),
                MoveRequest::Step(Direction::Down),
                MoveRequest::Step(Direction::Down),
                MoveRequest::Step(Direction::Down),
                MoveRequest::Step(Direction::Right),
                MoveRequest::Step(Direction::Right),
            ]
        );
    }

    #[test]
    fn pointer_replay_taps_each_cell() {
        let board = Board::with_side_length(3);
        let mut pilot = Autopilot::replay(board, &cells(&[0, 3, 4, 5, 8]), InputMode::Pointer);

        assert_eq!(pilot.next_request(), Some(MoveRequest::Target(CellIndex::new(3))));
        assert_eq!(pilot.next_request(), Some(MoveRequest::Target(CellIndex::new(4))));
    }

    #[test]
    fn stumble_takes_the_other_origin_neighbour() {
        let board = Board::with_side_length(4);

        let mut pilot = Autopilot::stumble(board, &cells(&[0, 1, 2]));
        assert_eq!(pilot.next_request(), Some(MoveRequest::Target(CellIndex::new(4))));
        assert_eq!(pilot.next_request(), None);

        let mut pilot = Autopilot::stumble(board, &cells(&[0, 4, 8]));
        assert_eq!(pilot.next_request(), Some(MoveRequest::Target(CellIndex::new(1))));
    }
}
