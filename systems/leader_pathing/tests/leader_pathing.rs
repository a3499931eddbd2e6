use follow_leader_core::{Board, CellIndex, Command, DifficultyCatalog, Event, Phase};
use follow_leader_system_leader_pathing::{
    forced_step, FixedChooser, FreeStep, LeaderPathing, RandomChooser, StepChooser,
};
use follow_leader_world::{self as world, query, World};

#[test]
fn right_edge_and_bottom_row_force_the_only_legal_step() {
    let board = Board::with_side_length(5);

    for cell in board.cells() {
        if cell == board.final_cell() {
            continue;
        }
        match forced_step(board, cell) {
            Some(FreeStep::Down) => {
                assert!(board.is_right_edge(cell));
                assert!(board.neighbor_right(cell).is_none());
            }
            Some(FreeStep::Right) => {
                assert!(board.is_bottom_row(cell));
                assert!(board.neighbor_down(cell).is_none());
            }
            None => {
                assert!(board.neighbor_right(cell).is_some());
                assert!(board.neighbor_down(cell).is_some());
            }
        }
    }
}

#[test]
fn leader_never_leaves_the_board_for_any_seed() {
    for side in 3..=7 {
        let board = Board::with_side_length(side);
        for seed in 0..64 {
            let path = walk(board, RandomChooser::seeded(seed));
            for pair in path.windows(2) {
                assert!(board.contains(pair[1]));
                assert!(
                    board.neighbor_right(pair[0]) == Some(pair[1])
                        || board.neighbor_down(pair[0]) == Some(pair[1]),
                    "step {:?} -> {:?} is not right or down",
                    pair[0],
                    pair[1]
                );
            }
            assert_eq!(path.last(), Some(&board.final_cell()));
            assert_eq!(path.len() as u32, 2 * (side - 1) + 1);
        }
    }
}

#[test]
fn fixed_choosers_produce_the_border_paths() {
    let board = Board::with_side_length(4);

    let along_top = walk(board, FixedChooser(FreeStep::Right));
    assert_eq!(indices(&along_top), [0, 1, 2, 3, 7, 11, 15]);

    let down_left_side = walk(board, FixedChooser(FreeStep::Down));
    assert_eq!(indices(&down_left_side), [0, 4, 8, 12, 13, 14, 15]);
}

#[test]
fn chooser_is_only_consulted_at_free_cells() {
    let board = Board::with_side_length(4);
    let mut recorder = Recorder::default();
    let _ = walk(board, &mut recorder);

    for cell in recorder.asked {
        assert!(forced_step(board, cell).is_none(), "asked at forced cell {cell:?}");
    }
}

#[test]
fn world_trail_is_gap_free_after_leader_finishes() {
    let difficulty = DifficultyCatalog::builtin()
        .expect("builtin catalog")
        .find("Hard")
        .expect("hard exists")
        .clone();
    let board = difficulty.board();
    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(&mut world, Command::StartSession { difficulty }, &mut events);
    let generation = query::generation(&world);
    world::apply(
        &mut world,
        Command::StartRound { generation },
        &mut events,
    );

    let mut pathing = LeaderPathing::new(RandomChooser::seeded(0x5eed));
    let mut finished = false;
    for _ in 0..board.square_count() {
        let mut tick_events = Vec::new();
        let generation = query::generation(&world);
        world::apply(
            &mut world,
            Command::TickLeader { generation },
            &mut tick_events,
        );
        let mut commands = Vec::new();
        pathing.handle(&tick_events, board, &mut commands);
        for command in commands {
            let mut step_events = Vec::new();
            world::apply(&mut world, command, &mut step_events);
            finished |= step_events
                .iter()
                .any(|event| matches!(event, Event::LeaderFinished { .. }));
        }
        if finished {
            break;
        }
    }

    assert!(finished, "leader never reached the final cell");
    assert_eq!(query::phase(&world), Phase::LeaderTurn);
    let trail = query::trail_view(&world);
    assert_eq!(trail.cells().first(), Some(&CellIndex::ORIGIN));
    assert_eq!(trail.cells().last(), Some(&board.final_cell()));
    for pair in trail.cells().windows(2) {
        assert!(board.direction_between(pair[0], pair[1]).is_some());
    }
}

fn walk<C: StepChooser>(board: Board, chooser: C) -> Vec<CellIndex> {
    let mut pathing = LeaderPathing::new(chooser);
    let mut path = vec![CellIndex::ORIGIN];
    let mut position = CellIndex::ORIGIN;
    while let Some(next) = pathing.next_cell(board, position) {
        assert!(next > position, "leader moved backwards");
        path.push(next);
        position = next;
    }
    path
}

fn indices(path: &[CellIndex]) -> Vec<u32> {
    path.iter().map(CellIndex::get).collect()
}

#[derive(Default)]
struct Recorder {
    asked: Vec<CellIndex>,
}

impl StepChooser for &mut Recorder {
    fn choose(&mut self, from: CellIndex) -> FreeStep {
        self.asked.push(from);
        if self.asked.len() % 2 == 0 {
            FreeStep::Down
        } else {
            FreeStep::Right
        }
    }
}
