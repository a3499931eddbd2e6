use std::time::Duration;

use follow_leader_core::{CellIndex, Direction, DifficultyCatalog, MoveRequest, Phase};
use follow_leader_rendering::{Frame, InputMode, Presentation};
use follow_leader_session::{RoundController, SessionError};
use follow_leader_system_leader_pathing::{FixedChooser, FreeStep};
use follow_leader_system_move_validator::MoveValidator;
use follow_leader_world::query;

const STEP: Duration = Duration::from_millis(100);

#[derive(Debug, Default)]
struct Recorder {
    narrow: bool,
    frames: Vec<Frame>,
    prompts: Vec<String>,
    modes: Vec<InputMode>,
    scores: Vec<u32>,
    wins: Vec<(String, u32)>,
    losses: Vec<u32>,
}

impl Presentation for Recorder {
    fn render(&mut self, frame: &Frame) {
        self.frames.push(frame.clone());
    }

    fn viewport_is_narrow(&self) -> bool {
        self.narrow
    }

    fn on_input_mode(&mut self, mode: InputMode) {
        self.modes.push(mode);
    }

    fn on_prompt(&mut self, message: &str) {
        self.prompts.push(message.to_owned());
    }

    fn on_score_changed(&mut self, score: u32) {
        self.scores.push(score);
    }

    fn on_round_won(&mut self, message: &str, score: u32) {
        self.wins.push((message.to_owned(), score));
    }

    fn on_round_lost(&mut self, final_score: u32) {
        self.losses.push(final_score);
    }
}

fn controller(step: FreeStep, narrow: bool) -> RoundController<Recorder, FixedChooser> {
    let catalog = DifficultyCatalog::builtin().expect("builtin catalog");
    let presentation = Recorder {
        narrow,
        ..Recorder::default()
    };
    RoundController::with_components(
        catalog,
        presentation,
        FixedChooser(step),
        MoveValidator::seeded(42),
    )
}

fn run_until(controller: &mut RoundController<Recorder, FixedChooser>, phase: Phase) {
    for _ in 0..1_000 {
        if controller.phase() == phase {
            return;
        }
        controller.advance(STEP);
    }
    panic!("never reached {phase:?}, stuck in {:?}", controller.phase());
}

fn trail(controller: &RoundController<Recorder, FixedChooser>) -> Vec<u32> {
    query::trail_view(controller.world())
        .cells()
        .iter()
        .map(CellIndex::get)
        .collect()
}

fn turn_ms(controller: &RoundController<Recorder, FixedChooser>) -> f64 {
    query::active_difficulty(controller.world())
        .expect("session running")
        .base_turn_duration_ms()
}

fn replay_along_top(controller: &mut RoundController<Recorder, FixedChooser>) {
    let route = [
        Direction::Right,
        Direction::Right,
        Direction::Right,
        Direction::Down,
        Direction::Down,
        Direction::Down,
    ];
    for direction in route {
        controller.move_requested(MoveRequest::Step(direction));
    }
}

#[test]
fn replaying_the_trail_wins_and_speeds_up_the_next_round() {
    let mut controller = controller(FreeStep::Right, false);
    controller.select_difficulty("Easy").expect("easy exists");
    assert_eq!(controller.presentation().scores, vec![0]);
    assert_eq!(
        controller.presentation().prompts,
        vec!["This way private. Follow me!".to_owned()]
    );

    run_until(&mut controller, Phase::PlayerTurn);
    assert_eq!(trail(&controller), [0, 1, 2, 3, 7, 11, 15]);
    assert!((turn_ms(&controller) - 1_500.0).abs() < 1e-9);

    replay_along_top(&mut controller);
    assert_eq!(controller.phase(), Phase::Won);
    assert_eq!(controller.score(), 1);
    assert!((turn_ms(&controller) - 1_425.0).abs() < 1e-9);
    let (message, score) = controller.presentation().wins[0].clone();
    assert_eq!(score, 1);
    assert!(follow_leader_core::CELEBRATION_MESSAGES.contains(&message.as_str()));

    controller.advance(Duration::from_millis(1_424));
    assert_eq!(controller.phase(), Phase::Won, "next round started early");
    controller.advance(Duration::from_millis(1));
    assert_eq!(controller.phase(), Phase::LeaderTurn);
    assert_eq!(controller.score(), 1, "score must survive into the next round");
    assert_eq!(controller.presentation().prompts.len(), 2);

    run_until(&mut controller, Phase::PlayerTurn);
    replay_along_top(&mut controller);
    assert_eq!(controller.score(), 2);
    assert!((turn_ms(&controller) - 1_353.75).abs() < 1e-9);
    assert_eq!(controller.presentation().scores, vec![0, 1, 2]);
}

#[test]
fn stepping_off_the_trail_ends_the_session() {
    let mut controller = controller(FreeStep::Down, false);
    controller.select_difficulty("Easy").expect("easy exists");
    run_until(&mut controller, Phase::PlayerTurn);
    assert_eq!(trail(&controller), [0, 4, 8, 12, 13, 14, 15]);

    for target in [4, 8] {
        controller.move_requested(MoveRequest::Target(CellIndex::new(target)));
        assert_eq!(controller.phase(), Phase::PlayerTurn);
    }
    controller.move_requested(MoveRequest::Target(CellIndex::new(9)));

    assert_eq!(controller.phase(), Phase::Lost);
    assert_eq!(query::player_position(controller.world()), CellIndex::new(9));
    assert_eq!(controller.presentation().losses, vec![0]);

    let frames_at_loss = controller.presentation().frames.len();
    controller.advance(Duration::from_secs(30));
    controller.move_requested(MoveRequest::Step(Direction::Right));
    assert_eq!(controller.phase(), Phase::Lost);
    assert_eq!(controller.presentation().frames.len(), frames_at_loss);
}

#[test]
fn reset_mid_leader_turn_drops_the_old_round() {
    let mut controller = controller(FreeStep::Right, false);
    controller.select_difficulty("Easy").expect("easy exists");
    controller.advance(Duration::from_millis(1_500));
    assert_eq!(trail(&controller), [0, 1, 2]);

    controller.reset_session();
    assert_eq!(controller.phase(), Phase::Intro);
    let frames_after_reset = controller.presentation().frames.len();
    for _ in 0..30 {
        controller.advance(STEP);
    }
    assert_eq!(
        controller.presentation().frames.len(),
        frames_after_reset,
        "a leftover timer touched the world after reset"
    );

    controller.select_difficulty("Easy").expect("easy exists");
    assert_eq!(trail(&controller), [0, 1]);
    controller.advance(Duration::from_millis(1_499));
    assert_eq!(trail(&controller), [0, 1]);
    controller.advance(Duration::from_millis(1));
    assert_eq!(trail(&controller), [0, 1, 2]);
    assert_eq!(controller.score(), 0);
}

#[test]
fn unknown_difficulty_changes_nothing() {
    let mut controller = controller(FreeStep::Right, false);

    let error = controller
        .select_difficulty("Nightmare")
        .expect_err("not in the catalog");

    assert_eq!(
        error,
        SessionError::UnknownDifficulty {
            name: "Nightmare".to_owned()
        }
    );
    assert_eq!(controller.phase(), Phase::Intro);
    assert!(controller.presentation().frames.is_empty());
}

#[test]
fn frames_show_one_character_at_a_time() {
    let mut controller = controller(FreeStep::Right, false);
    controller.select_difficulty("medium").expect("names ignore case");
    run_until(&mut controller, Phase::PlayerTurn);
    controller.move_requested(MoveRequest::Step(Direction::Right));

    let frames = &controller.presentation().frames;
    assert!(!frames.is_empty());
    for frame in frames {
        match frame.phase {
            Phase::Intro => assert_eq!((frame.leader, frame.player), (None, None)),
            Phase::LeaderTurn => {
                assert!(frame.leader.is_some());
                assert!(frame.player.is_none());
            }
            Phase::PlayerTurn | Phase::Won | Phase::Lost => {
                assert!(frame.leader.is_none());
                assert!(frame.player.is_some());
            }
        }
    }
    assert_eq!(
        frames.last().and_then(|frame| frame.player),
        Some(CellIndex::new(1))
    );
}

#[test]
fn narrow_viewport_uses_pointer_targets() {
    let mut controller = controller(FreeStep::Right, true);
    assert!(controller.clickable_targets().is_empty());

    controller.select_difficulty("Easy").expect("easy exists");
    assert_eq!(controller.input_mode(), InputMode::Pointer);
    assert_eq!(controller.presentation().modes, vec![InputMode::Pointer]);
    assert!(controller.clickable_targets().is_empty(), "leader is still walking");

    run_until(&mut controller, Phase::PlayerTurn);
    assert_eq!(
        controller.clickable_targets(),
        vec![CellIndex::new(1), CellIndex::new(4)]
    );

    controller.move_requested(MoveRequest::Target(CellIndex::new(1)));
    assert_eq!(
        controller.clickable_targets(),
        vec![CellIndex::new(2), CellIndex::new(5)]
    );
}

#[test]
fn seeded_sessions_replay_identically() {
    let catalog = DifficultyCatalog::builtin().expect("builtin catalog");
    let mut first = RoundController::seeded(catalog.clone(), Recorder::default(), 99);
    let mut second = RoundController::seeded(catalog, Recorder::default(), 99);

    for controller in [&mut first, &mut second] {
        controller.select_difficulty("Hard").expect("hard exists");
        for _ in 0..200 {
            controller.advance(STEP);
        }
        assert_eq!(controller.phase(), Phase::PlayerTurn);
    }

    assert_eq!(
        query::trail_view(first.world()).cells(),
        query::trail_view(second.world()).cells()
    );
    assert_eq!(first.presentation().frames, second.presentation().frames);
}
