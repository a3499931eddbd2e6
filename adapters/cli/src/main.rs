#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Follow the Leader in the terminal.
//!
//! A scripted player watches each leader turn and retraces the trail, so a
//! whole session runs unattended under simulated time.

mod autopilot;
mod terminal;

use std::{fs, io, path::PathBuf, time::Duration};

use anyhow::{bail, Context, Result};
use clap::Parser;
use follow_leader_core::{DifficultyCatalog, MoveRequest, Phase};
use follow_leader_rendering::{InputMode, Presentation};
use follow_leader_session::RoundController;
use follow_leader_world::query;
use log::info;

use self::{autopilot::Autopilot, terminal::TerminalPresentation};

/// Simulated time advanced between polls of the controller.
const FRAME_STEP: Duration = Duration::from_millis(50);

#[derive(Debug, Parser)]
#[command(name = "follow-leader", version)]
#[command(about = "Watch the leader cross the board, then retrace the trail")]
struct Args {
    /// Difficulty to play, matched case-insensitively against the catalog
    #[arg(long, default_value = "Easy")]
    difficulty: String,

    /// Seed for the leader's path and the celebration lines
    #[arg(long)]
    seed: Option<u64>,

    /// Number of player turns to play before stopping
    #[arg(long, default_value_t = 3)]
    rounds: u32,

    /// TOML file replacing the built-in difficulty catalog
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Force pointer input, as on a narrow viewport
    #[arg(long)]
    narrow: bool,

    /// Viewport width in pixels used to pick the input mode
    #[arg(long)]
    viewport_width: Option<u32>,

    /// Round (starting at 1) in which the player steps off the trail
    #[arg(long)]
    stumble_at: Option<u32>,
}

impl Args {
    fn narrow_viewport(&self) -> bool {
        self.narrow
            || self
                .viewport_width
                .is_some_and(|width| InputMode::for_viewport_width(width) == InputMode::Pointer)
    }
}

/// Entry point for the Follow the Leader command-line interface.
fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let catalog = load_catalog(args.catalog.as_ref())?;
    let presentation = TerminalPresentation::new(io::stdout().lock(), args.narrow_viewport());
    let mut controller = match args.seed {
        Some(seed) => RoundController::seeded(catalog, presentation, seed),
        None => RoundController::new(catalog, presentation),
    };

    controller
        .select_difficulty(&args.difficulty)
        .with_context(|| format!("cannot start a session on `{}`", args.difficulty))?;

    let mut played = 0;
    while played < args.rounds {
        match controller.phase() {
            Phase::PlayerTurn => {
                played += 1;
                play_turn(&mut controller, args.stumble_at == Some(played))?;
            }
            Phase::Lost => break,
            Phase::Intro => bail!("session ended before round {}", played + 1),
            Phase::LeaderTurn | Phase::Won => controller.advance(FRAME_STEP),
        }
    }

    let score = controller.score();
    let _ = controller
        .into_presentation()
        .finish()
        .context("failed to write to stdout")?;
    println!("Rounds won: {score}");
    Ok(())
}

fn load_catalog(path: Option<&PathBuf>) -> Result<DifficultyCatalog> {
    let Some(path) = path else {
        return DifficultyCatalog::builtin().context("built-in catalog is invalid");
    };
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog {}", path.display()))?;
    let catalog = DifficultyCatalog::from_toml_str(&contents)
        .with_context(|| format!("invalid catalog {}", path.display()))?;
    info!(
        "loaded {} difficulties from {}",
        catalog.iter().count(),
        path.display()
    );
    Ok(catalog)
}

fn play_turn<P: Presentation>(controller: &mut RoundController<P>, stumble: bool) -> Result<()> {
    let board = query::board(controller.world()).context("player turn without a board")?;
    let trail = query::trail_view(controller.world()).cells().to_vec();
    let mut pilot = if stumble {
        Autopilot::stumble(board, &trail)
    } else {
        Autopilot::replay(board, &trail, controller.input_mode())
    };

    while controller.phase() == Phase::PlayerTurn {
        let Some(request) = pilot.next_request() else {
            bail!("ran out of moves before the round ended");
        };
        if let MoveRequest::Target(cell) = request {
            if !controller.clickable_targets().contains(&cell) {
                bail!("cell {} is not clickable", cell.get());
            }
        }
        controller.move_requested(request);
    }
    Ok(())
}
