//! Difficulty definitions and catalog validation.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::{Board, SPEED_DECAY_FACTOR};

/// Smallest side length a difficulty may use.
pub const MIN_SIDE_LENGTH: u32 = 3;

const BUILTIN_ENTRIES: [(&str, u32, f64); 3] = [
    ("Easy", 16, 1_500.0),
    ("Medium", 25, 1_250.0),
    ("Hard", 36, 1_000.0),
];

/// Reasons a difficulty catalog fails validation.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The square count cannot be laid out as a square board.
    #[error("difficulty `{name}` uses {square_count} squares, which is not a perfect square")]
    NotPerfectSquare {
        /// Name of the offending entry.
        name: String,
        /// Square count that failed validation.
        square_count: u32,
    },
    /// The board is too small to leave the leader any choices.
    #[error("difficulty `{name}` has side length {side_length}; at least 3 is required")]
    BoardTooSmall {
        /// Name of the offending entry.
        name: String,
        /// Side length derived from the square count.
        side_length: u32,
    },
    /// The turn duration is zero, negative or not a number.
    #[error("difficulty `{name}` has non-positive turn duration {duration_ms} ms")]
    NonPositiveDuration {
        /// Name of the offending entry.
        name: String,
        /// Duration that failed validation.
        duration_ms: f64,
    },
    /// An entry has a blank name.
    #[error("difficulty names must not be empty")]
    EmptyName,
    /// Two entries share a name.
    #[error("difficulty `{name}` is defined more than once")]
    DuplicateName {
        /// Name that appears more than once.
        name: String,
    },
    /// The catalog defines no difficulties at all.
    #[error("difficulty catalog is empty")]
    Empty,
    /// The catalog source is not valid TOML for the expected layout.
    #[error("failed to parse difficulty catalog")]
    Parse(#[from] toml::de::Error),
}

/// Raw catalog entry as written in configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DifficultyEntry {
    /// Display name of the difficulty.
    pub name: String,
    /// Total number of board cells; must be a perfect square.
    pub squares: u32,
    /// Starting delay between turn ticks, in milliseconds.
    pub turn_duration_ms: f64,
}

/// Validated difficulty setting.
///
/// A session holds its own copy whose turn duration decays with every win;
/// the catalog entry it was cloned from never changes.
#[derive(Clone, Debug, PartialEq)]
pub struct Difficulty {
    name: String,
    side_length: u32,
    base_turn_duration_ms: f64,
}

impl Difficulty {
    /// Validates a raw entry into a difficulty.
    pub fn from_entry(entry: DifficultyEntry) -> Result<Self, CatalogError> {
        let DifficultyEntry {
            name,
            squares,
            turn_duration_ms,
        } = entry;

        if name.trim().is_empty() {
            return Err(CatalogError::EmptyName);
        }

        let Some(side_length) = exact_side_length(squares) else {
            return Err(CatalogError::NotPerfectSquare {
                name,
                square_count: squares,
            });
        };

        if side_length < MIN_SIDE_LENGTH {
            return Err(CatalogError::BoardTooSmall { name, side_length });
        }

        if !(turn_duration_ms.is_finite() && turn_duration_ms > 0.0) {
            return Err(CatalogError::NonPositiveDuration {
                name,
                duration_ms: turn_duration_ms,
            });
        }

        Ok(Self {
            name,
            side_length,
            base_turn_duration_ms: turn_duration_ms,
        })
    }

    /// Display name of the difficulty.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of cells along each board edge.
    #[must_use]
    pub const fn side_length(&self) -> u32 {
        self.side_length
    }

    /// Total number of board cells.
    #[must_use]
    pub const fn square_count(&self) -> u32 {
        self.side_length * self.side_length
    }

    /// Board layout for rounds played at this difficulty.
    #[must_use]
    pub const fn board(&self) -> Board {
        Board::with_side_length(self.side_length)
    }

    /// Current delay between turn ticks, in milliseconds.
    #[must_use]
    pub const fn base_turn_duration_ms(&self) -> f64 {
        self.base_turn_duration_ms
    }

    /// Current delay between turn ticks, rounded to whole microseconds.
    #[must_use]
    pub fn turn_duration(&self) -> Duration {
        Duration::from_micros((self.base_turn_duration_ms * 1_000.0).round() as u64)
    }

    /// Shortens the turn duration after a won round.
    pub fn decay_speed(&mut self) {
        self.base_turn_duration_ms *= SPEED_DECAY_FACTOR;
    }
}

/// Validated, ordered set of difficulties a session may be started with.
#[derive(Clone, Debug, PartialEq)]
pub struct DifficultyCatalog {
    entries: Vec<Difficulty>,
}

impl DifficultyCatalog {
    /// The Easy / Medium / Hard catalog shipped with the game.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_entries(
            BUILTIN_ENTRIES
                .iter()
                .map(|&(name, squares, turn_duration_ms)| DifficultyEntry {
                    name: name.to_owned(),
                    squares,
                    turn_duration_ms,
                }),
        )
    }

    /// Validates raw entries into a catalog, preserving their order.
    pub fn from_entries<I>(entries: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = DifficultyEntry>,
    {
        let mut validated: Vec<Difficulty> = Vec::new();
        for entry in entries {
            let difficulty = Difficulty::from_entry(entry)?;
            if validated
                .iter()
                .any(|existing| existing.name.eq_ignore_ascii_case(&difficulty.name))
            {
                return Err(CatalogError::DuplicateName {
                    name: difficulty.name,
                });
            }
            validated.push(difficulty);
        }

        if validated.is_empty() {
            return Err(CatalogError::Empty);
        }

        Ok(Self { entries: validated })
    }

    /// Parses and validates a catalog written as TOML.
    ///
    /// ```toml
    /// [[difficulty]]
    /// name = "Easy"
    /// squares = 16
    /// turn_duration_ms = 1500.0
    /// ```
    pub fn from_toml_str(contents: &str) -> Result<Self, CatalogError> {
        let manifest: CatalogManifest = toml::from_str(contents)?;
        Self::from_entries(manifest.difficulty)
    }

    /// Looks up a difficulty by name, ignoring ASCII case.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Difficulty> {
        self.entries
            .iter()
            .find(|difficulty| difficulty.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Iterates the difficulties in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Difficulty> {
        self.entries.iter()
    }
}

#[derive(Debug, Deserialize)]
struct CatalogManifest {
    #[serde(default)]
    difficulty: Vec<DifficultyEntry>,
}

/// Side length of a square board with `square_count` cells, if one exists.
#[must_use]
pub fn exact_side_length(square_count: u32) -> Option<u32> {
    let mut root = f64::from(square_count).sqrt() as u64;
    let target = u64::from(square_count);
    while root * root > target {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= target {
        root += 1;
    }
    if root * root == target {
        u32::try_from(root).ok()
    } else {
        None
    }
}
