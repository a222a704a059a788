//! Core types for the glossary matching game.

use crate::error::{GameError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// Board sizes offered by the reference game screen.
pub const PAIR_COUNT_PRESETS: [usize; 4] = [6, 8, 10, 12];

/// A single glossary term with its definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryEntry {
    pub term: String,
    pub definition: String,
}

impl GlossaryEntry {
    pub fn new(term: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            definition: definition.into(),
        }
    }
}

/// Which side of a glossary entry a card shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Face {
    Term,
    Definition,
}

impl Face {
    /// The other side of the same entry.
    pub fn opposite(self) -> Self {
        match self {
            Self::Term => Self::Definition,
            Self::Definition => Self::Term,
        }
    }

    /// Label printed on the card front.
    pub fn label(self) -> &'static str {
        match self {
            Self::Term => "Term",
            Self::Definition => "Definition",
        }
    }
}

/// Visual state of a card on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardFace {
    Hidden,
    Revealed,
    Matched,
}

impl Default for CardFace {
    fn default() -> Self {
        Self::Hidden
    }
}

/// Random v4 UUID drawn from the caller's RNG so seeded decks are reproducible.
fn random_uuid<R: Rng>(rng: &mut R) -> Uuid {
    uuid::Builder::from_random_bytes(rng.random()).into_uuid()
}

/// Identity shared by the two cards of one pair within a single deck build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PairId(Uuid);

impl PairId {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self(random_uuid(rng))
    }

    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for PairId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of one card token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(Uuid);

impl CardId {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self(random_uuid(rng))
    }

    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Session counter. Bumped every time a new deck is dealt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Generation(u64);

impl Generation {
    pub const fn first() -> Self {
        Self(1)
    }

    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Game configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub pair_count: usize,
    pub mismatch_delay_ms: u64,
    pub tick_interval_ms: u64,
    pub show_definition_first: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            pair_count: 12,
            mismatch_delay_ms: 850,
            tick_interval_ms: 1000,
            show_definition_first: false,
        }
    }
}

impl GameSettings {
    /// How long a mismatched pair stays face-up.
    pub fn mismatch_delay(&self) -> Duration {
        Duration::from_millis(self.mismatch_delay_ms)
    }

    /// Period of the stats clock.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Whether the pair count is one of [`PAIR_COUNT_PRESETS`].
    pub fn is_preset_board(&self) -> bool {
        PAIR_COUNT_PRESETS.contains(&self.pair_count)
    }

    /// Check the pair count against the number of catalog entries.
    pub fn validate(&self, catalog_len: usize) -> Result<()> {
        validate_pair_count(self.pair_count, catalog_len)
    }
}

/// Pair counts must lie in `1..=catalog_len`.
pub fn validate_pair_count(requested: usize, available: usize) -> Result<()> {
    if requested == 0 || requested > available {
        return Err(GameError::InvalidPairCount {
            requested,
            available,
        });
    }
    Ok(())
}
