//! Core library for the glossary matching game.
//!
//! Provides:
//! - Term catalog (built-in glossary, JSON and markdown loading)
//! - Fisher-Yates shuffle and deck building
//! - Match engine state machine with session stats
//! - Study-mode navigator

pub mod catalog;
pub mod deck;
pub mod engine;
pub mod error;
pub mod parser;
pub mod shuffle;
pub mod stats;
pub mod study;
pub mod types;

pub use catalog::Catalog;
pub use deck::{CardToken, Deck};
pub use engine::{CardView, Effect, GameEvent, MatchEngine, RevertTicket, Transition, TurnState};
pub use error::{GameError, ParseError, Result};
pub use parser::parse_glossary;
pub use shuffle::{shuffle, shuffle_in_place};
pub use stats::{format_elapsed, SessionStats, StatsSnapshot};
pub use study::{StudyCard, StudyNavigator};
pub use types::{
    validate_pair_count, CardFace, CardId, Face, GameSettings, Generation, GlossaryEntry, PairId,
    PAIR_COUNT_PRESETS,
};
