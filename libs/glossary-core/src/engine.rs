//! Turn-based match engine.
//!
//! The engine is a plain state machine. Every operation returns a
//! [`Transition`]: events for whoever renders the board, and effects
//! (timers to arm or cancel) for whoever drives the engine. The engine never
//! reads the clock or sleeps; callers pass `now` and apply the effects.

use crate::catalog::Catalog;
use crate::deck::Deck;
use crate::error::{GameError, Result};
use crate::stats::{format_elapsed, SessionStats, StatsSnapshot};
use crate::types::{CardFace, CardId, Face, GameSettings, Generation};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Turn state of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TurnState {
    Idle,
    OneSelected { card: CardId },
    /// A mismatched pair is face-up and waiting to be turned back.
    Locked { first: CardId, second: CardId },
}

/// Request to turn a mismatched pair back after `delay`.
///
/// Only honored while the session generation and locked cards still match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevertTicket {
    pub generation: Generation,
    pub first: CardId,
    pub second: CardId,
    pub delay: Duration,
}

/// What the presentation layer needs to draw one card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub id: CardId,
    pub face: Face,
    pub text: String,
    pub state: CardFace,
    pub label: String,
}

/// Output events for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    SessionStarted {
        generation: Generation,
        cards: Vec<CardView>,
    },
    SelectionAccepted {
        card: CardId,
    },
    MatchResolved {
        first: CardId,
        second: CardId,
    },
    MismatchShown {
        first: CardId,
        second: CardId,
    },
    MismatchResolved {
        first: CardId,
        second: CardId,
    },
    StatsUpdated(StatsSnapshot),
    Win {
        elapsed: String,
        elapsed_seconds: u64,
        moves: u32,
    },
}

/// Timer work for the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ScheduleRevert(RevertTicket),
    CancelRevert,
    StartTicker,
    StopTicker,
}

/// Result of one engine operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transition {
    pub events: Vec<GameEvent>,
    pub effects: Vec<Effect>,
}

impl Transition {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.effects.is_empty()
    }

    fn event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    fn effect(&mut self, effect: Effect) {
        self.effects.push(effect);
    }
}

/// One game board with its turn state and stats.
#[derive(Debug, Clone)]
pub struct MatchEngine {
    catalog: Catalog,
    settings: GameSettings,
    deck: Deck,
    faces: Vec<CardFace>,
    turn: TurnState,
    stats: SessionStats,
    generation: Generation,
    won: bool,
}

impl MatchEngine {
    /// Deal the first board using `settings.pair_count`.
    pub fn new<R: Rng>(catalog: Catalog, settings: GameSettings, rng: &mut R) -> Result<Self> {
        let deck = Deck::build(&catalog, settings.pair_count, rng)?;
        Ok(Self {
            faces: vec![CardFace::Hidden; deck.len()],
            catalog,
            settings,
            deck,
            turn: TurnState::Idle,
            stats: SessionStats::new(),
            generation: Generation::first(),
            won: false,
        })
    }

    /// Events describing the current board, for a freshly attached presenter.
    pub fn announce(&self, now: DateTime<Utc>) -> Transition {
        let mut transition = Transition::default();
        transition.event(GameEvent::SessionStarted {
            generation: self.generation,
            cards: self.card_view(),
        });
        transition.event(GameEvent::StatsUpdated(self.snapshot(now)));
        transition
    }

    /// Deal a new board with `pair_count` pairs and reset the session.
    ///
    /// An out-of-range pair count leaves the current session untouched.
    pub fn configure_session<R: Rng>(
        &mut self,
        pair_count: usize,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Result<Transition> {
        let deck = Deck::build(&self.catalog, pair_count, rng)?;

        self.settings.pair_count = pair_count;
        self.faces = vec![CardFace::Hidden; deck.len()];
        self.deck = deck;
        self.turn = TurnState::Idle;
        self.stats.reset();
        self.generation = self.generation.next();
        self.won = false;

        let mut transition = self.announce(now);
        transition.effect(Effect::CancelRevert);
        transition.effect(Effect::StopTicker);
        Ok(transition)
    }

    /// Re-deal with the current pair count.
    pub fn new_game<R: Rng>(&mut self, rng: &mut R, now: DateTime<Utc>) -> Result<Transition> {
        self.configure_session(self.settings.pair_count, rng, now)
    }

    /// Handle a card selection.
    ///
    /// Selections while locked, on matched cards, or on the single face-up
    /// card are ignored and yield an empty transition. A card outside the
    /// current deck is an error and changes nothing.
    pub fn select(&mut self, card: CardId, now: DateTime<Utc>) -> Result<Transition> {
        let index = self.deck.position(card).ok_or(GameError::UnknownCard(card))?;
        let mut transition = Transition::default();

        if matches!(self.turn, TurnState::Locked { .. }) || self.faces[index] == CardFace::Matched {
            return Ok(transition);
        }
        let first = match self.turn {
            TurnState::OneSelected { card: first } if first == card => return Ok(transition),
            TurnState::OneSelected { card: first } => {
                let first_index = self.deck.position(first).ok_or(GameError::UnknownCard(first))?;
                Some((first, first_index))
            }
            _ => None,
        };

        if self.stats.start_clock(now) {
            transition.effect(Effect::StartTicker);
        }
        self.faces[index] = CardFace::Revealed;
        transition.event(GameEvent::SelectionAccepted { card });

        match first {
            None => self.turn = TurnState::OneSelected { card },
            Some((first, first_index)) => {
                self.complete_turn((first, first_index), (card, index), now, &mut transition)
            }
        }
        Ok(transition)
    }

    fn complete_turn(
        &mut self,
        (first, first_index): (CardId, usize),
        (second, second_index): (CardId, usize),
        now: DateTime<Utc>,
        transition: &mut Transition,
    ) {
        self.stats.record_move();
        let cards = self.deck.cards();

        if cards[first_index].matches(&cards[second_index]) {
            self.faces[first_index] = CardFace::Matched;
            self.faces[second_index] = CardFace::Matched;
            self.stats.record_match();
            self.turn = TurnState::Idle;
            transition.event(GameEvent::MatchResolved { first, second });

            if !self.won && self.board_complete() {
                self.won = true;
                self.stats.stop_clock(now);
                let elapsed_seconds = self.stats.elapsed_seconds(now).unwrap_or(0);
                transition.effect(Effect::StopTicker);
                transition.event(GameEvent::StatsUpdated(self.snapshot(now)));
                transition.event(GameEvent::Win {
                    elapsed: format_elapsed(elapsed_seconds),
                    elapsed_seconds,
                    moves: self.stats.moves(),
                });
                return;
            }
        } else {
            self.turn = TurnState::Locked { first, second };
            transition.event(GameEvent::MismatchShown { first, second });
            transition.effect(Effect::ScheduleRevert(RevertTicket {
                generation: self.generation,
                first,
                second,
                delay: self.settings.mismatch_delay(),
            }));
        }

        transition.event(GameEvent::StatsUpdated(self.snapshot(now)));
    }

    /// Turn a mismatched pair face-down again.
    ///
    /// Returns `None` for a stale ticket: one from an earlier session, or for
    /// cards that are no longer locked.
    pub fn resolve_mismatch(&mut self, ticket: &RevertTicket) -> Option<Transition> {
        if ticket.generation != self.generation {
            return None;
        }
        match self.turn {
            TurnState::Locked { first, second }
                if first == ticket.first && second == ticket.second =>
            {
                for id in [first, second] {
                    if let Some(index) = self.deck.position(id) {
                        self.faces[index] = CardFace::Hidden;
                    }
                }
                self.turn = TurnState::Idle;

                let mut transition = Transition::default();
                transition.event(GameEvent::MismatchResolved { first, second });
                Some(transition)
            }
            _ => None,
        }
    }

    /// Periodic clock update. Empty unless the clock is running.
    pub fn tick(&self, now: DateTime<Utc>) -> Transition {
        let mut transition = Transition::default();
        if self.stats.is_running() {
            transition.event(GameEvent::StatsUpdated(self.snapshot(now)));
        }
        transition
    }

    /// Zero moves and matched pairs and clear the clock.
    ///
    /// The deck and turn state are left as they are.
    pub fn reset_stats(&mut self, now: DateTime<Utc>) -> Transition {
        self.stats.reset();

        let mut transition = Transition::default();
        transition.effect(Effect::StopTicker);
        transition.event(GameEvent::StatsUpdated(self.snapshot(now)));
        transition
    }

    /// Freeze the clock without touching the board.
    pub fn stop_clock(&mut self, now: DateTime<Utc>) -> Transition {
        self.stats.stop_clock(now);

        let mut transition = Transition::default();
        transition.effect(Effect::StopTicker);
        transition.event(GameEvent::StatsUpdated(self.snapshot(now)));
        transition
    }

    fn board_complete(&self) -> bool {
        self.faces.iter().all(|face| *face == CardFace::Matched)
    }

    pub fn snapshot(&self, now: DateTime<Utc>) -> StatsSnapshot {
        self.stats.snapshot(now, self.deck.pair_count())
    }

    /// The board in deal order.
    pub fn card_view(&self) -> Vec<CardView> {
        self.deck
            .cards()
            .iter()
            .zip(&self.faces)
            .map(|(card, state)| CardView {
                id: card.id,
                face: card.face,
                text: card.text.clone(),
                state: *state,
                label: match (state, card.face) {
                    (CardFace::Matched, _) => "Matched".to_string(),
                    (_, Face::Term) => format!("{}: {}", Face::Term.label(), card.text),
                    (_, Face::Definition) => Face::Definition.label().to_string(),
                },
            })
            .collect()
    }

    pub fn face_of(&self, card: CardId) -> Option<CardFace> {
        self.deck.position(card).map(|index| self.faces[index])
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn turn(&self) -> TurnState {
        self.turn
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn is_won(&self) -> bool {
        self.won
    }
}
