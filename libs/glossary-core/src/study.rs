//! Study mode: flip through the glossary one card at a time.

use crate::catalog::Catalog;
use crate::shuffle::shuffle;
use crate::types::{Face, GameSettings, GlossaryEntry};
use rand::Rng;
use serde::Serialize;

/// The card currently in front of the learner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudyCard<'a> {
    pub entry: &'a GlossaryEntry,
    pub position: usize,
    pub total: usize,
    pub showing: Face,
}

/// Circular cursor over a shuffled copy of the catalog.
#[derive(Debug, Clone)]
pub struct StudyNavigator {
    deck: Vec<GlossaryEntry>,
    index: usize,
    revealed: bool,
    definition_first: bool,
}

impl StudyNavigator {
    pub fn new<R: Rng>(catalog: &Catalog, definition_first: bool, rng: &mut R) -> Self {
        Self {
            deck: shuffle(catalog.entries(), rng),
            index: 0,
            revealed: definition_first,
            definition_first,
        }
    }

    /// Orientation taken from `show_definition_first`.
    pub fn from_settings<R: Rng>(catalog: &Catalog, settings: &GameSettings, rng: &mut R) -> Self {
        Self::new(catalog, settings.show_definition_first, rng)
    }

    pub fn current(&self) -> StudyCard<'_> {
        StudyCard {
            entry: &self.deck[self.index],
            position: self.index,
            total: self.deck.len(),
            showing: if self.revealed {
                Face::Definition
            } else {
                Face::Term
            },
        }
    }

    pub fn next_card(&mut self) {
        self.index = (self.index + 1) % self.deck.len();
        self.revealed = self.definition_first;
    }

    pub fn previous_card(&mut self) {
        self.index = (self.index + self.deck.len() - 1) % self.deck.len();
        self.revealed = self.definition_first;
    }

    /// New random order, back to the first card.
    pub fn reshuffle<R: Rng>(&mut self, catalog: &Catalog, rng: &mut R) {
        self.deck = shuffle(catalog.entries(), rng);
        self.index = 0;
        self.revealed = self.definition_first;
    }

    pub fn flip(&mut self) {
        self.revealed = !self.revealed;
    }

    /// Changing the orientation preference re-shows the current card.
    pub fn set_definition_first(&mut self, definition_first: bool) {
        self.definition_first = definition_first;
        self.revealed = definition_first;
    }

    pub fn definition_first(&self) -> bool {
        self.definition_first
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.deck.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deck.is_empty()
    }
}
