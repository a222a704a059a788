//! Deck construction for the matching game.

use crate::catalog::Catalog;
use crate::error::Result;
use crate::shuffle::{shuffle, shuffle_in_place};
use crate::types::{validate_pair_count, CardId, Face, GlossaryEntry, PairId};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One face of a glossary entry as dealt onto the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardToken {
    pub id: CardId,
    pub pair_id: PairId,
    pub face: Face,
    pub text: String,
    pub source: GlossaryEntry,
}

impl CardToken {
    fn new<R: Rng>(pair_id: PairId, face: Face, source: &GlossaryEntry, rng: &mut R) -> Self {
        let text = match face {
            Face::Term => source.term.clone(),
            Face::Definition => source.definition.clone(),
        };
        Self {
            id: CardId::random(rng),
            pair_id,
            face,
            text,
            source: source.clone(),
        }
    }

    /// Two cards match when they share a pair and show opposite faces.
    pub fn matches(&self, other: &CardToken) -> bool {
        self.pair_id == other.pair_id && self.face != other.face
    }
}

/// Ordered cards for one game session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<CardToken>,
}

impl Deck {
    /// Pick `pair_count` random entries and deal both faces of each, shuffled.
    pub fn build<R: Rng>(catalog: &Catalog, pair_count: usize, rng: &mut R) -> Result<Self> {
        validate_pair_count(pair_count, catalog.len())?;

        let selected = shuffle(catalog.entries(), rng);
        let mut cards = Vec::with_capacity(pair_count * 2);
        for entry in selected.iter().take(pair_count) {
            let pair_id = PairId::random(rng);
            cards.push(CardToken::new(pair_id, Face::Term, entry, rng));
            cards.push(CardToken::new(pair_id, Face::Definition, entry, rng));
        }
        shuffle_in_place(&mut cards, rng);

        Ok(Self { cards })
    }

    #[cfg(test)]
    pub(crate) fn from_cards(cards: Vec<CardToken>) -> Self {
        Self { cards }
    }

    pub fn cards(&self) -> &[CardToken] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of pairs dealt.
    pub fn pair_count(&self) -> usize {
        self.cards.len() / 2
    }

    /// Board position of a card.
    pub fn position(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|card| card.id == id)
    }

    pub fn get(&self, id: CardId) -> Option<&CardToken> {
        self.cards.iter().find(|card| card.id == id)
    }

    /// The other half of a card's pair.
    pub fn partner_of(&self, id: CardId) -> Option<&CardToken> {
        let card = self.get(id)?;
        self.cards.iter().find(|other| card.matches(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GameError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::{HashMap, HashSet};

    fn small_catalog() -> Catalog {
        Catalog::new(vec![
            GlossaryEntry::new("Bias", "Systematic error."),
            GlossaryEntry::new("Survey", "Questionnaires."),
            GlossaryEntry::new("Ethics", "Responsible conduct."),
            GlossaryEntry::new("Validity", "Measuring the intended thing."),
        ])
        .unwrap()
    }

    fn assert_well_formed(deck: &Deck, pair_count: usize) {
        assert_eq!(deck.len(), pair_count * 2);

        let mut faces: HashMap<PairId, Vec<Face>> = HashMap::new();
        for card in deck.cards() {
            faces.entry(card.pair_id).or_default().push(card.face);
        }
        assert_eq!(faces.len(), pair_count);
        for pair in faces.values() {
            assert_eq!(pair.len(), 2);
            assert!(pair.contains(&Face::Term));
            assert!(pair.contains(&Face::Definition));
        }

        let ids: HashSet<CardId> = deck.cards().iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), deck.len());
    }

    #[test]
    fn every_pair_count_builds_well_formed_deck() {
        let catalog = Catalog::builtin();
        let mut rng = StdRng::seed_from_u64(11);
        for n in 1..=catalog.len() {
            let deck = Deck::build(&catalog, n, &mut rng).unwrap();
            assert_well_formed(&deck, n);
            assert_eq!(deck.pair_count(), n);
        }
    }

    #[test]
    fn small_catalog_two_pairs() {
        let mut rng = StdRng::seed_from_u64(5);
        let deck = Deck::build(&small_catalog(), 2, &mut rng).unwrap();
        assert_well_formed(&deck, 2);
    }

    #[test]
    fn card_text_follows_face() {
        let mut rng = StdRng::seed_from_u64(8);
        let deck = Deck::build(&small_catalog(), 4, &mut rng).unwrap();
        for card in deck.cards() {
            match card.face {
                Face::Term => assert_eq!(card.text, card.source.term),
                Face::Definition => assert_eq!(card.text, card.source.definition),
            }
        }
    }

    #[test]
    fn rejects_out_of_range_pair_count() {
        let mut rng = StdRng::seed_from_u64(0);
        let catalog = small_catalog();
        assert_eq!(
            Deck::build(&catalog, 0, &mut rng),
            Err(GameError::InvalidPairCount {
                requested: 0,
                available: 4
            })
        );
        assert!(Deck::build(&catalog, 5, &mut rng).is_err());
    }

    #[test]
    fn rebuilding_yields_fresh_identities() {
        let catalog = Catalog::new(vec![GlossaryEntry::new("Bias", "Systematic error.")]).unwrap();
        let mut rng = StdRng::seed_from_u64(21);
        let first = Deck::build(&catalog, 1, &mut rng).unwrap();
        let second = Deck::build(&catalog, 1, &mut rng).unwrap();
        assert_ne!(first.cards()[0].pair_id, second.cards()[0].pair_id);
    }

    #[test]
    fn selection_is_not_catalog_order() {
        let catalog = Catalog::builtin();
        let first_terms: HashSet<&str> = catalog.entries()[..6]
            .iter()
            .map(|e| e.term.as_str())
            .collect();

        let mut rng = StdRng::seed_from_u64(77);
        let differs = (0..20).any(|_| {
            let deck = Deck::build(&catalog, 6, &mut rng).unwrap();
            deck.cards()
                .iter()
                .any(|c| !first_terms.contains(c.source.term.as_str()))
        });
        assert!(differs);
    }

    #[test]
    fn partner_lookup() {
        let mut rng = StdRng::seed_from_u64(2);
        let deck = Deck::build(&small_catalog(), 3, &mut rng).unwrap();
        for card in deck.cards() {
            let partner = deck.partner_of(card.id).unwrap();
            assert_eq!(partner.pair_id, card.pair_id);
            assert_eq!(partner.face, card.face.opposite());
        }
    }

    #[test]
    fn match_requires_opposite_faces() {
        let mut rng = StdRng::seed_from_u64(4);
        let entry = GlossaryEntry::new("Bias", "Systematic error.");
        let pair = PairId::random(&mut rng);
        let term = CardToken::new(pair, Face::Term, &entry, &mut rng);
        let def = CardToken::new(pair, Face::Definition, &entry, &mut rng);
        let other_term = CardToken::new(pair, Face::Term, &entry, &mut rng);

        assert!(term.matches(&def));
        assert!(!term.matches(&other_term));
    }
}
