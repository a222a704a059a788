//! Presentation layer boundary.
//!
//! The runtime hands every engine event to a [`Presenter`]. Implement the
//! `on_*` callbacks to react to individual events, or override
//! [`Presenter::present`] to receive the raw event stream.

use glossary_core::{CardId, CardView, GameEvent, Generation, StatsSnapshot};
use tokio::sync::mpsc;

pub trait Presenter: Send {
    /// Route one event to its callback.
    fn present(&mut self, event: &GameEvent) {
        match event {
            GameEvent::SessionStarted { generation, cards } => {
                self.on_session_started(*generation, cards)
            }
            GameEvent::SelectionAccepted { card } => self.on_selection_accepted(*card),
            GameEvent::MatchResolved { first, second } => self.on_match_resolved(*first, *second),
            GameEvent::MismatchShown { first, second } => self.on_mismatch_shown(*first, *second),
            GameEvent::MismatchResolved { first, second } => {
                self.on_mismatch_resolved(*first, *second)
            }
            GameEvent::StatsUpdated(stats) => self.on_stats_updated(stats),
            GameEvent::Win { elapsed, moves, .. } => self.on_win(elapsed, *moves),
        }
    }

    /// A new board was dealt; draw every card face-down.
    fn on_session_started(&mut self, _generation: Generation, _cards: &[CardView]) {}

    /// Show the card face-up.
    fn on_selection_accepted(&mut self, _card: CardId) {}

    /// Both cards stay face-up and stop accepting input.
    fn on_match_resolved(&mut self, _first: CardId, _second: CardId) {}

    /// Both cards are face-up and the board is locked until they turn back.
    fn on_mismatch_shown(&mut self, _first: CardId, _second: CardId) {}

    /// Turn both cards face-down again.
    fn on_mismatch_resolved(&mut self, _first: CardId, _second: CardId) {}

    fn on_stats_updated(&mut self, _stats: &StatsSnapshot) {}

    fn on_win(&mut self, _elapsed: &str, _moves: u32) {}
}

/// Forwards every event over an unbounded channel.
pub struct ChannelPresenter {
    tx: mpsc::UnboundedSender<GameEvent>,
}

impl ChannelPresenter {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<GameEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Presenter for ChannelPresenter {
    fn present(&mut self, event: &GameEvent) {
        // receiver gone means nobody is rendering; drop the event
        let _ = self.tx.send(event.clone());
    }
}
