//! Shared helpers for session integration tests.
//!
//! Tests run on a paused tokio clock, so revert delays and clock ticks only
//! happen when a test sleeps past them.

#![allow(dead_code)]

use glossary_core::{CardId, Catalog, Face, GameEvent, GlossaryEntry, GameSettings};
use match_runtime::{spawn_session, ChannelPresenter, RuntimeConfig, SessionHandle, SessionSnapshot};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;

/// A running session plus the events it has emitted.
pub struct TestSession {
    pub handle: SessionHandle,
    pub task: JoinHandle<()>,
    events: UnboundedReceiver<GameEvent>,
}

impl TestSession {
    /// Start a seeded session over the four-entry test catalog.
    pub fn start(pair_count: usize) -> Self {
        Self::start_with(test_catalog(), pair_count)
    }

    pub fn start_with(catalog: Catalog, pair_count: usize) -> Self {
        let config = RuntimeConfig {
            settings: GameSettings {
                pair_count,
                ..GameSettings::default()
            },
            seed: Some(7),
            ..RuntimeConfig::default()
        };
        let (presenter, events) = ChannelPresenter::new();
        let (handle, task) =
            spawn_session(&config, catalog, presenter).expect("session should start");
        Self {
            handle,
            task,
            events,
        }
    }

    /// Wait for the session to catch up, then return its state.
    pub async fn snapshot(&self) -> SessionSnapshot {
        self.handle.snapshot().await.expect("session alive")
    }

    /// Everything emitted since the last drain, once the session has caught up.
    pub async fn drain(&mut self) -> Vec<GameEvent> {
        self.snapshot().await;
        let mut events = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            events.push(event);
        }
        events
    }

    /// (term, definition) card ids for every pair on the current board.
    pub async fn pairs(&self) -> Vec<(CardId, CardId)> {
        let snapshot = self.snapshot().await;
        snapshot
            .deck
            .cards()
            .iter()
            .filter(|card| card.face == Face::Term)
            .filter_map(|card| {
                snapshot
                    .deck
                    .partner_of(card.id)
                    .map(|partner| (card.id, partner.id))
            })
            .collect()
    }
}

pub fn test_catalog() -> Catalog {
    Catalog::new(vec![
        GlossaryEntry::new("Bias", "Systematic error that may distort findings."),
        GlossaryEntry::new("Survey", "Collecting data from a sample using questionnaires."),
        GlossaryEntry::new("Ethics", "Standards ensuring responsible research conduct."),
        GlossaryEntry::new("Validity", "Measuring what you intend to measure."),
    ])
    .expect("non-empty catalog")
}

pub fn count<F>(events: &[GameEvent], pred: F) -> usize
where
    F: Fn(&GameEvent) -> bool,
{
    events.iter().filter(|event| pred(event)).count()
}

pub fn is_stats(event: &GameEvent) -> bool {
    matches!(event, GameEvent::StatsUpdated(_))
}

pub fn is_win(event: &GameEvent) -> bool {
    matches!(event, GameEvent::Win { .. })
}

/// Elapsed times carried by stats updates, in order.
pub fn elapsed_shown(events: &[GameEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|event| match event {
            GameEvent::StatsUpdated(stats) => Some(stats.elapsed.clone()),
            _ => None,
        })
        .collect()
}
