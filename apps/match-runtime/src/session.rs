//! Game session task.
//!
//! One tokio task owns the [`MatchEngine`] and processes commands one at a
//! time, so the engine needs no locking. The task also owns the two timers:
//! the mismatch revert delay and the stats clock tick.

use std::pin::Pin;
use std::time::Duration;

use chrono::{DateTime, Utc};
use glossary_core::{
    CardId, CardView, Catalog, Deck, Effect, GameError, GameSettings, Generation, MatchEngine,
    RevertTicket, StatsSnapshot, Transition, TurnState, PAIR_COUNT_PRESETS,
};
use rand::rngs::StdRng;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior, Sleep};
use tracing::{debug, info, warn};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::presenter::Presenter;

/// Commands accepted by the session task.
#[derive(Debug)]
pub enum SessionCommand {
    Configure {
        pair_count: usize,
        reply: oneshot::Sender<std::result::Result<(), GameError>>,
    },
    NewGame,
    Select(CardId),
    ResetStats,
    StopClock,
    Snapshot {
        reply: oneshot::Sender<SessionSnapshot>,
    },
    Shutdown,
}

/// Full view of the session, for presenters that poll.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub generation: Generation,
    pub turn: TurnState,
    pub stats: StatsSnapshot,
    pub cards: Vec<CardView>,
    pub deck: Deck,
    pub won: bool,
    pub revert_pending: bool,
    pub clock_ticking: bool,
}

/// Cloneable handle for sending commands to a running session.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: mpsc::UnboundedSender<SessionCommand>,
}

impl SessionHandle {
    /// Deal a new board with `pair_count` pairs.
    pub async fn configure(&self, pair_count: usize) -> Result<()> {
        let (reply, rx) = oneshot::channel();
        self.send(SessionCommand::Configure { pair_count, reply })?;
        rx.await.map_err(|_| RuntimeError::SessionClosed)??;
        Ok(())
    }

    /// Re-deal with the current pair count.
    pub fn new_game(&self) -> Result<()> {
        self.send(SessionCommand::NewGame)
    }

    pub fn select(&self, card: CardId) -> Result<()> {
        self.send(SessionCommand::Select(card))
    }

    pub fn reset_stats(&self) -> Result<()> {
        self.send(SessionCommand::ResetStats)
    }

    pub fn stop_clock(&self) -> Result<()> {
        self.send(SessionCommand::StopClock)
    }

    /// Current state, after every previously sent command has been handled.
    pub async fn snapshot(&self) -> Result<SessionSnapshot> {
        let (reply, rx) = oneshot::channel();
        self.send(SessionCommand::Snapshot { reply })?;
        rx.await.map_err(|_| RuntimeError::SessionClosed)
    }

    pub fn shutdown(&self) -> Result<()> {
        self.send(SessionCommand::Shutdown)
    }

    fn send(&self, command: SessionCommand) -> Result<()> {
        self.tx.send(command).map_err(|_| RuntimeError::SessionClosed)
    }
}

/// Deal the first board and start the session task.
///
/// The presenter receives the opening board before this returns.
pub fn spawn_session<P>(
    config: &RuntimeConfig,
    catalog: Catalog,
    mut presenter: P,
) -> Result<(SessionHandle, JoinHandle<()>)>
where
    P: Presenter + 'static,
{
    let clock = SessionClock::start();
    let mut rng = config.rng();
    let engine = MatchEngine::new(catalog, config.settings.clone(), &mut rng)?;
    info!(
        pair_count = config.settings.pair_count,
        generation = %engine.generation(),
        "Session started"
    );
    warn_unusual_board(engine.settings());
    for event in &engine.announce(clock.now()).events {
        presenter.present(event);
    }

    let (tx, commands) = mpsc::unbounded_channel();
    let actor = SessionActor {
        tick_interval: engine.settings().tick_interval(),
        engine,
        presenter,
        rng,
        clock,
        commands,
        revert: None,
        ticker: None,
    };
    let task = tokio::spawn(actor.run());

    Ok((SessionHandle { tx }, task))
}

/// Wall-clock timestamps driven by tokio's clock.
#[derive(Debug, Clone, Copy)]
struct SessionClock {
    started_at: DateTime<Utc>,
    base: Instant,
}

impl SessionClock {
    fn start() -> Self {
        Self {
            started_at: Utc::now(),
            base: Instant::now(),
        }
    }

    fn now(&self) -> DateTime<Utc> {
        let elapsed = Instant::now().saturating_duration_since(self.base);
        chrono::Duration::from_std(elapsed)
            .map(|elapsed| self.started_at + elapsed)
            .unwrap_or(self.started_at)
    }
}

fn warn_unusual_board(settings: &GameSettings) {
    if !settings.is_preset_board() {
        warn!(
            pair_count = settings.pair_count,
            presets = ?PAIR_COUNT_PRESETS,
            "Pair count is not a standard board size"
        );
    }
}

struct PendingRevert {
    ticket: RevertTicket,
    sleep: Pin<Box<Sleep>>,
}

struct SessionActor<P> {
    engine: MatchEngine,
    presenter: P,
    rng: StdRng,
    clock: SessionClock,
    commands: mpsc::UnboundedReceiver<SessionCommand>,
    revert: Option<PendingRevert>,
    ticker: Option<Interval>,
    tick_interval: Duration,
}

impl<P: Presenter> SessionActor<P> {
    async fn run(mut self) {
        loop {
            tokio::select! {
                biased;

                ticket = revert_due(&mut self.revert) => {
                    self.revert = None;
                    match self.engine.resolve_mismatch(&ticket) {
                        Some(transition) => self.apply(transition),
                        None => debug!(generation = %ticket.generation, "Dropping stale revert"),
                    }
                }
                _ = next_tick(&mut self.ticker) => {
                    let transition = self.engine.tick(self.clock.now());
                    self.apply(transition);
                }
                command = self.commands.recv() => match command {
                    Some(SessionCommand::Shutdown) | None => break,
                    Some(command) => self.handle(command),
                },
            }
        }
        debug!(generation = %self.engine.generation(), "Session closed");
    }

    fn handle(&mut self, command: SessionCommand) {
        let now = self.clock.now();
        match command {
            SessionCommand::Configure { pair_count, reply } => {
                let result = self.engine.configure_session(pair_count, &mut self.rng, now);
                let _ = reply.send(self.finish_configure(pair_count, result));
            }
            SessionCommand::NewGame => {
                let pair_count = self.engine.settings().pair_count;
                let result = self.engine.new_game(&mut self.rng, now);
                let _ = self.finish_configure(pair_count, result);
            }
            SessionCommand::Select(card) => match self.engine.select(card, now) {
                Ok(transition) if transition.is_empty() => {
                    debug!(%card, turn = ?self.engine.turn(), "Selection ignored");
                }
                Ok(transition) => self.apply(transition),
                Err(e) => warn!(error = %e, "Dropping selection"),
            },
            SessionCommand::ResetStats => {
                let transition = self.engine.reset_stats(now);
                self.apply(transition);
            }
            SessionCommand::StopClock => {
                let transition = self.engine.stop_clock(now);
                self.apply(transition);
            }
            SessionCommand::Snapshot { reply } => {
                let _ = reply.send(self.snapshot());
            }
            SessionCommand::Shutdown => {}
        }
    }

    fn finish_configure(
        &mut self,
        pair_count: usize,
        result: glossary_core::Result<Transition>,
    ) -> std::result::Result<(), GameError> {
        match result {
            Ok(transition) => {
                info!(pair_count, generation = %self.engine.generation(), "Session configured");
                warn_unusual_board(self.engine.settings());
                self.apply(transition);
                Ok(())
            }
            Err(e) => {
                warn!(pair_count, error = %e, "Rejected session configuration");
                Err(e)
            }
        }
    }

    /// Arm or cancel timers, then hand the events to the presenter.
    fn apply(&mut self, transition: Transition) {
        for effect in transition.effects {
            match effect {
                Effect::ScheduleRevert(ticket) => {
                    self.revert = Some(PendingRevert {
                        sleep: Box::pin(tokio::time::sleep(ticket.delay)),
                        ticket,
                    });
                }
                Effect::CancelRevert => self.revert = None,
                Effect::StartTicker => {
                    let mut ticker = tokio::time::interval_at(
                        Instant::now() + self.tick_interval,
                        self.tick_interval,
                    );
                    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                    self.ticker = Some(ticker);
                }
                Effect::StopTicker => self.ticker = None,
            }
        }

        for event in &transition.events {
            if let glossary_core::GameEvent::Win { elapsed, moves, .. } = event {
                info!(%elapsed, moves, generation = %self.engine.generation(), "Board cleared");
            }
            self.presenter.present(event);
        }
    }

    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            generation: self.engine.generation(),
            turn: self.engine.turn(),
            stats: self.engine.snapshot(self.clock.now()),
            cards: self.engine.card_view(),
            deck: self.engine.deck().clone(),
            won: self.engine.is_won(),
            revert_pending: self.revert.is_some(),
            clock_ticking: self.ticker.is_some(),
        }
    }
}

async fn revert_due(pending: &mut Option<PendingRevert>) -> RevertTicket {
    match pending {
        Some(pending) => {
            pending.sleep.as_mut().await;
            pending.ticket.clone()
        }
        None => std::future::pending().await,
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending().await,
    }
}
