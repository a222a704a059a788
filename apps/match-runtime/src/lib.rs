//! Async runtime for the glossary matching game.
//!
//! Drives a [`glossary_core::MatchEngine`] inside a single tokio task and
//! forwards its events to a presentation layer.

pub mod config;
pub mod error;
pub mod presenter;
pub mod session;
pub mod telemetry;

pub use config::RuntimeConfig;
pub use error::{ConfigError, Result, RuntimeError};
pub use presenter::{ChannelPresenter, Presenter};
pub use session::{spawn_session, SessionCommand, SessionHandle, SessionSnapshot};

use glossary_core::StudyNavigator;
use tokio::task::JoinHandle;

/// Read configuration from the environment, set up logging, load the
/// glossary and start a session rendering to `presenter`.
pub async fn start<P>(presenter: P) -> anyhow::Result<(SessionHandle, JoinHandle<()>)>
where
    P: Presenter + 'static,
{
    let config = RuntimeConfig::from_env()?;
    telemetry::init_tracing(&config.log_filter);

    tracing::info!("Loading glossary...");
    let catalog = config.load_catalog()?;
    tracing::info!(entries = catalog.len(), "Glossary loaded");

    Ok(spawn_session(&config, catalog, presenter)?)
}

/// Read configuration, set up logging and open study mode over the
/// configured glossary.
pub fn start_study() -> anyhow::Result<StudyNavigator> {
    let config = RuntimeConfig::from_env()?;
    telemetry::init_tracing(&config.log_filter);

    let catalog = config.load_catalog()?;
    let navigator = config.study_navigator(&catalog);
    tracing::info!(
        entries = navigator.len(),
        definition_first = navigator.definition_first(),
        "Study mode ready"
    );
    Ok(navigator)
}
