//! Runtime configuration read from the environment.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context;
use glossary_core::{Catalog, GameSettings, StudyNavigator};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::ConfigError;

pub const PAIR_COUNT_VAR: &str = "MATCH_PAIR_COUNT";
pub const MISMATCH_DELAY_VAR: &str = "MATCH_MISMATCH_DELAY_MS";
pub const TICK_INTERVAL_VAR: &str = "MATCH_TICK_INTERVAL_MS";
pub const DEFINITION_FIRST_VAR: &str = "MATCH_SHOW_DEFINITION_FIRST";
pub const SEED_VAR: &str = "MATCH_SEED";
pub const CATALOG_VAR: &str = "MATCH_CATALOG";
pub const LOG_VAR: &str = "RUST_LOG";

/// Settings for one game runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub settings: GameSettings,
    /// Fixed RNG seed; OS entropy when unset.
    pub seed: Option<u64>,
    /// Glossary file to load instead of the built-in one.
    pub catalog_path: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            settings: GameSettings::default(),
            seed: None,
            catalog_path: None,
            log_filter: "info".to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Load from the process environment, honoring a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from any key lookup. Unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let settings = &mut config.settings;

        if let Some(value) = parse_var(&lookup, PAIR_COUNT_VAR)? {
            settings.pair_count = value;
        }
        if let Some(value) = parse_var(&lookup, MISMATCH_DELAY_VAR)? {
            settings.mismatch_delay_ms = value;
        }
        if let Some(value) = parse_var(&lookup, TICK_INTERVAL_VAR)? {
            settings.tick_interval_ms = value;
        }
        if let Some(raw) = lookup(DEFINITION_FIRST_VAR) {
            settings.show_definition_first = parse_bool(&raw).ok_or(ConfigError::InvalidValue {
                key: DEFINITION_FIRST_VAR,
                value: raw,
            })?;
        }
        if settings.tick_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: TICK_INTERVAL_VAR,
                value: "0".to_string(),
            });
        }

        config.seed = parse_var(&lookup, SEED_VAR)?;
        config.catalog_path = lookup(CATALOG_VAR).map(PathBuf::from);
        if let Some(filter) = lookup(LOG_VAR) {
            config.log_filter = filter;
        }

        Ok(config)
    }

    /// The configured glossary: a `.json` or markdown file, or the built-in catalog.
    pub fn load_catalog(&self) -> anyhow::Result<Catalog> {
        match &self.catalog_path {
            None => Ok(Catalog::builtin()),
            Some(path) => load_catalog_file(path),
        }
    }

    /// Study mode over `catalog`, showing definitions first when configured.
    pub fn study_navigator(&self, catalog: &Catalog) -> StudyNavigator {
        StudyNavigator::from_settings(catalog, &self.settings, &mut self.rng())
    }

    /// RNG for dealing, seeded when a seed is configured.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

fn load_catalog_file(path: &Path) -> anyhow::Result<Catalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read glossary {}", path.display()))?;

    let catalog = if path.extension().is_some_and(|ext| ext == "json") {
        Catalog::from_json(&content)
    } else {
        Catalog::from_markdown(&content)
    };
    catalog.with_context(|| format!("failed to load glossary {}", path.display()))
}

fn parse_var<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let config = RuntimeConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, RuntimeConfig::default());
        assert_eq!(config.settings.pair_count, 12);
    }

    #[test]
    fn reads_all_variables() {
        let config = RuntimeConfig::from_lookup(lookup(&[
            (PAIR_COUNT_VAR, "8"),
            (MISMATCH_DELAY_VAR, "500"),
            (TICK_INTERVAL_VAR, "250"),
            (DEFINITION_FIRST_VAR, "yes"),
            (SEED_VAR, "42"),
            (CATALOG_VAR, "glossary.md"),
            (LOG_VAR, "debug"),
        ]))
        .unwrap();

        assert_eq!(config.settings.pair_count, 8);
        assert_eq!(config.settings.mismatch_delay_ms, 500);
        assert_eq!(config.settings.tick_interval_ms, 250);
        assert!(config.settings.show_definition_first);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.catalog_path, Some(PathBuf::from("glossary.md")));
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn rejects_unparseable_number() {
        let err = RuntimeConfig::from_lookup(lookup(&[(PAIR_COUNT_VAR, "twelve")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: PAIR_COUNT_VAR,
                value: "twelve".to_string()
            }
        );
    }

    #[test]
    fn rejects_bad_bool_and_zero_tick() {
        assert!(RuntimeConfig::from_lookup(lookup(&[(DEFINITION_FIRST_VAR, "maybe")])).is_err());
        assert!(RuntimeConfig::from_lookup(lookup(&[(TICK_INTERVAL_VAR, "0")])).is_err());
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        use rand::Rng;

        let config = RuntimeConfig {
            seed: Some(5),
            ..RuntimeConfig::default()
        };
        let a: u64 = config.rng().random();
        let b: u64 = config.rng().random();
        assert_eq!(a, b);
    }

    #[test]
    fn definition_first_flag_orients_study_cards() {
        use glossary_core::Face;

        let catalog = Catalog::builtin();
        let terms_first = RuntimeConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(
            terms_first.study_navigator(&catalog).current().showing,
            Face::Term
        );

        let definitions_first =
            RuntimeConfig::from_lookup(lookup(&[(DEFINITION_FIRST_VAR, "true")])).unwrap();
        let mut nav = definitions_first.study_navigator(&catalog);
        assert_eq!(nav.current().showing, Face::Definition);
        nav.flip();
        nav.next_card();
        assert_eq!(nav.current().showing, Face::Definition);
    }

    #[test]
    fn builtin_catalog_without_path() {
        let catalog = RuntimeConfig::default().load_catalog().unwrap();
        assert_eq!(catalog.len(), 36);
    }

    #[test]
    fn loads_markdown_and_json_files() {
        let dir = std::env::temp_dir().join(format!("match-runtime-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let md = dir.join("glossary.md");
        std::fs::write(&md, "T: Bias\nD: Systematic error.\n").unwrap();
        let json = dir.join("glossary.json");
        std::fs::write(&json, r#"[{"term": "Survey", "definition": "Questionnaires."}]"#).unwrap();

        let from_md = RuntimeConfig {
            catalog_path: Some(md),
            ..RuntimeConfig::default()
        };
        assert_eq!(from_md.load_catalog().unwrap().entries()[0].term, "Bias");

        let from_json = RuntimeConfig {
            catalog_path: Some(json),
            ..RuntimeConfig::default()
        };
        assert_eq!(from_json.load_catalog().unwrap().entries()[0].term, "Survey");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_file_reports_path() {
        let config = RuntimeConfig {
            catalog_path: Some(PathBuf::from("/nonexistent/glossary.md")),
            ..RuntimeConfig::default()
        };
        let err = config.load_catalog().unwrap_err();
        assert!(err.to_string().contains("/nonexistent/glossary.md"));
    }
}
