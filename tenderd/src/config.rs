//! Application configuration management.
//!
//! Configuration comes from three sources with a clear precedence:
//! environment variables override a config file, which overrides defaults.

use crate::{Cli, schedule::Schedule};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The daemon configuration, composing all component configs.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    /// Database configuration (path, creation policy)
    #[serde(default)]
    pub database: tender_sqlite::config::SqliteConfig,

    /// Reconciliation schedule (start anchor, interval)
    #[serde(default)]
    pub schedule: Schedule,

    /// How close to its end an auction must be for the ending-soon
    /// notification; the engine default (one hour) applies if omitted
    #[serde(default, with = "humantime_serde::option")]
    pub ending_soon_window: Option<Duration>,

    /// Upper bound on a single reconciliation pass. A pass that overruns is
    /// abandoned rather than allowed to block the next tick; transitions are
    /// compare-and-set, so whatever it didn't reach is picked up next time.
    #[serde(default, with = "humantime_serde::option")]
    pub pass_budget: Option<Duration>,
}

impl AppConfig {
    /// Load configuration with precedence:
    /// 1. Environment variables (highest priority)
    /// 2. Config file given by the CLI
    /// 3. Default values (lowest priority)
    ///
    /// Environment variables map `APP_<SECTION>__<KEY>` to `<section>.<key>`,
    /// e.g. `APP_SCHEDULE__EVERY=60s` sets `schedule.every`.
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        config = config.add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = &cli.config {
            if path.exists() {
                config = config.add_source(config::File::from(path.as_path()))
            } else {
                return Err(anyhow::anyhow!(
                    "Config file {} does not exist",
                    path.display()
                ));
            }
        }

        config = config.add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let built = config.build()?;
        built.try_deserialize().map_err(Into::into)
    }
}
