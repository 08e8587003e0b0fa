//! Periodic execution of the reconciliation pass.
//!
//! The schedule can anchor its first run at a configured instant and then
//! repeats at a fixed interval, aligning with the wall clock so passes land
//! at predictable times.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use time::OffsetDateTime;
use tracing::{Instrument as _, info_span};

/// When and how often to run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Schedule {
    /// An RFC3339 timestamp anchoring the schedule (if omitted or in the
    /// past, runs align to this anchor plus whole intervals)
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub from: Option<OffsetDateTime>,
    /// How often to run; if omitted, the task runs once and returns
    #[serde(default, with = "humantime_serde::option")]
    pub every: Option<Duration>,
}

impl Schedule {
    /// Run `f` on this schedule until it fails.
    ///
    /// With no interval configured the function runs exactly once, so a
    /// cron-style deployment can drive single passes itself. Otherwise the
    /// first run waits for the next whole interval past the anchor, then
    /// repeats forever.
    pub async fn run<T, E>(&self, f: impl AsyncFn() -> Result<T, E>) -> Result<(), E> {
        let Some(delta) = self.every else {
            f().await?;
            return Ok(());
        };

        let now = OffsetDateTime::now_utc();

        // Advance the anchor by whole intervals until it is >= now.
        let anchor = match self.from {
            Some(from) if from < now => {
                let intervals = ((now - from) / delta).ceil() as u32;
                from + delta * intervals
            }
            Some(from) => from,
            None => now,
        };

        let lead_in: Duration = (anchor - now)
            .try_into()
            .expect("schedule anchor too far in the future");
        tokio::time::sleep(lead_in).await;

        let mut interval = tokio::time::interval(delta);
        loop {
            interval.tick().await;
            f().instrument(info_span!("scheduled pass")).await?;
        }
    }
}
