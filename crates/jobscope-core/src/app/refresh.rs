//! AutoRefresh - 定期的な再読込
//!
//! # フロー
//! 1. interval ごとに tick
//! 2. `Reloader::reload()` を呼ぶ（失敗はログのみ、スケジュールは継続）
//! 3. `stop()` または drop でタスクを abort

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::error::JobscopeError;
use crate::ports::Reloader;

/// Auto-refresh interval: off, 10s, 30s or 60s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "RefreshSetting")]
pub enum RefreshInterval {
    Disabled,
    #[default]
    Secs10,
    Secs30,
    Secs60,
}

impl RefreshInterval {
    pub fn period(self) -> Option<Duration> {
        match self {
            RefreshInterval::Disabled => None,
            RefreshInterval::Secs10 => Some(Duration::from_secs(10)),
            RefreshInterval::Secs30 => Some(Duration::from_secs(30)),
            RefreshInterval::Secs60 => Some(Duration::from_secs(60)),
        }
    }

    fn from_secs(secs: u64) -> Result<Self, JobscopeError> {
        match secs {
            0 => Ok(RefreshInterval::Disabled),
            10 => Ok(RefreshInterval::Secs10),
            30 => Ok(RefreshInterval::Secs30),
            60 => Ok(RefreshInterval::Secs60),
            other => Err(invalid_interval(other)),
        }
    }
}

fn invalid_interval(value: impl fmt::Display) -> JobscopeError {
    JobscopeError::InvalidConfig {
        key: "refresh",
        message: format!("expected one of off, 10, 30, 60; got {value}"),
    }
}

impl FromStr for RefreshInterval {
    type Err = JobscopeError;

    /// Accepts `off` / `disabled` / `0`, or seconds with an optional `s` suffix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        if s == "off" || s == "disabled" {
            return Ok(RefreshInterval::Disabled);
        }
        let secs = s
            .strip_suffix('s')
            .unwrap_or(&s)
            .parse::<u64>()
            .map_err(|_| invalid_interval(&s))?;
        Self::from_secs(secs)
    }
}

impl fmt::Display for RefreshInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.period() {
            None => f.write_str("off"),
            Some(d) => write!(f, "{}s", d.as_secs()),
        }
    }
}

/// YAML may carry the interval as a number or a string.
#[derive(Deserialize)]
#[serde(untagged)]
enum RefreshSetting {
    Seconds(u64),
    Name(String),
}

impl TryFrom<RefreshSetting> for RefreshInterval {
    type Error = JobscopeError;

    fn try_from(setting: RefreshSetting) -> Result<Self, Self::Error> {
        match setting {
            RefreshSetting::Seconds(secs) => Self::from_secs(secs),
            RefreshSetting::Name(name) => name.parse(),
        }
    }
}

/// Handle to a running refresh schedule.
///
/// The schedule is cancelled on `stop()` or when the handle is dropped.
pub struct AutoRefresh {
    interval: RefreshInterval,
    handle: Option<JoinHandle<()>>,
}

impl AutoRefresh {
    /// Start calling `reloader` every `interval`. The first reload happens one
    /// interval after the call. `Disabled` schedules nothing.
    pub fn spawn(interval: RefreshInterval, reloader: Arc<dyn Reloader>) -> Self {
        let handle = interval.period().map(|period| {
            tracing::debug!(%interval, "auto refresh started");
            tokio::spawn(run(period, reloader))
        });
        Self { interval, handle }
    }

    pub fn interval(&self) -> RefreshInterval {
        self.interval
    }

    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            tracing::debug!(interval = %self.interval, "auto refresh stopped");
        }
    }
}

impl Drop for AutoRefresh {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run(period: Duration, reloader: Arc<dyn Reloader>) {
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        if let Err(err) = reloader.reload().await {
            tracing::warn!(error = %err, "auto refresh reload failed");
        }
    }
}
