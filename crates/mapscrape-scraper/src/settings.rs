use std::time::Duration;

use mapscrape_core::{AppConfig, WaitMode};

/// Interval between readiness checks in [`WaitMode::Poll`].
pub const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Timing and termination knobs for one browser session.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub navigation_timeout: Duration,
    pub settle_after_navigation: Duration,
    pub results_timeout: Duration,
    pub settle_after_typing: Duration,
    pub scroll_pause: Duration,
    pub detail_pause: Duration,
    pub scroll_delta: i64,
    /// Consecutive no-growth scrolls after which collection stops.
    pub stall_limit: u32,
    pub wait_mode: WaitMode,
    pub poll_interval: Duration,
}

impl SessionSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            navigation_timeout: Duration::from_secs(config.navigation_timeout_secs),
            settle_after_navigation: Duration::from_millis(config.settle_after_navigation_ms),
            results_timeout: Duration::from_secs(config.results_timeout_secs),
            settle_after_typing: Duration::from_millis(config.settle_after_typing_ms),
            scroll_pause: Duration::from_millis(config.scroll_pause_ms),
            detail_pause: Duration::from_millis(config.detail_pause_ms),
            scroll_delta: config.scroll_delta,
            stall_limit: config.stall_limit.max(1),
            wait_mode: config.wait_mode,
            poll_interval: POLL_INTERVAL,
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            navigation_timeout: Duration::from_secs(30),
            settle_after_navigation: Duration::from_millis(3000),
            results_timeout: Duration::from_secs(30),
            settle_after_typing: Duration::from_millis(2000),
            scroll_pause: Duration::from_millis(2000),
            detail_pause: Duration::from_millis(3000),
            scroll_delta: 10_000,
            stall_limit: 10,
            wait_mode: WaitMode::Fixed,
            poll_interval: POLL_INTERVAL,
        }
    }
}
