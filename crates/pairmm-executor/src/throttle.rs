//! Message rate admission.
//!
//! The exchange allows a fixed number of messages per rolling second.
//! Every outbound command takes one slot in a sliding window of send
//! timestamps; a command that finds the window full is either dropped
//! (quotes, arbitrage, cancels) or waits for a slot (hedges).

use std::collections::VecDeque;
use std::time::Duration;

use pairmm_core::limits::{MESSAGE_LIMIT, MESSAGE_WINDOW_MS};
use pairmm_telemetry::Metrics;
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::clock::Clock;

/// Rate limit configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThrottleConfig {
    /// Maximum messages per window.
    #[serde(default = "default_max_messages")]
    pub max_messages: u32,

    /// Window length in milliseconds. Slightly over one second so that
    /// clock skew against the exchange never costs a breach.
    #[serde(default = "default_window_ms")]
    pub window_ms: u64,

    /// Poll interval while a hedge waits for admission.
    #[serde(default = "default_hedge_poll_ms")]
    pub hedge_poll_ms: u64,
}

fn default_max_messages() -> u32 {
    MESSAGE_LIMIT
}

fn default_window_ms() -> u64 {
    MESSAGE_WINDOW_MS
}

fn default_hedge_poll_ms() -> u64 {
    100
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            max_messages: default_max_messages(),
            window_ms: default_window_ms(),
            hedge_poll_ms: default_hedge_poll_ms(),
        }
    }
}

/// Sliding-window message throttle.
pub struct MessageThrottle<C: Clock> {
    config: ThrottleConfig,
    /// Send times inside the window, oldest first.
    timestamps: VecDeque<Duration>,
    clock: C,
}

impl<C: Clock> MessageThrottle<C> {
    /// Create a new throttle.
    pub fn new(config: ThrottleConfig, clock: C) -> Self {
        Self {
            timestamps: VecDeque::with_capacity(config.max_messages as usize),
            config,
            clock,
        }
    }

    /// Try to take a slot for one message.
    ///
    /// Returns false, without recording anything, when the window is full.
    pub fn try_admit(&mut self) -> bool {
        let now = self.clock.now();
        self.prune(now);

        if self.timestamps.len() >= self.config.max_messages as usize {
            trace!(
                in_window = self.timestamps.len(),
                max = self.config.max_messages,
                "Rate window full"
            );
            return false;
        }

        self.timestamps.push_back(now);
        Metrics::rate_window(self.timestamps.len());
        true
    }

    /// Take a slot, sleeping in fixed increments until one frees up.
    ///
    /// Never gives up: while the window stays saturated the caller stalls.
    /// A warning is logged for every full window spent waiting. Returns the
    /// time spent waiting.
    pub fn admit_blocking(&mut self) -> Duration {
        let poll = Duration::from_millis(self.config.hedge_poll_ms.max(1));
        let window = self.window();
        let mut waited = Duration::ZERO;
        let mut next_warn = window;

        while !self.try_admit() {
            self.clock.sleep(poll);
            waited += poll;
            if waited >= next_warn {
                warn!(
                    waited_ms = waited.as_millis() as u64,
                    in_window = self.timestamps.len(),
                    "Still waiting for rate admission"
                );
                next_warn += window;
            }
        }

        Metrics::hedge_stall(waited.as_secs_f64() * 1000.0);
        waited
    }

    /// Messages currently inside the window.
    pub fn in_window(&mut self) -> usize {
        let now = self.clock.now();
        self.prune(now);
        self.timestamps.len()
    }

    /// Slots still free in the current window.
    pub fn remaining_capacity(&mut self) -> usize {
        (self.config.max_messages as usize).saturating_sub(self.in_window())
    }

    pub fn config(&self) -> &ThrottleConfig {
        &self.config
    }

    fn window(&self) -> Duration {
        Duration::from_millis(self.config.window_ms)
    }

    fn prune(&mut self, now: Duration) {
        let Some(cutoff) = now.checked_sub(self.window()) else {
            return;
        };
        while self.timestamps.front().is_some_and(|&t| t < cutoff) {
            self.timestamps.pop_front();
        }
    }
}
