//! Tracing setup and the process-wide log severity counters.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Registry;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LogFormat;

const LEVELS: usize = 5;

/// Counts of emitted log events per severity.
///
/// Clones share the same counters. Counters only grow for the lifetime of
/// the process.
#[derive(Debug, Clone, Default)]
pub struct LogCounts {
    counters: Arc<[AtomicU64; LEVELS]>,
}

/// Point-in-time copy of [`LogCounts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LogCountsSnapshot {
    pub trace: u64,
    pub debug: u64,
    pub info: u64,
    pub warn: u64,
    pub error: u64,
}

impl LogCounts {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(level: &Level) -> usize {
        if *level == Level::ERROR {
            4
        } else if *level == Level::WARN {
            3
        } else if *level == Level::INFO {
            2
        } else if *level == Level::DEBUG {
            1
        } else {
            0
        }
    }

    fn record(&self, level: &Level) {
        self.counters[Self::slot(level)].fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the count for a single severity.
    pub fn get(&self, level: Level) -> u64 {
        self.counters[Self::slot(&level)].load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> LogCountsSnapshot {
        LogCountsSnapshot {
            trace: self.get(Level::TRACE),
            debug: self.get(Level::DEBUG),
            info: self.get(Level::INFO),
            warn: self.get(Level::WARN),
            error: self.get(Level::ERROR),
        }
    }
}

/// Subscriber layer feeding every event that passes the filter into [`LogCounts`].
#[derive(Debug, Clone)]
pub struct LogCountingLayer {
    counts: LogCounts,
}

impl LogCountingLayer {
    pub fn new(counts: LogCounts) -> Self {
        Self { counts }
    }
}

impl<S: Subscriber> Layer<S> for LogCountingLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        self.counts.record(event.metadata().level());
    }
}

/// Installs the global subscriber: env filter, console output and log counting.
///
/// `RUST_LOG` wins over `log_level` when set.
pub fn init_tracing(log_level: &str, log_format: LogFormat) -> LogCounts {
    let counts = LogCounts::new();
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    match log_format {
        LogFormat::Json => {
            Registry::default()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_target(true))
                .with(LogCountingLayer::new(counts.clone()))
                .init();
        }
        LogFormat::Pretty => {
            Registry::default()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .with(LogCountingLayer::new(counts.clone()))
                .init();
        }
    }

    counts
}
