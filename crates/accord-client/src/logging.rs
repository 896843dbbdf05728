//! Log sink - where the client reports what it did

use tracing::Level;

/// Target used for every client record
pub const LOG_TARGET: &str = "accord::client";

/// Receives one record per client event
///
/// Creations, deletions and kicks arrive at `INFO`, reads at `DEBUG`, and
/// failed calls at `ERROR`.
pub trait LogSink: Send + Sync {
    fn log(&self, level: Level, message: &str);
}

/// Forwards records to `tracing` under [`LOG_TARGET`]
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, level: Level, message: &str) {
        if level == Level::ERROR {
            tracing::error!(target: LOG_TARGET, "{message}");
        } else if level == Level::WARN {
            tracing::warn!(target: LOG_TARGET, "{message}");
        } else if level == Level::INFO {
            tracing::info!(target: LOG_TARGET, "{message}");
        } else if level == Level::DEBUG {
            tracing::debug!(target: LOG_TARGET, "{message}");
        } else {
            tracing::trace!(target: LOG_TARGET, "{message}");
        }
    }
}
