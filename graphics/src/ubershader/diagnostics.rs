//! Warning sinks for material resolution.
//!
//! Resolution never fails on an unsupported feature combination; it drops
//! features and reports each drop through a [`DiagnosticSink`].

use parking_lot::Mutex;

/// Log target used by [`LogSink`].
pub const LOG_TARGET: &str = "ubermat::ubershader";

/// Receiver of human-readable resolution warnings.
pub trait DiagnosticSink: Send + Sync {
    /// Report one warning.
    fn warn(&self, message: &str);
}

/// Forwards warnings to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn warn(&self, message: &str) {
        log::warn!(target: LOG_TARGET, "{message}");
    }
}

/// Stores warnings in memory, in the order they were reported.
#[derive(Debug, Default)]
pub struct CollectingSink {
    messages: Mutex<Vec<String>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the warnings reported so far.
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    /// Number of warnings reported so far.
    pub fn len(&self) -> usize {
        self.messages.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all stored warnings.
    pub fn clear(&self) {
        self.messages.lock().clear();
    }

    /// Whether any warning contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.messages.lock().iter().any(|m| m.contains(needle))
    }
}

impl DiagnosticSink for CollectingSink {
    fn warn(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_sink_keeps_order() {
        let sink = CollectingSink::new();
        sink.warn("first");
        sink.warn("second");
        assert_eq!(sink.messages(), vec!["first", "second"]);
        assert!(sink.contains("sec"));

        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn test_log_sink_is_object_safe() {
        let sink: &dyn DiagnosticSink = &LogSink;
        sink.warn("logged");
    }
}
