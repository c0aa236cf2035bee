use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;

/// Running counters for layout passes, kept in the engine state.
#[derive(Debug, Default, Clone)]
pub struct PassMetrics {
    passes: u64,
    skipped: u64,
    sets_laid_out: u64,
    sets_hidden: u64,
    rows: u64,
    toggles: u64,
}

impl PassMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_pass(&mut self, visible: usize, hidden: usize, rows: usize) {
        self.passes = self.passes.saturating_add(1);
        self.sets_laid_out = self.sets_laid_out.saturating_add(visible as u64);
        self.sets_hidden = self.sets_hidden.saturating_add(hidden as u64);
        self.rows = self.rows.saturating_add(rows as u64);
    }

    pub fn record_skip(&mut self) {
        self.skipped = self.skipped.saturating_add(1);
    }

    pub fn record_toggle(&mut self) {
        self.toggles = self.toggles.saturating_add(1);
    }

    pub fn snapshot(&self) -> MetricSnapshot {
        MetricSnapshot {
            passes: self.passes,
            skipped: self.skipped,
            sets_laid_out: self.sets_laid_out,
            sets_hidden: self.sets_hidden,
            rows: self.rows,
            toggles: self.toggles,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub passes: u64,
    pub skipped: u64,
    pub sets_laid_out: u64,
    pub sets_hidden: u64,
    pub rows: u64,
    pub toggles: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "pass_metrics", self.as_fields())
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("passes".to_string(), json!(self.passes));
        map.insert("skipped".to_string(), json!(self.skipped));
        map.insert("sets_laid_out".to_string(), json!(self.sets_laid_out));
        map.insert("sets_hidden".to_string(), json!(self.sets_hidden));
        map.insert("rows".to_string(), json!(self.rows));
        map.insert("toggles".to_string(), json!(self.toggles));
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_accumulates_passes() {
        let mut metrics = PassMetrics::new();
        metrics.record_pass(3, 1, 2);
        metrics.record_pass(2, 2, 1);
        metrics.record_skip();

        let snap = metrics.snapshot();
        assert_eq!(snap.passes, 2);
        assert_eq!(snap.skipped, 1);
        assert_eq!(snap.sets_laid_out, 5);
        assert_eq!(snap.sets_hidden, 3);
        assert_eq!(snap.rows, 3);
    }

    #[test]
    fn snapshot_event_carries_counters() {
        let mut metrics = PassMetrics::new();
        metrics.record_toggle();
        let event = metrics.snapshot().to_log_event("storage::engine.metrics");
        assert_eq!(event.message, "pass_metrics");
        assert_eq!(event.fields["toggles"], json!(1));
    }
}
