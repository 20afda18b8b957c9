use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;
use std::time::Duration;

/// Counters kept by a layout host.
#[derive(Debug, Default, Clone)]
pub struct LayoutMetrics {
    layout_passes: u64,
    layout_failures: u64,
    drag_sessions: u64,
    drag_moves: u64,
    paints: u64,
}

impl LayoutMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_layout(&mut self, ok: bool) {
        self.layout_passes = self.layout_passes.saturating_add(1);
        if !ok {
            self.layout_failures = self.layout_failures.saturating_add(1);
        }
    }

    pub fn record_drag_begin(&mut self) {
        self.drag_sessions = self.drag_sessions.saturating_add(1);
    }

    pub fn record_drag_move(&mut self) {
        self.drag_moves = self.drag_moves.saturating_add(1);
    }

    pub fn record_paint(&mut self) {
        self.paints = self.paints.saturating_add(1);
    }

    pub fn snapshot(&self, uptime: Duration) -> MetricSnapshot {
        MetricSnapshot {
            uptime_ms: uptime.as_millis() as u64,
            layout_passes: self.layout_passes,
            layout_failures: self.layout_failures,
            drag_sessions: self.drag_sessions,
            drag_moves: self.drag_moves,
            paints: self.paints,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub uptime_ms: u64,
    pub layout_passes: u64,
    pub layout_failures: u64,
    pub drag_sessions: u64,
    pub drag_moves: u64,
    pub paints: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "layout_metrics", self.as_fields())
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("uptime_ms".to_string(), json!(self.uptime_ms));
        map.insert("layout_passes".to_string(), json!(self.layout_passes));
        map.insert("layout_failures".to_string(), json!(self.layout_failures));
        map.insert("drag_sessions".to_string(), json!(self.drag_sessions));
        map.insert("drag_moves".to_string(), json!(self.drag_moves));
        map.insert("paints".to_string(), json!(self.paints));
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_feed_the_snapshot() {
        let mut metrics = LayoutMetrics::new();
        metrics.record_layout(true);
        metrics.record_layout(false);
        metrics.record_drag_begin();
        metrics.record_drag_move();
        metrics.record_drag_move();
        metrics.record_paint();

        let snapshot = metrics.snapshot(Duration::from_millis(1500));
        assert_eq!(snapshot.layout_passes, 2);
        assert_eq!(snapshot.layout_failures, 1);
        assert_eq!(snapshot.drag_moves, 2);

        let event = snapshot.to_log_event("room::layout.metrics");
        assert_eq!(event.message, "layout_metrics");
        assert_eq!(event.fields.get("uptime_ms"), Some(&json!(1500)));
        assert_eq!(event.fields.get("paints"), Some(&json!(1)));
    }
}
