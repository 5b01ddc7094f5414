//! Observability for aerograph
//!
//! - Structured logging (JSON lines)
//! - Monotonic counters
//! - Typed events
//!
//! Nothing in `uid`, `value` or `edge` logs. Only the pipeline layer, which
//! knows the configured level, emits events.

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};

use std::io::Write;

/// Log an event at `severity` if it clears `threshold`
pub fn log_event(threshold: Severity, severity: Severity, event: Event, fields: &[(&str, &str)]) {
    if severity >= threshold {
        Logger::log(severity, event.as_str(), fields);
    }
}

/// Same as `log_event`, writing to `writer` instead of stdout/stderr
pub fn log_event_to<W: Write + ?Sized>(
    writer: &mut W,
    threshold: Severity,
    severity: Severity,
    event: Event,
    fields: &[(&str, &str)],
) {
    if severity >= threshold {
        Logger::log_to_writer(severity, event.as_str(), fields, writer);
    }
}
