//! Observed edge construction
//!
//! `EdgePipeline` wraps the pure conversion functions on `Statement`. It
//! returns exactly what they return and additionally:
//! - counts built, rejected and expanded edges
//! - logs at or above the configured level
//!
//! Rejections are logged at WARN and handed back unchanged. Nothing here
//! retries or drops a statement.

use std::fmt;
use std::io::Write;
use std::sync::Mutex;

use crate::config::MutationConfig;
use crate::edge::{DirectedEdge, Statement};
use crate::errors::{MutationError, MutationResult};
use crate::observability::{
    log_event, log_event_to, Event, MetricsRegistry, MetricsSnapshot, Severity,
};
use crate::uid::UidLookup;

type LogWriter = Mutex<Box<dyn Write + Send>>;

/// Edge construction with logging and counters
pub struct EdgePipeline {
    config: MutationConfig,
    metrics: MetricsRegistry,
    /// Log destination; stdout/stderr when unset
    writer: Option<LogWriter>,
}

impl EdgePipeline {
    /// Create a pipeline with fresh counters, logging to stdout/stderr
    pub fn new(config: MutationConfig) -> Self {
        Self {
            config,
            metrics: MetricsRegistry::new(),
            writer: None,
        }
    }

    /// Create a pipeline that writes its log lines to `writer`
    pub fn with_log_writer<W>(config: MutationConfig, writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            writer: Some(Mutex::new(Box::new(writer))),
            ..Self::new(config)
        }
    }

    /// Active configuration
    pub fn config(&self) -> &MutationConfig {
        &self.config
    }

    /// Current counter values
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Counters as a JSON object
    pub fn metrics_json(&self) -> String {
        self.metrics.to_json()
    }

    /// Same as `Statement::to_edge`
    pub fn build(&self, stmt: &Statement) -> MutationResult<DirectedEdge> {
        self.observe_single(stmt, stmt.to_edge())
    }

    /// Same as `Statement::to_edge_using`
    pub fn build_using<B>(&self, stmt: &Statement, bindings: &B) -> MutationResult<DirectedEdge>
    where
        B: UidLookup + ?Sized,
    {
        self.observe_single(stmt, stmt.to_edge_using(bindings))
    }

    /// Same as `Statement::expand_subject_var`
    ///
    /// Panics under the same condition: the statement has no subject variable.
    pub fn expand<B>(
        &self,
        stmt: &Statement,
        subject_uids: &[u64],
        bindings: &B,
    ) -> MutationResult<Vec<DirectedEdge>>
    where
        B: UidLookup + ?Sized,
    {
        let result = stmt.expand_subject_var(subject_uids, bindings);
        self.metrics.increment_expansions();

        let edges = match result {
            Ok(edges) => edges,
            Err(err) => {
                self.reject(stmt, &err);
                return Err(err);
            }
        };

        if edges.is_empty() {
            self.metrics.increment_empty_expansions();
            if self.config.warn_on_empty_expansion {
                self.log(
                    Severity::Warn,
                    Event::VariableBoundEmpty,
                    &[("predicate", &stmt.predicate), ("var", &stmt.subject_var)],
                );
            }
            return Ok(edges);
        }

        self.metrics.add_edges_built(edges.len() as u64);

        let count = edges.len().to_string();
        if edges.len() > self.config.fanout_warn_threshold {
            let threshold = self.config.fanout_warn_threshold.to_string();
            self.log(
                Severity::Warn,
                Event::VariableFanoutLarge,
                &[
                    ("edges", &count),
                    ("predicate", &stmt.predicate),
                    ("threshold", &threshold),
                    ("var", &stmt.subject_var),
                ],
            );
        }
        self.log(
            Severity::Info,
            Event::VariableExpanded,
            &[
                ("edges", &count),
                ("predicate", &stmt.predicate),
                ("var", &stmt.subject_var),
            ],
        );

        Ok(edges)
    }

    fn observe_single(
        &self,
        stmt: &Statement,
        result: MutationResult<DirectedEdge>,
    ) -> MutationResult<DirectedEdge> {
        match &result {
            Ok(edge) => {
                self.metrics.add_edges_built(1);
                if self.enabled(Severity::Trace) {
                    let entity = edge.entity.to_string();
                    self.log(
                        Severity::Trace,
                        Event::EdgeBuilt,
                        &[("attr", &edge.attr), ("entity", &entity)],
                    );
                }
            }
            Err(err) => self.reject(stmt, err),
        }
        result
    }

    fn reject(&self, stmt: &Statement, err: &MutationError) {
        self.metrics.increment_edges_rejected();
        self.log(
            Severity::Warn,
            Event::EdgeRejected,
            &[
                ("code", err.code().code()),
                ("error", &err.to_string()),
                ("predicate", &stmt.predicate),
            ],
        );
    }

    fn enabled(&self, severity: Severity) -> bool {
        severity >= self.config.log_level
    }

    fn log(&self, severity: Severity, event: Event, fields: &[(&str, &str)]) {
        let threshold = self.config.log_level;
        match &self.writer {
            Some(writer) => {
                let mut writer = writer.lock().unwrap_or_else(|e| e.into_inner());
                log_event_to(&mut **writer, threshold, severity, event, fields);
            }
            None => log_event(threshold, severity, event, fields),
        }
    }
}

impl Default for EdgePipeline {
    fn default() -> Self {
        Self::new(MutationConfig::default())
    }
}

impl fmt::Debug for EdgePipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EdgePipeline")
            .field("config", &self.config)
            .field("metrics", &self.metrics)
            .field("custom_writer", &self.writer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::uid::BindingMap;
    use crate::value::TypedValue;

    fn quiet() -> EdgePipeline {
        EdgePipeline::new(MutationConfig {
            log_level: Severity::Fatal,
            ..MutationConfig::default()
        })
    }

    #[test]
    fn test_build_matches_pure_core() {
        let pipeline = quiet();
        let stmt = Statement::literal("alice", "age", TypedValue::Int(30));
        assert_eq!(pipeline.build(&stmt).unwrap(), stmt.to_edge().unwrap());
        assert_eq!(pipeline.metrics().edges_built, 1);
    }

    #[test]
    fn test_build_using_matches_pure_core() {
        let pipeline = quiet();
        let bindings = BindingMap::from_pairs([("_:a", 7u64)]);
        let stmt = Statement::uid("_:a", "knows", "200");
        assert_eq!(
            pipeline.build_using(&stmt, &bindings).unwrap(),
            stmt.to_edge_using(&bindings).unwrap()
        );
    }

    #[test]
    fn test_rejection_counted_and_returned() {
        let pipeline = quiet();
        let stmt = Statement::uid("0", "knows", "200");
        let err = pipeline.build(&stmt).unwrap_err();
        assert_eq!(err, stmt.to_edge().unwrap_err());

        let m = pipeline.metrics();
        assert_eq!(m.edges_built, 0);
        assert_eq!(m.edges_rejected, 1);
    }

    #[test]
    fn test_expand_counts() {
        let pipeline = quiet();
        let stmt = Statement::uid("", "follows", "300").with_subject_var("v");

        let edges = pipeline.expand(&stmt, &[1, 2, 3], &BindingMap::empty()).unwrap();
        assert_eq!(edges.len(), 3);

        let none = pipeline.expand(&stmt, &[], &BindingMap::empty()).unwrap();
        assert!(none.is_empty());

        let m = pipeline.metrics();
        assert_eq!(m.expansions, 2);
        assert_eq!(m.empty_expansions, 1);
        assert_eq!(m.edges_built, 3);
    }

    #[test]
    fn test_expand_rejection() {
        let pipeline = quiet();
        let stmt = Statement::uid("", "follows", "0").with_subject_var("v");
        let err = pipeline.expand(&stmt, &[1], &BindingMap::empty()).unwrap_err();
        assert_eq!(err.code().code(), "AERO_INVALID_IDENTIFIER");
        assert_eq!(pipeline.metrics().edges_rejected, 1);
    }

    #[test]
    fn test_large_fanout_still_returns_all_edges() {
        let pipeline = EdgePipeline::new(MutationConfig {
            log_level: Severity::Fatal,
            fanout_warn_threshold: 2,
            ..MutationConfig::default()
        });
        let stmt = Statement::literal("", "tag", TypedValue::String("x".into()))
            .with_subject_var("v");
        let edges = pipeline.expand(&stmt, &[5, 6, 7], &BindingMap::empty()).unwrap();
        let entities: Vec<u64> = edges.iter().map(|e| e.entity).collect();
        assert_eq!(entities, vec![5, 6, 7]);
    }

    #[test]
    #[should_panic(expected = "without a subject variable")]
    fn test_expand_without_var_panics() {
        let pipeline = quiet();
        let stmt = Statement::uid("a", "p", "b");
        let _ = pipeline.expand(&stmt, &[1], &BindingMap::empty());
    }

    /// Clonable in-memory log destination
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn lines(&self) -> Vec<serde_json::Value> {
            let bytes = self.0.lock().unwrap().clone();
            String::from_utf8(bytes)
                .unwrap()
                .lines()
                .map(|l| serde_json::from_str(l).unwrap())
                .collect()
        }

        fn events(&self) -> Vec<String> {
            self.lines()
                .iter()
                .map(|l| l["event"].as_str().unwrap().to_string())
                .collect()
        }
    }

    fn logged(config: MutationConfig) -> (EdgePipeline, SharedBuffer) {
        let buffer = SharedBuffer::default();
        let pipeline = EdgePipeline::with_log_writer(config, buffer.clone());
        (pipeline, buffer)
    }

    #[test]
    fn test_empty_expansion_silent_by_default() {
        let (pipeline, buffer) = logged(MutationConfig {
            log_level: Severity::Trace,
            ..MutationConfig::default()
        });
        let stmt = Statement::uid("", "follows", "300").with_subject_var("v");

        pipeline.expand(&stmt, &[], &BindingMap::empty()).unwrap();

        assert!(!buffer.events().contains(&"VARIABLE_BOUND_EMPTY".to_string()));
        assert_eq!(pipeline.metrics().empty_expansions, 1);
    }

    #[test]
    fn test_empty_expansion_warns_when_enabled() {
        let (pipeline, buffer) = logged(MutationConfig {
            warn_on_empty_expansion: true,
            ..MutationConfig::default()
        });
        let stmt = Statement::uid("", "follows", "300").with_subject_var("v");

        pipeline.expand(&stmt, &[], &BindingMap::empty()).unwrap();

        let lines = buffer.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["event"], "VARIABLE_BOUND_EMPTY");
        assert_eq!(lines[0]["severity"], "WARN");
        assert_eq!(lines[0]["var"], "v");
        assert_eq!(lines[0]["predicate"], "follows");
    }

    #[test]
    fn test_large_fanout_warns() {
        let (pipeline, buffer) = logged(MutationConfig {
            fanout_warn_threshold: 2,
            ..MutationConfig::default()
        });
        let stmt = Statement::uid("", "follows", "300").with_subject_var("v");

        pipeline.expand(&stmt, &[1, 2], &BindingMap::empty()).unwrap();
        assert!(buffer.lines().is_empty());

        pipeline.expand(&stmt, &[1, 2, 3], &BindingMap::empty()).unwrap();
        let lines = buffer.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["event"], "VARIABLE_FANOUT_LARGE");
        assert_eq!(lines[0]["severity"], "WARN");
        assert_eq!(lines[0]["edges"], "3");
        assert_eq!(lines[0]["threshold"], "2");
    }

    #[test]
    fn test_rejection_logged_at_warn() {
        let (pipeline, buffer) = logged(MutationConfig::default());

        pipeline.build(&Statement::uid("0", "knows", "200")).unwrap_err();

        let lines = buffer.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["event"], "EDGE_REJECTED");
        assert_eq!(lines[0]["severity"], "WARN");
        assert_eq!(lines[0]["code"], "AERO_INVALID_IDENTIFIER");
        assert_eq!(lines[0]["predicate"], "knows");
    }

    #[test]
    fn test_level_above_warn_suppresses_rejection() {
        let (pipeline, buffer) = logged(MutationConfig {
            log_level: Severity::Error,
            warn_on_empty_expansion: true,
            ..MutationConfig::default()
        });

        pipeline.build(&Statement::uid("0", "knows", "200")).unwrap_err();
        let stmt = Statement::uid("", "follows", "300").with_subject_var("v");
        pipeline.expand(&stmt, &[], &BindingMap::empty()).unwrap();

        assert!(buffer.lines().is_empty());
        assert_eq!(pipeline.metrics().edges_rejected, 1);
    }

    #[test]
    fn test_trace_level_logs_every_edge() {
        let (pipeline, buffer) = logged(MutationConfig {
            log_level: Severity::Trace,
            ..MutationConfig::default()
        });

        pipeline.build(&Statement::uid("100", "knows", "200")).unwrap();
        let stmt = Statement::uid("", "follows", "300").with_subject_var("v");
        pipeline.expand(&stmt, &[1, 2], &BindingMap::empty()).unwrap();

        assert_eq!(buffer.events(), vec!["EDGE_BUILT", "VARIABLE_EXPANDED"]);
        let lines = buffer.lines();
        assert_eq!(lines[0]["entity"], "100");
        assert_eq!(lines[0]["severity"], "TRACE");
        assert_eq!(lines[1]["edges"], "2");
        assert_eq!(lines[1]["severity"], "INFO");
    }

    #[test]
    fn test_metrics_json() {
        let pipeline = quiet();
        pipeline
            .build(&Statement::literal("a", "p", TypedValue::Bool(true)))
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&pipeline.metrics_json()).unwrap();
        assert_eq!(parsed["edges_built"], 1);
    }
}
