//! Observable events for edge conversion
//!
//! Events are explicit and typed.

use std::fmt;

/// Observable events in aerograph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Configuration loaded
    ConfigLoaded,
    /// Edge built from a statement
    EdgeBuilt,
    /// Statement rejected
    EdgeRejected,
    /// Statement expanded over a variable
    VariableExpanded,
    /// Variable bound to no uids
    VariableBoundEmpty,
    /// Expansion produced more edges than the configured threshold
    VariableFanoutLarge,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::EdgeBuilt => "EDGE_BUILT",
            Event::EdgeRejected => "EDGE_REJECTED",
            Event::VariableExpanded => "VARIABLE_EXPANDED",
            Event::VariableBoundEmpty => "VARIABLE_BOUND_EMPTY",
            Event::VariableFanoutLarge => "VARIABLE_FANOUT_LARGE",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
