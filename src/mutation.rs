//! Mutation aggregate
//!
//! One mutation request: statements to set, statements to delete, and an
//! optional schema change. Before any variable can be expanded, the executor
//! asks which query variables the mutation depends on.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::edge::Statement;

/// Set and delete statements plus a schema payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mutation {
    /// Statements to add
    #[serde(default)]
    pub set: Vec<Statement>,
    /// Statements to remove
    #[serde(default)]
    pub del: Vec<Statement>,
    /// Schema change, empty if none
    #[serde(default)]
    pub schema: String,
}

impl Mutation {
    /// True if there is anything to apply
    pub fn has_operations(&self) -> bool {
        !self.set.is_empty() || !self.del.is_empty() || !self.schema.is_empty()
    }

    /// Subject variables referenced anywhere, deduplicated and sorted.
    ///
    /// The order is stable regardless of statement order so variable
    /// resolution requests are reproducible.
    pub fn needed_variables(&self) -> Vec<String> {
        self.statements()
            .filter(|s| !s.subject_var.is_empty())
            .map(|s| s.subject_var.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Set statements followed by delete statements
    pub fn statements(&self) -> impl Iterator<Item = &Statement> {
        self.set.iter().chain(self.del.iter())
    }
}
