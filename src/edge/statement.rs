//! Mutation statements as handed over by the parser
//!
//! A statement names a subject, a predicate and exactly one object form:
//! either an object identifier (node reference) or a typed literal. Empty
//! strings mean "absent" for every optional text field.

use serde::{Deserialize, Serialize};

use crate::value::{TypeId, TypedValue};

/// Opaque per-edge key/value metadata.
///
/// Copied onto the edge verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facet {
    /// Facet key
    pub key: String,
    /// Facet value bytes
    #[serde(default)]
    pub value: Vec<u8>,
    /// Facet value type tag
    #[serde(default)]
    pub val_type: u32,
}

impl Facet {
    /// Create a facet
    pub fn new(key: impl Into<String>, value: Vec<u8>, val_type: u32) -> Self {
        Self {
            key: key.into(),
            value,
            val_type,
        }
    }
}

/// One parsed mutation statement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    /// Subject xid, empty when `subject_var` is used
    #[serde(default)]
    pub subject: String,
    /// Predicate name
    pub predicate: String,
    /// Object xid for node references
    #[serde(default)]
    pub object_id: String,
    /// Literal object
    #[serde(default)]
    pub object_value: Option<TypedValue>,
    /// Declared kind of the literal, when the parser assigned one
    #[serde(default)]
    pub object_type: Option<TypeId>,
    /// Language tag
    #[serde(default)]
    pub lang: String,
    /// Label
    #[serde(default)]
    pub label: String,
    /// Facets
    #[serde(default)]
    pub facets: Vec<Facet>,
    /// Query variable bound to the subject
    #[serde(default)]
    pub subject_var: String,
}

/// How a statement's object is to be stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    /// Object identifier to resolve into a uid
    NodeReference,
    /// Literal without a language tag
    PlainLiteral,
    /// Literal with a language tag
    MultiLanguageLiteral,
    /// Neither a literal nor an object identifier
    Absent,
}

impl ObjectKind {
    /// True for both literal kinds
    pub fn is_literal(self) -> bool {
        matches!(self, ObjectKind::PlainLiteral | ObjectKind::MultiLanguageLiteral)
    }
}

impl Statement {
    /// Statement whose object is another node
    pub fn uid(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object_id: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object_id: object_id.into(),
            ..Self::default()
        }
    }

    /// Statement whose object is a literal
    pub fn literal(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        value: TypedValue,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object_value: Some(value),
            ..Self::default()
        }
    }

    /// Set the language tag
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// Set the label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Append a facet
    pub fn with_facet(mut self, facet: Facet) -> Self {
        self.facets.push(facet);
        self
    }

    /// Declare the stored kind of the literal
    pub fn with_object_type(mut self, type_id: TypeId) -> Self {
        self.object_type = Some(type_id);
        self
    }

    /// Bind the subject to a query variable instead of an xid
    pub fn with_subject_var(mut self, var: impl Into<String>) -> Self {
        self.subject.clear();
        self.subject_var = var.into();
        self
    }

    /// Decide how the object is stored.
    ///
    /// A literal always wins over an object identifier.
    pub fn classify(&self) -> ObjectKind {
        let has_value = self.object_value.is_some();
        let has_lang = !self.lang.is_empty();
        let has_object_id = !self.object_id.is_empty();

        match (has_value, has_lang, has_object_id) {
            (true, true, _) => ObjectKind::MultiLanguageLiteral,
            (true, false, _) => ObjectKind::PlainLiteral,
            (false, _, true) => ObjectKind::NodeReference,
            (false, _, false) => ObjectKind::Absent,
        }
    }

    /// Kind tag stored next to the literal bytes
    pub fn literal_type(&self) -> Option<TypeId> {
        self.object_type
            .or_else(|| self.object_value.as_ref().map(TypedValue::type_id))
    }
}
