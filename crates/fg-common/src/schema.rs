//! Classified-schema data model.
//!
//! A [`FieldDescriptor`] exists only for fields that are custom AND whose
//! declared size exceeds the limit policy's threshold for their type. The
//! descriptor identity is the (object name, field name) pair: the same field
//! name under two different objects is two different descriptors.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which declared attribute a limit constrains.
///
/// Computed once during classification so that type semantics are never
/// re-derived from string comparisons at aggregation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitKind {
    /// Limit applies to the declared text length.
    Length,
    /// Limit applies to the declared numeric precision.
    Precision,
}

/// One custom field whose declared size exceeds its type's policy threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field API name.
    pub name: String,

    /// Declared field type as reported by the describe service.
    pub field_type: String,

    /// Which declared attribute the policy threshold applied to.
    pub limit_kind: LimitKind,

    /// Declared maximum text length, when the type carries one.
    pub declared_length: Option<u32>,

    /// Declared numeric precision, when the type carries one.
    pub declared_precision: Option<u32>,

    /// Raw subtype hint from the describe service (e.g. "externallookup").
    pub extra_type_info: Option<String>,
}

impl FieldDescriptor {
    /// The declared limit designated by the field's limit kind.
    ///
    /// Classification guarantees the designated attribute was present, so a
    /// missing value here only occurs on hand-built descriptors; it reads
    /// as a declared limit of zero rather than a panic.
    pub fn declared_limit(&self) -> u32 {
        match self.limit_kind {
            LimitKind::Length => self.declared_length.unwrap_or(0),
            LimitKind::Precision => self.declared_precision.unwrap_or(0),
        }
    }
}

/// Object name to classified fields, in describe (source) order.
///
/// Built once per run and read-only afterward. The sorted keying makes the
/// downstream report deterministic regardless of the order in which the
/// parallel describe calls complete.
pub type ClassifiedSchema = BTreeMap<String, Vec<FieldDescriptor>>;
