//! Limit policy: which declared field sizes count as oversized.

use fg_common::LimitKind;
use std::collections::BTreeMap;

/// Threshold for one declared field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLimit {
    /// Which declared attribute the threshold applies to.
    pub kind: LimitKind,
    /// Strictly-greater-than threshold for that attribute.
    pub threshold: u32,
}

/// Policy table mapping a declared field type name to its audit threshold.
///
/// Unknown types yield `None`, meaning the type is not subject to this
/// audit. Built once per run, read-only afterward.
#[derive(Debug, Clone)]
pub struct LimitPolicy {
    limits: BTreeMap<String, FieldLimit>,
}

impl Default for LimitPolicy {
    fn default() -> Self {
        let mut limits = BTreeMap::new();
        limits.insert(
            "string".to_string(),
            FieldLimit {
                kind: LimitKind::Length,
                threshold: 250,
            },
        );
        limits.insert(
            "double".to_string(),
            FieldLimit {
                kind: LimitKind::Precision,
                threshold: 10,
            },
        );
        Self { limits }
    }
}

impl LimitPolicy {
    /// A policy with no limits at all (nothing gets flagged).
    pub fn empty() -> Self {
        Self {
            limits: BTreeMap::new(),
        }
    }

    /// Add or replace the limit for a field type.
    pub fn with_limit(mut self, field_type: impl Into<String>, kind: LimitKind, threshold: u32) -> Self {
        self.limits.insert(field_type.into(), FieldLimit { kind, threshold });
        self
    }

    /// Look up the limit for a field type.
    pub fn threshold_for(&self, field_type: &str) -> Option<&FieldLimit> {
        self.limits.get(field_type)
    }
}
