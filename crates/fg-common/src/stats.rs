//! Usage statistics: the terminal artifact of a run.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Accumulated usage statistics for one (object, field) pair.
///
/// Created lazily on the first observation of the field, updated by every
/// subsequent observation, never deleted within a run. `declared_limit` and
/// `type_info` are schema-derived and fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldUsageStat {
    /// Longest observed character length across all records.
    pub longest: u32,

    /// Shortest observed character length across all records.
    pub shortest: u32,

    /// Number of records observed carrying this field.
    pub count: u64,

    /// Declared limit from the classified schema (0 when unclassified).
    pub declared_limit: u32,

    /// Human label for the field's subtype hint (empty when none).
    pub type_info: String,
}

impl FieldUsageStat {
    /// First observation of a field: longest == shortest == observed.
    pub fn first(observed: u32, declared_limit: u32, type_info: String) -> Self {
        Self {
            longest: observed,
            shortest: observed,
            count: 1,
            declared_limit,
            type_info,
        }
    }

    /// Fold one more observed length into the stat.
    pub fn observe(&mut self, observed: u32) {
        self.longest = self.longest.max(observed);
        self.shortest = self.shortest.min(observed);
        self.count += 1;
    }
}

/// Object name → field name → usage stat.
///
/// Immutable once aggregation completes; iteration order is sorted on both
/// levels, which is what the emitters rely on for stable output.
pub type UsageReport = BTreeMap<String, BTreeMap<String, FieldUsageStat>>;
