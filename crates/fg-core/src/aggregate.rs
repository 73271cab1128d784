//! Statistics aggregator: per-object, per-field usage statistics.
//!
//! Consumes raw record batches together with the classified schema and
//! produces the run's [`UsageReport`]. All state lives in an explicit
//! [`UsageAccumulator`] threaded through the pipeline. Statistics are keyed
//! by (object, field), never by field name alone: the same field name under
//! two different objects carries independent limits and subtypes.

use fg_common::{ClassifiedSchema, FieldDescriptor, FieldUsageStat, UsageReport};
use serde_json::Value;
use std::collections::btree_map::Entry;
use tracing::debug;

use crate::query::{Record, RecordBatch};

/// Reserved per-record metadata key, never treated as a data field.
pub const ATTRIBUTES_KEY: &str = "attributes";

/// Sentinel object tag for records without a type annotation.
pub const UNKNOWN_OBJECT: &str = "Unknown";

/// Map a raw subtype code to its report label.
pub fn subtype_label(code: Option<&str>) -> &'static str {
    match code {
        Some("externallookup") => "Lookup",
        Some("plaintextarea") => "TextArea",
        _ => "",
    }
}

/// Character length of a value's string representation.
///
/// Null contributes 0; strings are measured without surrounding quotes.
fn value_length(value: &Value) -> u32 {
    match value {
        Value::Null => 0,
        Value::String(s) => s.chars().count() as u32,
        other => other.to_string().chars().count() as u32,
    }
}

/// Explicit accumulator for usage statistics.
///
/// Stats are created lazily on first observation of an (object, field) pair
/// and never deleted within a run. `declared_limit` and `type_info` come
/// from the schema lookup at creation and are not recomputed per record.
#[derive(Debug, Default)]
pub struct UsageAccumulator {
    stats: UsageReport,
}

impl UsageAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one record batch into the accumulator.
    pub fn observe_batch(&mut self, batch: &RecordBatch, schema: &ClassifiedSchema) {
        debug!(object = %batch.object, records = batch.records.len(), "aggregating batch");
        for record in &batch.records {
            self.observe_record(record, schema);
        }
    }

    fn observe_record(&mut self, record: &Record, schema: &ClassifiedSchema) {
        // The tag is resolved per record: a batch may in principle mix tags.
        let tag = record
            .get(ATTRIBUTES_KEY)
            .and_then(|attributes| attributes.get("type"))
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_OBJECT);

        for (field, value) in record {
            if field.as_str() == ATTRIBUTES_KEY {
                continue;
            }
            let observed = value_length(value);
            match self.stats.entry(tag.to_string()).or_default().entry(field.clone()) {
                Entry::Occupied(mut entry) => entry.get_mut().observe(observed),
                Entry::Vacant(entry) => {
                    let descriptor = lookup_descriptor(schema, tag, field);
                    let declared_limit = descriptor.map_or(0, FieldDescriptor::declared_limit);
                    let type_info = subtype_label(descriptor.and_then(|d| d.extra_type_info.as_deref()));
                    entry.insert(FieldUsageStat::first(observed, declared_limit, type_info.to_string()));
                }
            }
        }
    }

    /// Complete aggregation and hand back the immutable report.
    pub fn finish(self) -> UsageReport {
        self.stats
    }
}

/// Linear scan of the object's classified entry; field lists are small.
fn lookup_descriptor<'a>(
    schema: &'a ClassifiedSchema,
    object: &str,
    field: &str,
) -> Option<&'a FieldDescriptor> {
    schema.get(object)?.iter().find(|descriptor| descriptor.name == field)
}

/// Aggregate a sequence of batches into a completed report.
pub fn aggregate(batches: &[RecordBatch], schema: &ClassifiedSchema) -> UsageReport {
    let mut accumulator = UsageAccumulator::new();
    for batch in batches {
        accumulator.observe_batch(batch, schema);
    }
    accumulator.finish()
}
