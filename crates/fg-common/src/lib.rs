//! Field Gauge shared types.
//!
//! This crate provides the data model shared between the audit engine
//! (`fg-core`) and the report emitters (`fg-report`):
//! - Classified-schema types: which custom fields exceed their limits
//! - Usage statistics: the per-object, per-field accumulator entries
//! - Output format selection for the CLI

pub mod output;
pub mod schema;
pub mod stats;

pub use output::OutputFormat;
pub use schema::{ClassifiedSchema, FieldDescriptor, LimitKind};
pub use stats::{FieldUsageStat, UsageReport};
