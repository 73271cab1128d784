//! Report emitters for Field Gauge usage statistics.
//!
//! Both emitters are pure renderers over a completed
//! [`UsageReport`](fg_common::UsageReport): they never aggregate, and the
//! same report always renders to the same bytes. Row order is the report's
//! own sorted iteration order.
//!
//! - [`csv`] renders one row per (object, field) pair
//! - [`table`] renders the same data as a fixed-width table, grouped by
//!   object with a separator after each object's rows

pub mod csv;
pub mod error;
pub mod table;

pub use csv::{render_csv, write_csv};
pub use error::{ReportError, Result};
pub use table::render_table;
