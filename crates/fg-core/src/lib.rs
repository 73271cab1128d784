//! Field Gauge core - schema audit engine.
//!
//! Audits custom object schemas in a remote org: for each selected object it
//! retrieves field metadata through the platform CLI, flags custom fields
//! whose declared size (text length or numeric precision) exceeds the limit
//! policy, pulls live records for the flagged fields, and aggregates
//! per-object, per-field usage statistics for the report emitters.
//!
//! Pipeline: [`select`] → [`classify`] → [`plan`] → [`query`] →
//! [`aggregate`], orchestrated by [`audit::run_audit`].

pub mod aggregate;
pub mod audit;
pub mod classify;
pub mod describe;
pub mod exit_codes;
pub mod logging;
pub mod plan;
pub mod policy;
pub mod query;
pub mod runner;
pub mod select;
