//! Audit pipeline: selection through aggregation.
//!
//! Each stage's output is passed explicitly to the next; there is no shared
//! state between stages. Collaborator failures degrade to skipped units of
//! work with a logged warning and never abort the run.

use std::time::Duration;

use fg_common::{ClassifiedSchema, UsageReport};
use tracing::{info, warn};

use crate::aggregate::aggregate;
use crate::classify::classify_fields;
use crate::describe::parse_describe;
use crate::plan::plan_queries;
use crate::policy::LimitPolicy;
use crate::query::{execute_queries, RecordBatch};
use crate::runner::{CliConfig, CliRunner};
use crate::select::{select_objects, Selection};

/// Options for one audit run.
#[derive(Debug, Clone)]
pub struct AuditOptions {
    /// How the audited objects are chosen.
    pub selection: Selection,

    /// Limit policy the classifier applies.
    pub policy: LimitPolicy,

    /// Platform CLI binary to spawn.
    pub sf_bin: String,

    /// Per-call timeout.
    pub timeout: Duration,

    /// Fan-out bound for describe/query calls.
    pub jobs: usize,
}

impl AuditOptions {
    /// Options with the default policy, binary, timeout, and fan-out.
    pub fn new(selection: Selection) -> Self {
        Self {
            selection,
            policy: LimitPolicy::default(),
            sf_bin: "sf".to_string(),
            timeout: Duration::from_secs(crate::runner::DEFAULT_TIMEOUT_SECS),
            jobs: crate::runner::DEFAULT_MAX_PARALLEL,
        }
    }
}

/// Run the full audit pipeline and return the completed report.
pub fn run_audit(options: &AuditOptions) -> UsageReport {
    let runner = CliRunner::new(
        &options.sf_bin,
        CliConfig {
            timeout: options.timeout,
            max_parallel: options.jobs,
            ..CliConfig::default()
        },
    );

    let objects = select_objects(&runner, &options.selection);
    if objects.is_empty() {
        warn!("no objects selected, report will be empty");
    }

    let schema = classify_objects(&runner, &objects, &options.policy);
    let queries = plan_queries(&schema);
    info!(
        objects = objects.len(),
        flagged_objects = queries.len(),
        "planned record queries"
    );

    let mut batches = execute_queries(&runner, &queries);
    sort_batches(&mut batches);

    aggregate(&batches, &schema)
}

/// Describe each object in parallel and classify the results.
///
/// Objects whose describe call fails or does not parse are skipped; the
/// schema is keyed by the name the describe payload reports.
fn classify_objects(runner: &CliRunner, objects: &[String], policy: &LimitPolicy) -> ClassifiedSchema {
    let calls: Vec<Vec<String>> = objects
        .iter()
        .map(|object| {
            vec![
                "sobject".to_string(),
                "describe".to_string(),
                "--sobject".to_string(),
                object.clone(),
            ]
        })
        .collect();

    let results = runner.run_parallel(&calls);

    let mut schema = ClassifiedSchema::new();
    for (object, result) in objects.iter().zip(results) {
        let output = match result {
            Ok(output) => output,
            Err(e) => {
                warn!(%object, error = %e, "describe call failed");
                continue;
            }
        };
        if !output.success() {
            warn!(%object, exit_code = ?output.exit_code, stderr = %output.stderr_str(), "describe exited non-zero");
            continue;
        }
        let described = match parse_describe(&output.stdout_str()) {
            Ok(described) => described,
            Err(e) => {
                warn!(%object, error = %e, "describe payload failed to parse");
                continue;
            }
        };
        let fields = classify_fields(&described.fields, policy);
        info!(object = %described.name, flagged = fields.len(), "classified schema fields");
        schema.insert(described.name, fields);
    }
    schema
}

/// Largest batches first, object name as tie-break. Processing order only;
/// the statistics do not depend on it.
fn sort_batches(batches: &mut [RecordBatch]) {
    batches.sort_by(|a, b| {
        b.total_size
            .cmp(&a.total_size)
            .then_with(|| a.object.cmp(&b.object))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(object: &str, total_size: u64) -> RecordBatch {
        RecordBatch {
            object: object.to_string(),
            total_size,
            records: Vec::new(),
        }
    }

    #[test]
    fn batches_sort_by_descending_size_then_name() {
        let mut batches = vec![batch("B__mdt", 5), batch("C__mdt", 9), batch("A__mdt", 5)];

        sort_batches(&mut batches);

        let order: Vec<&str> = batches.iter().map(|b| b.object.as_str()).collect();
        assert_eq!(order, ["C__mdt", "A__mdt", "B__mdt"]);
    }

    #[test]
    fn default_options_use_the_platform_binary() {
        let options = AuditOptions::new(Selection::Discover);
        assert_eq!(options.sf_bin, "sf");
        assert_eq!(options.jobs, 4);
        assert_eq!(options.timeout, Duration::from_secs(30));
    }
}
