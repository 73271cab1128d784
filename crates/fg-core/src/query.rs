//! Query executor: run planned queries and collect record batches.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::plan::PlannedQuery;
use crate::runner::CliRunner;

/// One raw record: field name to scalar value, plus the reserved
/// `attributes` entry carrying the record's object-type tag.
pub type Record = serde_json::Map<String, Value>;

/// Query payload: `{ "result": { "totalSize": .., "records": [..] } }`.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse {
    pub result: QueryResult,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    /// Total record count reported by the service.
    #[serde(default)]
    pub total_size: u64,

    /// Records in service order.
    #[serde(default)]
    pub records: Vec<Record>,
}

/// The raw result of one executed query.
#[derive(Debug, Clone)]
pub struct RecordBatch {
    /// Object the query was planned for.
    pub object: String,

    /// Total record count reported by the service.
    pub total_size: u64,

    /// Records in service order.
    pub records: Vec<Record>,
}

/// Parse a query payload.
pub fn parse_query_response(payload: &str) -> Result<QueryResponse, serde_json::Error> {
    serde_json::from_str(payload)
}

/// Execute the planned queries with bounded parallelism.
///
/// A call that fails to spawn, exits non-zero, or returns a payload that
/// does not parse as the expected structure is discarded with a logged
/// warning; the run continues with the remaining batches.
pub fn execute_queries(runner: &CliRunner, queries: &[PlannedQuery]) -> Vec<RecordBatch> {
    let calls: Vec<Vec<String>> = queries
        .iter()
        .map(|query| {
            vec![
                "data".to_string(),
                "query".to_string(),
                "--json".to_string(),
                "--query".to_string(),
                query.soql.clone(),
            ]
        })
        .collect();

    let results = runner.run_parallel(&calls);

    let mut batches = Vec::with_capacity(queries.len());
    for (query, result) in queries.iter().zip(results) {
        let output = match result {
            Ok(output) => output,
            Err(e) => {
                warn!(object = %query.object, error = %e, "query call failed");
                continue;
            }
        };
        if !output.success() {
            warn!(
                object = %query.object,
                exit_code = ?output.exit_code,
                stderr = %output.stderr_str(),
                "query exited non-zero"
            );
            continue;
        }
        match parse_query_response(&output.stdout_str()) {
            Ok(response) => {
                debug!(
                    object = %query.object,
                    total_size = response.result.total_size,
                    "query returned records"
                );
                batches.push(RecordBatch {
                    object: query.object.clone(),
                    total_size: response.result.total_size,
                    records: response.result.records,
                });
            }
            Err(e) => warn!(object = %query.object, error = %e, "query payload failed to parse"),
        }
    }
    batches
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_records_with_attributes() {
        let payload = r#"{
            "result": {
                "totalSize": 2,
                "records": [
                    {"attributes": {"type": "Rule__mdt", "url": "/x"}, "Payload__c": "abc"},
                    {"attributes": {"type": "Rule__mdt"}, "Payload__c": null}
                ]
            }
        }"#;

        let response = parse_query_response(payload).unwrap();
        assert_eq!(response.result.total_size, 2);
        assert_eq!(response.result.records.len(), 2);
        assert_eq!(
            response.result.records[0].get("Payload__c").and_then(Value::as_str),
            Some("abc")
        );
        assert!(response.result.records[1]
            .get("Payload__c")
            .is_some_and(Value::is_null));
    }

    #[test]
    fn missing_result_is_an_error() {
        // The service's error envelope has no "result" object; it must not
        // read as an empty batch.
        assert!(parse_query_response(r#"{"status": 1, "message": "no org"}"#).is_err());
        assert!(parse_query_response("not json").is_err());
    }

    #[test]
    fn missing_total_size_defaults_to_zero() {
        let response = parse_query_response(r#"{"result": {"records": []}}"#).unwrap();
        assert_eq!(response.result.total_size, 0);
        assert!(response.result.records.is_empty());
    }
}
