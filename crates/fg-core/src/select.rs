//! Object selector: which objects the run audits.
//!
//! Explicit mode returns the caller's list verbatim. Discovery mode asks the
//! org listing for every custom object and keeps the entries named with the
//! custom-metadata suffix. Discovery failures degrade to an empty selection.

use serde::Deserialize;
use tracing::{info, warn};

use crate::runner::CliRunner;

/// Reserved suffix denoting a custom metadata type.
pub const CUSTOM_METADATA_SUFFIX: &str = "__mdt";

/// How the set of audited objects is chosen. The two modes are mutually
/// exclusive; the CLI enforces that exactly one is given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Audit exactly these objects.
    Explicit(Vec<String>),

    /// Discover custom metadata types from the org listing.
    Discover,
}

/// One entry of the org metadata listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListedObject {
    /// Object API name.
    pub full_name: String,
}

/// Org metadata listing payload: `{ "status": .., "result": [..] }`.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingResponse {
    /// Service status; anything but 0 is a failure.
    pub status: i64,

    /// Listed objects.
    #[serde(default)]
    pub result: Vec<ListedObject>,
}

/// Parse an org listing payload.
pub fn parse_listing(payload: &str) -> Result<ListingResponse, serde_json::Error> {
    serde_json::from_str(payload)
}

/// Entries whose name carries the custom-metadata suffix, in listing order.
pub fn filter_custom_metadata(listing: &ListingResponse) -> Vec<String> {
    listing
        .result
        .iter()
        .filter(|entry| entry.full_name.ends_with(CUSTOM_METADATA_SUFFIX))
        .map(|entry| entry.full_name.clone())
        .collect()
}

/// Resolve the objects to audit.
///
/// A discovery failure (spawn error, non-zero exit, malformed payload, or a
/// non-success listing status) is logged and yields an empty selection; it
/// never aborts the run.
pub fn select_objects(runner: &CliRunner, selection: &Selection) -> Vec<String> {
    match selection {
        Selection::Explicit(objects) => {
            info!(count = objects.len(), "using explicit object list");
            objects.clone()
        }
        Selection::Discover => discover_objects(runner),
    }
}

fn discover_objects(runner: &CliRunner) -> Vec<String> {
    let args: Vec<String> = ["org", "list", "metadata", "--json", "--metadata-type", "CustomObject"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let output = match runner.run(&args) {
        Ok(output) => output,
        Err(e) => {
            warn!(error = %e, "org listing call failed");
            return Vec::new();
        }
    };
    if !output.success() {
        warn!(exit_code = ?output.exit_code, stderr = %output.stderr_str(), "org listing exited non-zero");
        return Vec::new();
    }

    let listing = match parse_listing(&output.stdout_str()) {
        Ok(listing) => listing,
        Err(e) => {
            warn!(error = %e, "org listing payload failed to parse");
            return Vec::new();
        }
    };
    if listing.status != 0 {
        warn!(status = listing.status, "org listing reported failure");
        return Vec::new();
    }

    let objects = filter_custom_metadata(&listing);
    info!(count = objects.len(), "discovered custom metadata types");
    objects
}
