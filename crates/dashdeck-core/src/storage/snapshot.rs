//! On-disk snapshot format.
//!
//! Current layout:
//! ```json
//! { "version": 1, "categories": [...], "widgets": [...] }
//! ```
//! Snapshots written by the earlier web build wrap the state in an
//! envelope, `{ "state": { "categories": [...], "widgets": [...] }, "version": 0 }`.
//! Those are still accepted on load.

use super::{StorageError, StorageResult};
use crate::model::{Category, DashboardState, Widget};
use serde::Serialize;
use serde_json::Value;

/// Snapshot format version written by this build.
pub const SNAPSHOT_VERSION: u64 = 1;

#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u64,
    categories: &'a [Category],
    widgets: &'a [Widget],
}

/// Serialize a state to the current snapshot format.
pub fn encode_snapshot(state: &DashboardState) -> StorageResult<String> {
    let snapshot = SnapshotRef {
        version: SNAPSHOT_VERSION,
        categories: &state.categories,
        widgets: &state.widgets,
    };
    serde_json::to_string_pretty(&snapshot).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Parse a snapshot in either the current or the legacy envelope format.
pub fn decode_snapshot(json: &str) -> StorageResult<DashboardState> {
    let mut value: Value =
        serde_json::from_str(json).map_err(|e| StorageError::Serialization(e.to_string()))?;

    let is_legacy = value.get("state").is_some_and(Value::is_object);
    let body = if is_legacy {
        let legacy_version = value.get("version").and_then(Value::as_u64).unwrap_or(0);
        log::info!("Migrating legacy dashboard snapshot (version {legacy_version})");
        value["state"].take()
    } else {
        let version = value
            .get("version")
            .and_then(Value::as_u64)
            .unwrap_or(SNAPSHOT_VERSION);
        if version > SNAPSHOT_VERSION {
            return Err(StorageError::UnsupportedVersion {
                found: version,
                supported: SNAPSHOT_VERSION,
            });
        }
        value
    };

    serde_json::from_value(body).map_err(|e| StorageError::Serialization(e.to_string()))
}
