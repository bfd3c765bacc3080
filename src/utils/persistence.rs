use std::{fs, path::Path};

use crate::{domain::LeaveSnapshot, errors::LeaveError};

/// Writes the snapshot to disk atomically by staging to a temporary file.
pub fn save_snapshot_to_file(snapshot: &LeaveSnapshot, path: &Path) -> Result<(), LeaveError> {
    let tmp = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(&tmp, json)?;
    fs::rename(tmp, path)?;
    Ok(())
}

/// Loads a snapshot from disk, returning structured errors on failure.
pub fn load_snapshot_from_file(path: &Path) -> Result<LeaveSnapshot, LeaveError> {
    let data = fs::read_to_string(path)?;
    let snapshot: LeaveSnapshot = serde_json::from_str(&data)?;
    tracing::debug!(
        path = %path.display(),
        employees = snapshot.employees.len(),
        periods = snapshot.periods.len(),
        applications = snapshot.applications.len(),
        "snapshot loaded"
    );
    Ok(snapshot)
}
