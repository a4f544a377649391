use std::fs;
use std::path::Path;

use vchk::{Checklist, dedup_identical_checks};

use crate::error::{DoctorError, Result};

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|error| DoctorError::ReadInput {
        path: path.to_path_buf(),
        message: error.to_string(),
    })
}

/// Read, parse, and validate a checklist file.
///
/// With `dedup`, value-identical checks in different verifications are
/// merged into one shared allocation first.
pub fn load_checklist(path: &Path, dedup: bool) -> Result<Checklist> {
    let checklist = Checklist::from_json_str(&read_input(path)?)?;
    tracing::info!(
        message = "input.loaded",
        path = %path.display(),
        verifications = checklist.len(),
        items = checklist.item_count(),
        dedup,
    );
    Ok(if dedup {
        dedup_identical_checks(&checklist)
    } else {
        checklist
    })
}

/// Parse a checklist file without validating it, for reports that want to
/// list problems instead of stopping at the first one.
pub fn load_unvalidated(path: &Path) -> Result<Checklist> {
    let checklist: Checklist = serde_json::from_str(&read_input(path)?)?;
    Ok(checklist)
}
