//! State directory preflight check.

use super::CheckResult;
use crate::utils::fs;
use std::path::Path;

/// Check that the state directory is writable.
pub fn check(data_dir: &Path) -> CheckResult {
    match fs::ensure_writable_dir(data_dir) {
        Ok(()) => CheckResult::ok("State store", &data_dir.display().to_string()),
        Err(e) => CheckResult::fail(
            "State store",
            &format!("{} ({})", data_dir.display(), e),
            "Pass a writable directory with --data-dir",
        ),
    }
}
