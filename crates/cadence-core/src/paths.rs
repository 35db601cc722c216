use chrono::NaiveDate;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const CADENCE_DIR: &str = ".cadence";
pub const PLANS_DIR: &str = ".cadence/plans";

pub const CONFIG_FILE: &str = ".cadence/config.yaml";
pub const SNAPSHOT_FILE: &str = ".cadence/snapshot.json";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn cadence_dir(root: &Path) -> PathBuf {
    root.join(CADENCE_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn snapshot_path(root: &Path) -> PathBuf {
    root.join(SNAPSHOT_FILE)
}

pub fn plans_dir(root: &Path) -> PathBuf {
    root.join(PLANS_DIR)
}

pub fn plan_path(root: &Path, date: NaiveDate) -> PathBuf {
    plans_dir(root).join(format!("{date}.yaml"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
