//! JSON snapshot of one tenant's chart, ledger, and business units.

use std::path::Path;

use budgetry_core::chart::Account;
use budgetry_core::dimension::{BusinessUnits, EntryScope};
use budgetry_core::ledger::LedgerEntry;
use budgetry_shared::types::VersionId;
use budgetry_shared::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Everything one computation needs, as stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotFile {
    /// Only entries of this year are considered, if set.
    #[serde(default)]
    pub year: Option<i32>,
    /// Only entries of this budget version are considered, if set.
    #[serde(default)]
    pub version_id: Option<VersionId>,
    /// Chart of accounts.
    #[serde(default)]
    pub accounts: Vec<Account>,
    /// Ledger entries.
    #[serde(default)]
    pub entries: Vec<LedgerEntry>,
    /// Companies, departments, cost centers, and clients.
    #[serde(flatten)]
    pub units: BusinessUnits,
}

impl SnapshotFile {
    /// Reads and decodes a snapshot file.
    pub fn read(path: &Path) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let snapshot = Self::from_json(&raw)?;
        debug!(
            path = %path.display(),
            accounts = snapshot.accounts.len(),
            entries = snapshot.entries.len(),
            "Loaded snapshot"
        );
        Ok(snapshot)
    }

    /// Decodes a snapshot from JSON text.
    pub fn from_json(raw: &str) -> AppResult<Self> {
        serde_json::from_str(raw).map_err(|e| AppError::Serialization(e.to_string()))
    }

    /// Drops entries outside the snapshot's year and version.
    pub fn retain_in_scope(&mut self) {
        let mut scope = EntryScope::new();
        if let Some(year) = self.year {
            scope = scope.year(year);
        }
        if let Some(version) = self.version_id {
            scope = scope.version(version);
        }
        if !scope.is_empty() {
            self.entries.retain(|entry| scope.matches(entry, None));
        }
    }
}
