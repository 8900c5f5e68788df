// 📇 Vendor Registry - Reference data for vendor resolution
// Loaded once per run from a tabular CSV source, read-only afterwards

use crate::config::RenamerConfig;
use crate::error::RenamerError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ============================================================================
// VENDOR RECORD
// ============================================================================

/// One row of the vendor reference registry. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorRecord {
    /// Canonical vendor name, as it should appear in filenames
    pub vendor_name: String,

    /// External vendor ID (4 digits plus an optional letter, e.g. "5097A")
    pub external_id: String,

    /// Internal owner assigned to this vendor
    pub owner_name: String,
}

impl VendorRecord {
    /// Upper-cased first letter of each word in the owner's name,
    /// or "XX" when no owner is recorded.
    pub fn owner_initials(&self) -> String {
        let result = initials(&self.owner_name);
        if result.is_empty() {
            "XX".to_string()
        } else {
            result
        }
    }
}

/// Upper-cased first letters of each whitespace-separated word.
pub fn initials(full_name: &str) -> String {
    full_name
        .split_whitespace()
        .filter_map(|part| part.chars().next())
        .flat_map(|c| c.to_uppercase())
        .collect()
}

// ============================================================================
// VENDOR REGISTRY
// ============================================================================

/// Ordered collection of vendor records.
///
/// Registry order is load order, and every lookup is first-match-wins, so
/// duplicate external IDs silently resolve to the earliest row.
#[derive(Debug)]
pub struct VendorRegistry {
    records: Vec<VendorRecord>,
}

impl VendorRegistry {
    /// Build a registry directly from records (used by tests and callers
    /// that load from elsewhere).
    pub fn new(records: Vec<VendorRecord>) -> Self {
        VendorRegistry { records }
    }

    /// Load the registry from a CSV file.
    ///
    /// Rows before `config.header_row` are skipped; that row supplies the
    /// column names. Missing required columns are a fatal configuration
    /// error listing every absent name.
    pub fn from_csv(path: &Path, config: &RenamerConfig) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("Failed to open registry file: {}", path.display()))?;

        let rows: Vec<csv::StringRecord> = reader
            .records()
            .collect::<std::result::Result<_, _>>()
            .with_context(|| format!("Failed to read registry rows from {}", path.display()))?;

        let header = rows.get(config.header_row).ok_or_else(|| {
            RenamerError::Configuration(format!(
                "Registry has no header row at index {}",
                config.header_row
            ))
        })?;

        let position =
            |name: &str| header.iter().position(|cell| cell.trim() == name);

        let vendor_idx = position(&config.vendor_column);
        let id_idx = position(&config.id_column);
        let owner_idx = position(&config.owner_column);

        let missing: Vec<&str> = [
            (vendor_idx, config.vendor_column.as_str()),
            (id_idx, config.id_column.as_str()),
            (owner_idx, config.owner_column.as_str()),
        ]
        .iter()
        .filter(|(idx, _)| idx.is_none())
        .map(|(_, name)| *name)
        .collect();

        let (vendor_idx, id_idx, owner_idx) = match (vendor_idx, id_idx, owner_idx) {
            (Some(v), Some(i), Some(o)) => (v, i, o),
            _ => {
                return Err(RenamerError::Configuration(format!(
                    "Missing required columns: {:?}",
                    missing
                ))
                .into())
            }
        };

        let mut records = Vec::new();
        for row in rows.iter().skip(config.header_row + 1) {
            let cell = |idx: usize| row.get(idx).unwrap_or("").trim().to_string();

            let record = VendorRecord {
                vendor_name: cell(vendor_idx),
                external_id: cell(id_idx),
                owner_name: cell(owner_idx),
            };

            // Skip padding rows with no content
            if record.vendor_name.is_empty()
                && record.external_id.is_empty()
                && record.owner_name.is_empty()
            {
                continue;
            }

            records.push(record);
        }

        Ok(VendorRegistry { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[VendorRecord] {
        &self.records
    }

    /// Iterate all vendor names in registry order.
    pub fn vendor_names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.vendor_name.as_str())
    }

    /// Exact external-ID lookup, case-insensitive, apostrophes and
    /// surrounding whitespace stripped from both sides. First match wins.
    pub fn find_by_id(&self, candidate: &str) -> Option<&VendorRecord> {
        let needle = normalize_id(candidate);
        if needle.is_empty() {
            return None;
        }
        self.records
            .iter()
            .find(|r| normalize_id(&r.external_id) == needle)
    }

    /// Exact vendor-name lookup, case-insensitive. First match wins.
    pub fn find_by_name(&self, vendor_name: &str) -> Option<&VendorRecord> {
        self.records
            .iter()
            .find(|r| r.vendor_name.eq_ignore_ascii_case(vendor_name))
    }
}

/// IDs arrive quoted from spreadsheet exports ("'5097'") and with stray
/// whitespace; comparisons ignore both plus ASCII case.
fn normalize_id(raw: &str) -> String {
    raw.replace('\'', "").trim().to_lowercase()
}

// ============================================================================
// TESTS
// ============================================================================
