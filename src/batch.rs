// 🗂️ Batch Orchestrator - Directory iteration, preview, and renaming
// One file failing never aborts the run; every outcome is recorded in a
// RenameResult for the end-of-run summary.

use crate::filename::{DocStatus, FilenameBuilder};
use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// RENAME RESULT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RenameStatus {
    Ok,
    Error(String),
}

/// Outcome for one file; created once, never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct RenameResult {
    pub original_name: String,
    pub proposed_name: Option<String>,
    pub status: RenameStatus,
}

impl RenameResult {
    pub fn is_ok(&self) -> bool {
        self.status == RenameStatus::Ok
    }
}

// ============================================================================
// BATCH PROCESSING
// ============================================================================

/// Process every file in `directory` whose name matches `pattern`.
///
/// Preview is the default; with `apply` the files are renamed in place.
/// A nonexistent directory is fatal, a failing file is not.
pub fn batch_process(
    builder: &FilenameBuilder,
    directory: &Path,
    status: DocStatus,
    pattern: &str,
    apply: bool,
) -> Result<Vec<RenameResult>> {
    if !directory.is_dir() {
        bail!("Directory not found: {}", directory.display());
    }

    let mut paths: Vec<PathBuf> = fs::read_dir(directory)
        .with_context(|| format!("Failed to read directory: {}", directory.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .filter(|path| {
            path.file_name()
                .map(|name| pattern_matches(pattern, &name.to_string_lossy()))
                .unwrap_or(false)
        })
        .collect();
    paths.sort();

    if paths.is_empty() {
        println!(
            "No files found matching pattern: {} in {}",
            pattern,
            directory.display()
        );
        return Ok(Vec::new());
    }

    println!(
        "\n{} {} files:",
        if apply { "Processing" } else { "Preview" },
        paths.len()
    );
    println!("{}", "=".repeat(80));

    let mut results = Vec::with_capacity(paths.len());
    for path in &paths {
        let result = process_one(builder, path, status, apply);
        match &result.status {
            RenameStatus::Ok => println!(
                "✓ {} → {}",
                result.original_name,
                result.proposed_name.as_deref().unwrap_or_default()
            ),
            RenameStatus::Error(reason) => {
                println!("✗ {} → ERROR: {}", result.original_name, reason)
            }
        }
        results.push(result);
    }

    let successful = results.iter().filter(|r| r.is_ok()).count();
    println!("{}", "=".repeat(80));
    println!(
        "Summary: {}/{} files processed successfully",
        successful,
        results.len()
    );
    if apply {
        println!("Files have been renamed.");
    } else {
        println!("Preview complete. Use --rename to actually rename files.");
    }

    Ok(results)
}

/// Propose (and optionally apply) the rename for a single file.
/// The original extension is preserved and re-appended here.
pub fn process_one(
    builder: &FilenameBuilder,
    path: &Path,
    status: DocStatus,
    apply: bool,
) -> RenameResult {
    let original_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let base_name = match builder.rename_document(path, status) {
        Ok(name) => name,
        Err(e) => {
            return RenameResult {
                original_name,
                proposed_name: None,
                status: RenameStatus::Error(e.to_string()),
            }
        }
    };

    let extension = path
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();
    let proposed = format!("{}{}", base_name, extension);

    if apply {
        if let Err(e) = fs::rename(path, path.with_file_name(&proposed)) {
            return RenameResult {
                original_name,
                proposed_name: Some(proposed),
                status: RenameStatus::Error(format!("Rename failed: {}", e)),
            };
        }
    }

    RenameResult {
        original_name,
        proposed_name: Some(proposed),
        status: RenameStatus::Ok,
    }
}

// ============================================================================
// PATTERN MATCHING
// ============================================================================

/// Case-insensitive wildcard match; `*` spans any run of characters.
/// Without a wildcard the pattern must equal the whole name.
fn pattern_matches(pattern: &str, name: &str) -> bool {
    let pattern = pattern.to_lowercase();
    let name = name.to_lowercase();

    if !pattern.contains('*') {
        return pattern == name;
    }

    let parts: Vec<&str> = pattern.split('*').collect();

    // Anchor the first and last fragments
    if !parts[0].is_empty() && !name.starts_with(parts[0]) {
        return false;
    }
    if !parts[parts.len() - 1].is_empty() && !name.ends_with(parts[parts.len() - 1]) {
        return false;
    }

    // Middle fragments must appear in order
    let mut current_pos = parts[0].len();
    for part in &parts[1..parts.len() - 1] {
        if part.is_empty() {
            continue;
        }
        if let Some(pos) = name[current_pos..].find(part) {
            current_pos += pos + part.len();
        } else {
            return false;
        }
    }

    true
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenamerConfig;
    use crate::pdf::StaticTextSource;
    use crate::registry::{VendorRecord, VendorRegistry};
    use std::fs::File;
    use std::io::Write;

    fn registry() -> VendorRegistry {
        VendorRegistry::new(vec![VendorRecord {
            vendor_name: "Acme Corp".to_string(),
            external_id: "5097".to_string(),
            owner_name: "Jane Q Doe".to_string(),
        }])
    }

    fn touch(path: &Path) {
        File::create(path).unwrap().write_all(b"x").unwrap();
    }

    #[test]
    fn test_pattern_matches() {
        assert!(pattern_matches("*", "anything.pdf"));
        assert!(pattern_matches("*.pdf", "contract.pdf"));
        assert!(pattern_matches("*.PDF", "contract.pdf"));
        assert!(!pattern_matches("*.pdf", "contract.docx"));
        assert!(pattern_matches("5097*", "5097_contract.docx"));
        assert!(pattern_matches("*annex*rates*", "2023 annex a rates.pdf"));
        assert!(!pattern_matches("*rates*annex*", "2023 annex a rates.pdf"));
        assert!(pattern_matches("contract.pdf", "Contract.PDF"));
        assert!(!pattern_matches("contract", "contract.pdf"));
    }

    #[test]
    fn test_preview_leaves_files_in_place() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("5097_agreement.docx"));
        touch(&dir.path().join("annex a.pdf"));

        let registry = registry();
        let config = RenamerConfig::default();
        let pdf = StaticTextSource::empty();
        let builder = FilenameBuilder::new(&registry, &config, &pdf);

        let results =
            batch_process(&builder, dir.path(), DocStatus::Draft, "*", false).unwrap();

        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.is_ok()));
        // Originals untouched in preview mode
        assert!(dir.path().join("5097_agreement.docx").exists());
        assert!(dir.path().join("annex a.pdf").exists());
    }

    #[test]
    fn test_apply_renames_files() {
        let dir = tempfile::tempdir().unwrap();
        let original = dir.path().join("5097_agreement.docx");
        touch(&original);

        let registry = registry();
        let config = RenamerConfig::default();
        let pdf = StaticTextSource::empty();
        let builder = FilenameBuilder::new(&registry, &config, &pdf);

        let results =
            batch_process(&builder, dir.path(), DocStatus::Draft, "*.docx", true).unwrap();

        assert_eq!(results.len(), 1);
        assert!(results[0].is_ok());
        assert!(!original.exists());

        let new_name = results[0].proposed_name.as_ref().unwrap();
        assert!(new_name.ends_with(".docx"));
        assert!(new_name.contains("Acme Corp"));
        assert!(dir.path().join(new_name).exists());
    }

    #[test]
    fn test_missing_directory_is_fatal() {
        let registry = registry();
        let config = RenamerConfig::default();
        let pdf = StaticTextSource::empty();
        let builder = FilenameBuilder::new(&registry, &config, &pdf);

        let err = batch_process(
            &builder,
            Path::new("/nonexistent/dir"),
            DocStatus::Draft,
            "*",
            false,
        )
        .unwrap_err();

        assert!(err.to_string().contains("Directory not found"));
    }

    #[test]
    fn test_failed_file_recorded_without_aborting() {
        let registry = registry();
        let config = RenamerConfig::default();
        let pdf = StaticTextSource::empty();
        let builder = FilenameBuilder::new(&registry, &config, &pdf);

        // File vanished between listing and processing
        let result = process_one(
            &builder,
            Path::new("/nonexistent/5097.pdf"),
            DocStatus::Executed,
            false,
        );

        assert!(!result.is_ok());
        assert!(result.proposed_name.is_none());
        match &result.status {
            RenameStatus::Error(reason) => assert!(reason.contains("File not found")),
            RenameStatus::Ok => panic!("expected an error result"),
        }
    }

    #[test]
    fn test_pattern_filters_files() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("keep.pdf"));
        touch(&dir.path().join("skip.docx"));

        let registry = registry();
        let config = RenamerConfig::default();
        let pdf = StaticTextSource::new(vec!["effective as of March 1, 2023."]);
        let builder = FilenameBuilder::new(&registry, &config, &pdf);

        let results =
            batch_process(&builder, dir.path(), DocStatus::Executed, "*.pdf", false).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].original_name, "keep.pdf");
    }
}
