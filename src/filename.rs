// 🧩 Filename Builder - Canonical base names for drafts and executed docs
// Draft names are stamped with the file's modification date; executed
// names carry the date extracted from the document text. The extension
// is preserved and re-appended by the batch layer, not here.

use crate::classify::{classify, DocType};
use crate::config::RenamerConfig;
use crate::dates::{DateExtractor, NamingDate};
use crate::error::RenamerError;
use crate::pdf::{DocumentText, PdfTextSource};
use crate::registry::VendorRegistry;
use crate::resolver::VendorResolver;
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::path::Path;

/// Placeholder embedded when no vendor could be resolved.
pub const UNKNOWN_VENDOR: &str = "UnknownVendor";

// ============================================================================
// DOCUMENT STATUS
// ============================================================================

/// Whether a document's canonical date is its modification timestamp
/// (draft) or a date extracted from its text (executed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocStatus {
    Draft,
    Executed,
}

impl DocStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocStatus::Draft => "draft",
            DocStatus::Executed => "executed",
        }
    }
}

impl std::str::FromStr for DocStatus {
    type Err = RenamerError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(DocStatus::Draft),
            "executed" => Ok(DocStatus::Executed),
            _ => Err(RenamerError::InvalidStatus(s.to_string())),
        }
    }
}

// ============================================================================
// FILENAME BUILDER
// ============================================================================

/// Composes the canonical base name for one document at a time.
pub struct FilenameBuilder<'a> {
    registry: &'a VendorRegistry,
    config: &'a RenamerConfig,
    extractor: DateExtractor,
    pdf: &'a dyn PdfTextSource,
}

impl<'a> FilenameBuilder<'a> {
    pub fn new(
        registry: &'a VendorRegistry,
        config: &'a RenamerConfig,
        pdf: &'a dyn PdfTextSource,
    ) -> Self {
        FilenameBuilder {
            registry,
            config,
            extractor: DateExtractor::new(config),
            pdf,
        }
    }

    /// Propose the canonical base name (no extension) for a document.
    ///
    /// Fails with `FileNotFound` when the path does not exist; vendor and
    /// date degradation never fail (they fall back to `UnknownVendor` and
    /// `Review`).
    pub fn rename_document(&self, path: &Path, status: DocStatus) -> Result<String> {
        if !path.exists() {
            return Err(RenamerError::FileNotFound(path.to_path_buf()).into());
        }

        match status {
            DocStatus::Draft => self.build_draft(path),
            DocStatus::Executed => self.build_executed(path),
        }
    }

    /// Draft: `{mtime}-{TAG}-{vendor}-{docType}-{ownerInitials}`
    fn build_draft(&self, path: &Path) -> Result<String> {
        let resolver = VendorResolver::new(self.registry, self.config);
        let (vendor_name, owner_initials) = match resolver.resolve(path) {
            Some(record) => (record.vendor_name.clone(), record.owner_initials()),
            None => (UNKNOWN_VENDOR.to_string(), "XX".to_string()),
        };

        let draft_date = last_modified_segment(path)?;
        let doc_type = classify(&filename_of(path));

        Ok(format!(
            "{}-{}-{}-{}-{}",
            draft_date,
            self.config.tag,
            vendor_name,
            doc_type.label(),
            owner_initials
        ))
    }

    /// Executed: `{extractedDate}-{TAG}-{vendor}-{docType}`
    fn build_executed(&self, path: &Path) -> Result<String> {
        let resolver = VendorResolver::new(self.registry, self.config);
        let vendor_name = resolver
            .resolve(path)
            .map(|record| record.vendor_name.clone())
            .unwrap_or_else(|| UNKNOWN_VENDOR.to_string());

        let doc_type = classify(&filename_of(path));
        let naming_date = self.extract_naming_date(path, doc_type);

        Ok(format!(
            "{}-{}-{}-{}",
            naming_date.segment(),
            self.config.tag,
            vendor_name,
            doc_type.label()
        ))
    }

    /// Zero extractable pages and text-retrieval failures both collapse
    /// to NeedsReview; extraction must never abort the file.
    fn extract_naming_date(&self, path: &Path, doc_type: DocType) -> NamingDate {
        match DocumentText::load(self.pdf, path) {
            Ok(Some(doc)) => self.extractor.naming_date(&doc, doc_type),
            Ok(None) | Err(_) => NamingDate::NeedsReview,
        }
    }
}

fn filename_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Local-time modification date of a file, formatted `YYYYMMDD`.
pub fn last_modified_segment(path: &Path) -> Result<String> {
    let modified = fs::metadata(path)
        .with_context(|| format!("Failed to read metadata for {}", path.display()))?
        .modified()
        .with_context(|| format!("No modification time for {}", path.display()))?;

    let local: DateTime<Local> = modified.into();
    Ok(local.format("%Y%m%d").to_string())
}

// ============================================================================
// TESTS
// ============================================================================
