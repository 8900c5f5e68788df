// ⚙️ Renamer Configuration
// Immutable configuration shared by every component of a renaming run

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Which text the fuzzy vendor guess tokenizes when no ID match is found.
///
/// Folder names tend to be curated by hand and are the more reliable source;
/// filenames are the fallback for flat directory layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VendorTextSource {
    /// Tokenize the containing folder path (default)
    Folder,

    /// Tokenize the filename stem
    Filename,
}

/// Generic legal/corporate/filing terms that never identify a vendor.
/// Tokens matching any of these are dropped before fuzzy matching.
const DEFAULT_STOP_WORDS: &[&str] = &[
    "strategic", "alliance", "agreement", "moved", "to", "database", "do",
    "not", "edit", "or", "save", "files", "here", "annex", "draft", "revised",
    "amendment", "letter", "reminder", "setup", "memo", "final", "executed",
    "signed", "vsa", "iso", "llc", "inc", "corp", "company", "co", "the",
    "of", "and", "a", "b", "c", "proposal", "forms", "rules", "loss", "costs",
    "business", "development", "tm", "drafts",
];

/// Configuration for a renaming run.
///
/// Built once at startup and passed by reference into each component;
/// nothing mutates it after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenamerConfig {
    /// Registry column holding the vendor name
    pub vendor_column: String,

    /// Registry column holding the external vendor ID
    pub id_column: String,

    /// Registry column holding the internal owner's name
    pub owner_column: String,

    /// 0-indexed row of the registry file where the headers live
    /// (rows above it are skipped)
    pub header_row: usize,

    /// Tokens discarded before fuzzy vendor matching (lower-cased)
    pub stop_words: HashSet<String>,

    /// Minimum fuzzy score (0-100) for a vendor name match to be accepted
    pub fuzzy_cutoff: u8,

    /// Fixed literal embedded in every generated filename
    pub tag: String,

    /// Text source for the fuzzy vendor guess
    pub vendor_text: VendorTextSource,

    /// Earliest plausible document year
    pub min_year: i32,

    /// Years past the current year still accepted as a document date
    pub max_year_ahead: i32,
}

impl Default for RenamerConfig {
    fn default() -> Self {
        RenamerConfig {
            vendor_column: "Vendor".to_string(),
            id_column: "Id".to_string(),
            owner_column: "Owner".to_string(),
            header_row: 1,
            stop_words: DEFAULT_STOP_WORDS.iter().map(|w| w.to_string()).collect(),
            fuzzy_cutoff: 40,
            tag: "ISO".to_string(),
            vendor_text: VendorTextSource::Folder,
            min_year: 1990,
            max_year_ahead: 10,
        }
    }
}
