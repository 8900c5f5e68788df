// Document Renamer - Core Library
// Exposes all modules for use in the CLI and tests

pub mod batch;
pub mod classify;
pub mod config;
pub mod dates;
pub mod error;
pub mod filename;
pub mod pdf;
pub mod registry;
pub mod resolver;

// Re-export commonly used types
pub use batch::{batch_process, process_one, RenameResult, RenameStatus};
pub use classify::{classify, DocType, CLASSIFICATION_RULES};
pub use config::{RenamerConfig, VendorTextSource};
pub use dates::{DateCandidate, DateExtractor, DateTier, NamingDate};
pub use error::RenamerError;
pub use filename::{last_modified_segment, DocStatus, FilenameBuilder, UNKNOWN_VENDOR};
pub use pdf::{
    normalize_whitespace, DocumentText, PdfTextSource, PdfiumTextSource, StaticTextSource,
};
pub use registry::{initials, VendorRecord, VendorRegistry};
pub use resolver::{similarity, VendorResolver};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
