// 📄 PDF Text Source - First/last page text for date extraction
// Thin collaborator boundary: a trait over page count + page text, a
// PDFium-backed production implementation, and a static in-memory
// implementation for tests.

use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;
use pdfium_render::prelude::*;
use regex::Regex;
use std::path::Path;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Collapse runs of whitespace so context regexes see one flat line.
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

// ============================================================================
// TEXT SOURCE TRAIT
// ============================================================================

/// Page-level text access for a document on disk.
///
/// Zero pages is a valid, non-fatal condition; an unextractable page may
/// yield an empty string. Callers convert any failure into the
/// needs-review outcome rather than aborting.
pub trait PdfTextSource {
    fn page_count(&self, path: &Path) -> Result<usize>;

    /// Raw text of the 0-indexed page.
    fn page_text(&self, path: &Path, index: usize) -> Result<String>;
}

// ============================================================================
// PDFIUM IMPLEMENTATION
// ============================================================================

/// Text extraction backed by the Google PDFium dynamic library.
///
/// Stateless: the library handle is loaded per operation because the
/// upstream `Pdfium` type is `!Send`. OS-level dlopen caching makes
/// repeat loads effectively free.
pub struct PdfiumTextSource;

impl PdfiumTextSource {
    pub fn new() -> Self {
        PdfiumTextSource
    }
}

impl Default for PdfiumTextSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Load the PDFium dynamic library.
///
/// Discovery order:
/// 1. `PDFIUM_DYNAMIC_LIB_PATH` env var (explicit path to the library file)
/// 2. Alongside the running executable
/// 3. System library search paths
fn load_pdfium() -> Result<Pdfium> {
    if let Ok(path) = std::env::var("PDFIUM_DYNAMIC_LIB_PATH") {
        let bindings = Pdfium::bind_to_library(&path)
            .map_err(|e| anyhow!("Failed to load PDFium from {}: {}", path, e))?;
        return Ok(Pdfium::new(bindings));
    }

    if let Ok(exe) = std::env::current_exe() {
        if let Some(exe_dir) = exe.parent() {
            let lib_path =
                Pdfium::pdfium_platform_library_name_at_path(exe_dir.to_string_lossy().as_ref());
            if let Ok(bindings) = Pdfium::bind_to_library(&lib_path) {
                return Ok(Pdfium::new(bindings));
            }
        }
    }

    let bindings = Pdfium::bind_to_system_library().map_err(|e| {
        anyhow!("PDFium library not found. Set PDFIUM_DYNAMIC_LIB_PATH or install PDFium: {}", e)
    })?;
    Ok(Pdfium::new(bindings))
}

impl PdfTextSource for PdfiumTextSource {
    fn page_count(&self, path: &Path) -> Result<usize> {
        let pdfium = load_pdfium()?;
        let document = pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| anyhow!("Failed to load PDF {}: {}", path.display(), e))?;
        Ok(document.pages().len() as usize)
    }

    fn page_text(&self, path: &Path, index: usize) -> Result<String> {
        let pdfium = load_pdfium()?;
        let document = pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| anyhow!("Failed to load PDF {}: {}", path.display(), e))?;

        let page_index = u16::try_from(index)
            .map_err(|_| anyhow!("Page index {} exceeds u16 maximum", index))?;

        let page = document.pages().get(page_index).map_err(|_| {
            anyhow!(
                "Page {} out of range (document has {} pages)",
                index,
                document.pages().len()
            )
        })?;

        let text = page.text().map_err(|e| {
            anyhow!(
                "Failed to extract text from page {} of {}: {}",
                index,
                path.display(),
                e
            )
        })?;
        Ok(text.all())
    }
}

// ============================================================================
// STATIC IMPLEMENTATION
// ============================================================================

/// In-memory text source with fixed page contents.
///
/// Used by extraction and builder tests that need a PdfTextSource
/// without requiring the actual PDFium binary.
pub struct StaticTextSource {
    pages: Vec<String>,
}

impl StaticTextSource {
    pub fn new<S: Into<String>>(pages: Vec<S>) -> Self {
        StaticTextSource {
            pages: pages.into_iter().map(Into::into).collect(),
        }
    }

    /// A source with no extractable pages.
    pub fn empty() -> Self {
        StaticTextSource { pages: Vec::new() }
    }
}

impl PdfTextSource for StaticTextSource {
    fn page_count(&self, _path: &Path) -> Result<usize> {
        Ok(self.pages.len())
    }

    fn page_text(&self, _path: &Path, index: usize) -> Result<String> {
        self.pages
            .get(index)
            .cloned()
            .ok_or_else(|| anyhow!("Page {} out of range ({} pages)", index, self.pages.len()))
    }
}

// ============================================================================
// DOCUMENT TEXT
// ============================================================================

/// Whitespace-normalized text of a document's first and last page.
///
/// Single-page documents reuse the first page as the last; extraction
/// heuristics treat the two views independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentText {
    pub first_page: String,
    pub last_page: String,
}

impl DocumentText {
    pub fn from_pages(first: &str, last: &str) -> Self {
        DocumentText {
            first_page: normalize_whitespace(first),
            last_page: normalize_whitespace(last),
        }
    }

    /// Pull first/last page text from a source. `Ok(None)` means the
    /// document has zero extractable pages.
    pub fn load(source: &dyn PdfTextSource, path: &Path) -> Result<Option<Self>> {
        let count = source.page_count(path)?;
        if count == 0 {
            return Ok(None);
        }

        let first = source.page_text(path, 0)?;
        let last = if count > 1 {
            source.page_text(path, count - 1)?
        } else {
            first.clone()
        };

        Ok(Some(DocumentText::from_pages(&first, &last)))
    }

    /// First and last page joined for context searches that span both.
    pub fn combined(&self) -> String {
        format!("{} {}", self.first_page, self.last_page)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  a\n\tb   c  "), "a b c");
        assert_eq!(normalize_whitespace(""), "");
        assert_eq!(normalize_whitespace("single"), "single");
    }

    #[test]
    fn test_static_source_pages() {
        let source = StaticTextSource::new(vec!["first", "middle", "last"]);
        let path = Path::new("unused.pdf");

        assert_eq!(source.page_count(path).unwrap(), 3);
        assert_eq!(source.page_text(path, 0).unwrap(), "first");
        assert_eq!(source.page_text(path, 2).unwrap(), "last");
        assert!(source.page_text(path, 3).is_err());
    }

    #[test]
    fn test_document_text_zero_pages() {
        let source = StaticTextSource::empty();
        let loaded = DocumentText::load(&source, Path::new("empty.pdf")).unwrap();

        assert!(loaded.is_none());
    }

    #[test]
    fn test_document_text_single_page_reuses_first() {
        let source = StaticTextSource::new(vec!["only   page\ntext"]);
        let doc = DocumentText::load(&source, Path::new("one.pdf"))
            .unwrap()
            .unwrap();

        assert_eq!(doc.first_page, "only page text");
        assert_eq!(doc.last_page, doc.first_page);
    }

    #[test]
    fn test_document_text_multi_page() {
        let source = StaticTextSource::new(vec!["page one", "page two", "page  three"]);
        let doc = DocumentText::load(&source, Path::new("three.pdf"))
            .unwrap()
            .unwrap();

        assert_eq!(doc.first_page, "page one");
        assert_eq!(doc.last_page, "page three");
        assert_eq!(doc.combined(), "page one page three");
    }
}
