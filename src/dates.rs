// 📅 Date Extraction Engine - Layered heuristics over contract text
// Regex battery finds date-shaped strings, permissive parsing validates
// them, and a fixed priority ladder picks the one that names the document.
// This component never propagates a failure: anything unusable collapses
// to NeedsReview.

use crate::classify::DocType;
use crate::config::RenamerConfig;
use crate::pdf::DocumentText;
use chrono::{Datelike, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

// ============================================================================
// DATE-SHAPED PATTERNS
// ============================================================================

const MONTHS_LONG: &str = "January|February|March|April|May|June|July|August|September|October|November|December";
const MONTHS_ABBR: &str = "Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec";

static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        // ISO format: 2023-03-01 or 2023/3/1
        Regex::new(r"\b\d{4}[-/]\d{1,2}[-/]\d{1,2}\b").unwrap(),
        // US format: 3/1/2023
        Regex::new(r"\b\d{1,2}/\d{1,2}/\d{4}\b").unwrap(),
        // March 1st, 2023
        Regex::new(&format!(
            r"(?i)\b(?:{MONTHS_LONG})\s+\d{{1,2}}(?:st|nd|rd|th)?,?\s+\d{{4}}\b"
        ))
        .unwrap(),
        // Mar. 1, 2023
        Regex::new(&format!(
            r"(?i)\b(?:{MONTHS_ABBR})\.?\s+\d{{1,2}}(?:st|nd|rd|th)?,?\s+\d{{4}}\b"
        ))
        .unwrap(),
        // 1st March 2023
        Regex::new(&format!(
            r"(?i)\b\d{{1,2}}(?:st|nd|rd|th)?\s+(?:{MONTHS_LONG})\s+\d{{4}}\b"
        ))
        .unwrap(),
    ]
});

// Phrases anchored on "effective", tried in order; the first pattern with
// a match wins. The capture window is up to 50 chars plus a date shape
// plus up to 20 trailing chars, all within one sentence.
static EFFECTIVE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    const DATE_SHAPE: &str = r"(?:\d{4}[-/]\d{1,2}[-/]\d{1,2}|\d{1,2}[/-]\d{1,2}[/-]\d{4}|\w+\s+\d{1,2}(?:st|nd|rd|th)?,?\s+\d{4}|\d{1,2}(?:st|nd|rd|th)?\s+\w+\s+\d{4})";
    vec![
        Regex::new(&format!(
            r"(?is)effective\s+(?:as\s+of\s+)?([^.]{{0,50}}{DATE_SHAPE}[^.]{{0,20}})"
        ))
        .unwrap(),
        Regex::new(&format!(
            r"(?is)(?:shall\s+be\s+)?effective\s+(?:on\s+)?([^.]{{0,50}}{DATE_SHAPE}[^.]{{0,20}})"
        ))
        .unwrap(),
        Regex::new(&format!(
            r"(?is)(?:agreement|contract|document)\s+(?:is\s+)?effective\s+([^.]{{0,50}}{DATE_SHAPE}[^.]{{0,20}})"
        ))
        .unwrap(),
    ]
});

// Signature blocks: keyword plus up to 100 non-period characters
static SIGNATURE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:signed|executed|dated)([^.]{0,100})").unwrap());

static ORDINAL_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d{1,2})(?:st|nd|rd|th)\b").unwrap());

// ============================================================================
// NAMING DATE
// ============================================================================

/// Which heuristic tier produced a candidate date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTier {
    /// Earliest date on the first page of a legal document
    LegalFirstPage,

    /// Date inside an "effective ..." phrase
    EffectiveContext,

    /// Date inside a signed/executed/dated block on the last page
    SignatureContext,

    /// Latest date seen anywhere on the first or last page
    Fallback,
}

/// A validated calendar date plus the tier that found it. Transient;
/// exists only while a single document is being named.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateCandidate {
    pub date: NaiveDate,
    pub tier: DateTier,
}

/// Outcome of date extraction for one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingDate {
    Found(DateCandidate),
    NeedsReview,
}

impl NamingDate {
    fn found(date: NaiveDate, tier: DateTier) -> Self {
        NamingDate::Found(DateCandidate { date, tier })
    }

    /// Date segment of the generated filename: `YYYYMMDD`, or the literal
    /// "Review" when no reliable date could be determined.
    pub fn segment(&self) -> String {
        match self {
            NamingDate::Found(candidate) => candidate.date.format("%Y%m%d").to_string(),
            NamingDate::NeedsReview => "Review".to_string(),
        }
    }
}

// ============================================================================
// DATE EXTRACTOR
// ============================================================================

/// Extracts the naming date from a document's first/last page text.
pub struct DateExtractor {
    min_year: i32,
    max_year: i32,
}

impl DateExtractor {
    /// Year window comes from the config; the ceiling floats with the
    /// current year.
    pub fn new(config: &RenamerConfig) -> Self {
        DateExtractor {
            min_year: config.min_year,
            max_year: Local::now().year() + config.max_year_ahead,
        }
    }

    /// Fixed year window, for callers that need determinism.
    pub fn with_bounds(min_year: i32, max_year: i32) -> Self {
        DateExtractor { min_year, max_year }
    }

    /// Collect every date-shaped substring across all patterns,
    /// duplicates preserved.
    pub fn extract_date_strings(&self, text: &str) -> Vec<String> {
        let mut found = Vec::new();
        for pattern in DATE_PATTERNS.iter() {
            for m in pattern.find_iter(text) {
                found.push(m.as_str().to_string());
            }
        }
        found
    }

    /// Parse candidates permissively and keep the ones inside the
    /// plausible year window.
    pub fn parse_and_validate(&self, candidates: &[String]) -> Vec<NaiveDate> {
        candidates
            .iter()
            .filter_map(|raw| parse_date_str(raw))
            .filter(|date| date.year() >= self.min_year && date.year() <= self.max_year)
            .collect()
    }

    fn dates_in(&self, text: &str) -> Vec<NaiveDate> {
        self.parse_and_validate(&self.extract_date_strings(text))
    }

    /// Latest valid date inside the first matching "effective" phrase.
    pub fn find_effective_date(&self, text: &str) -> Option<NaiveDate> {
        for pattern in EFFECTIVE_PATTERNS.iter() {
            if let Some(caps) = pattern.captures(text) {
                let window = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
                if let Some(latest) = self.dates_in(window).into_iter().max() {
                    return Some(latest);
                }
            }
        }
        None
    }

    /// Latest valid date inside the first signed/executed/dated block.
    pub fn find_signature_date(&self, text: &str) -> Option<NaiveDate> {
        let caps = SIGNATURE_PATTERN.captures(text)?;
        let window = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        self.dates_in(window).into_iter().max()
    }

    /// Select the date that names the document.
    ///
    /// Priority ladder, first success wins:
    /// 1. Legal documents: earliest first-page date
    /// 2. "Effective" phrase across first+last page
    /// 3. Signature block on the last page
    /// 4. Latest date seen on either page
    /// 5. NeedsReview
    pub fn naming_date(&self, doc: &DocumentText, doc_type: DocType) -> NamingDate {
        if doc_type.is_legal() {
            if let Some(earliest) = self.dates_in(&doc.first_page).into_iter().min() {
                return NamingDate::found(earliest, DateTier::LegalFirstPage);
            }
        }

        if let Some(date) = self.find_effective_date(&doc.combined()) {
            return NamingDate::found(date, DateTier::EffectiveContext);
        }

        if let Some(date) = self.find_signature_date(&doc.last_page) {
            return NamingDate::found(date, DateTier::SignatureContext);
        }

        let mut all = self.dates_in(&doc.first_page);
        all.extend(self.dates_in(&doc.last_page));
        all.sort();
        all.dedup();
        if let Some(latest) = all.last() {
            return NamingDate::found(*latest, DateTier::Fallback);
        }

        NamingDate::NeedsReview
    }
}

// ============================================================================
// PERMISSIVE PARSING
// ============================================================================

const PARSE_FORMATS: &[&str] = &[
    "%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%B %d %Y", "%b %d %Y", "%d %B %Y", "%d %b %Y",
];

/// Parse one date-shaped string. Ordinal suffixes, commas, and periods
/// are stripped before trying the known formats in order.
fn parse_date_str(raw: &str) -> Option<NaiveDate> {
    let cleaned = ORDINAL_SUFFIX.replace_all(raw.trim(), "$1");
    let cleaned = cleaned.replace([',', '.'], " ");
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    PARSE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(&cleaned, format).ok())
}

// ============================================================================
// TESTS
// ============================================================================
