// 🔍 Vendor Resolver - ID-pattern matching with fuzzy fallback
// Pure function over the registry and the file's path text; never fails

use crate::config::{RenamerConfig, VendorTextSource};
use crate::registry::{VendorRecord, VendorRegistry};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

// External IDs appear quoted in spreadsheet-derived filenames: '5097', 5097A
static ID_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"'?\s*(\d{4}[A-Za-z]?)\s*'?").unwrap());

// Path separators count as token boundaries so directory components
// tokenize cleanly alongside spaces, hyphens, underscores, and periods.
static TOKEN_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s\-_./\\]+").unwrap());

// Tokens that lead with four digits are ID-shaped, not vendor words
static LEADING_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}").unwrap());

// ============================================================================
// VENDOR RESOLVER
// ============================================================================

/// Resolves a vendor record from a document path.
///
/// Strict priority order:
/// 1. External-ID pattern in the filename stem, looked up exactly against
///    the registry. A hit bypasses fuzzy matching entirely.
/// 2. Fuzzy best-match of the stop-word-filtered folder (or filename)
///    tokens against all vendor names, accepted above the score cutoff.
pub struct VendorResolver<'a> {
    registry: &'a VendorRegistry,
    config: &'a RenamerConfig,
}

impl<'a> VendorResolver<'a> {
    pub fn new(registry: &'a VendorRegistry, config: &'a RenamerConfig) -> Self {
        VendorResolver { registry, config }
    }

    /// Resolve the vendor for a document, or None when no ID matches and
    /// no vendor name clears the fuzzy cutoff.
    pub fn resolve(&self, path: &Path) -> Option<&'a VendorRecord> {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();

        // Priority 1: ID pattern match. Filenames can carry several
        // ID-shaped tokens (years, version numbers); the first one that is
        // actually registered wins.
        for caps in ID_PATTERN.captures_iter(stem) {
            if let Some(record) = self.registry.find_by_id(&caps[1]) {
                return Some(record);
            }
        }

        // Priority 2: fuzzy matching on vendor names
        let text = match self.config.vendor_text {
            VendorTextSource::Folder => path
                .parent()
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_default(),
            VendorTextSource::Filename => stem.to_string(),
        };

        let query = self.vendor_query(&text);
        if query.is_empty() {
            return None;
        }

        self.best_fuzzy_match(&query)
    }

    /// Join the tokens that could plausibly be vendor words into a query
    /// string. Stop words, all-digit tokens, and ID-shaped tokens are
    /// discarded; an empty result means there is nothing to match on.
    fn vendor_query(&self, text: &str) -> String {
        TOKEN_SPLIT
            .split(text)
            .filter(|word| !word.is_empty())
            .filter(|word| !self.config.stop_words.contains(&word.to_lowercase()))
            .filter(|word| !word.chars().all(|c| c.is_ascii_digit()))
            .filter(|word| !LEADING_ID.is_match(word))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn best_fuzzy_match(&self, query: &str) -> Option<&'a VendorRecord> {
        let mut best: Option<(&'a VendorRecord, f64)> = None;

        for record in self.registry.records() {
            let score = similarity(query, &record.vendor_name);
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((record, score));
            }
        }

        best.filter(|(_, score)| *score >= f64::from(self.config.fuzzy_cutoff))
            .map(|(record, _)| record)
    }
}

// ============================================================================
// SIMILARITY SCORING
// ============================================================================

/// Normalized similarity score in [0, 100].
///
/// Takes the maximum of three views so that no single failure mode
/// dominates:
/// - normalized Levenshtein for plain edit distance
/// - normalized Levenshtein over alphabetically sorted tokens, so word
///   order does not sink a match ("Partners Globex" vs "Globex Partners")
/// - containment, slightly discounted, so a query that embeds the full
///   vendor name (or vice versa) still scores high ("Acme" vs
///   "Acme Corporation")
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();

    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let direct = strsim::normalized_levenshtein(&a, &b);
    let token_sorted = strsim::normalized_levenshtein(&token_sort(&a), &token_sort(&b));
    let contained = if a.len() >= 3 && b.len() >= 3 && (a.contains(&b) || b.contains(&a)) {
        0.9
    } else {
        0.0
    };

    100.0 * direct.max(token_sorted).max(contained)
}

fn token_sort(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::VendorRecord;

    fn registry() -> VendorRegistry {
        VendorRegistry::new(vec![
            VendorRecord {
                vendor_name: "Acme Corp".to_string(),
                external_id: "5097".to_string(),
                owner_name: "Jane Q Doe".to_string(),
            },
            VendorRecord {
                vendor_name: "Globex Partners".to_string(),
                external_id: "6120A".to_string(),
                owner_name: "Sam Lee".to_string(),
            },
            VendorRecord {
                vendor_name: "Initech Holdings".to_string(),
                external_id: "7001".to_string(),
                owner_name: "Pat Kim".to_string(),
            },
        ])
    }

    #[test]
    fn test_id_match_bypasses_fuzzy() {
        let registry = registry();
        let config = RenamerConfig::default();
        let resolver = VendorResolver::new(&registry, &config);

        // Folder text points at a different vendor; the ID must win
        let path = Path::new("contracts/Globex Partners/5097_contract.docx");
        let record = resolver.resolve(path).unwrap();

        assert_eq!(record.vendor_name, "Acme Corp");
    }

    #[test]
    fn test_id_with_letter_and_quotes() {
        let registry = registry();
        let config = RenamerConfig::default();
        let resolver = VendorResolver::new(&registry, &config);

        let path = Path::new("contracts/'6120A' renewal.pdf");
        let record = resolver.resolve(path).unwrap();

        assert_eq!(record.vendor_name, "Globex Partners");
    }

    #[test]
    fn test_registered_id_wins_over_earlier_id_shaped_tokens() {
        let registry = registry();
        let config = RenamerConfig::default();
        let resolver = VendorResolver::new(&registry, &config);

        // "2024" is ID-shaped but unregistered; the real ID further along
        // must still resolve
        let path = Path::new("contracts/2024 renewal 5097.pdf");
        let record = resolver.resolve(path).unwrap();

        assert_eq!(record.vendor_name, "Acme Corp");
    }

    #[test]
    fn test_unknown_id_falls_back_to_fuzzy() {
        let registry = registry();
        let config = RenamerConfig::default();
        let resolver = VendorResolver::new(&registry, &config);

        let path = Path::new("vendors/Globex Partners/9999_renewal.pdf");
        let record = resolver.resolve(path).unwrap();

        assert_eq!(record.vendor_name, "Globex Partners");
    }

    #[test]
    fn test_fuzzy_match_from_folder() {
        let registry = registry();
        let config = RenamerConfig::default();
        let resolver = VendorResolver::new(&registry, &config);

        let path = Path::new("contracts/Acme Corp - Drafts/renewal letter.docx");
        let record = resolver.resolve(path).unwrap();

        assert_eq!(record.vendor_name, "Acme Corp");
    }

    #[test]
    fn test_fuzzy_match_from_filename_when_configured() {
        let registry = registry();
        let config = RenamerConfig {
            vendor_text: VendorTextSource::Filename,
            ..RenamerConfig::default()
        };
        let resolver = VendorResolver::new(&registry, &config);

        let path = Path::new("inbox/Initech Holdings agreement draft.docx");
        let record = resolver.resolve(path).unwrap();

        assert_eq!(record.vendor_name, "Initech Holdings");
    }

    #[test]
    fn test_all_tokens_stop_worded_returns_none() {
        let registry = registry();
        let config = RenamerConfig::default();
        let resolver = VendorResolver::new(&registry, &config);

        // Every folder token is a stop word or digits
        let path = Path::new("drafts/final signed 2024/agreement.pdf");
        assert!(resolver.resolve(path).is_none());
    }

    #[test]
    fn test_no_match_below_cutoff() {
        let registry = registry();
        let config = RenamerConfig::default();
        let resolver = VendorResolver::new(&registry, &config);

        let path = Path::new("zzqx/wvyk.pdf");
        assert!(resolver.resolve(path).is_none());
    }

    #[test]
    fn test_vendor_query_filters_tokens() {
        let registry = registry();
        let config = RenamerConfig::default();
        let resolver = VendorResolver::new(&registry, &config);

        let query = resolver.vendor_query("Acme Widgets - Draft Agreement 2024_v2");
        assert_eq!(query, "Acme Widgets v2");
    }

    #[test]
    fn test_similarity_bounds() {
        assert_eq!(similarity("", "anything"), 0.0);
        assert_eq!(similarity("acme", ""), 0.0);
        assert_eq!(similarity("Acme Corp", "acme corp"), 100.0);
        assert!(similarity("zzqx wvyk", "Acme Corp") < 40.0);
    }

    #[test]
    fn test_similarity_rewards_containment() {
        assert!(similarity("Acme", "Acme Corporation") >= 80.0);
        assert!(similarity("contracts acme corp", "Acme Corp") >= 80.0);
    }

    #[test]
    fn test_similarity_ignores_token_order() {
        assert!(similarity("Partners Globex", "Globex Partners") >= 90.0);
    }
}
