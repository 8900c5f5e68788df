// 🏷️ Document Type Classification - Ordered keyword rules
// Rule order is load-bearing: specific labels must be tested before the
// generic ones they contain ("annex a" before "annex", "legal a" before
// "legal"). First match wins.

use serde::{Deserialize, Serialize};

// ============================================================================
// DOCUMENT TYPE
// ============================================================================

/// Closed set of document-type labels embedded in generated filenames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocType {
    Amendment,
    RoyaltyStatement,
    AnnualReminderLetter,
    AnnualLetter,
    AnnexA,
    AnnexB,
    AnnexC,
    AnnexD,
    Annex,
    LegalDocumentA,
    LegalDocument,
    Agreement,
    Proposal,
    Nda,
    Other,
}

impl DocType {
    /// Display label as embedded in filenames.
    pub fn label(&self) -> &'static str {
        match self {
            DocType::Amendment => "Amendment",
            DocType::RoyaltyStatement => "Royalty Statement",
            DocType::AnnualReminderLetter => "Annual Reminder Letter",
            DocType::AnnualLetter => "Annual Letter",
            DocType::AnnexA => "Annex A",
            DocType::AnnexB => "Annex B",
            DocType::AnnexC => "Annex C",
            DocType::AnnexD => "Annex D",
            DocType::Annex => "Annex",
            DocType::LegalDocumentA => "Legal Document A",
            DocType::LegalDocument => "Legal Document",
            DocType::Agreement => "Agreement",
            DocType::Proposal => "Proposal",
            DocType::Nda => "NDA",
            DocType::Other => "Other",
        }
    }

    /// Legal-document variants get first-page date priority during
    /// extraction.
    pub fn is_legal(&self) -> bool {
        matches!(self, DocType::LegalDocumentA | DocType::LegalDocument)
    }
}

// ============================================================================
// CLASSIFICATION RULES
// ============================================================================

/// Ordered (keywords, label) pairs, evaluated top to bottom against the
/// lower-cased filename. Reordering this table changes classification
/// output; keep every specific rule above the generic rule it shadows.
/// Each label's own rendered form must also match its rule so that
/// classifying a generated filename reproduces the embedded label.
pub const CLASSIFICATION_RULES: &[(&[&str], DocType)] = &[
    (&["amendment", "amdt"], DocType::Amendment),
    (&["royalty", "statement"], DocType::RoyaltyStatement),
    (&["reminder"], DocType::AnnualReminderLetter),
    (&["annual"], DocType::AnnualLetter),
    (&["annex a", "annex_a"], DocType::AnnexA),
    (&["annex b", "annex_b"], DocType::AnnexB),
    (&["annex c", "annex_c"], DocType::AnnexC),
    (&["annex d", "annex_d"], DocType::AnnexD),
    (&["annex"], DocType::Annex),
    (&["legal a", "legal_a", "legal document a"], DocType::LegalDocumentA),
    (&["legal"], DocType::LegalDocument),
    (&["agreement"], DocType::Agreement),
    (&["proposal"], DocType::Proposal),
    (&["nda", "non disclosure"], DocType::Nda),
];

/// Classify a filename by its first matching keyword rule; `Other` when
/// nothing matches.
pub fn classify(filename: &str) -> DocType {
    let name = filename.to_lowercase();

    for (keywords, doc_type) in CLASSIFICATION_RULES {
        if keywords.iter().any(|keyword| name.contains(keyword)) {
            return *doc_type;
        }
    }

    DocType::Other
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_labels() {
        assert_eq!(classify("Acme Amendment 2024.pdf"), DocType::Amendment);
        assert_eq!(classify("Q3 amdt final.docx"), DocType::Amendment);
        assert_eq!(classify("royalty report.xlsx"), DocType::RoyaltyStatement);
        assert_eq!(classify("bank statement.pdf"), DocType::RoyaltyStatement);
        assert_eq!(classify("annual reminder 2024.pdf"), DocType::AnnualReminderLetter);
        assert_eq!(classify("annual letter.pdf"), DocType::AnnualLetter);
        assert_eq!(classify("signed agreement.pdf"), DocType::Agreement);
        assert_eq!(classify("pricing proposal v2.docx"), DocType::Proposal);
        assert_eq!(classify("mutual NDA draft.docx"), DocType::Nda);
        assert_eq!(classify("non disclosure terms.pdf"), DocType::Nda);
        assert_eq!(classify("contract.pdf"), DocType::Other);
        assert_eq!(classify("notes.txt"), DocType::Other);
    }

    #[test]
    fn test_specific_beats_generic() {
        // "annex a" must win over bare "annex"
        assert_eq!(classify("annex a - rates.pdf"), DocType::AnnexA);
        assert_eq!(classify("annex_b terms.pdf"), DocType::AnnexB);
        assert_eq!(classify("annex C.pdf"), DocType::AnnexC);
        assert_eq!(classify("ANNEX_D.pdf"), DocType::AnnexD);
        assert_eq!(classify("annex overview.pdf"), DocType::Annex);

        // "legal a" must win over bare "legal"
        assert_eq!(classify("legal a review.pdf"), DocType::LegalDocumentA);
        assert_eq!(classify("legal_a.pdf"), DocType::LegalDocumentA);
        assert_eq!(classify("legal review.pdf"), DocType::LegalDocument);

        // legal rules sit above the generic "agreement" rule
        assert_eq!(classify("legal agreement.pdf"), DocType::LegalDocument);
    }

    #[test]
    fn test_reminder_beats_annual() {
        assert_eq!(classify("annual reminder letter.pdf"), DocType::AnnualReminderLetter);
        assert_eq!(classify("annual letter 2023.pdf"), DocType::AnnualLetter);
    }

    #[test]
    fn test_classification_is_idempotent() {
        for name in ["annex a - rates.pdf", "signed agreement.pdf", "contract.pdf"] {
            assert_eq!(classify(name), classify(name));
        }
    }

    #[test]
    fn test_labels_round_trip_through_classify() {
        // Classifying a generated filename must reproduce the embedded
        // label for every classifiable type
        for (_, doc_type) in CLASSIFICATION_RULES {
            let filename = format!("20240315-ISO-Vendor Name-{}-JQD.pdf", doc_type.label());
            assert_eq!(
                classify(&filename),
                *doc_type,
                "label {:?} did not round-trip",
                doc_type.label()
            );
        }
    }

    #[test]
    fn test_is_legal() {
        assert!(DocType::LegalDocument.is_legal());
        assert!(DocType::LegalDocumentA.is_legal());
        assert!(!DocType::Agreement.is_legal());
        assert!(!DocType::Other.is_legal());
    }
}
