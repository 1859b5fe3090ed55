//! Submission validation
//!
//! Rules are evaluated independently so every violation is reported at once.
//! Validation is pure: no network, no storage.

use crate::Submission;
use std::collections::BTreeMap;
use std::fmt;

/// Field path for the content rule
pub const FIELD_CONTENT: &str = "content";

/// Field path for the citation-count rule
pub const FIELD_CITATION_COUNT: &str = "metadata.citationCount";

/// Field path for the reference-url rule
pub const FIELD_REFERENCE_URLS: &str = "metadata.referenceUrls";

/// Outcome of validating one submission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Field path -> message, for every violated rule
    pub field_errors: BTreeMap<String, String>,
}

impl ValidationReport {
    /// Whether no rule was violated
    pub fn is_valid(&self) -> bool {
        self.field_errors.is_empty()
    }

    /// Message for a field, if it failed
    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.field_errors.get(field).map(String::as_str)
    }

    fn reject(&mut self, field: &str, message: &str) {
        self.field_errors.insert(field.to_string(), message.to_string());
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .field_errors
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

/// Validate a submission
///
/// # Examples
///
/// ```
/// use credence_domain::{validate, Submission};
///
/// let mut submission = Submission::new("Test");
/// assert!(validate(&submission).is_valid());
///
/// submission.metadata.has_citations = true;
/// let report = validate(&submission);
/// assert!(report.error_for("metadata.citationCount").is_some());
/// ```
pub fn validate(submission: &Submission) -> ValidationReport {
    let mut report = ValidationReport::default();

    if submission.content.trim().is_empty() {
        report.reject(FIELD_CONTENT, "Content is required");
    }

    let metadata = &submission.metadata;

    if metadata.has_citations && metadata.citation_count == 0 {
        report.reject(
            FIELD_CITATION_COUNT,
            "Citation count must be greater than 0 if citations are present",
        );
    }

    if metadata.has_references && metadata.reference_urls.is_empty() {
        report.reject(
            FIELD_REFERENCE_URLS,
            "Reference URLs are required if references are present",
        );
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_submission() {
        let submission = Submission::new("The council approved the budget");
        assert!(validate(&submission).is_valid());
    }

    #[test]
    fn test_blank_content_rejected() {
        let submission = Submission::new("   \n\t");
        let report = validate(&submission);
        assert_eq!(report.error_for(FIELD_CONTENT), Some("Content is required"));
    }

    #[test]
    fn test_citations_without_count_rejected() {
        let mut submission = Submission::new("Test");
        submission.metadata.has_citations = true;

        let report = validate(&submission);
        assert!(!report.is_valid());
        assert!(report.error_for(FIELD_CITATION_COUNT).is_some());

        submission.metadata.citation_count = 2;
        assert!(validate(&submission).is_valid());
    }

    #[test]
    fn test_references_without_urls_rejected() {
        let mut submission = Submission::new("Test");
        submission.metadata.has_references = true;

        let report = validate(&submission);
        assert!(report.error_for(FIELD_REFERENCE_URLS).is_some());

        submission.metadata.add_reference_url("https://example.org/report.pdf");
        assert!(validate(&submission).is_valid());
    }

    #[test]
    fn test_all_violations_reported() {
        let mut submission = Submission::new("");
        submission.metadata.has_citations = true;
        submission.metadata.has_references = true;

        let report = validate(&submission);
        assert_eq!(report.field_errors.len(), 3);
        assert!(report.to_string().contains("content: Content is required"));
    }

    #[test]
    fn test_count_without_flag_is_fine() {
        let mut submission = Submission::new("Test");
        submission.metadata.citation_count = 4;
        submission.metadata.reference_urls.push("https://example.org".into());
        assert!(validate(&submission).is_valid());
    }
}
