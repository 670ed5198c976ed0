//! External reference structures.

use super::HashAlgorithm;
use indexmap::IndexMap;
use std::fmt;

/// Classification of an external reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ExternalRefType {
    Vcs,
    IssueTracker,
    Website,
    Advisories,
    Bom,
    Mailinglist,
    Social,
    Chat,
    Documentation,
    Support,
    Distribution,
    License,
    BuildMeta,
    BuildSystem,
    ReleaseNotes,
    Other(String),
}

impl ExternalRefType {
    /// The schema spelling of this reference type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Vcs => "vcs",
            Self::IssueTracker => "issue-tracker",
            Self::Website => "website",
            Self::Advisories => "advisories",
            Self::Bom => "bom",
            Self::Mailinglist => "mailing-list",
            Self::Social => "social",
            Self::Chat => "chat",
            Self::Documentation => "documentation",
            Self::Support => "support",
            Self::Distribution => "distribution",
            Self::License => "license",
            Self::BuildMeta => "build-meta",
            Self::BuildSystem => "build-system",
            Self::ReleaseNotes => "release-notes",
            Self::Other(other) => other,
        }
    }
}

impl fmt::Display for ExternalRefType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A link from the document to something outside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalReference {
    pub reference_type: ExternalRefType,
    pub url: String,
    pub comment: Option<String>,
    /// Digests of the referenced artifact. Emitted only where the active
    /// schema version allows hashes on external references.
    pub hashes: IndexMap<HashAlgorithm, String>,
}

impl ExternalReference {
    /// Create a reference with the given type and URL.
    #[must_use]
    pub fn new(reference_type: ExternalRefType, url: impl Into<String>) -> Self {
        Self {
            reference_type,
            url: url.into(),
            comment: None,
            hashes: IndexMap::new(),
        }
    }

    /// Attach a comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ref_type_spellings() {
        assert_eq!(ExternalRefType::IssueTracker.as_str(), "issue-tracker");
        assert_eq!(ExternalRefType::Vcs.as_str(), "vcs");
        assert_eq!(ExternalRefType::Other("custom-kind".into()).as_str(), "custom-kind");
    }

    #[test]
    fn references_compare_by_value() {
        let a = ExternalReference::new(ExternalRefType::Website, "https://example.com");
        let b = ExternalReference::new(ExternalRefType::Website, "https://example.com");
        assert_eq!(a, b);

        let c = b.clone().with_comment("homepage");
        assert_ne!(a, c);
    }
}
