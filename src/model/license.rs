//! License data structures.
//!
//! Uses the `spdx` crate to check ids against the SPDX license list when
//! constructing an id-based license. Expressions are carried as raw strings
//! and are not validated at this layer.

use std::fmt;

/// A single disjunctive license: an SPDX id **or** a free-text name, with an
/// optional URL pointing at the license text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DisjunctiveLicense {
    /// A license identified by its SPDX short identifier.
    Spdx { id: String, url: Option<String> },
    /// A license only known by name.
    Named { name: String, url: Option<String> },
}

impl DisjunctiveLicense {
    /// Create an SPDX-id license, checking the id against the SPDX license
    /// list. Returns `None` for ids the list does not know.
    #[must_use]
    pub fn try_spdx(id: &str) -> Option<Self> {
        spdx::license_id(id).map(|known| Self::Spdx {
            id: known.name.to_owned(),
            url: None,
        })
    }

    /// Create a named license.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named {
            name: name.into(),
            url: None,
        }
    }

    /// Attach a URL to the license text.
    #[must_use]
    pub fn with_url(self, url: impl Into<String>) -> Self {
        match self {
            Self::Spdx { id, .. } => Self::Spdx {
                id,
                url: Some(url.into()),
            },
            Self::Named { name, .. } => Self::Named {
                name,
                url: Some(url.into()),
            },
        }
    }

    /// The URL attached to this license, if any.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Spdx { url, .. } | Self::Named { url, .. } => url.as_deref(),
        }
    }
}

impl fmt::Display for DisjunctiveLicense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spdx { id, .. } => f.write_str(id),
            Self::Named { name, .. } => f.write_str(name),
        }
    }
}

/// One license statement: a disjunctive license or a raw SPDX expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LicenseChoice {
    License(DisjunctiveLicense),
    Expression(String),
}

impl LicenseChoice {
    /// Create an expression choice from a raw SPDX expression string.
    #[must_use]
    pub fn expression(expr: impl Into<String>) -> Self {
        Self::Expression(expr.into())
    }
}

/// An ordered, value-deduplicated collection of disjunctive licenses.
///
/// Expressions cannot be stored here; the element type admits only the two
/// disjunctive variants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LicenseRepository {
    items: Vec<DisjunctiveLicense>,
}

impl LicenseRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a license, skipping value-equal duplicates. Returns whether the
    /// license was added.
    pub fn add(&mut self, license: DisjunctiveLicense) -> bool {
        if self.items.contains(&license) {
            return false;
        }
        self.items.push(license);
        true
    }

    #[must_use]
    pub fn iter(&self) -> std::slice::Iter<'_, DisjunctiveLicense> {
        self.items.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<DisjunctiveLicense> for LicenseRepository {
    fn from_iter<I: IntoIterator<Item = DisjunctiveLicense>>(iter: I) -> Self {
        let mut repo = Self::new();
        for license in iter {
            repo.add(license);
        }
        repo
    }
}

impl<'a> IntoIterator for &'a LicenseRepository {
    type Item = &'a DisjunctiveLicense;
    type IntoIter = std::slice::Iter<'a, DisjunctiveLicense>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// A component's license field: a single choice or a repository of
/// disjunctive licenses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Licensing {
    Choice(LicenseChoice),
    Repository(LicenseRepository),
}
