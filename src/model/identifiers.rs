//! Document-unique identifiers: the `bom-ref` identity cell and the
//! UUID-urn serial number.

use crate::error::Error;
use regex::Regex;
use std::cell::RefCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use std::str::FromStr;
use std::sync::LazyLock;

/// A mutable identity cell naming one node of the document graph.
///
/// `BomRef` compares and hashes by **identity**, never by value: two distinct
/// cells are never equal even when their contained strings match, and cloning
/// the handle shares identity with its source. Dependency membership and
/// discrimination both rely on this.
///
/// The contained value is read and written by application code; during one
/// `serialize()` call it may be transiently overwritten and is restored
/// before the call returns.
#[derive(Clone)]
pub struct BomRef(Rc<RefCell<Option<String>>>);

impl BomRef {
    /// Create a new cell. Empty strings are normalized to `None`.
    #[must_use]
    pub fn new(value: Option<String>) -> Self {
        Self(Rc::new(RefCell::new(normalize(value))))
    }

    /// Create a new cell holding the given value.
    #[must_use]
    pub fn with_value(value: impl Into<String>) -> Self {
        Self::new(Some(value.into()))
    }

    /// Create a new unnamed cell.
    #[must_use]
    pub fn unset() -> Self {
        Self::new(None)
    }

    /// The current value, if any.
    #[must_use]
    pub fn value(&self) -> Option<String> {
        self.0.borrow().clone()
    }

    /// Overwrite the current value. Empty strings are normalized to `None`.
    pub fn set_value(&self, value: Option<String>) {
        *self.0.borrow_mut() = normalize(value);
    }

    /// Stable identity token for this cell, valid for the cell's lifetime.
    pub(crate) fn identity(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl Default for BomRef {
    fn default() -> Self {
        Self::unset()
    }
}

impl PartialEq for BomRef {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for BomRef {}

impl Hash for BomRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.identity());
    }
}

impl fmt::Debug for BomRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BomRef").field(&self.0.borrow()).finish()
    }
}

static URN_UUID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^urn:uuid:[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$",
    )
    .expect("static regex")
});

/// Validated BOM serial number in `urn:uuid:...` form.
///
/// Construction goes through [`FromStr`]; a malformed value is rejected at
/// this boundary with [`Error::InvalidIdentifier`], before any serialization
/// begins.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UrnUuid(String);

impl UrnUuid {
    /// The serial number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for UrnUuid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if URN_UUID_RE.is_match(s) {
            Ok(Self(s.to_owned()))
        } else {
            Err(Error::InvalidIdentifier(format!(
                "serial number '{s}' does not match urn:uuid:<uuid>"
            )))
        }
    }
}

impl fmt::Display for UrnUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UrnUuid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bom_ref_identity_not_value_equality() {
        let a = BomRef::with_value("same");
        let b = BomRef::with_value("same");
        assert_ne!(a, b, "distinct cells with equal values are never equal");

        let c = a.clone();
        assert_eq!(a, c, "a cloned handle shares identity");
        c.set_value(Some("changed".into()));
        assert_eq!(a.value().as_deref(), Some("changed"));
    }

    #[test]
    fn bom_ref_empty_string_is_none() {
        let r = BomRef::with_value("");
        assert_eq!(r.value(), None);
        r.set_value(Some(String::new()));
        assert_eq!(r.value(), None);
    }

    #[test]
    fn urn_uuid_accepts_valid_serial_numbers() {
        let sn: UrnUuid = "urn:uuid:12345678-1234-1234-1234-123456789012"
            .parse()
            .expect("valid serial number");
        assert_eq!(sn.as_str(), "urn:uuid:12345678-1234-1234-1234-123456789012");

        assert!("urn:uuid:ABCDEF01-abcd-ABCD-abcd-ABCDEF012345"
            .parse::<UrnUuid>()
            .is_ok());
    }

    #[test]
    fn urn_uuid_rejects_malformed_input() {
        for bad in [
            "",
            "12345678-1234-1234-1234-123456789012",
            "urn:uuid:not-a-uuid",
            "urn:uuid:12345678-1234-1234-1234-12345678901",
            "uuid:12345678-1234-1234-1234-123456789012",
        ] {
            let err = bad.parse::<UrnUuid>().expect_err("should be rejected");
            assert!(matches!(err, Error::InvalidIdentifier(_)), "{bad}: {err}");
        }
    }
}
