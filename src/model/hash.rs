//! Cryptographic hash algorithms known to the CycloneDX schemas.

use std::fmt;

/// Hash algorithm identifier.
///
/// The set is closed: digests for algorithms outside this list are dropped
/// at ingestion rather than carried as opaque strings, because no schema
/// version can emit them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    Sha256,
    Sha384,
    Sha512,
    Sha3_256,
    Sha3_384,
    Sha3_512,
    Blake2b256,
    Blake2b384,
    Blake2b512,
    Blake3,
}

impl HashAlgorithm {
    /// The schema spelling of this algorithm.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Md5 => "MD5",
            Self::Sha1 => "SHA-1",
            Self::Sha256 => "SHA-256",
            Self::Sha384 => "SHA-384",
            Self::Sha512 => "SHA-512",
            Self::Sha3_256 => "SHA3-256",
            Self::Sha3_384 => "SHA3-384",
            Self::Sha3_512 => "SHA3-512",
            Self::Blake2b256 => "BLAKE2b-256",
            Self::Blake2b384 => "BLAKE2b-384",
            Self::Blake2b512 => "BLAKE2b-512",
            Self::Blake3 => "BLAKE3",
        }
    }

    /// Parse a schema spelling, case-insensitively. Unknown names yield `None`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_uppercase().as_str() {
            "MD5" => Some(Self::Md5),
            "SHA-1" => Some(Self::Sha1),
            "SHA-256" => Some(Self::Sha256),
            "SHA-384" => Some(Self::Sha384),
            "SHA-512" => Some(Self::Sha512),
            "SHA3-256" => Some(Self::Sha3_256),
            "SHA3-384" => Some(Self::Sha3_384),
            "SHA3-512" => Some(Self::Sha3_512),
            "BLAKE2B-256" => Some(Self::Blake2b256),
            "BLAKE2B-384" => Some(Self::Blake2b384),
            "BLAKE2B-512" => Some(Self::Blake2b512),
            "BLAKE3" => Some(Self::Blake3),
            _ => None,
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_roundtrips_schema_spellings() {
        for alg in [
            HashAlgorithm::Md5,
            HashAlgorithm::Sha1,
            HashAlgorithm::Sha256,
            HashAlgorithm::Sha3_384,
            HashAlgorithm::Blake2b512,
            HashAlgorithm::Blake3,
        ] {
            assert_eq!(HashAlgorithm::from_name(alg.as_str()), Some(alg));
        }
    }

    #[test]
    fn from_name_is_case_insensitive() {
        assert_eq!(HashAlgorithm::from_name("sha-256"), Some(HashAlgorithm::Sha256));
        assert_eq!(HashAlgorithm::from_name("blake2b-256"), Some(HashAlgorithm::Blake2b256));
    }

    #[test]
    fn from_name_rejects_unknown_algorithms() {
        assert_eq!(HashAlgorithm::from_name("CRC32"), None);
        assert_eq!(HashAlgorithm::from_name(""), None);
    }
}
