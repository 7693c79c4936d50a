use crate::maybestd::{fmt, string::String, vec::Vec};
use crate::merkle::error::MerkleError;

/// The length of a digest in bytes
pub const HASH_LEN: usize = 32;

const HEX_PREFIX: &str = "0x";

/// A fixed-width hash output. Leaves, inner nodes, and roots are all digests.
///
/// Digests are ordered byte-wise, which is the ordering used when hashing sibling pairs.
#[derive(PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Digest(pub [u8; HASH_LEN]);

impl Digest {
    /// Wraps the given bytes
    pub const fn new(bytes: [u8; HASH_LEN]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying bytes
    pub fn as_bytes(&self) -> &[u8; HASH_LEN] {
        &self.0
    }

    /// Encodes the digest as lowercase hex with a `0x` prefix, the form EVM tooling uses.
    pub fn to_hex(&self) -> String {
        let mut out = String::with_capacity(HEX_PREFIX.len() + 2 * HASH_LEN);
        out.push_str(HEX_PREFIX);
        out.push_str(&hex::encode(self.0));
        out
    }

    /// Parses a hex encoded digest. The `0x` prefix is optional.
    pub fn from_hex(encoded: &str) -> Result<Self, MerkleError> {
        let encoded = encoded.strip_prefix(HEX_PREFIX).unwrap_or(encoded);
        let bytes: Vec<u8> = hex::decode(encoded)?;
        Self::try_from(bytes.as_slice())
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl From<[u8; HASH_LEN]> for Digest {
    fn from(bytes: [u8; HASH_LEN]) -> Self {
        Self(bytes)
    }
}

impl From<Digest> for [u8; HASH_LEN] {
    fn from(digest: Digest) -> Self {
        digest.0
    }
}

impl TryFrom<&[u8]> for Digest {
    type Error = MerkleError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; HASH_LEN] = value.try_into().map_err(|_| MerkleError::InvalidDigest {
            expected: HASH_LEN,
            got: value.len(),
        })?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(HEX_PREFIX)?;
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({self})")
    }
}
