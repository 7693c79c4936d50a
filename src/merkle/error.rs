/// An error that occurred while building, proving against, or decoding a merkle tree.
#[derive(Debug, PartialEq, Clone, thiserror::Error)]
pub enum MerkleError {
    /// No leaves were provided, so no root can be defined
    #[error("cannot build a merkle tree without leaves")]
    EmptyInput,
    /// A proof was requested for a leaf position that the tree does not have
    #[error("leaf index {index} is out of range for a tree of {len} leaves")]
    IndexOutOfRange {
        /// The requested leaf index
        index: usize,
        /// The number of leaves in the tree
        len: usize,
    },
    /// A value presented as a digest has the wrong width
    #[error("invalid digest: expected {expected} bytes, got {got}")]
    InvalidDigest {
        /// The width of a digest under the hasher in use
        expected: usize,
        /// The width that was actually provided
        got: usize,
    },
    /// A hex encoded value contained invalid characters or an odd number of digits
    #[error("invalid hex encoding: {0}")]
    InvalidHex(hex::FromHexError),
    /// A proof was requested by value for a leaf that is not in the tree
    #[error("the tree does not contain the requested leaf")]
    LeafNotFound,
}

impl From<hex::FromHexError> for MerkleError {
    fn from(e: hex::FromHexError) -> Self {
        MerkleError::InvalidHex(e)
    }
}
