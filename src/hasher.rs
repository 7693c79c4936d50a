use crate::maybestd::{fmt::Debug, hash::Hash};
use crate::Digest;
use sha2::digest::{consts::U32, OutputSizeUser};
use sha2::Sha256;
use sha3::Keccak256;

/// A trait for hashing data into a merkle tree
pub trait MerkleHash {
    /// The output of this hasher.
    #[cfg(all(not(feature = "serde"), not(feature = "borsh")))]
    type Output: Debug + PartialEq + Eq + Clone + Default + Hash + Ord;

    /// The output of this hasher.
    #[cfg(all(feature = "serde", not(feature = "borsh")))]
    type Output: Debug
        + PartialEq
        + Eq
        + Clone
        + Default
        + Hash
        + Ord
        + serde::Serialize
        + serde::de::DeserializeOwned;

    /// The output of this hasher.
    #[cfg(all(not(feature = "serde"), feature = "borsh"))]
    type Output: Debug
        + PartialEq
        + Eq
        + Clone
        + Default
        + Hash
        + Ord
        + borsh::BorshSerialize
        + borsh::BorshDeserialize;

    /// The output of this hasher.
    #[cfg(all(feature = "serde", feature = "borsh"))]
    type Output: Debug
        + PartialEq
        + Eq
        + Clone
        + Default
        + Hash
        + Ord
        + serde::Serialize
        + serde::de::DeserializeOwned
        + borsh::BorshSerialize
        + borsh::BorshDeserialize;

    /// Hashes raw data (e.g. a transaction identifier) into a leaf of the tree.
    fn hash_leaf(&self, data: &[u8]) -> Self::Output;
    /// Combines two digests into their parent. The result must not depend on the order of the arguments.
    fn hash_nodes(&self, l: &Self::Output, r: &Self::Output) -> Self::Output;
}

fn hash<D>(bytes: &[u8]) -> Digest
where
    D: sha2::Digest + OutputSizeUser<OutputSize = U32>,
{
    Digest(D::digest(bytes).into())
}

/// H(min(l, r) || max(l, r))
fn hash_sorted_pair<D>(l: &Digest, r: &Digest) -> Digest
where
    D: sha2::Digest + OutputSizeUser<OutputSize = U32>,
{
    let (first, second) = if l <= r { (l, r) } else { (r, l) };
    let mut hasher = D::new();
    hasher.update(first);
    hasher.update(second);
    Digest(hasher.finalize().into())
}

/// A keccak256 hasher which sorts each pair of siblings before hashing them.
///
/// Leaves are hashed without a domain separator, so `hash_leaf(tx_hash)` equals `keccak256(tx_hash)`,
/// the same value an EVM contract computes for the leaf.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Keccak256Hasher;

impl Keccak256Hasher {
    /// Create a new instance of the hasher
    pub fn new() -> Self {
        Keccak256Hasher
    }
}

impl MerkleHash for Keccak256Hasher {
    type Output = Digest;

    fn hash_leaf(&self, data: &[u8]) -> Self::Output {
        hash::<Keccak256>(data)
    }

    fn hash_nodes(&self, l: &Self::Output, r: &Self::Output) -> Self::Output {
        hash_sorted_pair::<Keccak256>(l, r)
    }
}

/// A sha256 hasher with the same sorted-pair convention as [`Keccak256Hasher`]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Sha256Hasher;

impl Sha256Hasher {
    /// Create a new instance of the hasher
    pub fn new() -> Self {
        Sha256Hasher
    }
}

impl MerkleHash for Sha256Hasher {
    type Output = Digest;

    fn hash_leaf(&self, data: &[u8]) -> Self::Output {
        hash::<Sha256>(data)
    }

    fn hash_nodes(&self, l: &Self::Output, r: &Self::Output) -> Self::Output {
        hash_sorted_pair::<Sha256>(l, r)
    }
}

/// Computes the keccak256 digest of the given bytes.
pub fn digest(bytes: &[u8]) -> Digest {
    Keccak256Hasher.hash_leaf(bytes)
}

/// Combines two digests with keccak256, smaller digest first. `combine(a, b) == combine(b, a)`.
pub fn combine(a: &Digest, b: &Digest) -> Digest {
    Keccak256Hasher.hash_nodes(a, b)
}
