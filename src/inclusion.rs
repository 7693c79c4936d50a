use crate::hasher::{Keccak256Hasher, MerkleHash};
use crate::maybestd::{string::String, vec::Vec};
use crate::merkle::{error::MerkleError, options::TreeOptions, proof::Proof, tree::MerkleTree};
use crate::source::{hash_identifiers, LeafSource};
use crate::Digest;

/// An error that occurred while proving that a transaction is included in a block
#[derive(Debug, thiserror::Error)]
pub enum InclusionError<E> {
    /// The leaf source failed to return the block's transactions
    #[error("failed to fetch transactions: {0}")]
    Source(E),
    /// The leaf source does not know the block
    #[error("block {0} was not found")]
    BlockNotFound(u64),
    /// The block's transactions could not be proven against
    #[error(transparent)]
    Merkle(#[from] MerkleError),
}

/// Everything needed to check that a transaction is part of a block: the leaf, its proof, and the root
/// committing to all transactions of the block.
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = ""))]
pub struct InclusionProof<M: MerkleHash = Keccak256Hasher> {
    /// The block the transaction was found in
    pub block: u64,
    /// The digest of the transaction identifier
    pub leaf: M::Output,
    /// The path from the leaf to the root
    pub proof: Proof<M>,
    /// The root of the tree over every transaction in the block
    pub root: M::Output,
}

impl<M> InclusionProof<M>
where
    M: MerkleHash + Default,
{
    /// Checks the proof against the root it carries
    pub fn verify(&self) -> bool {
        self.proof.verify(&self.leaf, &self.root)
    }
}

impl<M> InclusionProof<M>
where
    M: MerkleHash<Output = Digest>,
{
    /// Encodes every digest as a `0x` prefixed hex string
    pub fn to_hex(&self) -> HexInclusionProof {
        HexInclusionProof {
            block: self.block,
            leaf: self.leaf.to_hex(),
            proof: self.proof.to_hex(),
            root: self.root.to_hex(),
        }
    }
}

/// The wire form of an [`InclusionProof`], as exchanged with verifier contracts and user interfaces
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HexInclusionProof {
    /// The block the transaction was found in
    pub block: u64,
    /// The hex encoded leaf
    pub leaf: String,
    /// The hex encoded siblings, from the leaf to the root
    pub proof: Vec<String>,
    /// The hex encoded root
    pub root: String,
}

impl HexInclusionProof {
    /// Parses every digest, failing on the first one that is not valid hex of the right width
    pub fn decode<M>(&self) -> Result<InclusionProof<M>, MerkleError>
    where
        M: MerkleHash<Output = Digest>,
    {
        Ok(InclusionProof {
            block: self.block,
            leaf: Digest::from_hex(&self.leaf)?,
            proof: Proof::from_hex(&self.proof)?,
            root: Digest::from_hex(&self.root)?,
        })
    }
}

/// Proves that the transaction identified by `tx_id` is part of `block`, using keccak256 and the default options.
///
/// The leaf is `keccak256(tx_id)`, and the tree is built over the keccak256 of every identifier in the block.
pub fn prove_transaction<S: LeafSource>(
    source: &S,
    block: u64,
    tx_id: &[u8],
) -> Result<InclusionProof, InclusionError<S::Error>> {
    prove_transaction_with_hasher(source, block, tx_id, TreeOptions::default(), Keccak256Hasher)
}

/// Proves that the transaction identified by `tx_id` is part of `block`, building the tree with the given
/// options and hasher.
pub fn prove_transaction_with_hasher<S, M>(
    source: &S,
    block: u64,
    tx_id: &[u8],
    options: TreeOptions,
    hasher: M,
) -> Result<InclusionProof<M>, InclusionError<S::Error>>
where
    S: LeafSource,
    M: MerkleHash,
{
    let ids = source
        .transaction_ids(block)
        .map_err(InclusionError::Source)?
        .ok_or(InclusionError::BlockNotFound(block))?;
    tracing::debug!(block, transactions = ids.len(), "fetched block transactions");

    let leaves = hash_identifiers(&hasher, &ids);
    let leaf = hasher.hash_leaf(tx_id);
    let tree = MerkleTree::with_hasher(leaves, options, hasher)?;
    let proof = tree.build_proof_for_leaf(&leaf)?;

    Ok(InclusionProof {
        block,
        leaf,
        proof,
        root: tree.root().clone(),
    })
}
