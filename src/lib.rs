#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
//! This crate implements sorted-pair merkle trees for proving that a transaction is included in a block.
//!
//! Leaves are the digests of raw transaction identifiers. Inner nodes hash the byte-wise smaller child first,
//! so proofs are plain lists of siblings and need no left/right flags. The default hasher is Keccak-256,
//! which keeps roots and proofs bit-compatible with EVM verifier contracts built on the same convention.
//!
//! ```
//! use txproof::{digest, KeccakMerkleTree};
//!
//! let leaves: Vec<_> = ["tx1", "tx2", "tx3", "tx4"]
//!     .iter()
//!     .map(|tx| digest(tx.as_bytes()))
//!     .collect();
//! let tree = KeccakMerkleTree::new(leaves.clone()).unwrap();
//! let proof = tree.build_proof(2).unwrap();
//! assert_eq!(proof.len(), 2);
//! assert!(proof.verify(&leaves[2], tree.root()));
//! ```

#[cfg(not(feature = "std"))]
extern crate alloc;

mod maybestd {
    #[cfg(not(feature = "std"))]
    pub use alloc::{collections, format, string, vec};
    pub use core::{fmt, hash};
    #[cfg(feature = "std")]
    pub use std::{collections, format, string, vec};
}

mod digest;
/// Hashers for leaves and inner nodes.
pub mod hasher;
/// End-to-end inclusion proofs for transactions in a block.
pub mod inclusion;
/// The merkle tree, its proofs, and its configuration.
pub mod merkle;
/// The boundary to whatever supplies the transaction identifiers of a block.
pub mod source;

pub use crate::digest::{Digest, HASH_LEN};
pub use hasher::{combine, digest, Keccak256Hasher, MerkleHash, Sha256Hasher};
pub use inclusion::{prove_transaction, HexInclusionProof, InclusionError, InclusionProof};
pub use merkle::{
    error::MerkleError,
    options::{OddLayerPolicy, TreeOptions},
    proof::{verify, verify_raw, Proof},
    tree::MerkleTree,
};
pub use source::{LeafSource, MemLeafSource};

/// A merkle tree using the default Keccak-256 sorted-pair hasher
pub type KeccakMerkleTree = MerkleTree<Keccak256Hasher>;
/// A proof against a [`KeccakMerkleTree`]
pub type KeccakProof = Proof<Keccak256Hasher>;
