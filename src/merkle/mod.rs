//! Implements a sorted-pair merkle tree, stored as an arena of layers, over pre-hashed leaves.

/// Defines errors that might arise while building trees, proving, or decoding digests.
pub mod error;
/// Defines the knobs a tree is built with.
pub mod options;
/// Defines proofs on the tree.
pub mod proof;
/// Defines the merkle tree itself.
pub mod tree;
/// Index arithmetic for walking the layers of a tree.
pub mod utils;
