use super::error::MerkleError;
use super::options::{OddLayerPolicy, TreeOptions};
use super::proof::Proof;
use super::utils::{compute_tree_depth, next_layer_len, parent_index, sibling_index};
use crate::hasher::MerkleHash;
use crate::maybestd::vec::Vec;

/// A merkle tree over pre-hashed leaves. Each pair of siblings is hashed in sorted order.
///
/// The tree keeps every layer, from the leaves (layer 0) to the root, as a flat vector. Nodes are addressed by
/// their index in a layer: the parent of node `i` is `i / 2` and its sibling is `i ^ 1`. A tree is immutable once
/// built and can be shared between threads for concurrent proof generation.
///
/// Example: the tree over leaves [A, B, C] with the default [`OddLayerPolicy::Promote`]
/// ```ascii
///          root = H(AB, C)
///        /      \
///      AB        C
///     /  \       |
///    A    B      C
/// ```
///
/// The proof for C is just [AB], since C has no sibling in the bottom layer.
#[derive(Debug, Clone)]
pub struct MerkleTree<M>
where
    M: MerkleHash,
{
    layers: Vec<Vec<M::Output>>,
    options: TreeOptions,
    hasher: M,
}

impl<M> MerkleTree<M>
where
    M: MerkleHash + Default,
{
    /// Builds a tree over the given leaves with the default hasher and options
    pub fn new(leaves: Vec<M::Output>) -> Result<Self, MerkleError> {
        Self::with_hasher(leaves, TreeOptions::default(), Default::default())
    }

    /// Builds a tree over the given leaves with the default hasher
    pub fn with_options(leaves: Vec<M::Output>, options: TreeOptions) -> Result<Self, MerkleError> {
        Self::with_hasher(leaves, options, Default::default())
    }

    /// Hashes each item as a leaf, then builds a tree over the results
    pub fn from_raw_leaves<T: AsRef<[u8]>>(raw_leaves: &[T]) -> Result<Self, MerkleError> {
        let hasher = M::default();
        let leaves = raw_leaves
            .iter()
            .map(|raw| hasher.hash_leaf(raw.as_ref()))
            .collect();
        Self::with_hasher(leaves, TreeOptions::default(), hasher)
    }
}

impl<M> MerkleTree<M>
where
    M: MerkleHash,
{
    /// Builds a tree over the given leaves with the given options and hasher.
    ///
    /// Fails with [`MerkleError::EmptyInput`] if there are no leaves. A single leaf is its own root.
    pub fn with_hasher(
        mut leaves: Vec<M::Output>,
        options: TreeOptions,
        hasher: M,
    ) -> Result<Self, MerkleError> {
        if leaves.is_empty() {
            return Err(MerkleError::EmptyInput);
        }
        if options.sort_leaves {
            leaves.sort();
        }

        let num_leaves = leaves.len();
        let mut layers = Vec::with_capacity(compute_tree_depth(num_leaves) + 1);
        layers.push(leaves);
        while let Some(layer) = layers.last().filter(|layer| layer.len() > 1) {
            let next = next_layer(&hasher, layer, options.odd_layer);
            layers.push(next);
        }

        let tree = Self {
            layers,
            options,
            hasher,
        };
        tracing::debug!(
            leaves = num_leaves,
            depth = tree.depth(),
            root = ?tree.root(),
            "built merkle tree"
        );
        Ok(tree)
    }

    /// Returns the root of the tree
    pub fn root(&self) -> &M::Output {
        // `with_hasher` never produces an empty top layer
        &self.layers[self.layers.len() - 1][0]
    }

    /// Returns the leaves of the tree, in the order they were hashed
    pub fn leaves(&self) -> &[M::Output] {
        &self.layers[0]
    }

    /// Returns the number of leaves in the tree
    pub fn num_leaves(&self) -> usize {
        self.layers[0].len()
    }

    /// Returns the number of layers above the leaves. This bounds the length of every proof.
    pub fn depth(&self) -> usize {
        self.layers.len() - 1
    }

    /// Returns every layer of the tree, starting with the leaves and ending with the root
    pub fn layers(&self) -> &[Vec<M::Output>] {
        &self.layers
    }

    /// Returns the options the tree was built with
    pub fn options(&self) -> TreeOptions {
        self.options
    }

    /// Returns the hasher the tree was built with
    pub fn hasher(&self) -> &M {
        &self.hasher
    }

    /// Returns the index of the first occurrence of `leaf`, if the tree contains it
    pub fn leaf_index(&self, leaf: &M::Output) -> Option<usize> {
        self.leaves().iter().position(|l| l == leaf)
    }

    /// Creates a proof of inclusion for the leaf at the given index.
    ///
    /// The proof contains one sibling per level, bottom to top. Levels where the node has no sibling are
    /// skipped under [`OddLayerPolicy::Promote`].
    ///
    /// Example: consider the following merkle tree with leaves [C, D, E, F]
    /// ```ascii
    ///          root
    ///        /      \
    ///       A        B
    ///      / \      /  \
    ///     C   D    E    F
    ///
    /// ```
    ///
    /// build_proof(2) would return [F, A]
    pub fn build_proof(&self, leaf_idx: usize) -> Result<Proof<M>, MerkleError> {
        if leaf_idx >= self.num_leaves() {
            return Err(MerkleError::IndexOutOfRange {
                index: leaf_idx,
                len: self.num_leaves(),
            });
        }

        let mut siblings = Vec::with_capacity(self.depth());
        let mut idx = leaf_idx;
        for layer in &self.layers[..self.depth()] {
            match layer.get(sibling_index(idx)) {
                Some(sibling) => siblings.push(sibling.clone()),
                None => {
                    if self.options.odd_layer == OddLayerPolicy::Duplicate {
                        siblings.push(layer[idx].clone());
                    }
                }
            }
            idx = parent_index(idx);
        }

        tracing::trace!(leaf_idx, siblings = siblings.len(), "built inclusion proof");
        Ok(Proof::new(siblings))
    }

    /// Creates a proof of inclusion for the first leaf equal to `leaf`
    pub fn build_proof_for_leaf(&self, leaf: &M::Output) -> Result<Proof<M>, MerkleError> {
        let idx = self.leaf_index(leaf).ok_or(MerkleError::LeafNotFound)?;
        self.build_proof(idx)
    }

    /// Fetches the leaf at the given index, along with a proof of inclusion.
    pub fn get_index_with_proof(&self, idx: usize) -> Result<(M::Output, Proof<M>), MerkleError> {
        let proof = self.build_proof(idx)?;
        Ok((self.leaves()[idx].clone(), proof))
    }
}

/// Hashes adjacent pairs of `layer` into the layer above it
fn next_layer<M: MerkleHash>(
    hasher: &M,
    layer: &[M::Output],
    odd_layer: OddLayerPolicy,
) -> Vec<M::Output> {
    let mut next = Vec::with_capacity(next_layer_len(layer.len()));
    for pair in layer.chunks(2) {
        let parent = match (pair, odd_layer) {
            ([l, r], _) => hasher.hash_nodes(l, r),
            (_, OddLayerPolicy::Promote) => pair[0].clone(),
            (_, OddLayerPolicy::Duplicate) => hasher.hash_nodes(&pair[0], &pair[0]),
        };
        next.push(parent);
    }
    next
}
