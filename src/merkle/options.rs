/// What happens to the last node of a layer that has an odd number of nodes.
///
/// Proofs only verify against a root built with the same policy, so whoever checks proofs
/// (e.g. a verifier contract) must agree with the prover on this setting.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OddLayerPolicy {
    /// The unpaired node moves up to the next layer unchanged, and proofs skip that level.
    #[default]
    Promote,
    /// The unpaired node is hashed with a copy of itself, and proofs carry the node as its own sibling.
    Duplicate,
}

/// Options controlling how a tree is built from its leaves
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeOptions {
    /// The policy for unpaired nodes
    pub odd_layer: OddLayerPolicy,
    /// Sort the leaves byte-wise before building, so that the root does not depend on leaf order.
    /// Leaf indices then refer to positions in the sorted order.
    pub sort_leaves: bool,
}
