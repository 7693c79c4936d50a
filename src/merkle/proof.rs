use super::error::MerkleError;
use crate::hasher::{Keccak256Hasher, MerkleHash};
use crate::maybestd::{string::String, vec::Vec};
use crate::Digest;

/// A proof that some leaf is included in a merkle tree.
///
/// The proof is the list of siblings on the path from the leaf to the root, bottom to top. Since siblings
/// are hashed in sorted order, the proof needs no left/right flags, and it carries no reference back to the
/// tree it was built from.
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = ""))]
pub struct Proof<M: MerkleHash> {
    /// The siblings to be used to build the path to the root.
    #[cfg_attr(
        feature = "borsh",
        borsh(bound(
            serialize = "M::Output: borsh::BorshSerialize",
            deserialize = "M::Output: borsh::BorshDeserialize"
        ))
    )]
    pub siblings: Vec<M::Output>,
}

impl<M: MerkleHash> Default for Proof<M> {
    fn default() -> Self {
        Self {
            siblings: Default::default(),
        }
    }
}

impl<M> Proof<M>
where
    M: MerkleHash + Default,
{
    /// Recomputes the root implied by this proof for the given leaf
    pub fn compute_root(&self, leaf: &M::Output) -> M::Output {
        self.compute_root_with_hasher(leaf, &M::default())
    }

    /// Checks that the leaf, together with this proof, hashes up to the given root
    pub fn verify(&self, leaf: &M::Output, root: &M::Output) -> bool {
        self.verify_with_hasher(leaf, root, &M::default())
    }
}

impl<M> Proof<M>
where
    M: MerkleHash,
{
    /// Wraps a list of siblings, ordered from the leaf to the root
    pub fn new(siblings: Vec<M::Output>) -> Self {
        Self { siblings }
    }

    /// Recomputes the root implied by this proof for the given leaf, using the given hasher
    pub fn compute_root_with_hasher(&self, leaf: &M::Output, hasher: &M) -> M::Output {
        self.siblings
            .iter()
            .fold(leaf.clone(), |node, sibling| hasher.hash_nodes(&node, sibling))
    }

    /// Checks that the leaf, together with this proof, hashes up to the given root, using the given hasher.
    ///
    /// A mismatch is an expected outcome and is reported as `false`, not as an error.
    pub fn verify_with_hasher(&self, leaf: &M::Output, root: &M::Output, hasher: &M) -> bool {
        let computed_root = self.compute_root_with_hasher(leaf, hasher);
        let valid = &computed_root == root;
        if !valid {
            tracing::debug!(?leaf, ?root, ?computed_root, "merkle proof does not match root");
        }
        valid
    }

    /// Returns the siblings provided as part of the proof.
    pub fn siblings(&self) -> &[M::Output] {
        &self.siblings
    }

    /// Returns the number of siblings in the proof
    pub fn len(&self) -> usize {
        self.siblings.len()
    }

    /// Returns true if the proof has no siblings, which is the case for the only leaf of a single-leaf tree
    pub fn is_empty(&self) -> bool {
        self.siblings.is_empty()
    }
}

impl<M> Proof<M>
where
    M: MerkleHash<Output = Digest>,
{
    /// Encodes the siblings as `0x` prefixed hex strings, the form passed to verifier contracts
    pub fn to_hex(&self) -> Vec<String> {
        self.siblings.iter().map(Digest::to_hex).collect()
    }

    /// Parses a list of hex encoded siblings
    pub fn from_hex<S: AsRef<str>>(siblings: &[S]) -> Result<Self, MerkleError> {
        let siblings = siblings
            .iter()
            .map(|s| Digest::from_hex(s.as_ref()))
            .collect::<Result<_, _>>()?;
        Ok(Self::new(siblings))
    }
}

/// Checks a keccak256 sorted-pair proof: folds `leaf` with each sibling in order and compares the result to `root`.
pub fn verify(leaf: &Digest, siblings: &[Digest], root: &Digest) -> bool {
    let hasher = Keccak256Hasher;
    let computed_root = siblings
        .iter()
        .fold(*leaf, |node, sibling| hasher.hash_nodes(&node, sibling));
    &computed_root == root
}

/// Checks a keccak256 sorted-pair proof given as raw byte strings, e.g. as received from another system.
///
/// Returns [`MerkleError::InvalidDigest`] if any input is not exactly [`crate::HASH_LEN`] bytes wide.
pub fn verify_raw<S: AsRef<[u8]>>(
    leaf: &[u8],
    siblings: &[S],
    root: &[u8],
) -> Result<bool, MerkleError> {
    let leaf = Digest::try_from(leaf)?;
    let root = Digest::try_from(root)?;
    let siblings = siblings
        .iter()
        .map(|s| Digest::try_from(s.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(verify(&leaf, &siblings, &root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hasher::digest;
    use crate::merkle::tree::MerkleTree;
    use crate::{KeccakProof, Sha256Hasher, HASH_LEN};

    fn tx_leaves(n: usize) -> Vec<Digest> {
        (1..=n)
            .map(|i| digest(crate::maybestd::format!("tx{i}").as_bytes()))
            .collect()
    }

    fn tree_with_n_leaves(n: usize) -> MerkleTree<Keccak256Hasher> {
        MerkleTree::new(tx_leaves(n)).unwrap()
    }

    #[test]
    fn test_any_flipped_byte_is_rejected() {
        let tree = tree_with_n_leaves(11);
        for idx in 0..tree.num_leaves() {
            let leaf = tree.leaves()[idx];
            let proof = tree.build_proof(idx).unwrap();
            assert!(proof.verify(&leaf, tree.root()));
            for sibling in 0..proof.len() {
                for byte in 0..HASH_LEN {
                    let mut tampered = proof.clone();
                    tampered.siblings[sibling].0[byte] ^= 0x80;
                    assert!(!tampered.verify(&leaf, tree.root()));
                }
            }
        }
    }

    #[test]
    fn test_wrong_leaf_is_rejected() {
        let tree = tree_with_n_leaves(8);
        let proof = tree.build_proof(3).unwrap();
        assert!(!proof.verify(&digest(b"not a transaction"), tree.root()));
        assert!(!proof.verify(&tree.leaves()[4], tree.root()));
    }

    #[test]
    fn test_truncated_proof_is_rejected() {
        let tree = tree_with_n_leaves(8);
        let mut proof = tree.build_proof(5).unwrap();
        proof.siblings.pop();
        assert!(!proof.verify(&tree.leaves()[5], tree.root()));
    }

    #[test]
    fn test_proof_is_hasher_specific() {
        let leaves = tx_leaves(4);
        let tree = MerkleTree::<Sha256Hasher>::new(leaves.clone()).unwrap();
        let proof = tree.build_proof(1).unwrap();
        assert!(proof.verify(&leaves[1], tree.root()));

        let as_keccak = KeccakProof::new(proof.siblings);
        assert!(!as_keccak.verify(&leaves[1], tree.root()));
    }

    #[test]
    fn test_free_verify_matches_proof_verify() {
        let tree = tree_with_n_leaves(6);
        let proof = tree.build_proof(4).unwrap();
        assert!(verify(&tree.leaves()[4], proof.siblings(), tree.root()));
        assert_eq!(proof.compute_root(&tree.leaves()[4]), *tree.root());
        assert!(verify(tree.root(), &[], tree.root()));
    }

    #[test]
    fn test_verify_raw() {
        let tree = tree_with_n_leaves(4);
        let proof = tree.build_proof(2).unwrap();
        let leaf = tree.leaves()[2];
        assert_eq!(
            verify_raw(leaf.as_ref(), proof.siblings(), tree.root().as_ref()),
            Ok(true)
        );
        assert_eq!(
            verify_raw(leaf.as_ref(), &[[0u8; 32]; 2], tree.root().as_ref()),
            Ok(false)
        );

        let short_sibling: [&[u8]; 2] = [&proof.siblings[0].0[..31], proof.siblings[1].as_ref()];
        assert_eq!(
            verify_raw(leaf.as_ref(), &short_sibling, tree.root().as_ref()),
            Err(MerkleError::InvalidDigest {
                expected: HASH_LEN,
                got: 31
            })
        );
        assert_eq!(
            verify_raw(&[1u8; 33], proof.siblings(), tree.root().as_ref()),
            Err(MerkleError::InvalidDigest {
                expected: HASH_LEN,
                got: 33
            })
        );
    }

    #[test]
    fn test_hex_round_trip() {
        let tree = tree_with_n_leaves(4);
        let proof = tree.build_proof(2).unwrap();
        let encoded = proof.to_hex();
        assert_eq!(
            encoded,
            [
                "0x4a65af02a6b35dc2aa600611e5e7edc5e1b6bdb8c79a250434ca9b84e30b1c70",
                "0x3f92101898b58c47db756eeba2adbf50fa4cc4a9491cf7b84c24e45b97649170",
            ]
        );
        assert_eq!(KeccakProof::from_hex(&encoded).unwrap(), proof);
        assert!(KeccakProof::from_hex(&["0x1234"]).is_err());
    }

    #[cfg(feature = "borsh")]
    #[test]
    fn test_proof_borsh() {
        use borsh::de::BorshDeserialize;

        let proof = tree_with_n_leaves(9).build_proof(8).unwrap();
        let serialized = borsh::to_vec(&proof).expect("Serialization to vec must succeed");
        let got = KeccakProof::deserialize(&mut &serialized[..]).expect("serialized proof is correct");
        assert_eq!(got, proof);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_proof_serde_json() {
        let proof = tree_with_n_leaves(9).build_proof(3).unwrap();
        let serialized = serde_json::to_vec(&proof).expect("Serialization to vec must succeed");
        let got: KeccakProof =
            serde_json::from_slice(&serialized[..]).expect("serialized proof is correct");
        assert_eq!(got, proof);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_proof_serde_postcard() {
        let proof = tree_with_n_leaves(9).build_proof(3).unwrap();
        let serialized: Vec<u8> =
            postcard::to_allocvec(&proof).expect("Serialization to vec must succeed");
        let got: KeccakProof = postcard::from_bytes(&serialized[..]).expect("serialized proof is correct");
        assert_eq!(got, proof);
    }
}
