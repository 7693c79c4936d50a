use crate::hasher::MerkleHash;
use crate::maybestd::{collections::BTreeMap, vec::Vec};
use crate::MerkleError;
use bytes::Bytes;

/// Supplies the transaction identifiers of a block, in block order.
///
/// Implementations typically talk to a node over the network. Retries and timeouts belong to the
/// implementation; the merkle code only ever sees the final list.
pub trait LeafSource {
    /// The error returned when the identifiers could not be fetched
    type Error;

    /// Returns the raw identifiers of every transaction in `block`, or `None` if the block is unknown.
    fn transaction_ids(&self, block: u64) -> Result<Option<Vec<Bytes>>, Self::Error>;
}

impl<S: LeafSource + ?Sized> LeafSource for &S {
    type Error = S::Error;

    fn transaction_ids(&self, block: u64) -> Result<Option<Vec<Bytes>>, Self::Error> {
        (**self).transaction_ids(block)
    }
}

/// A [`LeafSource`] which keeps blocks in memory
#[derive(Debug, Default, Clone)]
pub struct MemLeafSource(BTreeMap<u64, Vec<Bytes>>);

impl MemLeafSource {
    /// Creates an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the identifiers of a block, replacing any previous entry
    pub fn insert_block<I, T>(&mut self, block: u64, ids: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<Bytes>,
    {
        self.0.insert(block, ids.into_iter().map(Into::into).collect());
    }

    /// Returns the identifiers stored for a block
    pub fn get(&self, block: u64) -> Option<&[Bytes]> {
        self.0.get(&block).map(Vec::as_slice)
    }
}

impl LeafSource for MemLeafSource {
    type Error = core::convert::Infallible;

    fn transaction_ids(&self, block: u64) -> Result<Option<Vec<Bytes>>, Self::Error> {
        Ok(self.0.get(&block).cloned())
    }
}

/// Hashes each raw identifier into a leaf, preserving order
pub fn hash_identifiers<M, T>(hasher: &M, ids: &[T]) -> Vec<M::Output>
where
    M: MerkleHash,
    T: AsRef<[u8]>,
{
    ids.iter().map(|id| hasher.hash_leaf(id.as_ref())).collect()
}

/// Decodes a hex encoded identifier (e.g. a transaction hash) into the bytes that get hashed into a leaf.
/// The `0x` prefix is optional.
pub fn decode_identifier(encoded: &str) -> Result<Bytes, MerkleError> {
    let encoded = encoded.strip_prefix("0x").unwrap_or(encoded);
    Ok(Bytes::from(hex::decode(encoded)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{digest, Keccak256Hasher};

    const TX_HASH: &str = "0x5c504ed432cb51138bcf09aa5e8a410dd4a1e204ef84bfed1be16dfba1b22060";

    #[test]
    fn test_mem_leaf_source() {
        let mut source = MemLeafSource::new();
        source.insert_block(7, [&b"tx1"[..], &b"tx2"[..]]);
        assert_eq!(source.get(7).map(<[Bytes]>::len), Some(2));

        let ids = source.transaction_ids(7).unwrap().unwrap();
        assert_eq!(ids, [Bytes::from_static(b"tx1"), Bytes::from_static(b"tx2")]);
        assert_eq!(source.transaction_ids(8).unwrap(), None);

        source.insert_block(7, Vec::<Bytes>::new());
        assert_eq!(source.transaction_ids(7).unwrap(), Some(Vec::new()));
    }

    #[test]
    fn test_decode_identifier() {
        let id = decode_identifier(TX_HASH).unwrap();
        assert_eq!(id.len(), 32);
        assert_eq!(decode_identifier(&TX_HASH[2..]).unwrap(), id);
        assert!(matches!(
            decode_identifier("0xnot-hex"),
            Err(MerkleError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_hash_identifiers() {
        let id = decode_identifier(TX_HASH).unwrap();
        let leaves = hash_identifiers(&Keccak256Hasher, &[id.clone(), Bytes::from_static(b"tx1")]);
        assert_eq!(leaves, [digest(&id), digest(b"tx1")]);
        assert_eq!(
            leaves[0],
            crate::Digest::from_hex("42d38cc341abb762486b14a02616720d1fc0c9bb524cacddd208991a3691d75c")
                .unwrap()
        );
    }
}
