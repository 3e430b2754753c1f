//! Proof material as delivered by the server.
//!
//! Nothing here verifies anything: these types only carry what is needed to
//! recompute a root hash so that a verifier can compare it with a trusted
//! tree head.

use std::fmt;

use verifiable_map_types::{ConsistencyProofResponse, InclusionProofResponse};

/// Number of levels in a map's sparse Merkle tree, one per bit of the
/// 256-bit key hash.
pub const AUDIT_PATH_WIDTH: usize = 256;

/// Sibling hashes along the path from a map leaf to the root, indexed by
/// bit position in the key hash.
///
/// Always holds exactly [`AUDIT_PATH_WIDTH`] slots. A slot is `None` when the
/// server sent no sibling for that level.
#[derive(Clone, PartialEq, Eq)]
pub struct AuditPath(Vec<Option<Vec<u8>>>);

impl AuditPath {
    /// Path with every slot absent.
    pub fn empty() -> Self {
        Self(vec![None; AUDIT_PATH_WIDTH])
    }

    pub(crate) fn set(&mut self, index: usize, hash: Vec<u8>) {
        self.0[index] = Some(hash);
    }

    /// Sibling hash at `index`, if the server provided one.
    pub fn get(&self, index: usize) -> Option<&[u8]> {
        self.0.get(index).and_then(|slot| slot.as_deref())
    }

    /// Number of slots, always [`AUDIT_PATH_WIDTH`].
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true; present alongside [`len`](Self::len).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All slots in index order.
    pub fn iter(&self) -> impl Iterator<Item = Option<&[u8]>> {
        self.0.iter().map(|slot| slot.as_deref())
    }

    /// `(index, hash)` for every slot that holds a hash.
    pub fn present(&self) -> impl Iterator<Item = (usize, &[u8])> {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_deref().map(|hash| (index, hash)))
    }

    /// Every slot, indexed by bit position.
    pub fn as_slice(&self) -> &[Option<Vec<u8>>] {
        &self.0
    }
}

impl Default for AuditPath {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for AuditPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.present().map(|(index, hash)| (index, hex::encode(hash))))
            .finish()
    }
}

/// A map value together with the proof needed to check it against a map
/// root hash.
///
/// `tree_size` is the size the server vouched for, which can be larger than
/// the size that was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapInclusionProof<E> {
    /// Decoded value; empty when the key is absent.
    pub value: E,
    /// Map size the proof was produced against.
    pub tree_size: u64,
    /// Sibling hashes from leaf to root.
    pub audit_path: AuditPath,
    /// Key that was looked up, unhashed.
    pub key: Vec<u8>,
}

/// Proof that a leaf hash is included in a log of a given size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogInclusionProof {
    /// Leaf hash the proof was requested for.
    pub leaf_hash: Vec<u8>,
    /// Position of the leaf in the log.
    pub leaf_index: u64,
    /// Log size the proof was produced against.
    pub tree_size: u64,
    /// Sibling hashes from leaf to root.
    pub audit_path: Vec<Vec<u8>>,
}

impl LogInclusionProof {
    pub(crate) fn from_response(leaf_hash: Vec<u8>, response: InclusionProofResponse) -> Self {
        Self {
            leaf_hash,
            leaf_index: response.leaf_index,
            tree_size: response.tree_size,
            audit_path: response.proof,
        }
    }
}

/// Proof that a log of `first_size` is a prefix of the same log at
/// `second_size`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConsistencyProof {
    /// Size of the older log.
    pub first_size: u64,
    /// Size of the newer log.
    pub second_size: u64,
    /// Hashes linking the two roots.
    pub audit_path: Vec<Vec<u8>>,
}

impl From<ConsistencyProofResponse> for LogConsistencyProof {
    fn from(response: ConsistencyProofResponse) -> Self {
        Self {
            first_size: response.first_tree_size,
            second_size: response.second_tree_size,
            audit_path: response.proof,
        }
    }
}
