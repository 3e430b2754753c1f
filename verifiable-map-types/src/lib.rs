//! JSON bodies exchanged with a verifiable map server.
//!
//! Byte strings travel as standard base64, matching how the server encodes
//! raw hashes.

use serde::{Deserialize, Serialize};
use serde_with::{base64::Base64, serde_as, DefaultOnNull};

pub type Hash = Vec<u8>;

/// Tree head of an append-only log: `{"tree_size": .., "tree_hash": ..}`.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TreeHeadResponse {
    pub tree_size: u64,
    #[serde_as(as = "Base64")]
    pub tree_hash: Hash,
}

/// Root hash of a map together with the mutation log head it was built from.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MapHashResponse {
    #[serde_as(as = "Base64")]
    pub map_hash: Hash,
    pub mutation_log: TreeHeadResponse,
}

#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InclusionProofResponse {
    pub leaf_index: u64,
    pub tree_size: u64,
    #[serde(default)]
    #[serde_as(as = "DefaultOnNull<Vec<Base64>>")]
    pub proof: Vec<Hash>,
}

#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConsistencyProofResponse {
    pub first_tree_size: u64,
    pub second_tree_size: u64,
    #[serde(default)]
    #[serde_as(as = "DefaultOnNull<Vec<Base64>>")]
    pub proof: Vec<Hash>,
}
