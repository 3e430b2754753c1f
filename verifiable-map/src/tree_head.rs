//! Tree heads and the decoding of tree-head responses.

use std::fmt;

use verifiable_map_types::{MapHashResponse, TreeHeadResponse};

use crate::Result;

/// Tree size addressed by a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TreeSize {
    /// Whatever size the server currently considers latest.
    #[default]
    Head,
    /// An explicit size.
    At(u64),
}

impl fmt::Display for TreeSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // The server reads size 0 as "latest".
            TreeSize::Head => f.write_str("0"),
            TreeSize::At(size) => write!(f, "{size}"),
        }
    }
}

impl From<u64> for TreeSize {
    fn from(size: u64) -> Self {
        TreeSize::At(size)
    }
}

/// Checkpoint of an append-only log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogTreeHead {
    /// Number of entries in the log.
    pub tree_size: u64,
    /// Merkle root over those entries.
    pub root_hash: Vec<u8>,
}

impl From<TreeHeadResponse> for LogTreeHead {
    fn from(response: TreeHeadResponse) -> Self {
        Self {
            tree_size: response.tree_size,
            root_hash: response.tree_hash,
        }
    }
}

/// Checkpoint of a map: its root hash and the head of the mutation log the
/// root was computed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapTreeHead {
    /// Root of the map's sparse Merkle tree.
    pub root_hash: Vec<u8>,
    /// Mutation log head the map state was folded from.
    pub mutation_log_tree_head: LogTreeHead,
}

impl MapTreeHead {
    /// Number of mutations folded into this map state.
    pub fn tree_size(&self) -> u64 {
        self.mutation_log_tree_head.tree_size
    }
}

impl From<MapHashResponse> for MapTreeHead {
    fn from(response: MapHashResponse) -> Self {
        Self {
            root_hash: response.map_hash,
            mutation_log_tree_head: response.mutation_log.into(),
        }
    }
}

/// Decode a map tree-head response body.
pub fn decode_map_tree_head(body: &[u8]) -> Result<MapTreeHead> {
    let response: MapHashResponse = serde_json::from_slice(body)?;
    Ok(response.into())
}

/// Decode a log tree-head response body.
pub fn decode_log_tree_head(body: &[u8]) -> Result<LogTreeHead> {
    let response: TreeHeadResponse = serde_json::from_slice(body)?;
    Ok(response.into())
}
