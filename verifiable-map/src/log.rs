//! Read-only views on verifiable logs.

use reqwest::Method;
use verifiable_map_types::{ConsistencyProofResponse, InclusionProofResponse};

use crate::{
    entry::VerifiableEntryFactory, tree_head::decode_log_tree_head, LogConsistencyProof,
    LogInclusionProof, LogTreeHead, Result, Transport, TreeSize,
};

/// Read access to a log at a fixed path.
///
/// Cheap to construct and never cached; the logs a map derives are obtained
/// from [`crate::VerifiableMap::mutation_log`] and
/// [`crate::VerifiableMap::tree_head_log`]. There is no way to append through
/// this type.
#[derive(Debug, Clone)]
pub struct VerifiableLog<T> {
    transport: T,
    path: String,
}

impl<T: Transport> VerifiableLog<T> {
    /// Bind the log at `path` (e.g. `/log/name`) to `transport`.
    pub fn new(transport: T, path: impl Into<String>) -> Self {
        Self {
            transport,
            path: path.into(),
        }
    }

    /// Path of this log relative to the account URL.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Size and root hash of the log at `tree_size`.
    pub fn tree_head(&self, tree_size: TreeSize) -> Result<LogTreeHead> {
        let path = format!("{}/tree/{}", self.path, tree_size);
        let response = self.transport.make_request(Method::GET, &path, None)?;
        decode_log_tree_head(&response.body)
    }

    /// Audit path proving `leaf_hash` is in the log at `tree_size`.
    pub fn inclusion_proof(&self, tree_size: TreeSize, leaf_hash: &[u8]) -> Result<LogInclusionProof> {
        let path = format!(
            "{}/tree/{}/inclusion/h/{}",
            self.path,
            tree_size,
            hex::encode(leaf_hash)
        );
        let response = self.transport.make_request(Method::GET, &path, None)?;
        let decoded: InclusionProofResponse = serde_json::from_slice(&response.body)?;
        Ok(LogInclusionProof::from_response(leaf_hash.to_vec(), decoded))
    }

    /// Audit path proving the log at `first_size` is a prefix of the log at
    /// `second_size`.
    pub fn consistency_proof(
        &self,
        first_size: u64,
        second_size: TreeSize,
    ) -> Result<LogConsistencyProof> {
        let path = format!(
            "{}/tree/{}/consistency/{}",
            self.path, second_size, first_size
        );
        let response = self.transport.make_request(Method::GET, &path, None)?;
        let decoded: ConsistencyProofResponse = serde_json::from_slice(&response.body)?;
        Ok(decoded.into())
    }

    /// Entry at `index`, decoded by `factory`.
    pub fn entry<F: VerifiableEntryFactory>(&self, index: u64, factory: &F) -> Result<F::Entry> {
        let path = format!("{}/entry/{}{}", self.path, index, factory.format());
        let response = self.transport.make_request(Method::GET, &path, None)?;
        factory.create_from_bytes(&response.body)
    }
}
