//! Verifiable map accessor.

use reqwest::Method;

use crate::{
    entry::{UploadableEntry, VerifiableEntryFactory},
    proof_header::{parse_headers_for_proof, parse_verified_tree_size},
    tree_head::decode_map_tree_head,
    MapInclusionProof, MapTreeHead, Result, Transport, TreeSize, VerifiableLog,
};

/// Handle on one named map.
///
/// Holds nothing but the transport and the map's path; every call is a fresh
/// request. Mutations are applied by the server asynchronously, so a [`get`]
/// right after a [`set`] may still return the previous value. Use
/// [`block_until_size`] to wait for the map to catch up.
///
/// [`get`]: VerifiableMap::get
/// [`set`]: VerifiableMap::set
/// [`block_until_size`]: VerifiableMap::block_until_size
#[derive(Debug, Clone)]
pub struct VerifiableMap<T> {
    transport: T,
    path: String,
}

impl<T: Transport> VerifiableMap<T> {
    /// Bind the map at `path` (e.g. `/map/name`) to `transport`.
    pub fn new(transport: T, path: impl Into<String>) -> Self {
        Self {
            transport,
            path: path.into(),
        }
    }

    /// Path of this map relative to the account URL.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Log of every mutation submitted to this map. Read-only: mutate the
    /// map through [`set`](Self::set) and [`delete`](Self::delete).
    pub fn mutation_log(&self) -> VerifiableLog<&T> {
        VerifiableLog::new(&self.transport, format!("{}/log/mutation", self.path))
    }

    /// Log of the tree heads this map has produced. Read-only.
    pub fn tree_head_log(&self) -> VerifiableLog<&T> {
        VerifiableLog::new(&self.transport, format!("{}/log/treehead", self.path))
    }

    /// Ask the server to create this map.
    pub fn create(&self) -> Result<()> {
        self.transport.make_request(Method::PUT, &self.path, None)?;
        Ok(())
    }

    /// Look up `key` as of `tree_size`, returning the value along with its
    /// audit path.
    pub fn get<F: VerifiableEntryFactory>(
        &self,
        key: &[u8],
        tree_size: TreeSize,
        factory: &F,
    ) -> Result<MapInclusionProof<F::Entry>> {
        let path = format!(
            "{}/tree/{}/key/h/{}{}",
            self.path,
            tree_size,
            hex::encode(key),
            factory.format()
        );
        let response = self.transport.make_request(Method::GET, &path, None)?;

        let audit_path = parse_headers_for_proof(&response.headers)?;
        let verified_size = parse_verified_tree_size(&response.headers)?;
        let value = factory.create_from_bytes(&response.body)?;

        Ok(MapInclusionProof {
            value,
            tree_size: verified_size,
            audit_path,
            key: key.to_vec(),
        })
    }

    /// Submit a mutation setting `key` to `value`. Returns once the server
    /// accepted the mutation, not once it is visible.
    pub fn set<E: UploadableEntry + ?Sized>(&self, key: &[u8], value: &E) -> Result<()> {
        let data = value.data_for_upload()?;
        let path = format!("{}/key/h/{}{}", self.path, hex::encode(key), value.format());
        self.transport.make_request(Method::PUT, &path, Some(data))?;
        Ok(())
    }

    /// Submit a mutation removing `key`. Has the same eventual effect as
    /// setting an empty value.
    pub fn delete(&self, key: &[u8]) -> Result<()> {
        let path = format!("{}/key/h/{}", self.path, hex::encode(key));
        self.transport.make_request(Method::DELETE, &path, None)?;
        Ok(())
    }

    /// Root hash of the map at `tree_size`, with the mutation log head it
    /// summarizes.
    pub fn tree_head(&self, tree_size: TreeSize) -> Result<MapTreeHead> {
        let path = format!("{}/tree/{}", self.path, tree_size);
        let response = self.transport.make_request(Method::GET, &path, None)?;
        decode_map_tree_head(&response.body)
    }
}
