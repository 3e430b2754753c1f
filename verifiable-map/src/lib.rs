//! Client for verifiable maps.
//!
//! A verifiable map is a key/value store whose every mutation is recorded in
//! an append-only, cryptographically verifiable log. The map's state is a
//! deterministic fold over that log, summarized by a published root hash.
//!
//! This crate reads values together with their audit paths, submits
//! mutations, fetches tree heads and waits for the map to absorb pending
//! mutations. It transports and structures proof material; checking a proof
//! against a trusted root hash is left to the caller.
//!
//! ```no_run
//! use verifiable_map::{ClientConfig, HttpClient, RawDataEntry, RawDataEntryFactory, TreeSize};
//!
//! # fn main() -> verifiable_map::Result<()> {
//! let client = HttpClient::new(ClientConfig::new("1234").with_api_key("secret"))?;
//! let map = client.verifiable_map("fruits");
//! map.set(b"apple", &RawDataEntry::new("red"))?;
//! let size = map.mutation_log().tree_head(TreeSize::Head)?.tree_size;
//! map.block_until_size(size)?;
//! let proof = map.get(b"apple", TreeSize::Head, &RawDataEntryFactory)?;
//! assert_eq!(proof.value.data, b"red");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
pub mod entry;
mod error;
mod http;
mod log;
mod map;
pub mod poll;
mod proof;
pub mod proof_header;
mod transport;
mod tree_head;

#[cfg(test)]
pub(crate) mod test_utils;
#[cfg(test)]
mod tests;

pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use entry::{
    JsonEntry, JsonEntryFactory, RawDataEntry, RawDataEntryFactory, RedactableJsonEntry,
    RedactedJsonEntry, RedactedJsonEntryFactory, UploadableEntry, VerifiableEntryFactory,
};
pub use error::{Error, Result};
pub use http::HttpClient;
pub use log::VerifiableLog;
pub use map::VerifiableMap;
pub use poll::{Backoff, Step};
pub use proof::{
    AuditPath, LogConsistencyProof, LogInclusionProof, MapInclusionProof, AUDIT_PATH_WIDTH,
};
pub use transport::{Response, Transport};
pub use tree_head::{decode_log_tree_head, decode_map_tree_head, LogTreeHead, MapTreeHead, TreeSize};
