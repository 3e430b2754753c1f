//! Audit path extraction from response headers.
//!
//! The server sends map audit paths as one or more `X-Verified-Proof`
//! headers, each a comma-separated list of `index/hexhash` pairs, e.g.
//! `X-Verified-Proof: 3/ab12, 10/00`.

use reqwest::header::HeaderMap;

use crate::{proof::AUDIT_PATH_WIDTH, AuditPath, Error, Result};

/// Header carrying audit path entries.
pub const PROOF_HEADER: &str = "x-verified-proof";

/// Header carrying the tree size the server vouches for.
pub const TREE_SIZE_HEADER: &str = "x-verified-treesize";

/// Build the audit path described by every `X-Verified-Proof` header.
///
/// Whitespace around both halves of a pair is ignored, as are segments
/// without a `/` and indices beyond the audit path width. A malformed index
/// or hash fails the whole parse.
pub fn parse_headers_for_proof(headers: &HeaderMap) -> Result<AuditPath> {
    let mut audit_path = AuditPath::empty();
    for value in headers.get_all(PROOF_HEADER) {
        let value = value
            .to_str()
            .map_err(|_| Error::InvalidHeaderValue(PROOF_HEADER))?;
        for segment in value.split(',') {
            let Some((index, hash)) = segment.split_once('/') else {
                continue;
            };
            let index = index.trim();
            let index: usize = index.parse().map_err(|_| Error::InvalidHeaderInteger {
                header: PROOF_HEADER,
                value: index.to_string(),
            })?;
            let hash = hex::decode(hash.trim())?;
            if index < AUDIT_PATH_WIDTH {
                audit_path.set(index, hash);
            }
        }
    }
    Ok(audit_path)
}

/// Read the required `X-Verified-TreeSize` header.
pub fn parse_verified_tree_size(headers: &HeaderMap) -> Result<u64> {
    let value = headers
        .get(TREE_SIZE_HEADER)
        .ok_or(Error::MissingHeader(TREE_SIZE_HEADER))?
        .to_str()
        .map_err(|_| Error::InvalidHeaderValue(TREE_SIZE_HEADER))?;
    value.trim().parse().map_err(|_| Error::InvalidHeaderInteger {
        header: TREE_SIZE_HEADER,
        value: value.to_string(),
    })
}
