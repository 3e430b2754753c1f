//! Test doubles shared by the unit tests.

use std::{cell::RefCell, collections::VecDeque};

use reqwest::{
    header::{HeaderMap, HeaderValue},
    Method,
};
use verifiable_map_types::{MapHashResponse, TreeHeadResponse};

use crate::{
    proof_header::{PROOF_HEADER, TREE_SIZE_HEADER},
    Error, Response, Result, Transport,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Vec<u8>>,
}

/// Replays queued responses in order and records every request.
#[derive(Default)]
pub(crate) struct MockTransport {
    requests: RefCell<Vec<RecordedRequest>>,
    responses: RefCell<VecDeque<Result<Response>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, response: Response) -> &Self {
        self.responses.borrow_mut().push_back(Ok(response));
        self
    }

    pub fn fail(&self, error: Error) -> &Self {
        self.responses.borrow_mut().push_back(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl Transport for MockTransport {
    fn make_request(&self, method: Method, path: &str, body: Option<Vec<u8>>) -> Result<Response> {
        self.requests.borrow_mut().push(RecordedRequest {
            method,
            path: path.to_string(),
            body,
        });
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected request to {path}"))
    }
}

/// Map tree-head body whose mutation log has `size` entries.
pub(crate) fn map_tree_head_response(size: u64) -> Response {
    let body = MapHashResponse {
        map_hash: vec![0xaa; 32],
        mutation_log: TreeHeadResponse {
            tree_size: size,
            tree_hash: vec![0xbb; 32],
        },
    };
    Response::new(serde_json::to_vec(&body).expect("serializes"))
}

/// Response to a map lookup carrying `body`, the verified tree size and one
/// proof header per element of `proof_headers`.
pub(crate) fn lookup_response(
    body: &[u8],
    verified_size: Option<&str>,
    proof_headers: &[&str],
) -> Response {
    let mut headers = HeaderMap::new();
    for value in proof_headers {
        headers.append(PROOF_HEADER, HeaderValue::from_str(value).expect("header"));
    }
    if let Some(size) = verified_size {
        headers.insert(TREE_SIZE_HEADER, HeaderValue::from_str(size).expect("header"));
    }
    Response {
        body: body.to_vec(),
        headers,
    }
}

pub(crate) fn proof_headers(values: &[&str]) -> HeaderMap {
    lookup_response(b"", None, values).headers
}
