//! Request executor abstraction.
//!
//! Everything above this seam builds paths and interprets responses; the
//! transport owns base URLs, authentication, TLS and status handling.

use reqwest::{header::HeaderMap, Method};

use crate::Result;

/// Body and headers of a successful response.
#[derive(Debug, Clone, Default)]
pub struct Response {
    /// Raw response body.
    pub body: Vec<u8>,
    /// Response header multimap.
    pub headers: HeaderMap,
}

impl Response {
    /// Response with the given body and no headers.
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        Self {
            body: body.into(),
            headers: HeaderMap::new(),
        }
    }
}

/// Executes a request against the server and returns the response of a
/// successful call.
///
/// Implementations map unsuccessful statuses to [`crate::Error`] variants so
/// callers only ever see complete responses.
pub trait Transport {
    /// Issue `method` on `path` (relative to the account root), optionally
    /// carrying `body`.
    fn make_request(&self, method: Method, path: &str, body: Option<Vec<u8>>) -> Result<Response>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn make_request(&self, method: Method, path: &str, body: Option<Vec<u8>>) -> Result<Response> {
        (**self).make_request(method, path, body)
    }
}
