//! Blocking HTTP transport.

use std::fmt;

use reqwest::{header::AUTHORIZATION, Method, StatusCode};
use tracing::{debug, warn};

use crate::{
    transport::{Response, Transport},
    ClientConfig, Error, Result, VerifiableLog, VerifiableMap,
};

/// Account-scoped client talking to a verifiable data server over HTTP.
///
/// Maps and logs handed out by this client borrow it, so one client can
/// back any number of handles.
pub struct HttpClient {
    client: reqwest::blocking::Client,
    account_url: String,
    api_key: Option<String>,
}

impl HttpClient {
    /// Build a client from validated `config`.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            account_url: config.account_url(),
            api_key: config.api_key,
            client,
        })
    }

    /// Handle on the map named `name`. Does not contact the server; call
    /// [`VerifiableMap::create`] to provision a new map.
    pub fn verifiable_map(&self, name: &str) -> VerifiableMap<&Self> {
        VerifiableMap::new(self, format!("/map/{name}"))
    }

    /// Read-only handle on the log named `name`.
    pub fn verifiable_log(&self, name: &str) -> VerifiableLog<&Self> {
        VerifiableLog::new(self, format!("/log/{name}"))
    }
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("account_url", &self.account_url)
            .field("authenticated", &self.api_key.is_some())
            .finish()
    }
}

impl Transport for HttpClient {
    fn make_request(&self, method: Method, path: &str, body: Option<Vec<u8>>) -> Result<Response> {
        let url = format!("{}{}", self.account_url, path);
        let mut request = self.client.request(method.clone(), &url);
        if let Some(api_key) = &self.api_key {
            request = request.header(AUTHORIZATION, format!("Key {api_key}"));
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        debug!(%method, path, "sending request");
        let response = request.send()?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes()?.to_vec();
        debug!(%method, path, status = status.as_u16(), bytes = body.len(), "received response");

        if status.is_success() {
            return Ok(Response { body, headers });
        }

        warn!(%method, path, status = status.as_u16(), "request rejected");
        Err(status_error(status, &body))
    }
}

/// Error for an unsuccessful response with the given status and body.
pub(crate) fn status_error(status: StatusCode, body: &[u8]) -> Error {
    match status {
        StatusCode::BAD_REQUEST => Error::InvalidRange,
        StatusCode::FORBIDDEN => Error::NotAuthorized,
        StatusCode::NOT_FOUND => Error::NotFound,
        StatusCode::CONFLICT => Error::ObjectConflict,
        status => Error::UnexpectedStatus {
            status: status.as_u16(),
            message: String::from_utf8_lossy(body).into_owned(),
        },
    }
}
