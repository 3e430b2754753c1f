//! Entry encodings.
//!
//! Uploads and downloads are decoupled: an [`UploadableEntry`] knows how to
//! put itself on the wire, and a [`VerifiableEntryFactory`] knows how to turn
//! a downloaded body back into a typed value. Both name the URL suffix that
//! selects their format on the server.

use crate::{Error, Result};

/// Suffix selecting the JSON entry format.
pub const JSON_FORMAT: &str = "/xjson";

/// Suffix selecting the redactable JSON upload format.
pub const REDACTABLE_JSON_FORMAT: &str = "/xjson/redactable";

/// A value that can be sent to the server.
pub trait UploadableEntry {
    /// Bytes to send as the request body.
    fn data_for_upload(&self) -> Result<Vec<u8>>;
    /// Path suffix naming the upload format.
    fn format(&self) -> &str;
}

/// Decodes downloaded bodies into entries of one format.
pub trait VerifiableEntryFactory {
    /// Decoded entry type.
    type Entry;

    /// Decode a response body.
    fn create_from_bytes(&self, bytes: &[u8]) -> Result<Self::Entry>;
    /// Path suffix requesting this format.
    fn format(&self) -> &str;
}

/// Opaque bytes, stored and returned verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawDataEntry {
    /// Stored bytes.
    pub data: Vec<u8>,
}

impl RawDataEntry {
    /// Wrap `data`.
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self { data: data.into() }
    }
}

impl UploadableEntry for RawDataEntry {
    fn data_for_upload(&self) -> Result<Vec<u8>> {
        Ok(self.data.clone())
    }

    fn format(&self) -> &str {
        ""
    }
}

/// A JSON document. The server hashes these by structure rather than by
/// byte representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonEntry {
    /// Document text, or empty for an absent key.
    pub json: Vec<u8>,
}

impl JsonEntry {
    /// True for the placeholder returned for a key without a value.
    pub fn is_empty(&self) -> bool {
        self.json.is_empty()
    }

    /// Wrap `json` after checking that it parses.
    pub fn new(json: impl Into<Vec<u8>>) -> Result<Self> {
        let json = json.into();
        ensure_json(&json)?;
        Ok(Self { json })
    }

    /// Serialize `value` into a new entry.
    pub fn from_value<V: serde::Serialize>(value: &V) -> Result<Self> {
        Ok(Self {
            json: serde_json::to_vec(value)?,
        })
    }

    /// Parse the entry into `V`.
    pub fn to_value<V: serde::de::DeserializeOwned>(&self) -> Result<V> {
        Ok(serde_json::from_slice(&self.json)?)
    }
}

impl UploadableEntry for JsonEntry {
    fn data_for_upload(&self) -> Result<Vec<u8>> {
        Ok(self.json.clone())
    }

    fn format(&self) -> &str {
        JSON_FORMAT
    }
}

/// A JSON document the server stores so that individual fields can later be
/// redacted without changing its hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedactableJsonEntry {
    /// Document text.
    pub json: Vec<u8>,
}

impl RedactableJsonEntry {
    /// Wrap `json` after checking that it parses.
    pub fn new(json: impl Into<Vec<u8>>) -> Result<Self> {
        let json = json.into();
        ensure_json(&json)?;
        Ok(Self { json })
    }
}

impl UploadableEntry for RedactableJsonEntry {
    fn data_for_upload(&self) -> Result<Vec<u8>> {
        Ok(self.json.clone())
    }

    fn format(&self) -> &str {
        REDACTABLE_JSON_FORMAT
    }
}

/// A JSON document as returned for a redactable upload, possibly with some
/// fields replaced by redaction markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedactedJsonEntry {
    /// Document text, or empty for an absent key.
    pub json: Vec<u8>,
}

impl RedactedJsonEntry {
    /// Parse the entry into `V`.
    pub fn to_value<V: serde::de::DeserializeOwned>(&self) -> Result<V> {
        Ok(serde_json::from_slice(&self.json)?)
    }
}

/// Decodes bodies as [`RawDataEntry`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RawDataEntryFactory;

impl VerifiableEntryFactory for RawDataEntryFactory {
    type Entry = RawDataEntry;

    fn create_from_bytes(&self, bytes: &[u8]) -> Result<RawDataEntry> {
        Ok(RawDataEntry::new(bytes))
    }

    fn format(&self) -> &str {
        ""
    }
}

/// Requests the JSON format and decodes bodies as [`JsonEntry`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEntryFactory;

impl VerifiableEntryFactory for JsonEntryFactory {
    type Entry = JsonEntry;

    fn create_from_bytes(&self, bytes: &[u8]) -> Result<JsonEntry> {
        ensure_json_or_absent(bytes)?;
        Ok(JsonEntry {
            json: bytes.to_vec(),
        })
    }

    fn format(&self) -> &str {
        JSON_FORMAT
    }
}

/// Reads values uploaded as [`RedactableJsonEntry`], which come back as
/// [`RedactedJsonEntry`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RedactedJsonEntryFactory;

impl VerifiableEntryFactory for RedactedJsonEntryFactory {
    type Entry = RedactedJsonEntry;

    fn create_from_bytes(&self, bytes: &[u8]) -> Result<RedactedJsonEntry> {
        ensure_json_or_absent(bytes)?;
        Ok(RedactedJsonEntry {
            json: bytes.to_vec(),
        })
    }

    fn format(&self) -> &str {
        JSON_FORMAT
    }
}

/// Keys without a value come back with an empty body, which decodes to an
/// empty entry.
fn ensure_json_or_absent(bytes: &[u8]) -> Result<()> {
    if bytes.is_empty() {
        return Ok(());
    }
    ensure_json(bytes)
}

fn ensure_json(bytes: &[u8]) -> Result<()> {
    serde_json::from_slice::<serde::de::IgnoredAny>(bytes)
        .map(|_| ())
        .map_err(|e| Error::InvalidEntry(format!("entry is not valid json: {e}")))
}
