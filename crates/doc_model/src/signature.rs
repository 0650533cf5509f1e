//! Signature records
//!
//! Produced by an external signing collaborator; consumed read-only by
//! every exporter and rendered only in the dedicated, always-last
//! signatures section.

use crate::error::{DocModelError, Result};
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A completed signature attached to a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureRecord {
    pub signer_name: String,
    pub signer_email: String,
    /// Base64 raster data URI, when the signer drew a signature
    #[serde(default)]
    pub signature_image: Option<String>,
    pub signed_at: DateTime<Utc>,
}

impl SignatureRecord {
    /// Decode the signature image payload from its data URI
    ///
    /// Accepts `data:image/...;base64,<payload>` as well as a bare base64
    /// payload. Returns the raw bytes without validating the raster
    /// header; format validation happens at the embedding site.
    pub fn decode_image(&self) -> Result<Option<Vec<u8>>> {
        let Some(uri) = &self.signature_image else {
            return Ok(None);
        };

        let payload = match uri.split_once("base64,") {
            Some((_, rest)) => rest,
            None => uri.as_str(),
        };

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(payload.trim())
            .map_err(|e| DocModelError::InvalidImageData(e.to_string()))?;
        Ok(Some(bytes))
    }

    /// Signed-at timestamp formatted for display, e.g. "March 04, 2026"
    pub fn formatted_signed_at(&self) -> String {
        self.signed_at.format("%B %d, %Y").to_string()
    }
}
