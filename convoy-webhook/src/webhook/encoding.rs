//! Hex and base64 codecs for signature tokens.

use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine};

use super::Encoding;
use crate::error::{webhook_error, Error, WebhookErrorKind};

impl Encoding {
    /// Decode a signature token into raw digest bytes.
    ///
    /// Hex is case-insensitive; base64 is the standard alphabet with padding.
    pub fn decode(&self, value: &str) -> Result<Vec<u8>, Error> {
        let decoded = match self {
            Encoding::Hex => hex::decode(value).map_err(|e| e.to_string()),
            Encoding::Base64 => BASE64_STANDARD.decode(value).map_err(|e| e.to_string()),
        };

        decoded.map_err(|reason| {
            webhook_error(
                WebhookErrorKind::InvalidSignature,
                &format!("signature is not valid {}: {}", self, reason),
            )
        })
    }

    /// Encode raw digest bytes for transport in a header.
    pub fn encode(&self, digest: &[u8]) -> String {
        match self {
            Encoding::Hex => hex::encode(digest),
            Encoding::Base64 => BASE64_STANDARD.encode(digest),
        }
    }
}
