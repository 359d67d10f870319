//! Verifier configuration: hash algorithm, signature encoding, and the options record.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};

use crate::error::{webhook_error, Error, WebhookErrorKind};

/// Header carrying the signature when none is configured.
pub const DEFAULT_SIGNATURE_HEADER: &str = "X-Convoy-Signature";

/// Maximum accepted age of an advanced-format timestamp.
pub const DEFAULT_TOLERANCE: Duration = Duration::from_secs(300);

pub const DEFAULT_HASH: HashAlgorithm = HashAlgorithm::Sha256;

pub const DEFAULT_ENCODING: Encoding = Encoding::Hex;

/// HMAC digest used to sign payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum HashAlgorithm {
    Sha256,
    Sha512,
}

impl HashAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "SHA256",
            HashAlgorithm::Sha512 => "SHA512",
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_uppercase().as_str() {
            "SHA256" => Ok(HashAlgorithm::Sha256),
            "SHA512" => Ok(HashAlgorithm::Sha512),
            _ => Err(webhook_error(
                WebhookErrorKind::InvalidHashAlgorithm,
                &format!("unsupported hash algorithm: {}", value),
            )),
        }
    }
}

impl TryFrom<String> for HashAlgorithm {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Textual representation of the raw digest bytes carried in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Encoding {
    Hex,
    Base64,
}

impl Encoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Hex => "hex",
            Encoding::Base64 => "base64",
        }
    }
}

impl FromStr for Encoding {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "hex" => Ok(Encoding::Hex),
            "base64" => Ok(Encoding::Base64),
            _ => Err(webhook_error(
                WebhookErrorKind::InvalidEncoding,
                &format!("unsupported encoding: {}", value),
            )),
        }
    }
}

impl TryFrom<String> for Encoding {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for a [`super::Webhook`] verifier.
///
/// Only the secret is required; everything else has a default. Deserializes from
/// the camelCase configuration surface (`signatureHeaderName`, `secret`,
/// `hashAlgorithm`, `encoding`, `tolerance` in seconds).
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookOpts {
    #[serde(rename = "signatureHeaderName", default = "default_signature_header")]
    pub signature_header: String,
    pub secret: SecretString,
    #[serde(rename = "hashAlgorithm", default = "default_hash")]
    pub hash: HashAlgorithm,
    #[serde(default = "default_encoding")]
    pub encoding: Encoding,
    #[serde(default = "default_tolerance", deserialize_with = "tolerance_from_secs")]
    pub tolerance: Duration,
}

impl WebhookOpts {
    /// Create options for the given signing secret with every other field defaulted.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            signature_header: default_signature_header(),
            secret: SecretString::new(secret.into()),
            hash: DEFAULT_HASH,
            encoding: DEFAULT_ENCODING,
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// Set the name of the header carrying the signature.
    pub fn with_signature_header(mut self, signature_header: impl Into<String>) -> Self {
        self.signature_header = signature_header.into();
        self
    }

    /// Set the HMAC hash algorithm.
    pub fn with_hash(mut self, hash: HashAlgorithm) -> Self {
        self.hash = hash;
        self
    }

    /// Set the signature encoding.
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Set the maximum accepted timestamp age.
    pub fn with_tolerance(mut self, tolerance: Duration) -> Self {
        self.tolerance = tolerance;
        self
    }
}

impl fmt::Debug for WebhookOpts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookOpts")
            .field("signature_header", &self.signature_header)
            .field(
                "secret",
                &if self.secret.expose_secret().is_empty() {
                    "[EMPTY]"
                } else {
                    "[REDACTED]"
                },
            )
            .field("hash", &self.hash)
            .field("encoding", &self.encoding)
            .field("tolerance", &self.tolerance)
            .finish()
    }
}

fn default_signature_header() -> String {
    DEFAULT_SIGNATURE_HEADER.to_string()
}

fn default_hash() -> HashAlgorithm {
    DEFAULT_HASH
}

fn default_encoding() -> Encoding {
    DEFAULT_ENCODING
}

fn default_tolerance() -> Duration {
    DEFAULT_TOLERANCE
}

fn tolerance_from_secs<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    u64::deserialize(deserializer).map(Duration::from_secs)
}
