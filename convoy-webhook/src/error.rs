//! Error types for the `convoy-webhook` crate.
//!
//! A root Error struct holding an error kind enum tree plus an optional source for chaining.

use std::error::Error as StdError;
use std::fmt;

/// Top-level error type for convoy-webhook.
/// Holds error kind and optional source for error chaining.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: ErrorKind,
}

/// Major categories of errors in convoy-webhook.
#[derive(Debug, PartialEq)]
pub enum ErrorKind {
    Webhook(WebhookErrorKind),
    Config(ConfigErrorKind),
    /// The request body could not be read.
    Io,
}

/// Reasons a webhook is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookErrorKind {
    /// Signature header absent or empty.
    MissingHeader,
    /// Malformed `key=value` pair, unparseable timestamp or disallowed key.
    InvalidHeader,
    InvalidEncoding,
    /// No decodable signature, or none of them match.
    InvalidSignature,
    InvalidHashAlgorithm,
    TimestampExpired,
}

/// Errors from building a verifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorKind {
    MissingSecret,
}

impl fmt::Display for WebhookErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let message = match self {
            WebhookErrorKind::MissingHeader => "webhook has no signature header",
            WebhookErrorKind::InvalidHeader => "webhook has invalid header",
            WebhookErrorKind::InvalidEncoding => "invalid encoding",
            WebhookErrorKind::InvalidSignature => "webhook has no valid signature",
            WebhookErrorKind::InvalidHashAlgorithm => "invalid hash algorithm",
            WebhookErrorKind::TimestampExpired => "timestamp has expired",
        };
        f.write_str(message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.error_kind {
            ErrorKind::Webhook(kind) => write!(f, "Webhook error: {}", kind),
            ErrorKind::Config(kind) => write!(f, "Config error: {:?}", kind),
            ErrorKind::Io => write!(f, "I/O error"),
        }?;
        if let Some(source) = &self.source {
            write!(f, " ({})", source)?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error {
            source: Some(Box::new(err)),
            error_kind: ErrorKind::Io,
        }
    }
}

impl Error {
    /// The rejection reason, if this error came from webhook verification.
    pub fn webhook_kind(&self) -> Option<WebhookErrorKind> {
        match self.error_kind {
            ErrorKind::Webhook(kind) => Some(kind),
            _ => None,
        }
    }
}

/// Helper function to create webhook errors.
pub fn webhook_error(kind: WebhookErrorKind, message: &str) -> Error {
    Error {
        source: Some(message.to_string().into()),
        error_kind: ErrorKind::Webhook(kind),
    }
}

/// Helper function to create configuration errors.
pub fn config_error(kind: ConfigErrorKind, message: &str) -> Error {
    Error {
        source: Some(message.to_string().into()),
        error_kind: ErrorKind::Config(kind),
    }
}
