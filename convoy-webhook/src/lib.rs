//! # convoy-webhook
//!
//! Signature verification for webhooks delivered by Convoy:
//! - Simple (`<signature>`) and advanced (`t=<ts>,v1=<signature>,...`) header formats
//! - HMAC-SHA256 and HMAC-SHA512 digests, hex or base64 encoded
//! - Timestamp tolerance for advanced headers
//! - Header generation for the sending side
//!
//! ## Usage
//!
//! ```rust,ignore
//! use convoy_webhook::webhook::{Encoding, HashAlgorithm, Webhook, WebhookOpts};
//!
//! let webhook = Webhook::new(
//!     WebhookOpts::new("endpoint-secret")
//!         .with_hash(HashAlgorithm::Sha512)
//!         .with_encoding(Encoding::Base64),
//! )?;
//!
//! webhook.verify_request(&mut request)?;
//! ```

pub mod error;
pub mod webhook;

// Re-export commonly used types
pub use error::{Error, ErrorKind, WebhookErrorKind};
pub use webhook::{Webhook, WebhookOpts, WebhookRequest};
