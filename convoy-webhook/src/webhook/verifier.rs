//! The webhook verifier.

use chrono::{DateTime, Utc};
use log::{debug, warn};
use secrecy::ExposeSecret;

use super::header::SignedHeader;
use super::signature::{compute_signature, signatures_match};
use super::{WebhookOpts, WebhookRequest, DEFAULT_SIGNATURE_HEADER, DEFAULT_TOLERANCE};
use crate::error::{config_error, webhook_error, ConfigErrorKind, Error, WebhookErrorKind};

/// Verifies (and produces) Convoy webhook signatures.
///
/// A `Webhook` holds only immutable options, so one instance can be shared across
/// threads and reused for any number of requests.
#[derive(Debug)]
pub struct Webhook {
    opts: WebhookOpts,
}

impl Webhook {
    /// Create a verifier from options.
    ///
    /// An empty header name falls back to `X-Convoy-Signature` and a zero tolerance
    /// to 300 seconds. An empty secret is rejected, since it makes every signature
    /// trivially forgeable.
    pub fn new(mut opts: WebhookOpts) -> Result<Self, Error> {
        if opts.secret.expose_secret().is_empty() {
            return Err(config_error(
                ConfigErrorKind::MissingSecret,
                "webhook secret must not be empty",
            ));
        }

        if opts.signature_header.is_empty() {
            opts.signature_header = DEFAULT_SIGNATURE_HEADER.to_string();
        }

        // Zero means unset.
        if opts.tolerance.is_zero() {
            opts.tolerance = DEFAULT_TOLERANCE;
        }

        Ok(Self { opts })
    }

    pub fn opts(&self) -> &WebhookOpts {
        &self.opts
    }

    /// Name of the header this verifier reads the signature from.
    pub fn signature_header(&self) -> &str {
        &self.opts.signature_header
    }

    /// Read the body and signature header from `request` and verify them.
    ///
    /// Fails with `MissingHeader` when the header is absent or empty.
    pub fn verify_request<R>(&self, request: &mut R) -> Result<(), Error>
    where
        R: WebhookRequest + ?Sized,
    {
        let body = request.read_body()?;

        let header = match request.header(&self.opts.signature_header) {
            Some(value) if !value.is_empty() => value,
            _ => {
                warn!("Rejected webhook: missing {} header", self.opts.signature_header);
                return Err(webhook_error(
                    WebhookErrorKind::MissingHeader,
                    &format!("Missing signature header: {}", self.opts.signature_header),
                ));
            }
        };

        self.verify(&body, header)
    }

    /// Verify a raw payload against a signature header value.
    pub fn verify_payload(&self, body: &[u8], header: &str) -> Result<(), Error> {
        self.verify(body, header)
    }

    /// Verify `body` against `header` using the current time for freshness checks.
    pub fn verify(&self, body: &[u8], header: &str) -> Result<(), Error> {
        self.verify_at(body, header, Utc::now())
    }

    /// Verify `body` against `header` as if the current time were `now`.
    pub fn verify_at(&self, body: &[u8], header: &str, now: DateTime<Utc>) -> Result<(), Error> {
        let result = self.check(body, header, now);
        if let Err(err) = &result {
            warn!("Rejected webhook: {}", err);
        }
        result
    }

    fn check(&self, body: &[u8], header: &str, now: DateTime<Utc>) -> Result<(), Error> {
        let signed =
            SignedHeader::parse(header, self.opts.encoding, self.opts.tolerance, now)?;

        let timestamp = if signed.is_advanced {
            signed.timestamp
        } else {
            None
        };
        let expected = compute_signature(
            self.opts.hash,
            self.opts.secret.expose_secret().as_bytes(),
            timestamp,
            body,
        )?;

        if signed
            .signatures
            .iter()
            .any(|candidate| signatures_match(&expected, candidate))
        {
            debug!("Webhook signature verified");
            return Ok(());
        }

        Err(webhook_error(
            WebhookErrorKind::InvalidSignature,
            &format!("none of {} signature(s) matched", signed.signatures.len()),
        ))
    }

    /// Produce a simple-format header value (`<encoded-signature>`) for `body`.
    pub fn sign(&self, body: &[u8]) -> Result<String, Error> {
        let digest = compute_signature(
            self.opts.hash,
            self.opts.secret.expose_secret().as_bytes(),
            None,
            body,
        )?;
        Ok(self.opts.encoding.encode(&digest))
    }

    /// Produce an advanced-format header value (`t=<ts>,v1=<encoded-signature>`) for `body`.
    pub fn sign_at(&self, body: &[u8], timestamp: DateTime<Utc>) -> Result<String, Error> {
        let secs = timestamp.timestamp();
        let digest = compute_signature(
            self.opts.hash,
            self.opts.secret.expose_secret().as_bytes(),
            Some(secs),
            body,
        )?;
        Ok(format!("t={},v1={}", secs, self.opts.encoding.encode(&digest)))
    }
}
