//! HMAC signature computation and constant-time comparison.

use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha512};
use subtle::ConstantTimeEq;

use super::HashAlgorithm;
use crate::error::{webhook_error, Error, WebhookErrorKind};

type HmacSha256 = Hmac<Sha256>;
type HmacSha512 = Hmac<Sha512>;

/// Compute the raw HMAC digest of `body`.
///
/// When `timestamp` is present the signed content is `<timestamp>,<body>`,
/// with the timestamp written as decimal Unix seconds.
pub(crate) fn compute_signature(
    hash: HashAlgorithm,
    secret: &[u8],
    timestamp: Option<i64>,
    body: &[u8],
) -> Result<Vec<u8>, Error> {
    match hash {
        HashAlgorithm::Sha256 => digest::<HmacSha256>(secret, timestamp, body),
        HashAlgorithm::Sha512 => digest::<HmacSha512>(secret, timestamp, body),
    }
}

fn digest<M: Mac + KeyInit>(
    secret: &[u8],
    timestamp: Option<i64>,
    body: &[u8],
) -> Result<Vec<u8>, Error> {
    // HMAC accepts keys of any length; this only guards the `KeyInit` contract.
    let mut mac = <M as Mac>::new_from_slice(secret)
        .map_err(|_| webhook_error(WebhookErrorKind::InvalidSignature, "Invalid HMAC key"))?;

    if let Some(timestamp) = timestamp {
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b",");
    }
    mac.update(body);

    Ok(mac.finalize().into_bytes().to_vec())
}

/// Constant-time comparison of a computed digest against a supplied signature.
pub(crate) fn signatures_match(expected: &[u8], candidate: &[u8]) -> bool {
    if expected.len() != candidate.len() {
        return false;
    }
    expected.ct_eq(candidate).into()
}
