//! Signature header parsing.
//!
//! Two formats are accepted:
//! - simple: `<encoded-signature>`
//! - advanced: `t=<unix-seconds>,v1=<encoded-signature>[,v1=<encoded-signature>...]`

use std::time::Duration;

use chrono::{DateTime, Utc};
use log::debug;

use super::Encoding;
use crate::error::{webhook_error, Error, WebhookErrorKind};

const NANOS_PER_SEC: i128 = 1_000_000_000;

/// A parsed signature header. Lives only for the duration of one verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SignedHeader {
    /// Unix seconds, present only in the advanced format.
    pub timestamp: Option<i64>,
    pub signatures: Vec<Vec<u8>>,
    pub is_advanced: bool,
}

impl SignedHeader {
    /// Parse a header value, decoding every signature with `encoding`.
    ///
    /// Advanced headers are also checked for freshness: a timestamp older than
    /// `tolerance` relative to `now` is rejected. Exactly `tolerance` old is accepted.
    pub fn parse(
        header: &str,
        encoding: Encoding,
        tolerance: Duration,
        now: DateTime<Utc>,
    ) -> Result<Self, Error> {
        if header.is_empty() {
            return Err(webhook_error(
                WebhookErrorKind::InvalidHeader,
                "signature header is empty",
            ));
        }

        let pairs: Vec<&str> = header.split(',').collect();
        if pairs.len() > 1 {
            Self::parse_advanced(&pairs, encoding, tolerance, now)
        } else {
            Self::parse_simple(header, encoding)
        }
    }

    fn parse_simple(value: &str, encoding: Encoding) -> Result<Self, Error> {
        debug!("Parsing simple signature header");
        let signature = encoding.decode(value)?;

        Ok(SignedHeader {
            timestamp: None,
            signatures: vec![signature],
            is_advanced: false,
        })
    }

    fn parse_advanced(
        pairs: &[&str],
        encoding: Encoding,
        tolerance: Duration,
        now: DateTime<Utc>,
    ) -> Result<Self, Error> {
        debug!("Parsing advanced signature header with {} pairs", pairs.len());
        let mut timestamp = None;
        let mut signatures = Vec::new();

        for pair in pairs {
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                webhook_error(
                    WebhookErrorKind::InvalidHeader,
                    &format!("malformed header pair: {}", pair),
                )
            })?;

            if key == "t" {
                timestamp = Some(parse_timestamp(value)?);
                continue;
            }

            // Any key mentioning `v` is a signature version (v1, v2, ...).
            if key.contains('v') {
                match encoding.decode(value) {
                    Ok(signature) => signatures.push(signature),
                    Err(_) => debug!("Skipping undecodable {} signature", key),
                }
                continue;
            }

            return Err(webhook_error(
                WebhookErrorKind::InvalidHeader,
                &format!("unexpected header key: {}", key),
            ));
        }

        if signatures.is_empty() {
            return Err(webhook_error(
                WebhookErrorKind::InvalidSignature,
                "header carries no decodable signature",
            ));
        }

        let signed_at = timestamp.ok_or_else(|| {
            webhook_error(
                WebhookErrorKind::TimestampExpired,
                "header carries no timestamp",
            )
        })?;

        if is_expired(signed_at, tolerance, now) {
            return Err(webhook_error(
                WebhookErrorKind::TimestampExpired,
                &format!("signed at t={}, tolerance {}s", signed_at, tolerance.as_secs()),
            ));
        }

        Ok(SignedHeader {
            timestamp: Some(signed_at),
            signatures,
            is_advanced: true,
        })
    }
}

// Any base-10 integer is accepted, even one outside chrono's representable range.
fn parse_timestamp(value: &str) -> Result<i64, Error> {
    value.parse::<i64>().map_err(|_| {
        webhook_error(
            WebhookErrorKind::InvalidHeader,
            &format!("invalid timestamp: {}", value),
        )
    })
}

// Future timestamps are never expired.
fn is_expired(signed_at: i64, tolerance: Duration, now: DateTime<Utc>) -> bool {
    let now_nanos = i128::from(now.timestamp()) * NANOS_PER_SEC
        + i128::from(now.timestamp_subsec_nanos());
    let age = now_nanos - i128::from(signed_at) * NANOS_PER_SEC;

    age > i128::try_from(tolerance.as_nanos()).unwrap_or(i128::MAX)
}
