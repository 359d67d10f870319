use std::io;

use convoy_webhook::webhook::{Encoding, HashAlgorithm, DEFAULT_SIGNATURE_HEADER};
use convoy_webhook::{ErrorKind, Webhook, WebhookErrorKind, WebhookOpts, WebhookRequest};

const USER_BODY: &str = r#"{"email":"test@gmail.com","first_name":"test","last_name":"test"}"#;

fn post(header: Option<(&str, &str)>, body: &str) -> http::Request<Vec<u8>> {
    let mut builder = http::Request::builder()
        .method(http::Method::POST)
        .uri("http://localhost:5005/webhooks");
    if let Some((name, value)) = header {
        builder = builder.header(name, value);
    }
    builder.body(body.as_bytes().to_vec()).unwrap()
}

/// A request whose body stream fails part-way through.
struct TruncatedRequest {
    signature: String,
}

impl WebhookRequest for TruncatedRequest {
    fn header(&self, name: &str) -> Option<&str> {
        name.eq_ignore_ascii_case(DEFAULT_SIGNATURE_HEADER)
            .then_some(self.signature.as_str())
    }

    fn read_body(&mut self) -> io::Result<Vec<u8>> {
        Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "connection closed mid-body",
        ))
    }
}

fn sha512_webhook(encoding: Encoding) -> Webhook {
    Webhook::new(
        WebhookOpts::new("8IX9njirDG")
            .with_hash(HashAlgorithm::Sha512)
            .with_encoding(encoding),
    )
    .unwrap()
}

#[test]
fn test_missing_header_is_rejected() {
    let webhook = Webhook::new(WebhookOpts::new("random_secret")).unwrap();
    let mut request = post(None, "");

    let err = webhook.verify_request(&mut request).unwrap_err();
    assert_eq!(
        err.error_kind,
        ErrorKind::Webhook(WebhookErrorKind::MissingHeader)
    );
}

#[test]
fn test_empty_header_is_rejected() {
    let webhook = Webhook::new(WebhookOpts::new("random_secret")).unwrap();
    let mut request = post(Some((DEFAULT_SIGNATURE_HEADER, "")), USER_BODY);

    let err = webhook.verify_request(&mut request).unwrap_err();
    assert_eq!(err.webhook_kind(), Some(WebhookErrorKind::MissingHeader));
}

#[test]
fn test_simple_hex_signature_is_accepted() {
    let webhook = sha512_webhook(Encoding::Hex);
    let mut request = post(
        Some((
            DEFAULT_SIGNATURE_HEADER,
            "666060cbe1348bbc7ec98f4e93dda8eaaf11bbf283d6a2dd56e841b2ef12fcd465c846903f709942473e1442604798186746f04848702c44a773f80672de7b21",
        )),
        USER_BODY,
    );

    assert!(webhook.verify_request(&mut request).is_ok());
}

#[test]
fn test_simple_base64_signature_is_accepted() {
    let webhook = sha512_webhook(Encoding::Base64);
    let mut request = post(
        Some((
            DEFAULT_SIGNATURE_HEADER,
            "ZmBgy+E0i7x+yY9Ok92o6q8Ru/KD1qLdVuhBsu8S/NRlyEaQP3CZQkc+FEJgR5gYZ0bwSEhwLESnc/gGct57IQ==",
        )),
        USER_BODY,
    );

    assert!(webhook.verify_request(&mut request).is_ok());
}

#[test]
fn test_custom_header_name_is_honoured() {
    let webhook = Webhook::new(
        WebhookOpts::new("8IX9njirDG").with_signature_header("X-Hook-Signature"),
    )
    .unwrap();
    let signature = webhook.sign(USER_BODY.as_bytes()).unwrap();

    let mut request = post(Some(("x-hook-signature", signature.as_str())), USER_BODY);
    assert!(webhook.verify_request(&mut request).is_ok());

    let mut request = post(Some((DEFAULT_SIGNATURE_HEADER, signature.as_str())), USER_BODY);
    let err = webhook.verify_request(&mut request).unwrap_err();
    assert_eq!(err.webhook_kind(), Some(WebhookErrorKind::MissingHeader));
}

#[test]
fn test_freshly_signed_advanced_header_is_accepted() {
    let webhook = sha512_webhook(Encoding::Base64);
    let header = webhook
        .sign_at(USER_BODY.as_bytes(), chrono::Utc::now())
        .unwrap();

    let mut request = post(Some((DEFAULT_SIGNATURE_HEADER, header.as_str())), USER_BODY);
    assert!(webhook.verify_request(&mut request).is_ok());
}

#[test]
fn test_stale_advanced_header_is_rejected() {
    let webhook = sha512_webhook(Encoding::Hex);
    let signed_at = chrono::Utc::now() - chrono::Duration::seconds(301);
    let header = webhook.sign_at(USER_BODY.as_bytes(), signed_at).unwrap();

    let mut request = post(Some((DEFAULT_SIGNATURE_HEADER, header.as_str())), USER_BODY);
    let err = webhook.verify_request(&mut request).unwrap_err();
    assert_eq!(err.webhook_kind(), Some(WebhookErrorKind::TimestampExpired));
}

#[test]
fn test_body_read_failure_is_an_io_error() {
    let webhook = sha512_webhook(Encoding::Hex);
    let signature = webhook.sign(USER_BODY.as_bytes()).unwrap();
    let mut request = TruncatedRequest { signature };

    let err = webhook.verify_request(&mut request).unwrap_err();
    assert_eq!(err.error_kind, ErrorKind::Io);
    assert!(err.to_string().contains("connection closed mid-body"));
}
