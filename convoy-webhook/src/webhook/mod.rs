//! Webhook signature verification.

mod encoding;
mod header;
mod options;
mod signature;
mod verifier;

pub use options::{
    Encoding, HashAlgorithm, WebhookOpts, DEFAULT_ENCODING, DEFAULT_HASH,
    DEFAULT_SIGNATURE_HEADER, DEFAULT_TOLERANCE,
};
pub use verifier::Webhook;

use std::io;

/// The two capabilities the verifier needs from an inbound HTTP request.
pub trait WebhookRequest {
    /// Look up a header value by name. Returns `None` when absent or not valid text.
    fn header(&self, name: &str) -> Option<&str>;

    /// Read the full raw request body.
    fn read_body(&mut self) -> io::Result<Vec<u8>>;
}

impl<B: AsRef<[u8]>> WebhookRequest for http::Request<B> {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers().get(name)?.to_str().ok()
    }

    fn read_body(&mut self) -> io::Result<Vec<u8>> {
        Ok(self.body().as_ref().to_vec())
    }
}
