use config::Config;
use convoy_webhook::{Error, Webhook};
use log::info;

pub mod config;
pub mod logging;

/// Builds the webhook verifier described by the command line and environment.
pub fn init_webhook(config: &Config) -> Result<Webhook, Error> {
    let webhook = Webhook::new(config.webhook_opts()?)?;

    let opts = webhook.opts();
    info!(
        "Webhook verifier config: signature_header={}, hash={}, encoding={}, tolerance={}s",
        opts.signature_header,
        opts.hash,
        opts.encoding,
        opts.tolerance.as_secs(),
    );

    Ok(webhook)
}
