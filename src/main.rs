use chrono::{DateTime, Utc};
use convoy_webhook::error::webhook_error;
use convoy_webhook::{Error, Webhook, WebhookErrorKind};
use log::{error, info};
use service::{
    config::{Command, Config},
    logging::Logger,
};
use std::io::Read;
use std::path::Path;

fn main() {
    let config = Config::new();
    Logger::init_logger(&config);

    let webhook = match service::init_webhook(&config) {
        Ok(webhook) => webhook,
        Err(e) => {
            error!("Failed to configure webhook verifier: {e}");
            std::process::exit(1);
        }
    };

    match run(&webhook, &config.command) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    }
}

fn run(webhook: &Webhook, command: &Command) -> Result<String, Error> {
    match command {
        Command::Verify { header, body_file } => {
            let body = read_body(body_file.as_deref())?;
            webhook.verify(&body, header)?;
            info!("Webhook signature is valid ({} byte body)", body.len());
            Ok("valid".to_string())
        }
        Command::Sign {
            body_file,
            timestamp,
            now,
        } => {
            let body = read_body(body_file.as_deref())?;
            match (*timestamp, *now) {
                (Some(secs), _) => {
                    let signed_at = DateTime::from_timestamp(secs, 0).ok_or_else(|| {
                        webhook_error(
                            WebhookErrorKind::InvalidHeader,
                            &format!("timestamp out of range: {secs}"),
                        )
                    })?;
                    webhook.sign_at(&body, signed_at)
                }
                (None, true) => webhook.sign_at(&body, Utc::now()),
                (None, false) => webhook.sign(&body),
            }
        }
    }
}

/// Reads the raw payload from `path`, or from stdin when no path is given.
fn read_body(path: Option<&Path>) -> Result<Vec<u8>, Error> {
    match path {
        Some(path) => Ok(std::fs::read(path)?),
        None => {
            let mut body = Vec::new();
            std::io::stdin().read_to_end(&mut body)?;
            Ok(body)
        }
    }
}
