use clap::builder::TypedValueParser as _;
use clap::{Parser, Subcommand};
use convoy_webhook::error::{config_error, ConfigErrorKind};
use convoy_webhook::webhook::{Encoding, HashAlgorithm, DEFAULT_SIGNATURE_HEADER};
use convoy_webhook::{Error, WebhookOpts};
use dotenvy::dotenv;
use log::LevelFilter;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_TOLERANCE_SECS: u64 = 300;

#[derive(Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// The shared secret the webhook sender signs payloads with.
    #[arg(long, env, hide_env_values = true)]
    webhook_secret: Option<String>,

    /// Name of the HTTP header carrying the signature.
    #[arg(long, env, default_value = DEFAULT_SIGNATURE_HEADER)]
    pub signature_header: String,

    /// HMAC hash algorithm used to sign payloads.
    #[arg(
        long,
        env,
        default_value_t = HashAlgorithm::Sha256,
        value_parser = clap::builder::PossibleValuesParser::new(["SHA256", "SHA512", "sha256", "sha512"])
            .map(|s| s.parse::<HashAlgorithm>().unwrap()),
        )]
    pub hash_algorithm: HashAlgorithm,

    /// Encoding of the signatures carried in the header.
    #[arg(
        long,
        env,
        default_value_t = Encoding::Hex,
        value_parser = clap::builder::PossibleValuesParser::new(["hex", "base64"])
            .map(|s| s.parse::<Encoding>().unwrap()),
        )]
    pub encoding: Encoding,

    /// Maximum age in seconds of a timestamped signature before it is rejected.
    #[arg(long, env, default_value_t = DEFAULT_TOLERANCE_SECS)]
    pub tolerance_secs: u64,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    /// Verify a webhook payload against its signature header value.
    Verify {
        /// The signature header value, e.g. `t=1700000000,v1=<hex>`.
        #[arg(long)]
        header: String,

        /// File holding the raw request body. Reads stdin when omitted.
        #[arg(long)]
        body_file: Option<PathBuf>,
    },
    /// Produce a signature header value for a payload.
    Sign {
        /// File holding the raw request body. Reads stdin when omitted.
        #[arg(long)]
        body_file: Option<PathBuf>,

        /// Unix timestamp to bind into an advanced header.
        #[arg(long, conflicts_with = "now")]
        timestamp: Option<i64>,

        /// Bind the current time into an advanced header.
        #[arg(long)]
        now: bool,
    },
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field(
                "webhook_secret",
                &self.webhook_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .field("signature_header", &self.signature_header)
            .field("hash_algorithm", &self.hash_algorithm)
            .field("encoding", &self.encoding)
            .field("tolerance_secs", &self.tolerance_secs)
            .field("log_level_filter", &self.log_level_filter)
            .field("command", &self.command)
            .finish()
    }
}

impl Config {
    pub fn new() -> Self {
        // Load .env file first
        dotenv().ok();
        // Then parse the command line parameters and flags
        Config::parse()
    }

    pub fn set_webhook_secret(mut self, webhook_secret: String) -> Self {
        self.webhook_secret = Some(webhook_secret);
        self
    }

    pub fn tolerance(&self) -> Duration {
        Duration::from_secs(self.tolerance_secs)
    }

    /// Converts the parsed configuration into verifier options.
    pub fn webhook_opts(&self) -> Result<WebhookOpts, Error> {
        let secret = self.webhook_secret.clone().ok_or_else(|| {
            config_error(
                ConfigErrorKind::MissingSecret,
                "No webhook secret provided (--webhook-secret or WEBHOOK_SECRET)",
            )
        })?;

        Ok(WebhookOpts::new(secret)
            .with_signature_header(self.signature_header.clone())
            .with_hash(self.hash_algorithm)
            .with_encoding(self.encoding)
            .with_tolerance(self.tolerance()))
    }
}
