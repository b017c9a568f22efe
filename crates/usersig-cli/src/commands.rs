//! CLI command implementations

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use usersig_core::{decode_user_sig, PrivateKey, PublicKey, UserSigFields};

use crate::config::CliConfig;

/// UserSig CLI - issue and verify signed user tokens
#[derive(Parser)]
#[command(name = "usersig")]
#[command(about = "Issue and verify UserSig authentication tokens")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (defaults to ~/.config/usersig/config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Issue a token for a user
    Gen {
        /// PEM private key (PKCS#8)
        #[arg(short, long)]
        key: Option<PathBuf>,

        /// Application id
        #[arg(long)]
        sdk_appid: Option<String>,

        /// User identifier
        #[arg(short, long)]
        identifier: String,

        /// Validity window in seconds
        #[arg(short, long)]
        expire: Option<u64>,
    },

    /// Verify a token and print its fields
    Verify {
        /// PEM public key (SubjectPublicKeyInfo)
        #[arg(short, long)]
        key: Option<PathBuf>,

        /// Token to verify
        token: String,
    },

    /// Print a token's fields without verifying it
    Inspect {
        /// Token to decode
        token: String,
    },
}

impl Cli {
    /// Configuration selected by `--config`, or the default location
    pub fn load_config(&self) -> CliConfig {
        match &self.config {
            Some(path) => CliConfig::load_from(path),
            None => CliConfig::load(),
        }
    }
}

/// Run a command, writing results to `out`
pub fn run(command: Commands, config: &CliConfig, out: &mut impl Write) -> Result<()> {
    match command {
        Commands::Gen {
            key,
            sdk_appid,
            identifier,
            expire,
        } => {
            let key_path = key
                .or_else(|| config.private_key_path.clone())
                .context("No private key given (use --key or set private_key_path)")?;
            let sdk_appid = sdk_appid
                .or_else(|| config.sdk_appid.clone())
                .context("No application id given (use --sdk-appid or set sdk_appid)")?;

            let private_key = PrivateKey::from_pkcs8_pem(&read_pem(&key_path)?)?;
            let mut fields = UserSigFields::new(sdk_appid, identifier);
            if let Some(expire) = expire.or(config.expire_after) {
                fields = fields.with_expire(expire);
            }

            let signed = fields.sign(&private_key)?;
            tracing::info!(
                "Issued token for {} ({}), expires at {}",
                signed.fields().identifier(),
                private_key.curve(),
                signed.fields().expires_at()
            );
            writeln!(out, "{}", signed)?;
        }

        Commands::Verify { key, token } => {
            let key_path = key
                .or_else(|| config.public_key_path.clone())
                .context("No public key given (use --key or set public_key_path)")?;

            let public_key = PublicKey::from_public_key_pem(&read_pem(&key_path)?)?;
            let (fields, valid) = usersig_core::verify_user_sig_with_key(&public_key, &token)?;

            let report = serde_json::json!({
                "valid": valid,
                "fields": fields,
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;

            if !valid {
                bail!("UserSig signature did not verify");
            }
        }

        Commands::Inspect { token } => {
            let fields = decode_user_sig(&token)?;
            writeln!(out, "{}", serde_json::to_string_pretty(&fields)?)?;
        }
    }

    Ok(())
}

fn read_pem(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read key file {:?}", path))
}
