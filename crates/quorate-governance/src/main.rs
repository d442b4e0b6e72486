//! Quorate quorum checker
//!
//! Usage: `quorate <digest-hex> <signature-hex>...`
//!
//! Governance parameters come from the JSON file named by `QUORATE_CONFIG`,
//! or from `QUORATE_*` environment variables otherwise.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use quorate_common::{MessageHash, Signature, VERSION};
use quorate_governance::{GovernanceConfig, SharedGovernance};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<ExitCode> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting quorate v{}", VERSION);

    let mut args = std::env::args().skip(1);
    let Some(digest_hex) = args.next() else {
        bail!("usage: quorate <digest-hex> <signature-hex>...");
    };
    let digest = parse_digest(&digest_hex)?;
    let signatures = args
        .map(|s| Signature::from_hex(&s).with_context(|| format!("invalid signature hex: {}", s)))
        .collect::<Result<Vec<_>>>()?;

    let config = match std::env::var_os("QUORATE_CONFIG") {
        Some(path) => GovernanceConfig::from_file(&PathBuf::from(path))?,
        None => GovernanceConfig::load()?,
    };
    info!(
        members = config.members.len(),
        percentage = config.percentage,
        precision = config.precision,
        scheme = %config.scheme,
        "Loaded configuration"
    );

    let governance = SharedGovernance::from_config(&config)?;

    match governance.recover_quorum(&digest, &signatures) {
        Ok(signers) => {
            println!("accepted");
            for signer in signers {
                println!("  {}", signer);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            println!("rejected: {}", err);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn parse_digest(s: &str) -> Result<MessageHash> {
    let digits = s.trim().strip_prefix("0x").unwrap_or(s.trim());
    let bytes = hex::decode(digits).context("digest is not valid hex")?;
    let digest: MessageHash = bytes
        .try_into()
        .map_err(|b: Vec<u8>| anyhow::anyhow!("digest must be 32 bytes, got {}", b.len()))?;
    Ok(digest)
}
