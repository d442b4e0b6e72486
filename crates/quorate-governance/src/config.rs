//! Governance configuration

use quorate_common::{
    Identity, QuorateError, Result, SignatureScheme, DEFAULT_PERCENTAGE, DEFAULT_PRECISION,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Initial governance parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceConfig {
    /// Initial member identities
    #[serde(default)]
    pub members: Vec<Identity>,
    /// Threshold numerator
    #[serde(default = "default_percentage")]
    pub percentage: u64,
    /// Threshold denominator
    #[serde(default = "default_precision")]
    pub precision: u64,
    /// Signature recovery scheme
    #[serde(default)]
    pub scheme: SignatureScheme,
    /// Administrator allowed to mutate membership and threshold
    #[serde(default)]
    pub owner: Option<Identity>,
}

fn default_percentage() -> u64 {
    DEFAULT_PERCENTAGE
}

fn default_precision() -> u64 {
    DEFAULT_PRECISION
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            members: Vec::new(),
            percentage: DEFAULT_PERCENTAGE,
            precision: DEFAULT_PRECISION,
            scheme: SignatureScheme::default(),
            owner: None,
        }
    }
}

impl GovernanceConfig {
    /// Load configuration from environment (and `.env` if present)
    pub fn load() -> Result<Self> {
        // Try to load .env file
        let _ = dotenvy::dotenv();

        let mut cfg = Self::default();

        if let Ok(val) = std::env::var("QUORATE_MEMBERS") {
            cfg.members = parse_members(&val)?;
        }
        if let Ok(val) = std::env::var("QUORATE_PERCENTAGE") {
            cfg.percentage = parse_number("QUORATE_PERCENTAGE", &val)?;
        }
        if let Ok(val) = std::env::var("QUORATE_PRECISION") {
            cfg.precision = parse_number("QUORATE_PRECISION", &val)?;
        }
        if let Ok(val) = std::env::var("QUORATE_SCHEME") {
            cfg.scheme = val.parse().map_err(QuorateError::Config)?;
        }
        if let Ok(val) = std::env::var("QUORATE_OWNER") {
            let owner = val
                .parse()
                .map_err(|e| QuorateError::Config(format!("QUORATE_OWNER: {}", e)))?;
            cfg.owner = Some(owner);
        }

        Ok(cfg)
    }

    /// Parse configuration from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| QuorateError::Config(format!("read {}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }

    /// Check the parameters initialization would reject
    pub fn validate(&self) -> Result<()> {
        if self.members.is_empty() {
            return Err(QuorateError::Config("at least one member is required".to_string()));
        }
        if self.percentage >= self.precision {
            return Err(QuorateError::Config(format!(
                "percentage ({}) must be below precision ({})",
                self.percentage, self.precision
            )));
        }
        Ok(())
    }
}

fn parse_members(val: &str) -> Result<Vec<Identity>> {
    val.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse()
                .map_err(|e| QuorateError::Config(format!("QUORATE_MEMBERS entry {}: {}", s, e)))
        })
        .collect()
}

fn parse_number(name: &str, val: &str) -> Result<u64> {
    val.trim()
        .parse()
        .map_err(|e| QuorateError::Config(format!("{}: {}", name, e)))
}
