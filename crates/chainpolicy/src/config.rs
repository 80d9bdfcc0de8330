//! Parameter override configuration from TOML and environment variables.
//!
//! Development networks and test harnesses describe their deviations from
//! the compiled-in defaults in:
//! 1. A TOML file (every key optional)
//! 2. Environment variables (override TOML values)
//!
//! Environment variable prefix: CHAINPOLICY_
//!
//! ```toml
//! supported_proof_types = ["StackedDrg2KiBV1"]
//! pre_commit_challenge_delay = 10
//! consensus_miner_min_power = 2048
//! min_verified_deal_size = 256
//! wpost_challenge_window = 10
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use chainpolicy_abi::{ChainEpoch, PolicyError, RegisteredSealProof, StoragePower};

use crate::overrides::PolicyOverrides;
use crate::policy::Policy;

/// Overrides to apply on top of the compiled-in defaults.
///
/// Absent keys leave the corresponding parameter untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Replaces the supported seal proof set of every revision.
    #[serde(default)]
    pub supported_proof_types: Option<Vec<RegisteredSealProof>>,
    /// Pre-commit challenge delay in epochs.
    #[serde(default)]
    pub pre_commit_challenge_delay: Option<ChainEpoch>,
    /// Minimum miner power for leader election, in bytes.
    #[serde(default)]
    pub consensus_miner_min_power: Option<u64>,
    /// Minimum verified deal size, in bytes.
    #[serde(default)]
    pub min_verified_deal_size: Option<u64>,
    /// Window PoSt challenge window in epochs; proving periods follow.
    #[serde(default)]
    pub wpost_challenge_window: Option<ChainEpoch>,
}

impl PolicyConfig {
    /// The 2 KiB development network parameters.
    pub fn devnet_2k() -> Self {
        Self {
            supported_proof_types: Some(vec![RegisteredSealProof::StackedDrg2KiBV1]),
            pre_commit_challenge_delay: Some(10),
            consensus_miner_min_power: Some(2048),
            min_verified_deal_size: Some(256),
            wpost_challenge_window: None,
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, anyhow::Error> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, anyhow::Error> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from an optional TOML file, with environment
    /// variable overrides.
    ///
    /// A missing file is not an error: the overrides start out empty.
    pub fn load(path: Option<&Path>) -> Result<Self, anyhow::Error> {
        let mut config = match path {
            Some(path) if path.exists() => Self::from_file(path)?,
            Some(path) => {
                tracing::warn!(
                    path = %path.display(),
                    "Policy config file not found, using defaults"
                );
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());

        Ok(config)
    }

    /// Apply `CHAINPOLICY_*` overrides read through `lookup`.
    ///
    /// Values that fail to parse are logged and ignored.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("CHAINPOLICY_SUPPORTED_PROOF_TYPES") {
            let parsed: Result<Vec<RegisteredSealProof>, _> = val
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(str::parse)
                .collect();
            match parsed {
                Ok(types) => self.supported_proof_types = Some(types),
                Err(e) => tracing::warn!(error = %e, "Ignoring CHAINPOLICY_SUPPORTED_PROOF_TYPES"),
            }
        }
        if let Some(d) = parse_env(&lookup, "CHAINPOLICY_PRE_COMMIT_CHALLENGE_DELAY") {
            self.pre_commit_challenge_delay = Some(d);
        }
        if let Some(p) = parse_env(&lookup, "CHAINPOLICY_CONSENSUS_MINER_MIN_POWER") {
            self.consensus_miner_min_power = Some(p);
        }
        if let Some(s) = parse_env(&lookup, "CHAINPOLICY_MIN_VERIFIED_DEAL_SIZE") {
            self.min_verified_deal_size = Some(s);
        }
        if let Some(w) = parse_env(&lookup, "CHAINPOLICY_WPOST_CHALLENGE_WINDOW") {
            self.wpost_challenge_window = Some(w);
        }
    }

    /// Check every value before anything is written.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if let Some(d) = self.pre_commit_challenge_delay {
            if d < 0 {
                return Err(PolicyError::InvalidParameter(format!(
                    "pre_commit_challenge_delay must not be negative, got {}",
                    d
                )));
            }
        }
        if let Some(w) = self.wpost_challenge_window {
            if w <= 0 {
                return Err(PolicyError::InvalidParameter(format!(
                    "wpost_challenge_window must be positive, got {}",
                    w
                )));
            }
        }
        Ok(())
    }

    /// Apply the configured overrides. Either every override is applied or,
    /// if validation fails, none is.
    pub fn apply(&self, overrides: &mut PolicyOverrides<'_>) -> Result<(), PolicyError> {
        self.validate()?;

        // First, as its bounds depend on the registry's period deadlines.
        if let Some(window) = self.wpost_challenge_window {
            overrides.set_wpost_challenge_window(window)?;
        }
        if let Some(types) = &self.supported_proof_types {
            overrides.set_supported_proof_types(types);
        }
        if let Some(delay) = self.pre_commit_challenge_delay {
            overrides.set_pre_commit_challenge_delay(delay)?;
        }
        if let Some(power) = self.consensus_miner_min_power {
            overrides.set_consensus_miner_min_power(StoragePower::from(power))?;
        }
        if let Some(size) = self.min_verified_deal_size {
            overrides.set_min_verified_deal_size(StoragePower::from(size))?;
        }
        Ok(())
    }

    /// A policy with compiled-in defaults and these overrides applied.
    pub fn build_policy(&self) -> Result<Policy, PolicyError> {
        let mut policy = Policy::new();
        self.apply(&mut policy.overrides())?;
        Ok(policy)
    }
}

fn parse_env<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    let val = lookup(key)?;
    match val.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(key, value = %val, "Ignoring unparsable environment override");
            None
        }
    }
}
