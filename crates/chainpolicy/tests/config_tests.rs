//! Tests for override configuration loading and application.

use std::collections::HashMap;

use chainpolicy::{PolicyConfig, PolicyError};
use chainpolicy_abi::*;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

// ═══════════════════════════════════════════════════════════════
// Parsing
// ═══════════════════════════════════════════════════════════════

#[test]
fn parses_full_toml() {
    let config = PolicyConfig::from_toml_str(
        r#"
        supported_proof_types = ["StackedDrg2KiBV1", "StackedDrg8MiBV1"]
        pre_commit_challenge_delay = 10
        consensus_miner_min_power = 2048
        min_verified_deal_size = 256
        wpost_challenge_window = 4
        "#,
    )
    .unwrap();

    assert_eq!(
        config.supported_proof_types,
        Some(vec![RegisteredSealProof::StackedDrg2KiBV1, RegisteredSealProof::StackedDrg8MiBV1])
    );
    assert_eq!(config.pre_commit_challenge_delay, Some(10));
    assert_eq!(config.consensus_miner_min_power, Some(2048));
    assert_eq!(config.min_verified_deal_size, Some(256));
    assert_eq!(config.wpost_challenge_window, Some(4));
}

#[test]
fn empty_toml_is_no_overrides() {
    assert_eq!(PolicyConfig::from_toml_str("").unwrap(), PolicyConfig::default());
}

#[test]
fn unknown_proof_name_is_a_parse_error() {
    let unknown_proof = r#"supported_proof_types = ["StackedDrg1TiBV1"]"#;
    assert!(PolicyConfig::from_toml_str(unknown_proof).is_err());
}

#[test]
fn loads_from_file() {
    let path = std::env::temp_dir().join(format!("chainpolicy-config-{}.toml", std::process::id()));
    std::fs::write(&path, "pre_commit_challenge_delay = 7\n").unwrap();

    let config = PolicyConfig::from_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(config.pre_commit_challenge_delay, Some(7));
    assert!(config.supported_proof_types.is_none());
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let path = std::env::temp_dir().join("chainpolicy-does-not-exist.toml");
    let config = PolicyConfig::load(Some(&path)).unwrap();
    // Same result as loading with no file at all: only the environment contributes.
    assert_eq!(config, PolicyConfig::load(None).unwrap());
}

// ═══════════════════════════════════════════════════════════════
// Environment overrides
// ═══════════════════════════════════════════════════════════════

#[test]
fn environment_overrides_toml_values() {
    let mut config =
        PolicyConfig::from_toml_str("pre_commit_challenge_delay = 10\nwpost_challenge_window = 4")
            .unwrap();
    config.apply_env_overrides(env(&[
        ("CHAINPOLICY_PRE_COMMIT_CHALLENGE_DELAY", "20"),
        ("CHAINPOLICY_SUPPORTED_PROOF_TYPES", "StackedDrg2KiBV1, StackedDrg512MiBV1"),
        ("CHAINPOLICY_MIN_VERIFIED_DEAL_SIZE", "128"),
    ]));

    assert_eq!(config.pre_commit_challenge_delay, Some(20));
    assert_eq!(config.wpost_challenge_window, Some(4));
    assert_eq!(config.min_verified_deal_size, Some(128));
    assert_eq!(
        config.supported_proof_types,
        Some(vec![RegisteredSealProof::StackedDrg2KiBV1, RegisteredSealProof::StackedDrg512MiBV1])
    );
}

#[test]
fn unparsable_environment_values_are_ignored() {
    let mut config = PolicyConfig::devnet_2k();
    config.apply_env_overrides(env(&[
        ("CHAINPOLICY_CONSENSUS_MINER_MIN_POWER", "lots"),
        ("CHAINPOLICY_SUPPORTED_PROOF_TYPES", "StackedDrg2KiBV1,Bogus"),
    ]));
    assert_eq!(config, PolicyConfig::devnet_2k());
}

// ═══════════════════════════════════════════════════════════════
// Application
// ═══════════════════════════════════════════════════════════════

#[test]
fn devnet_2k_policy() {
    let policy = PolicyConfig::devnet_2k().build_policy().unwrap();

    assert_eq!(policy.default_sector_size(), Ok(SectorSize(2 * KIB)));
    assert_eq!(policy.default_pre_commit_challenge_delay(), Ok(10));
    assert_eq!(
        policy
            .consensus_miner_min_power(
                ActorsVersion::V2,
                RegisteredPoStProof::StackedDrgWindow2KiBV1,
            )
            .unwrap(),
        StoragePower::from(2048)
    );
    assert_eq!(
        policy.min_verified_deal_size(NetworkVersion::V10).unwrap(),
        StoragePower::from(256)
    );
    // Untouched parameters keep their defaults.
    assert_eq!(policy.wpost_challenge_window(ActorsVersion::V3), Ok(60));
}

#[test]
fn invalid_config_applies_nothing() {
    let config = PolicyConfig {
        pre_commit_challenge_delay: Some(3),
        wpost_challenge_window: Some(0),
        ..PolicyConfig::default()
    };
    let mut policy = chainpolicy::Policy::new();
    let err = config.apply(&mut policy.overrides()).unwrap_err();

    assert!(matches!(err, PolicyError::InvalidParameter(_)));
    assert_eq!(policy.default_pre_commit_challenge_delay(), Ok(150));
    assert_eq!(policy.wpost_proving_period(ActorsVersion::V0), Ok(2880));
}

#[test]
fn overflowing_challenge_window_applies_nothing() {
    let config = PolicyConfig {
        supported_proof_types: Some(vec![RegisteredSealProof::StackedDrg2KiBV1]),
        pre_commit_challenge_delay: Some(3),
        wpost_challenge_window: Some(ChainEpoch::MAX / 2),
        ..PolicyConfig::default()
    };
    let mut policy = chainpolicy::Policy::new();
    let err = config.apply(&mut policy.overrides()).unwrap_err();

    assert!(matches!(err, PolicyError::InvalidParameter(_)));
    assert_eq!(policy.default_sector_size(), Ok(SectorSize(32 * GIB)));
    assert_eq!(policy.default_pre_commit_challenge_delay(), Ok(150));
    assert_eq!(policy.wpost_proving_period(ActorsVersion::V3), Ok(2880));
}

#[test]
fn config_round_trips_through_toml() {
    let config = PolicyConfig::devnet_2k();
    let text = toml::to_string(&config).unwrap();
    assert_eq!(PolicyConfig::from_toml_str(&text).unwrap(), config);
}
