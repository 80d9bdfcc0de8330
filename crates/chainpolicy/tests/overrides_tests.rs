//! Tests for the test-only parameter overrides.
//!
//! Verifies:
//! - Every override lands in every revision in one call
//! - Challenge window overrides rescale proving periods everywhere
//! - The large-sector proof is force-enabled on the newest revision
//!   but never becomes the default sector size
//! - Invalid values are rejected without touching any revision

use std::collections::BTreeSet;

use chainpolicy::{MinPowerPolicy, Policy, PolicyError, LARGE_SECTOR_PROOF};
use chainpolicy_abi::*;

fn assert_proving_periods_consistent(policy: &Policy) {
    for bundle in policy.registry().bundles() {
        assert_eq!(
            bundle.wpost_proving_period(),
            bundle.wpost_challenge_window() * bundle.wpost_period_deadlines() as ChainEpoch,
            "proving period out of step for actors {}",
            bundle.version()
        );
    }
}

// ═══════════════════════════════════════════════════════════════
// Challenge window
// ═══════════════════════════════════════════════════════════════

#[test]
fn challenge_window_override_rescales_every_proving_period() {
    let mut policy = Policy::new();
    assert_proving_periods_consistent(&policy);

    policy.overrides().set_wpost_challenge_window(10).unwrap();

    assert_proving_periods_consistent(&policy);
    for v in ActorsVersion::ALL {
        assert_eq!(policy.wpost_challenge_window(v).unwrap(), 10);
        assert_eq!(policy.wpost_proving_period(v).unwrap(), 480);
    }
}

#[test]
fn non_positive_challenge_window_is_rejected() {
    let mut policy = Policy::new();
    for window in [0, -5] {
        let err = policy.overrides().set_wpost_challenge_window(window).unwrap_err();
        assert!(matches!(err, PolicyError::InvalidParameter(_)));
    }
    for v in ActorsVersion::ALL {
        assert_eq!(policy.wpost_challenge_window(v).unwrap(), 60);
        assert_eq!(policy.wpost_proving_period(v).unwrap(), 2880);
    }
}

#[test]
fn overflowing_challenge_window_is_rejected() {
    let mut policy = Policy::new();
    let err = policy
        .overrides()
        .set_wpost_challenge_window(ChainEpoch::MAX / 2)
        .unwrap_err();
    assert!(matches!(err, PolicyError::InvalidParameter(_)));

    assert_proving_periods_consistent(&policy);
    for v in ActorsVersion::ALL {
        assert_eq!(policy.wpost_challenge_window(v).unwrap(), 60);
        assert_eq!(policy.wpost_proving_period(v).unwrap(), 2880);
    }

    // The largest window that still fits is accepted.
    let largest = ChainEpoch::MAX / 48;
    policy.overrides().set_wpost_challenge_window(largest).unwrap();
    assert_eq!(policy.wpost_proving_period(ActorsVersion::V3), Ok(largest * 48));
    assert_proving_periods_consistent(&policy);
}

// ═══════════════════════════════════════════════════════════════
// Supported proof types
// ═══════════════════════════════════════════════════════════════

#[test]
fn added_proof_type_reaches_every_revision_and_group() {
    let mut policy = Policy::new();
    policy
        .overrides()
        .add_supported_proof_types(&[RegisteredSealProof::StackedDrg2KiBV1]);

    for bundle in policy.registry().bundles() {
        for group in bundle.supported_proof_types().groups() {
            assert!(
                group.types.contains(&RegisteredSealProof::StackedDrg2KiBV1),
                "actors {} group from {} lacks 2KiB",
                bundle.version(),
                group.from
            );
            // Added, not replaced.
            assert!(group.types.contains(&RegisteredSealProof::StackedDrg32GiBV1));
        }
    }
}

#[test]
fn large_sector_proof_is_forced_into_newest_revision_only() {
    let mut policy = Policy::new();
    policy
        .overrides()
        .add_supported_proof_types(&[RegisteredSealProof::StackedDrg2KiBV1]);

    assert_eq!(LARGE_SECTOR_PROOF, RegisteredSealProof::StackedDrg8GiBV1);
    assert!(policy
        .is_seal_proof_supported(ActorsVersion::V3, LARGE_SECTOR_PROOF)
        .unwrap());
    assert!(!policy
        .is_seal_proof_supported(ActorsVersion::V2, LARGE_SECTOR_PROOF)
        .unwrap());
    assert!(!policy
        .is_seal_proof_supported(ActorsVersion::V0, LARGE_SECTOR_PROOF)
        .unwrap());

    // Only the newest group of the newest revision.
    let groups = policy.registry().latest().unwrap().supported_proof_types();
    assert!(!groups.at(NetworkVersion::V6).contains(&LARGE_SECTOR_PROOF));
    assert!(groups.at(NetworkVersion::V7).contains(&LARGE_SECTOR_PROOF));
}

#[test]
fn set_proof_types_replaces_every_revision() {
    let mut policy = Policy::new();
    policy
        .overrides()
        .set_supported_proof_types(&[RegisteredSealProof::StackedDrg2KiBV1]);

    let only_2k = BTreeSet::from([RegisteredSealProof::StackedDrg2KiBV1]);
    assert_eq!(policy.supported_proof_types(ActorsVersion::V0).unwrap(), &only_2k);
    assert_eq!(policy.supported_proof_types(ActorsVersion::V2).unwrap(), &only_2k);
    assert_eq!(
        policy.supported_proof_types(ActorsVersion::V3).unwrap(),
        &BTreeSet::from([RegisteredSealProof::StackedDrg2KiBV1, LARGE_SECTOR_PROOF])
    );
    assert_eq!(policy.default_sector_size(), Ok(SectorSize(2 * KIB)));
}

#[test]
fn default_sector_size_follows_overridden_set() {
    let mut policy = Policy::new();
    policy.overrides().set_supported_proof_types(&[
        RegisteredSealProof::StackedDrg64GiBV1,
        RegisteredSealProof::StackedDrg32GiBV1,
    ]);
    // The forced 8GiB proof is accepted at pre-commit but is not a sector size.
    assert!(policy
        .is_seal_proof_supported(NetworkVersion::V11, LARGE_SECTOR_PROOF)
        .unwrap());
    assert_eq!(policy.default_sector_size(), Ok(SectorSize(32 * GIB)));
}

#[test]
fn empty_override_leaves_no_sector_size() {
    let mut policy = Policy::new();
    policy.overrides().set_supported_proof_types(&[]);

    assert!(policy.supported_proof_types(ActorsVersion::V0).unwrap().is_empty());
    assert_eq!(
        policy.supported_proof_types(ActorsVersion::V3).unwrap(),
        &BTreeSet::from([LARGE_SECTOR_PROOF])
    );
    for bundle in policy.registry().bundles() {
        assert!(bundle.sector_proof_types().is_empty());
    }
    assert_eq!(
        policy.default_sector_size(),
        Err(PolicyError::NoSupportedProofTypes(ActorsVersion::V3))
    );
}

#[test]
fn added_proof_types_reach_sector_sets_but_forced_proof_does_not() {
    let mut policy = Policy::new();
    policy
        .overrides()
        .add_supported_proof_types(&[RegisteredSealProof::StackedDrg512MiBV1]);

    for bundle in policy.registry().bundles() {
        assert!(bundle
            .sector_proof_types()
            .contains(&RegisteredSealProof::StackedDrg512MiBV1));
        assert!(!bundle.sector_proof_types().contains(&LARGE_SECTOR_PROOF));
    }
    assert_eq!(policy.default_sector_size(), Ok(SectorSize(512 * MIB)));
}

// ═══════════════════════════════════════════════════════════════
// Scalar overrides
// ═══════════════════════════════════════════════════════════════

#[test]
fn pre_commit_challenge_delay_override() {
    let mut policy = Policy::new();
    policy.overrides().set_pre_commit_challenge_delay(10).unwrap();
    for v in ActorsVersion::ALL {
        assert_eq!(policy.pre_commit_challenge_delay(v), Ok(10));
    }
    assert_eq!(policy.default_pre_commit_challenge_delay(), Ok(10));

    // Prove-commit durations are compiled-in tables and do not follow.
    assert_eq!(
        policy.max_prove_commit_duration(ActorsVersion::V3, RegisteredSealProof::StackedDrg32GiBV1),
        Ok(EPOCHS_IN_DAY + 150)
    );

    let err = policy.overrides().set_pre_commit_challenge_delay(-1).unwrap_err();
    assert!(matches!(err, PolicyError::InvalidParameter(_)));
    assert_eq!(policy.default_pre_commit_challenge_delay(), Ok(10));
}

#[test]
fn consensus_miner_min_power_override_covers_every_proof_policy() {
    let mut policy = Policy::new();
    let power = StoragePower::from(2048);
    policy.overrides().set_consensus_miner_min_power(power.clone()).unwrap();

    for bundle in policy.registry().bundles() {
        match bundle.consensus_miner_min_power() {
            MinPowerPolicy::Uniform(p) => assert_eq!(p, &power),
            MinPowerPolicy::PerProof(table) => {
                assert!(!table.is_empty());
                assert!(table.values().all(|p| p == &power));
            }
        }
    }
    assert_eq!(
        policy
            .consensus_miner_min_power(
                NetworkVersion::V10,
                RegisteredPoStProof::StackedDrgWindow64GiBV1,
            )
            .unwrap(),
        power
    );

    let err = policy
        .overrides()
        .set_consensus_miner_min_power(StoragePower::from(-1))
        .unwrap_err();
    assert!(matches!(err, PolicyError::InvalidParameter(_)));
}

#[test]
fn min_verified_deal_size_override() {
    let mut policy = Policy::new();
    policy
        .overrides()
        .set_min_verified_deal_size(StoragePower::from(256))
        .unwrap();
    for v in ActorsVersion::ALL {
        assert_eq!(policy.min_verified_deal_size(v).unwrap(), StoragePower::from(256));
    }
}

#[test]
fn overrides_compose() {
    let mut policy = Policy::new();
    {
        let mut overrides = policy.overrides();
        overrides.set_supported_proof_types(&[RegisteredSealProof::StackedDrg8MiBV1]);
        overrides.set_wpost_challenge_window(2).unwrap();
        overrides.set_pre_commit_challenge_delay(5).unwrap();
    }
    assert_proving_periods_consistent(&policy);
    assert_eq!(policy.default_sector_size(), Ok(SectorSize(8 * MIB)));
    assert_eq!(policy.wpost_proving_period(NetworkVersion::V0), Ok(96));
    assert_eq!(policy.pre_commit_challenge_delay(NetworkVersion::V11), Ok(5));
}
