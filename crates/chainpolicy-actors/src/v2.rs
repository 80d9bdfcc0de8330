//! Actors v2 (network versions 4 through 9).
//!
//! Proof parameters move into per-seal-proof policies, and the collateral
//! formula no longer takes the network version.

pub mod builtin {
    use std::collections::BTreeMap;

    use chainpolicy_abi::RegisteredSealProof;

    use crate::builtin::{
        policy_2kib, policy_32gib, policy_512mib, policy_64gib, policy_8mib, ProofPolicy,
    };

    pub fn seal_proof_policies() -> BTreeMap<RegisteredSealProof, ProofPolicy> {
        use RegisteredSealProof::*;
        BTreeMap::from([
            (StackedDrg2KiBV1, policy_2kib()),
            (StackedDrg8MiBV1, policy_8mib()),
            (StackedDrg512MiBV1, policy_512mib()),
            (StackedDrg32GiBV1, policy_32gib()),
            (StackedDrg64GiBV1, policy_64gib()),
            (StackedDrg2KiBV1_1, policy_2kib()),
            (StackedDrg8MiBV1_1, policy_8mib()),
            (StackedDrg512MiBV1_1, policy_512mib()),
            (StackedDrg32GiBV1_1, policy_32gib()),
            (StackedDrg64GiBV1_1, policy_64gib()),
        ])
    }
}

pub mod miner {
    use std::collections::{BTreeMap, BTreeSet};

    use chainpolicy_abi::{ChainEpoch, RegisteredSealProof, EPOCHS_IN_DAY, EPOCH_DURATION_SECONDS};

    pub const PRE_COMMIT_CHALLENGE_DELAY: ChainEpoch = 150;

    pub const WPOST_CHALLENGE_WINDOW: ChainEpoch = 30 * 60 / EPOCH_DURATION_SECONDS;

    pub const WPOST_PERIOD_DEADLINES: u64 = 48;

    pub const WPOST_PROVING_PERIOD: ChainEpoch =
        WPOST_CHALLENGE_WINDOW * WPOST_PERIOD_DEADLINES as ChainEpoch;

    pub const MAX_SECTOR_EXPIRATION_EXTENSION: ChainEpoch = 540 * EPOCHS_IN_DAY;

    pub const ADDRESSED_SECTORS_MAX: u64 = 10_000;

    pub fn supported_proof_types() -> BTreeSet<RegisteredSealProof> {
        BTreeSet::from([
            RegisteredSealProof::StackedDrg32GiBV1,
            RegisteredSealProof::StackedDrg64GiBV1,
        ])
    }

    /// One day plus the challenge delay, for every V1 and V1_1 seal proof.
    pub fn max_prove_commit_duration() -> BTreeMap<RegisteredSealProof, ChainEpoch> {
        super::builtin::seal_proof_policies()
            .into_keys()
            .map(|p| (p, EPOCHS_IN_DAY + PRE_COMMIT_CHALLENGE_DELAY))
            .collect()
    }
}

pub mod verifreg {
    use chainpolicy_abi::{StoragePower, MIB};

    pub fn min_verified_deal_size() -> StoragePower {
        StoragePower::from(MIB)
    }
}

pub mod market {
    use chainpolicy_abi::{CollateralBounds, DealCollateralInputs};

    /// Share of normalized circulating supply covered by provider collateral.
    pub const PROVIDER_COLLATERAL_SUPPLY_TARGET_NUM: u64 = 1;
    pub const PROVIDER_COLLATERAL_SUPPLY_TARGET_DENOM: u64 = 100;

    pub fn deal_provider_collateral_bounds(inputs: &DealCollateralInputs) -> CollateralBounds {
        crate::market::provider_collateral_bounds(
            PROVIDER_COLLATERAL_SUPPLY_TARGET_NUM,
            PROVIDER_COLLATERAL_SUPPLY_TARGET_DENOM,
            inputs,
        )
    }
}
