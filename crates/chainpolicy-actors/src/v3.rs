//! Actors v3 (network versions 10 and 11).
//!
//! Proof policies are keyed by PoSt proof, and the set of seal proofs
//! accepted at pre-commit depends on the network version: the V1_1 seal
//! proofs are only accepted from network version 7.

pub mod builtin {
    use std::collections::BTreeMap;

    use chainpolicy_abi::{PolicyError, RegisteredPoStProof};

    use crate::builtin::{
        policy_2kib, policy_32gib, policy_512mib, policy_64gib, policy_8mib, ProofPolicy,
    };

    pub fn post_proof_policies() -> BTreeMap<RegisteredPoStProof, ProofPolicy> {
        use RegisteredPoStProof::*;
        BTreeMap::from([
            (StackedDrgWindow2KiBV1, policy_2kib()),
            (StackedDrgWindow8MiBV1, policy_8mib()),
            (StackedDrgWindow512MiBV1, policy_512mib()),
            (StackedDrgWindow32GiBV1, policy_32gib()),
            (StackedDrgWindow64GiBV1, policy_64gib()),
        ])
    }

    /// Sectors per window PoSt partition for `proof`.
    pub fn post_proof_window_post_partition_sectors(
        proof: RegisteredPoStProof,
    ) -> Result<u64, PolicyError> {
        post_proof_policies()
            .get(&proof)
            .map(|p| p.window_post_partition_sectors)
            .ok_or_else(|| {
                PolicyError::invalid_proof(proof, "no window PoSt partition size for proof type")
            })
    }
}

pub mod miner {
    use std::collections::{BTreeMap, BTreeSet};

    use chainpolicy_abi::{
        ChainEpoch, NetworkVersion, RegisteredSealProof, EPOCHS_IN_DAY, EPOCH_DURATION_SECONDS,
    };

    pub const PRE_COMMIT_CHALLENGE_DELAY: ChainEpoch = 150;

    pub const WPOST_CHALLENGE_WINDOW: ChainEpoch = 30 * 60 / EPOCH_DURATION_SECONDS;

    pub const WPOST_PERIOD_DEADLINES: u64 = 48;

    pub const WPOST_PROVING_PERIOD: ChainEpoch =
        WPOST_CHALLENGE_WINDOW * WPOST_PERIOD_DEADLINES as ChainEpoch;

    pub const MAX_SECTOR_EXPIRATION_EXTENSION: ChainEpoch = 540 * EPOCHS_IN_DAY;

    pub const ADDRESSED_SECTORS_MAX: u64 = 10_000;

    /// First network version accepting `pre_commit_seal_proof_types_v7`.
    pub const PRE_COMMIT_SEAL_PROOF_TYPES_V7_FROM: NetworkVersion = NetworkVersion::V7;

    /// Seal proofs whose sectors the revision holds, independent of which of
    /// them pre-commit currently accepts.
    pub fn supported_proof_types() -> BTreeSet<RegisteredSealProof> {
        pre_commit_seal_proof_types_v7()
    }

    /// Seal proofs accepted at pre-commit before network version 7.
    pub fn pre_commit_seal_proof_types_v0() -> BTreeSet<RegisteredSealProof> {
        BTreeSet::from([
            RegisteredSealProof::StackedDrg32GiBV1,
            RegisteredSealProof::StackedDrg64GiBV1,
        ])
    }

    /// Seal proofs accepted at pre-commit from network version 7.
    pub fn pre_commit_seal_proof_types_v7() -> BTreeSet<RegisteredSealProof> {
        BTreeSet::from([
            RegisteredSealProof::StackedDrg32GiBV1,
            RegisteredSealProof::StackedDrg64GiBV1,
            RegisteredSealProof::StackedDrg32GiBV1_1,
            RegisteredSealProof::StackedDrg64GiBV1_1,
        ])
    }

    pub fn max_prove_commit_duration() -> BTreeMap<RegisteredSealProof, ChainEpoch> {
        use RegisteredSealProof::*;
        [
            StackedDrg2KiBV1,
            StackedDrg8MiBV1,
            StackedDrg512MiBV1,
            StackedDrg32GiBV1,
            StackedDrg64GiBV1,
            StackedDrg2KiBV1_1,
            StackedDrg8MiBV1_1,
            StackedDrg512MiBV1_1,
            StackedDrg32GiBV1_1,
            StackedDrg64GiBV1_1,
        ]
        .into_iter()
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
