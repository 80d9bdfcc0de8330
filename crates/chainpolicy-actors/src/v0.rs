//! Actors v0: the genesis actor suite (network versions 0 through 3).

pub mod miner {
    use std::collections::{BTreeMap, BTreeSet};

    use chainpolicy_abi::{
        ChainEpoch, RegisteredPoStProof, RegisteredSealProof, EPOCHS_IN_DAY, EPOCH_DURATION_SECONDS,
    };

    /// Epochs between pre-commit and the seal randomness challenge.
    pub const PRE_COMMIT_CHALLENGE_DELAY: ChainEpoch = 150;

    /// Duration of one window PoSt deadline (30 minutes).
    pub const WPOST_CHALLENGE_WINDOW: ChainEpoch = 30 * 60 / EPOCH_DURATION_SECONDS;

    /// Deadlines per proving period.
    pub const WPOST_PERIOD_DEADLINES: u64 = 48;

    pub const WPOST_PROVING_PERIOD: ChainEpoch =
        WPOST_CHALLENGE_WINDOW * WPOST_PERIOD_DEADLINES as ChainEpoch;

    pub const MAX_SECTOR_EXPIRATION_EXTENSION: ChainEpoch = 540 * EPOCHS_IN_DAY;

    /// Maximum number of sectors addressable in one partition-level message.
    pub const ADDRESSED_SECTORS_MAX: u64 = 10_000;

    const MAX_SEAL_DURATION: ChainEpoch = 10_000;

    pub fn supported_proof_types() -> BTreeSet<RegisteredSealProof> {
        BTreeSet::from([
            RegisteredSealProof::StackedDrg32GiBV1,
            RegisteredSealProof::StackedDrg64GiBV1,
        ])
    }

    /// Maximum epochs between pre-commit and prove-commit, per seal proof.
    pub fn max_seal_duration() -> BTreeMap<RegisteredSealProof, ChainEpoch> {
        [
            RegisteredSealProof::StackedDrg2KiBV1,
            RegisteredSealProof::StackedDrg8MiBV1,
            RegisteredSealProof::StackedDrg512MiBV1,
            RegisteredSealProof::StackedDrg32GiBV1,
            RegisteredSealProof::StackedDrg64GiBV1,
        ]
        .into_iter()
        .map(|p| (p, MAX_SEAL_DURATION))
        .collect()
    }

    /// Window PoSt partition sizes. v0 keys these by seal proof; they are
    /// re-keyed by the corresponding window PoSt proof here.
    pub fn window_post_partition_sectors() -> BTreeMap<RegisteredPoStProof, u64> {
        BTreeMap::from([
            (RegisteredPoStProof::StackedDrgWindow2KiBV1, 2),
            (RegisteredPoStProof::StackedDrgWindow8MiBV1, 2),
            (RegisteredPoStProof::StackedDrgWindow512MiBV1, 2),
            (RegisteredPoStProof::StackedDrgWindow32GiBV1, 2349),
            (RegisteredPoStProof::StackedDrgWindow64GiBV1, 2300),
        ])
    }
}

pub mod power {
    use chainpolicy_abi::{StoragePower, TIB};

    /// Minimum power of an individual miner to meet the threshold for leader
    /// election. A single value for every proof type.
    pub fn consensus_miner_min_power() -> StoragePower {
        StoragePower::from(10 * TIB)
    }
}

pub mod verifreg {
    use chainpolicy_abi::{StoragePower, MIB};

    pub fn min_verified_deal_size() -> StoragePower {
        StoragePower::from(MIB)
    }
}

pub mod market {
    use chainpolicy_abi::{CollateralBounds, DealCollateralInputs, NetworkVersion};

    /// Supply target numerator before network version 1.
    pub const PROV_COLLATERAL_PERCENT_SUPPLY_NUM_V0: u64 = 0;
    /// Supply target numerator from network version 1.
    pub const PROV_COLLATERAL_PERCENT_SUPPLY_NUM_V1: u64 = 5;
    pub const PROV_COLLATERAL_PERCENT_SUPPLY_DENOM: u64 = 100;

    /// v0 is the only revision whose formula depends on the network version.
    pub fn deal_provider_collateral_bounds(
        inputs: &DealCollateralInputs,
        nv: NetworkVersion,
    ) -> CollateralBounds {
        let num = if nv >= NetworkVersion::V1 {
            PROV_COLLATERAL_PERCENT_SUPPLY_NUM_V1
        } else {
            PROV_COLLATERAL_PERCENT_SUPPLY_NUM_V0
        };
        crate::market::provider_collateral_bounds(num, PROV_COLLATERAL_PERCENT_SUPPLY_DENOM, inputs)
    }
}
