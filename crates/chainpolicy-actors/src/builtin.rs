//! Proof policy records shared by the revisions that key parameters per proof.

use chainpolicy_abi::{StoragePower, GIB, MIB, TIB};

/// Per-proof parameters: window PoSt partition size and minimum miner power.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofPolicy {
    /// Sectors per window PoSt partition.
    pub window_post_partition_sectors: u64,
    /// Minimum power of an individual miner to meet the threshold for leader election.
    pub consensus_miner_min_power: StoragePower,
}

impl ProofPolicy {
    pub fn new(window_post_partition_sectors: u64, consensus_miner_min_power: u64) -> Self {
        Self {
            window_post_partition_sectors,
            consensus_miner_min_power: StoragePower::from(consensus_miner_min_power),
        }
    }
}

// Partition sizes and power thresholds by sector size, identical across the
// revisions that carry per-proof policies.
pub(crate) fn policy_2kib() -> ProofPolicy {
    ProofPolicy::new(2, 0)
}

pub(crate) fn policy_8mib() -> ProofPolicy {
    ProofPolicy::new(2, 16 * MIB)
}

pub(crate) fn policy_512mib() -> ProofPolicy {
    ProofPolicy::new(2, GIB)
}

pub(crate) fn policy_32gib() -> ProofPolicy {
    ProofPolicy::new(2349, 10 * TIB)
}

pub(crate) fn policy_64gib() -> ProofPolicy {
    ProofPolicy::new(2300, 20 * TIB)
}
