//! Constant bundles: the parameter set of one actors revision.
//!
//! A bundle holds the named constants and small pure functions a revision
//! defines. The proving period is stored alongside the challenge window but
//! is only ever written together with it, so
//! `proving_period == challenge_window * period_deadlines` holds for every
//! bundle at all times.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use chainpolicy_abi::{
    ActorsVersion, ChainEpoch, CollateralBounds, DealCollateralInputs, NetworkVersion, PolicyError,
    RegisteredPoStProof, RegisteredSealProof, StoragePower,
};
use chainpolicy_actors::{v0, v2, v3};

/// Seal proofs accepted from a given network version onward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofTypeGroup {
    /// First network version this group applies to.
    pub from: NetworkVersion,
    pub types: BTreeSet<RegisteredSealProof>,
}

/// The supported seal proof sets of a revision, ordered by activation.
///
/// Most revisions have a single group. A revision that changed its accepted
/// proofs mid-lifetime carries one group per change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ProofTypeGroups(Vec<ProofTypeGroup>);

impl ProofTypeGroups {
    /// A single group effective for every network version.
    pub fn single(types: BTreeSet<RegisteredSealProof>) -> Self {
        Self(vec![ProofTypeGroup {
            from: NetworkVersion::V0,
            types,
        }])
    }

    /// Groups ordered by strictly ascending `from`. At least one is required.
    pub fn new(groups: Vec<ProofTypeGroup>) -> Result<Self, PolicyError> {
        if groups.is_empty() {
            return Err(PolicyError::InvalidParameter("proof type groups must not be empty".into()));
        }
        if groups.windows(2).any(|w| w[1].from <= w[0].from) {
            return Err(PolicyError::InvalidParameter(
                "proof type groups must be in ascending network version order".into(),
            ));
        }
        Ok(Self(groups))
    }

    /// The newest group's proof set.
    pub fn latest(&self) -> &BTreeSet<RegisteredSealProof> {
        // Non-empty by construction.
        &self.0[self.0.len() - 1].types
    }

    /// The proof set in effect at `nv`. Versions before the first group's
    /// activation fall under the first group.
    pub fn at(&self, nv: NetworkVersion) -> &BTreeSet<RegisteredSealProof> {
        let group = self.0.iter().rev().find(|g| g.from <= nv).unwrap_or(&self.0[0]);
        &group.types
    }

    pub fn groups(&self) -> &[ProofTypeGroup] {
        &self.0
    }

    pub(crate) fn latest_mut(&mut self) -> &mut BTreeSet<RegisteredSealProof> {
        let last = self.0.len() - 1;
        &mut self.0[last].types
    }

    pub(crate) fn sets_mut(&mut self) -> impl Iterator<Item = &mut BTreeSet<RegisteredSealProof>> {
        self.0.iter_mut().map(|g| &mut g.types)
    }
}

/// Minimum miner power for leader election.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MinPowerPolicy {
    /// One threshold for every proof type.
    Uniform(StoragePower),
    /// One threshold per window PoSt proof.
    PerProof(BTreeMap<RegisteredPoStProof, StoragePower>),
}

impl MinPowerPolicy {
    pub fn for_proof(&self, proof: RegisteredPoStProof) -> Result<&StoragePower, PolicyError> {
        match self {
            MinPowerPolicy::Uniform(power) => Ok(power),
            MinPowerPolicy::PerProof(table) => table
                .get(&proof)
                .ok_or_else(|| PolicyError::invalid_proof(proof, "no consensus miner min power")),
        }
    }

    fn set_all(&mut self, power: &StoragePower) {
        match self {
            MinPowerPolicy::Uniform(p) => *p = power.clone(),
            MinPowerPolicy::PerProof(table) => table.values_mut().for_each(|p| *p = power.clone()),
        }
    }
}

/// A revision's provider collateral formula.
///
/// Revisions disagree on arity: the oldest needs the network version, later
/// ones do not. `bounds` presents one signature to callers.
#[derive(Clone, Copy)]
pub enum CollateralFormula {
    NetworkVersioned(fn(&DealCollateralInputs, NetworkVersion) -> CollateralBounds),
    Standard(fn(&DealCollateralInputs) -> CollateralBounds),
}

impl CollateralFormula {
    pub fn bounds(&self, inputs: &DealCollateralInputs, nv: NetworkVersion) -> CollateralBounds {
        match self {
            CollateralFormula::NetworkVersioned(f) => f(inputs, nv),
            CollateralFormula::Standard(f) => f(inputs),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            CollateralFormula::NetworkVersioned(_) => "network-versioned",
            CollateralFormula::Standard(_) => "standard",
        }
    }
}

impl fmt::Debug for CollateralFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind())
    }
}

/// The parameter set of one actors revision.
#[derive(Debug, Clone)]
pub struct ConstantBundle {
    version: ActorsVersion,
    supported_proof_types: ProofTypeGroups,
    sector_proof_types: BTreeSet<RegisteredSealProof>,
    pre_commit_challenge_delay: ChainEpoch,
    consensus_miner_min_power: MinPowerPolicy,
    min_verified_deal_size: StoragePower,
    wpost_challenge_window: ChainEpoch,
    wpost_period_deadlines: u64,
    wpost_proving_period: ChainEpoch,
    max_prove_commit_duration: BTreeMap<RegisteredSealProof, ChainEpoch>,
    window_post_partition_sectors: BTreeMap<RegisteredPoStProof, u64>,
    addressed_sectors_max: u64,
    max_sector_expiration_extension: ChainEpoch,
    collateral: CollateralFormula,
}

impl ConstantBundle {
    /// The compiled-in defaults of `version`'s actor suite.
    pub fn builtin(version: ActorsVersion) -> Self {
        match version {
            ActorsVersion::V0 => Self::actors_v0(),
            ActorsVersion::V2 => Self::actors_v2(),
            ActorsVersion::V3 => Self::actors_v3(),
        }
    }

    fn actors_v0() -> Self {
        Self {
            version: ActorsVersion::V0,
            supported_proof_types: ProofTypeGroups::single(v0::miner::supported_proof_types()),
            sector_proof_types: v0::miner::supported_proof_types(),
            pre_commit_challenge_delay: v0::miner::PRE_COMMIT_CHALLENGE_DELAY,
            consensus_miner_min_power: MinPowerPolicy::Uniform(
                v0::power::consensus_miner_min_power(),
            ),
            min_verified_deal_size: v0::verifreg::min_verified_deal_size(),
            wpost_challenge_window: v0::miner::WPOST_CHALLENGE_WINDOW,
            wpost_period_deadlines: v0::miner::WPOST_PERIOD_DEADLINES,
            wpost_proving_period: v0::miner::WPOST_PROVING_PERIOD,
            max_prove_commit_duration: v0::miner::max_seal_duration(),
            window_post_partition_sectors: v0::miner::window_post_partition_sectors(),
            addressed_sectors_max: v0::miner::ADDRESSED_SECTORS_MAX,
            max_sector_expiration_extension: v0::miner::MAX_SECTOR_EXPIRATION_EXTENSION,
            collateral: CollateralFormula::NetworkVersioned(
                v0::market::deal_provider_collateral_bounds,
            ),
        }
    }

    fn actors_v2() -> Self {
        // v2 keys proof policies by seal proof; V1 and V1_1 seal proofs of a
        // size share a window PoSt proof and identical policy values.
        let by_post: BTreeMap<RegisteredPoStProof, _> = v2::builtin::seal_proof_policies()
            .into_iter()
            .filter_map(|(seal, policy)| seal.window_post_proof().ok().map(|post| (post, policy)))
            .collect();

        Self {
            version: ActorsVersion::V2,
            supported_proof_types: ProofTypeGroups::single(v2::miner::supported_proof_types()),
            sector_proof_types: v2::miner::supported_proof_types(),
            pre_commit_challenge_delay: v2::miner::PRE_COMMIT_CHALLENGE_DELAY,
            consensus_miner_min_power: MinPowerPolicy::PerProof(
                by_post
                    .iter()
                    .map(|(post, policy)| (*post, policy.consensus_miner_min_power.clone()))
                    .collect(),
            ),
            min_verified_deal_size: v2::verifreg::min_verified_deal_size(),
            wpost_challenge_window: v2::miner::WPOST_CHALLENGE_WINDOW,
            wpost_period_deadlines: v2::miner::WPOST_PERIOD_DEADLINES,
            wpost_proving_period: v2::miner::WPOST_PROVING_PERIOD,
            max_prove_commit_duration: v2::miner::max_prove_commit_duration(),
            window_post_partition_sectors: by_post
                .iter()
                .map(|(post, policy)| (*post, policy.window_post_partition_sectors))
                .collect(),
            addressed_sectors_max: v2::miner::ADDRESSED_SECTORS_MAX,
            max_sector_expiration_extension: v2::miner::MAX_SECTOR_EXPIRATION_EXTENSION,
            collateral: CollateralFormula::Standard(v2::market::deal_provider_collateral_bounds),
        }
    }

    fn actors_v3() -> Self {
        let policies = v3::builtin::post_proof_policies();

        Self {
            version: ActorsVersion::V3,
            supported_proof_types: ProofTypeGroups(vec![
                ProofTypeGroup {
                    from: NetworkVersion::V0,
                    types: v3::miner::pre_commit_seal_proof_types_v0(),
                },
                ProofTypeGroup {
                    from: v3::miner::PRE_COMMIT_SEAL_PROOF_TYPES_V7_FROM,
                    types: v3::miner::pre_commit_seal_proof_types_v7(),
                },
            ]),
            sector_proof_types: v3::miner::supported_proof_types(),
            pre_commit_challenge_delay: v3::miner::PRE_COMMIT_CHALLENGE_DELAY,
            consensus_miner_min_power: MinPowerPolicy::PerProof(
                policies
                    .iter()
                    .map(|(post, policy)| (*post, policy.consensus_miner_min_power.clone()))
                    .collect(),
            ),
            min_verified_deal_size: v3::verifreg::min_verified_deal_size(),
            wpost_challenge_window: v3::miner::WPOST_CHALLENGE_WINDOW,
            wpost_period_deadlines: v3::miner::WPOST_PERIOD_DEADLINES,
            wpost_proving_period: v3::miner::WPOST_PROVING_PERIOD,
            max_prove_commit_duration: v3::miner::max_prove_commit_duration(),
            window_post_partition_sectors: policies
                .iter()
                .map(|(post, policy)| (*post, policy.window_post_partition_sectors))
                .collect(),
            addressed_sectors_max: v3::miner::ADDRESSED_SECTORS_MAX,
            max_sector_expiration_extension: v3::miner::MAX_SECTOR_EXPIRATION_EXTENSION,
            collateral: CollateralFormula::Standard(v3::market::deal_provider_collateral_bounds),
        }
    }

    /// Replace the supported proof groups. For assembling custom registries.
    ///
    /// The sector proof set becomes the newest group's proofs.
    pub fn with_supported_proof_types(mut self, groups: ProofTypeGroups) -> Self {
        self.sector_proof_types = groups.latest().clone();
        self.supported_proof_types = groups;
        self
    }

    /// Replace the collateral formula. For assembling custom registries.
    pub fn with_collateral_formula(mut self, formula: CollateralFormula) -> Self {
        self.collateral = formula;
        self
    }

    /// Check the cross-field invariants.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.wpost_challenge_window <= 0 {
            return Err(PolicyError::InvalidParameter(format!(
                "actors {}: challenge window must be positive, got {}",
                self.version, self.wpost_challenge_window
            )));
        }
        if self.wpost_period_deadlines == 0 {
            return Err(PolicyError::InvalidParameter(format!(
                "actors {}: period deadlines must be positive",
                self.version
            )));
        }
        if self.proving_period_for(self.wpost_challenge_window) != Some(self.wpost_proving_period) {
            return Err(PolicyError::InvalidParameter(format!(
                "actors {}: proving period {} is not {} challenge windows of {}",
                self.version,
                self.wpost_proving_period,
                self.wpost_period_deadlines,
                self.wpost_challenge_window
            )));
        }
        Ok(())
    }

    pub fn version(&self) -> ActorsVersion {
        self.version
    }

    pub fn supported_proof_types(&self) -> &ProofTypeGroups {
        &self.supported_proof_types
    }

    /// Seal proofs whose sectors this revision holds. Unlike the pre-commit
    /// groups, never carries the force-enabled large-sector proof.
    pub fn sector_proof_types(&self) -> &BTreeSet<RegisteredSealProof> {
        &self.sector_proof_types
    }

    pub fn pre_commit_challenge_delay(&self) -> ChainEpoch {
        self.pre_commit_challenge_delay
    }

    pub fn consensus_miner_min_power(&self) -> &MinPowerPolicy {
        &self.consensus_miner_min_power
    }

    pub fn min_verified_deal_size(&self) -> &StoragePower {
        &self.min_verified_deal_size
    }

    pub fn wpost_challenge_window(&self) -> ChainEpoch {
        self.wpost_challenge_window
    }

    pub fn wpost_period_deadlines(&self) -> u64 {
        self.wpost_period_deadlines
    }

    pub fn wpost_proving_period(&self) -> ChainEpoch {
        self.wpost_proving_period
    }

    pub fn max_prove_commit_duration(
        &self,
        proof: RegisteredSealProof,
    ) -> Result<ChainEpoch, PolicyError> {
        self.max_prove_commit_duration
            .get(&proof)
            .copied()
            .ok_or_else(|| {
                PolicyError::invalid_proof(
                    proof,
                    format!("no max prove-commit duration in actors {}", self.version),
                )
            })
    }

    pub fn window_post_partition_sectors(
        &self,
        proof: RegisteredPoStProof,
    ) -> Result<u64, PolicyError> {
        self.window_post_partition_sectors
            .get(&proof)
            .copied()
            .ok_or_else(|| {
                PolicyError::invalid_proof(
                    proof,
                    format!("no window PoSt partition size in actors {}", self.version),
                )
            })
    }

    pub fn addressed_sectors_max(&self) -> u64 {
        self.addressed_sectors_max
    }

    pub fn max_sector_expiration_extension(&self) -> ChainEpoch {
        self.max_sector_expiration_extension
    }

    pub fn collateral_formula(&self) -> CollateralFormula {
        self.collateral
    }

    pub fn snapshot(&self) -> BundleSnapshot {
        BundleSnapshot {
            version: self.version,
            supported_proof_types: self.supported_proof_types.groups().to_vec(),
            sector_proof_types: self.sector_proof_types.clone(),
            pre_commit_challenge_delay: self.pre_commit_challenge_delay,
            consensus_miner_min_power: self.consensus_miner_min_power.clone(),
            min_verified_deal_size: self.min_verified_deal_size.clone(),
            wpost_challenge_window: self.wpost_challenge_window,
            wpost_period_deadlines: self.wpost_period_deadlines,
            wpost_proving_period: self.wpost_proving_period,
            max_prove_commit_duration: self.max_prove_commit_duration.clone(),
            window_post_partition_sectors: self.window_post_partition_sectors.clone(),
            addressed_sectors_max: self.addressed_sectors_max,
            max_sector_expiration_extension: self.max_sector_expiration_extension,
            collateral_formula: self.collateral.kind().to_string(),
        }
    }

    // -- Mutation (reached only through the registry's uniform updates) --

    pub(crate) fn proof_types_mut(&mut self) -> &mut ProofTypeGroups {
        &mut self.supported_proof_types
    }

    pub(crate) fn sector_proof_types_mut(&mut self) -> &mut BTreeSet<RegisteredSealProof> {
        &mut self.sector_proof_types
    }

    pub(crate) fn set_pre_commit_challenge_delay(&mut self, delay: ChainEpoch) {
        self.pre_commit_challenge_delay = delay;
    }

    pub(crate) fn set_consensus_miner_min_power(&mut self, power: &StoragePower) {
        self.consensus_miner_min_power.set_all(power);
    }

    pub(crate) fn set_min_verified_deal_size(&mut self, size: &StoragePower) {
        self.min_verified_deal_size = size.clone();
    }

    /// `window * period_deadlines`, or `None` if it does not fit an epoch.
    pub fn proving_period_for(&self, window: ChainEpoch) -> Option<ChainEpoch> {
        let deadlines = ChainEpoch::try_from(self.wpost_period_deadlines).ok()?;
        window.checked_mul(deadlines)
    }

    /// Set the challenge window and rescale the proving period to match.
    ///
    /// Leaves the bundle untouched when the proving period would overflow.
    pub(crate) fn set_wpost_challenge_window(
        &mut self,
        window: ChainEpoch,
    ) -> Result<(), PolicyError> {
        let period = self.proving_period_for(window).ok_or_else(|| {
            PolicyError::InvalidParameter(format!(
                "actors {}: challenge window {} overflows the proving period",
                self.version, window
            ))
        })?;
        self.wpost_challenge_window = window;
        self.wpost_proving_period = period;
        Ok(())
    }
}

/// Serializable view of a bundle's current values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleSnapshot {
    pub version: ActorsVersion,
    pub supported_proof_types: Vec<ProofTypeGroup>,
    pub sector_proof_types: BTreeSet<RegisteredSealProof>,
    pub pre_commit_challenge_delay: ChainEpoch,
    pub consensus_miner_min_power: MinPowerPolicy,
    pub min_verified_deal_size: StoragePower,
    pub wpost_challenge_window: ChainEpoch,
    pub wpost_period_deadlines: u64,
    pub wpost_proving_period: ChainEpoch,
    pub max_prove_commit_duration: BTreeMap<RegisteredSealProof, ChainEpoch>,
    pub window_post_partition_sectors: BTreeMap<RegisteredPoStProof, u64>,
    pub addressed_sectors_max: u64,
    pub max_sector_expiration_extension: ChainEpoch,
    pub collateral_formula: String,
}
