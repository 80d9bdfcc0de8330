//! The policy accessor facade.
//!
//! `Policy` answers every parameter query for a network version or an
//! explicit actors version by resolving the revision and reading that
//! revision's bundle. Queries take `&self` and never mutate; the test-only
//! overrides need `&mut self` (see [`Policy::overrides`]).

use std::collections::BTreeSet;

use chainpolicy_abi::{
    ActorsVersion, ChainEpoch, CollateralBounds, DealCollateralInputs, NetworkVersion, PolicyError,
    RegisteredPoStProof, RegisteredSealProof, SectorSize, StoragePower, VersionResolver,
    CHAIN_FINALITY, WINNING_POST_LOOKBACK_BREAKPOINT, WINNING_POST_SHORT_LOOKBACK,
};
use chainpolicy_actors::VersionTable;

use crate::bundle::{BundleSnapshot, ConstantBundle};
use crate::overrides::PolicyOverrides;
use crate::registry::RevisionRegistry;
use crate::resolver::{resolve, VersionRef};

/// Protocol parameters across every actors revision.
///
/// Build one at startup, apply any overrides, then share it read-only
/// (`Policy` is `Send + Sync`).
pub struct Policy {
    registry: RevisionRegistry,
    resolver: Box<dyn VersionResolver>,
}

impl Policy {
    /// Compiled-in defaults with the mainnet version table.
    pub fn new() -> Self {
        Self::from_parts(RevisionRegistry::builtin(), VersionTable::mainnet())
    }

    /// Compiled-in defaults with a caller-supplied version mapping.
    pub fn with_resolver(resolver: impl VersionResolver + 'static) -> Self {
        Self::from_parts(RevisionRegistry::builtin(), resolver)
    }

    pub fn from_parts(
        registry: RevisionRegistry,
        resolver: impl VersionResolver + 'static,
    ) -> Self {
        Self {
            registry,
            resolver: Box::new(resolver),
        }
    }

    pub fn registry(&self) -> &RevisionRegistry {
        &self.registry
    }

    /// Test-only parameter overrides.
    ///
    /// Overrides rewrite every revision's bundle. They must all be applied
    /// before the policy is shared with readers; the `&mut` borrow enforces
    /// this, and no internal locking is done.
    pub fn overrides(&mut self) -> PolicyOverrides<'_> {
        PolicyOverrides::new(&mut self.registry)
    }

    pub fn actors_version(&self, at: impl Into<VersionRef>) -> Result<ActorsVersion, PolicyError> {
        resolve(self.resolver.as_ref(), at.into())
    }

    /// The bundle of the revision selected by `at`.
    pub fn bundle(&self, at: impl Into<VersionRef>) -> Result<&ConstantBundle, PolicyError> {
        let version = self.actors_version(at)?;
        self.registry.get(version)
    }

    /// Seal proofs accepted by mining.
    ///
    /// Given a network version, returns the proof group in effect at that
    /// version; given an actors version, the revision's newest group.
    pub fn supported_proof_types(
        &self,
        at: impl Into<VersionRef>,
    ) -> Result<&BTreeSet<RegisteredSealProof>, PolicyError> {
        let at = at.into();
        let groups = self.bundle(at)?.supported_proof_types();
        Ok(match at.network_version() {
            Some(nv) => groups.at(nv),
            None => groups.latest(),
        })
    }

    pub fn is_seal_proof_supported(
        &self,
        at: impl Into<VersionRef>,
        proof: RegisteredSealProof,
    ) -> Result<bool, PolicyError> {
        Ok(self.supported_proof_types(at)?.contains(&proof))
    }

    pub fn pre_commit_challenge_delay(
        &self,
        at: impl Into<VersionRef>,
    ) -> Result<ChainEpoch, PolicyError> {
        Ok(self.bundle(at)?.pre_commit_challenge_delay())
    }

    /// The genesis revision's pre-commit challenge delay.
    ///
    /// Overrides keep every revision equal, so callers without a version at
    /// hand may use this.
    pub fn default_pre_commit_challenge_delay(&self) -> Result<ChainEpoch, PolicyError> {
        self.pre_commit_challenge_delay(ActorsVersion::V0)
    }

    pub fn consensus_miner_min_power(
        &self,
        at: impl Into<VersionRef>,
        proof: RegisteredPoStProof,
    ) -> Result<StoragePower, PolicyError> {
        self.bundle(at)?.consensus_miner_min_power().for_proof(proof).cloned()
    }

    pub fn min_verified_deal_size(
        &self,
        at: impl Into<VersionRef>,
    ) -> Result<StoragePower, PolicyError> {
        Ok(self.bundle(at)?.min_verified_deal_size().clone())
    }

    pub fn wpost_challenge_window(
        &self,
        at: impl Into<VersionRef>,
    ) -> Result<ChainEpoch, PolicyError> {
        Ok(self.bundle(at)?.wpost_challenge_window())
    }

    pub fn wpost_proving_period(
        &self,
        at: impl Into<VersionRef>,
    ) -> Result<ChainEpoch, PolicyError> {
        Ok(self.bundle(at)?.wpost_proving_period())
    }

    pub fn wpost_period_deadlines(&self, at: impl Into<VersionRef>) -> Result<u64, PolicyError> {
        Ok(self.bundle(at)?.wpost_period_deadlines())
    }

    pub fn max_prove_commit_duration(
        &self,
        at: impl Into<VersionRef>,
        proof: RegisteredSealProof,
    ) -> Result<ChainEpoch, PolicyError> {
        self.bundle(at)?.max_prove_commit_duration(proof)
    }

    /// Provider collateral bounds for a deal under network version `nv`.
    pub fn deal_provider_collateral_bounds(
        &self,
        nv: NetworkVersion,
        inputs: &DealCollateralInputs,
    ) -> Result<CollateralBounds, PolicyError> {
        let formula = self.bundle(nv)?.collateral_formula();
        Ok(formula.bounds(inputs, nv))
    }

    /// How far back the winning PoSt sector set is sampled.
    ///
    /// 10 epochs up to and including network version 3, chain finality after.
    pub fn winning_post_sector_set_lookback(&self, nv: NetworkVersion) -> ChainEpoch {
        if nv <= WINNING_POST_LOOKBACK_BREAKPOINT {
            return WINNING_POST_SHORT_LOOKBACK;
        }
        CHAIN_FINALITY
    }

    /// Maximum sector expiration extension, taken from the genesis revision.
    pub fn max_sector_expiration_extension(&self) -> Result<ChainEpoch, PolicyError> {
        Ok(self.registry.get(ActorsVersion::V0)?.max_sector_expiration_extension())
    }

    /// Partitions a single window PoSt message can address under the newest revision.
    pub fn max_post_partitions(&self, proof: RegisteredPoStProof) -> Result<u64, PolicyError> {
        self.max_post_partitions_at(self.registry.latest_version(), proof)
    }

    /// `addressed_sectors_max / sectors_per_partition(proof)`, rounded down.
    pub fn max_post_partitions_at(
        &self,
        at: impl Into<VersionRef>,
        proof: RegisteredPoStProof,
    ) -> Result<u64, PolicyError> {
        let bundle = self.bundle(at)?;
        let sectors_per_partition = bundle.window_post_partition_sectors(proof)?;
        Ok(bundle.addressed_sectors_max() / sectors_per_partition)
    }

    /// Smallest sector size among the newest revision's sector proofs.
    pub fn default_sector_size(&self) -> Result<SectorSize, PolicyError> {
        let latest = self.registry.latest()?;
        latest
            .sector_proof_types()
            .iter()
            .map(|p| p.sector_size())
            .min()
            .ok_or(PolicyError::NoSupportedProofTypes(latest.version()))
    }

    pub fn snapshot(&self, version: ActorsVersion) -> Result<BundleSnapshot, PolicyError> {
        Ok(self.registry.get(version)?.snapshot())
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Policy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Policy")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
