//! Test-only parameter overrides.
//!
//! Every setter writes the same value into every registered revision in one
//! call. They exist so test harnesses and development networks can simulate
//! alternate economic parameters; node code should never reach them. Obtain
//! one with [`crate::Policy::overrides`].

use chainpolicy_abi::{ChainEpoch, PolicyError, RegisteredSealProof, StoragePower};
use num_traits::Signed;

use crate::registry::RevisionRegistry;

/// Seal proof force-enabled in the newest revision's newest proof group on
/// every supported-proof override, whatever set the caller asked for.
pub const LARGE_SECTOR_PROOF: RegisteredSealProof = RegisteredSealProof::StackedDrg8GiBV1;

/// Exclusive handle for rewriting parameters across all revisions.
pub struct PolicyOverrides<'a> {
    registry: &'a mut RevisionRegistry,
}

impl<'a> PolicyOverrides<'a> {
    pub(crate) fn new(registry: &'a mut RevisionRegistry) -> Self {
        Self { registry }
    }

    /// Replace the supported seal proofs of every revision with `types`.
    ///
    /// [`LARGE_SECTOR_PROOF`] is then added to the newest revision, as with
    /// [`Self::add_supported_proof_types`].
    pub fn set_supported_proof_types(&mut self, types: &[RegisteredSealProof]) {
        self.registry.update_all(|bundle| {
            bundle.proof_types_mut().sets_mut().for_each(|set| set.clear());
            bundle.sector_proof_types_mut().clear();
        });
        self.add_supported_proof_types(types);
    }

    /// Add `types` to the supported seal proofs of every revision, then
    /// force-enable [`LARGE_SECTOR_PROOF`] in the newest revision.
    ///
    /// The forced proof is accepted at pre-commit only. It never enters a
    /// revision's sector proof set, so it cannot become the default sector size.
    pub fn add_supported_proof_types(&mut self, types: &[RegisteredSealProof]) {
        let revisions = self.registry.update_all(|bundle| {
            for set in bundle.proof_types_mut().sets_mut() {
                set.extend(types.iter().copied());
            }
            bundle.sector_proof_types_mut().extend(types.iter().copied());
        });
        // The registry is never empty, so the newest bundle always exists.
        if let Ok(latest) = self.registry.latest_mut() {
            latest.proof_types_mut().latest_mut().insert(LARGE_SECTOR_PROOF);
        }
        tracing::info!(
            types = ?types,
            forced = %LARGE_SECTOR_PROOF,
            revisions,
            "Supported proof types override applied"
        );
    }

    pub fn set_pre_commit_challenge_delay(&mut self, delay: ChainEpoch) -> Result<(), PolicyError> {
        if delay < 0 {
            return Err(PolicyError::InvalidParameter(format!(
                "pre-commit challenge delay must not be negative, got {}",
                delay
            )));
        }
        let revisions = self
            .registry
            .update_all(|bundle| bundle.set_pre_commit_challenge_delay(delay));
        tracing::info!(delay, revisions, "Pre-commit challenge delay override applied");
        Ok(())
    }

    /// Set the minimum miner power for leader election, for every proof type
    /// in every revision.
    pub fn set_consensus_miner_min_power(
        &mut self,
        power: StoragePower,
    ) -> Result<(), PolicyError> {
        if power.is_negative() {
            return Err(PolicyError::InvalidParameter(format!(
                "consensus miner min power must not be negative, got {}",
                power
            )));
        }
        let revisions = self
            .registry
            .update_all(|bundle| bundle.set_consensus_miner_min_power(&power));
        tracing::info!(power = %power, revisions, "Consensus miner min power override applied");
        Ok(())
    }

    pub fn set_min_verified_deal_size(&mut self, size: StoragePower) -> Result<(), PolicyError> {
        if size.is_negative() {
            return Err(PolicyError::InvalidParameter(format!(
                "min verified deal size must not be negative, got {}",
                size
            )));
        }
        let revisions = self.registry.update_all(|bundle| bundle.set_min_verified_deal_size(&size));
        tracing::info!(size = %size, revisions, "Min verified deal size override applied");
        Ok(())
    }

    /// Set the window PoSt challenge window and rescale every revision's
    /// proving period to `window * period_deadlines`.
    ///
    /// Fails without touching any revision if a proving period would overflow.
    pub fn set_wpost_challenge_window(&mut self, window: ChainEpoch) -> Result<(), PolicyError> {
        if window <= 0 {
            return Err(PolicyError::InvalidParameter(format!(
                "challenge window must be positive, got {}",
                window
            )));
        }
        // TODO: v3 also derives its dispute window from finality; decide whether test
        // networks with short challenge windows need it scaled too.
        if let Some(bundle) = self
            .registry
            .bundles()
            .find(|bundle| bundle.proving_period_for(window).is_none())
        {
            return Err(PolicyError::InvalidParameter(format!(
                "challenge window {} overflows the proving period of actors {}",
                window,
                bundle.version()
            )));
        }
        let mut outcome = Ok(());
        let revisions = self.registry.update_all(|bundle| {
            if outcome.is_ok() {
                outcome = bundle.set_wpost_challenge_window(window);
            }
        });
        outcome?;
        tracing::info!(window, revisions, "WindowPoSt challenge window override applied");
        Ok(())
    }
}
