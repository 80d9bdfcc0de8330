//! Network version to actors version mapping.
//!
//! A table is a list of activation points: each entry names the first
//! network version at which a revision takes effect. A network version maps
//! to the revision of the last activation at or below it, provided it does
//! not exceed the newest network version the table knows about.

use chainpolicy_abi::{ActorsVersion, NetworkVersion, PolicyError, VersionResolver};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionTable {
    /// (first network version, revision), ascending in both.
    activations: Vec<(NetworkVersion, ActorsVersion)>,
    /// Newest network version with a known mapping.
    last_supported: NetworkVersion,
}

impl VersionTable {
    /// Build a table from activation points.
    ///
    /// Rejects empty tables, activation points that are not strictly
    /// ascending, revisions that regress, and a `last_supported` version
    /// below the final activation point.
    pub fn new(
        activations: Vec<(NetworkVersion, ActorsVersion)>,
        last_supported: NetworkVersion,
    ) -> Result<Self, PolicyError> {
        let Some(&(last_nv, _)) = activations.last() else {
            return Err(PolicyError::InvalidParameter(
                "version table has no activation points".into(),
            ));
        };
        for pair in activations.windows(2) {
            let (nv_a, av_a) = pair[0];
            let (nv_b, av_b) = pair[1];
            if nv_b <= nv_a {
                return Err(PolicyError::InvalidParameter(format!(
                    "activation at {} does not follow {}",
                    nv_b, nv_a
                )));
            }
            if av_b < av_a {
                return Err(PolicyError::InvalidParameter(format!(
                    "actors {} at {} regresses from actors {} at {}",
                    av_b, nv_b, av_a, nv_a
                )));
            }
        }
        if last_supported < last_nv {
            return Err(PolicyError::InvalidParameter(format!(
                "last supported {} precedes activation at {}",
                last_supported, last_nv
            )));
        }
        Ok(Self {
            activations,
            last_supported,
        })
    }

    /// The mainnet schedule: nv0-3 run actors v0, nv4-9 run v2, nv10-11 run v3.
    pub fn mainnet() -> Self {
        Self {
            activations: vec![
                (NetworkVersion::V0, ActorsVersion::V0),
                (NetworkVersion::V4, ActorsVersion::V2),
                (NetworkVersion::V10, ActorsVersion::V3),
            ],
            last_supported: NetworkVersion::V11,
        }
    }

    /// Revision active at `nv`, or `None` if the table has no mapping for it.
    pub fn lookup(&self, nv: NetworkVersion) -> Option<ActorsVersion> {
        if nv > self.last_supported {
            return None;
        }
        self.activations
            .iter()
            .rev()
            .find(|(from, _)| *from <= nv)
            .map(|&(_, version)| version)
    }

    /// First network version at which `version` is active.
    pub fn activation_of(&self, version: ActorsVersion) -> Option<NetworkVersion> {
        self.activations
            .iter()
            .find(|(_, v)| *v == version)
            .map(|&(nv, _)| nv)
    }

    pub fn last_supported(&self) -> NetworkVersion {
        self.last_supported
    }
}

impl Default for VersionTable {
    fn default() -> Self {
        Self::mainnet()
    }
}

impl VersionResolver for VersionTable {
    fn actors_version(&self, nv: NetworkVersion) -> Result<ActorsVersion, PolicyError> {
        self.lookup(nv).ok_or(PolicyError::UnsupportedNetworkVersion(nv))
    }
}
