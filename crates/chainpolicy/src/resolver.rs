//! Selecting a revision for a query.
//!
//! Queries accept either an explicit actors version or a network version.
//! Network versions go through the injected `VersionResolver`; an explicit
//! actors version is used as-is.

use chainpolicy_abi::{ActorsVersion, NetworkVersion, PolicyError, VersionResolver};

/// Which revision a query should be answered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionRef {
    Actors(ActorsVersion),
    Network(NetworkVersion),
}

impl VersionRef {
    /// The network version, if the caller supplied one.
    pub fn network_version(self) -> Option<NetworkVersion> {
        match self {
            VersionRef::Network(nv) => Some(nv),
            VersionRef::Actors(_) => None,
        }
    }
}

impl From<ActorsVersion> for VersionRef {
    fn from(v: ActorsVersion) -> Self {
        VersionRef::Actors(v)
    }
}

impl From<NetworkVersion> for VersionRef {
    fn from(nv: NetworkVersion) -> Self {
        VersionRef::Network(nv)
    }
}

pub(crate) fn resolve(
    resolver: &dyn VersionResolver,
    at: VersionRef,
) -> Result<ActorsVersion, PolicyError> {
    match at {
        VersionRef::Actors(v) => Ok(v),
        VersionRef::Network(nv) => match resolver.actors_version(nv) {
            Ok(v) => {
                tracing::debug!(
                    network_version = %nv,
                    actors_version = %v,
                    "Resolved actors version"
                );
                Ok(v)
            }
            Err(e) => {
                tracing::warn!(
                    network_version = %nv,
                    error = %e,
                    "No actors version for network version"
                );
                Err(e)
            }
        },
    }
}
