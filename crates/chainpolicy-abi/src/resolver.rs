use crate::error::PolicyError;
use crate::types::{ActorsVersion, NetworkVersion};

/// Maps a network version to the actors revision active under it.
///
/// Implementations must be pure and monotonic: a higher network version never
/// resolves to an older revision. A version with no mapping must fail with
/// `PolicyError::UnsupportedNetworkVersion` rather than fall back to any
/// default revision.
pub trait VersionResolver: Send + Sync {
    fn actors_version(&self, nv: NetworkVersion) -> Result<ActorsVersion, PolicyError>;
}

/// Any pure lookup closure can act as a resolver; `None` means unmapped.
impl<F> VersionResolver for F
where
    F: Fn(NetworkVersion) -> Option<ActorsVersion> + Send + Sync,
{
    fn actors_version(&self, nv: NetworkVersion) -> Result<ActorsVersion, PolicyError> {
        self(nv).ok_or(PolicyError::UnsupportedNetworkVersion(nv))
    }
}
