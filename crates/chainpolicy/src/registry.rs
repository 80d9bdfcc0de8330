//! Revision registry: one constant bundle per actors revision.
//!
//! The registry is the only place bundles live. Reads go through `get`;
//! writes go through `update_all`, which applies the same change to every
//! registered revision in one call. Since that requires `&mut self`, no
//! reader can observe a partially applied update.

use std::collections::BTreeMap;

use chainpolicy_abi::{ActorsVersion, PolicyError};

use crate::bundle::ConstantBundle;

#[derive(Debug, Clone)]
pub struct RevisionRegistry {
    bundles: BTreeMap<ActorsVersion, ConstantBundle>,
    latest: ActorsVersion,
}

impl RevisionRegistry {
    /// A registry seeded with the compiled-in defaults of every revision.
    pub fn builtin() -> Self {
        let bundles = ActorsVersion::ALL
            .into_iter()
            .map(|v| (v, ConstantBundle::builtin(v)))
            .collect();
        Self {
            bundles,
            latest: ActorsVersion::LATEST,
        }
    }

    /// Assemble a registry from explicit bundles.
    ///
    /// Every bundle must pass `ConstantBundle::validate`, at least one bundle
    /// is required, and no revision may appear twice.
    pub fn from_bundles(
        bundles: impl IntoIterator<Item = ConstantBundle>,
    ) -> Result<Self, PolicyError> {
        let mut map = BTreeMap::new();
        for bundle in bundles {
            bundle.validate()?;
            let version = bundle.version();
            if map.insert(version, bundle).is_some() {
                return Err(PolicyError::InvalidParameter(format!(
                    "actors {} registered twice",
                    version
                )));
            }
        }
        let Some(&latest) = map.keys().next_back() else {
            return Err(PolicyError::InvalidParameter(
                "registry needs at least one revision".into(),
            ));
        };
        Ok(Self { bundles: map, latest })
    }

    pub fn get(&self, version: ActorsVersion) -> Result<&ConstantBundle, PolicyError> {
        self.bundles
            .get(&version)
            .ok_or_else(|| PolicyError::unsupported_revision(version))
    }

    /// The newest registered revision.
    pub fn latest_version(&self) -> ActorsVersion {
        self.latest
    }

    pub fn latest(&self) -> Result<&ConstantBundle, PolicyError> {
        self.get(self.latest)
    }

    /// Registered revisions, oldest first.
    pub fn versions(&self) -> impl Iterator<Item = ActorsVersion> + '_ {
        self.bundles.keys().copied()
    }

    pub fn bundles(&self) -> impl Iterator<Item = &ConstantBundle> + '_ {
        self.bundles.values()
    }

    /// Apply `f` to every registered bundle. Returns the number of revisions touched.
    pub(crate) fn update_all(&mut self, mut f: impl FnMut(&mut ConstantBundle)) -> usize {
        self.bundles.values_mut().for_each(&mut f);
        self.bundles.len()
    }

    pub(crate) fn latest_mut(&mut self) -> Result<&mut ConstantBundle, PolicyError> {
        let latest = self.latest;
        self.bundles
            .get_mut(&latest)
            .ok_or_else(|| PolicyError::unsupported_revision(latest))
    }
}

impl Default for RevisionRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
