//! Chain policy - protocol parameter resolution across actors revisions
//!
//! Answers "what is parameter X under network version V" for the rest of
//! the node:
//! - Revision registry: one constant bundle per actors revision
//! - Version resolution: network version to actors version through an
//!   injected `VersionResolver`
//! - Policy facade: one query per parameter, plus derived values (collateral
//!   bounds, max PoSt partitions, default sector size, winning PoSt lookback)
//! - Test-only overrides that rewrite every revision at once
//! - Override configuration from TOML and environment variables

pub mod bundle;
pub mod config;
pub mod overrides;
pub mod policy;
pub mod registry;
pub mod resolver;

pub use bundle::{
    BundleSnapshot, CollateralFormula, ConstantBundle, MinPowerPolicy, ProofTypeGroup,
    ProofTypeGroups,
};
pub use config::PolicyConfig;
pub use overrides::{PolicyOverrides, LARGE_SECTOR_PROOF};
pub use policy::Policy;
pub use registry::RevisionRegistry;
pub use resolver::VersionRef;

pub use chainpolicy_abi::PolicyError;
