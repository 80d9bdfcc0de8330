//! Chain policy actors - compiled-in parameters of each actors revision
//!
//! Each revision module (`v0`, `v2`, `v3`) mirrors the layout of the actor
//! suite it describes: `miner`, `market`, `power`, `verifreg` and `builtin`
//! submodules exposing that revision's default constants and formulas.
//! The policy layer reads these once to seed its revision registry.
//!
//! `VersionTable` is the built-in network version to actors version mapping.

pub mod builtin;
pub mod market;
pub mod v0;
pub mod v2;
pub mod v3;
pub mod version_table;

pub use builtin::ProofPolicy;
pub use version_table::VersionTable;
