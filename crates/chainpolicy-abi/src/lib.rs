//! Chain policy ABI - primitive types shared by every actors revision
//!
//! Defines the vocabulary the policy layer speaks in:
//! - Epochs, network versions and actors versions (revisions)
//! - Registered seal and PoSt proof types with their sector sizes
//! - Big-integer storage power and token amounts
//! - Protocol-wide constants that do not vary between revisions
//! - The `PolicyError` type and the `VersionResolver` capability

pub mod constants;
pub mod error;
pub mod proofs;
pub mod resolver;
pub mod types;

pub use constants::*;
pub use error::*;
pub use proofs::*;
pub use resolver::*;
pub use types::*;
