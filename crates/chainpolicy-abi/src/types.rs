use std::fmt;

use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

use crate::error::PolicyError;

/// A chain height, or a duration measured in epochs.
pub type ChainEpoch = i64;

/// Storage power in bytes (raw or quality-adjusted).
pub type StoragePower = BigInt;

/// A token amount in atto units.
pub type TokenAmount = BigInt;

/// The chain-wide protocol version a height maps to.
///
/// Supplied by the caller; the policy layer never derives it from chain state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetworkVersion(pub u32);

impl NetworkVersion {
    pub const V0: Self = Self(0);
    pub const V1: Self = Self(1);
    pub const V2: Self = Self(2);
    pub const V3: Self = Self(3);
    pub const V4: Self = Self(4);
    pub const V5: Self = Self(5);
    pub const V6: Self = Self(6);
    pub const V7: Self = Self(7);
    pub const V8: Self = Self(8);
    pub const V9: Self = Self(9);
    pub const V10: Self = Self(10);
    pub const V11: Self = Self(11);

    pub fn number(self) -> u32 {
        self.0
    }
}

impl From<u32> for NetworkVersion {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

impl fmt::Display for NetworkVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "nv{}", self.0)
    }
}

/// A revision of the on-chain actor logic.
///
/// The set only ever grows; an existing variant's number never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActorsVersion {
    V0,
    V2,
    V3,
}

impl ActorsVersion {
    /// Every revision, oldest first.
    pub const ALL: [ActorsVersion; 3] = [ActorsVersion::V0, ActorsVersion::V2, ActorsVersion::V3];

    /// The newest revision known to this build.
    pub const LATEST: ActorsVersion = ActorsVersion::V3;

    pub fn number(self) -> u32 {
        match self {
            ActorsVersion::V0 => 0,
            ActorsVersion::V2 => 2,
            ActorsVersion::V3 => 3,
        }
    }
}

impl TryFrom<u32> for ActorsVersion {
    type Error = PolicyError;

    fn try_from(v: u32) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(ActorsVersion::V0),
            2 => Ok(ActorsVersion::V2),
            3 => Ok(ActorsVersion::V3),
            other => Err(PolicyError::UnsupportedRevision(other)),
        }
    }
}

impl fmt::Display for ActorsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.number())
    }
}

/// Size of a sealed sector in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectorSize(pub u64);

impl SectorSize {
    pub fn bytes(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SectorSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
        let mut size = self.0;
        let mut unit = 0;
        while size >= 1024 && size % 1024 == 0 && unit < UNITS.len() - 1 {
            size /= 1024;
            unit += 1;
        }
        write!(f, "{}{}", size, UNITS[unit])
    }
}

/// Padded size of a deal piece in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaddedPieceSize(pub u64);

impl PaddedPieceSize {
    pub fn bytes(self) -> u64 {
        self.0
    }
}

/// The network-wide inputs to a deal provider collateral computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealCollateralInputs {
    /// Padded size of the deal piece.
    pub piece_size: PaddedPieceSize,
    /// Whether the deal is from a verified client.
    pub verified: bool,
    /// Total raw-byte power of the network.
    pub network_raw_power: StoragePower,
    /// Total quality-adjusted power of the network.
    pub network_qa_power: StoragePower,
    /// Baseline power at the current epoch.
    pub baseline_power: StoragePower,
    /// Circulating token supply.
    pub circulating_supply: TokenAmount,
}

/// Minimum and maximum provider collateral for one deal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollateralBounds {
    pub min: TokenAmount,
    pub max: TokenAmount,
}
