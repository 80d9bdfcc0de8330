//! Registered proof types.
//!
//! Seal proofs identify the sealing scheme a sector was committed with; PoSt
//! proofs identify the winning and window proof schemes derived from it. Both
//! key several per-revision lookup tables.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{GIB, KIB, MIB};
use crate::error::PolicyError;
use crate::types::SectorSize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RegisteredSealProof {
    StackedDrg2KiBV1,
    StackedDrg8MiBV1,
    StackedDrg512MiBV1,
    StackedDrg32GiBV1,
    StackedDrg64GiBV1,
    StackedDrg2KiBV1_1,
    StackedDrg8MiBV1_1,
    StackedDrg512MiBV1_1,
    StackedDrg32GiBV1_1,
    StackedDrg64GiBV1_1,
    /// Large-sector type force-enabled on the newest revision whenever the
    /// supported set is overridden.
    StackedDrg8GiBV1,
}

impl RegisteredSealProof {
    pub const ALL: [RegisteredSealProof; 11] = [
        RegisteredSealProof::StackedDrg2KiBV1,
        RegisteredSealProof::StackedDrg8MiBV1,
        RegisteredSealProof::StackedDrg512MiBV1,
        RegisteredSealProof::StackedDrg32GiBV1,
        RegisteredSealProof::StackedDrg64GiBV1,
        RegisteredSealProof::StackedDrg2KiBV1_1,
        RegisteredSealProof::StackedDrg8MiBV1_1,
        RegisteredSealProof::StackedDrg512MiBV1_1,
        RegisteredSealProof::StackedDrg32GiBV1_1,
        RegisteredSealProof::StackedDrg64GiBV1_1,
        RegisteredSealProof::StackedDrg8GiBV1,
    ];

    /// Numeric code of this proof type.
    pub fn code(self) -> i64 {
        use RegisteredSealProof::*;
        match self {
            StackedDrg2KiBV1 => 0,
            StackedDrg8MiBV1 => 1,
            StackedDrg512MiBV1 => 2,
            StackedDrg32GiBV1 => 3,
            StackedDrg64GiBV1 => 4,
            StackedDrg2KiBV1_1 => 5,
            StackedDrg8MiBV1_1 => 6,
            StackedDrg512MiBV1_1 => 7,
            StackedDrg32GiBV1_1 => 8,
            StackedDrg64GiBV1_1 => 9,
            StackedDrg8GiBV1 => 10,
        }
    }

    pub fn sector_size(self) -> SectorSize {
        use RegisteredSealProof::*;
        let bytes = match self {
            StackedDrg2KiBV1 | StackedDrg2KiBV1_1 => 2 * KIB,
            StackedDrg8MiBV1 | StackedDrg8MiBV1_1 => 8 * MIB,
            StackedDrg512MiBV1 | StackedDrg512MiBV1_1 => 512 * MIB,
            StackedDrg8GiBV1 => 8 * GIB,
            StackedDrg32GiBV1 | StackedDrg32GiBV1_1 => 32 * GIB,
            StackedDrg64GiBV1 | StackedDrg64GiBV1_1 => 64 * GIB,
        };
        SectorSize(bytes)
    }

    /// The window PoSt proof used for sectors sealed with this proof type.
    pub fn window_post_proof(self) -> Result<RegisteredPoStProof, PolicyError> {
        use RegisteredPoStProof::*;
        use RegisteredSealProof::*;
        Ok(match self {
            StackedDrg2KiBV1 | StackedDrg2KiBV1_1 => StackedDrgWindow2KiBV1,
            StackedDrg8MiBV1 | StackedDrg8MiBV1_1 => StackedDrgWindow8MiBV1,
            StackedDrg512MiBV1 | StackedDrg512MiBV1_1 => StackedDrgWindow512MiBV1,
            StackedDrg32GiBV1 | StackedDrg32GiBV1_1 => StackedDrgWindow32GiBV1,
            StackedDrg64GiBV1 | StackedDrg64GiBV1_1 => StackedDrgWindow64GiBV1,
            StackedDrg8GiBV1 => {
                return Err(PolicyError::invalid_proof(self, "no window PoSt proof for seal proof"))
            }
        })
    }

    /// The winning PoSt proof used for sectors sealed with this proof type.
    pub fn winning_post_proof(self) -> Result<RegisteredPoStProof, PolicyError> {
        use RegisteredPoStProof::*;
        use RegisteredSealProof::*;
        Ok(match self {
            StackedDrg2KiBV1 | StackedDrg2KiBV1_1 => StackedDrgWinning2KiBV1,
            StackedDrg8MiBV1 | StackedDrg8MiBV1_1 => StackedDrgWinning8MiBV1,
            StackedDrg512MiBV1 | StackedDrg512MiBV1_1 => StackedDrgWinning512MiBV1,
            StackedDrg32GiBV1 | StackedDrg32GiBV1_1 => StackedDrgWinning32GiBV1,
            StackedDrg64GiBV1 | StackedDrg64GiBV1_1 => StackedDrgWinning64GiBV1,
            StackedDrg8GiBV1 => {
                return Err(PolicyError::invalid_proof(self, "no winning PoSt proof for seal proof"))
            }
        })
    }
}

impl TryFrom<i64> for RegisteredSealProof {
    type Error = PolicyError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        RegisteredSealProof::ALL
            .into_iter()
            .find(|p| p.code() == code)
            .ok_or_else(|| PolicyError::invalid_proof(code, "unknown seal proof code"))
    }
}

impl std::str::FromStr for RegisteredSealProof {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        RegisteredSealProof::ALL
            .into_iter()
            .find(|p| p.to_string() == name)
            .ok_or_else(|| PolicyError::invalid_proof(name, "unknown seal proof name"))
    }
}

impl fmt::Display for RegisteredSealProof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RegisteredPoStProof {
    StackedDrgWinning2KiBV1,
    StackedDrgWinning8MiBV1,
    StackedDrgWinning512MiBV1,
    StackedDrgWinning32GiBV1,
    StackedDrgWinning64GiBV1,
    StackedDrgWindow2KiBV1,
    StackedDrgWindow8MiBV1,
    StackedDrgWindow512MiBV1,
    StackedDrgWindow32GiBV1,
    StackedDrgWindow64GiBV1,
}

impl RegisteredPoStProof {
    pub fn sector_size(self) -> SectorSize {
        use RegisteredPoStProof::*;
        let bytes = match self {
            StackedDrgWinning2KiBV1 | StackedDrgWindow2KiBV1 => 2 * KIB,
            StackedDrgWinning8MiBV1 | StackedDrgWindow8MiBV1 => 8 * MIB,
            StackedDrgWinning512MiBV1 | StackedDrgWindow512MiBV1 => 512 * MIB,
            StackedDrgWinning32GiBV1 | StackedDrgWindow32GiBV1 => 32 * GIB,
            StackedDrgWinning64GiBV1 | StackedDrgWindow64GiBV1 => 64 * GIB,
        };
        SectorSize(bytes)
    }

    pub fn is_window(self) -> bool {
        use RegisteredPoStProof::*;
        matches!(
            self,
            StackedDrgWindow2KiBV1
                | StackedDrgWindow8MiBV1
                | StackedDrgWindow512MiBV1
                | StackedDrgWindow32GiBV1
                | StackedDrgWindow64GiBV1
        )
    }
}

impl fmt::Display for RegisteredPoStProof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
