use crate::types::{ChainEpoch, NetworkVersion, TokenAmount};

/// Assumed epoch duration in seconds.
pub const EPOCH_DURATION_SECONDS: i64 = 30;

pub const SECONDS_IN_HOUR: i64 = 3600;
pub const SECONDS_IN_DAY: i64 = 86400;

/// Epochs per hour (120 at 30s epochs).
pub const EPOCHS_IN_HOUR: ChainEpoch = SECONDS_IN_HOUR / EPOCH_DURATION_SECONDS;

/// Epochs per day (2880 at 30s epochs).
pub const EPOCHS_IN_DAY: ChainEpoch = SECONDS_IN_DAY / EPOCH_DURATION_SECONDS;

/// Number of epochs after which a tipset is considered final.
pub const CHAIN_FINALITY: ChainEpoch = 900;

/// Lookback used when drawing sealing randomness.
pub const SEAL_RANDOMNESS_LOOKBACK: ChainEpoch = CHAIN_FINALITY;

/// Delay between a payment channel settle call and its collectability.
pub const PAYCH_SETTLE_DELAY: ChainEpoch = 12 * EPOCHS_IN_HOUR;

/// Winning PoSt sector-set lookback used up to and including
/// `WINNING_POST_LOOKBACK_BREAKPOINT`.
pub const WINNING_POST_SHORT_LOOKBACK: ChainEpoch = 10;

/// Last network version that still uses the short winning PoSt lookback.
pub const WINNING_POST_LOOKBACK_BREAKPOINT: NetworkVersion = NetworkVersion::V3;

/// Atto units per whole token.
pub const FIL_PRECISION: u64 = 1_000_000_000_000_000_000;

/// Total token supply in whole tokens.
pub const TOTAL_FILECOIN_BASE: u64 = 2_000_000_000;

/// Total token supply in atto units.
pub fn total_filecoin() -> TokenAmount {
    TokenAmount::from(TOTAL_FILECOIN_BASE) * TokenAmount::from(FIL_PRECISION)
}

pub const KIB: u64 = 1 << 10;
pub const MIB: u64 = 1 << 20;
pub const GIB: u64 = 1 << 30;
pub const TIB: u64 = 1 << 40;
