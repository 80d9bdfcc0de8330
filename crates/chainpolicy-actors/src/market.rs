//! Provider collateral arithmetic shared by every revision's market actor.
//!
//! minimum = target * normalized circulating supply, where
//!   normalized circulating supply = circulating supply * deal power share
//!   deal power share = piece size / max(network raw power, baseline power, piece size)
//!
//! The maximum is always the total token supply.

use std::cmp;

use num_traits::Zero;

use chainpolicy_abi::{
    total_filecoin, CollateralBounds, DealCollateralInputs, StoragePower, TokenAmount,
};

/// Compute provider collateral bounds for a supply target of
/// `target_num / target_denom`.
///
/// A zero-sized piece on a network with no power has no share and yields a
/// zero minimum.
pub fn provider_collateral_bounds(
    target_num: u64,
    target_denom: u64,
    inputs: &DealCollateralInputs,
) -> CollateralBounds {
    let lock_target_num = &inputs.circulating_supply * TokenAmount::from(target_num);
    let lock_target_denom = TokenAmount::from(target_denom);

    let power_share_num = StoragePower::from(inputs.piece_size.bytes());
    let power_share_denom = cmp::max(
        cmp::max(&inputs.network_raw_power, &inputs.baseline_power),
        &power_share_num,
    )
    .clone();

    let num = lock_target_num * &power_share_num;
    let denom = lock_target_denom * power_share_denom;
    let min = if denom.is_zero() {
        TokenAmount::zero()
    } else {
        num / denom
    };

    CollateralBounds {
        min,
        max: total_filecoin(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainpolicy_abi::PaddedPieceSize;

    fn inputs(piece: u64, raw: u64, baseline: u64, supply: u64) -> DealCollateralInputs {
        DealCollateralInputs {
            piece_size: PaddedPieceSize(piece),
            verified: false,
            network_raw_power: StoragePower::from(raw),
            network_qa_power: StoragePower::from(raw),
            baseline_power: StoragePower::from(baseline),
            circulating_supply: TokenAmount::from(supply),
        }
    }

    #[test]
    fn share_uses_largest_denominator() {
        // 1% of 1_000_000 supply, piece is 1/10 of baseline (baseline > raw).
        let b = provider_collateral_bounds(1, 100, &inputs(100, 500, 1000, 1_000_000));
        assert_eq!(b.min, TokenAmount::from(1000));
        assert_eq!(b.max, total_filecoin());
    }

    #[test]
    fn piece_larger_than_network_takes_full_share() {
        let b = provider_collateral_bounds(5, 100, &inputs(4096, 10, 10, 1000));
        assert_eq!(b.min, TokenAmount::from(50));
    }

    #[test]
    fn empty_network_and_piece_yield_zero() {
        let b = provider_collateral_bounds(5, 100, &inputs(0, 0, 0, 1000));
        assert!(b.min.is_zero());
    }
}
