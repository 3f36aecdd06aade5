use casper_types::{U256, U512};

use crate::error::RewardVaultError;

const BPS_DENOMINATOR: u64 = 10_000;

/// Result of applying a claim against an accrued reward balance
pub struct ClaimOutcome {
    pub net: U256,
    pub fee: U256,
    pub accrued_after: U256,
    pub claimed_after: U256,
}

/// Protocol fee split on a claim amount
///
/// fee = amount * fee_bps / 10000, integer division; the remainder goes to
/// the claimant
pub fn split_fee(amount: U256, fee_bps: u64) -> (U256, U256) {
    let fee = (amount * U256::from(fee_bps)) / U256::from(BPS_DENOMINATOR);
    (amount - fee, fee)
}

/// Validate and apply a (partial) claim of `amount` from an accrued balance
pub fn apply_claim(
    accrued: U256,
    claimed: U256,
    amount: U256,
    fee_bps: u64,
) -> Result<ClaimOutcome, RewardVaultError> {
    if amount.is_zero() {
        return Err(RewardVaultError::ZeroAmount);
    }
    if amount > accrued {
        return Err(RewardVaultError::InsufficientAccrued);
    }

    let (net, fee) = split_fee(amount, fee_bps);

    Ok(ClaimOutcome {
        net,
        fee,
        accrued_after: accrued - amount,
        claimed_after: claimed + amount,
    })
}

/// Auto-claim gate: the USD valuation of the claim must reach the threshold
pub fn meets_auto_claim_threshold(usd_value: U512, threshold: U512) -> bool {
    usd_value >= threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEE_BPS: u64 = 30; // 0.3%

    #[test]
    fn test_fee_arithmetic() {
        let (net, fee) = split_fee(U256::from(1_000u64), FEE_BPS);
        assert_eq!(fee, U256::from(3u64));
        assert_eq!(net, U256::from(997u64));
    }

    #[test]
    fn test_small_claims_round_fee_down() {
        // Below 1/fee_bps of the denominator the fee truncates to zero
        let (net, fee) = split_fee(U256::from(10u64), FEE_BPS);
        assert_eq!(fee, U256::zero());
        assert_eq!(net, U256::from(10u64));
    }

    #[test]
    fn test_net_plus_fee_equals_amount() {
        for amount in [1u64, 333, 1_000, 9_999, 1_000_000_007] {
            let (net, fee) = split_fee(U256::from(amount), FEE_BPS);
            assert_eq!(net + fee, U256::from(amount));
        }
    }

    #[test]
    fn test_claim_validation() {
        let accrued = U256::from(500u64);

        assert_eq!(
            apply_claim(accrued, U256::zero(), U256::zero(), FEE_BPS)
                .err()
                .unwrap(),
            RewardVaultError::ZeroAmount
        );
        assert_eq!(
            apply_claim(accrued, U256::zero(), U256::from(501u64), FEE_BPS)
                .err()
                .unwrap(),
            RewardVaultError::InsufficientAccrued
        );
    }

    #[test]
    fn test_partial_claims_drain_the_balance() {
        let mut accrued = U256::from(1_000u64);
        let mut claimed = U256::zero();

        let outcome = apply_claim(accrued, claimed, U256::from(400u64), FEE_BPS).unwrap();
        accrued = outcome.accrued_after;
        claimed = outcome.claimed_after;
        assert_eq!(accrued, U256::from(600u64));
        assert_eq!(claimed, U256::from(400u64));

        let outcome = apply_claim(accrued, claimed, U256::from(600u64), FEE_BPS).unwrap();
        accrued = outcome.accrued_after;
        claimed = outcome.claimed_after;
        assert_eq!(accrued, U256::zero());
        assert_eq!(claimed, U256::from(1_000u64));

        // Nothing left to claim
        assert_eq!(
            apply_claim(accrued, claimed, U256::one(), FEE_BPS)
                .err()
                .unwrap(),
            RewardVaultError::InsufficientAccrued
        );
    }

    #[test]
    fn test_total_claimed_never_decreases() {
        let mut claimed = U256::zero();
        let mut accrued = U256::from(10_000u64);

        for amount in [1u64, 250, 999, 4_000] {
            let outcome = apply_claim(accrued, claimed, U256::from(amount), FEE_BPS).unwrap();
            assert!(outcome.claimed_after > claimed);
            assert!(outcome.accrued_after < accrued);
            accrued = outcome.accrued_after;
            claimed = outcome.claimed_after;
        }
    }

    #[test]
    fn test_auto_claim_threshold_gate() {
        // $250.00 threshold in cents
        let threshold = U512::from(25_000u64);

        assert!(!meets_auto_claim_threshold(U512::from(24_999u64), threshold));
        assert!(meets_auto_claim_threshold(U512::from(25_000u64), threshold));
        assert!(meets_auto_claim_threshold(U512::from(25_001u64), threshold));
    }

    #[test]
    fn test_auto_claim_threshold_scenario() {
        let threshold = U512::from(25_000u64);

        // Rewards worth $200 cannot auto-claim
        let mut accrued_usd = U512::from(20_000u64);
        assert!(!meets_auto_claim_threshold(accrued_usd, threshold));

        // Another $50 of accrual lifts the claim over the line
        accrued_usd = accrued_usd + U512::from(5_000u64);
        assert!(meets_auto_claim_threshold(accrued_usd, threshold));
    }
}
