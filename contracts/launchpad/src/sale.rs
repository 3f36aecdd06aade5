use casper_types::{U256, U512};

use crate::curves;
use crate::error::LaunchpadError;

/// Curve parameters fixed at sale registration
#[derive(Clone)]
pub struct CurveParams {
    pub total_supply: U256,
    pub sale_capacity: U256,
    pub liquidity_reserve: U256,
    pub base_price: U512,
    pub max_price: U512,
    pub graduation_target: U512,
}

impl CurveParams {
    /// Reject parameter sets that could never graduate or never price
    pub fn validate(&self) -> Result<(), LaunchpadError> {
        if self.max_price <= self.base_price {
            return Err(LaunchpadError::InvalidCurve);
        }
        if self.sale_capacity.is_zero() || self.sale_capacity >= self.total_supply {
            return Err(LaunchpadError::InvalidCurve);
        }
        if self.graduation_target.is_zero() {
            return Err(LaunchpadError::InvalidCurve);
        }
        // A sale that fills its capacity below the target would be stuck
        // active forever
        let full_raise = curves::buy_cost(
            U256::zero(),
            self.sale_capacity,
            self.sale_capacity,
            self.base_price,
            self.max_price,
        );
        if full_raise < self.graduation_target {
            return Err(LaunchpadError::InvalidCurve);
        }
        Ok(())
    }
}

/// Mutable trade state of one token sale
pub struct SaleState {
    pub sold_amount: U256,
    pub collected_funds: U512,
    pub graduated: bool,
    pub reward_claimed: bool,
}

pub struct BuyOutcome {
    pub tokens: U256,
    pub graduated_now: bool,
}

/// Where the post-graduation reward goes
pub enum RewardRoute {
    Creator(U512),
    Protocol(U512),
}

impl SaleState {
    pub fn new() -> Self {
        SaleState {
            sold_amount: U256::zero(),
            collected_funds: U512::zero(),
            graduated: false,
            reward_claimed: false,
        }
    }

    /// Apply a buy of `funds` motes against the curve
    ///
    /// Graduation is evaluated in the same transition: the buy that lifts
    /// `collected_funds` to the target flips `graduated`, and the flag never
    /// clears again.
    pub fn apply_buy(
        &mut self,
        params: &CurveParams,
        funds: U512,
    ) -> Result<BuyOutcome, LaunchpadError> {
        if self.graduated {
            return Err(LaunchpadError::SaleGraduated);
        }
        if funds.is_zero() {
            return Err(LaunchpadError::ZeroAmount);
        }

        let tokens = curves::tokens_for_funds(
            self.sold_amount,
            funds,
            params.sale_capacity,
            params.base_price,
            params.max_price,
        );
        if tokens.is_zero() {
            return Err(LaunchpadError::ZeroAmount);
        }
        if self.sold_amount + tokens > params.sale_capacity {
            return Err(LaunchpadError::ExceedsSaleCapacity);
        }

        // The full funds supplied are credited to the raise; integration
        // dust stays with the sale
        self.sold_amount = self.sold_amount + tokens;
        self.collected_funds = self.collected_funds + funds;

        let graduated_now = self.collected_funds >= params.graduation_target;
        if graduated_now {
            self.graduated = true;
        }

        Ok(BuyOutcome {
            tokens,
            graduated_now,
        })
    }

    /// Apply a sell of `tokens` back into the curve, returning the funds out
    pub fn apply_sell(
        &mut self,
        params: &CurveParams,
        tokens: U256,
    ) -> Result<U512, LaunchpadError> {
        if self.graduated {
            return Err(LaunchpadError::SaleGraduated);
        }
        if tokens.is_zero() {
            return Err(LaunchpadError::ZeroAmount);
        }
        if tokens > self.sold_amount {
            return Err(LaunchpadError::InsufficientReserve);
        }

        let funds_out = curves::sell_return(
            self.sold_amount - tokens,
            self.sold_amount,
            params.sale_capacity,
            params.base_price,
            params.max_price,
        );
        if funds_out > self.collected_funds {
            return Err(LaunchpadError::InsufficientReserve);
        }

        self.sold_amount = self.sold_amount - tokens;
        self.collected_funds = self.collected_funds - funds_out;

        Ok(funds_out)
    }

    /// One-shot creator reward claim after graduation
    ///
    /// The creator amount is paid only to a Smart Vault holder; otherwise the
    /// protocol amount goes to the treasury and the creator share is
    /// forfeited.
    pub fn claim_reward(
        &mut self,
        is_creator: bool,
        holds_smart_vault: bool,
        creator_reward: U512,
        protocol_reward: U512,
    ) -> Result<RewardRoute, LaunchpadError> {
        if !self.graduated {
            return Err(LaunchpadError::NotGraduated);
        }
        if self.reward_claimed {
            return Err(LaunchpadError::AlreadyClaimed);
        }
        if !is_creator {
            return Err(LaunchpadError::NotCreator);
        }

        self.reward_claimed = true;

        if holds_smart_vault {
            Ok(RewardRoute::Creator(creator_reward))
        } else {
            Ok(RewardRoute::Protocol(protocol_reward))
        }
    }

    pub fn can_claim_reward(&self, is_creator: bool) -> bool {
        self.graduated && !self.reward_claimed && is_creator
    }

    /// Raise progress in basis points (0-10000)
    pub fn progress_bps(&self, graduation_target: U512) -> u64 {
        if graduation_target.is_zero() {
            return 0;
        }
        let progress = (self.collected_funds * U512::from(10_000u64)) / graduation_target;
        progress.as_u64().min(10_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::TOKEN_SCALE;

    const GRADUATION_TARGET: u64 = 69_420_000_000_000; // 69,420 CSPR in motes

    fn params() -> CurveParams {
        let total_supply = U256::from(1_000_000_000u128 * TOKEN_SCALE);
        let sale_capacity = U256::from(800_000_000u128 * TOKEN_SCALE);
        CurveParams {
            total_supply,
            sale_capacity,
            liquidity_reserve: total_supply - sale_capacity,
            base_price: U512::from(10_000u64),
            max_price: U512::from(200_000u64),
            graduation_target: U512::from(GRADUATION_TARGET),
        }
    }

    #[test]
    fn test_params_validation() {
        assert!(params().validate().is_ok());

        let mut inverted = params();
        inverted.max_price = U512::from(5_000u64);
        assert_eq!(inverted.validate(), Err(LaunchpadError::InvalidCurve));

        // A curve whose full raise cannot reach the target is rejected
        let mut unreachable = params();
        unreachable.graduation_target = U512::from(100_000_000_000_000u64);
        assert_eq!(unreachable.validate(), Err(LaunchpadError::InvalidCurve));
    }

    #[test]
    fn test_buy_accumulates_state() {
        let p = params();
        let mut sale = SaleState::new();

        let funds = U512::from(1_000_000_000_000u64);
        let outcome = sale.apply_buy(&p, funds).unwrap();

        assert!(!outcome.tokens.is_zero());
        assert!(!outcome.graduated_now);
        assert_eq!(sale.sold_amount, outcome.tokens);
        assert_eq!(sale.collected_funds, funds);
        assert!(!sale.graduated);
    }

    #[test]
    fn test_zero_buy_rejected() {
        let p = params();
        let mut sale = SaleState::new();
        assert_eq!(
            sale.apply_buy(&p, U512::zero()),
            Err(LaunchpadError::ZeroAmount)
        );
    }

    #[test]
    fn test_graduation_at_exact_target() {
        let p = params();
        let mut sale = SaleState::new();

        // One mote short of the target: still active
        let almost = U512::from(GRADUATION_TARGET - 1);
        let outcome = sale.apply_buy(&p, almost).unwrap();
        assert!(!outcome.graduated_now);
        assert!(!sale.graduated);

        // The buy that reaches the target graduates in the same transition
        let outcome = sale.apply_buy(&p, U512::one()).unwrap();
        assert!(outcome.graduated_now);
        assert!(sale.graduated);
        assert_eq!(sale.collected_funds, U512::from(GRADUATION_TARGET));
    }

    #[test]
    fn test_graduation_is_one_way() {
        let p = params();
        let mut sale = SaleState::new();

        sale.apply_buy(&p, U512::from(GRADUATION_TARGET)).unwrap();
        assert!(sale.graduated);

        assert_eq!(
            sale.apply_buy(&p, U512::from(1_000_000_000u64)),
            Err(LaunchpadError::SaleGraduated)
        );
        assert_eq!(
            sale.apply_sell(&p, U256::from(TOKEN_SCALE)),
            Err(LaunchpadError::SaleGraduated)
        );
        assert!(sale.graduated);
    }

    #[test]
    fn test_capacity_ceiling() {
        let mut p = params();
        // Lift the target out of the way so the capacity check is what trips
        p.graduation_target = U512::from(84_000_000_000_000u64);
        let mut sale = SaleState::new();

        // Twice the full-curve cost cannot fit the 80% ceiling
        let result = sale.apply_buy(&p, U512::from(168_000_000_000_000u64));
        assert_eq!(result, Err(LaunchpadError::ExceedsSaleCapacity));
        assert!(sale.sold_amount.is_zero());
        assert!(sale.collected_funds.is_zero());
    }

    #[test]
    fn test_sell_reverses_buy() {
        let p = params();
        let mut sale = SaleState::new();

        let funds = U512::from(2_500_000_000_000u64);
        let outcome = sale.apply_buy(&p, funds).unwrap();

        let funds_out = sale.apply_sell(&p, outcome.tokens).unwrap();
        assert!(funds_out <= funds);
        assert!(sale.sold_amount.is_zero());
        assert_eq!(sale.collected_funds, funds - funds_out);
    }

    #[test]
    fn test_sell_more_than_sold_rejected() {
        let p = params();
        let mut sale = SaleState::new();

        sale.apply_buy(&p, U512::from(1_000_000_000u64)).unwrap();
        let too_many = sale.sold_amount + U256::one();
        assert_eq!(
            sale.apply_sell(&p, too_many),
            Err(LaunchpadError::InsufficientReserve)
        );
    }

    #[test]
    fn test_reward_claim_requires_graduation() {
        let p = params();
        let mut sale = SaleState::new();
        sale.apply_buy(&p, U512::from(1_000_000_000u64)).unwrap();

        let creator_reward = U512::from(250_000_000_000u64);
        let protocol_reward = U512::from(100_000_000_000u64);

        assert!(matches!(
            sale.claim_reward(true, true, creator_reward, protocol_reward),
            Err(LaunchpadError::NotGraduated)
        ));
        assert!(!sale.can_claim_reward(true));
    }

    #[test]
    fn test_reward_claim_exactly_once() {
        let p = params();
        let mut sale = SaleState::new();
        sale.apply_buy(&p, U512::from(GRADUATION_TARGET)).unwrap();

        let creator_reward = U512::from(250_000_000_000u64);
        let protocol_reward = U512::from(100_000_000_000u64);

        assert!(sale.can_claim_reward(true));
        assert!(!sale.can_claim_reward(false));

        match sale.claim_reward(true, true, creator_reward, protocol_reward) {
            Ok(RewardRoute::Creator(amount)) => assert_eq!(amount, creator_reward),
            _ => panic!("expected creator route"),
        }

        assert!(matches!(
            sale.claim_reward(true, true, creator_reward, protocol_reward),
            Err(LaunchpadError::AlreadyClaimed)
        ));
        assert!(!sale.can_claim_reward(true));
    }

    #[test]
    fn test_reward_forfeited_without_smart_vault() {
        let p = params();
        let mut sale = SaleState::new();
        sale.apply_buy(&p, U512::from(GRADUATION_TARGET)).unwrap();

        let creator_reward = U512::from(250_000_000_000u64);
        let protocol_reward = U512::from(100_000_000_000u64);

        match sale.claim_reward(true, false, creator_reward, protocol_reward) {
            Ok(RewardRoute::Protocol(amount)) => assert_eq!(amount, protocol_reward),
            _ => panic!("expected protocol route"),
        }
    }

    #[test]
    fn test_claim_by_non_creator_rejected() {
        let p = params();
        let mut sale = SaleState::new();
        sale.apply_buy(&p, U512::from(GRADUATION_TARGET)).unwrap();

        assert!(matches!(
            sale.claim_reward(false, true, U512::one(), U512::one()),
            Err(LaunchpadError::NotCreator)
        ));
        // A rejected claimant does not consume the claim
        assert!(sale.can_claim_reward(true));
    }

    #[test]
    fn test_progress_bps() {
        let p = params();
        let mut sale = SaleState::new();
        assert_eq!(sale.progress_bps(p.graduation_target), 0);

        sale.apply_buy(&p, U512::from(GRADUATION_TARGET / 2)).unwrap();
        assert_eq!(sale.progress_bps(p.graduation_target), 5_000);

        sale.apply_buy(&p, U512::from(GRADUATION_TARGET / 2)).unwrap();
        assert_eq!(sale.progress_bps(p.graduation_target), 10_000);
    }
}
