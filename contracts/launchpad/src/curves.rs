use casper_types::{U256, U512};

/// Token base units per whole token (18 decimals)
pub const TOKEN_SCALE: u128 = 1_000_000_000_000_000_000u128;

/// Calculate the current spot price on the linear curve
///
/// # Arguments
/// * `tokens_sold` - Amount of tokens already sold (base units)
/// * `sale_capacity` - Amount of tokens reserved for the curve sale (base units)
/// * `base_price` - Price at zero sold (in motes per whole token)
/// * `max_price` - Price at full capacity (in motes per whole token)
///
/// # Returns
/// Current price in motes per whole token (U512), monotone non-decreasing
/// in `tokens_sold`
pub fn spot_price(
    tokens_sold: U256,
    sale_capacity: U256,
    base_price: U512,
    max_price: U512,
) -> U512 {
    if sale_capacity.is_zero() {
        return base_price;
    }

    let sold = U512::from(tokens_sold.as_u128());
    let capacity = U512::from(sale_capacity.as_u128());
    let range = max_price - base_price;

    base_price + (sold * range) / capacity
}

/// Area under the curve from `from` to `to`, as a single exact fraction.
///
/// The linear curve integrates in closed form:
///   integral = base·(to−from)/SCALE + range·(to²−from²)/(2·cap·SCALE)
/// which collapses to num/den with
///   num = 2·cap·base·(to−from) + range·(to²−from²)
///   den = 2·cap·SCALE
/// so callers control the rounding direction of the single final division.
fn integral_parts(
    from: U512,
    to: U512,
    capacity: U512,
    base_price: U512,
    range: U512,
) -> (U512, U512) {
    let two = U512::from(2u64);
    let scale = U512::from(TOKEN_SCALE);
    let span = to - from;
    let sum = to + from;

    let num = two * capacity * base_price * span + range * span * sum;
    let den = two * capacity * scale;

    (num, den)
}

/// Funds required to move the sold amount from `from` to `to` (a buy)
///
/// Rounded UP: the buyer never pays less than the exact curve area.
pub fn buy_cost(
    from: U256,
    to: U256,
    sale_capacity: U256,
    base_price: U512,
    max_price: U512,
) -> U512 {
    if from >= to || sale_capacity.is_zero() {
        return U512::zero();
    }

    let (num, den) = integral_parts(
        U512::from(from.as_u128()),
        U512::from(to.as_u128()),
        U512::from(sale_capacity.as_u128()),
        base_price,
        max_price - base_price,
    );

    (num + den - U512::one()) / den
}

/// Funds released by moving the sold amount from `to` back down to `from`
/// (a sell)
///
/// Rounded DOWN: the seller never receives more than the exact curve area.
pub fn sell_return(
    from: U256,
    to: U256,
    sale_capacity: U256,
    base_price: U512,
    max_price: U512,
) -> U512 {
    if from >= to || sale_capacity.is_zero() {
        return U512::zero();
    }

    let (num, den) = integral_parts(
        U512::from(from.as_u128()),
        U512::from(to.as_u128()),
        U512::from(sale_capacity.as_u128()),
        base_price,
        max_price - base_price,
    );

    num / den
}

/// Calculate how many tokens `funds` buys starting at `tokens_sold`
///
/// Inverts the buy integral in closed form: with r = range, the largest n
/// satisfying buy_cost(sold, sold + n) <= funds solves
///   r·n² + 2·(cap·base + r·sold)·n − 2·cap·SCALE·funds = 0
/// The integer square root of the discriminant under-approximates the real
/// root, and the result is clamped down until the (round-up) cost fits the
/// funds supplied.
///
/// # Returns
/// Token amount in base units; zero when `funds` is below the price of a
/// single base unit. The caller enforces the capacity ceiling.
pub fn tokens_for_funds(
    tokens_sold: U256,
    funds: U512,
    sale_capacity: U256,
    base_price: U512,
    max_price: U512,
) -> U256 {
    if funds.is_zero() || sale_capacity.is_zero() {
        return U256::zero();
    }

    let two = U512::from(2u64);
    let scale = U512::from(TOKEN_SCALE);
    let sold = U512::from(tokens_sold.as_u128());
    let capacity = U512::from(sale_capacity.as_u128());
    let range = max_price - base_price;

    let mut n = if range.is_zero() {
        // Flat curve degenerates to a constant price
        if base_price.is_zero() {
            return U256::zero();
        }
        (funds * scale) / base_price
    } else {
        let b = two * (capacity * base_price + range * sold);
        let c = two * capacity * scale * funds;
        let disc = b * b + U512::from(4u64) * range * c;
        (isqrt(disc) - b) / (two * range)
    };

    // The closed form under-approximates; the round-up cost can still
    // overshoot by one base unit
    while !n.is_zero() {
        let to = tokens_sold + U256::from(n.as_u128());
        if buy_cost(tokens_sold, to, sale_capacity, base_price, max_price) <= funds {
            break;
        }
        n = n - U512::one();
    }

    U256::from(n.as_u128())
}

/// Integer square root (floor) via Newton's method
pub fn isqrt(value: U512) -> U512 {
    if value <= U512::one() {
        return value;
    }

    let two = U512::from(2u64);
    let mut x = value;
    let mut y = (x + U512::one()) / two;
    while y < x {
        x = y;
        y = (x + value / x) / two;
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;

    // 800M whole tokens on the curve, priced 10,000 -> 200,000 motes
    fn capacity() -> U256 {
        U256::from(800_000_000u128 * TOKEN_SCALE)
    }

    fn base() -> U512 {
        U512::from(10_000u64)
    }

    fn max() -> U512 {
        U512::from(200_000u64)
    }

    #[test]
    fn test_spot_price_endpoints() {
        let cap = capacity();

        let start = spot_price(U256::zero(), cap, base(), max());
        assert_eq!(start, base());

        let end = spot_price(cap, cap, base(), max());
        assert_eq!(end, max());

        let mid = spot_price(cap / 2u64, cap, base(), max());
        assert_eq!(mid, (base() + max()) / 2u64);
    }

    #[test]
    fn test_spot_price_monotonic() {
        let cap = capacity();
        let step = cap / 10u64;

        let mut prev = U512::zero();
        for i in 0..=10u64 {
            let price = spot_price(step * i, cap, base(), max());
            assert!(price >= prev);
            prev = price;
        }
    }

    #[test]
    fn test_full_curve_cost_is_exact() {
        // Average price 105,000 motes over 800M tokens
        let cost = buy_cost(U256::zero(), capacity(), capacity(), base(), max());
        assert_eq!(cost, U512::from(84_000_000_000_000u64));

        // The exact value needs no rounding, so both directions agree
        let take = sell_return(U256::zero(), capacity(), capacity(), base(), max());
        assert_eq!(take, cost);
    }

    #[test]
    fn test_rounding_favors_protocol() {
        // One base unit costs a fraction of a mote: buyers pay 1, sellers get 0
        let one = U256::one();
        assert_eq!(buy_cost(U256::zero(), one, capacity(), base(), max()), U512::one());
        assert_eq!(sell_return(U256::zero(), one, capacity(), base(), max()), U512::zero());
    }

    #[test]
    fn test_buy_sell_round_trip_never_exceeds_funds() {
        let cap = capacity();
        let funds = [
            U512::from(1u64),
            U512::from(12_345u64),
            U512::from(1_000_000_000u64),
            U512::from(69_420_000_000_000u64),
        ];

        for f in funds {
            let n = tokens_for_funds(U256::zero(), f, cap, base(), max());
            assert!(buy_cost(U256::zero(), n, cap, base(), max()) <= f);
            assert!(sell_return(U256::zero(), n, cap, base(), max()) <= f);
        }
    }

    #[test]
    fn test_round_trip_from_mid_curve() {
        let cap = capacity();
        let sold = cap / 3u64;
        let f = U512::from(5_000_000_000_000u64);

        let n = tokens_for_funds(sold, f, cap, base(), max());
        assert!(!n.is_zero());
        assert!(buy_cost(sold, sold + n, cap, base(), max()) <= f);
        assert!(sell_return(sold, sold + n, cap, base(), max()) <= f);
    }

    #[test]
    fn test_exact_funds_buy_whole_curve() {
        // The discriminant is a perfect square here, so inversion is exact
        let f = U512::from(84_000_000_000_000u64);
        let n = tokens_for_funds(U256::zero(), f, capacity(), base(), max());
        assert_eq!(n, capacity());
    }

    #[test]
    fn test_zero_funds_buy_nothing() {
        let n = tokens_for_funds(U256::zero(), U512::zero(), capacity(), base(), max());
        assert!(n.is_zero());
    }

    #[test]
    fn test_isqrt() {
        assert_eq!(isqrt(U512::zero()), U512::zero());
        assert_eq!(isqrt(U512::one()), U512::one());
        assert_eq!(isqrt(U512::from(2u64)), U512::one());
        assert_eq!(isqrt(U512::from(3u64)), U512::one());
        assert_eq!(isqrt(U512::from(4u64)), U512::from(2u64));
        assert_eq!(isqrt(U512::from(15u64)), U512::from(3u64));
        assert_eq!(isqrt(U512::from(16u64)), U512::from(4u64));
        assert_eq!(isqrt(U512::from(17u64)), U512::from(4u64));

        let root = U512::from(1_000_000_000_000_000u128);
        let square = root * root;
        assert_eq!(isqrt(square), root);
        assert_eq!(isqrt(square - U512::one()), root - U512::one());
        assert_eq!(isqrt(square + U512::one()), root);
    }
}
