//! Platform pricing rules.
//!
//! A body shop's bid is the amount the shop receives. The customer is shown a
//! grossed-up price so that the platform keeps exactly [`COMMISSION_RATE`] of
//! what the customer pays.

use serde::{Deserialize, Serialize};

/// Fraction of the customer price retained by the platform.
pub const COMMISSION_RATE: f64 = 0.20;

/// Discount offered to shops that subscribed before but never won a job.
pub const NO_JOB_DISCOUNT_RATE: f64 = 0.5;

/// Monthly subscription price, in whole currency units.
pub const SUBSCRIPTION_MONTHLY_PRICE: i64 = 29;

const COMMISSION_PERCENT: i128 = 20;
const NO_JOB_DISCOUNT_PERCENT: i128 = 50;

/// Price shown to the customer for a bid of `shop_amount`:
/// `round(shop_amount / (1 - COMMISSION_RATE))`, halves rounded up.
pub fn customer_price(shop_amount: i64) -> i64 {
    div_round_half_up(i128::from(shop_amount) * 100, 100 - COMMISSION_PERCENT)
}

/// `round(base_price * (1 - NO_JOB_DISCOUNT_RATE))`, halves rounded up.
pub fn discounted_price(base_price: i64) -> i64 {
    div_round_half_up(i128::from(base_price) * (100 - NO_JOB_DISCOUNT_PERCENT), 100)
}

// floor(n / d + 1/2), exact in i128 and saturated back into i64
fn div_round_half_up(numerator: i128, denominator: i128) -> i64 {
    let rounded = (2 * numerator + denominator).div_euclid(2 * denominator);

    i64::try_from(rounded).unwrap_or(if rounded < 0 { i64::MIN } else { i64::MAX })
}

/// Where a shop's own bid stands against the amount the admin marked as winning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum Standing {
    Won,
    Above { percent: i64 },
    Below,
}

/// Bids within half a percent of the winning amount count as the winner.
pub fn compare_to_winning(my_bid: i64, winning: i64) -> Option<Standing> {
    if winning == 0 {
        return None;
    }

    let pct_above = (i128::from(my_bid) - i128::from(winning)) as f64 / winning as f64 * 100.0;

    if pct_above.abs() < 0.5 {
        return Some(Standing::Won);
    }

    if pct_above > 0.0 {
        return Some(Standing::Above {
            percent: pct_above.round() as i64,
        });
    }

    Some(Standing::Below)
}

#[test]
fn customer_price_grosses_up_by_commission() {
    assert_eq!(customer_price(11600), 14500);
    assert_eq!(customer_price(4960), 6200);
    assert_eq!(customer_price(0), 0);

    for amount in [1, 7, 99, 1234, 12960, 5681] {
        let expected = (amount as f64 / (1.0 - COMMISSION_RATE)).round() as i64;
        assert_eq!(customer_price(amount), expected, "amount {}", amount);
    }
}

#[test]
fn customer_price_rounds_halves_up() {
    // 2 / 0.8 = 2.5
    assert_eq!(customer_price(2), 3);
    // 6 / 0.8 = 7.5
    assert_eq!(customer_price(6), 8);
}

#[test]
fn discounted_price_halves_subscription() {
    assert_eq!(discounted_price(SUBSCRIPTION_MONTHLY_PRICE), 15);
    assert_eq!(discounted_price(30), 15);
}

#[test]
fn standing_against_winning_bid() {
    assert_eq!(compare_to_winning(11600, 11600), Some(Standing::Won));
    assert_eq!(compare_to_winning(11640, 11600), Some(Standing::Won));
    assert_eq!(
        compare_to_winning(12960, 11600),
        Some(Standing::Above { percent: 12 })
    );
    assert_eq!(compare_to_winning(11000, 11600), Some(Standing::Below));
    assert_eq!(compare_to_winning(100, 0), None);
}

#[test]
fn pricing_survives_extreme_amounts() {
    let large = i64::MAX / 100;
    let expected = (i128::from(large) * 100 * 2 + 80).div_euclid(160) as i64;

    assert_eq!(customer_price(large), expected);
    assert_eq!(customer_price(i64::MAX), i64::MAX);
    assert_eq!(customer_price(i64::MIN), i64::MIN);
    assert_eq!(discounted_price(i64::MIN), i64::MIN / 2);
    assert_eq!(discounted_price(i64::MAX), i64::MAX / 2 + 1);

    assert_eq!(compare_to_winning(i64::MAX, -1), Some(Standing::Below));
    assert_eq!(
        compare_to_winning(i64::MIN, 1),
        Some(Standing::Below)
    );
    assert_eq!(
        compare_to_winning(i64::MAX, 1),
        Some(Standing::Above { percent: i64::MAX })
    );
}
