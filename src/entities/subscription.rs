use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::pricing::{discounted_price, SUBSCRIPTION_MONTHLY_PRICE};

pub const FREE_BIDS_COUNT: i64 = 3;

/// A body shop's bidding allowance and subscription.
///
/// Shops start with [`FREE_BIDS_COUNT`] free bids. Once those are spent a
/// subscription is required to keep bidding. There is no way back to the
/// unsubscribed state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub free_bids_remaining: i64,
    pub is_subscribed: bool,
    pub recurring: bool,
    /// Sticky once set.
    pub had_subscription_before: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    FreeBidsAvailable,
    FreeBidsExhausted,
    Subscribed,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionStats {
    pub active_count: i64,
    pub monthly_revenue: i64,
}

impl Default for Subscription {
    fn default() -> Self {
        Self {
            free_bids_remaining: FREE_BIDS_COUNT,
            is_subscribed: false,
            recurring: false,
            had_subscription_before: false,
        }
    }
}

impl Subscription {
    /// Rebuilds the state from a persisted blob one field at a time. Fields
    /// that are missing or of the wrong type take their default.
    pub fn from_persisted(value: &Value) -> Self {
        let flag = |name: &str| value.get(name).map_or(false, truthy);

        Self {
            free_bids_remaining: value
                .get("freeBidsRemaining")
                .and_then(Value::as_f64)
                .map(|n| n as i64)
                .unwrap_or(FREE_BIDS_COUNT),
            is_subscribed: flag("isSubscribed"),
            recurring: flag("recurring"),
            had_subscription_before: flag("hadSubscriptionBefore"),
        }
    }

    pub fn status(&self) -> Status {
        match (self.is_subscribed, self.free_bids_remaining > 0) {
            (true, _) => Status::Subscribed,
            (false, true) => Status::FreeBidsAvailable,
            (false, false) => Status::FreeBidsExhausted,
        }
    }

    pub fn can_place_bid(&self) -> bool {
        self.is_subscribed || self.free_bids_remaining > 0
    }

    /// Spends one free bid. Returns whether anything changed.
    ///
    /// Callers invoke this exactly once per bid actually placed; the counter
    /// is not reconciled against the bids themselves.
    pub fn record_bid_placed(&mut self) -> bool {
        if self.is_subscribed || self.free_bids_remaining <= 0 {
            return false;
        }

        self.free_bids_remaining -= 1;
        true
    }

    /// Overwrites any earlier `recurring` choice.
    pub fn subscribe(&mut self, recurring: bool) {
        self.is_subscribed = true;
        self.recurring = recurring;
        self.had_subscription_before = true;
    }

    pub fn eligible_for_no_job_discount(&self, has_won_any_deal: bool) -> bool {
        self.had_subscription_before && !has_won_any_deal
    }

    pub fn monthly_price(&self, has_won_any_deal: bool) -> i64 {
        match self.eligible_for_no_job_discount(has_won_any_deal) {
            true => discounted_price(SUBSCRIPTION_MONTHLY_PRICE),
            false => SUBSCRIPTION_MONTHLY_PRICE,
        }
    }

    pub fn stats(&self) -> SubscriptionStats {
        match self.is_subscribed {
            true => SubscriptionStats {
                active_count: 1,
                monthly_revenue: SUBSCRIPTION_MONTHLY_PRICE,
            },
            false => SubscriptionStats::default(),
        }
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(false, |n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[test]
fn fresh_shop_has_three_free_bids() {
    let mut subscription = Subscription::default();

    assert_eq!(subscription.status(), Status::FreeBidsAvailable);

    for _ in 0..3 {
        assert!(subscription.can_place_bid());
        assert!(subscription.record_bid_placed());
    }

    assert!(!subscription.can_place_bid());
    assert_eq!(subscription.status(), Status::FreeBidsExhausted);

    assert!(!subscription.record_bid_placed());
    assert_eq!(subscription.free_bids_remaining, 0);
}

#[test]
fn subscribed_shop_bids_without_spending() {
    let mut subscription = Subscription::default();
    subscription.subscribe(true);

    assert!(!subscription.record_bid_placed());
    assert_eq!(subscription.free_bids_remaining, FREE_BIDS_COUNT);
    assert!(subscription.can_place_bid());
    assert_eq!(subscription.status(), Status::Subscribed);
}

#[test]
fn subscribe_overwrites_recurring_and_sticks() {
    let mut subscription = Subscription::default();

    subscription.subscribe(true);
    subscription.subscribe(false);

    assert!(subscription.is_subscribed);
    assert!(!subscription.recurring);
    assert!(subscription.had_subscription_before);
}

#[test]
fn no_job_discount() {
    let mut subscription = Subscription::default();

    assert_eq!(subscription.monthly_price(false), 29);

    subscription.subscribe(false);

    assert!(subscription.eligible_for_no_job_discount(false));
    assert!(!subscription.eligible_for_no_job_discount(true));
    assert_eq!(subscription.monthly_price(false), 15);
    assert_eq!(subscription.monthly_price(true), 29);
}

#[test]
fn stats_count_active_subscription() {
    let mut subscription = Subscription::default();
    assert_eq!(subscription.stats(), SubscriptionStats::default());

    subscription.subscribe(true);
    assert_eq!(
        subscription.stats(),
        SubscriptionStats {
            active_count: 1,
            monthly_revenue: 29
        }
    );
}

#[test]
fn rehydrates_field_by_field() {
    use serde_json::json;

    let restored = Subscription::from_persisted(&json!({
        "freeBidsRemaining": "two",
        "isSubscribed": 1,
        "hadSubscriptionBefore": "yes",
    }));

    assert_eq!(
        restored,
        Subscription {
            free_bids_remaining: FREE_BIDS_COUNT,
            is_subscribed: true,
            recurring: false,
            had_subscription_before: true,
        }
    );

    assert_eq!(
        Subscription::from_persisted(&json!("garbage")),
        Subscription::default()
    );

    let saved = Subscription {
        free_bids_remaining: 1,
        is_subscribed: false,
        recurring: true,
        had_subscription_before: false,
    };
    let value = serde_json::to_value(&saved).unwrap();

    assert_eq!(value["freeBidsRemaining"], json!(1));
    assert_eq!(Subscription::from_persisted(&value), saved);
}
