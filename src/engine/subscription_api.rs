use super::helpers::persist;
use super::{Engine, DEMO_SHOP_NAME};

use async_trait::async_trait;

use crate::{
    api::{PaymentDetails, SubscriptionAPI, SubscriptionOverview},
    auth::User,
    entities::{BidBook, Subscription},
    error::{invalid_input_error, Error},
    storage::SUBSCRIPTION_KEY,
};

fn overview(subscription: &Subscription, book: &BidBook, user: &User) -> SubscriptionOverview {
    let has_won = book.has_won_any_deal(user.shop_name().unwrap_or(DEMO_SHOP_NAME));

    SubscriptionOverview {
        subscription: subscription.clone(),
        status: subscription.status(),
        can_place_bid: subscription.can_place_bid(),
        eligible_for_no_job_discount: subscription.eligible_for_no_job_discount(has_won),
        monthly_price: subscription.monthly_price(has_won),
    }
}

impl PaymentDetails {
    fn is_complete(&self) -> bool {
        [
            &self.card_number,
            &self.card_expiry,
            &self.card_cvc,
            &self.name_on_card,
        ]
        .iter()
        .all(|field| !field.trim().is_empty())
    }
}

#[async_trait]
impl SubscriptionAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn subscription(&self, user: User) -> Result<SubscriptionOverview, Error> {
        self.authorize(&user, "read_subscription")?;

        let subscription = self.subscription.lock().await;
        let book = self.bids.lock().await;

        Ok(overview(&subscription, &book, &user))
    }

    #[tracing::instrument(skip(self, payment))]
    async fn subscribe(
        &self,
        user: User,
        recurring: bool,
        payment: PaymentDetails,
    ) -> Result<SubscriptionOverview, Error> {
        self.authorize(&user, "subscribe")?;

        if !payment.is_complete() {
            return Err(Error {
                message: self.t("fillCardDetails").await,
                ..invalid_input_error()
            });
        }

        let mut subscription = self.subscription.lock().await;

        let mut updated = subscription.clone();
        updated.subscribe(recurring);
        persist(self.store.as_ref(), SUBSCRIPTION_KEY, &updated).await?;
        *subscription = updated;

        tracing::info!(recurring, "shop subscribed");

        let book = self.bids.lock().await;

        Ok(overview(&subscription, &book, &user))
    }
}

#[cfg(test)]
fn card() -> PaymentDetails {
    PaymentDetails {
        card_number: "4242 4242 4242 4242".into(),
        card_expiry: "12/30".into(),
        card_cvc: "123".into(),
        name_on_card: "ABC Body Shop".into(),
    }
}

#[test]
fn fresh_shop_overview() {
    use crate::entities::{SubscriptionStatus, UserType};
    use crate::storage::MemoryStore;
    use std::sync::Arc;
    use tokio_test::block_on;

    let engine = block_on(Engine::new(Arc::new(MemoryStore::new()))).unwrap();
    let shop = User::new(UserType::Shop, None);

    let overview = block_on(engine.subscription(shop)).unwrap();

    assert_eq!(overview.status, SubscriptionStatus::FreeBidsAvailable);
    assert_eq!(overview.subscription.free_bids_remaining, 3);
    assert!(overview.can_place_bid);
    assert!(!overview.eligible_for_no_job_discount);
    assert_eq!(overview.monthly_price, 29);

    let customer = User::new(UserType::Customer, None);
    assert!(block_on(engine.subscription(customer))
        .unwrap_err()
        .is_unauthorized_error());
}

#[test]
fn subscribing_persists_and_unlocks_bidding() {
    use crate::api::BidAPI;
    use crate::entities::{SubscriptionStatus, UserType};
    use crate::storage::MemoryStore;
    use std::sync::Arc;
    use tokio_test::block_on;

    let store = Arc::new(MemoryStore::new());
    let engine = block_on(Engine::new(store.clone())).unwrap();
    let shop = User::new(UserType::Shop, None);

    let overview = block_on(engine.subscribe(shop.clone(), true, card())).unwrap();

    assert_eq!(overview.status, SubscriptionStatus::Subscribed);
    assert!(overview.subscription.recurring);
    assert!(overview.subscription.had_subscription_before);
    assert!(overview.eligible_for_no_job_discount);
    assert_eq!(overview.monthly_price, 15);

    for amount in 0..5 {
        block_on(engine.submit_bid(shop.clone(), 4, 1000 + amount, String::new())).unwrap();
    }

    let restored = block_on(Engine::new(store)).unwrap();
    let overview = block_on(restored.subscription(shop)).unwrap();

    assert!(overview.subscription.is_subscribed);
    assert!(overview.subscription.had_subscription_before);
    assert_eq!(overview.subscription.free_bids_remaining, 3);
}

#[test]
fn winning_a_deal_removes_discount() {
    use crate::api::BidAPI;
    use crate::entities::UserType;
    use crate::storage::MemoryStore;
    use std::sync::Arc;
    use tokio_test::block_on;

    let engine = block_on(Engine::new(Arc::new(MemoryStore::new()))).unwrap();
    let shop = User::new(UserType::Shop, None);
    let admin = User::new(UserType::Admin, None);

    block_on(engine.subscribe(shop.clone(), false, card())).unwrap();
    let bid = block_on(engine.submit_bid(shop.clone(), 2, 8000, String::new())).unwrap();
    block_on(engine.set_winning_bid(admin, 2, bid.id)).unwrap();

    let overview = block_on(engine.subscription(shop)).unwrap();

    assert!(!overview.eligible_for_no_job_discount);
    assert_eq!(overview.monthly_price, 29);
}

#[test]
fn subscribing_requires_card_details() {
    use crate::entities::UserType;
    use crate::storage::MemoryStore;
    use std::sync::Arc;
    use tokio_test::block_on;

    let engine = block_on(Engine::new(Arc::new(MemoryStore::new()))).unwrap();
    let shop = User::new(UserType::Shop, None);

    let payment = PaymentDetails {
        card_cvc: "  ".into(),
        ..card()
    };
    let err = block_on(engine.subscribe(shop.clone(), true, payment)).unwrap_err();

    assert!(err.is_invalid_input_error());
    assert_eq!(err.message, "Please fill in all card details.");

    let overview = block_on(engine.subscription(shop)).unwrap();
    assert!(!overview.subscription.is_subscribed);
}
