use super::helpers::{persist, request_bids};
use super::{Engine, DEMO_SHOP_NAME};

use async_trait::async_trait;

use crate::{
    api::{BidAPI, CustomerOffers, Offer, RequestBids},
    auth::User,
    entities::{Bid, BidBook, Winner},
    error::{subscription_required_error, Error},
    pricing::{compare_to_winning, customer_price, Standing},
    storage::SUBSCRIPTION_KEY,
};

impl Engine {
    /// Tells the customer how many offers are now visible, if any.
    async fn notify_released(&self, book: &BidBook, request_id: i64) {
        let released = book.visible_bid_ids(request_id).len();
        if released == 0 {
            return;
        }

        let vehicle = self.catalog.vehicle_label(request_id);

        self.notifications
            .lock()
            .await
            .add_notification(request_id, vehicle, released);

        tracing::info!(request_id, released, "offers released to customer");
    }
}

#[async_trait]
impl BidAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn submit_bid(
        &self,
        user: User,
        request_id: i64,
        amount: i64,
        note: String,
    ) -> Result<Bid, Error> {
        self.authorize(&user, "place_bid")?;
        self.find_request_or_not_found(request_id).await?;

        let mut subscription = self.subscription.lock().await;

        if !subscription.can_place_bid() {
            tracing::info!(request_id, "free bids exhausted, subscription required");
            return Err(Error {
                message: self.t("subscribeToPlaceMore").await,
                ..subscription_required_error()
            });
        }

        let mut updated = subscription.clone();
        if updated.record_bid_placed() {
            persist(self.store.as_ref(), SUBSCRIPTION_KEY, &updated).await?;
        }
        *subscription = updated;

        let shop_name = user.shop_name().unwrap_or(DEMO_SHOP_NAME).to_string();
        let bid = self
            .bids
            .lock()
            .await
            .add_bid(request_id, amount, note, Some(shop_name))
            .clone();

        tracing::info!(
            request_id,
            bid_id = %bid.id,
            free_bids_remaining = subscription.free_bids_remaining,
            "bid placed"
        );

        Ok(bid)
    }

    #[tracing::instrument(skip(self))]
    async fn list_bids(&self, user: User, request_id: i64) -> Result<RequestBids, Error> {
        self.authorize(&user, "read_bids")?;
        self.find_request_or_not_found(request_id).await?;

        let book = self.bids.lock().await;

        Ok(request_bids(&book, request_id))
    }

    #[tracing::instrument(skip(self))]
    async fn customer_offers(&self, user: User, request_id: i64) -> Result<CustomerOffers, Error> {
        self.authorize(&user, "read_offers")?;
        self.find_request_or_not_found(request_id).await?;

        let book = self.bids.lock().await;

        let mut offers: Vec<Offer> = book
            .visible_bids(request_id)
            .into_iter()
            .map(|bid| Offer {
                id: bid.id.clone(),
                note: bid.note.clone(),
                price: customer_price(bid.amount),
            })
            .collect();
        offers.sort_by_key(|offer| offer.price);

        let mut feed = self.notifications.lock().await;
        let unread: Vec<_> = feed
            .for_request(request_id)
            .filter(|notification| !notification.read)
            .map(|notification| notification.id)
            .collect();
        for id in unread {
            feed.mark_as_read(id);
        }

        Ok(CustomerOffers {
            request_id,
            best_price: offers.first().map(|offer| offer.price),
            offers,
        })
    }

    #[tracing::instrument(skip(self))]
    async fn release_bids(
        &self,
        user: User,
        request_id: i64,
        bid_ids: Vec<String>,
    ) -> Result<RequestBids, Error> {
        self.authorize(&user, "release_bids")?;
        self.find_request_or_not_found(request_id).await?;

        let mut book = self.bids.lock().await;

        book.set_visible_bid_ids(request_id, bid_ids)?;
        self.notify_released(&book, request_id).await;

        Ok(request_bids(&book, request_id))
    }

    #[tracing::instrument(skip(self))]
    async fn set_bids_visible(
        &self,
        user: User,
        request_id: i64,
        visible: bool,
    ) -> Result<RequestBids, Error> {
        self.authorize(&user, "release_bids")?;
        self.find_request_or_not_found(request_id).await?;

        let mut book = self.bids.lock().await;

        book.set_bids_visible_to_customer(request_id, visible);
        self.notify_released(&book, request_id).await;

        Ok(request_bids(&book, request_id))
    }

    #[tracing::instrument(skip(self))]
    async fn set_winning_bid_amount(
        &self,
        user: User,
        request_id: i64,
        amount: Option<i64>,
    ) -> Result<Option<Winner>, Error> {
        self.authorize(&user, "close_deal")?;
        self.find_request_or_not_found(request_id).await?;

        let mut book = self.bids.lock().await;
        book.set_winning_bid_amount(request_id, amount);

        let winner = book.winner(request_id).cloned();
        tracing::info!(request_id, ?winner, "winning bid amount set");

        Ok(winner)
    }

    #[tracing::instrument(skip(self))]
    async fn set_winning_bid(
        &self,
        user: User,
        request_id: i64,
        bid_id: String,
    ) -> Result<Winner, Error> {
        self.authorize(&user, "close_deal")?;
        self.find_request_or_not_found(request_id).await?;

        let mut book = self.bids.lock().await;
        let winner = book.set_winning_bid(request_id, &bid_id)?.clone();

        tracing::info!(request_id, ?winner, "winning bid set");

        Ok(winner)
    }

    #[tracing::instrument(skip(self))]
    async fn winning_bid_amount(&self, user: User, request_id: i64) -> Result<Option<i64>, Error> {
        self.authorize(&user, "read_standing")?;
        self.find_request_or_not_found(request_id).await?;

        Ok(self.bids.lock().await.winning_bid_amount(request_id))
    }

    #[tracing::instrument(skip(self))]
    async fn bid_standing(
        &self,
        user: User,
        request_id: i64,
        my_bid: i64,
    ) -> Result<Option<Standing>, Error> {
        self.authorize(&user, "read_standing")?;
        self.find_request_or_not_found(request_id).await?;

        let winning = self.bids.lock().await.winning_bid_amount(request_id);

        Ok(winning.and_then(|winning| compare_to_winning(my_bid, winning)))
    }
}

#[cfg(test)]
fn engine_as(user_type: crate::entities::UserType) -> (Engine, User) {
    use crate::storage::MemoryStore;
    use std::sync::Arc;
    use tokio_test::block_on;

    let engine = block_on(Engine::new(Arc::new(MemoryStore::new()))).unwrap();
    let user = User::new(user_type, None);

    (engine, user)
}

#[test]
fn shop_spends_free_bids_then_needs_subscription() {
    use crate::api::SubscriptionAPI;
    use crate::entities::UserType;
    use crate::storage::{KvStore, MemoryStore};
    use serde_json::json;
    use std::sync::Arc;
    use tokio_test::block_on;

    let store = Arc::new(MemoryStore::new());
    let engine = block_on(Engine::new(store.clone())).unwrap();
    let shop = User::new(UserType::Shop, None);

    for amount in [9000, 9100, 9200] {
        let bid = block_on(engine.submit_bid(shop.clone(), 2, amount, String::new())).unwrap();
        assert_eq!(bid.shop_name.as_deref(), Some(DEMO_SHOP_NAME));
    }

    let err = block_on(engine.submit_bid(shop.clone(), 2, 9300, String::new())).unwrap_err();
    assert!(err.is_subscription_required_error());

    let persisted = block_on(store.get(SUBSCRIPTION_KEY)).unwrap().unwrap();
    assert_eq!(persisted["freeBidsRemaining"], json!(0));

    let overview = block_on(engine.subscription(shop.clone())).unwrap();
    assert!(!overview.can_place_bid);

    let admin = User::new(UserType::Admin, None);
    assert_eq!(block_on(engine.list_bids(admin, 2)).unwrap().bids.len(), 3);
}

#[test]
fn bids_are_role_gated() {
    use crate::entities::UserType;
    use tokio_test::block_on;

    let (engine, customer) = engine_as(UserType::Customer);

    assert!(block_on(engine.submit_bid(customer.clone(), 1, 100, String::new()))
        .unwrap_err()
        .is_unauthorized_error());
    assert!(block_on(engine.list_bids(customer.clone(), 1))
        .unwrap_err()
        .is_unauthorized_error());
    assert!(block_on(engine.release_bids(customer, 1, vec![]))
        .unwrap_err()
        .is_unauthorized_error());
}

#[test]
fn bids_on_unknown_request_are_not_found() {
    use crate::entities::UserType;
    use tokio_test::block_on;

    let (engine, shop) = engine_as(UserType::Shop);

    let err = block_on(engine.submit_bid(shop, 99, 100, String::new())).unwrap_err();
    assert!(err.is_not_found_error());
}

#[test]
fn releasing_bids_notifies_customer() {
    use crate::api::NotificationAPI;
    use crate::entities::UserType;
    use tokio_test::block_on;

    let (engine, admin) = engine_as(UserType::Admin);
    let customer = User::new(UserType::Customer, Some("John Doe".into()));

    let view = block_on(engine.release_bids(
        admin.clone(),
        1,
        vec!["1-c".into(), "1-a".into()],
    ))
    .unwrap();
    assert_eq!(view.visible_bid_ids, ["1-c".to_string(), "1-a".to_string()]);

    let inbox = block_on(engine.notifications(customer.clone())).unwrap();
    assert_eq!(inbox.unread_count, 1);
    assert_eq!(inbox.notifications[0].vehicle_name, "2022 Toyota Camry");
    assert_eq!(
        inbox.notifications[0].message,
        "2 new offers are available to view."
    );

    block_on(engine.release_bids(admin.clone(), 1, vec![])).unwrap();
    let inbox = block_on(engine.notifications(customer.clone())).unwrap();
    assert_eq!(inbox.notifications.len(), 1);

    let err = block_on(engine.release_bids(admin, 1, vec!["1-zz".into()])).unwrap_err();
    assert!(err.is_invalid_input_error());
}

#[test]
fn customer_sees_released_offers_at_customer_price() {
    use crate::api::NotificationAPI;
    use crate::entities::UserType;
    use tokio_test::block_on;

    let (engine, admin) = engine_as(UserType::Admin);
    let customer = User::new(UserType::Customer, None);

    let offers = block_on(engine.customer_offers(customer.clone(), 1)).unwrap();
    assert!(offers.offers.is_empty());
    assert_eq!(offers.best_price, None);

    block_on(engine.release_bids(admin, 1, vec!["1-b".into(), "1-a".into()])).unwrap();

    let offers = block_on(engine.customer_offers(customer.clone(), 1)).unwrap();
    let prices: Vec<i64> = offers.offers.iter().map(|offer| offer.price).collect();

    assert_eq!(prices, [14500, 15200]);
    assert_eq!(offers.best_price, Some(14500));

    let inbox = block_on(engine.notifications(customer)).unwrap();
    assert_eq!(inbox.unread_count, 0);
}

#[test]
fn show_all_then_new_bid_stays_hidden() {
    use crate::entities::UserType;
    use tokio_test::block_on;

    let (engine, admin) = engine_as(UserType::Admin);
    let shop = User::new(UserType::Shop, Some("Queens Collision".into()));
    let customer = User::new(UserType::Customer, None);

    block_on(engine.set_bids_visible(admin.clone(), 3, true)).unwrap();
    block_on(engine.submit_bid(shop, 3, 4000, "late".into())).unwrap();

    let offers = block_on(engine.customer_offers(customer, 3)).unwrap();
    assert_eq!(offers.offers.len(), 8);
    assert_eq!(offers.best_price, Some(6200));

    let view = block_on(engine.list_bids(admin, 3)).unwrap();
    assert_eq!(view.bids.len(), 9);
    assert_eq!(view.bids[0].bid.shop_name.as_deref(), Some("Queens Collision"));
}

#[test]
fn shop_standing_against_winner() {
    use crate::entities::UserType;
    use tokio_test::block_on;

    let (engine, admin) = engine_as(UserType::Admin);
    let shop = User::new(UserType::Shop, None);

    assert_eq!(block_on(engine.bid_standing(shop.clone(), 1, 12960)).unwrap(), None);

    let winner = block_on(engine.set_winning_bid_amount(admin.clone(), 1, Some(11600)))
        .unwrap()
        .unwrap();
    assert_eq!(winner.bid_id.as_deref(), Some("1-a"));
    assert_eq!(
        block_on(engine.winning_bid_amount(shop.clone(), 1)).unwrap(),
        Some(11600)
    );

    assert_eq!(
        block_on(engine.bid_standing(shop.clone(), 1, 12960)).unwrap(),
        Some(Standing::Above { percent: 12 })
    );
    assert_eq!(
        block_on(engine.bid_standing(shop.clone(), 1, 11600)).unwrap(),
        Some(Standing::Won)
    );

    let winner = block_on(engine.set_winning_bid(admin.clone(), 1, "1-c".into())).unwrap();
    assert_eq!(winner.amount, 11840);

    assert_eq!(
        block_on(engine.set_winning_bid_amount(admin, 1, None)).unwrap(),
        None
    );
    assert_eq!(block_on(engine.bid_standing(shop, 1, 12960)).unwrap(), None);
}

#[cfg(test)]
struct ReadOnlyStore;

#[cfg(test)]
#[async_trait]
impl crate::storage::KvStore for ReadOnlyStore {
    async fn get(&self, _key: &str) -> Result<Option<serde_json::Value>, Error> {
        Ok(None)
    }

    async fn put(&self, key: &str, _value: serde_json::Value) -> Result<(), Error> {
        Err(crate::error::database_error(format!("{} is read-only", key)))
    }

    async fn remove(&self, _key: &str) -> Result<(), Error> {
        Ok(())
    }
}

#[test]
fn failed_save_keeps_free_bid_and_drops_bid() {
    use crate::api::SubscriptionAPI;
    use crate::entities::UserType;
    use std::sync::Arc;
    use tokio_test::block_on;

    let engine = block_on(Engine::new(Arc::new(ReadOnlyStore))).unwrap();
    let shop = User::new(UserType::Shop, None);
    let admin = User::new(UserType::Admin, None);

    let err = block_on(engine.submit_bid(shop.clone(), 2, 9000, String::new())).unwrap_err();
    assert_eq!(err.code, 2);

    let overview = block_on(engine.subscription(shop)).unwrap();
    assert_eq!(overview.subscription.free_bids_remaining, 3);
    assert!(block_on(engine.list_bids(admin, 2)).unwrap().bids.is_empty());
}
