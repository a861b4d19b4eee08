use super::{Engine, DEMO_CUSTOMER_COUNT};

use async_trait::async_trait;

use crate::{
    api::{AdminAPI, AdminDashboard, RecentBid},
    auth::User,
    error::Error,
};

const RECENT_BIDS: usize = 5;

#[async_trait]
impl AdminAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn dashboard(&self, user: User) -> Result<AdminDashboard, Error> {
        self.authorize(&user, "read_dashboard")?;

        let subscriptions = self.subscription.lock().await.stats();
        let book = self.bids.lock().await;

        let total_paid_to_shops: i64 = self
            .catalog
            .requests()
            .iter()
            .filter_map(|request| book.winning_bid_amount(request.id))
            .fold(0, i64::saturating_add);

        let last_bids: Vec<RecentBid> = book
            .last_bids(RECENT_BIDS)
            .into_iter()
            .map(|(request_id, bid)| RecentBid {
                request_id,
                vehicle: self.catalog.vehicle_label(request_id),
                bid: bid.clone(),
            })
            .collect();

        Ok(AdminDashboard {
            active_body_shops: book.active_body_shop_count(),
            customers: DEMO_CUSTOMER_COUNT,
            total_paid_to_shops,
            subscriptions,
            last_bids,
        })
    }
}

#[test]
fn dashboard_summarizes_marketplace() {
    use crate::api::{BidAPI, PaymentDetails, SubscriptionAPI};
    use crate::entities::UserType;
    use crate::storage::MemoryStore;
    use std::sync::Arc;
    use tokio_test::block_on;

    let engine = block_on(Engine::new(Arc::new(MemoryStore::new()))).unwrap();
    let admin = User::new(UserType::Admin, None);
    let shop = User::new(UserType::Shop, Some("Queens Collision".into()));

    let dashboard = block_on(engine.dashboard(admin.clone())).unwrap();
    assert_eq!(dashboard.active_body_shops, 0);
    assert_eq!(dashboard.customers, 24);
    assert_eq!(dashboard.total_paid_to_shops, 0);
    assert_eq!(dashboard.subscriptions.active_count, 0);
    assert_eq!(dashboard.last_bids.len(), 5);

    let bid = block_on(engine.submit_bid(shop.clone(), 2, 9000, "quick".into())).unwrap();
    block_on(engine.set_winning_bid_amount(admin.clone(), 1, Some(11600))).unwrap();
    block_on(engine.set_winning_bid_amount(admin.clone(), 3, Some(4960))).unwrap();
    block_on(engine.subscribe(
        shop,
        true,
        PaymentDetails {
            card_number: "4242".into(),
            card_expiry: "01/31".into(),
            card_cvc: "999".into(),
            name_on_card: "Queens Collision".into(),
        },
    ))
    .unwrap();

    let dashboard = block_on(engine.dashboard(admin)).unwrap();
    assert_eq!(dashboard.active_body_shops, 1);
    assert_eq!(dashboard.total_paid_to_shops, 16560);
    assert_eq!(dashboard.subscriptions.active_count, 1);
    assert_eq!(dashboard.subscriptions.monthly_revenue, 29);
    assert_eq!(dashboard.last_bids[0].bid, bid);
    assert_eq!(dashboard.last_bids[0].vehicle, "2021 Honda Accord");

    let customer = User::new(UserType::Customer, None);
    assert!(block_on(engine.dashboard(customer))
        .unwrap_err()
        .is_unauthorized_error());
}
