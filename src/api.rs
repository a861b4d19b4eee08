use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::User;
use crate::entities::{
    Bid, CustomerNotification, Locale, ServiceRequest, Session, Subscription,
    SubscriptionStats, SubscriptionStatus, UserType, Winner,
};
use crate::error::Error;
use crate::pricing::Standing;

/// A bid together with what the customer would pay for it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedBid {
    #[serde(flatten)]
    pub bid: Bid,
    pub customer_price: i64,
}

/// Everything the admin curates on one request. Bids are sorted by amount.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestBids {
    pub request_id: i64,
    pub bids: Vec<PricedBid>,
    pub visible_bid_ids: Vec<String>,
    pub winning: Option<Winner>,
}

/// An offer as the customer sees it: no shop, only the customer price.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub id: String,
    pub note: String,
    pub price: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerOffers {
    pub request_id: i64,
    /// Cheapest first.
    pub offers: Vec<Offer>,
    pub best_price: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionOverview {
    pub subscription: Subscription,
    pub status: SubscriptionStatus,
    pub can_place_bid: bool,
    pub eligible_for_no_job_discount: bool,
    pub monthly_price: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDetails {
    pub card_number: String,
    pub card_expiry: String,
    pub card_cvc: String,
    pub name_on_card: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationInbox {
    pub notifications: Vec<CustomerNotification>,
    pub unread_count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentBid {
    pub request_id: i64,
    pub vehicle: String,
    #[serde(flatten)]
    pub bid: Bid,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminDashboard {
    pub active_body_shops: usize,
    pub customers: usize,
    pub total_paid_to_shops: i64,
    pub subscriptions: SubscriptionStats,
    pub last_bids: Vec<RecentBid>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestRequestReceipt {
    pub email: String,
    pub message: String,
}

#[async_trait]
pub trait SessionAPI {
    async fn login(&self, user_type: UserType, name: Option<String>) -> Result<Session, Error>;
    async fn logout(&self) -> Result<(), Error>;
    async fn current_session(&self) -> Result<Option<Session>, Error>;
    /// Unauthorized when nobody is logged in.
    async fn current_user(&self) -> Result<User, Error>;
}

#[async_trait]
pub trait LocaleAPI {
    async fn locale(&self) -> Result<Locale, Error>;
    async fn set_locale(&self, locale: Locale) -> Result<Locale, Error>;
    async fn translate(&self, key: &str) -> Result<String, Error>;
}

#[async_trait]
pub trait CatalogAPI {
    async fn list_requests(&self) -> Result<Vec<ServiceRequest>, Error>;
    async fn find_request(&self, id: i64) -> Result<ServiceRequest, Error>;
}

#[async_trait]
pub trait BidAPI {
    async fn submit_bid(
        &self,
        user: User,
        request_id: i64,
        amount: i64,
        note: String,
    ) -> Result<Bid, Error>;

    async fn list_bids(&self, user: User, request_id: i64) -> Result<RequestBids, Error>;

    async fn customer_offers(&self, user: User, request_id: i64) -> Result<CustomerOffers, Error>;

    async fn release_bids(
        &self,
        user: User,
        request_id: i64,
        bid_ids: Vec<String>,
    ) -> Result<RequestBids, Error>;

    async fn set_bids_visible(
        &self,
        user: User,
        request_id: i64,
        visible: bool,
    ) -> Result<RequestBids, Error>;

    async fn set_winning_bid_amount(
        &self,
        user: User,
        request_id: i64,
        amount: Option<i64>,
    ) -> Result<Option<Winner>, Error>;

    async fn set_winning_bid(
        &self,
        user: User,
        request_id: i64,
        bid_id: String,
    ) -> Result<Winner, Error>;

    async fn winning_bid_amount(&self, user: User, request_id: i64) -> Result<Option<i64>, Error>;

    async fn bid_standing(
        &self,
        user: User,
        request_id: i64,
        my_bid: i64,
    ) -> Result<Option<Standing>, Error>;
}

#[async_trait]
pub trait SubscriptionAPI {
    async fn subscription(&self, user: User) -> Result<SubscriptionOverview, Error>;

    async fn subscribe(
        &self,
        user: User,
        recurring: bool,
        payment: PaymentDetails,
    ) -> Result<SubscriptionOverview, Error>;
}

#[async_trait]
pub trait NotificationAPI {
    async fn notifications(&self, user: User) -> Result<NotificationInbox, Error>;
    async fn mark_notification_read(&self, user: User, id: Uuid) -> Result<NotificationInbox, Error>;
    async fn mark_all_notifications_read(&self, user: User) -> Result<NotificationInbox, Error>;
}

#[async_trait]
pub trait AdminAPI {
    async fn dashboard(&self, user: User) -> Result<AdminDashboard, Error>;
}

#[async_trait]
pub trait GuestAPI {
    async fn submit_guest_request(&self, email: String) -> Result<GuestRequestReceipt, Error>;
}

pub trait API:
    SessionAPI
    + LocaleAPI
    + CatalogAPI
    + BidAPI
    + SubscriptionAPI
    + NotificationAPI
    + AdminAPI
    + GuestAPI
{
}
