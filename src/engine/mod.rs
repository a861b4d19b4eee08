mod admin_api;
mod bid_api;
mod catalog_api;
mod guest_api;
mod helpers;
mod locale_api;
mod notification_api;
mod session_api;
mod subscription_api;

use std::sync::Arc;

use oso::Oso;
use tokio::sync::Mutex;

use crate::{
    api::API,
    auth::{authorizor, Marketplace, User},
    entities::{BidBook, Catalog, Locale, NotificationFeed, Session, Subscription},
    error::{unauthorized_error, Error},
    storage::{KvStore, LOCALE_KEY, SESSION_KEY, SUBSCRIPTION_KEY},
};

/// Shop name used for bids placed from a session that carries no name.
pub const DEMO_SHOP_NAME: &str = "ABC Body Shop";

/// Customer count shown on the admin dashboard.
pub const DEMO_CUSTOMER_COUNT: usize = 24;

/// Owns every store of the marketplace.
///
/// Locks are always taken in the order subscription, bids, notifications.
pub struct Engine {
    store: Arc<dyn KvStore>,
    authorizor: Oso,
    catalog: Catalog,
    session: Mutex<Option<Session>>,
    locale: Mutex<Locale>,
    subscription: Mutex<Subscription>,
    bids: Mutex<BidBook>,
    notifications: Mutex<NotificationFeed>,
}

impl Engine {
    /// Engine over the demo catalog and seeded bids, restoring session,
    /// locale and subscription from `store`.
    pub async fn new(store: Arc<dyn KvStore>) -> Result<Self, Error> {
        Self::with_data(store, Catalog::demo(), BidBook::seeded()).await
    }

    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub async fn with_data(
        store: Arc<dyn KvStore>,
        catalog: Catalog,
        bids: BidBook,
    ) -> Result<Self, Error> {
        let session = match store.get(SESSION_KEY).await? {
            Some(value) => {
                let session = Session::from_persisted(value);
                if session.is_none() {
                    tracing::warn!("discarding malformed persisted session");
                }
                session
            }
            None => None,
        };

        let locale = store
            .get(LOCALE_KEY)
            .await?
            .map(|value| Locale::from_persisted(&value))
            .unwrap_or_default();

        let subscription = store
            .get(SUBSCRIPTION_KEY)
            .await?
            .map(|value| Subscription::from_persisted(&value))
            .unwrap_or_default();

        tracing::info!(
            logged_in = session.is_some(),
            locale = locale.code(),
            free_bids_remaining = subscription.free_bids_remaining,
            is_subscribed = subscription.is_subscribed,
            "restored persisted state"
        );

        Ok(Self {
            store,
            authorizor: authorizor::new()?,
            catalog,
            session: Mutex::new(session),
            locale: Mutex::new(locale),
            subscription: Mutex::new(subscription),
            bids: Mutex::new(bids),
            notifications: Mutex::new(NotificationFeed::new()),
        })
    }
}

impl Engine {
    pub fn authorize(&self, user: &User, action: &str) -> Result<(), Error> {
        if self
            .authorizor
            .is_allowed(user.clone(), action, Marketplace::collision_collect())?
        {
            return Ok(());
        }

        tracing::info!(roles = ?user.roles, action, "denied");
        Err(unauthorized_error())
    }
}

impl API for Engine {}
