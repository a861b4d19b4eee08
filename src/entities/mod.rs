mod bid;
mod locale;
mod notification;
mod request;
mod session;
mod subscription;

pub use bid::{Bid, BidBook, RequestMeta, Winner};
pub use locale::Locale;
pub use notification::{CustomerNotification, NotificationFeed};
pub use request::{Catalog, ServiceRequest};
pub use session::{Session, UserType};
pub use subscription::{
    Status as SubscriptionStatus, Subscription, SubscriptionStats, FREE_BIDS_COUNT,
};
