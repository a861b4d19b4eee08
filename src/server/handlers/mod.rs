pub mod admin;
pub mod bids;
pub mod guest;
pub mod locale;
pub mod notifications;
pub mod requests;
pub mod session;
pub mod subscription;
