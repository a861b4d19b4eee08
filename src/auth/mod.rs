pub mod authorizor;
mod marketplace;
mod user;

pub use marketplace::Marketplace;
pub use user::User;
