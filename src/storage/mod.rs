//! Durable string-keyed JSON blobs.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Error;

pub const SESSION_KEY: &str = "collision_collect_user";
pub const LOCALE_KEY: &str = "collision_collect_locale";
pub const SUBSCRIPTION_KEY: &str = "collisioncollect-shop-subscription";

#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, Error>;
    async fn put(&self, key: &str, value: Value) -> Result<(), Error>;
    async fn remove(&self, key: &str) -> Result<(), Error>;
}
