use std::sync::Arc;

use collision_collect::config::Config;
use collision_collect::engine::Engine;
use collision_collect::error::Error;
use collision_collect::server::serve;
use collision_collect::storage::{KvStore, MemoryStore, PgStore};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;

    let store: Arc<dyn KvStore> = match &config.database_url {
        Some(url) => Arc::new(PgStore::new(url, config.database_max_connections).await?),
        None => {
            tracing::warn!("DATABASE_URL not set, keeping state in memory");
            Arc::new(MemoryStore::new())
        }
    };

    let engine = Engine::new(store).await?;

    serve(engine, config.bind_addr).await
}
