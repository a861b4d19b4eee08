use async_trait::async_trait;
use serde_json::Value;
use sqlx::{postgres::PgPoolOptions, types::Json, Executor, Pool, Postgres, Row};

use super::KvStore;
use crate::error::Error;

#[derive(Debug)]
pub struct PgStore {
    pool: Pool<Postgres>,
}

impl PgStore {
    #[tracing::instrument(name = "PgStore::new", skip(db_uri))]
    pub async fn new(db_uri: &str, max_connections: u32) -> Result<Self, Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(db_uri)
            .await?;

        pool.execute("CREATE TABLE IF NOT EXISTS kv (key VARCHAR PRIMARY KEY, data JSONB NOT NULL)")
            .await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl KvStore for PgStore {
    #[tracing::instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<Value>, Error> {
        let mut conn = self.pool.acquire().await?;

        let maybe_result = conn
            .fetch_optional(sqlx::query("SELECT data FROM kv WHERE key = $1").bind(key))
            .await?;

        match maybe_result {
            Some(result) => {
                let Json(value): Json<Value> = result.try_get("data")?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    #[tracing::instrument(skip(self, value))]
    async fn put(&self, key: &str, value: Value) -> Result<(), Error> {
        let mut conn = self.pool.acquire().await?;

        conn.execute(
            sqlx::query(
                "INSERT INTO kv (key, data) VALUES ($1, $2) ON CONFLICT (key) DO UPDATE SET data = EXCLUDED.data",
            )
            .bind(key)
            .bind(Json(value)),
        )
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn remove(&self, key: &str) -> Result<(), Error> {
        let mut conn = self.pool.acquire().await?;

        conn.execute(sqlx::query("DELETE FROM kv WHERE key = $1").bind(key))
            .await?;

        Ok(())
    }
}
