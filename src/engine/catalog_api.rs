use super::Engine;

use async_trait::async_trait;

use crate::{
    api::CatalogAPI,
    entities::ServiceRequest,
    error::{not_found_error, Error},
};

impl Engine {
    pub(super) async fn find_request_or_not_found(&self, id: i64) -> Result<&ServiceRequest, Error> {
        match self.catalog.find(id) {
            Some(request) => Ok(request),
            None => Err(Error {
                message: self.t("requestNotFound").await,
                ..not_found_error()
            }),
        }
    }
}

#[async_trait]
impl CatalogAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn list_requests(&self) -> Result<Vec<ServiceRequest>, Error> {
        Ok(self.catalog.requests().to_vec())
    }

    #[tracing::instrument(skip(self))]
    async fn find_request(&self, id: i64) -> Result<ServiceRequest, Error> {
        self.find_request_or_not_found(id).await.cloned()
    }
}

#[test]
fn unknown_request_is_not_found() {
    use crate::storage::MemoryStore;
    use std::sync::Arc;
    use tokio_test::block_on;

    let engine = block_on(Engine::new(Arc::new(MemoryStore::new()))).unwrap();

    assert_eq!(block_on(engine.list_requests()).unwrap().len(), 4);
    assert_eq!(block_on(engine.find_request(2)).unwrap().vehicle, "2021 Honda Accord");

    let err = block_on(engine.find_request(99)).unwrap_err();
    assert!(err.is_not_found_error());
    assert_eq!(err.message, "Request not found.");
}
