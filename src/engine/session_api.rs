use super::helpers::persist;
use super::Engine;

use async_trait::async_trait;

use crate::{
    api::SessionAPI,
    auth::User,
    entities::{Session, UserType},
    error::{unauthorized_error, Error},
    storage::SESSION_KEY,
};

#[async_trait]
impl SessionAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn login(&self, user_type: UserType, name: Option<String>) -> Result<Session, Error> {
        let mut current = self.session.lock().await;

        let session = Session::new(user_type, name);
        persist(self.store.as_ref(), SESSION_KEY, &session).await?;

        *current = Some(session.clone());

        Ok(session)
    }

    #[tracing::instrument(skip(self))]
    async fn logout(&self) -> Result<(), Error> {
        let mut current = self.session.lock().await;

        self.store.remove(SESSION_KEY).await?;
        *current = None;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn current_session(&self) -> Result<Option<Session>, Error> {
        Ok(self.session.lock().await.clone())
    }

    #[tracing::instrument(skip(self))]
    async fn current_user(&self) -> Result<User, Error> {
        self.session
            .lock()
            .await
            .as_ref()
            .map(User::from)
            .ok_or_else(unauthorized_error)
    }
}

#[test]
fn login_persists_and_logout_clears() {
    use crate::storage::{KvStore, MemoryStore};
    use serde_json::json;
    use std::sync::Arc;
    use tokio_test::block_on;

    let store = Arc::new(MemoryStore::new());
    let engine = block_on(Engine::new(store.clone())).unwrap();

    assert!(block_on(engine.current_user())
        .unwrap_err()
        .is_unauthorized_error());

    block_on(engine.login(UserType::Admin, Some("Admin".into()))).unwrap();

    assert_eq!(
        block_on(store.get(SESSION_KEY)).unwrap(),
        Some(json!({"userType": "admin", "name": "Admin"}))
    );
    assert_eq!(
        block_on(engine.current_user()).unwrap().roles,
        vec!["admin".to_string()]
    );

    block_on(engine.logout()).unwrap();

    assert_eq!(block_on(store.get(SESSION_KEY)).unwrap(), None);
    assert_eq!(block_on(engine.current_session()).unwrap(), None);
}

#[test]
fn session_is_restored_at_startup() {
    use crate::storage::MemoryStore;
    use serde_json::json;
    use std::sync::Arc;
    use tokio_test::block_on;

    let store = Arc::new(MemoryStore::with_entries([(
        SESSION_KEY.to_string(),
        json!({"userType": "customer", "name": "John Doe"}),
    )]));
    let engine = block_on(Engine::new(store)).unwrap();

    assert_eq!(
        block_on(engine.current_session()).unwrap(),
        Some(Session::new(UserType::Customer, Some("John Doe".into())))
    );

    let store = Arc::new(MemoryStore::with_entries([(
        SESSION_KEY.to_string(),
        json!("not a session"),
    )]));
    let engine = block_on(Engine::new(store)).unwrap();

    assert_eq!(block_on(engine.current_session()).unwrap(), None);
}
