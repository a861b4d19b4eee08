use super::helpers::persist;
use super::Engine;

use async_trait::async_trait;

use crate::{api::LocaleAPI, entities::Locale, error::Error, i18n, storage::LOCALE_KEY};

impl Engine {
    /// Translation in the current locale.
    pub(super) async fn t(&self, key: &str) -> String {
        i18n::t(*self.locale.lock().await, key)
    }
}

#[async_trait]
impl LocaleAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn locale(&self) -> Result<Locale, Error> {
        Ok(*self.locale.lock().await)
    }

    #[tracing::instrument(skip(self))]
    async fn set_locale(&self, locale: Locale) -> Result<Locale, Error> {
        let mut current = self.locale.lock().await;

        persist(self.store.as_ref(), LOCALE_KEY, &locale).await?;
        *current = locale;

        Ok(locale)
    }

    #[tracing::instrument(skip(self))]
    async fn translate(&self, key: &str) -> Result<String, Error> {
        Ok(self.t(key).await)
    }
}

#[test]
fn locale_switch_is_persisted() {
    use crate::storage::{KvStore, MemoryStore};
    use serde_json::json;
    use std::sync::Arc;
    use tokio_test::block_on;

    let store = Arc::new(MemoryStore::new());
    let engine = block_on(Engine::new(store.clone())).unwrap();

    assert_eq!(block_on(engine.locale()).unwrap(), Locale::En);
    assert_eq!(block_on(engine.translate("language")).unwrap(), "Language");

    block_on(engine.set_locale(Locale::Es)).unwrap();

    assert_eq!(block_on(store.get(LOCALE_KEY)).unwrap(), Some(json!("es")));
    assert_eq!(block_on(engine.translate("language")).unwrap(), "Idioma");

    let restored = block_on(Engine::new(store)).unwrap();
    assert_eq!(block_on(restored.locale()).unwrap(), Locale::Es);
}
