use super::helpers::is_valid_email;
use super::Engine;

use async_trait::async_trait;

use crate::{
    api::{GuestAPI, GuestRequestReceipt},
    error::{invalid_input_error, Error},
};

#[async_trait]
impl GuestAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn submit_guest_request(&self, email: String) -> Result<GuestRequestReceipt, Error> {
        let email = email.trim();

        if email.is_empty() {
            return Err(Error {
                message: self.t("enterEmail").await,
                ..invalid_input_error()
            });
        }

        if !is_valid_email(email) {
            return Err(Error {
                message: self.t("invalidEmail").await,
                ..invalid_input_error()
            });
        }

        tracing::info!(email, "guest request submitted");

        Ok(GuestRequestReceipt {
            email: email.to_string(),
            message: self.t("requestSubmittedSuccess").await,
        })
    }
}

#[test]
fn guest_request_checks_email() {
    use crate::api::LocaleAPI;
    use crate::entities::Locale;
    use crate::storage::MemoryStore;
    use std::sync::Arc;
    use tokio_test::block_on;

    let engine = block_on(Engine::new(Arc::new(MemoryStore::new()))).unwrap();

    let err = block_on(engine.submit_guest_request("   ".into())).unwrap_err();
    assert!(err.is_invalid_input_error());
    assert_eq!(err.message, "Please enter your email address.");

    let err = block_on(engine.submit_guest_request("john@example".into())).unwrap_err();
    assert_eq!(err.message, "Please enter a valid email address.");

    let receipt = block_on(engine.submit_guest_request(" john@example.com ".into())).unwrap();
    assert_eq!(receipt.email, "john@example.com");
    assert_eq!(receipt.message, "Your request has been submitted.");

    block_on(engine.set_locale(Locale::Es)).unwrap();
    let err = block_on(engine.submit_guest_request("nope".into())).unwrap_err();
    assert_eq!(err.message, "Introduce un correo electrónico válido.");
}
