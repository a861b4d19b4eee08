use super::helpers::inbox;
use super::Engine;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    api::{NotificationAPI, NotificationInbox},
    auth::User,
    error::{not_found_error, Error},
};

#[async_trait]
impl NotificationAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn notifications(&self, user: User) -> Result<NotificationInbox, Error> {
        self.authorize(&user, "read_notifications")?;

        let feed = self.notifications.lock().await;

        Ok(inbox(&feed))
    }

    #[tracing::instrument(skip(self))]
    async fn mark_notification_read(
        &self,
        user: User,
        id: Uuid,
    ) -> Result<NotificationInbox, Error> {
        self.authorize(&user, "update_notifications")?;

        let mut feed = self.notifications.lock().await;

        if !feed.mark_as_read(id) {
            return Err(not_found_error());
        }

        Ok(inbox(&feed))
    }

    #[tracing::instrument(skip(self))]
    async fn mark_all_notifications_read(&self, user: User) -> Result<NotificationInbox, Error> {
        self.authorize(&user, "update_notifications")?;

        let mut feed = self.notifications.lock().await;
        feed.mark_all_as_read();

        Ok(inbox(&feed))
    }
}

#[test]
fn customer_reads_notifications() {
    use crate::api::BidAPI;
    use crate::entities::UserType;
    use crate::storage::MemoryStore;
    use std::sync::Arc;
    use tokio_test::block_on;

    let engine = block_on(Engine::new(Arc::new(MemoryStore::new()))).unwrap();
    let admin = User::new(UserType::Admin, None);
    let customer = User::new(UserType::Customer, None);

    assert!(block_on(engine.notifications(customer.clone()))
        .unwrap()
        .notifications
        .is_empty());

    block_on(engine.release_bids(admin.clone(), 1, vec!["1-a".into()])).unwrap();
    block_on(engine.set_bids_visible(admin.clone(), 3, true)).unwrap();

    let inbox = block_on(engine.notifications(customer.clone())).unwrap();
    assert_eq!(inbox.unread_count, 2);
    assert_eq!(inbox.notifications[0].request_id, 3);
    assert_eq!(
        inbox.notifications[0].message,
        "8 new offers are available to view."
    );
    assert_eq!(
        inbox.notifications[1].message,
        "1 new offer is available to view."
    );

    let newest = inbox.notifications[0].id;
    let inbox = block_on(engine.mark_notification_read(customer.clone(), newest)).unwrap();
    assert_eq!(inbox.unread_count, 1);

    let inbox = block_on(engine.mark_notification_read(customer.clone(), newest)).unwrap();
    assert_eq!(inbox.unread_count, 1);

    let inbox = block_on(engine.mark_all_notifications_read(customer.clone())).unwrap();
    assert_eq!(inbox.unread_count, 0);
    assert_eq!(inbox.notifications.len(), 2);

    let err = block_on(engine.mark_notification_read(customer, Uuid::new_v4())).unwrap_err();
    assert!(err.is_not_found_error());

    assert!(block_on(engine.notifications(admin))
        .unwrap_err()
        .is_unauthorized_error());
}
