use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Alert telling a customer that offers were released on one of their requests.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerNotification {
    pub id: Uuid,
    pub request_id: i64,
    pub vehicle_name: String,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl CustomerNotification {
    pub fn new(request_id: i64, vehicle_name: String, bid_count: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            request_id,
            vehicle_name,
            message: offers_message(bid_count),
            read: false,
            created_at: Utc::now(),
        }
    }
}

fn offers_message(bid_count: usize) -> String {
    match bid_count {
        1 => "1 new offer is available to view.".into(),
        n => format!("{} new offers are available to view.", n),
    }
}

/// Newest-first notification list. Kept in memory only.
#[derive(Clone, Debug, Default)]
pub struct NotificationFeed {
    notifications: Vec<CustomerNotification>,
}

impl NotificationFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_notification(
        &mut self,
        request_id: i64,
        vehicle_name: String,
        bid_count: usize,
    ) -> &CustomerNotification {
        self.notifications.insert(
            0,
            CustomerNotification::new(request_id, vehicle_name, bid_count),
        );

        &self.notifications[0]
    }

    pub fn notifications(&self) -> &[CustomerNotification] {
        &self.notifications
    }

    pub fn for_request(&self, request_id: i64) -> impl Iterator<Item = &CustomerNotification> {
        self.notifications
            .iter()
            .filter(move |notification| notification.request_id == request_id)
    }

    /// Returns `false` when no notification has that id.
    pub fn mark_as_read(&mut self, id: Uuid) -> bool {
        match self.notifications.iter_mut().find(|n| n.id == id) {
            Some(notification) => {
                notification.read = true;
                true
            }
            None => false,
        }
    }

    pub fn mark_all_as_read(&mut self) {
        self.notifications.iter_mut().for_each(|n| n.read = true);
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }
}

#[test]
fn offer_message_is_pluralized() {
    let mut feed = NotificationFeed::new();

    let notification = feed
        .add_notification(1, "2022 Toyota Camry".into(), 2)
        .clone();

    assert_eq!(notification.message, "2 new offers are available to view.");
    assert_eq!(notification.vehicle_name, "2022 Toyota Camry");
    assert!(!notification.read);

    let single = feed.add_notification(3, "2020 BMW 3 Series".into(), 1);
    assert_eq!(single.message, "1 new offer is available to view.");
}

#[test]
fn newest_notification_comes_first() {
    let mut feed = NotificationFeed::new();

    feed.add_notification(1, "2022 Toyota Camry".into(), 2);
    feed.add_notification(3, "2020 BMW 3 Series".into(), 4);

    let request_ids: Vec<i64> = feed.notifications().iter().map(|n| n.request_id).collect();
    assert_eq!(request_ids, [3, 1]);
    assert_eq!(feed.for_request(1).count(), 1);
}

#[test]
fn marking_read_is_idempotent() {
    let mut feed = NotificationFeed::new();

    let first = feed.add_notification(1, "2022 Toyota Camry".into(), 2).id;
    feed.add_notification(3, "2020 BMW 3 Series".into(), 4);
    feed.add_notification(3, "2020 BMW 3 Series".into(), 5);

    assert_eq!(feed.unread_count(), 3);

    assert!(feed.mark_as_read(first));
    assert!(feed.mark_as_read(first));
    assert_eq!(feed.unread_count(), 2);

    assert!(!feed.mark_as_read(Uuid::new_v4()));

    feed.mark_all_as_read();
    feed.mark_all_as_read();
    assert_eq!(feed.unread_count(), 0);
}
