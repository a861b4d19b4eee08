use serde::Serialize;

use crate::{
    api::{NotificationInbox, PricedBid, RequestBids},
    entities::{Bid, BidBook, NotificationFeed},
    error::Error,
    pricing::customer_price,
    storage::KvStore,
};

#[tracing::instrument(skip(store, value))]
pub async fn persist<T: Serialize + Sync>(store: &dyn KvStore, key: &str, value: &T) -> Result<(), Error> {
    store.put(key, serde_json::to_value(value)?).await
}

pub fn priced(bid: &Bid) -> PricedBid {
    PricedBid {
        bid: bid.clone(),
        customer_price: customer_price(bid.amount),
    }
}

pub fn request_bids(book: &BidBook, request_id: i64) -> RequestBids {
    let mut bids: Vec<PricedBid> = book.bids(request_id).iter().map(priced).collect();
    bids.sort_by_key(|priced| priced.bid.amount);

    RequestBids {
        request_id,
        bids,
        visible_bid_ids: book.visible_bid_ids(request_id).to_vec(),
        winning: book.winner(request_id).cloned(),
    }
}

pub fn inbox(feed: &NotificationFeed) -> NotificationInbox {
    NotificationInbox {
        notifications: feed.notifications().to_vec(),
        unread_count: feed.unread_count(),
    }
}

/// `local@domain.tld` with no whitespace and a single `@`.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .char_indices()
                    .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
        }
        None => false,
    }
}

#[test]
fn email_validation() {
    assert!(is_valid_email("john@example.com"));
    assert!(is_valid_email("a@b.c"));
    assert!(is_valid_email("first.last@mail.example.org"));

    assert!(!is_valid_email(""));
    assert!(!is_valid_email("john"));
    assert!(!is_valid_email("john@example"));
    assert!(!is_valid_email("john@.com"));
    assert!(!is_valid_email("john@example."));
    assert!(!is_valid_email("@example.com"));
    assert!(!is_valid_email("jo hn@example.com"));
    assert!(!is_valid_email("john@exa@mple.com"));
}

#[test]
fn request_bids_sorted_by_amount() {
    let book = BidBook::seeded();
    let view = request_bids(&book, 1);

    let ids: Vec<&str> = view.bids.iter().map(|p| p.bid.id.as_str()).collect();
    assert_eq!(ids, ["1-a", "1-c", "1-b", "1-e", "1-d"]);
    assert_eq!(view.bids[0].customer_price, 14500);
    assert!(view.visible_bid_ids.is_empty());
    assert_eq!(view.winning, None);
}
