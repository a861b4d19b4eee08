use std::cmp::Reverse;
use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};

use crate::error::{invalid_input_error, Error};

/// A body shop's offer on a request. `amount` is what the shop receives.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bid {
    pub id: String,
    pub amount: i64,
    pub note: String,
    pub shop_name: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Bid {
    pub fn new(request_id: i64, amount: i64, note: String, shop_name: Option<String>) -> Self {
        let created_at = Utc::now();

        Bid {
            id: generate_bid_id(request_id, &created_at),
            amount,
            note,
            shop_name,
            created_at: Some(created_at),
        }
    }

    fn seed(id: &str, amount: i64, note: &str) -> Self {
        Bid {
            id: id.into(),
            amount,
            note: note.into(),
            shop_name: None,
            created_at: None,
        }
    }

    fn is_from(&self, shop_name: &str) -> bool {
        self.shop_name.as_deref() == Some(shop_name)
    }
}

fn generate_bid_id(request_id: i64, created_at: &DateTime<Utc>) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(7)
        .map(char::from)
        .collect();

    format!(
        "{}-{}-{}",
        request_id,
        created_at.timestamp_millis(),
        suffix.to_lowercase()
    )
}

/// The deal an admin closed on a request.
///
/// `bid_id` is set whenever the winner can be pinned to one bid, either
/// because the admin picked the bid directly or because exactly one bid of
/// the request carries the winning amount.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Winner {
    pub amount: i64,
    pub bid_id: Option<String>,
}

/// Admin-curated state of a single request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestMeta {
    /// In the order the admin selected them.
    pub visible_bid_ids: Vec<String>,
    pub winning: Option<Winner>,
}

/// Every bid of every request plus the per-request visibility and winner.
#[derive(Clone, Debug, Default)]
pub struct BidBook {
    bids: BTreeMap<i64, Vec<Bid>>,
    meta: BTreeMap<i64, RequestMeta>,
}

impl BidBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bids from the demo dataset.
    pub fn seeded() -> Self {
        let mut bids = BTreeMap::new();

        bids.insert(
            1,
            vec![
                Bid::seed("1-a", 11600, "Includes OEM parts, 2-year warranty"),
                Bid::seed("1-b", 12160, "Aftermarket parts, 1-week turnaround"),
                Bid::seed("1-c", 11840, "OEM parts available on request"),
                Bid::seed("1-d", 12960, "Premium paint, lifetime warranty"),
                Bid::seed("1-e", 12400, "Free rental car included"),
            ],
        );

        bids.insert(
            3,
            vec![
                Bid::seed("3-a", 4960, "Selected – work completed"),
                Bid::seed("3-b", 5200, ""),
                Bid::seed("3-c", 5120, ""),
                Bid::seed("3-d", 5680, ""),
                Bid::seed("3-e", 5440, ""),
                Bid::seed("3-f", 5280, ""),
                Bid::seed("3-g", 5520, ""),
                Bid::seed("3-h", 5360, ""),
            ],
        );

        Self {
            bids,
            meta: BTreeMap::new(),
        }
    }

    /// Appends a bid. The amount is taken as given.
    pub fn add_bid(
        &mut self,
        request_id: i64,
        amount: i64,
        note: String,
        shop_name: Option<String>,
    ) -> &Bid {
        let mut bid = Bid::new(request_id, amount, note, shop_name);

        let list = self.bids.entry(request_id).or_default();
        while list.iter().any(|existing| existing.id == bid.id) {
            bid = Bid::new(request_id, bid.amount, bid.note, bid.shop_name);
        }

        list.push(bid);
        &list[list.len() - 1]
    }

    pub fn bids(&self, request_id: i64) -> &[Bid] {
        self.bids
            .get(&request_id)
            .map(|bids| bids.as_slice())
            .unwrap_or_default()
    }

    pub fn find_bid(&self, request_id: i64, bid_id: &str) -> Option<&Bid> {
        self.bids(request_id).iter().find(|bid| bid.id == bid_id)
    }

    pub fn visible_bid_ids(&self, request_id: i64) -> &[String] {
        self.meta
            .get(&request_id)
            .map(|meta| meta.visible_bid_ids.as_slice())
            .unwrap_or_default()
    }

    /// Visible bids in bid list order, whatever order the ids were selected in.
    pub fn visible_bids(&self, request_id: i64) -> Vec<&Bid> {
        let visible_ids = self.visible_bid_ids(request_id);

        self.bids(request_id)
            .iter()
            .filter(|bid| visible_ids.contains(&bid.id))
            .collect()
    }

    pub fn bids_visible_to_customer(&self, request_id: i64) -> bool {
        !self.visible_bid_ids(request_id).is_empty()
    }

    /// Replaces the visible set. Every id must name a bid of the request;
    /// otherwise nothing changes.
    pub fn set_visible_bid_ids(&mut self, request_id: i64, bid_ids: Vec<String>) -> Result<(), Error> {
        if let Some(unknown) = bid_ids
            .iter()
            .find(|id| self.find_bid(request_id, id).is_none())
        {
            tracing::warn!(request_id, bid_id = %unknown, "rejecting unknown bid id");
            return Err(invalid_input_error());
        }

        let mut seen = HashSet::new();
        let bid_ids = bid_ids
            .into_iter()
            .filter(|id| seen.insert(id.clone()))
            .collect();

        self.meta_mut(request_id).visible_bid_ids = bid_ids;

        Ok(())
    }

    /// `true` snapshots the bids present right now; bids added later stay hidden.
    pub fn set_bids_visible_to_customer(&mut self, request_id: i64, visible: bool) {
        let bid_ids = match visible {
            true => self.bids(request_id).iter().map(|bid| bid.id.clone()).collect(),
            false => Vec::new(),
        };

        self.meta_mut(request_id).visible_bid_ids = bid_ids;
    }

    pub fn winning_bid_amount(&self, request_id: i64) -> Option<i64> {
        self.winner(request_id).map(|winner| winner.amount)
    }

    pub fn winner(&self, request_id: i64) -> Option<&Winner> {
        self.meta
            .get(&request_id)
            .and_then(|meta| meta.winning.as_ref())
    }

    pub fn winning_bid(&self, request_id: i64) -> Option<&Bid> {
        let bid_id = self.winner(request_id)?.bid_id.as_deref()?;
        self.find_bid(request_id, bid_id)
    }

    /// Records the closing amount. The winner is pinned to a bid only when
    /// the amount matches exactly one bid of the request.
    pub fn set_winning_bid_amount(&mut self, request_id: i64, amount: Option<i64>) {
        let winning = amount.map(|amount| {
            let mut matching = self
                .bids(request_id)
                .iter()
                .filter(|bid| bid.amount == amount);

            let bid_id = match (matching.next(), matching.next()) {
                (Some(bid), None) => Some(bid.id.clone()),
                _ => None,
            };

            Winner { amount, bid_id }
        });

        self.meta_mut(request_id).winning = winning;
    }

    pub fn set_winning_bid(&mut self, request_id: i64, bid_id: &str) -> Result<&Winner, Error> {
        let amount = self
            .find_bid(request_id, bid_id)
            .map(|bid| bid.amount)
            .ok_or_else(invalid_input_error)?;

        let winner = self.meta_mut(request_id).winning.insert(Winner {
            amount,
            bid_id: Some(bid_id.into()),
        });

        Ok(winner)
    }

    /// Newest bids across every request. Bids without a timestamp are the oldest.
    pub fn last_bids(&self, count: usize) -> Vec<(i64, &Bid)> {
        let mut all: Vec<(i64, &Bid)> = self
            .bids
            .iter()
            .flat_map(|(request_id, bids)| bids.iter().map(move |bid| (*request_id, bid)))
            .collect();

        all.sort_by_key(|(_, bid)| Reverse(bid.created_at));
        all.truncate(count);

        all
    }

    pub fn active_body_shop_count(&self) -> usize {
        self.bids
            .values()
            .flatten()
            .filter_map(|bid| bid.shop_name.as_deref())
            .filter(|name| !name.is_empty())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Whether any closed deal went to `shop_name`. Winners pinned to a bid
    /// compare by bid; the rest fall back to name and amount.
    pub fn has_won_any_deal(&self, shop_name: &str) -> bool {
        self.meta.iter().any(|(request_id, meta)| match &meta.winning {
            Some(Winner {
                bid_id: Some(bid_id),
                ..
            }) => self
                .find_bid(*request_id, bid_id)
                .map_or(false, |bid| bid.is_from(shop_name)),
            Some(Winner {
                amount,
                bid_id: None,
            }) => self
                .bids(*request_id)
                .iter()
                .any(|bid| bid.is_from(shop_name) && bid.amount == *amount),
            None => false,
        })
    }

    fn meta_mut(&mut self, request_id: i64) -> &mut RequestMeta {
        self.meta.entry(request_id).or_default()
    }
}

#[test]
fn unknown_request_has_no_bids() {
    let book = BidBook::seeded();

    assert!(book.bids(42).is_empty());
    assert!(book.visible_bids(42).is_empty());
    assert_eq!(book.winning_bid_amount(42), None);
    assert!(!book.bids_visible_to_customer(42));
}

#[test]
fn add_bid_appends_without_changing_visibility() {
    let mut book = BidBook::seeded();
    book.set_visible_bid_ids(1, vec!["1-a".into()]).unwrap();

    let bid = book
        .add_bid(1, -5, "negative amounts are accepted".into(), None)
        .clone();

    assert!(bid.id.starts_with("1-"));
    assert!(bid.created_at.is_some());
    assert_eq!(book.bids(1).len(), 6);
    assert_eq!(book.bids(1).last(), Some(&bid));
    assert_eq!(book.visible_bid_ids(1), ["1-a".to_string()]);
}

#[test]
fn added_bids_get_unique_ids() {
    let mut book = BidBook::new();

    let ids: HashSet<String> = (0..50)
        .map(|n| book.add_bid(7, n, String::new(), None).id.clone())
        .collect();

    assert_eq!(ids.len(), 50);
}

#[test]
fn visible_bids_follow_bid_list_order() {
    let mut book = BidBook::seeded();

    book.set_visible_bid_ids(1, vec!["1-c".into(), "1-a".into()])
        .unwrap();

    let visible: Vec<&str> = book
        .visible_bids(1)
        .iter()
        .map(|bid| bid.id.as_str())
        .collect();

    assert_eq!(visible, ["1-a", "1-c"]);
    assert_eq!(book.visible_bid_ids(1), ["1-c".to_string(), "1-a".to_string()]);
}

#[test]
fn set_visible_bid_ids_replaces_and_is_idempotent() {
    let mut book = BidBook::seeded();

    book.set_visible_bid_ids(1, vec!["1-a".into(), "1-b".into()])
        .unwrap();
    book.set_visible_bid_ids(1, vec!["1-d".into()]).unwrap();
    book.set_visible_bid_ids(1, vec!["1-d".into()]).unwrap();

    assert_eq!(book.visible_bid_ids(1), ["1-d".to_string()]);

    book.set_visible_bid_ids(1, vec![]).unwrap();
    assert!(!book.bids_visible_to_customer(1));
}

#[test]
fn set_visible_bid_ids_rejects_stale_ids() {
    let mut book = BidBook::seeded();
    book.set_visible_bid_ids(1, vec!["1-a".into()]).unwrap();

    let err = book
        .set_visible_bid_ids(1, vec!["1-b".into(), "3-a".into()])
        .unwrap_err();

    assert!(err.is_invalid_input_error());
    assert_eq!(book.visible_bid_ids(1), ["1-a".to_string()]);
}

#[test]
fn showing_all_bids_is_a_snapshot() {
    let mut book = BidBook::seeded();

    book.set_bids_visible_to_customer(1, true);
    book.add_bid(1, 10000, "late bid".into(), Some("ABC Body Shop".into()));

    let visible: Vec<&str> = book
        .visible_bids(1)
        .iter()
        .map(|bid| bid.id.as_str())
        .collect();

    assert_eq!(visible, ["1-a", "1-b", "1-c", "1-d", "1-e"]);

    book.set_bids_visible_to_customer(1, false);
    assert!(book.visible_bids(1).is_empty());
}

#[test]
fn winning_amount_pins_unique_bid() {
    let mut book = BidBook::seeded();

    book.set_winning_bid_amount(3, Some(4960));
    assert_eq!(book.winning_bid_amount(3), Some(4960));
    assert_eq!(book.winning_bid(3).map(|bid| bid.id.as_str()), Some("3-a"));

    book.set_winning_bid_amount(3, Some(1));
    assert_eq!(book.winning_bid_amount(3), Some(1));
    assert_eq!(book.winning_bid(3), None);

    book.set_winning_bid_amount(3, None);
    assert_eq!(book.winning_bid_amount(3), None);
}

#[test]
fn winning_amount_shared_by_two_bids_stays_unpinned() {
    let mut book = BidBook::seeded();
    book.add_bid(1, 11600, String::new(), Some("ABC Body Shop".into()));

    book.set_winning_bid_amount(1, Some(11600));

    assert_eq!(book.winner(1).and_then(|w| w.bid_id.clone()), None);

    let bid_id = book.bids(1)[5].id.clone();
    let winner = book.set_winning_bid(1, &bid_id).unwrap().clone();

    assert_eq!(winner.amount, 11600);
    assert_eq!(book.winning_bid(1).map(|bid| bid.id.clone()), Some(bid_id));
    assert!(book.set_winning_bid(1, "3-a").is_err());
}

#[test]
fn last_bids_newest_first() {
    let mut book = BidBook::seeded();

    let first = book.add_bid(4, 100, String::new(), Some("A".into())).id.clone();
    let second = book.add_bid(2, 200, String::new(), Some("B".into())).id.clone();

    let last = book.last_bids(5);
    assert_eq!(last.len(), 5);
    assert_eq!(last[0].1.id, second);
    assert_eq!(last[0].0, 2);
    assert_eq!(last[1].1.id, first);

    for pair in last.windows(2) {
        assert!(pair[0].1.created_at >= pair[1].1.created_at);
    }

    assert_eq!(book.last_bids(100).len(), 15);
    assert!(BidBook::new().last_bids(5).is_empty());
}

#[test]
fn active_body_shops_are_distinct_names() {
    let mut book = BidBook::seeded();
    assert_eq!(book.active_body_shop_count(), 0);

    book.add_bid(1, 1, String::new(), Some("ABC Body Shop".into()));
    book.add_bid(3, 2, String::new(), Some("ABC Body Shop".into()));
    book.add_bid(3, 3, String::new(), Some("".into()));
    book.add_bid(2, 4, String::new(), Some("Queens Collision".into()));

    assert_eq!(book.active_body_shop_count(), 2);
}

#[test]
fn won_deals_match_shop() {
    let mut book = BidBook::seeded();
    let bid_id = book
        .add_bid(2, 9000, String::new(), Some("ABC Body Shop".into()))
        .id
        .clone();

    assert!(!book.has_won_any_deal("ABC Body Shop"));

    book.set_winning_bid_amount(1, Some(11600));
    assert!(!book.has_won_any_deal("ABC Body Shop"));

    book.set_winning_bid(2, &bid_id).unwrap();
    assert!(book.has_won_any_deal("ABC Body Shop"));
    assert!(!book.has_won_any_deal("Queens Collision"));
}
