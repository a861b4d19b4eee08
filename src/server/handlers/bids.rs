use axum::extract::{Extension, Json, Path, Query};
use serde::{Deserialize, Deserializer, Serialize};

use crate::api::{BidAPI, CustomerOffers, RequestBids, SessionAPI};
use crate::entities::{Bid, Winner};
use crate::error::Error;
use crate::pricing::Standing;
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct CreateParams {
    amount: i64,
    #[serde(default)]
    note: String,
}

#[derive(Serialize, Deserialize)]
pub struct ReleaseParams {
    bid_ids: Vec<String>,
}

#[derive(Serialize, Deserialize)]
pub struct VisibilityParams {
    visible: bool,
}

/// Either a specific bid or a bare amount; `{"amount": null}` clears the winner.
/// A body naming neither is rejected.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
pub enum WinningParams {
    Bid {
        bid_id: String,
    },
    Amount {
        #[serde(deserialize_with = "required_nullable")]
        amount: Option<i64>,
    },
}

// `Option` fields are otherwise filled with `None` when missing.
fn required_nullable<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::deserialize(deserializer)
}

#[derive(Serialize, Deserialize)]
pub struct StandingParams {
    amount: i64,
}

#[derive(Serialize, Deserialize)]
pub struct WinningView {
    winning_bid_amount: Option<i64>,
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Path(request_id): Path<i64>,
    Json(params): Json<CreateParams>,
) -> Result<Json<Bid>, Error> {
    let user = api.current_user().await?;
    let bid = api
        .submit_bid(user, request_id, params.amount, params.note)
        .await?;

    Ok(bid.into())
}

pub async fn list(
    Extension(api): Extension<DynAPI>,
    Path(request_id): Path<i64>,
) -> Result<Json<RequestBids>, Error> {
    let user = api.current_user().await?;
    let bids = api.list_bids(user, request_id).await?;

    Ok(bids.into())
}

pub async fn offers(
    Extension(api): Extension<DynAPI>,
    Path(request_id): Path<i64>,
) -> Result<Json<CustomerOffers>, Error> {
    let user = api.current_user().await?;
    let offers = api.customer_offers(user, request_id).await?;

    Ok(offers.into())
}

pub async fn release(
    Extension(api): Extension<DynAPI>,
    Path(request_id): Path<i64>,
    Json(params): Json<ReleaseParams>,
) -> Result<Json<RequestBids>, Error> {
    let user = api.current_user().await?;
    let bids = api.release_bids(user, request_id, params.bid_ids).await?;

    Ok(bids.into())
}

pub async fn update_visibility(
    Extension(api): Extension<DynAPI>,
    Path(request_id): Path<i64>,
    Json(params): Json<VisibilityParams>,
) -> Result<Json<RequestBids>, Error> {
    let user = api.current_user().await?;
    let bids = api
        .set_bids_visible(user, request_id, params.visible)
        .await?;

    Ok(bids.into())
}

pub async fn find_winning(
    Extension(api): Extension<DynAPI>,
    Path(request_id): Path<i64>,
) -> Result<Json<WinningView>, Error> {
    let user = api.current_user().await?;
    let winning_bid_amount = api.winning_bid_amount(user, request_id).await?;

    Ok(Json(WinningView { winning_bid_amount }))
}

pub async fn update_winning(
    Extension(api): Extension<DynAPI>,
    Path(request_id): Path<i64>,
    Json(params): Json<WinningParams>,
) -> Result<Json<Option<Winner>>, Error> {
    let user = api.current_user().await?;

    let winner = match params {
        WinningParams::Bid { bid_id } => Some(api.set_winning_bid(user, request_id, bid_id).await?),
        WinningParams::Amount { amount } => {
            api.set_winning_bid_amount(user, request_id, amount).await?
        }
    };

    Ok(winner.into())
}

pub async fn standing(
    Extension(api): Extension<DynAPI>,
    Path(request_id): Path<i64>,
    Query(params): Query<StandingParams>,
) -> Result<Json<Option<Standing>>, Error> {
    let user = api.current_user().await?;
    let standing = api.bid_standing(user, request_id, params.amount).await?;

    Ok(standing.into())
}

#[test]
fn winning_params_need_bid_or_amount() {
    use serde_json::json;

    let params: WinningParams = serde_json::from_value(json!({"bid_id": "1-a"})).unwrap();
    assert!(matches!(params, WinningParams::Bid { bid_id } if bid_id == "1-a"));

    let params: WinningParams = serde_json::from_value(json!({"amount": 11600})).unwrap();
    assert!(matches!(params, WinningParams::Amount { amount: Some(11600) }));

    let params: WinningParams = serde_json::from_value(json!({"amount": null})).unwrap();
    assert!(matches!(params, WinningParams::Amount { amount: None }));

    assert!(serde_json::from_value::<WinningParams>(json!({})).is_err());
    assert!(serde_json::from_value::<WinningParams>(json!({"amount": "cheap"})).is_err());
}
