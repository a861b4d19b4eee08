use axum::extract::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::api::{PaymentDetails, SessionAPI, SubscriptionAPI, SubscriptionOverview};
use crate::error::Error;
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct SubscribeParams {
    #[serde(default)]
    recurring: bool,
    payment: PaymentDetails,
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
) -> Result<Json<SubscriptionOverview>, Error> {
    let user = api.current_user().await?;
    let overview = api.subscription(user).await?;

    Ok(overview.into())
}

pub async fn subscribe(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<SubscribeParams>,
) -> Result<Json<SubscriptionOverview>, Error> {
    let user = api.current_user().await?;
    let overview = api
        .subscribe(user, params.recurring, params.payment)
        .await?;

    Ok(overview.into())
}
