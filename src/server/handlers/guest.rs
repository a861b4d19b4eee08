use axum::extract::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::api::{GuestAPI, GuestRequestReceipt};
use crate::error::Error;
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct CreateParams {
    #[serde(default)]
    email: String,
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<CreateParams>,
) -> Result<Json<GuestRequestReceipt>, Error> {
    let receipt = api.submit_guest_request(params.email).await?;

    Ok(receipt.into())
}
