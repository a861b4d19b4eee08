use axum::extract::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::api::SessionAPI;
use crate::entities::{Session, UserType};
use crate::error::Error;
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct LoginParams {
    user_type: UserType,
    name: Option<String>,
}

pub async fn login(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<LoginParams>,
) -> Result<Json<Session>, Error> {
    let session = api.login(params.user_type, params.name).await?;

    Ok(session.into())
}

pub async fn find(Extension(api): Extension<DynAPI>) -> Result<Json<Option<Session>>, Error> {
    let session = api.current_session().await?;

    Ok(session.into())
}

pub async fn logout(Extension(api): Extension<DynAPI>) -> Result<Json<Option<Session>>, Error> {
    api.logout().await?;

    Ok(Json(None))
}
