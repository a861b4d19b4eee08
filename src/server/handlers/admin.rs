use axum::extract::{Extension, Json};

use crate::api::{AdminAPI, AdminDashboard, SessionAPI};
use crate::error::Error;
use crate::server::DynAPI;

pub async fn dashboard(Extension(api): Extension<DynAPI>) -> Result<Json<AdminDashboard>, Error> {
    let user = api.current_user().await?;
    let dashboard = api.dashboard(user).await?;

    Ok(dashboard.into())
}
