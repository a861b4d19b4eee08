use axum::extract::{Extension, Json, Path};
use uuid::Uuid;

use crate::api::{NotificationAPI, NotificationInbox, SessionAPI};
use crate::error::Error;
use crate::server::DynAPI;

pub async fn list(Extension(api): Extension<DynAPI>) -> Result<Json<NotificationInbox>, Error> {
    let user = api.current_user().await?;
    let inbox = api.notifications(user).await?;

    Ok(inbox.into())
}

pub async fn mark_read(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<Json<NotificationInbox>, Error> {
    let user = api.current_user().await?;
    let inbox = api.mark_notification_read(user, id).await?;

    Ok(inbox.into())
}

pub async fn mark_all_read(
    Extension(api): Extension<DynAPI>,
) -> Result<Json<NotificationInbox>, Error> {
    let user = api.current_user().await?;
    let inbox = api.mark_all_notifications_read(user).await?;

    Ok(inbox.into())
}
