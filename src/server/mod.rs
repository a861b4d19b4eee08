mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, patch, post, put},
    Router,
};

use crate::api::API;
use crate::error::{server_error, Error};
use crate::server::handlers::{
    admin, bids, guest, locale, notifications, requests, session, subscription,
};

pub type DynAPI = Arc<dyn API + Send + Sync>;

pub fn router(api: DynAPI) -> Router {
    Router::new()
        .route(
            "/session",
            post(session::login).get(session::find).delete(session::logout),
        )
        .route("/locale", get(locale::find).put(locale::update))
        .route("/translations/:key", get(locale::translate))
        .route("/requests", get(requests::list))
        .route("/requests/:id", get(requests::find))
        .route("/requests/:id/bids", get(bids::list).post(bids::create))
        .route("/requests/:id/bids/visible", put(bids::release))
        .route("/requests/:id/bids/visibility", patch(bids::update_visibility))
        .route("/requests/:id/offers", get(bids::offers))
        .route(
            "/requests/:id/winning_bid",
            get(bids::find_winning).put(bids::update_winning),
        )
        .route("/requests/:id/standing", get(bids::standing))
        .route(
            "/subscription",
            get(subscription::find).post(subscription::subscribe),
        )
        .route(
            "/notifications",
            get(notifications::list).patch(notifications::mark_all_read),
        )
        .route("/notifications/:id/read", patch(notifications::mark_read))
        .route("/admin/dashboard", get(admin::dashboard))
        .route("/guest_requests", post(guest::create))
        .layer(Extension(api))
}

pub async fn serve<T: API + Sync + Send + 'static>(api: T, addr: SocketAddr) -> Result<(), Error> {
    let api = Arc::new(api) as DynAPI;
    let app = router(api);

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .map_err(server_error)
}
