use axum::extract::{Extension, Json, Path};

use crate::api::CatalogAPI;
use crate::entities::ServiceRequest;
use crate::error::Error;
use crate::server::DynAPI;

pub async fn list(Extension(api): Extension<DynAPI>) -> Result<Json<Vec<ServiceRequest>>, Error> {
    let requests = api.list_requests().await?;

    Ok(requests.into())
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<i64>,
) -> Result<Json<ServiceRequest>, Error> {
    let request = api.find_request(id).await?;

    Ok(request.into())
}
