use axum::extract::{Extension, Json, Path};
use serde::{Deserialize, Serialize};

use crate::api::LocaleAPI;
use crate::entities::Locale;
use crate::error::{invalid_input_error, Error};
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct LocaleParams {
    locale: String,
}

#[derive(Serialize, Deserialize)]
pub struct LocaleView {
    locale: Locale,
}

#[derive(Serialize, Deserialize)]
pub struct Translation {
    key: String,
    text: String,
}

pub async fn find(Extension(api): Extension<DynAPI>) -> Result<Json<LocaleView>, Error> {
    let locale = api.locale().await?;

    Ok(Json(LocaleView { locale }))
}

pub async fn update(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<LocaleParams>,
) -> Result<Json<LocaleView>, Error> {
    let locale: Locale = params
        .locale
        .parse()
        .map_err(|_| invalid_input_error())?;

    let locale = api.set_locale(locale).await?;

    Ok(Json(LocaleView { locale }))
}

pub async fn translate(
    Extension(api): Extension<DynAPI>,
    Path(key): Path<String>,
) -> Result<Json<Translation>, Error> {
    let text = api.translate(&key).await?;

    Ok(Json(Translation { key, text }))
}
