use axum::extract::{Extension, Json, Path};
use axum::http::StatusCode;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    api::DynAPI,
    auth::User,
    entities::{Place, PlaceChanges, PlaceDraft},
    error::Error,
};

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<Json<Place>, Error> {
    let place = api.find_place(id).await?;

    Ok(place.into())
}

pub async fn find_by_creator(
    Extension(api): Extension<DynAPI>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<Place>>, Error> {
    let places = api.find_places_by_creator(user_id).await?;

    Ok(places.into())
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    user: User,
    Json(draft): Json<PlaceDraft>,
) -> Result<(StatusCode, Json<Place>), Error> {
    let place = api.create_place(user, draft).await?;

    Ok((StatusCode::CREATED, place.into()))
}

pub async fn update(
    Extension(api): Extension<DynAPI>,
    user: User,
    Path(id): Path<Uuid>,
    Json(changes): Json<PlaceChanges>,
) -> Result<Json<Place>, Error> {
    let place = api.update_place(user, id, changes).await?;

    Ok(place.into())
}

pub async fn remove(
    Extension(api): Extension<DynAPI>,
    user: User,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, Error> {
    api.delete_place(user, id).await?;

    Ok(json!({ "message": "place deleted" }).into())
}
