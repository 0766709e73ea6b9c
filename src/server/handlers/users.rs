use axum::extract::{Extension, Json};
use axum::http::StatusCode;

use crate::{
    api::DynAPI,
    auth::token::Session,
    entities::{Credentials, Signup, UserProfile},
    error::Error,
};

pub async fn list(Extension(api): Extension<DynAPI>) -> Result<Json<Vec<UserProfile>>, Error> {
    let users = api.list_users().await?;

    Ok(users.into())
}

pub async fn signup(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<Signup>,
) -> Result<(StatusCode, Json<Session>), Error> {
    let session = api.signup(params).await?;

    Ok((StatusCode::CREATED, session.into()))
}

pub async fn login(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<Credentials>,
) -> Result<Json<Session>, Error> {
    let session = api.login(params).await?;

    Ok(session.into())
}
