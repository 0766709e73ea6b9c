use super::Database;

use sqlx::{types::Json, Executor, Row, Transaction};
use uuid::Uuid;

use crate::{
    entities::{Place, User},
    error::{not_found_error, Error},
};

#[tracing::instrument(skip(tx))]
pub async fn fetch_place_for_update(
    tx: &mut Transaction<'_, Database>,
    id: &Uuid,
) -> Result<Place, Error> {
    let Json(place): Json<Place> = tx
        .fetch_optional(sqlx::query("SELECT data FROM places WHERE id = $1 FOR UPDATE").bind(id))
        .await?
        .ok_or_else(|| not_found_error())?
        .try_get("data")?;

    Ok(place)
}

#[tracing::instrument(skip(tx))]
pub async fn fetch_user_for_update(
    tx: &mut Transaction<'_, Database>,
    id: &Uuid,
) -> Result<User, Error> {
    let Json(user): Json<User> = tx
        .fetch_optional(sqlx::query("SELECT data FROM users WHERE id = $1 FOR UPDATE").bind(id))
        .await?
        .ok_or_else(|| not_found_error())?
        .try_get("data")?;

    Ok(user)
}

#[tracing::instrument(skip(tx, place))]
pub async fn insert_place(tx: &mut Transaction<'_, Database>, place: &Place) -> Result<(), Error> {
    tx.execute(
        sqlx::query("INSERT INTO places (id, data) VALUES ($1, $2)")
            .bind(&place.id)
            .bind(Json(place)),
    )
    .await?;

    Ok(())
}

#[tracing::instrument(skip(tx))]
pub async fn remove_place(tx: &mut Transaction<'_, Database>, id: &Uuid) -> Result<(), Error> {
    tx.execute(sqlx::query("DELETE FROM places WHERE id = $1").bind(id))
        .await?;

    Ok(())
}

#[tracing::instrument(skip(tx, user))]
pub async fn update_user(tx: &mut Transaction<'_, Database>, user: &User) -> Result<(), Error> {
    tx.execute(
        sqlx::query("UPDATE users SET data = $2 WHERE id = $1")
            .bind(&user.id)
            .bind(Json(user)),
    )
    .await?;

    Ok(())
}
