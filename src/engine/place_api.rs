use super::helpers::{
    fetch_place_for_update, fetch_user_for_update, insert_place, remove_place, update_user,
};
use super::Engine;

use async_trait::async_trait;
use sqlx::{types::Json, Acquire, Executor, Row};
use uuid::Uuid;

use crate::{
    api::PlaceAPI,
    auth::{Directory, User},
    entities::{self, Place, PlaceChanges, PlaceDraft},
    error::{not_found_error, validation_error, Error},
    external::google_maps,
};

const MIN_DESCRIPTION_LEN: usize = 5;
const UPLOAD_PREFIX: &str = "uploads";

// the stored image is unlinked on delete, so the path must stay inside the
// upload area: relative, under the prefix, no parent or root components
fn is_upload_path(image: &str) -> bool {
    use std::path::{Component, Path};

    let path = Path::new(image);

    path.is_relative()
        && path.starts_with(UPLOAD_PREFIX)
        && path != Path::new(UPLOAD_PREFIX)
        && path
            .components()
            .all(|part| matches!(part, Component::Normal(_)))
}

fn validate_changes(changes: &PlaceChanges) -> Result<(), Error> {
    if changes.title.trim().is_empty() {
        return Err(validation_error());
    }

    if changes.description.chars().count() < MIN_DESCRIPTION_LEN {
        return Err(validation_error());
    }

    Ok(())
}

fn validate_draft(draft: &PlaceDraft) -> Result<(), Error> {
    if draft.title.trim().is_empty() {
        return Err(validation_error());
    }

    if draft.description.chars().count() < MIN_DESCRIPTION_LEN {
        return Err(validation_error());
    }

    if draft.address.trim().is_empty() {
        return Err(validation_error());
    }

    if !is_upload_path(&draft.image) {
        return Err(validation_error());
    }

    Ok(())
}

#[async_trait]
impl PlaceAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn find_place(&self, id: Uuid) -> Result<Place, Error> {
        let mut conn = self.pool.acquire().await?;

        let maybe_result = conn
            .fetch_optional(sqlx::query("SELECT data FROM places WHERE id = $1").bind(&id))
            .await?;

        let result = maybe_result.ok_or_else(|| not_found_error())?;
        let Json(place): Json<Place> = result.try_get("data")?;

        Ok(place)
    }

    #[tracing::instrument(skip(self))]
    async fn find_places_by_creator(&self, user_id: Uuid) -> Result<Vec<Place>, Error> {
        let mut conn = self.pool.acquire().await?;

        let maybe_result = conn
            .fetch_optional(sqlx::query("SELECT data FROM users WHERE id = $1").bind(&user_id))
            .await?;

        let result = maybe_result.ok_or_else(|| not_found_error())?;
        let Json(owner): Json<entities::User> = result.try_get("data")?;

        // an owner with zero places is reported as not found, matching the
        // contract existing callers depend on
        if owner.places.is_empty() {
            return Err(not_found_error());
        }

        let rows = conn
            .fetch_all(sqlx::query("SELECT data FROM places WHERE id = ANY($1)").bind(&owner.places))
            .await?;

        let mut places = Vec::with_capacity(rows.len());

        for row in rows.iter() {
            let Json(place): Json<Place> = row.try_get("data")?;
            places.push(place);
        }

        // keep the owner's list order
        places.sort_by_key(|place| owner.places.iter().position(|id| *id == place.id));

        Ok(places)
    }

    #[tracing::instrument(skip(self))]
    async fn create_place(&self, user: User, draft: PlaceDraft) -> Result<Place, Error> {
        validate_draft(&draft)?;

        self.authorize(user.clone(), "create_place", Directory::default())?;

        let location = google_maps::geocode_address(&draft.address).await?;
        let place = Place::new(user.id, draft, location);

        let mut conn = self.pool.acquire().await?;
        let mut tx = conn.begin().await?;

        // locking the owner row both confirms the account exists and
        // serializes concurrent edits to its place list
        let mut owner = fetch_user_for_update(&mut tx, &user.id).await?;
        owner.add_place(place.id);

        insert_place(&mut tx, &place).await?;
        update_user(&mut tx, &owner).await?;

        tx.commit().await?;

        Ok(place)
    }

    #[tracing::instrument(skip(self))]
    async fn update_place(
        &self,
        user: User,
        id: Uuid,
        changes: PlaceChanges,
    ) -> Result<Place, Error> {
        validate_changes(&changes)?;

        let mut conn = self.pool.acquire().await?;

        let maybe_result = conn
            .fetch_optional(sqlx::query("SELECT data FROM places WHERE id = $1").bind(&id))
            .await?;

        let result = maybe_result.ok_or_else(|| not_found_error())?;
        let Json(mut place): Json<Place> = result.try_get("data")?;

        self.authorize(user.clone(), "update", place.clone())?;

        place.apply(changes);

        conn.execute(
            sqlx::query("UPDATE places SET data = $2 WHERE id = $1")
                .bind(&place.id)
                .bind(Json(&place)),
        )
        .await?;

        Ok(place)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_place(&self, user: User, id: Uuid) -> Result<(), Error> {
        let mut conn = self.pool.acquire().await?;
        let mut tx = conn.begin().await?;

        let place = fetch_place_for_update(&mut tx, &id).await?;

        self.authorize(user.clone(), "delete", place.clone())?;

        let mut owner = fetch_user_for_update(&mut tx, &place.creator_id).await?;
        owner.remove_place(place.id);

        remove_place(&mut tx, &place.id).await?;
        update_user(&mut tx, &owner).await?;

        tx.commit().await?;

        // the stored image is removed best-effort; a leftover file never
        // fails the delete
        if let Err(err) = tokio::fs::remove_file(&place.image).await {
            tracing::warn!(image = %place.image, "failed to remove place image: {}", err);
        }

        Ok(())
    }
}

#[test]
fn draft_with_short_description_is_rejected() {
    let mut draft = PlaceDraft {
        title: "Cafe".into(),
        description: "Nice spot".into(),
        address: "1 Main St".into(),
        image: "uploads/images/cafe.png".into(),
    };

    assert!(validate_draft(&draft).is_ok());

    draft.description = "Nice".into();
    assert!(validate_draft(&draft).is_err());

    // five characters is the boundary
    draft.description = "Roomy".into();
    assert!(validate_draft(&draft).is_ok());
}

#[test]
fn draft_with_blank_title_or_address_is_rejected() {
    let draft = PlaceDraft {
        title: "  ".into(),
        description: "Nice spot".into(),
        address: "1 Main St".into(),
        image: "uploads/images/cafe.png".into(),
    };
    assert!(validate_draft(&draft).is_err());

    let draft = PlaceDraft {
        title: "Cafe".into(),
        description: "Nice spot".into(),
        address: "".into(),
        image: "uploads/images/cafe.png".into(),
    };
    assert!(validate_draft(&draft).is_err());
}

#[test]
fn draft_image_must_stay_under_the_upload_area() {
    let draft = |image: &str| PlaceDraft {
        title: "Cafe".into(),
        description: "Nice spot".into(),
        address: "1 Main St".into(),
        image: image.into(),
    };

    assert!(validate_draft(&draft("uploads/images/cafe.png")).is_ok());

    assert!(validate_draft(&draft("/etc/passwd")).is_err());
    assert!(validate_draft(&draft("uploads/../main.rs")).is_err());
    assert!(validate_draft(&draft("elsewhere/cafe.png")).is_err());
    assert!(validate_draft(&draft("uploads")).is_err());
    assert!(validate_draft(&draft("")).is_err());
}

#[test]
fn changes_follow_the_same_rules() {
    let changes = PlaceChanges {
        title: "Cafe".into(),
        description: "Nice spot".into(),
    };
    assert!(validate_changes(&changes).is_ok());

    let changes = PlaceChanges {
        title: "".into(),
        description: "Nice spot".into(),
    };
    assert!(validate_changes(&changes).is_err());

    let changes = PlaceChanges {
        title: "Cafe".into(),
        description: "Hi".into(),
    };
    assert!(validate_changes(&changes).is_err());
}
