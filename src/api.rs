use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::token::Session;
use crate::auth::User;
use crate::entities::{Credentials, Place, PlaceChanges, PlaceDraft, Signup, UserProfile};
use crate::error::Error;

#[async_trait]
pub trait PlaceAPI {
    async fn find_place(&self, id: Uuid) -> Result<Place, Error>;
    async fn find_places_by_creator(&self, user_id: Uuid) -> Result<Vec<Place>, Error>;
    async fn create_place(&self, user: User, draft: PlaceDraft) -> Result<Place, Error>;
    async fn update_place(&self, user: User, id: Uuid, changes: PlaceChanges)
        -> Result<Place, Error>;
    async fn delete_place(&self, user: User, id: Uuid) -> Result<(), Error>;
}

#[async_trait]
pub trait UserAPI {
    async fn list_users(&self) -> Result<Vec<UserProfile>, Error>;
    async fn signup(&self, signup: Signup) -> Result<Session, Error>;
    async fn login(&self, credentials: Credentials) -> Result<Session, Error>;
}

pub trait API: PlaceAPI + UserAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
