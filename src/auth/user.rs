use async_trait::async_trait;
use axum::extract::{FromRequest, RequestParts, TypedHeader};
use axum::headers::authorization::Bearer;
use axum::headers::Authorization;
use oso::PolarClass;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::token;
use crate::error::{unauthenticated_error, Error};

/// The authenticated requester. The id comes from a verified bearer token
/// and is trusted as-is by the engine.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
}

impl User {
    fn id_equals(&self, other: Uuid) -> bool {
        self.id == other
    }
}

impl PolarClass for User {
    fn get_polar_class_builder() -> oso::ClassBuilder<User> {
        oso::Class::builder()
            .name("User")
            .add_attribute_getter("id", |recv: &User| recv.id.clone())
            .add_method("id_equals", User::id_equals)
    }

    fn get_polar_class() -> oso::Class {
        let builder = User::get_polar_class_builder();
        builder.build()
    }
}

#[async_trait]
impl<B: Send> FromRequest<B> for User {
    type Rejection = Error;

    async fn from_request(req: &mut RequestParts<B>) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request(req)
                .await
                .map_err(|_| unauthenticated_error())?;

        let claims = token::decode(bearer.token())?;

        Ok(Self { id: claims.sub })
    }
}
