mod helpers;
mod place_api;
mod user_api;

use oso::Oso;
use sqlx::{Executor, Pool, Postgres};

use crate::{
    api::API,
    auth::authorizor,
    error::{forbidden_error, Error},
};

type Database = Postgres;

pub struct Engine {
    pool: Pool<Database>,
    authorizor: Oso,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub async fn new(pool: Pool<Database>) -> Result<Self, Error> {
        // account documents, keyed by id with a unique email for login
        pool.execute(
            "CREATE TABLE IF NOT EXISTS users (id UUID PRIMARY KEY, email VARCHAR NOT NULL UNIQUE, data JSONB NOT NULL)",
        )
        .await?;

        // place documents
        pool.execute("CREATE TABLE IF NOT EXISTS places (id UUID PRIMARY KEY, data JSONB NOT NULL)")
            .await?;

        Ok(Self {
            pool,
            authorizor: authorizor::new(),
        })
    }
}

impl Engine {
    pub fn authorize<Actor, Action, Resource>(
        &self,
        actor: Actor,
        action: Action,
        resource: Resource,
    ) -> Result<(), Error>
    where
        Actor: oso::ToPolar,
        Action: oso::ToPolar,
        Resource: oso::ToPolar,
    {
        if self.authorizor.is_allowed(actor, action, resource)? {
            return Ok(());
        }

        Err(forbidden_error())
    }
}

impl API for Engine {}
