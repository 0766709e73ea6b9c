use super::Engine;

use async_trait::async_trait;
use sqlx::{types::Json, Executor, Row};

use crate::{
    api::UserAPI,
    auth::token::{self, Session},
    auth::password,
    entities::{Credentials, Signup, User, UserProfile},
    error::{credentials_error, duplicate_email_error, validation_error, Error},
};

const MIN_PASSWORD_LEN: usize = 6;

// Postgres unique_violation
const UNIQUE_VIOLATION: &str = "23505";

// the email pre-check races with concurrent signups; the UNIQUE constraint
// on users.email is the backstop and must surface as the same caller error
fn map_user_insert_error(err: sqlx::Error) -> Error {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return duplicate_email_error();
        }
    }

    err.into()
}

fn validate_signup(signup: &Signup) -> Result<(), Error> {
    if signup.name.trim().is_empty() {
        return Err(validation_error());
    }

    if !signup.email.contains('@') {
        return Err(validation_error());
    }

    if signup.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(validation_error());
    }

    Ok(())
}

#[async_trait]
impl UserAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn list_users(&self) -> Result<Vec<UserProfile>, Error> {
        let mut conn = self.pool.acquire().await?;

        let rows = conn.fetch_all(sqlx::query("SELECT data FROM users")).await?;

        let mut profiles = Vec::with_capacity(rows.len());

        for row in rows.iter() {
            let Json(user): Json<User> = row.try_get("data")?;
            profiles.push(user.profile());
        }

        Ok(profiles)
    }

    #[tracing::instrument(skip_all)]
    async fn signup(&self, signup: Signup) -> Result<Session, Error> {
        validate_signup(&signup)?;

        let email = signup.email.trim().to_lowercase();

        let mut conn = self.pool.acquire().await?;

        let existing = conn
            .fetch_optional(sqlx::query("SELECT id FROM users WHERE email = $1").bind(&email))
            .await?;

        if existing.is_some() {
            return Err(duplicate_email_error());
        }

        let password_hash = password::hash(&signup.password)?;
        let user = User::new(signup.name, email, password_hash, signup.image);

        conn.execute(
            sqlx::query("INSERT INTO users (id, email, data) VALUES ($1, $2, $3)")
                .bind(&user.id)
                .bind(&user.email)
                .bind(Json(&user)),
        )
        .await
        .map_err(map_user_insert_error)?;

        let jwt = token::issue(user.id)?;

        Ok(Session {
            user_id: user.id,
            email: user.email,
            token: jwt,
        })
    }

    #[tracing::instrument(skip_all)]
    async fn login(&self, credentials: Credentials) -> Result<Session, Error> {
        let email = credentials.email.trim().to_lowercase();

        let mut conn = self.pool.acquire().await?;

        let maybe_result = conn
            .fetch_optional(sqlx::query("SELECT data FROM users WHERE email = $1").bind(&email))
            .await?;

        // unknown email and wrong password are indistinguishable to the caller
        let result = maybe_result.ok_or_else(|| credentials_error())?;
        let Json(user): Json<User> = result.try_get("data")?;

        if !password::verify(&credentials.password, &user.password_hash) {
            return Err(credentials_error());
        }

        let jwt = token::issue(user.id)?;

        Ok(Session {
            user_id: user.id,
            email: user.email,
            token: jwt,
        })
    }
}

#[test]
fn concurrent_signup_unique_violation_reads_as_duplicate_email() {
    use crate::error::database_error;

    #[derive(Debug)]
    struct UniqueViolation;

    impl std::fmt::Display for UniqueViolation {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("duplicate key value violates unique constraint \"users_email_key\"")
        }
    }

    impl std::error::Error for UniqueViolation {}

    impl sqlx::error::DatabaseError for UniqueViolation {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint \"users_email_key\""
        }

        fn code(&self) -> Option<std::borrow::Cow<'_, str>> {
            Some(UNIQUE_VIOLATION.into())
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }
    }

    let err = map_user_insert_error(sqlx::Error::Database(Box::new(UniqueViolation)));
    assert_eq!(err.code, duplicate_email_error().code);

    // anything else stays a store failure
    let err = map_user_insert_error(sqlx::Error::RowNotFound);
    assert_eq!(err.code, database_error(()).code);
}

#[test]
fn signup_validation_rules() {
    let valid = Signup {
        name: "Ada".into(),
        email: "ada@example.com".into(),
        password: "secret-password".into(),
        image: "uploads/images/ada.png".into(),
    };
    assert!(validate_signup(&valid).is_ok());

    let mut signup = valid.clone();
    signup.name = " ".into();
    assert!(validate_signup(&signup).is_err());

    let mut signup = valid.clone();
    signup.email = "not-an-email".into();
    assert!(validate_signup(&signup).is_err());

    let mut signup = valid;
    signup.password = "short".into();
    assert!(validate_signup(&signup).is_err());
}
