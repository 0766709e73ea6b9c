use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode as jwt_decode, encode as jwt_encode, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::env;
use uuid::Uuid;

use crate::error::{unauthenticated_error, Error};

const TOKEN_TTL_HOURS: i64 = 1;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub exp: usize,
    pub iat: usize,
}

/// Returned by signup and login.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    pub user_id: Uuid,
    pub email: String,
    pub token: String,
}

pub fn issue(user_id: Uuid) -> Result<String, Error> {
    let secret = env::var("JWT_SECRET")?;
    let now = Utc::now();

    let claims = Claims {
        sub: user_id,
        exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    jwt_encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| unauthenticated_error())
}

pub fn decode(token: &str) -> Result<Claims, Error> {
    let secret = env::var("JWT_SECRET")?;

    let data = jwt_decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| unauthenticated_error())?;

    Ok(data.claims)
}

#[test]
fn token_round_trip() {
    env::set_var("JWT_SECRET", "test-secret");

    let user_id = Uuid::new_v4();
    let token = issue(user_id).unwrap();
    let claims = decode(&token).unwrap();

    assert_eq!(claims.sub, user_id);
    assert!(claims.exp > claims.iat);
}

#[test]
fn tampered_token_is_rejected() {
    env::set_var("JWT_SECRET", "test-secret");

    let token = issue(Uuid::new_v4()).unwrap();
    let mut tampered = token.clone();
    tampered.pop();

    assert!(decode(&tampered).is_err());
}
