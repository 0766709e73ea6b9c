use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::env;
use std::fmt::Debug;

#[derive(Debug)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        database_error(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        reqwest_error(err)
    }
}

impl From<oso::OsoError> for Error {
    fn from(err: oso::OsoError) -> Self {
        policy_error(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self.code {
            1..=99 => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
            103 => (StatusCode::NOT_FOUND, self.message.as_str()),
            104 => (StatusCode::FORBIDDEN, self.message.as_str()),
            105 | 106 => (StatusCode::UNAUTHORIZED, self.message.as_str()),
            _ => (StatusCode::UNPROCESSABLE_ENTITY, self.message.as_str()),
        };

        let body = Json(json!({
            "code": self.code,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub fn env_var_error(_: env::VarError) -> Error {
    Error {
        code: 1,
        message: "environment variable error".into(),
    }
}

pub fn database_error<T: Debug>(_: T) -> Error {
    Error {
        code: 2,
        message: "database error".into(),
    }
}

pub fn reqwest_error(_: reqwest::Error) -> Error {
    Error {
        code: 3,
        message: "reqwest error".into(),
    }
}

pub fn upstream_error() -> Error {
    Error {
        code: 4,
        message: "upstream error".into(),
    }
}

pub fn policy_error<T: Debug>(_: T) -> Error {
    Error {
        code: 5,
        message: "authorization policy error".into(),
    }
}

pub fn hash_error<T: Debug>(_: T) -> Error {
    Error {
        code: 6,
        message: "password hashing error".into(),
    }
}

pub fn validation_error() -> Error {
    Error {
        code: 101,
        message: "invalid input".into(),
    }
}

pub fn geocode_error() -> Error {
    Error {
        code: 102,
        message: "could not resolve the specified address".into(),
    }
}

pub fn not_found_error() -> Error {
    Error {
        code: 103,
        message: "not found".into(),
    }
}

pub fn forbidden_error() -> Error {
    Error {
        code: 104,
        message: "not allowed".into(),
    }
}

pub fn unauthenticated_error() -> Error {
    Error {
        code: 105,
        message: "authentication required".into(),
    }
}

pub fn credentials_error() -> Error {
    Error {
        code: 106,
        message: "invalid credentials".into(),
    }
}

pub fn duplicate_email_error() -> Error {
    Error {
        code: 107,
        message: "email already registered".into(),
    }
}
