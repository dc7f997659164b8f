use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::env;
use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        reqwest_error(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self.code {
            1..=99 => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
            _ => (StatusCode::BAD_REQUEST, self.message.as_str()),
        };

        // `error` is read by the location endpoint's callers, `message` by the courier ones
        let body = Json(json!({
            "code": self.code,
            "error": error_message,
            "message": error_message,
        }));

        (status, body).into_response()
    }
}

pub fn invalid_input_with(message: impl Into<String>) -> Error {
    Error {
        code: 101,
        message: message.into(),
    }
}

pub fn not_found_error() -> Error {
    Error {
        code: 102,
        message: "not found".into(),
    }
}

/// A failure message reported by a remote service, passed through verbatim.
pub fn rejected_error(message: impl Into<String>) -> Error {
    Error {
        code: 103,
        message: message.into(),
    }
}

pub fn env_var_error(err: env::VarError) -> Error {
    Error {
        code: 1,
        message: format!("environment variable error: {}", err),
    }
}

pub fn reqwest_error(err: reqwest::Error) -> Error {
    Error {
        code: 3,
        message: err.to_string(),
    }
}

pub fn upstream_error(message: impl Into<String>) -> Error {
    Error {
        code: 4,
        message: message.into(),
    }
}

pub fn config_error(message: impl Into<String>) -> Error {
    Error {
        code: 7,
        message: message.into(),
    }
}
