use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::env;
use std::fmt::{self, Debug, Display};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl Error {
    pub fn is_invalid_input_error(&self) -> bool {
        self.code == 101
    }

    pub fn is_unauthorized_error(&self) -> bool {
        self.code == 102
    }

    pub fn is_not_found_error(&self) -> bool {
        self.code == 103
    }

    pub fn is_subscription_required_error(&self) -> bool {
        self.code == 104
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.code)
    }
}

impl std::error::Error for Error {}

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

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        serialization_error(err)
    }
}

impl From<oso::OsoError> for Error {
    fn from(err: oso::OsoError) -> Self {
        authorizor_error(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self.code {
            1..=99 => {
                tracing::error!("internal error: {}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
            102 => (StatusCode::FORBIDDEN, self.message.as_str()),
            103 => (StatusCode::NOT_FOUND, self.message.as_str()),
            104 => (StatusCode::PAYMENT_REQUIRED, self.message.as_str()),
            _ => (StatusCode::BAD_REQUEST, self.message.as_str()),
        };

        let body = Json(json!({
            "code": self.code,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub fn invalid_input_error() -> Error {
    Error {
        code: 101,
        message: "invalid input".into(),
    }
}

pub fn unauthorized_error() -> Error {
    Error {
        code: 102,
        message: "unauthorized".into(),
    }
}

pub fn not_found_error() -> Error {
    Error {
        code: 103,
        message: "not found".into(),
    }
}

pub fn subscription_required_error() -> Error {
    Error {
        code: 104,
        message: "subscription required".into(),
    }
}

pub fn env_var_error(_: env::VarError) -> Error {
    Error {
        code: 1,
        message: "environment variable error".into(),
    }
}

pub fn database_error<T: Debug>(err: T) -> Error {
    tracing::error!("database error: {:?}", err);

    Error {
        code: 2,
        message: "database error".into(),
    }
}

pub fn serialization_error<T: Debug>(err: T) -> Error {
    tracing::error!("serialization error: {:?}", err);

    Error {
        code: 3,
        message: "serialization error".into(),
    }
}

pub fn authorizor_error<T: Debug>(err: T) -> Error {
    tracing::error!("authorizor error: {:?}", err);

    Error {
        code: 4,
        message: "authorizor error".into(),
    }
}

pub fn server_error<T: Debug>(err: T) -> Error {
    tracing::error!("server error: {:?}", err);

    Error {
        code: 5,
        message: "server error".into(),
    }
}

#[test]
fn caller_errors_keep_their_message() {
    let err = Error {
        message: "Please enter your email.".into(),
        ..invalid_input_error()
    };

    assert!(err.is_invalid_input_error());
    assert_eq!(err.message, "Please enter your email.");
    assert_eq!(err.to_string(), "Please enter your email. (101)");
}

#[test]
fn error_status_codes() {
    assert_eq!(
        server_error("bind failed").into_response().status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
        unauthorized_error().into_response().status(),
        StatusCode::FORBIDDEN
    );
    assert_eq!(
        not_found_error().into_response().status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        subscription_required_error().into_response().status(),
        StatusCode::PAYMENT_REQUIRED
    );
    assert_eq!(
        invalid_input_error().into_response().status(),
        StatusCode::BAD_REQUEST
    );
}
