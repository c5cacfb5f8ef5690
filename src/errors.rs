use std::borrow::Cow;
use std::fmt;

use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse
};
use jsonwebtoken::errors::{ErrorKind, Error as JwtError};
use derive_more::Display;
use serde::Serialize;

use crate::constants::OWNER_NOT_FOUND;
use validator::ValidationErrors;

#[derive(Debug)]
pub enum AppError {
    ValidationError(Vec<FieldError>),
    NotFound(String),
    /// The upstream answered, but not with a 200.
    ExternalServiceUnavailable(String),
    /// The upstream could not be reached or sent an unreadable body.
    ExternalServiceUnreachable(String),
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ValidationError(errors) => {
                let messages = errors.iter()
                    .map(|e| format!("{}:{}", e.field, e.message))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "validation error: {}", messages)
            }
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::ExternalServiceUnavailable(msg) => write!(f, "External service unavailable: {}", msg),
            AppError::ExternalServiceUnreachable(msg) => write!(f, "External service unreachable: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal server error: {}", msg)
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::ValidationError(errors) => HttpResponse::build(self.status_code())
                .json(serde_json::json!({ "errors": errors })),
            AppError::NotFound(msg)
            | AppError::ExternalServiceUnavailable(msg)
            | AppError::ExternalServiceUnreachable(msg) => HttpResponse::build(self.status_code())
                .json(serde_json::json!({ "msg": msg })),
            AppError::InternalError(detail) => {
                tracing::error!(error = %detail, "Request failed with an internal error");
                HttpResponse::build(self.status_code())
                    .insert_header(ContentType::plaintext())
                    .body("Server error")
            }
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ExternalServiceUnavailable(_) => StatusCode::NOT_FOUND,
            AppError::ExternalServiceUnreachable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let field_errors = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                let field = to_camel_case(&field);
                errors.iter().map(move |e| FieldError {
                    field: field.clone(),
                    message: e
                        .message
                        .as_ref()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "Invalid value".to_string()),
                })
            })
            .collect();

        AppError::ValidationError(field_errors)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(e) if e.code() == Some(Cow::Borrowed("23503")) => {
                AppError::NotFound(OWNER_NOT_FOUND.into())
            }
            _ => AppError::InternalError(format!("Database error: {}", err))
        }
    }
}

/// Rust field names come out of `validator` in snake case; the wire uses camel case.
fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Display)]
pub enum AuthError {
    #[display("No token, authorization denied")]
    MissingCredentials,

    #[display("Token is not valid")]
    InvalidToken,

    #[display("Token is not valid")]
    TokenExpired,

    #[display("Token creation error")]
    TokenCreation,

    #[display("Missing JWT service")]
    MissingJwtService,
}

impl ResponseError for AuthError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({"msg": self.to_string()}))
    }

    fn status_code(&self) -> StatusCode {
        match *self {
            AuthError::MissingCredentials => StatusCode::UNAUTHORIZED,
            AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
            AuthError::TokenExpired => StatusCode::UNAUTHORIZED,
            AuthError::TokenCreation => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::MissingJwtService => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JwtError> for AuthError {
    fn from(e: JwtError) -> Self {
        match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        FieldError {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_cases_snake_field_names() {
        assert_eq!(to_camel_case("field_of_study"), "fieldOfStudy");
        assert_eq!(to_camel_case("status"), "status");
        assert_eq!(to_camel_case("fieldOfStudy"), "fieldOfStudy");
    }

    #[test]
    fn statuses_follow_the_taxonomy() {
        assert_eq!(AppError::ValidationError(vec![]).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::ExternalServiceUnavailable("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::ExternalServiceUnreachable("x".into()).status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(AppError::InternalError("x".into()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(AuthError::MissingCredentials.status_code(), StatusCode::UNAUTHORIZED);
    }
}
