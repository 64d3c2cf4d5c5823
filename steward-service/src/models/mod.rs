// steward-service/src/models/mod.rs
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

pub mod access;
pub use access::*;

pub mod staff_event;
pub use staff_event::*;

pub mod location;
pub use location::*;

// User models for authentication
#[derive(Serialize, Deserialize, Debug)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub tenant_id: Uuid,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct UserCredentials {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub email: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub password_hash: String,
    pub role: Role,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_at: DateTime<Utc>,
}

// User record without credentials, safe to return from the API
#[derive(Serialize, Debug, Clone)]
pub struct UserProfile {
    pub user_id: Uuid,
    pub tenant_id: Uuid,
    pub email: String,
    pub display_name: String,
    pub role: Role,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            tenant_id: user.tenant_id,
            email: user.email.clone(),
            display_name: user
                .display_name
                .clone()
                .unwrap_or_else(|| user.email.split('@').next().unwrap_or(&user.email).to_string()),
            role: user.role,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub token: String,
    pub user_id: Uuid,
    pub tenant_id: Uuid,
    pub email: String,
    pub role: Role,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct UpdateRoleRequest {
    pub role: Role,
}

// JWT claims; they carry the whole session context
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub tenant_id: Uuid,
    pub role: Role,
    pub exp: usize,
    pub iat: usize,
}

// Custom error types
#[derive(Debug, Display)]
pub enum ServiceError {
    #[display(fmt = "Internal Server Error")]
    InternalServerError,
    #[display(fmt = "BadRequest: {}", _0)]
    BadRequest(String),
    #[display(fmt = "Unauthorized")]
    Unauthorized,
    #[display(fmt = "Not Found")]
    NotFound,
    #[display(fmt = "Forbidden")]
    Forbidden,
    #[display(fmt = "Conflict: {}", _0)]
    Conflict(String),
}

impl std::error::Error for ServiceError {}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::Unauthorized => StatusCode::UNAUTHORIZED,
            ServiceError::NotFound => StatusCode::NOT_FOUND,
            ServiceError::Forbidden => StatusCode::FORBIDDEN,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            ServiceError::InternalServerError => "Internal Server Error".to_string(),
            ServiceError::BadRequest(ref message) => message.clone(),
            ServiceError::Unauthorized => "Unauthorized".to_string(),
            ServiceError::NotFound => "Not Found".to_string(),
            ServiceError::Forbidden => {
                "Forbidden: You don't have permission to access this resource".to_string()
            }
            ServiceError::Conflict(ref message) => message.clone(),
        };
        HttpResponse::build(self.status_code()).json(json!({ "error": message }))
    }
}
