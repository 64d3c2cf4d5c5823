// steward-service/src/utils/mod.rs
use crate::models::{Claims, Role, ServiceError, User};
use actix_web::http::header;
use actix_web::{dev::ServiceRequest, HttpMessage, HttpRequest};
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use log::debug;
use std::env;
use uuid::Uuid;

pub mod config;
pub mod event_storage;
pub mod location_storage;
pub mod store;
pub mod user_storage;
pub mod validation;

// Session context of an authenticated request, taken from the stored user the token names
#[derive(Debug, Clone, PartialEq)]
pub struct UserContext {
    pub user_id: Uuid,
    pub email: String,
    pub tenant_id: Uuid,
    pub role: Role,
}

impl From<User> for UserContext {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            email: user.email,
            tenant_id: user.tenant_id,
            role: user.role,
        }
    }
}

// Pull the session context the authentication middleware attached to the request
pub fn get_user_context_from_request(req: &HttpRequest) -> Result<UserContext, ServiceError> {
    req.extensions()
        .get::<UserContext>()
        .cloned()
        .ok_or(ServiceError::Unauthorized)
}

// Fails with Forbidden unless the session holds at least `minimum`
pub fn require_role(context: &UserContext, minimum: Role) -> Result<(), ServiceError> {
    if context.role >= minimum {
        Ok(())
    } else {
        debug!(
            "Role {} below required {} for user: {}",
            context.role, minimum, context.user_id
        );
        Err(ServiceError::Forbidden)
    }
}

// JWT utility functions
pub mod jwt {
    use super::*;

    const TOKEN_LIFETIME_DAYS: i64 = 7;

    // Get JWT secret from environment or use default
    fn get_jwt_secret() -> String {
        env::var("JWT_SECRET").unwrap_or_else(|_| "steward_development_secret".to_string())
    }

    // Generate a new JWT token carrying the user's tenant and role
    pub fn generate_token(user: &User) -> Result<String, ServiceError> {
        let secret = get_jwt_secret();
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(Duration::days(TOKEN_LIFETIME_DAYS))
            .ok_or(ServiceError::InternalServerError)?
            .timestamp() as usize;

        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            tenant_id: user.tenant_id,
            role: user.role,
            exp: expiration,
            iat: now.timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_ref()),
        )
        .map_err(|_| ServiceError::InternalServerError)
    }

    // Validate and decode a JWT token
    pub fn decode_token(token: &str) -> Result<Claims, ServiceError> {
        let secret = get_jwt_secret();

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_ref()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|_| ServiceError::Unauthorized)
    }

    // Extract JWT from Authorization header
    pub fn extract_token_from_header(auth_header: &str) -> Result<String, ServiceError> {
        if !auth_header.starts_with("Bearer ") {
            return Err(ServiceError::Unauthorized);
        }

        Ok(auth_header.trim_start_matches("Bearer ").to_string())
    }
}

// Password utility functions
pub mod password {
    use super::*;

    // Cheap hashes keep the test suite fast
    const HASH_COST: u32 = if cfg!(test) { 4 } else { DEFAULT_COST };

    pub fn hash_password(password: &str) -> Result<String, ServiceError> {
        hash(password, HASH_COST).map_err(|_| ServiceError::InternalServerError)
    }

    pub fn verify_password(password: &str, hash: &str) -> Result<bool, ServiceError> {
        verify(password, hash).map_err(|_| ServiceError::InternalServerError)
    }
}

// Middleware for JWT authentication
pub mod auth_middleware {
    use super::*;
    use crate::AppState;
    use actix_web::dev::{forward_ready, Service, ServiceResponse, Transform};
    use actix_web::{web, Error};
    use log::error;
    use futures::future::{ok, Ready};
    use std::future::Future;
    use std::pin::Pin;

    pub struct Authentication;

    impl<S, B> Transform<S, ServiceRequest> for Authentication
    where
        S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
        S::Future: 'static,
        B: 'static,
    {
        type Response = ServiceResponse<B>;
        type Error = Error;
        type Transform = AuthenticationMiddleware<S>;
        type InitError = ();
        type Future = Ready<Result<Self::Transform, Self::InitError>>;

        fn new_transform(&self, service: S) -> Self::Future {
            ok(AuthenticationMiddleware { service })
        }
    }

    pub struct AuthenticationMiddleware<S> {
        service: S,
    }

    /// Resolve the request's bearer token into a session context.
    ///
    /// The token only identifies the user; role and tenant are read from the
    /// stored user on every request so role changes apply to live sessions.
    fn authenticate(req: &ServiceRequest) -> Result<UserContext, ServiceError> {
        let auth_header = req
            .headers()
            .get(header::AUTHORIZATION)
            .ok_or(ServiceError::Unauthorized)?;
        let auth_str = auth_header.to_str().map_err(|_| ServiceError::Unauthorized)?;
        let token = jwt::extract_token_from_header(auth_str)?;
        let claims = jwt::decode_token(&token)?;

        let state = req.app_data::<web::Data<AppState>>().ok_or_else(|| {
            error!("❌ Application state missing from request");
            ServiceError::InternalServerError
        })?;
        match state.store.find_user_by_id(&claims.sub)? {
            Some(user) => Ok(UserContext::from(user)),
            None => {
                debug!("Token refers to unknown user: {}", claims.sub);
                Err(ServiceError::Unauthorized)
            }
        }
    }

    impl<S, B> Service<ServiceRequest> for AuthenticationMiddleware<S>
    where
        S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
        S::Future: 'static,
        B: 'static,
    {
        type Response = ServiceResponse<B>;
        type Error = Error;
        type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

        forward_ready!(service);

        fn call(&self, req: ServiceRequest) -> Self::Future {
            match authenticate(&req) {
                Ok(context) => {
                    debug!("Authenticated user: {} tenant: {}", context.user_id, context.tenant_id);
                    // Add the session to the request extensions
                    req.extensions_mut().insert(context);
                    let fut = self.service.call(req);
                    Box::pin(async move { fut.await })
                }
                Err(err) => {
                    debug!("Rejected request to {}: {}", req.path(), err);
                    Box::pin(async move { Err(err.into()) })
                }
            }
        }
    }
}
