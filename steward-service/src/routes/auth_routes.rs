use crate::models::{LoginResponse, RegisterRequest, Role, ServiceError, User, UserCredentials, UserProfile};
use crate::utils::validation::is_valid_email;
use crate::utils::{get_user_context_from_request, jwt, password};
use crate::AppState;
use actix_web::{get, post, web, HttpRequest, HttpResponse};
use chrono::Utc;
use log::{debug, error, info};
use serde_json::json;
use uuid::Uuid;

const MIN_PASSWORD_LEN: usize = 8;

// Register a new user. The first account of a tenant becomes its admin.
#[post("/auth/register")]
async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ServiceError> {
    info!("📝 Register request for email: {} tenant: {}", request.email, request.tenant_id);

    let email = request.email.trim().to_lowercase();
    if !is_valid_email(&email) {
        return Err(ServiceError::BadRequest("Invalid email address".to_string()));
    }
    if request.password.len() < MIN_PASSWORD_LEN {
        return Err(ServiceError::BadRequest(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }

    let user = User {
        id: Uuid::new_v4(),
        tenant_id: request.tenant_id,
        email,
        display_name: request.display_name.clone(),
        password_hash: password::hash_password(&request.password)?,
        role: Role::Staff,
        created_at: Utc::now(),
    };

    let user = state.store.register_user(user).map_err(|e| {
        error!("❌ Registration failed for {}: {}", request.email, e);
        e
    })?;

    info!("✅ User registered successfully: {} as {}", user.id, user.role);

    Ok(HttpResponse::Ok().json(json!({
        "message": "User registered successfully",
        "user_id": user.id,
        "role": user.role
    })))
}

// Login and get JWT token
#[post("/auth/login")]
async fn login(
    state: web::Data<AppState>,
    credentials: web::Json<UserCredentials>,
) -> Result<HttpResponse, ServiceError> {
    info!("🔑 Login request for email: {}", credentials.email);

    let user = match state.store.find_user_by_email(&credentials.email)? {
        Some(user) => user,
        None => {
            error!("❌ User not found: {}", credentials.email);
            return Err(ServiceError::Unauthorized);
        }
    };

    if !password::verify_password(&credentials.password, &user.password_hash)? {
        error!("❌ Invalid password for user: {}", credentials.email);
        return Err(ServiceError::Unauthorized);
    }

    let token = jwt::generate_token(&user)?;

    info!("✅ User logged in successfully: {}", user.id);

    let response = LoginResponse {
        token: token.clone(),
        user_id: user.id,
        tenant_id: user.tenant_id,
        email: user.email,
        role: user.role,
    };

    Ok(HttpResponse::Ok()
        .append_header(("Authorization", format!("Bearer {}", token)))
        .json(response))
}

// Get current user info (requires authentication)
#[get("/auth/me")]
async fn me(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse, ServiceError> {
    let context = get_user_context_from_request(&req)?;
    debug!("👤 Get user info request: {}", context.user_id);

    let user = match state.store.find_user_by_id(&context.user_id)? {
        Some(user) => user,
        None => {
            error!("❌ Session refers to unknown user: {}", context.user_id);
            return Err(ServiceError::Unauthorized);
        }
    };

    Ok(HttpResponse::Ok().json(UserProfile::from(&user)))
}

// Routes reachable without a token
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(register).service(login);
}

// Routes mounted behind the authentication middleware
pub fn init_protected_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(me);
}
