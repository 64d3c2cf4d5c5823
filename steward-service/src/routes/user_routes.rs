use crate::models::{Role, ServiceError, UpdateRoleRequest, UserProfile};
use crate::utils::{get_user_context_from_request, require_role};
use crate::AppState;
use actix_web::{get, put, web, HttpRequest, HttpResponse};
use log::{error, info};
use serde_json::json;
use uuid::Uuid;

// List the users of the caller's tenant
#[get("/users")]
async fn list_users(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse, ServiceError> {
    let context = get_user_context_from_request(&req)?;
    require_role(&context, Role::Hr)?;

    info!("📋 Fetching users for tenant: {}", context.tenant_id);

    let users: Vec<UserProfile> = state
        .store
        .list_users_for_tenant(&context.tenant_id)?
        .iter()
        .map(UserProfile::from)
        .collect();

    info!("✅ Found {} users for tenant: {}", users.len(), context.tenant_id);

    Ok(HttpResponse::Ok().json(users))
}

// Change a user's role; admins only, within their own tenant
#[put("/users/{user_id}/role")]
async fn update_user_role(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    data: web::Json<UpdateRoleRequest>,
) -> Result<HttpResponse, ServiceError> {
    let context = get_user_context_from_request(&req)?;
    let target_user_id = path.into_inner();

    info!("🔄 Updating role for user: {} to {}", target_user_id, data.role);

    if let Err(err) = require_role(&context, Role::Admin) {
        error!("❌ Only admins can update roles, caller: {}", context.user_id);
        return Err(err);
    }

    if target_user_id == context.user_id && data.role != Role::Admin {
        return Err(ServiceError::BadRequest("Admins cannot demote themselves".to_string()));
    }

    let mut user = match state.store.find_user_by_id(&target_user_id)? {
        Some(user) if user.tenant_id == context.tenant_id => user,
        _ => {
            error!("❌ User not found in tenant: {}", target_user_id);
            return Err(ServiceError::NotFound);
        }
    };

    user.role = data.role;
    state.store.save_user(&user)?;

    info!("✅ User: {} is now {}", user.id, user.role);

    Ok(HttpResponse::Ok().json(json!({
        "message": format!("User role updated to: {}", user.role),
        "user_id": user.id,
        "role": user.role
    })))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_users).service(update_user_role);
}
