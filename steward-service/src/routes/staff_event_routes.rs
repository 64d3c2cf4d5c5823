use crate::models::{
    CreateCategoryRequest, CreateStaffEventRequest, Role, ServiceError, StaffEventListQuery, STAFF_EVENT_TYPE,
};
use crate::services::event_filter::{filter_events, FilterQuery};
use crate::services::staff_event_service::{build_category, build_staff_event, EventViewBuilder};
use crate::utils::{get_user_context_from_request, require_role};
use crate::AppState;
use actix_web::{get, post, web, HttpRequest, HttpResponse};
use log::{error, info};
use uuid::Uuid;

// Staff events the caller may see, narrowed by search text and filters
#[get("/staff-events")]
async fn list_staff_events(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<StaffEventListQuery>,
) -> Result<HttpResponse, ServiceError> {
    let context = get_user_context_from_request(&req)?;
    let filter = FilterQuery::from_request(&query)?;

    info!(
        "📋 Fetching staff events for tenant: {} as {}",
        context.tenant_id, context.role
    );

    let events = state
        .store
        .list_events_by_type(&context.tenant_id, STAFF_EVENT_TYPE)
        .map_err(|e| {
            error!("❌ Error fetching staff events: {}", e);
            e
        })?;
    let total = events.len();

    let visible = filter_events(&state.gate, events, context.role, &filter);
    let views = EventViewBuilder::load(&state.store, &context.tenant_id)?;
    let response: Vec<_> = visible.into_iter().map(|event| views.view(event)).collect();

    info!("✅ Returning {} of {} staff events", response.len(), total);

    Ok(HttpResponse::Ok().json(response))
}

// Create a staff event from the dialog form
#[post("/staff-events")]
async fn create_staff_event(
    req: HttpRequest,
    state: web::Data<AppState>,
    form: web::Json<CreateStaffEventRequest>,
) -> Result<HttpResponse, ServiceError> {
    let context = get_user_context_from_request(&req)?;

    info!("📝 Creating staff event: {} for tenant: {}", form.title, context.tenant_id);

    let event = build_staff_event(&state.store, &context, &form)?;
    state.store.save_event(&event).map_err(|e| {
        error!("❌ Error creating staff event: {}", e);
        e
    })?;

    info!("✅ Staff event created: {}", event.id);

    let views = EventViewBuilder::load(&state.store, &context.tenant_id)?;
    Ok(HttpResponse::Created().json(views.view(event)))
}

// Detail of one staff event. Events hidden from the caller look missing.
#[get("/staff-events/{event_id}")]
async fn get_staff_event(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let context = get_user_context_from_request(&req)?;
    let event_id = path.into_inner();

    info!("🔍 Fetching staff event: {} for user: {}", event_id, context.user_id);

    let event = match state.store.find_event(&context.tenant_id, &event_id)? {
        Some(event) if event.event_type == STAFF_EVENT_TYPE => event,
        _ => {
            error!("❌ Staff event not found: {}", event_id);
            return Err(ServiceError::NotFound);
        }
    };

    if !state.gate.can_view(context.role, &event.visibility_level) {
        error!(
            "❌ User: {} ({}) cannot view event: {} ({})",
            context.user_id, context.role, event_id, event.visibility_level
        );
        return Err(ServiceError::NotFound);
    }

    let views = EventViewBuilder::load(&state.store, &context.tenant_id)?;
    Ok(HttpResponse::Ok().json(views.view(event)))
}

#[get("/staff-event-categories")]
async fn list_categories(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse, ServiceError> {
    let context = get_user_context_from_request(&req)?;

    info!("📋 Fetching staff event categories for tenant: {}", context.tenant_id);

    let categories = state.store.list_active_categories(&context.tenant_id)?;
    Ok(HttpResponse::Ok().json(categories))
}

#[post("/staff-event-categories")]
async fn create_category(
    req: HttpRequest,
    state: web::Data<AppState>,
    form: web::Json<CreateCategoryRequest>,
) -> Result<HttpResponse, ServiceError> {
    let context = get_user_context_from_request(&req)?;
    require_role(&context, Role::Admin)?;

    info!("📝 Creating staff event category: {}", form.name);

    let category = build_category(&context, &form)?;
    state.store.save_category(&category)?;

    Ok(HttpResponse::Created().json(category))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_staff_events)
        .service(create_staff_event)
        .service(get_staff_event)
        .service(list_categories)
        .service(create_category);
}
