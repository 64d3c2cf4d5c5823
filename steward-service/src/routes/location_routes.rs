use crate::models::{
    BookingView, CreateBookingRequest, CreateLocationRequest, LocationDetail, RecordUsageRequest, Role, ServiceError,
    UsageQuery,
};
use crate::services::location_service::{
    booking_views, build_booking, build_location, build_usage, location_view, usage_views,
    UPCOMING_BOOKINGS_LIMIT,
};
use crate::utils::{get_user_context_from_request, require_role, UserContext};
use crate::AppState;
use actix_web::{get, post, web, HttpRequest, HttpResponse};
use chrono::Utc;
use log::{error, info};
use uuid::Uuid;

// Active locations as dashboard cards
#[get("/locations")]
async fn list_locations(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse, ServiceError> {
    let context = get_user_context_from_request(&req)?;

    info!("📋 Fetching locations for tenant: {}", context.tenant_id);

    let locations = state.store.list_active_locations(&context.tenant_id).map_err(|e| {
        error!("❌ Error fetching locations: {}", e);
        e
    })?;
    let cards: Vec<_> = locations.into_iter().map(location_view).collect();

    info!("✅ Found {} locations", cards.len());

    Ok(HttpResponse::Ok().json(cards))
}

#[post("/locations")]
async fn create_location(
    req: HttpRequest,
    state: web::Data<AppState>,
    form: web::Json<CreateLocationRequest>,
) -> Result<HttpResponse, ServiceError> {
    let context = get_user_context_from_request(&req)?;
    require_role(&context, Role::Admin)?;

    info!("📝 Creating location: {} for tenant: {}", form.name, context.tenant_id);

    let location = build_location(&context, &form)?;
    state.store.save_location(&location).map_err(|e| {
        error!("❌ Error creating location: {}", e);
        e
    })?;

    info!("✅ Location created: {}", location.id);

    Ok(HttpResponse::Created().json(location_view(location)))
}

// Usage statistics for one reporting period; defaults to this month's snapshot
#[get("/locations/analytics")]
async fn get_usage_analytics(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<UsageQuery>,
) -> Result<HttpResponse, ServiceError> {
    let context = get_user_context_from_request(&req)?;
    let period = query.period.unwrap_or_default();
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());

    info!(
        "📊 Fetching {:?} usage analytics for tenant: {} on {}",
        period, context.tenant_id, date
    );

    let rows = state.store.list_usage_analytics(&context.tenant_id, period, date).map_err(|e| {
        error!("❌ Error fetching analytics: {}", e);
        e
    })?;
    let locations = state.store.list_all_locations(&context.tenant_id)?;

    Ok(HttpResponse::Ok().json(usage_views(rows, &locations)))
}

#[post("/locations/analytics")]
async fn record_usage_analytics(
    req: HttpRequest,
    state: web::Data<AppState>,
    form: web::Json<RecordUsageRequest>,
) -> Result<HttpResponse, ServiceError> {
    let context = get_user_context_from_request(&req)?;
    require_role(&context, Role::Admin)?;

    if state.store.find_location(&context.tenant_id, &form.location_id)?.is_none() {
        error!("❌ Location not found: {}", form.location_id);
        return Err(ServiceError::NotFound);
    }

    let stats = build_usage(&context, &form)?;
    let saved = state.store.save_usage_analytics(&stats)?;

    Ok(HttpResponse::Ok().json(saved))
}

fn upcoming(
    state: &AppState,
    context: &UserContext,
    location_id: &Uuid,
) -> Result<Vec<BookingView>, ServiceError> {
    let bookings = state
        .store
        .upcoming_bookings(&context.tenant_id, location_id, Utc::now(), UPCOMING_BOOKINGS_LIMIT)
        .map_err(|e| {
            error!("❌ Error fetching bookings: {}", e);
            e
        })?;
    booking_views(&state.store, &context.tenant_id, bookings)
}

// Location detail with its next confirmed bookings
#[get("/locations/{location_id}")]
async fn get_location(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let context = get_user_context_from_request(&req)?;
    let location_id = path.into_inner();

    info!("🔍 Fetching location: {}", location_id);

    let location = match state.store.find_location(&context.tenant_id, &location_id)? {
        Some(location) => location,
        None => {
            error!("❌ Location not found: {}", location_id);
            return Err(ServiceError::NotFound);
        }
    };

    let upcoming_bookings = upcoming(&state, &context, &location_id)?;

    Ok(HttpResponse::Ok().json(LocationDetail {
        location: location_view(location),
        upcoming_bookings,
    }))
}

#[get("/locations/{location_id}/bookings")]
async fn list_location_bookings(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let context = get_user_context_from_request(&req)?;
    let location_id = path.into_inner();

    if state.store.find_location(&context.tenant_id, &location_id)?.is_none() {
        return Err(ServiceError::NotFound);
    }

    Ok(HttpResponse::Ok().json(upcoming(&state, &context, &location_id)?))
}

#[post("/locations/{location_id}/bookings")]
async fn create_booking(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    form: web::Json<CreateBookingRequest>,
) -> Result<HttpResponse, ServiceError> {
    let context = get_user_context_from_request(&req)?;
    let location_id = path.into_inner();

    info!("📅 Booking location: {} for: {}", location_id, form.title);

    let location = match state.store.find_location(&context.tenant_id, &location_id)? {
        Some(location) => location,
        None => {
            error!("❌ Location not found: {}", location_id);
            return Err(ServiceError::NotFound);
        }
    };

    let booking = build_booking(&state.store, &context, &location, &form)?;
    state.store.save_booking(&booking)?;

    info!("✅ Booking created: {} ({:?})", booking.id, booking.booking_status);

    Ok(HttpResponse::Created().json(booking))
}

// The analytics routes are registered ahead of /locations/{location_id}
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(get_usage_analytics)
        .service(record_usage_analytics)
        .service(list_locations)
        .service(create_location)
        .service(get_location)
        .service(list_location_bookings)
        .service(create_booking);
}
