// steward-service/src/routes/mod.rs
use crate::utils::auth_middleware::Authentication;
use actix_web::{get, web, HttpResponse, Responder};

pub mod auth_routes;
pub mod location_routes;
pub mod staff_event_routes;
pub mod user_routes;

#[get("/")]
async fn index() -> impl Responder {
    HttpResponse::Ok().body("Steward service: locations and staff events for church administration.\nAuthenticate at /auth/login, then call /api/...")
}

// Register every route; everything under /api requires a bearer token
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .configure(auth_routes::init_routes)
        .service(
            web::scope("/api")
                .wrap(Authentication)
                .configure(auth_routes::init_protected_routes)
                .configure(user_routes::init_routes)
                .configure(staff_event_routes::init_routes)
                .configure(location_routes::init_routes),
        );
}
