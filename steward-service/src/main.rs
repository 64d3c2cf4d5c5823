//Third-party-dependencies
use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use log::info;

use steward_service::routes;
use steward_service::utils::config::AppConfig;
use steward_service::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env();
    std::fs::create_dir_all(&config.storage_path)?;

    info!("Server started at {}", config.server_address);
    info!(
        "Storage: {} | unrecognized visibility tiers: {:?}",
        config.storage_path.display(),
        config.visibility_fallback
    );

    let state = web::Data::new(AppState::from_config(&config));
    let cors_origin = config.cors_origin.clone();

    HttpServer::new(move || {
        let cors = match &cors_origin {
            Some(origin) => Cors::default()
                .allowed_origin(origin)
                .allow_any_method()
                .allow_any_header(),
            None => Cors::permissive(),
        };

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(routes::init_routes)
    })
    .bind(config.server_address.as_str())?
    .run()
    .await
}
