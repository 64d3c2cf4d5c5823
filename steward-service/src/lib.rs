// steward-service/src/lib.rs
pub mod app_state;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

pub use app_state::AppState;

#[cfg(test)]
mod tests;
