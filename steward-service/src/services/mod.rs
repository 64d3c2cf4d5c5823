// steward-service/src/services/mod.rs
pub mod event_filter;
pub mod location_service;
pub mod staff_event_service;
pub mod visibility_gate;
