pub mod analysis;
pub mod app_state;
pub mod config;
pub mod extractor;
pub mod fetcher;
pub mod health;
pub mod routes;
pub mod tables;
pub mod verify;
