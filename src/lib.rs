pub mod config;
pub mod db;
pub mod error;
pub mod files;
pub mod models;
pub mod routes;
pub mod server;
pub mod service;

pub use config::Config;
pub use error::ServiceError;
pub use server::{AppState, build_router, start_server};
pub use service::{ClientService, PhotoUpload};
