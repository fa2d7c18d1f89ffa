pub mod config;
pub mod database;
pub mod middleware;
mod repository;
mod service_provider;
pub mod telemetry;

pub use service_provider::{RentalRepos, ServiceProvider};
