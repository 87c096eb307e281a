//! service-core: Shared infrastructure for the product catalog services.
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
