pub mod health;
pub mod metrics;
pub mod products;

pub use health::{health_check, readiness_check};
pub use products::{list_products, project, PRODUCTS_UNAVAILABLE};
