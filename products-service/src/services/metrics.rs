//! Metrics collection for products-service.

pub use service_core::observability::{get_metrics, init_metrics};

/// Record the outcome of a startup seeding run (`inserted` or `skipped`).
pub fn record_seed(outcome: &'static str) {
    metrics::counter!("products_seed_total", "outcome" => outcome).increment(1);
}

/// Record a product listing request (`ok` or `unavailable`).
pub fn record_list(outcome: &'static str) {
    metrics::counter!("products_list_total", "outcome" => outcome).increment(1);
}
