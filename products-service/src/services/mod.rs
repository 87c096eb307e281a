pub mod database;
pub mod metrics;

pub use database::ProductDb;
pub use self::metrics::{get_metrics, init_metrics, record_list, record_seed};
