pub mod products;

pub use products::{MissingId, ProductResponse};
