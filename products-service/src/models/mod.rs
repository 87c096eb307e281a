pub mod product;

pub use product::{sample_products, Product, SAMPLE_PRODUCTS};
