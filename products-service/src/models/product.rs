use mongodb::bson::{oid::ObjectId, Bson, Document};
use serde::{Deserialize, Serialize};

/// Sample catalog inserted into an empty collection at startup.
pub const SAMPLE_PRODUCTS: [(&str, u32); 3] = [("orange", 44), ("banana", 33), ("grapes", 19)];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub kind: String,
    pub count: u32,
}

impl Product {
    pub fn new(kind: impl Into<String>, count: u32) -> Self {
        Self {
            id: None,
            kind: kind.into(),
            count,
        }
    }

    /// Read a stored document field by field. Integral doubles and 64-bit
    /// counts are accepted; anything without an ObjectId, a string `kind` or a
    /// non-negative integral `count` is rejected with the reason.
    pub fn from_stored(document: &Document) -> Result<Self, String> {
        let id = document
            .get_object_id("_id")
            .map_err(|_| "missing or non-ObjectId _id".to_string())?;
        let kind = document
            .get_str("kind")
            .map_err(|_| "missing or non-string kind".to_string())?;
        let count = match document.get("count") {
            Some(value) => stored_count(value)
                .ok_or_else(|| format!("count {} is not a non-negative integer", value))?,
            None => return Err("missing count".to_string()),
        };

        Ok(Self {
            id: Some(id),
            kind: kind.to_string(),
            count,
        })
    }
}

fn stored_count(value: &Bson) -> Option<u32> {
    match value {
        Bson::Int32(n) => u32::try_from(*n).ok(),
        Bson::Int64(n) => u32::try_from(*n).ok(),
        Bson::Double(f) if f.fract() == 0.0 && *f >= 0.0 && *f <= u32::MAX as f64 => {
            Some(*f as u32)
        }
        _ => None,
    }
}

pub fn sample_products() -> Vec<Product> {
    SAMPLE_PRODUCTS
        .iter()
        .map(|(kind, count)| Product::new(*kind, *count))
        .collect()
}
