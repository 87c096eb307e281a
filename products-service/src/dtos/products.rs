use crate::models::Product;
use serde::Serialize;

/// Wire shape of a stored product.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub kind: String,
    pub count: u32,
}

/// The product has not been stored yet, so there is no identifier to send.
#[derive(Debug, Clone, PartialEq)]
pub struct MissingId {
    pub kind: String,
}

impl TryFrom<Product> for ProductResponse {
    type Error = MissingId;

    fn try_from(product: Product) -> Result<Self, Self::Error> {
        match product.id {
            Some(id) => Ok(Self {
                id: id.to_hex(),
                kind: product.kind,
                count: product.count,
            }),
            None => Err(MissingId { kind: product.kind }),
        }
    }
}
