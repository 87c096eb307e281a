use crate::dtos::ProductResponse;
use crate::models::Product;
use crate::services::record_list;
use crate::startup::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

pub const PRODUCTS_UNAVAILABLE: &str = "Products are not available right now";

/// `GET /`: every stored product. A store failure is logged and answered
/// with 404 so the listener keeps serving.
pub async fn list_products(State(state): State<AppState>) -> Response {
    match state.db.list_products().await {
        Ok(products) => {
            record_list("ok");
            (StatusCode::OK, Json(project(products))).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to list products");
            record_list("unavailable");
            (StatusCode::NOT_FOUND, PRODUCTS_UNAVAILABLE).into_response()
        }
    }
}

/// Project stored products to the wire shape, leaving out any without an id.
pub fn project(products: Vec<Product>) -> Vec<ProductResponse> {
    products
        .into_iter()
        .filter_map(|product| match ProductResponse::try_from(product) {
            Ok(response) => Some(response),
            Err(missing) => {
                tracing::warn!(kind = %missing.kind, "Skipping product without an identifier");
                None
            }
        })
        .collect()
}
