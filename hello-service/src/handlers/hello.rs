use axum::{response::IntoResponse, Json};
use serde_json::json;

pub async fn say_hello() -> impl IntoResponse {
    Json(json!({ "message": "ok" }))
}
