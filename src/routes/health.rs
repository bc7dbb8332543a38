use actix_web::{get, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;

/// Liveness probe: service name, status, and timestamp.
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "service": "duetrack",
        "status": "ok",
        "timestamp": Utc::now()
    }))
}
