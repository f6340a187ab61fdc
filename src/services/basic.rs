use actix_web::{get, web, HttpResponse, Responder};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
struct ApiVersion {
    api: &'static str,
}

#[get("/api")]
pub async fn api(state: web::Data<AppState>) -> impl Responder {
    state.api_load.apply();
    web::Json(ApiVersion { api: "v1" })
}

/// Catch-all for anything no other route claims. Answers 200 despite the text.
pub async fn fallback() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Generic 404 Message")
}
