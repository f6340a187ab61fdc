//! HTTP service that stores users in a single `users` table and answers
//! liveness and readiness probes.

use std::sync::Arc;

use actix_web::{
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error,
};

pub mod config;
pub mod db;
pub mod models;
pub mod services;
pub mod startup;
pub mod utils;

use db::QueryExecutor;
use services::health::Readiness;
use utils::ArtificialLoad;

/// Shared by every request handler.
pub struct AppState {
    pub db: Arc<dyn QueryExecutor>,
    pub readiness: Readiness,
    pub api_load: ArtificialLoad,
}

/// Builds the application with every route plus the catch-all fallback.
pub fn build_app(
    state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .configure(services::configure)
        .default_service(web::to(services::basic::fallback))
}
