use actix_web::web;

pub mod basic;
pub mod health;
pub mod users;

/// Registers every route. Each one guards on its method, so a wrong method
/// falls through to the app's default service like an unknown path does.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(users::add_user)
        .service(users::users)
        .service(health::healthz)
        .service(health::readyz)
        .service(basic::api);
}
