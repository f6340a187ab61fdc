use std::time::{Duration, Instant};

use actix_web::{get, web, HttpResponse, Responder};
use log::info;

use crate::AppState;

/// Time-based readiness: ready once `delay` has passed since `started_at`.
///
/// Independent of storage health.
#[derive(Debug, Clone, Copy)]
pub struct Readiness {
    started_at: Instant,
    delay: Duration,
}

impl Readiness {
    pub fn new(started_at: Instant, delay: Duration) -> Self {
        Readiness { started_at, delay }
    }

    pub fn is_ready(&self) -> bool {
        self.is_ready_at(Instant::now())
    }

    pub fn is_ready_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started_at) > self.delay
    }
}

#[get("/_healthz")]
pub async fn healthz() -> impl Responder {
    "OK"
}

#[get("/_readyz")]
pub async fn readyz(state: web::Data<AppState>) -> HttpResponse {
    info!("Readycheck");
    if state.readiness.is_ready() {
        HttpResponse::Ok().body("OK")
    } else {
        HttpResponse::InternalServerError().finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_ready_until_delay_has_strictly_passed() {
        let start = Instant::now();
        let readiness = Readiness::new(start, Duration::from_millis(4000));

        assert!(!readiness.is_ready_at(start));
        assert!(!readiness.is_ready_at(start + Duration::from_millis(4000)));
        assert!(readiness.is_ready_at(start + Duration::from_millis(4001)));
    }

    #[test]
    fn clock_before_start_is_not_ready() {
        let start = Instant::now() + Duration::from_secs(1);
        let readiness = Readiness::new(start, Duration::ZERO);
        assert!(!readiness.is_ready_at(Instant::now()));
    }
}
