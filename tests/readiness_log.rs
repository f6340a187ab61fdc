//! Lives in its own binary because it installs the global logger.

use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use actix_web::{http::StatusCode, test, web};
use log::{Level, LevelFilter, Log, Metadata, Record};

use user_registry::{
    build_app, db::SqliteExecutor, services::health::Readiness, utils::ArtificialLoad, AppState,
};

struct CapturingLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for CapturingLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut records) = self.records.lock() {
            records.push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: CapturingLogger = CapturingLogger {
    records: Mutex::new(Vec::new()),
};

#[actix_web::test]
async fn every_readiness_check_is_logged_at_info() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Info);

    let state = web::Data::new(AppState {
        db: Arc::new(SqliteExecutor::open_in_memory().unwrap()),
        readiness: Readiness::new(Instant::now(), Duration::from_secs(3600)),
        api_load: ArtificialLoad::new(0),
    });
    let app = test::init_service(build_app(state)).await;

    for _ in 0..2 {
        let req = test::TestRequest::get().uri("/_readyz").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    let records = LOGGER.records.lock().unwrap();
    let checks = records
        .iter()
        .filter(|(level, message)| *level == Level::Info && message == "Readycheck")
        .count();
    assert_eq!(checks, 2);
}
