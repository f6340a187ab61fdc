use std::time::Instant;

use actix_web::{middleware::Logger, web, HttpServer};
use clap::Parser;
use log::{error, info};

use user_registry::{
    build_app, config::Config, services::health::Readiness, startup::prepare_database,
    utils::ArtificialLoad, AppState,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let started_at = Instant::now();

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    pretty_env_logger::init();

    let config = Config::parse();

    let db = match prepare_database(&config).await {
        Ok(db) => db,
        Err(why) => {
            error!("{}", why);
            return Ok(());
        }
    };

    let state = web::Data::new(AppState {
        db,
        readiness: Readiness::new(started_at, config.readiness_delay()),
        api_load: ArtificialLoad::new(config.api_load_iterations),
    });

    info!("Listening on {}:{}", config.bind, config.port);
    HttpServer::new(move || build_app(state.clone()).wrap(Logger::default()))
        .bind((config.bind, config.port))?
        .run()
        .await
}
