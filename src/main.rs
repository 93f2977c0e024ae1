#![deny(clippy::wildcard_imports)]

use actix_web::{web, App, HttpServer};
use presidente_backend::routes;
use presidente_backend::ws::registry::RoomRegistry;
use presidente_backend::{Config, RoomStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    presidente_backend::telemetry::init_tracing();

    let config = Config::from_env();
    tracing::info!(
        data_dir = %config.data_dir.display(),
        "Starting Presidente backend on http://{}:{}",
        config.bind.0,
        config.bind.1
    );

    let store = RoomStore::new(config.data_dir.clone());
    let registry = RoomRegistry::new(store);

    let bind = config.bind.clone();
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::from(registry.clone()))
            .configure(routes::configure)
    })
    .bind(bind)?
    .run()
    .await
}
