use actix_web::{middleware, web, App, HttpServer};
use anyhow::Context;
use campus_notify_lib::api::configure;
use campus_notify_lib::common::{AppState, Config, FcmGateway, FirestoreDirectory};
use dotenv::dotenv;
use firestore::FirestoreDb;
use log::info;
use std::io::ErrorKind;
use std::sync::Arc;

async fn setup_state(config: &Config) -> anyhow::Result<AppState> {
    let db = FirestoreDb::new(&config.project_id)
        .await
        .context("failed to connect firestore")?;
    let gateway = FcmGateway::new(&config.project_id, reqwest::Client::new())
        .await
        .context("failed to set up fcm")?;

    Ok(AppState::new(
        Arc::new(gateway),
        Arc::new(FirestoreDirectory::new(db)),
    ))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env()
        .map_err(|e| std::io::Error::new(ErrorKind::Other, format!("{:#}", e)))?;
    let state = setup_state(&config)
        .await
        .map_err(|e| std::io::Error::new(ErrorKind::Other, format!("{:#}", e)))?;
    let state = web::Data::new(state);

    info!("listening on {}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .keep_alive(config.keep_alive)
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
