#[macro_use]
extern crate log;
extern crate pretty_env_logger;

use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use campus_eats::api;
use campus_eats::auth::config::dev_bypass_token_from_env;
use campus_eats::auth::{AdminJwtConfig, AuthLayer, FirebaseAuthConfig, JwksCache};
use campus_eats::config::{AdminSeedConfig, MessConfig, ServerConfig};
use campus_eats::db::{establish_connection_pool, run_db_migrations};
use campus_eats::AppState;
use dotenvy::dotenv;
use utoipa_actix_web::AppExt;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = dotenv() {
        eprintln!("Failed to load .env file: {}", e);
    }

    // Setup logging
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    pretty_env_logger::init();

    let server_cfg = ServerConfig::from_env();
    let firebase_cfg = FirebaseAuthConfig::from_env();
    let admin_jwt_cfg = AdminJwtConfig::from_env();
    let admin_seed = AdminSeedConfig::from_env();
    let mess_cfg = MessConfig::from_env();

    info!("Initializing database connection pool...");
    let pool = establish_connection_pool(&server_cfg.database_url, server_cfg.pool_size)
        .map_err(|e| std::io::Error::other(format!("connection pool: {e}")))?;
    run_db_migrations(pool.clone())
        .map_err(|e| std::io::Error::other(format!("migrations: {e}")))?;

    let seed = match mess_cfg.load_seed() {
        Ok(seed) => seed,
        Err(e) => {
            warn!("Mess menu not loaded, starting without it: {}", e);
            Default::default()
        }
    };

    let state = AppState::new(
        pool,
        admin_seed.pepper.clone(),
        seed.quotes.clone(),
        mess_cfg.tz,
        admin_jwt_cfg.clone(),
    );

    match state.mess_ops.seed_menu(&seed) {
        Ok(0) => debug!("Mess menu already present"),
        Ok(n) => info!("Seeded {} mess menu rows from {}", n, mess_cfg.menu_path),
        Err(e) => error!("Failed to seed mess menu: {}", e),
    }

    match admin_seed.credentials() {
        Some((id, password)) => match state.admin_ops.seed_admin(id, password) {
            Ok(true) => info!("Seeded admin '{}'", id),
            Ok(false) => debug!("Admin '{}' already exists", id),
            Err(e) => error!("Failed to seed admin '{}': {}", id, e),
        },
        None => warn!("ADMIN_ID/ADMIN_PASSWORD not set; no admin seeded"),
    }

    let jwks = JwksCache::new(firebase_cfg.jwks_url.clone(), firebase_cfg.cache_ttl_secs);
    let auth_layer = AuthLayer::new(
        firebase_cfg,
        admin_jwt_cfg,
        jwks,
        state.user_ops.clone(),
        dev_bypass_token_from_env(),
    );

    info!(
        "Starting server at http://{}:{}",
        server_cfg.host, server_cfg.port
    );

    HttpServer::new(move || {
        let (app, openapi) = App::new()
            .into_utoipa_app()
            .map(|app| app.wrap(auth_layer.clone()).wrap(Logger::default()))
            .app_data(web::JsonConfig::default().error_handler(api::default_error_handler))
            .configure(|cfg| api::configure(cfg, &state))
            .split_for_parts();

        app.app_data(web::Data::new(openapi))
            .route("/api-docs/openapi.json", web::get().to(api::openapi_json))
    })
    .bind((server_cfg.host.as_str(), server_cfg.port))?
    .run()
    .await
}
