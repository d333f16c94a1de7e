//! Claon admin server - main entry point.
//!
//! Loads configuration, connects the collaborators (database, S3, OAuth providers, task
//! queue) and starts the Actix-web server.

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, http::header, web};
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use claon_admin_lib::api::{self, ApiDoc, MaxUploadSize};
use claon_admin_lib::config::{ACCESS_TOKEN_HEADER, Config, REFRESH_TOKEN_HEADER};
use claon_admin_lib::db::DbPool;
use claon_admin_lib::middleware::{REQUEST_ID_HEADER, RequestLogger};
use claon_admin_lib::services::{
    AdminService, CenterService, FileStorage, JwtManager, OAuthUserInfoProviderSupplier, Storage,
    TaskQueue, UserService,
};

fn exit_on_startup_error(step: &str, e: impl std::fmt::Display) -> ! {
    error!("{}: {}", step, e);
    std::process::exit(1);
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            error!("");
            error!("Please check your environment variables:");
            error!("  - RUST_ENV must be set to 'development' or 'production'");
            error!("  - In production, DATABASE_URL, S3 credentials and CLAON_JWT_SECRET must be set");
            error!("  - In production, values must not match development defaults");
            std::process::exit(1);
        }
    };

    info!("========================================");
    info!("  Claon Admin Server");
    info!("  Environment: {}", config.environment);
    info!("========================================");

    let is_development = config.is_development();
    if is_development {
        warn!("Running in DEVELOPMENT mode - do not use in production!");
        info!("Test sign-in endpoint is enabled");
    }

    let pool = DbPool::new(&config.database)
        .await
        .unwrap_or_else(|e| exit_on_startup_error("Failed to connect to database", e));
    pool.run_migrations()
        .await
        .unwrap_or_else(|e| exit_on_startup_error("Failed to run migrations", e));
    info!("Database migrations complete");

    let storage: Arc<dyn FileStorage> = Arc::new(
        Storage::new(&config.s3)
            .await
            .unwrap_or_else(|e| exit_on_startup_error("Failed to initialize S3 storage", e)),
    );

    let oauth = OAuthUserInfoProviderSupplier::from_settings(&config.oauth)
        .unwrap_or_else(|e| exit_on_startup_error("Failed to initialize OAuth providers", e));

    let (tasks, _worker) = TaskQueue::start(config.task_queue_capacity);
    info!(
        "Task queue started (capacity: {})",
        config.task_queue_capacity
    );

    let jwt = JwtManager::new(&config.jwt);
    let user_service = UserService::new(
        pool.clone(),
        jwt.clone(),
        oauth,
        storage.clone(),
        tasks,
        config.max_upload_size,
    );
    let center_service = CenterService::new(pool.clone(), storage, config.max_upload_size);
    let admin_service = AdminService::new(pool.clone());

    let bind_address = config.bind_address();
    let max_upload_size = MaxUploadSize(config.max_upload_size);
    info!(
        "Upload limit: {}MB per file",
        config.max_upload_size / 1024 / 1024
    );

    let worker_count = if is_development {
        info!(
            "Starting server at http://{} (4 workers - development mode)",
            bind_address
        );
        4
    } else {
        let cpus = num_cpus::get();
        info!("Starting server at http://{} ({} workers)", bind_address, cpus);
        cpus
    };

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![header::AUTHORIZATION, header::ACCEPT, header::CONTENT_TYPE])
            .expose_headers(vec![ACCESS_TOKEN_HEADER, REFRESH_TOKEN_HEADER, REQUEST_ID_HEADER])
            .max_age(3600);
        let cors = if is_development {
            cors.allowed_origin("http://localhost:3000")
                .allowed_origin("http://127.0.0.1:3000")
        } else {
            cors
        };

        App::new()
            .wrap(cors)
            .wrap(RequestLogger)
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(jwt.clone()))
            .app_data(web::Data::new(user_service.clone()))
            .app_data(web::Data::new(center_service.clone()))
            .app_data(web::Data::new(admin_service.clone()))
            .app_data(web::Data::new(max_upload_size))
            .app_data(api::json_config())
            .app_data(api::query_config())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
            .service(
                web::scope("/api/v1")
                    .configure(|cfg| api::configure_api(cfg, is_development)),
            )
    });

    server
        .workers(worker_count)
        .bind(&bind_address)?
        .run()
        .await
}
