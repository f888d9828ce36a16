use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use clap::Parser;
use env_logger::Env;
use log::{error, info, LevelFilter};
use std::sync::Arc;

use book_catalog_api::config::{Config, CorsConfig};
use book_catalog_api::database::{
    seed::prepare_data, BookRepository, InMemoryBookRepository, MongoDbService,
};
use book_catalog_api::handlers::pages::PageRenderer;
use book_catalog_api::routes::configure_routes;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, default_value = "info")]
    log_level: String,

    /// TOML config file; environment variables are used when it cannot be read
    #[arg(long, default_value = "config/config.toml")]
    config: String,

    /// Keep books in process memory instead of MongoDB
    #[arg(long)]
    in_memory: bool,
}

fn fatal(context: &str, e: impl std::fmt::Display) -> std::io::Error {
    error!("{}: {}", context, e);
    std::io::Error::other(format!("{}: {}", context, e))
}

fn build_cors(config: &CorsConfig) -> Cors {
    let cors = if config.allows_any_origin() {
        Cors::default().allow_any_origin()
    } else {
        let allowed_origins = config.allowed_origins.clone();
        Cors::default().allowed_origin_fn(move |origin, _req_head| {
            let origin_str = match origin.to_str() {
                Ok(s) => s,
                Err(_) => return false,
            };
            allowed_origins.iter().any(|allowed| origin_str == allowed)
        })
    };

    let methods: Vec<actix_web::http::Method> = config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();

    let cors = cors
        .allowed_methods(methods)
        .allowed_headers(config.allowed_headers.clone())
        .max_age(3600);

    if config.supports_credentials {
        cors.supports_credentials()
    } else {
        cors
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    let log_level = match args.log_level.to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level.to_string())).init();

    let config = Config::load(&args.config).map_err(|e| fatal("Failed to load configuration", e))?;

    info!("Starting Book Catalogue API...");
    info!("Configuration loaded: {:?}", config);

    let repo: Arc<dyn BookRepository> = if args.in_memory {
        info!("Using in-memory book storage");
        Arc::new(InMemoryBookRepository::new())
    } else {
        let db_service = MongoDbService::new(&config.database)
            .await
            .map_err(|e| fatal("Failed to initialize database service", e))?;
        db_service.book_repository()
    };

    if config.server.seed_on_startup {
        prepare_data(repo.as_ref())
            .await
            .map_err(|e| fatal("Failed to prepare initial data", e))?;
    }

    let bind_addr = config.bind_addr();
    info!("Server will be available at http://{}", bind_addr);

    let renderer = PageRenderer::new().map_err(|e| fatal("Failed to load page templates", e))?;
    let renderer = web::Data::new(renderer);
    let repo_data: web::Data<dyn BookRepository> = web::Data::from(repo);
    let cors_config = config.cors.clone();

    HttpServer::new(move || {
        App::new()
            .app_data(repo_data.clone())
            .app_data(renderer.clone())
            .wrap(build_cors(&cors_config))
            .wrap(Logger::default())
            .configure(configure_routes)
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    info!("Server stopped");
    Ok(())
}
