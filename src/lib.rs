use actix_cors::Cors;
use actix_web::middleware::{Compress, Logger};
use actix_web::{http::header, web, App, HttpServer};
use actix_web_prometheus::PrometheusMetricsBuilder;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod archive;
pub mod config;
pub mod generators;
pub mod service_log;
pub mod state;

pub use crate::config::AppConfig;
pub use crate::state::AppState;

/// Structured status payload returned for archive-only requests and every failure.
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct StatusResponse {
    /// `success` or `error`
    pub status: String,
    pub message: String,
}

impl StatusResponse {
    pub fn new(status: &str, message: impl Into<String>) -> Self {
        Self {
            status: status.to_string(),
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new("success", message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new("error", message)
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(crate::service_log::handlers::generate),
    components(schemas(service_log::models::ServiceVisitForm, StatusResponse)),
    tags(
        (name = "Service Log", description = "Service visit log sheet generation.")
    )
)]
pub struct ApiDoc;

fn cors(allowed_origins: &[String]) -> Cors {
    let cors = if allowed_origins.is_empty() {
        Cors::default().allow_any_origin()
    } else {
        allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };

    cors.allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .expose_headers(vec![header::CONTENT_DISPOSITION])
        .max_age(3600)
}

pub async fn run() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    let app_state = web::Data::new(
        AppState::from_config(&config).context("failed to initialise service log renderers")?,
    );

    let prometheus = PrometheusMetricsBuilder::new("service_log_server")
        .endpoint("/metrics")
        .build()
        .map_err(|e| anyhow::anyhow!("failed to create Prometheus metrics middleware: {}", e))?;

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    let allowed_origins = config.allowed_origins.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(Compress::default())
            .wrap(prometheus.clone())
            .wrap(cors(&allowed_origins))
            .app_data(app_state.clone())
            .configure(service_log::config)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
