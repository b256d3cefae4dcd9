// F1 Live API v0.1
use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod errors;
mod helpers;
mod models;
mod routes;
mod services;

use config::AppConfig;
use routes::AppState;
use services::jolpica::JolpicaClient;
use services::season::SeasonService;
use services::status::SystemClock;

/// F1 Live API OpenAPI document.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "F1 Live API",
        version = "0.1.0",
        description = "Formula 1 season overview API. Normalizes the Jolpica (Ergast) \
            results API into render-ready weekends with session schedules in the home \
            timezone, a lifecycle status per weekend, race/qualifying/sprint results \
            and championship standings.",
        license(name = "MIT"),
    ),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Calendar", description = "Season calendar and next weekend"),
        (name = "Weekends", description = "Single weekend detail"),
        (name = "Standings", description = "Driver and constructor championships"),
    ),
    paths(
        routes::health::health_check,
        routes::calendar::get_calendar,
        routes::calendar::get_next_weekend,
        routes::weekends::get_weekend,
        routes::standings::get_standings,
    ),
    components(
        schemas(
            routes::health::HealthResponse,
            models::SessionKind,
            models::Status,
            models::Session,
            models::WeekendSummary,
            models::CalendarEntry,
            models::RankedResult,
            models::TableState,
            models::ResultTable,
            models::WeekendDetail,
            models::StandingsKind,
            models::StandingsEntry,
            models::Standings,
            errors::ErrorResponse,
        )
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() {
    let config = AppConfig::from_env();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "f1_live_api=debug,tower_http=debug".into());
    if config.log_format.eq_ignore_ascii_case("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!(
        "Reading season '{}' from {} (home timezone {})",
        config.season,
        config.api_base_url,
        config.home_timezone
    );

    let client = JolpicaClient::new(
        &config.api_base_url,
        &config.user_agent,
        Duration::from_secs(config.upstream_timeout_secs),
    );
    let app_state = AppState {
        service: SeasonService::new(
            client,
            Arc::new(SystemClock),
            config.home_timezone,
            config.season.clone(),
            config.winner_lookup_concurrency,
        ),
    };

    // CORS: read-only API, restrict methods to GET
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([axum::http::Method::GET])
        .allow_headers(Any);

    let app = Router::new()
        .route("/api/v1/health", get(routes::health::health_check))
        .route("/api/v1/calendar", get(routes::calendar::get_calendar))
        .route(
            "/api/v1/weekends/next",
            get(routes::calendar::get_next_weekend),
        )
        .route("/api/v1/weekends/:round", get(routes::weekends::get_weekend))
        .route(
            "/api/v1/standings/:kind",
            get(routes::standings::get_standings),
        )
        .with_state(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("API server listening on {}", addr);
    tracing::info!(
        "Swagger UI available at http://localhost:{}/swagger-ui/",
        config.port
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind TCP listener");
    axum::serve(listener, app)
        .await
        .expect("Server terminated unexpectedly");
}
