use axum::http::{header, HeaderName, Method, StatusCode};
use std::net::SocketAddr;
use std::future::IntoFuture;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use recipe_api::config::MiddlewareConfig;
use recipe_api::constants::{
    DATABASE_CONNECT_RETRIES, DATABASE_URL, DEFAULT_PORT, ENV, LOCAL_ENV, RECIPE_API_PORT, SERVICE,
};
use recipe_api::methods::routes::{OPENAPI_JSON_PATH, SERVICE_DOCS_PATH};
use recipe_api::shutdown::{serve_until_drained, shutdown_signal};
use recipe_api::state::AppState;
use recipe_api::{app, ApiDoc};
use recipe_lib::recipe_service::RecipeService;
use recipe_lib::repository::{IngredientRepository, RecipeRepository, TagRepository, UserRepository};
use recipe_lib::util::connect_with_retry;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let env = std::env::var(ENV)
        .map_err(|_| format!("{} environment variable must be set", ENV))?;

    let registry = tracing_subscriber::registry().with(filter);

    let json_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true);

    if env == LOCAL_ENV {
        let pretty_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .pretty();
        registry.with(json_layer).with(pretty_layer).init();
    } else {
        registry.with(json_layer).init();
    }

    tracing::info!(service = SERVICE, env = %env, "tracing initialized");

    let middleware_config = MiddlewareConfig::from_env();
    tracing::info!(
        rate_limit_per_minute = middleware_config.rate_limit_per_minute,
        rate_limit_burst = middleware_config.rate_limit_burst,
        request_timeout_secs = middleware_config.request_timeout.as_secs(),
        max_body_size = middleware_config.max_body_size,
        cors_origins = ?middleware_config.cors_allowed_origins,
        "middleware configuration loaded"
    );

    let database_url = std::env::var(DATABASE_URL)
        .map_err(|_| format!("{} environment variable must be set", DATABASE_URL))?;

    let pool = connect_with_retry(&database_url, DATABASE_CONNECT_RETRIES).await?;

    let recipe_service = RecipeService::new(
        UserRepository::new(pool.clone()),
        IngredientRepository::new(pool.clone()),
        TagRepository::new(pool.clone()),
        RecipeRepository::new(pool),
    );

    let app_state = AppState::new(recipe_service, env.clone());

    let mut app = app(app_state)
        .merge(SwaggerUi::new(SERVICE_DOCS_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi()));

    // Middleware stack, innermost first:
    // Trace → Request ID → Body Limit → CORS → Timeout → Rate Limit

    app = app.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(tracing::Level::DEBUG))
            .on_response(DefaultOnResponse::new().level(tracing::Level::DEBUG)),
    );

    let x_request_id = HeaderName::from_static("x-request-id");
    app = app
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid));

    app = app.layer(RequestBodyLimitLayer::new(middleware_config.max_body_size));

    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, x_request_id]);
    let cors_layer = if middleware_config.allows_any_origin() {
        cors_layer.allow_origin(Any)
    } else {
        let origins: Vec<_> = middleware_config
            .cors_allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors_layer.allow_origin(origins)
    };
    app = app.layer(cors_layer);

    app = app.layer(TimeoutLayer::with_status_code(
        StatusCode::REQUEST_TIMEOUT,
        middleware_config.request_timeout,
    ));

    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_millisecond(middleware_config.replenish_interval_ms())
            .burst_size(middleware_config.rate_limit_burst)
            .finish()
            .ok_or("invalid rate limit configuration")?,
    );
    app = app.layer(GovernorLayer {
        config: governor_conf,
    });

    let port: u16 = std::env::var(RECIPE_API_PORT)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let addr = format!("0.0.0.0:{}", port);
    let public_url = format!("http://127.0.0.1:{}", port);

    let listener = TcpListener::bind(&addr).await
        .map_err(|e| format!("Failed to bind to {}: {}", addr, e))?;

    tracing::info!("{} is ready to accept requests at: {}", SERVICE, public_url);
    tracing::info!("API docs available at: {}{}", public_url, SERVICE_DOCS_PATH);

    let signalled = Arc::new(Notify::new());
    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal(Arc::clone(&signalled)))
    .into_future();

    if let Some(result) =
        serve_until_drained(server, signalled, middleware_config.shutdown_timeout).await
    {
        result.map_err(|e| format!("Server error: {}", e))?;
    }

    Ok(())
}
