//! HTTP endpoint server using Axum

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, warn, Level};

use crate::config::ScreenerConfig;
use crate::metrics::Metrics;
use crate::screener::{
    normalize_symbol, parse_symbols, ChartData, RowFilter, ScreenError, ScreenReport, Screener,
};
use crate::services::market_data::MarketDataError;

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub screener: Arc<Screener>,
    pub default_filter: RowFilter,
    pub max_symbols: usize,
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": "expo-screener"
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();
    state.metrics.http_requests_in_flight.dec();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis() as u64,
            "HTTP request error"
        );
    }

    response
}

/// Screening request, as query parameters or a JSON body.
#[derive(Debug, Deserialize)]
pub struct ScreenRequest {
    /// Comma-separated symbols, e.g. `AAPL,GOOGL,MSFT`.
    pub symbols: String,
    #[serde(default)]
    pub filter: Option<RowFilter>,
}

fn status_for(err: &ScreenError) -> StatusCode {
    match err {
        ScreenError::MarketData(MarketDataError::NoData { .. }) => StatusCode::NOT_FOUND,
        ScreenError::MarketData(_) => StatusCode::BAD_GATEWAY,
        ScreenError::Indicator(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

async fn run_screen(
    state: &AppState,
    request: ScreenRequest,
) -> Result<Json<ScreenReport>, StatusCode> {
    let symbols = parse_symbols(&request.symbols);
    if symbols.is_empty() {
        warn!(input = %request.symbols, "Screen request without symbols");
        return Err(StatusCode::BAD_REQUEST);
    }
    if symbols.len() > state.max_symbols {
        warn!(
            count = symbols.len(),
            limit = state.max_symbols,
            "Screen request with too many symbols"
        );
        return Err(StatusCode::PAYLOAD_TOO_LARGE);
    }

    let filter = request.filter.unwrap_or(state.default_filter);
    Ok(Json(state.screener.screen(&symbols, filter).await))
}

/// Screen symbols given as query parameters
async fn screen_query(
    State(state): State<AppState>,
    Query(request): Query<ScreenRequest>,
) -> Result<Json<ScreenReport>, StatusCode> {
    run_screen(&state, request).await
}

/// Screen symbols given as a JSON body
async fn screen_post(
    State(state): State<AppState>,
    Json(request): Json<ScreenRequest>,
) -> Result<Json<ScreenReport>, StatusCode> {
    run_screen(&state, request).await
}

/// Candles plus both EMA overlays for one symbol
async fn chart_handler(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<ChartData>, StatusCode> {
    let symbol = normalize_symbol(&symbol).ok_or(StatusCode::BAD_REQUEST)?;

    state.screener.chart(&symbol).await.map(Json).map_err(|e| {
        let status = status_for(&e);
        if status.is_server_error() {
            error!(symbol = %symbol, error = %e, "Failed to build chart");
        } else {
            warn!(symbol = %symbol, error = %e, "Chart unavailable");
        }
        status
    })
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/screen", get(screen_query).post(screen_post))
        .route("/api/chart/{symbol}", get(chart_handler))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(config: &ScreenerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let metrics = Arc::new(Metrics::new()?);
    let screener = Screener::from_config(config)?.with_metrics(metrics.clone());

    let state = AppState {
        health: Arc::new(RwLock::new(HealthStatus::default())),
        metrics,
        start_time: Arc::new(Instant::now()),
        screener: Arc::new(screener),
        default_filter: config.row_filter(),
        max_symbols: config.max_symbols,
    };
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    info!(port = config.port, "HTTP server listening on port {}", config.port);
    info!(
        "Metrics endpoint available at http://0.0.0.0:{}/metrics",
        config.port
    );
    axum::serve(listener, app).await?;

    Ok(())
}
