use std::sync::Arc;
use std::time::Instant;

use actix_web::http::StatusCode;
use actix_web::{web, App, HttpResponse, HttpServer, Responder, ResponseError};
use prometheus::{Encoder, TextEncoder};
use serde::Deserialize;

use crate::config::ServerConfig;
use crate::domain::order::{OrderError, RequestedItem};
use crate::metrics::Metrics;
use crate::service::OrderService;

// ============================================================================
// HTTP Surface - Request Handling Layer
// ============================================================================
//
// Thin JSON layer over the order service:
// - POST /orders                        create an order
// - GET  /accounts/{account_id}/orders  list orders for an account
// - GET  /health                        liveness probe
// - GET  /metrics                       Prometheus exposition
//
// ============================================================================

pub struct AppState {
    pub service: OrderService,
    pub metrics: Arc<Metrics>,
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub account_id: String,
    pub items: Vec<RequestedItem>,
}

impl ResponseError for OrderError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::AccountNotFound { .. } => StatusCode::NOT_FOUND,
            Self::EmptyOrder => StatusCode::UNPROCESSABLE_ENTITY,
            Self::AccountUnavailable(_) | Self::CatalogUnavailable(_) => StatusCode::BAD_GATEWAY,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "error": self.to_string() }))
    }
}

async fn create_order(
    state: web::Data<AppState>,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, OrderError> {
    let started = Instant::now();
    let request = body.into_inner();

    let result = state
        .service
        .create_order(&request.account_id, request.items)
        .await;

    state
        .metrics
        .observe_request("create_order", started.elapsed().as_secs_f64());

    match result {
        Ok(order) => {
            state.metrics.record_order_outcome(None);
            Ok(HttpResponse::Created().json(order))
        }
        Err(err) => {
            state.metrics.record_order_outcome(Some(err.kind()));
            tracing::warn!(kind = err.kind(), error = %err, "create order failed");
            Err(err)
        }
    }
}

async fn orders_for_account(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, OrderError> {
    let started = Instant::now();
    let account_id = path.into_inner();

    let result = state.service.orders_for_account(&account_id).await;

    state
        .metrics
        .observe_request("orders_for_account", started.elapsed().as_secs_f64());

    match result {
        Ok(orders) => Ok(HttpResponse::Ok().json(orders)),
        Err(err) => {
            tracing::warn!(kind = err.kind(), error = %err, "list orders failed");
            Err(err)
        }
    }
}

async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "order-service"
    }))
}

async fn metrics_endpoint(state: web::Data<AppState>) -> impl Responder {
    let encoder = TextEncoder::new();
    let metric_families = state.metrics.registry().gather();

    let mut buffer = Vec::new();
    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %err, "failed to encode metrics");
        return HttpResponse::InternalServerError().finish();
    }

    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(buffer)
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/orders", web::post().to(create_order))
        .route(
            "/accounts/{account_id}/orders",
            web::get().to(orders_for_account),
        )
        .route("/health", web::get().to(health))
        .route("/metrics", web::get().to(metrics_endpoint));
}

/// Serve the order API until the process receives a shutdown signal.
pub async fn run(
    cfg: ServerConfig,
    service: OrderService,
    metrics: Arc<Metrics>,
) -> std::io::Result<()> {
    let state = web::Data::new(AppState { service, metrics });

    tracing::info!(addr = %cfg.bind_addr(), "starting HTTP server");

    HttpServer::new(move || App::new().app_data(state.clone()).configure(routes))
        .bind(cfg.bind_addr())?
        .shutdown_timeout(cfg.shutdown_timeout_secs)
        .run()
        .await
}

// ============================================================================
// Unit Tests
// ============================================================================
