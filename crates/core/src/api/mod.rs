pub mod endpoints;
pub mod response;

use axum::{
    Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use endpoints::{cards, customers, locations, payments};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::gateway::GatewayState;

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Create the gateway router with every customer, card and payment route
pub fn create_router(state: GatewayState) -> Router<()> {
    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/get-locations", get(locations::list_locations))
        // Customers
        .route("/customers", post(customers::list_customers))
        .route("/customers/create", post(customers::create_customer))
        .route(
            "/customers/{id}",
            get(customers::get_customer).put(customers::update_customer),
        )
        .route("/customers/{id}/{version}", delete(customers::delete_customer))
        // Cards
        .route("/cards", post(cards::list_cards))
        .route("/cards/create", post(cards::create_card))
        .route("/cards/{id}", get(cards::get_card).put(cards::disable_card))
        // Payments
        .route("/payments", post(payments::list_payments))
        .route("/payments/create", post(payments::create_payment))
        .route("/payments/refund", post(payments::refund_payment))
        .route(
            "/payments/refund/{refund_id}",
            get(payments::get_payment_refund),
        )
        .route(
            "/payments/idempotencyKey/{id}",
            put(payments::cancel_payment_by_idempotency_key),
        )
        .route("/payments/complete/{id}", put(payments::complete_payment))
        .route(
            "/payments/{id}",
            get(payments::get_payment).put(payments::update_payment),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
}

/// Start the gateway on `host:port` and serve until Ctrl-C
pub async fn start_server(state: GatewayState, host: &str, port: u16) -> std::io::Result<()> {
    let app = create_router(state);

    let addr = format!("{}:{}", host, port);
    tracing::info!("Starting SquareGate API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("SquareGate API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
