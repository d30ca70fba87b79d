//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::{Clock, DefaultClock};
use tracing::info;

use point_ledger::Trace;
#[cfg(debug_assertions)]
use point_ledger::doc::ApiDoc;
use point_ledger::domain::PointService;
use point_ledger::inbound::http::health::{HealthState, live, ready};
use point_ledger::inbound::http::points::{
    amount_json_config, charge_point, get_histories, get_point, use_point,
};
use point_ledger::inbound::http::state::HttpState;
use point_ledger::outbound::memory::{InMemoryPointHistoryTable, InMemoryUserPointTable};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Wire the ledger service to the in-memory tables.
fn build_http_state(config: &ServerConfig) -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let points = Arc::new(InMemoryUserPointTable::new(
        Arc::clone(&clock),
        config.store_latency_ms,
    ));
    let history = Arc::new(InMemoryPointHistoryTable::new(config.store_latency_ms));
    HttpState::from_service(Arc::new(PointService::new(points, history, clock)))
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api/v1")
        .service(get_point)
        .service(get_histories)
        .service(charge_point)
        .service(use_point);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(amount_json_config())
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// The ledger state is built once and shared by every worker, so all workers
/// serialise through the same per-user locks.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket or starting the server fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(build_http_state(&config));
    let bind_addr = config.bind_addr();

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(bind_addr)?
    .run();

    info!(
        %bind_addr,
        store_latency_ms = ?config.store_latency_ms,
        "point ledger listening"
    );
    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::Value;

    #[rstest]
    #[actix_web::test]
    async fn charge_then_read_through_full_app() {
        let config = ServerConfig::new(std::net::SocketAddr::from(([127, 0, 0, 1], 0)));
        let app = actix_test::init_service(build_app(
            web::Data::new(HealthState::new()),
            web::Data::new(build_http_state(&config)),
        ))
        .await;

        let charge = actix_test::TestRequest::patch()
            .uri("/api/v1/point/7/charge")
            .set_json(700)
            .to_request();
        let response = actix_test::call_service(&app, charge).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("trace-id"));

        let read = actix_test::TestRequest::get()
            .uri("/api/v1/point/7")
            .to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, read).await;
        assert_eq!(body["point"], 700);
    }
}
