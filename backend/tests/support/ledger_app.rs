//! Actix app wired to an in-memory ledger for integration suites.

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use point_ledger::Trace;
use point_ledger::inbound::http::points::{
    amount_json_config, charge_point, get_histories, get_point, use_point,
};
use point_ledger::inbound::http::state::HttpState;
use point_ledger::test_support::InMemoryLedger;
use std::sync::Arc;

/// Shared HTTP state backed by `ledger`'s service.
pub fn ledger_state(ledger: &InMemoryLedger) -> HttpState {
    HttpState::from_service(Arc::new(ledger.service.clone()))
}

/// Build the `/api/v1` point routes over `state`.
///
/// Takes the state by value so the returned app borrows nothing and can be
/// handed to `init_service`.
pub fn ledger_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(amount_json_config())
        .wrap(Trace)
        .service(
            web::scope("/api/v1")
                .service(get_point)
                .service(get_histories)
                .service(charge_point)
                .service(use_point),
        )
}
