//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the REST API. It registers:
//!
//! - **Paths**: the point endpoints and health probes
//! - **Schemas**: domain type wrappers ([`ErrorSchema`], [`ErrorCodeSchema`],
//!   [`TransactionTypeSchema`]) plus the response payloads
//!
//! The generated document is served by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::points::{PointHistoryResponse, PointResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, TransactionTypeSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Point ledger API",
        description = "Per-user point balances with charge, use and history endpoints."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::points::get_point,
        crate::inbound::http::points::get_histories,
        crate::inbound::http::points::charge_point,
        crate::inbound::http::points::use_point,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        PointResponse,
        PointHistoryResponse,
        TransactionTypeSchema,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "points", description = "Balance queries and mutations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
