//! Point balance HTTP handlers.
//!
//! ```text
//! GET   /api/v1/point/{id}
//! GET   /api/v1/point/{id}/histories
//! PATCH /api/v1/point/{id}/charge   body: <amount>
//! PATCH /api/v1/point/{id}/use      body: <amount>
//! ```
//!
//! Mutation bodies are a bare JSON integer, e.g. `1000`.

use std::str::FromStr;

use actix_web::{get, patch, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{Error, PointHistory, TransactionType, UserId, UserPoint};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Balance payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PointResponse {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = 1500)]
    pub point: i64,
    /// Last persisted mutation, epoch milliseconds. For a user with no stored
    /// balance this is the time of the read.
    #[schema(example = 1_792_402_200_000_i64)]
    pub update_millis: i64,
}

impl From<UserPoint> for PointResponse {
    fn from(value: UserPoint) -> Self {
        Self {
            id: value.user_id().get(),
            point: value.point(),
            update_millis: value.updated_at().timestamp_millis(),
        }
    }
}

/// History record payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PointHistoryResponse {
    #[schema(example = 7)]
    pub id: u64,
    #[schema(example = 1)]
    pub user_id: u64,
    #[serde(rename = "type")]
    #[schema(value_type = crate::inbound::http::schemas::TransactionTypeSchema)]
    pub transaction_type: TransactionType,
    #[schema(example = 500)]
    pub amount: i64,
    #[schema(example = 1_792_402_200_000_i64)]
    pub time_millis: i64,
}

impl From<PointHistory> for PointHistoryResponse {
    fn from(value: PointHistory) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id.get(),
            transaction_type: value.transaction_type,
            amount: value.amount,
            time_millis: value.recorded_at.timestamp_millis(),
        }
    }
}

fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    UserId::from_str(raw).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": "id",
            "value": raw,
            "code": "invalid_user_id",
        }))
    })
}

/// JSON extractor settings for mutation bodies.
///
/// Malformed bodies are reported with the standard error payload rather than
/// Actix's plain-text default.
pub fn amount_json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _request| {
        Error::invalid_request("request body must be a JSON integer amount")
            .with_details(json!({
                "field": "amount",
                "code": "invalid_amount",
                "reason": err.to_string(),
            }))
            .into()
    })
}

/// Fetch a user's balance.
#[utoipa::path(
    get,
    path = "/api/v1/point/{id}",
    description = "Fetch the current balance. Unknown users report a zero balance.",
    params(("id" = u64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Current balance", body = PointResponse),
        (status = 400, description = "Invalid user id", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["points"],
    operation_id = "getPoint"
)]
#[get("/point/{id}")]
pub async fn get_point(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<PointResponse>> {
    let user_id = parse_user_id(&path)?;
    let point = state.points_query.fetch_point(user_id).await?;
    Ok(web::Json(PointResponse::from(point)))
}

/// List a user's point history.
#[utoipa::path(
    get,
    path = "/api/v1/point/{id}/histories",
    params(("id" = u64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "History in insertion order", body = [PointHistoryResponse]),
        (status = 400, description = "Invalid user id", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["points"],
    operation_id = "getPointHistories"
)]
#[get("/point/{id}/histories")]
pub async fn get_histories(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<PointHistoryResponse>>> {
    let user_id = parse_user_id(&path)?;
    let history = state.points_query.fetch_history(user_id).await?;
    Ok(web::Json(
        history.into_iter().map(PointHistoryResponse::from).collect(),
    ))
}

/// Charge points to a user's balance.
#[utoipa::path(
    patch,
    path = "/api/v1/point/{id}/charge",
    request_body(content = i64, description = "Amount to add", example = json!(1000)),
    params(("id" = u64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Updated balance", body = PointResponse),
        (status = 400, description = "Invalid amount or balance limit exceeded", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["points"],
    operation_id = "chargePoint"
)]
#[patch("/point/{id}/charge")]
pub async fn charge_point(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    amount: web::Json<i64>,
) -> ApiResult<web::Json<PointResponse>> {
    let user_id = parse_user_id(&path)?;
    let point = state.points.charge(user_id, amount.into_inner()).await?;
    Ok(web::Json(PointResponse::from(point)))
}

/// Spend points from a user's balance.
#[utoipa::path(
    patch,
    path = "/api/v1/point/{id}/use",
    request_body(content = i64, description = "Amount to spend", example = json!(500)),
    params(("id" = u64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Updated balance", body = PointResponse),
        (status = 400, description = "Invalid amount or insufficient balance", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["points"],
    operation_id = "usePoint"
)]
#[patch("/point/{id}/use")]
pub async fn use_point(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    amount: web::Json<i64>,
) -> ApiResult<web::Json<PointResponse>> {
    let user_id = parse_user_id(&path)?;
    let point = state.points.use_points(user_id, amount.into_inner()).await?;
    Ok(web::Json(PointResponse::from(point)))
}
