//! End-to-end HTTP tests for the point endpoints over in-memory stores.

#[path = "support/ledger_app.rs"]
mod ledger_app;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use futures::future::join_all;
use ledger_app::{ledger_app, ledger_state};
use point_ledger::domain::TRACE_ID_HEADER;
use point_ledger::test_support::InMemoryLedger;
use rstest::rstest;
use serde_json::Value;

fn patch(uri: &str, amount: i64) -> actix_test::TestRequest {
    actix_test::TestRequest::patch().uri(uri).set_json(amount)
}

#[rstest]
#[actix_web::test]
async fn charge_use_and_history_round_trip() {
    let ledger = InMemoryLedger::new();
    let app = actix_test::init_service(ledger_app(ledger_state(&ledger))).await;

    let charged: Value =
        actix_test::call_and_read_body_json(&app, patch("/api/v1/point/5/charge", 1_000).to_request())
            .await;
    assert_eq!(charged["id"], 5);
    assert_eq!(charged["point"], 1_000);

    let used: Value =
        actix_test::call_and_read_body_json(&app, patch("/api/v1/point/5/use", 400).to_request())
            .await;
    assert_eq!(used["point"], 600);

    let read: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get().uri("/api/v1/point/5").to_request(),
    )
    .await;
    assert_eq!(read, used);

    let history: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/point/5/histories")
            .to_request(),
    )
    .await;
    let records = history.as_array().expect("array payload");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["type"], "CHARGE");
    assert_eq!(records[0]["amount"], 1_000);
    assert_eq!(records[0]["userId"], 5);
    assert_eq!(records[0]["timeMillis"], charged["updateMillis"]);
    assert_eq!(records[1]["type"], "USE");
    assert_eq!(records[1]["timeMillis"], used["updateMillis"]);
}

#[rstest]
#[actix_web::test]
async fn unknown_user_reads_as_empty() {
    let ledger = InMemoryLedger::new();
    let app = actix_test::init_service(ledger_app(ledger_state(&ledger))).await;

    let point: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get().uri("/api/v1/point/77").to_request(),
    )
    .await;
    assert_eq!(point["point"], 0);
    let stamped = point["updateMillis"].as_i64().expect("integer millis");
    assert!(stamped > 0, "unknown user is stamped with the read time");

    let history: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/point/77/histories")
            .to_request(),
    )
    .await;
    assert_eq!(history, Value::Array(Vec::new()));
}

#[rstest]
#[case("/api/v1/point/1/charge", 0, "invalid_charge_amount")]
#[case("/api/v1/point/1/charge", 1_000_001, "invalid_balance")]
#[case("/api/v1/point/1/use", 1, "invalid_balance")]
#[case("/api/v1/point/1/use", -3, "invalid_use_amount")]
#[actix_web::test]
async fn rejected_mutations_return_bad_request_with_trace(
    #[case] uri: &str,
    #[case] amount: i64,
    #[case] expected_code: &str,
) {
    let ledger = InMemoryLedger::new();
    let app = actix_test::init_service(ledger_app(ledger_state(&ledger))).await;

    let response = actix_test::call_service(&app, patch(uri, amount).to_request()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace-id header");

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["code"], expected_code);
    assert_eq!(body["traceId"], header.as_str());
    assert!(ledger.history.is_empty().await);
}

#[rstest]
#[actix_web::test]
async fn parallel_requests_for_one_user_serialise() {
    let ledger = InMemoryLedger::with_latency(Some(3));
    let app = actix_test::init_service(ledger_app(ledger_state(&ledger))).await;

    let requests = (0..20).map(|_| {
        actix_test::call_service(&app, patch("/api/v1/point/3/charge", 50).to_request())
    });
    for response in join_all(requests).await {
        assert_eq!(response.status(), StatusCode::OK);
    }

    let point: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get().uri("/api/v1/point/3").to_request(),
    )
    .await;
    assert_eq!(point["point"], 1_000);
    assert_eq!(ledger.history.len().await, 20);
}
