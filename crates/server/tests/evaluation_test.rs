//! End-to-end test for the `/evaluate` endpoint.

mod common;

use httpmock::prelude::*;
use serde_json::{json, Value};

#[tokio::test]
async fn evaluate_reports_execution_accuracy() {
    let mock_server = MockServer::start_async().await;

    mock_server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/embeddings");
            then.status(200)
                .json_body(json!({"data": [{"embedding": [0.1, 0.2, 0.3]}]}));
        })
        .await;
    // The mocked model answers every question with the same statement, which
    // matches the first gold case ("Count total orders") exactly.
    mock_server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(200).json_body(json!({
                "choices": [{"message": {
                    "role": "assistant",
                    "content": "SELECT COUNT(*) FROM api_order"
                }}]
            }));
        })
        .await;

    let address = common::spawn_app(common::test_config(
        mock_server.url("/v1/chat/completions"),
        mock_server.url("/v1/embeddings"),
    ))
    .await;

    let body: Value = reqwest::get(format!("{address}/evaluate"))
        .await
        .expect("Failed to execute request.")
        .json()
        .await
        .expect("invalid JSON");

    assert_eq!(body["metric"], "Execution Accuracy");
    assert!(body["overall_accuracy_percent"].is_string());

    let results = body["detailed_results"].as_array().unwrap();
    assert_eq!(results.len(), 8);

    let first = &results[0];
    assert_eq!(first["question"], "Count total orders");
    assert_eq!(first["status"], "PASS");
    assert_eq!(first["execution_match"], json!(true));
    assert_eq!(first["generated_sql"], "SELECT COUNT(*) FROM api_order");

    // "Show all customers" gets a count instead of the customer rows: a FAIL,
    // not an ERROR, and the case stays in the report.
    let second = &results[1];
    assert_eq!(second["status"], "FAIL");
    assert_eq!(second["execution_match"], json!(false));
}
