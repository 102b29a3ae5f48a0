//! End-to-end tests for the `/ask` and `/schema` endpoints with mocked
//! generation and embedding services.

mod common;

use httpmock::prelude::*;
use serde_json::{json, Value};

async fn mock_embeddings(server: &MockServer) {
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/embeddings");
            then.status(200)
                .json_body(json!({"data": [{"embedding": [0.1, 0.2, 0.3]}]}));
        })
        .await;
}

async fn mock_generation(server: &MockServer, sql: &str) {
    let body = json!({
        "choices": [{"message": {"role": "assistant", "content": sql}}]
    });
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(200).json_body(body);
        })
        .await;
}

#[tokio::test]
async fn ask_returns_rows_and_echoes_the_sql() {
    let mock_server = MockServer::start_async().await;
    mock_embeddings(&mock_server).await;
    mock_generation(&mock_server, "SELECT COUNT(*) FROM api_order").await;

    let address = common::spawn_app(common::test_config(
        mock_server.url("/v1/chat/completions"),
        mock_server.url("/v1/embeddings"),
    ))
    .await;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("{address}/ask"))
        .json(&json!({"question": "Count total orders"}))
        .send()
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("invalid JSON");
    assert_eq!(body["sql"], "SELECT COUNT(*) FROM api_order");
    assert_eq!(body["columns"], json!(["COUNT(*)"]));
    assert_eq!(body["data"][0]["COUNT(*)"], json!(12));
}

#[tokio::test]
async fn ask_without_a_question_is_a_bad_request() {
    let mock_server = MockServer::start_async().await;
    mock_embeddings(&mock_server).await;
    mock_generation(&mock_server, "SELECT 1").await;

    let address = common::spawn_app(common::test_config(
        mock_server.url("/v1/chat/completions"),
        mock_server.url("/v1/embeddings"),
    ))
    .await;

    let client = reqwest::Client::new();
    for payload in [json!({}), json!({"question": "   "})] {
        let response = client
            .post(format!("{address}/ask"))
            .json(&payload)
            .send()
            .await
            .expect("Failed to execute request.");

        assert_eq!(response.status().as_u16(), 400);
        let body: Value = response.json().await.expect("invalid JSON");
        assert_eq!(body["error"], "No question provided");
    }
}

#[tokio::test]
async fn mutating_output_is_rejected_not_executed() {
    let mock_server = MockServer::start_async().await;
    mock_embeddings(&mock_server).await;
    mock_generation(&mock_server, "DROP TABLE api_customer").await;

    let address = common::spawn_app(common::test_config(
        mock_server.url("/v1/chat/completions"),
        mock_server.url("/v1/embeddings"),
    ))
    .await;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("{address}/ask"))
        .json(&json!({"question": "drop the customers table"}))
        .send()
        .await
        .expect("Failed to execute request.");

    // Rejections are results, not HTTP errors.
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("invalid JSON");
    assert_eq!(body["error"], "Security violation: Only SELECT allowed.");
    assert_eq!(body["sql"], "DROP TABLE api_customer");

    // The schema endpoint still sees the table.
    let schema: Value = client
        .get(format!("{address}/schema"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(schema["schema"]
        .as_str()
        .unwrap()
        .contains("CREATE TABLE api_customer"));
}

#[tokio::test]
async fn schema_endpoint_describes_all_tables() {
    let mock_server = MockServer::start_async().await;
    mock_embeddings(&mock_server).await;
    mock_generation(&mock_server, "SELECT 1").await;

    let address = common::spawn_app(common::test_config(
        mock_server.url("/v1/chat/completions"),
        mock_server.url("/v1/embeddings"),
    ))
    .await;

    let body: Value = reqwest::get(format!("{address}/schema"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let schema = body["schema"].as_str().unwrap();
    for table in ["api_customer", "api_order", "api_product"] {
        assert!(schema.contains(&format!("CREATE TABLE {table}")));
    }
}

#[tokio::test]
async fn health_endpoints_respond() {
    let mock_server = MockServer::start_async().await;
    mock_embeddings(&mock_server).await;
    mock_generation(&mock_server, "SELECT 1").await;

    let address = common::spawn_app(common::test_config(
        mock_server.url("/v1/chat/completions"),
        mock_server.url("/v1/embeddings"),
    ))
    .await;

    let health = reqwest::get(format!("{address}/health"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(health, "OK");

    let root = reqwest::get(format!("{address}/"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(root, "askql server is running.");
}
