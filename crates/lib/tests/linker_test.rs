//! Tests for cosine ranking, top-K selection and the grouped context format.

mod common;

use askql::linker::{cosine_similarity, group_by_table, link};
use askql_test_utils::MockEmbedder;

#[test]
fn cosine_of_identical_vectors_is_one() {
    let v = [0.5, 0.5, 0.1];
    assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
}

#[test]
fn cosine_of_orthogonal_vectors_is_zero() {
    assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
}

#[test]
fn cosine_guards_against_zero_norm() {
    assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
}

#[test]
fn grouping_matches_the_expected_prompt_form() {
    let refs = [
        "api_customer.name",
        "api_customer.city",
        "api_order.quantity",
    ];
    assert_eq!(
        group_by_table(&refs),
        "api_customer: name, city | api_order: quantity"
    );
}

#[tokio::test]
async fn link_ranks_overlapping_columns_first() {
    common::setup_tracing();

    let question = "Which customers live in the city of Axum?";
    let columns: Vec<String> = [
        "api_customer.name",
        "api_customer.city",
        "api_order.quantity",
        "api_product.price",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    let embedder = MockEmbedder::new();
    embedder.program(question, vec![1.0, 0.0]);
    embedder.program("api_customer.city", vec![0.95, 0.05]);
    embedder.program("api_customer.name", vec![0.8, 0.2]);
    embedder.program("api_order.quantity", vec![0.0, 1.0]);
    embedder.program("api_product.price", vec![0.1, 0.9]);

    let context = link(&embedder, question, &columns, 2).await.unwrap();
    assert_eq!(context, "api_customer: city, name");
}

#[tokio::test]
async fn link_breaks_ties_by_original_column_order() {
    common::setup_tracing();

    // Every input gets the embedder's shared default vector, so all scores
    // tie and the selection must keep schema order.
    let embedder = MockEmbedder::new();
    let columns: Vec<String> = [
        "api_customer.id",
        "api_customer.name",
        "api_customer.email",
        "api_order.id",
        "api_order.quantity",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    let context = link(&embedder, "anything", &columns, 3).await.unwrap();
    assert_eq!(context, "api_customer: id, name, email");
}

#[tokio::test]
async fn link_with_no_columns_is_empty() {
    let embedder = MockEmbedder::new();
    let context = link(&embedder, "anything", &[], 10).await.unwrap();
    assert!(context.is_empty());
}
