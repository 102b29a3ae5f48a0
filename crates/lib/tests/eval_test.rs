//! Tests for the execution-accuracy evaluation harness and the diagnostic
//! syntactic similarity score.

mod common;

use askql::eval::{
    run_evaluation, run_evaluation_with_cases, syntactic_similarity, CaseStatus, GoldCase,
    GOLD_CASES,
};
use askql_test_utils::{MockAiProvider, MockEmbedder, TestSetup};

#[tokio::test]
async fn perfect_generation_scores_full_accuracy() {
    common::setup_tracing();
    let setup = TestSetup::new().await.unwrap();

    // The mocked generation stage returns each gold statement verbatim, in
    // test-set order.
    let responses: Vec<String> = GOLD_CASES.iter().map(|c| c.gold_sql.to_string()).collect();
    let client = common::build_client(
        Box::new(MockAiProvider::new(responses)),
        setup.provider.clone(),
        Box::new(MockEmbedder::new()),
    );

    let report = run_evaluation(&client).await;

    assert_eq!(report.metric, "Execution Accuracy");
    assert_eq!(report.overall_accuracy_percent, "100.00");
    assert_eq!(report.detailed_results.len(), GOLD_CASES.len());
    for case in &report.detailed_results {
        assert_eq!(case.status, CaseStatus::Pass, "failed case: {case:?}");
        assert!(case.execution_match);
        assert!(
            (case.syntactic_score - 1.0).abs() < 1e-9,
            "verbatim generation should score 1.0, got {}",
            case.syntactic_score
        );
    }
}

#[tokio::test]
async fn mismatched_results_fail_without_erroring() {
    let setup = TestSetup::new().await.unwrap();

    let cases = [GoldCase {
        question: "Count total orders",
        gold_sql: "SELECT COUNT(*) FROM api_order",
    }];
    // 10 products vs 12 orders: valid SQL, wrong result set.
    let client = common::build_client(
        Box::new(MockAiProvider::new(vec![
            "SELECT COUNT(*) FROM api_product".to_string(),
        ])),
        setup.provider.clone(),
        Box::new(MockEmbedder::new()),
    );

    let report = run_evaluation_with_cases(&client, &cases).await;

    assert_eq!(report.overall_accuracy_percent, "0.00");
    let case = &report.detailed_results[0];
    assert_eq!(case.status, CaseStatus::Fail);
    assert!(!case.execution_match);
    assert_eq!(case.debug_message, "Result sets differ");
}

#[tokio::test]
async fn bad_gold_statements_error_and_leave_the_denominator() {
    let setup = TestSetup::new().await.unwrap();

    let cases = [
        GoldCase {
            question: "Count total orders",
            gold_sql: "SELECT COUNT(*) FROM api_order",
        },
        GoldCase {
            question: "Count the unicorns",
            gold_sql: "SELECT COUNT(*) FROM missing_table",
        },
    ];
    let client = common::build_client(
        Box::new(MockAiProvider::new(vec![
            "SELECT COUNT(*) FROM api_order".to_string(),
            "SELECT 1".to_string(),
        ])),
        setup.provider.clone(),
        Box::new(MockEmbedder::new()),
    );

    let report = run_evaluation_with_cases(&client, &cases).await;

    assert_eq!(report.detailed_results[0].status, CaseStatus::Pass);

    let errored = &report.detailed_results[1];
    assert_eq!(errored.status, CaseStatus::Error);
    assert!(errored.debug_message.contains("Bad test case"));
    assert!(!errored.execution_match);

    // One PASS over a denominator of one: the ERROR case is excluded.
    assert_eq!(report.overall_accuracy_percent, "100.00");
}

#[tokio::test]
async fn an_all_error_run_reports_zero_accuracy() {
    let setup = TestSetup::new().await.unwrap();

    let cases = [GoldCase {
        question: "Count the unicorns",
        gold_sql: "SELECT COUNT(*) FROM missing_table",
    }];
    let client = common::build_client(
        Box::new(MockAiProvider::new(vec!["SELECT 1".to_string()])),
        setup.provider.clone(),
        Box::new(MockEmbedder::new()),
    );

    let report = run_evaluation_with_cases(&client, &cases).await;

    assert_eq!(report.overall_accuracy_percent, "0.00");
    assert_eq!(report.detailed_results[0].status, CaseStatus::Error);
}

#[tokio::test]
async fn case_order_matches_the_test_set_order() {
    let setup = TestSetup::new().await.unwrap();

    let responses: Vec<String> = GOLD_CASES.iter().map(|c| c.gold_sql.to_string()).collect();
    let client = common::build_client(
        Box::new(MockAiProvider::new(responses)),
        setup.provider.clone(),
        Box::new(MockEmbedder::new()),
    );

    let report = run_evaluation(&client).await;

    for (case, gold) in report.detailed_results.iter().zip(GOLD_CASES) {
        assert_eq!(case.question, gold.question);
        assert_eq!(case.expected_sql, gold.gold_sql);
    }
}

#[test]
fn syntactic_similarity_is_one_for_identical_statements() {
    let sql = "SELECT COUNT(*) FROM api_order";
    assert!((syntactic_similarity(sql, sql) - 1.0).abs() < 1e-9);
}

#[test]
fn syntactic_similarity_orders_by_overlap() {
    let gold = "SELECT name FROM api_customer WHERE city = 'Axum'";
    let close = "SELECT name FROM api_customer WHERE city = 'Gondar'";
    let far = "DROP TABLE users";

    let close_score = syntactic_similarity(close, gold);
    let far_score = syntactic_similarity(far, gold);
    assert!(close_score > far_score);
    assert!(close_score > 0.5);
    assert!(far_score < 0.2);
}

#[test]
fn syntactic_similarity_handles_empty_input() {
    assert_eq!(syntactic_similarity("", "SELECT 1"), 0.0);
    assert_eq!(syntactic_similarity("SELECT 1", ""), 0.0);
}
