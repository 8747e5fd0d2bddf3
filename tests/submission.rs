mod common;

use std::time::{Duration, Instant};

use crpt_api_client::documents::{
    DocumentsClient, DocumentsConfig, RawRateLimitConfig, SubmissionFailure, SubmissionResult,
};
use futures_util::future::join_all;
use httpmock::prelude::*;
use reqwest::StatusCode;
use secrecy::SecretString;
use serde_json::json;

use crate::common::{CREATE_PATH, document, init_tracing};

fn client_for(server: &MockServer, time_unit: &str, request_limit: i64) -> DocumentsClient {
    let config = DocumentsConfig::from_raw(
        &server.url(CREATE_PATH),
        RawRateLimitConfig {
            time_unit: time_unit.to_owned(),
            request_limit,
        },
    )
    .expect("valid config")
    .with_request_timeout(Duration::from_secs(5));

    DocumentsClient::new(config).expect("client")
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn creates_document_against_registry() -> anyhow::Result<()> {
    init_tracing();
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(CREATE_PATH)
                .header("content-type", "application/json")
                .body_includes("\"doc_type\":\"LP_INTRODUCE_GOODS\"")
                .body_includes("\"certificate_document_date\":\"2024-04-02\"")
                .body_includes("\"signature\":\"base64-signature\"");
            then.status(200).json_body(json!({
                "value": "b7c5e0de",
                "errorCode": null,
                "errorMessage": null,
                "errorDescription": null
            }));
        })
        .await;

    let client = client_for(&server, "seconds", 5);
    let result = client
        .create_document(&document("doc-1"), &SecretString::from("base64-signature"))
        .await;

    mock.assert_async().await;
    assert_eq!(result.into_result()?, "b7c5e0de");
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn rejection_carries_registry_error_fields() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(CREATE_PATH);
            then.status(200).json_body(json!({
                "value": null,
                "errorCode": "4001",
                "errorMessage": "Invalid signature",
                "errorDescription": "signature does not match document"
            }));
        })
        .await;

    let client = client_for(&server, "seconds", 5);
    let result = client
        .create_document(&document("doc-2"), &SecretString::from("sig"))
        .await;

    assert_eq!(
        result,
        SubmissionResult::Failed(SubmissionFailure::Rejected {
            error_code: Some("4001".to_owned()),
            error_message: Some("Invalid signature".to_owned()),
            error_description: Some("signature does not match document".to_owned()),
        })
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn server_error_is_connectivity_failure() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path(CREATE_PATH);
            then.status(500).body("internal error");
        })
        .await;

    let client = client_for(&server, "seconds", 5);
    let result = client
        .create_document(&document("doc-3"), &SecretString::from("sig"))
        .await;

    assert_eq!(mock.hits_async().await, 1, "no internal retry");
    assert_eq!(
        result.failure(),
        Some(&SubmissionFailure::Connectivity {
            status: StatusCode::INTERNAL_SERVER_ERROR
        })
    );
    Ok(())
}

#[tokio::test]
async fn unreachable_registry_is_transport_failure() -> anyhow::Result<()> {
    let config = DocumentsConfig::from_raw(
        "http://127.0.0.1:1/api/v3/lk/documents/create",
        RawRateLimitConfig {
            time_unit: "s".to_owned(),
            request_limit: 1,
        },
    )?
    .with_request_timeout(Duration::from_secs(2));
    let client = DocumentsClient::new(config)?;

    let result = client
        .create_document(&document("doc-4"), &SecretString::from("sig"))
        .await;

    assert!(
        matches!(result.failure(), Some(SubmissionFailure::Transport { .. })),
        "{result:?}"
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn third_concurrent_submission_waits_for_next_window() -> anyhow::Result<()> {
    init_tracing();
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path(CREATE_PATH);
            then.status(200).json_body(json!({ "value": "created" }));
        })
        .await;

    let client = client_for(&server, "seconds", 2);
    let signature = SecretString::from("sig");
    let documents: Vec<_> = (0..3).map(|i| document(&format!("doc-{i}"))).collect();

    let start = Instant::now();
    let elapsed: Vec<Duration> = join_all(documents.iter().map(|doc| {
        let client = client.clone();
        let signature = &signature;
        async move {
            let result = client.create_document(doc, signature).await;
            assert!(result.is_created(), "{result:?}");
            start.elapsed()
        }
    }))
    .await;

    let mut sorted = elapsed.clone();
    sorted.sort();
    assert!(sorted[1] < Duration::from_millis(500), "two immediate: {sorted:?}");
    assert!(
        sorted[2] >= Duration::from_millis(900) && sorted[2] < Duration::from_millis(2000),
        "third waits out the window: {sorted:?}"
    );

    let fourth_start = Instant::now();
    let fourth = client
        .create_document(&document("doc-3"), &signature)
        .await;
    assert!(fourth.is_created(), "{fourth:?}");
    assert!(
        fourth_start.elapsed() < Duration::from_millis(500),
        "fourth call rides the window renewed by the third"
    );

    mock.assert_hits_async(4).await;
    Ok(())
}
