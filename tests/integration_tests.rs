//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: ScanConfig → scan request → scroll
//! continuations → end of stream, over a real HTTP transport.

use clap::Parser;
use futures::StreamExt;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use solidafy_scroll::auth::AuthConfig;
use solidafy_scroll::cli::{Cli, Runner};
use solidafy_scroll::http::HttpTransportConfig;
use solidafy_scroll::scroll::{CursorState, ScanConfig, ScrollClient, ScrollStep};
use solidafy_scroll::Error;
use wiremock::matchers::{body_json, body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn page(scroll_id: &str, total: u64, ids: &[&str]) -> Value {
    let hits: Vec<_> = ids
        .iter()
        .map(|id| json!({"_index": "logs", "_type": "event", "_id": id, "_score": 0.0, "_source": {"id": id}}))
        .collect();
    json!({
        "_scroll_id": scroll_id,
        "took": 2,
        "timed_out": false,
        "_shards": {"total": 1, "successful": 1, "failed": 0},
        "hits": {"total": total, "max_score": 0.0, "hits": hits}
    })
}

/// Scan over `logs` with three documents split across two pages
async fn mount_three_document_scan(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/logs/_search"))
        .and(query_param("search_type", "scan"))
        .and(query_param("scroll", "5m"))
        .and(body_json(json!({"query": {"match_all": {}}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(page("s0", 3, &[])))
        .expect(1)
        .mount(server)
        .await;

    for (token, next, ids) in [("s0", "s1", &["1", "2"][..]), ("s1", "s2", &["3"][..]), ("s2", "s3", &[][..])] {
        Mock::given(method("POST"))
            .and(path("/_search/scroll"))
            .and(query_param("scroll", "5m"))
            .and(body_string(token))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(next, 3, ids)))
            .expect(1)
            .mount(server)
            .await;
    }
}

fn client_for(server: &MockServer) -> ScrollClient {
    ScrollClient::connect(HttpTransportConfig::builder().base_url(server.uri()).build()).unwrap()
}

// ============================================================================
// Library flow
// ============================================================================

#[tokio::test]
async fn test_full_scan_over_http() {
    let server = MockServer::start().await;
    mount_three_document_scan(&server).await;

    let client = client_for(&server);
    let config = ScanConfig::builder().index("logs").build().unwrap();
    let mut cursor = client.scan(config).await.unwrap();
    assert_eq!(cursor.total_hits(), 3);

    let mut seen = Vec::new();
    while let ScrollStep::Page(page) = cursor.next().await.unwrap() {
        seen.extend(page.documents().iter().filter_map(|h| h.id.clone()));
    }

    assert_eq!(seen, vec!["1", "2", "3"]);
    assert_eq!(cursor.state(), CursorState::Exhausted);

    // Exhausted cursor does not call the server again (expect(1) checks on drop)
    assert!(cursor.next().await.unwrap().is_end());
    assert!(cursor.next().await.unwrap().is_end());
}

#[tokio::test]
async fn test_scan_as_stream() {
    let server = MockServer::start().await;
    mount_three_document_scan(&server).await;

    let client = client_for(&server);
    let config = ScanConfig::builder().index("logs").build().unwrap();
    let cursor = client.scan(config).await.unwrap();

    let pages: Vec<_> = cursor
        .into_stream()
        .map(|page| page.unwrap().len())
        .collect()
        .await;
    assert_eq!(pages, vec![2, 1]);
}

#[tokio::test]
async fn test_scan_with_options_and_auth() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/logs,metrics/event/_search"))
        .and(query_param("search_type", "scan"))
        .and(query_param("scroll", "1m"))
        .and(query_param("size", "50"))
        .and(query_param("pretty", "true"))
        .and(header("Authorization", "Bearer t0k"))
        .and(body_json(json!({"query": {"term": {"level": "error"}}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(page("s0", 1, &[])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/_search/scroll"))
        .and(query_param("scroll", "1m"))
        .and(query_param("pretty", "true"))
        .and(header("content-type", "text/plain"))
        .and(header("Authorization", "Bearer t0k"))
        .and(body_string("s0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page("s1", 1, &["only"])))
        .expect(1)
        .mount(&server)
        .await;

    let client = ScrollClient::connect(
        HttpTransportConfig::builder()
            .base_url(server.uri())
            .auth(AuthConfig::bearer("t0k"))
            .build(),
    )
    .unwrap();
    let config = ScanConfig::builder()
        .indices(["logs", "metrics"])
        .doc_type("event")
        .query(json!({"term": {"level": "error"}}))
        .keep_alive("1m")
        .size(50)
        .pretty(true)
        .build()
        .unwrap();

    let mut cursor = client.scan(config).await.unwrap();
    let step = cursor.next().await.unwrap();
    assert_eq!(step.page().unwrap().documents()[0].id.as_deref(), Some("only"));
}

#[tokio::test]
async fn test_expired_scroll_context_surfaces_as_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/logs/_search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page("s0", 10, &[])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/_search/scroll"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string("SearchContextMissingException[No search context found]"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let config = ScanConfig::builder().index("logs").build().unwrap();
    let mut cursor = client.scan(config).await.unwrap();

    let err = cursor.next().await.unwrap_err();
    assert!(err.is_transport());
    assert!(!err.is_retryable());
    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 404);
            assert!(body.contains("SearchContextMissingException"));
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_scan_without_scroll_id_fails_distinctly() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/logs/_search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"hits": {"total": 5, "hits": []}})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/_search/scroll"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let config = ScanConfig::builder().index("logs").build().unwrap();
    let mut cursor = client.scan(config).await.unwrap();

    let err = cursor.next().await.unwrap_err();
    assert!(matches!(err, Error::MissingScrollId));
}

// ============================================================================
// CLI flow
// ============================================================================

#[tokio::test]
async fn test_cli_scan_writes_json_lines() {
    let server = MockServer::start().await;
    mount_three_document_scan(&server).await;

    let uri = server.uri();
    let cli = Cli::try_parse_from(["solidafy-scroll", "-u", uri.as_str(), "scan", "-i", "logs"])
        .unwrap();

    let mut out = Vec::new();
    Runner::new(cli).run_with_output(&mut out).await.unwrap();

    let lines: Vec<Value> = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(
        lines,
        vec![json!({"id": "1"}), json!({"id": "2"}), json!({"id": "3"})]
    );
}

#[tokio::test]
async fn test_cli_scan_max_pages() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/logs/_search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page("s0", 3, &[])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/_search/scroll"))
        .and(body_string("s0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page("s1", 3, &["1", "2"])))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let cli = Cli::try_parse_from([
        "solidafy-scroll",
        "-u",
        uri.as_str(),
        "scan",
        "-i",
        "logs",
        "--max-pages",
        "1",
        "--format",
        "hit",
    ])
    .unwrap();

    let mut out = Vec::new();
    Runner::new(cli).run_with_output(&mut out).await.unwrap();

    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().count(), 2);
    let first: Value = serde_json::from_str(text.lines().next().unwrap()).unwrap();
    assert_eq!(first["_id"], "1");
    assert_eq!(first["_index"], "logs");
}

#[tokio::test]
async fn test_cli_count() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/logs/_search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page("s0", 1234, &[])))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let cli = Cli::try_parse_from(["solidafy-scroll", "--url", uri.as_str(), "count", "-i", "logs"])
        .unwrap();

    let mut out = Vec::new();
    Runner::new(cli).run_with_output(&mut out).await.unwrap();

    let value: Value = serde_json::from_str(String::from_utf8(out).unwrap().trim()).unwrap();
    assert_eq!(value, json!({"total": 1234}));
}

#[tokio::test]
async fn test_cli_propagates_http_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/missing/_search"))
        .respond_with(ResponseTemplate::new(404).set_body_string("index_not_found_exception"))
        .mount(&server)
        .await;

    let uri = server.uri();
    let cli = Cli::try_parse_from(["solidafy-scroll", "-u", uri.as_str(), "scan", "-i", "missing"])
        .unwrap();

    let mut out = Vec::new();
    let err = Runner::new(cli).run_with_output(&mut out).await.unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 404, .. }));
    assert!(out.is_empty());
}
