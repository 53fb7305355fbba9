// End-to-end widget flows against a mock HTTP backend.
//
// Each test stands up a wiremock server playing the assistant API and drives
// the controller the way an embedding host would: upload, question, stats
// refresh, health probe.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use parcelle::{spawn_stats_poller, ChatWidget, Role, WidgetError};

async fn mock_upload_ok(server: &MockServer, filename: &str, chunks: u64, size: u64) {
    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "filename": filename,
            "chunks": chunks,
            "size": size,
        })))
        .mount(server)
        .await;
}

async fn mock_stats_ok(server: &MockServer, total: u64, hits: u64) {
    Mock::given(method("GET"))
        .and(path("/api/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_queries": total,
            "cache_hits": hits,
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn upload_success_records_document_and_notice() {
    let server = MockServer::start().await;
    mock_upload_ok(&server, "a.pdf", 5, 1024).await;

    let mut widget = ChatWidget::new(server.uri());
    widget.upload_document("a.pdf", b"%PDF-1.4 contenu".to_vec()).await.unwrap();

    assert_eq!(widget.documents().len(), 1);
    assert_eq!(widget.documents()[0].chunk_count, 5);
    assert_eq!(widget.documents()[0].size_bytes, 1024);

    let nodes = widget.transcript().nodes();
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].role, Role::System);
    assert!(nodes[0]
        .html
        .contains("Document &quot;a.pdf&quot; uploadé avec succès (5 chunks indexés)"));
    // Badge-free system message.
    assert!(!nodes[0].html.contains("source-badge"));

    // The multipart request carried both the file and the session id.
    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body).to_string();
    assert!(body.contains("name=\"session_id\""));
    assert!(body.contains("session_"));
    assert!(body.contains("a.pdf"));
}

#[tokio::test]
async fn upload_failure_shows_inline_error_and_records_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut widget = ChatWidget::new(server.uri());
    let result = widget.upload_document("a.pdf", vec![1, 2, 3]).await;

    assert!(matches!(result, Err(WidgetError::Upload(_))));
    assert!(widget.documents().is_empty());
    let nodes = widget.transcript().nodes();
    assert_eq!(nodes.len(), 1);
    assert!(nodes[0].html.contains("Erreur lors de l'upload du document"));
}

#[tokio::test]
async fn query_success_resolves_placeholder_with_ordered_badges() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/query"))
        .and(body_partial_json(json!({"question": "Quelle hauteur ?", "use_context": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "answer": "42",
            "cached": true,
            "sources_used": [1, 2],
            "confidence": 0.87,
            "processing_time": 0.12,
        })))
        .mount(&server)
        .await;
    mock_stats_ok(&server, 5, 2).await;

    let mut widget = ChatWidget::new(server.uri());
    widget.send_message("Quelle hauteur ?").await.unwrap();

    let nodes = widget.transcript().nodes();
    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0].role, Role::User);
    assert_eq!(nodes[1].role, Role::Bot);
    assert!(nodes[1].html.contains("42"));
    assert!(!nodes[1].html.contains("loading-dots"));

    // Badges in their fixed order: cache, sources, confidence.
    let html = &nodes[1].html;
    let cache_at = html.find("💾 Cache").unwrap();
    let sources_at = html.find("📄 2 sources").unwrap();
    let confidence_at = html.find("🎯 87%").unwrap();
    assert!(cache_at < sources_at && sources_at < confidence_at);

    // The answered query refreshed the stats panel and recorded a time.
    let panel = widget.stats_panel();
    let panel = panel.lock();
    assert_eq!(panel.snapshot().total_queries, 5);
    assert!(panel.last_response_time_ms.is_some());
}

#[tokio::test]
async fn query_failure_swaps_placeholder_for_apology_and_releases_guard() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/query"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut widget = ChatWidget::new(server.uri());
    let result = widget.send_message("Question ?").await;
    assert!(matches!(result, Err(WidgetError::Query(_))));

    let nodes = widget.transcript().nodes();
    assert_eq!(nodes.len(), 2);
    assert!(!nodes[1].html.contains("loading-dots"));
    assert!(nodes[1].html.contains("Erreur lors de l'analyse. Veuillez réessayer."));

    // The guard is released: the next submission reaches the backend again
    // (and fails as Query, not Busy).
    let second = widget.send_message("Encore ?").await;
    assert!(matches!(second, Err(WidgetError::Query(_))));
}

#[tokio::test]
async fn uploaded_documents_flip_use_context() {
    let server = MockServer::start().await;
    mock_upload_ok(&server, "plu.pdf", 12, 4096).await;
    Mock::given(method("POST"))
        .and(path("/api/query"))
        .and(body_partial_json(json!({"use_context": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"answer": "Zone UB"})))
        .mount(&server)
        .await;
    mock_stats_ok(&server, 1, 0).await;

    let mut widget = ChatWidget::new(server.uri());
    widget.upload_document("plu.pdf", vec![0u8; 64]).await.unwrap();
    // Matching succeeds only when use_context is true, so an Ok here proves
    // the derived flag.
    widget.send_message("Quelle zone ?").await.unwrap();

    let nodes = widget.transcript().nodes();
    assert!(nodes.last().unwrap().html.contains("Zone UB"));
}

#[tokio::test]
async fn stats_failure_keeps_counts_and_raises_banner() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_queries": 9,
            "cache_hits": 4,
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/stats"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let widget = ChatWidget::new(server.uri());
    widget.refresh_stats().await;
    {
        let panel = widget.stats_panel();
        let panel = panel.lock();
        assert_eq!(panel.snapshot().total_queries, 9);
        assert!(panel.banner().is_none());
    }

    widget.refresh_stats().await;
    let panel = widget.stats_panel();
    let panel = panel.lock();
    assert_eq!(panel.snapshot().total_queries, 9);
    assert_eq!(panel.snapshot().cache_hits, 4);
    assert_eq!(panel.banner(), Some("Erreur de connexion API"));
}

#[tokio::test]
async fn health_probe_sets_the_status_line() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "healthy",
            "cache": "enabled",
        })))
        .mount(&server)
        .await;

    let widget = ChatWidget::new(server.uri());
    widget.check_connection().await;
    assert_eq!(
        widget.stats_panel().lock().status_line.as_deref(),
        Some("✅ En ligne - Cache: enabled")
    );
}

#[tokio::test]
async fn unreachable_backend_reads_offline() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let widget = ChatWidget::new(server.uri());
    widget.check_connection().await;
    assert_eq!(widget.stats_panel().lock().status_line.as_deref(), Some("❌ Hors ligne"));
}

#[tokio::test]
async fn stats_poller_refreshes_on_its_interval() {
    let server = MockServer::start().await;
    mock_stats_ok(&server, 3, 1).await;

    let widget = ChatWidget::new(server.uri());
    let handle = spawn_stats_poller(
        widget.client().clone(),
        widget.stats_panel(),
        Duration::from_millis(10),
    );

    tokio::time::sleep(Duration::from_millis(100)).await;
    handle.abort();

    let panel = widget.stats_panel();
    let panel = panel.lock();
    assert_eq!(panel.snapshot().total_queries, 3);
    assert_eq!(panel.snapshot().cache_hits, 1);
}
