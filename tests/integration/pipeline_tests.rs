//! Integration tests for the scrape pipeline
//!
//! These tests use wiremock to serve synthetic index pages and run the full
//! fetch → extract → normalize → validate → persist cycle end-to-end.
//! The blocking HTTP client is driven from `spawn_blocking` so it never runs
//! on the async test runtime.

use index_constituents::config::{Config, OutputConfig, SourceConfig};
use index_constituents::{Pipeline, RunSummary, ScrapeError, Stage};
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds a Wikipedia-like page with a "Components" heading and `rows` rows
fn constituents_page(rows: usize) -> String {
    let mut html = String::from(
        r#"<html><head><title>Russell 1000 Index</title></head><body>
        <h2>History</h2>
        <table class="wikitable"><tr><th>Year</th><th>Close</th></tr>
            <tr><td>2022</td><td>2,301.30</td></tr></table>
        <div class="mw-heading mw-heading2"><h2 id="Components">Components</h2></div>
        <table class="wikitable sortable">
        <thead><tr><th>Company</th><th>Symbol</th><th>GICS Sector</th><th>GICS Sub-Industry</th></tr></thead>
        <tbody>"#,
    );
    for i in 0..rows {
        html.push_str(&format!(
            "<tr><td><a href=\"/wiki/Company_{i}\">Company {i}, Inc.</a></td>\
             <td>SYM{i}</td><td>Sector {}</td><td>Industry {}</td></tr>\n",
            i % 11,
            i % 7
        ));
    }
    html.push_str("</tbody></table></body></html>");
    html
}

/// Creates a test configuration pointing at the mock server and a temp dir
fn create_test_config(url: String, output_dir: &Path) -> Config {
    Config {
        source: SourceConfig {
            url,
            timeout_secs: 1,
        },
        output: OutputConfig {
            directory: output_dir.join("data").to_string_lossy().into_owned(),
            ..OutputConfig::default()
        },
        ..Config::default()
    }
}

/// Runs the pipeline on a blocking thread
async fn run_pipeline(config: Config) -> Result<RunSummary, ScrapeError> {
    tokio::task::spawn_blocking(move || Pipeline::new(config)?.run())
        .await
        .expect("pipeline thread panicked")
}

async fn serve_page(server: &MockServer, body: String) {
    Mock::given(method("GET"))
        .and(path("/wiki/Russell_1000_Index"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_end_to_end_150_rows() {
    let mock_server = MockServer::start().await;
    serve_page(&mock_server, constituents_page(150)).await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(
        format!("{}/wiki/Russell_1000_Index", mock_server.uri()),
        dir.path(),
    );
    let output = config.output.clone();

    let summary = run_pipeline(config).await.expect("Pipeline failed");

    assert_eq!(summary.rows, 150);
    assert_eq!(
        summary.columns,
        vec!["Company", "Symbol", "GICS_Sector", "GICS_Sub_Industry"]
    );

    // CSV: header + 150 data lines
    let csv_path = Path::new(&output.directory).join(&output.csv_file);
    let csv = std::fs::read_to_string(&csv_path).expect("CSV not written");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 151);
    assert_eq!(lines[0], "Company,Symbol,GICS_Sector,GICS_Sub_Industry");
    assert_eq!(lines[1], "\"Company 0, Inc.\",SYM0,Sector 0,Industry 0");

    // JSON: 150 records with the four canonical fields in column order
    let json_path = Path::new(&output.directory).join(&output.json_file);
    let json = std::fs::read_to_string(&json_path).expect("JSON not written");
    let records: Vec<serde_json::Value> = serde_json::from_str(&json).expect("Invalid JSON");
    assert_eq!(records.len(), 150);
    for record in &records {
        let object = record.as_object().expect("Record is not an object");
        assert_eq!(object.len(), 4);
        for field in ["Company", "Symbol", "GICS_Sector", "GICS_Sub_Industry"] {
            assert!(object.contains_key(field), "missing {}", field);
        }
    }
    assert_eq!(records[149]["Symbol"], "SYM149");
    assert!(json.starts_with(r#"[{"Company":"Company 0, Inc.","Symbol":"SYM0","#));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_sends_identifying_user_agent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wiki/Russell_1000_Index"))
        .and(header(
            "user-agent",
            "TestClient/9.9 (+https://example.com/contact)",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(constituents_page(100)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut config = create_test_config(
        format!("{}/wiki/Russell_1000_Index", mock_server.uri()),
        dir.path(),
    );
    config.user_agent.client_name = "TestClient".to_string();
    config.user_agent.client_version = "9.9".to_string();
    config.user_agent.contact_url = "https://example.com/contact".to_string();

    let summary = run_pipeline(config).await.expect("Pipeline failed");
    assert_eq!(summary.rows, 100);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_identical_page_gives_identical_files() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wiki/Russell_1000_Index"))
        .respond_with(ResponseTemplate::new(200).set_body_string(constituents_page(120)))
        .expect(2)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(
        format!("{}/wiki/Russell_1000_Index", mock_server.uri()),
        dir.path(),
    );
    let output = config.output.clone();
    let csv_path = Path::new(&output.directory).join(&output.csv_file);
    let json_path = Path::new(&output.directory).join(&output.json_file);

    let first = run_pipeline(config.clone()).await.expect("First run failed");
    let first_csv = std::fs::read(&csv_path).unwrap();
    let first_json = std::fs::read(&json_path).unwrap();

    let second = run_pipeline(config).await.expect("Second run failed");
    assert_eq!(std::fs::read(&csv_path).unwrap(), first_csv);
    assert_eq!(std::fs::read(&json_path).unwrap(), first_json);

    for (a, b) in first.artifacts.iter().zip(&second.artifacts) {
        assert_eq!(a.sha256, b.sha256);
        assert_eq!(a.bytes, b.bytes);
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_http_error_status_is_fetch_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1) // No retry
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(format!("{}/missing", mock_server.uri()), dir.path());

    let err = run_pipeline(config).await.unwrap_err();
    assert!(matches!(err, ScrapeError::HttpStatus { status: 404, .. }));
    assert_eq!(err.stage(), Stage::Fetch);
    assert!(!dir.path().join("data").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_server_error_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(mock_server.uri(), dir.path());

    let err = run_pipeline(config).await.unwrap_err();
    assert!(matches!(err, ScrapeError::HttpStatus { status: 503, .. }));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_slow_response_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(constituents_page(150))
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(mock_server.uri(), dir.path());

    let err = run_pipeline(config).await.unwrap_err();
    assert!(matches!(err, ScrapeError::Timeout { .. }), "got {:?}", err);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_too_few_rows_fails_validation() {
    let mock_server = MockServer::start().await;
    serve_page(&mock_server, constituents_page(99)).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(
        format!("{}/wiki/Russell_1000_Index", mock_server.uri()),
        dir.path(),
    );

    let err = run_pipeline(config).await.unwrap_err();
    assert!(matches!(
        err,
        ScrapeError::RowCountTooLow {
            count: 99,
            minimum: 100
        }
    ));
    assert_eq!(err.stage(), Stage::Validate);
    assert!(!dir.path().join("data").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_page_without_tables_fails_extraction() {
    let mock_server = MockServer::start().await;
    serve_page(
        &mock_server,
        "<html><body><h2>Components</h2><p>Moved elsewhere.</p></body></html>".to_string(),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(
        format!("{}/wiki/Russell_1000_Index", mock_server.uri()),
        dir.path(),
    );

    let err = run_pipeline(config).await.unwrap_err();
    assert!(matches!(err, ScrapeError::NoSuitableTable));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_failed_run_leaves_previous_output() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/good"))
        .respond_with(ResponseTemplate::new(200).set_body_string(constituents_page(110)))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/short"))
        .respond_with(ResponseTemplate::new(200).set_body_string(constituents_page(5)))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let good = create_test_config(format!("{}/good", mock_server.uri()), dir.path());
    let short = create_test_config(format!("{}/short", mock_server.uri()), dir.path());
    let csv_path = Path::new(&good.output.directory).join(&good.output.csv_file);

    run_pipeline(good).await.expect("First run failed");
    let before = std::fs::read(&csv_path).unwrap();

    assert!(run_pipeline(short).await.is_err());
    assert_eq!(std::fs::read(&csv_path).unwrap(), before);
}
