use claims_client::core::{CsvMode, Notifier, Severity};
use claims_client::{ExportEngine, ExportPipeline, HttpClaimsApi, LocalDownloads, ToastChannel};
use httpmock::prelude::*;
use std::time::Duration;
use tempfile::TempDir;

fn toasts() -> ToastChannel {
    ToastChannel::new(Duration::from_secs(60))
}

#[tokio::test]
async fn test_end_to_end_export_writes_csv_file() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();
    let listing = server.mock(|when, then| {
        when.method(GET).path("/api/claims");
        then.status(200)
            .header("Content-Type", "application/json")
            .body(
                r#"[
                    {"id":"CLM-1001","patient_name":"Ada Park","billed_amount":1500.0,"paid_amount":1200.0,"status":"Paid","insurer_name":"Acme Health","discharge_date":"2024-02-11"},
                    {"id":"CLM-1002","patient_name":"Ben Ortiz","billed_amount":820.5,"paid_amount":0.0,"status":"Denied","insurer_name":"Blue Shield","discharge_date":null},
                    {"id":"CLM-1003","patient_name":"Cy Young","billed_amount":300.0,"paid_amount":300.0,"status":"Paid","insurer_name":"Acme Health","discharge_date":"2024-03-02"}
                ]"#,
            );
    });

    let api = HttpClaimsApi::new(&server.base_url()).unwrap();
    let sink = LocalDownloads::new(temp_dir.path());
    let notifier = toasts();
    let engine = ExportEngine::new(
        ExportPipeline::new(api, sink).with_mode(CsvMode::Legacy),
        notifier.clone(),
    );

    let location = engine.run().await.expect("export should succeed");

    listing.assert();
    let path = temp_dir.path().join("claims_export.csv");
    assert_eq!(location, path.display().to_string());

    let csv = std::fs::read_to_string(path).unwrap();
    let lines: Vec<&str> = csv.split('\n').collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(
        lines[0],
        "id,patient_name,billed_amount,paid_amount,status,insurer_name,discharge_date"
    );
    assert_eq!(
        lines[2],
        r#""CLM-1002","Ben Ortiz","820.5","0","Denied","Blue Shield","null""#
    );
    assert!(notifier.visible().is_empty());
}

#[tokio::test]
async fn test_export_of_empty_listing_writes_empty_file() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/claims");
        then.status(200)
            .header("Content-Type", "application/json")
            .body("[]");
    });

    let api = HttpClaimsApi::new(&server.base_url()).unwrap();
    let engine = ExportEngine::new(
        ExportPipeline::new(api, LocalDownloads::new(temp_dir.path())),
        toasts(),
    );

    assert!(engine.run().await.is_some());
    let csv = std::fs::read_to_string(temp_dir.path().join("claims_export.csv")).unwrap();
    assert_eq!(csv, "");
}

#[tokio::test]
async fn test_quoted_export_survives_embedded_delimiters() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/claims");
        then.status(200)
            .header("Content-Type", "application/json")
            .body(r#"[{"id":1,"amount":"10,000","memo":"said \"asap\""}]"#);
    });

    let api = HttpClaimsApi::new(&server.base_url()).unwrap();
    let engine = ExportEngine::new(
        ExportPipeline::new(api, LocalDownloads::new(temp_dir.path())),
        toasts(),
    );
    engine.run().await.unwrap();

    let path = temp_dir.path().join("claims_export.csv");
    let mut reader = csv::Reader::from_path(path).unwrap();
    let headers = reader.headers().unwrap().clone();
    let row = reader.records().next().unwrap().unwrap();

    assert_eq!(headers.iter().collect::<Vec<_>>(), vec!["id", "amount", "memo"]);
    assert_eq!(row.iter().collect::<Vec<_>>(), vec!["1", "10,000", "said \"asap\""]);
}

#[tokio::test]
async fn test_export_failure_shows_single_error_toast() {
    let temp_dir = TempDir::new().unwrap();
    let server = MockServer::start();
    let listing = server.mock(|when, then| {
        when.method(GET).path("/api/claims");
        then.status(200)
            .header("Content-Type", "text/html")
            .body("<html>login required</html>");
    });

    let api = HttpClaimsApi::new(&server.base_url()).unwrap();
    let notifier = toasts();
    let engine = ExportEngine::new(
        ExportPipeline::new(api, LocalDownloads::new(temp_dir.path())),
        notifier.clone(),
    );

    assert_eq!(engine.run().await, None);

    listing.assert();
    let visible = notifier.visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].severity, Severity::Error);
    assert_eq!(visible[0].message, "Failed to export data. Please try again.");
    assert!(!temp_dir.path().join("claims_export.csv").exists());
}

#[tokio::test]
async fn test_unreachable_server_is_reported_not_raised() {
    let temp_dir = TempDir::new().unwrap();
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let api = HttpClaimsApi::with_timeout(
        &format!("http://127.0.0.1:{}", port),
        Some(Duration::from_secs(5)),
    )
    .unwrap();
    let notifier = toasts();
    let engine = ExportEngine::new(
        ExportPipeline::new(api, LocalDownloads::new(temp_dir.path())),
        notifier.clone(),
    );

    assert_eq!(engine.run().await, None);
    assert_eq!(notifier.visible().len(), 1);
    notifier.info("still usable");
    assert_eq!(notifier.visible().len(), 2);
}
