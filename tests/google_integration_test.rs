//! Integration tests for the Google Drive and Sheets adapters against a
//! mock HTTP server

use medroi::adapters::google::drive::{folder_query, sha256_hex};
use medroi::adapters::google::{GoogleDriveClient, GoogleServices, SubmissionLog};
use medroi::config::{secret_string, GoogleConfig, MedRoiConfig, RetryConfig};
use medroi::core::ReportPipeline;
use medroi::domain::{DriveError, MedRoiError, Submission};
use mockito::{Matcher, Server};

const TOKEN: &str = "ya29.integration";

const SUBMISSION: &str = r#"
[hospital]
name = "RS Sehat"
location = "Jakarta"

[consultant]
name = "Budi"
email = "budi@example.com"
phone = "0812"

[financials]
initial_investment = 10000
annual_subscription_cost = 1000
annual_revenue_uplift = 3000
annual_operational_savings = 2000
"#;

fn google_config(base_url: &str, spreadsheet: Option<&str>) -> GoogleConfig {
    GoogleConfig {
        enabled: true,
        access_token: Some(secret_string(TOKEN.to_string())),
        drive_api_base_url: base_url.to_string(),
        sheets_api_base_url: base_url.to_string(),
        drive_root_folder_id: "root-123".to_string(),
        spreadsheet_id: spreadsheet.map(str::to_string),
        retry: RetryConfig {
            max_retries: 1,
            initial_delay_ms: 1,
            max_delay_ms: 5,
            backoff_multiplier: 2.0,
        },
        ..GoogleConfig::default()
    }
}

fn bearer() -> String {
    format!("Bearer {TOKEN}")
}

#[tokio::test]
async fn test_find_existing_folder() {
    let mut server = Server::new_async().await;
    let search = server
        .mock("GET", "/drive/v3/files")
        .match_query(Matcher::UrlEncoded(
            "q".into(),
            folder_query("RS Sehat - Jakarta", "root-123"),
        ))
        .match_header("authorization", bearer().as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"files":[{"id":"folder-1","name":"RS Sehat - Jakarta"}]}"#)
        .create_async()
        .await;
    let create = server
        .mock("POST", "/drive/v3/files")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = GoogleDriveClient::new(&google_config(&server.url(), None)).unwrap();
    let id = client
        .find_or_create_folder("RS Sehat - Jakarta")
        .await
        .unwrap();

    assert_eq!(id, "folder-1");
    search.assert_async().await;
    create.assert_async().await;
}

#[tokio::test]
async fn test_create_missing_folder() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/drive/v3/files")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"files":[]}"#)
        .create_async()
        .await;
    let create = server
        .mock("POST", "/drive/v3/files")
        .match_query(Matcher::Any)
        .match_body(Matcher::PartialJson(serde_json::json!({
            "name": "RS Sehat - Jakarta",
            "parents": ["root-123"],
            "mimeType": "application/vnd.google-apps.folder"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":"folder-new"}"#)
        .create_async()
        .await;

    let client = GoogleDriveClient::new(&google_config(&server.url(), None)).unwrap();
    let id = client
        .find_or_create_folder("RS Sehat - Jakarta")
        .await
        .unwrap();

    assert_eq!(id, "folder-new");
    create.assert_async().await;
}

#[tokio::test]
async fn test_create_folder_under_missing_root() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/drive/v3/files")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"files":[]}"#)
        .create_async()
        .await;
    server
        .mock("POST", "/drive/v3/files")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body(r#"{"error":{"message":"File not found: root-123"}}"#)
        .create_async()
        .await;

    let client = GoogleDriveClient::new(&google_config(&server.url(), None)).unwrap();
    let err = client
        .find_or_create_folder("RS Sehat - Jakarta")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        MedRoiError::Drive(DriveError::FolderNotFound(ref id)) if id == "root-123"
    ));
}

#[tokio::test]
async fn test_upload_verifies_checksum() {
    let pdf = b"%PDF-1.7 integration".to_vec();
    let mut server = Server::new_async().await;
    let upload = server
        .mock("POST", "/upload/drive/v3/files")
        .match_query(Matcher::UrlEncoded("uploadType".into(), "multipart".into()))
        .match_header(
            "content-type",
            Matcher::Regex("^multipart/related; boundary=".into()),
        )
        .match_body(Matcher::Regex("report.pdf".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            serde_json::json!({
                "id": "file-1",
                "webViewLink": "https://drive.example/file-1",
                "sha256Checksum": sha256_hex(&pdf),
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = GoogleDriveClient::new(&google_config(&server.url(), None)).unwrap();
    let stored = client.upload_pdf("folder-1", "report.pdf", &pdf).await.unwrap();

    assert_eq!(stored.file_id, "file-1");
    assert_eq!(stored.folder_id, "folder-1");
    assert_eq!(
        stored.web_view_link.as_deref(),
        Some("https://drive.example/file-1")
    );
    assert_eq!(stored.sha256, sha256_hex(&pdf));
    upload.assert_async().await;
}

#[tokio::test]
async fn test_upload_checksum_mismatch() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/upload/drive/v3/files")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":"file-1","sha256Checksum":"deadbeef"}"#)
        .create_async()
        .await;

    let client = GoogleDriveClient::new(&google_config(&server.url(), None)).unwrap();
    let err = client
        .upload_pdf("folder-1", "report.pdf", b"%PDF-1.7")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        MedRoiError::Drive(DriveError::ChecksumMismatch { .. })
    ));
}

#[tokio::test]
async fn test_upload_rejected_is_not_retried() {
    let mut server = Server::new_async().await;
    let upload = server
        .mock("POST", "/upload/drive/v3/files")
        .match_query(Matcher::Any)
        .with_status(403)
        .with_body(r#"{"error":{"message":"storageQuotaExceeded"}}"#)
        .expect(1)
        .create_async()
        .await;

    let client = GoogleDriveClient::new(&google_config(&server.url(), None)).unwrap();
    let err = client
        .upload_pdf("folder-1", "report.pdf", b"%PDF-1.7")
        .await
        .unwrap_err();

    assert!(matches!(err, MedRoiError::Drive(DriveError::UploadFailed(_))));
    upload.assert_async().await;
}

#[tokio::test]
async fn test_sheet_append() {
    let mut server = Server::new_async().await;
    let append = server
        .mock(
            "POST",
            Matcher::Regex(r"^/v4/spreadsheets/sheet-456/values/Sheet1!A1:append$".into()),
        )
        .match_query(Matcher::UrlEncoded(
            "valueInputOption".into(),
            "USER_ENTERED".into(),
        ))
        .match_header("authorization", bearer().as_str())
        .match_body(Matcher::PartialJson(
            serde_json::json!({ "values": [["a", "b"]] }),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"updates":{"updatedRange":"Sheet1!A2:B2","updatedRows":1}}"#)
        .create_async()
        .await;

    let services = GoogleServices::from_config(&google_config(&server.url(), Some("sheet-456")))
        .unwrap()
        .unwrap();
    let log = services.log.unwrap();
    log.append_row(vec!["a".to_string(), "b".to_string()])
        .await
        .unwrap();

    append.assert_async().await;
}

#[tokio::test]
async fn test_sheet_append_failure_is_sheets_error() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", Matcher::Regex("append$".into()))
        .match_query(Matcher::Any)
        .with_status(400)
        .with_body(r#"{"error":{"message":"Unable to parse range"}}"#)
        .create_async()
        .await;

    let services = GoogleServices::from_config(&google_config(&server.url(), Some("sheet-456")))
        .unwrap()
        .unwrap();
    let err = services
        .log
        .unwrap()
        .append_row(vec!["a".to_string()])
        .await
        .unwrap_err();

    assert!(matches!(err, MedRoiError::Sheets(_)));
    assert!(err.is_collaborator_failure());
}

#[tokio::test]
async fn test_pipeline_files_report_and_logs_row() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/drive/v3/files")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"files":[{"id":"folder-1"}]}"#)
        .create_async()
        .await;
    let upload = server
        .mock("POST", "/upload/drive/v3/files")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":"file-1","webViewLink":"https://drive.example/file-1"}"#)
        .create_async()
        .await;
    let append = server
        .mock("POST", Matcher::Regex("append$".into()))
        .match_query(Matcher::Any)
        .match_body(Matcher::Regex("https://drive.example/file-1".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"updates":{"updatedRows":1}}"#)
        .create_async()
        .await;

    let config = MedRoiConfig {
        google: google_config(&server.url(), Some("sheet-456")),
        ..MedRoiConfig::default()
    };
    let pipeline = ReportPipeline::from_config(&config)
        .unwrap()
        .with_output_dir(None);
    let submission = Submission::from_toml(SUBMISSION).unwrap();
    let outcome = pipeline.run(&submission).await.unwrap();

    assert!(outcome.is_complete(), "failures: {:?}", outcome.failures);
    assert!(outcome.sheet_appended);
    assert_eq!(outcome.stored.unwrap().file_id, "file-1");
    upload.assert_async().await;
    append.assert_async().await;
}

#[tokio::test]
async fn test_pipeline_dry_run_makes_no_requests() {
    let mut server = Server::new_async().await;
    let any = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let mut config = MedRoiConfig {
        google: google_config(&server.url(), Some("sheet-456")),
        ..MedRoiConfig::default()
    };
    config.application.dry_run = true;

    let outcome = ReportPipeline::from_config(&config)
        .unwrap()
        .with_output_dir(None)
        .run(&Submission::from_toml(SUBMISSION).unwrap())
        .await
        .unwrap();

    assert!(outcome.is_complete());
    assert!(outcome.stored.is_none());
    any.assert_async().await;
}
