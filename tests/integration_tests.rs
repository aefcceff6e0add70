use schemy::cli::{run_download, ConsoleWriter};
use schemy::core::DownloadRequest;
use schemy::{AirtableClient, BaseId, SchemaSource, SchemyError};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

const BASE_ID: &str = "appAbCdEfGh123456";
const TOKEN: &str = "patTEST123";

const ONE_TABLE: &str = r#"{
    "tables": [
        {
            "id": "tblAAAAAAAAAAAAAA",
            "name": "Tasks",
            "primaryFieldId": "fldAAAAAAAAAAAAAA",
            "fields": [
                {"id": "fldAAAAAAAAAAAAAA", "name": "Name", "type": "singleLineText"}
            ],
            "views": [{"id": "viwAAAAAAAAAAAAAA", "name": "Grid view", "type": "grid"}]
        }
    ]
}"#;

/// Serve one canned HTTP response on a local port. Resolves to the raw
/// request head that was received.
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&chunk[..n]);
            if request.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        let _ = stream.shutdown().await;
        String::from_utf8_lossy(&request).into_owned()
    });

    (format!("http://{}/v0/", addr), handle)
}

fn base_id() -> BaseId {
    BaseId::parse(BASE_ID).unwrap()
}

#[tokio::test]
async fn test_fetch_sends_bearer_token() {
    let (url, server) = serve_once("200 OK", ONE_TABLE).await;
    let client = AirtableClient::with_base_url(TOKEN, &url).unwrap();

    let schema = client.get_base_schema(&base_id()).await.unwrap();
    assert_eq!(schema.tables.len(), 1);
    assert_eq!(schema.tables[0].name, "Tasks");
    assert_eq!(schema.tables[0].fields[0].field_type, "singleLineText");

    let request = server.await.unwrap().to_lowercase();
    assert!(request.starts_with(&format!("get /v0/meta/bases/{}/tables http/1.1", BASE_ID).to_lowercase()));
    assert!(request.contains(&format!("authorization: bearer {}", TOKEN).to_lowercase()));
}

#[tokio::test]
async fn test_fetch_surfaces_api_error() {
    let (url, server) = serve_once(
        "422 Unprocessable Entity",
        r#"{"error":{"type":"INVALID_REQUEST","message":"bad base"}}"#,
    )
    .await;
    let client = AirtableClient::with_base_url(TOKEN, &url).unwrap();

    let err = client.get_base_schema(&base_id()).await.unwrap_err();
    match &err {
        SchemyError::Api {
            status,
            kind,
            message,
        } => {
            assert_eq!(*status, 422);
            assert_eq!(kind, "INVALID_REQUEST");
            assert_eq!(message, "bad base");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(err.to_string().contains("bad base"));
    server.await.unwrap();
}

#[tokio::test]
async fn test_fetch_not_found_code() {
    let (url, server) = serve_once("404 Not Found", r#"{"error":"NOT_FOUND"}"#).await;
    let client = AirtableClient::with_base_url(TOKEN, &url).unwrap();

    let err = client.get_base_schema(&base_id()).await.unwrap_err();
    assert!(matches!(err, SchemyError::Api { status: 404, .. }));
    assert!(err.to_string().contains("NOT_FOUND"));
    server.await.unwrap();
}

#[tokio::test]
async fn test_fetch_malformed_body() {
    let (url, server) = serve_once("200 OK", r#"{"tables": "not a list"}"#).await;
    let client = AirtableClient::with_base_url(TOKEN, &url).unwrap();

    let err = client.get_base_schema(&base_id()).await.unwrap_err();
    assert!(matches!(err, SchemyError::Serialization(_)));
    server.await.unwrap();
}

#[tokio::test]
async fn test_fetch_transport_error() {
    // Grab a free port, then close it again so nothing is listening.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = AirtableClient::with_base_url(TOKEN, &format!("http://{}/v0/", addr)).unwrap();
    let err = client.get_base_schema(&base_id()).await.unwrap_err();
    assert!(matches!(err, SchemyError::Transport(_)));
}

#[tokio::test]
async fn test_download_writes_what_it_prints() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("schema.json");
    let (url, server) = serve_once("200 OK", ONE_TABLE).await;
    let client = AirtableClient::with_base_url(TOKEN, &url).unwrap();
    let request = DownloadRequest::validate(BASE_ID, &output).unwrap();
    let mut writer = ConsoleWriter::with_streams(Vec::new(), Vec::new());

    run_download(&client, &request, &mut writer).await.unwrap();
    server.await.unwrap();

    let (stdout, _) = writer.into_inner();
    let written = std::fs::read(&output).unwrap();
    assert_eq!(stdout, written);

    let text = String::from_utf8(written).unwrap();
    assert!(text.starts_with("{\n  \"tables\": [\n"));
    assert!(!text.contains("primaryFieldId"));
    assert!(!text.contains("views"));

    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    let tables = value["tables"].as_array().unwrap();
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0]["fields"][0]["type"], "singleLineText");
    assert!(tables[0]["fields"][0].get("options").is_none());
}

#[tokio::test]
async fn test_download_api_error_leaves_no_file() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("schema.json");
    let (url, server) = serve_once(
        "422 Unprocessable Entity",
        r#"{"error":{"type":"INVALID_REQUEST","message":"bad base"}}"#,
    )
    .await;
    let client = AirtableClient::with_base_url(TOKEN, &url).unwrap();
    let request = DownloadRequest::validate(BASE_ID, &output).unwrap();
    let mut writer = ConsoleWriter::with_streams(Vec::new(), Vec::new());

    let err = run_download(&client, &request, &mut writer).await.unwrap_err();
    server.await.unwrap();

    assert!(err.to_string().contains("bad base"));
    assert!(!output.exists());
    let (stdout, _) = writer.into_inner();
    assert!(stdout.is_empty());
}
