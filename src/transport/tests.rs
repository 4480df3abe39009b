use std::net::TcpListener;
use std::sync::Arc;

use url::Url;

use crate::request::{BuilderRegistry, ToolInputs};
use crate::source::{FileBlob, ImageSource};
use crate::test_support::{find, png_bytes, serve_once};
use crate::tools::{SettingsBag, descriptor};

use super::client::server_message;
use super::{ApiClient, BlobStore, ProcessingResult, ResultSlot, TransportError};

fn client_for(base: &str) -> ApiClient {
    ApiClient::new(ureq::agent(), Url::parse(base).expect("base url"))
}

fn compress_upload() -> crate::request::ToolRequest {
    let compress = descriptor("compress").expect("compress");
    let mut settings = SettingsBag::new();
    settings.insert("quality", 90_i64);
    let blob = FileBlob::new("photo.png", png_bytes());
    BuilderRegistry::default()
        .build(compress, &ToolInputs::single(ImageSource::File(blob)), &settings)
        .expect("request")
}

#[test]
fn multipart_upload_reaches_the_file_endpoint() {
    let server = serve_once(200, "image/jpeg", vec![0xFF, 0xD8, 0xFF]);
    let client = client_for(&server.base).with_token("s3cret");

    let response = client.execute(&compress_upload()).expect("response");
    assert_eq!(response.status, 200);
    assert_eq!(response.content_type, "image/jpeg");
    assert_eq!(response.bytes, vec![0xFF, 0xD8, 0xFF]);

    let request = server.request();
    let text = String::from_utf8_lossy(&request);
    assert!(text.starts_with("POST /api/v1/compress HTTP/1.1"));
    assert!(text.to_ascii_lowercase().contains("content-type: multipart/form-data; boundary="));
    assert!(text.contains("Authorization: Bearer s3cret"));
    assert!(text.contains("name=\"quality\"\r\n\r\n90\r\n"));
    assert!(find(&request, b"\x89PNG").is_some());
}

#[test]
fn url_requests_post_json_to_the_by_url_endpoint() {
    let server = serve_once(200, "image/png", png_bytes());
    let client = client_for(&format!("{}/", server.base));
    let resize = descriptor("resize").expect("resize");
    let mut settings = SettingsBag::new();
    settings.insert("width", 64_i64);
    let source = ImageSource::Url(Url::parse("https://example.com/cat.jpg").expect("url"));
    let request = BuilderRegistry::default()
        .build(resize, &ToolInputs::single(source), &settings)
        .expect("request");

    client.execute(&request).expect("response");
    let raw = server.request();
    let text = String::from_utf8_lossy(&raw);
    assert!(text.starts_with("POST /api/v1/resize-by-url HTTP/1.1"));
    assert!(text.contains("Content-Type: application/json"));
    assert!(text.contains("\"image_url\":\"https://example.com/cat.jpg\""));
    assert!(text.contains("\"width\":64"));
    assert!(!text.contains("Authorization"));
}

#[test]
fn error_status_surfaces_the_server_detail() {
    let server = serve_once(422, "application/json", br#"{"detail":"quality must be <= 100"}"#.to_vec());
    let error = client_for(&server.base)
        .execute(&compress_upload())
        .expect_err("422");
    match error {
        TransportError::Status { code, message } => {
            assert_eq!(code, 422);
            assert_eq!(message, "quality must be <= 100");
        }
        other => panic!("unexpected error: {other}"),
    }
    server.request();
}

#[test]
fn unreachable_server_is_a_network_error() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").port()
    };
    let error = client_for(&format!("http://127.0.0.1:{port}"))
        .execute(&compress_upload())
        .expect_err("closed port");
    assert!(matches!(error, TransportError::Network(_)));
}

#[test]
fn oversized_responses_are_refused() {
    let server = serve_once(200, "image/png", vec![7; 64]);
    let error = client_for(&server.base)
        .with_max_response_bytes(16)
        .execute(&compress_upload())
        .expect_err("too large");
    assert!(matches!(error, TransportError::TooLarge { limit: 16 }));
}

#[test]
fn server_messages_fall_back_to_plain_text() {
    assert_eq!(server_message(br#"{"error":"bad key"}"#), "bad key");
    assert_eq!(server_message(br#"{"detail":[{"loc":"q"}]}"#), r#"[{"loc":"q"}]"#);
    assert_eq!(server_message(b"  Internal Server Error \n"), "Internal Server Error");
    assert_eq!(server_message(b""), "no details provided");
    assert_eq!(server_message("x".repeat(500).as_bytes()).len(), 200);
}

#[test]
fn endpoint_joins_base_and_path() {
    let client = client_for("https://api.example.com/tools/");
    assert_eq!(
        client.endpoint("/api/v1/crop").expect("endpoint").as_str(),
        "https://api.example.com/tools/api/v1/crop"
    );
}

#[test]
fn object_urls_are_revoked_on_drop() {
    let store = BlobStore::new();
    let first = store.create(Arc::from(vec![1_u8, 2, 3]));
    let second = store.create(Arc::from(vec![4_u8]));
    assert_ne!(first.as_str(), second.as_str());
    assert!(first.as_str().starts_with("blob:"));
    assert_eq!(store.live_count(), 2);
    assert_eq!(store.resolve(first.as_str()).as_deref(), Some(&[1_u8, 2, 3][..]));

    let url = first.to_string();
    first.revoke();
    assert_eq!(store.live_count(), 1);
    assert!(store.resolve(&url).is_none());
    drop(second);
    assert_eq!(store.live_count(), 0);
}

#[test]
fn object_urls_are_revoked_after_a_panic_poisons_the_store() {
    let store = BlobStore::new();
    let url = store.create(Arc::from(vec![7_u8, 8]));

    let holder = store.clone();
    let outcome = std::thread::spawn(move || {
        let _guard = holder.inner.lock().expect("store lock");
        panic!("panicked while holding the store lock");
    })
    .join();
    assert!(outcome.is_err());
    assert!(store.inner.is_poisoned());

    assert_eq!(store.live_count(), 1);
    assert_eq!(store.resolve(url.as_str()).as_deref(), Some(&[7_u8, 8][..]));
    drop(url);
    assert_eq!(store.live_count(), 0);
}

#[test]
fn replacing_a_result_releases_the_previous_url() {
    let store = BlobStore::new();
    let mut slot = ResultSlot::new();

    let first_url = slot
        .replace(ProcessingResult::new(&store, vec![1], "image/png"))
        .object_url()
        .to_string();
    let second_url = slot
        .replace(ProcessingResult::new(&store, vec![2], "image/jpeg"))
        .object_url()
        .to_string();

    assert_eq!(store.live_count(), 1);
    assert!(store.resolve(&first_url).is_none());
    assert!(store.resolve(&second_url).is_some());

    slot.clear();
    assert_eq!(store.live_count(), 0);
    assert!(slot.current().is_none());
}

#[test]
fn saved_results_use_the_content_type_extension() {
    let store = BlobStore::new();
    let cases = [
        ("image/png", "png"),
        ("image/jpeg; charset=binary", "jpg"),
        ("application/zip", "zip"),
        ("application/octet-stream", "bin"),
    ];
    for (content_type, extension) in cases {
        let result = ProcessingResult::new(&store, vec![0], content_type);
        assert_eq!(result.suggested_extension(), extension, "{content_type}");
    }

    let dir = tempfile::tempdir().expect("tempdir");
    let result = ProcessingResult::new(&store, png_bytes(), "image/png");
    let path = dir.path().join(format!("out.{}", result.suggested_extension()));
    result.save(&path).expect("save");
    assert_eq!(std::fs::read(&path).expect("read"), png_bytes());
}
