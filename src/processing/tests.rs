use std::sync::{Arc, Mutex};

use tempfile::tempdir;
use url::Url;

use crate::request::{BuilderRegistry, ToolRequest};
use crate::source::{ImageInfo, ImageProbe};
use crate::test_support::png_bytes;
use crate::tools::{ParamValue, SettingsBag, descriptor};
use crate::transport::{self, ApiResponse, BlobStore, RequestSender, TransportError};

use super::{ProcessingError, Processor, SourceRef};

struct AcceptingUrls;

impl ImageProbe for AcceptingUrls {
    fn probe(&self, _url: &Url) -> crate::source::Result<ImageInfo> {
        Ok(ImageInfo {
            content_type: "image/gif",
            dimensions: None,
        })
    }
}

/// Replies with a fixed content type, or a 503 when none is set.
struct CannedSender {
    content_type: Option<&'static str>,
    sent: Mutex<Vec<String>>,
}

impl CannedSender {
    fn new(content_type: Option<&'static str>) -> Arc<Self> {
        Arc::new(Self {
            content_type,
            sent: Mutex::new(Vec::new()),
        })
    }
}

impl RequestSender for CannedSender {
    fn send(&self, request: &ToolRequest) -> transport::Result<ApiResponse> {
        self.sent.lock().expect("sent lock").push(request.path.clone());
        match self.content_type {
            Some(content_type) => Ok(ApiResponse {
                status: 200,
                content_type: content_type.to_string(),
                bytes: b"PK\x03\x04".to_vec(),
            }),
            None => Err(TransportError::Status {
                code: 503,
                message: "busy".to_string(),
            }),
        }
    }
}

fn processor(sender: Arc<CannedSender>) -> Processor {
    Processor::new(
        BuilderRegistry::default(),
        sender,
        Arc::new(AcceptingUrls),
        BlobStore::new(),
    )
}

#[test]
fn archive_results_get_a_zip_extension_in_a_fresh_directory() {
    let dir = tempdir().expect("tempdir");
    let sender = CannedSender::new(Some("application/zip"));
    let processor = processor(Arc::clone(&sender));

    let output = processor
        .run(
            descriptor("gif-frames").expect("tool"),
            &SourceRef::Url("https://example.com/spin.gif".to_string()),
            None,
            &SettingsBag::new(),
            &dir.path().join("frames").join("spin"),
        )
        .expect("processed");

    assert_eq!(output.path, dir.path().join("frames").join("spin.zip"));
    assert_eq!(output.content_type, "application/zip");
    assert_eq!(std::fs::read(&output.path).expect("saved"), b"PK\x03\x04");
    assert_eq!(processor.store().live_count(), 0);
    assert_eq!(*sender.sent.lock().expect("sent lock"), vec!["/api/v1/gif-frames-by-url"]);
}

#[test]
fn settings_are_checked_before_inputs_are_read() {
    let dir = tempdir().expect("tempdir");
    let sender = CannedSender::new(Some("image/jpeg"));
    let settings = [("quality".to_string(), ParamValue::Integer(500))]
        .into_iter()
        .collect::<SettingsBag>();

    let error = processor(Arc::clone(&sender))
        .run(
            descriptor("compress").expect("tool"),
            &SourceRef::File(dir.path().join("missing.png")),
            None,
            &settings,
            &dir.path().join("out"),
        )
        .expect_err("out of range");

    assert!(matches!(error, ProcessingError::Tool(_)));
    assert!(sender.sent.lock().expect("sent lock").is_empty());
}

#[test]
fn server_failures_leave_no_output_behind() {
    let dir = tempdir().expect("tempdir");
    std::fs::write(dir.path().join("photo.png"), png_bytes()).expect("write input");
    let sender = CannedSender::new(None);

    let error = processor(Arc::clone(&sender))
        .run(
            descriptor("rotate").expect("tool"),
            &SourceRef::File(dir.path().join("photo.png")),
            None,
            &SettingsBag::new(),
            &dir.path().join("turned.png"),
        )
        .expect_err("server busy");

    assert!(matches!(
        error,
        ProcessingError::Transport(TransportError::Status { code: 503, .. })
    ));
    assert!(error.to_string().contains("busy"));
    assert!(!dir.path().join("turned.png").exists());
}
