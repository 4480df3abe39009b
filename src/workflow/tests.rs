use std::sync::{Arc, Mutex};

use serde_json::json;
use tempfile::tempdir;
use url::Url;

use crate::processing::Processor;
use crate::request::{BuilderRegistry, RequestBody, ToolRequest};
use crate::source::{ImageInfo, ImageProbe};
use crate::test_support::png_bytes;
use crate::transport::{self, ApiResponse, BlobStore, RequestSender, TransportError};

use super::{JobSpec, JobStep, load_job, run_job, save_report};

struct AcceptingProbe;

impl ImageProbe for AcceptingProbe {
    fn probe(&self, _url: &Url) -> crate::source::Result<ImageInfo> {
        Ok(ImageInfo {
            content_type: "image/png",
            dimensions: Some((3, 2)),
        })
    }
}

/// Answers with a PNG, except for `rotate` which the server refuses.
#[derive(Default)]
struct RecordingSender {
    seen: Mutex<Vec<(String, bool)>>,
}

impl RequestSender for RecordingSender {
    fn send(&self, request: &ToolRequest) -> transport::Result<ApiResponse> {
        let multipart = matches!(request.body, RequestBody::Multipart(_));
        self.seen
            .lock()
            .expect("seen lock")
            .push((request.path.clone(), multipart));
        if request.tool == "rotate" {
            return Err(TransportError::Status {
                code: 500,
                message: "rotation backend offline".to_string(),
            });
        }
        Ok(ApiResponse {
            status: 200,
            content_type: "image/png".to_string(),
            bytes: png_bytes(),
        })
    }
}

fn processor(sender: Arc<RecordingSender>) -> Processor {
    Processor::new(
        BuilderRegistry::default(),
        sender,
        Arc::new(AcceptingProbe),
        BlobStore::new(),
    )
}

fn step(tool: &str, output: &str) -> JobStep {
    JobStep {
        tool: tool.to_string(),
        file: Some("photo.png".to_string()),
        url: None,
        overlay_file: None,
        overlay_url: None,
        settings: json!({}),
        output: output.to_string(),
    }
}

#[test]
fn steps_run_in_order_and_failures_do_not_stop_the_job() {
    let dir = tempdir().expect("tempdir");
    std::fs::write(dir.path().join("photo.png"), png_bytes()).expect("write photo");

    let mut resize = step("resize", "out/small");
    resize.settings = json!({"width": 32, "height": 16});
    let mut by_url = step("compress", "out/remote.jpg");
    by_url.file = None;
    by_url.url = Some("https://example.com/cat.jpg".to_string());
    let job = JobSpec {
        name: Some("thumbs".to_string()),
        steps: vec![resize, step("rotate", "out/turned.png"), by_url],
    };

    let sender = Arc::new(RecordingSender::default());
    let processor = processor(Arc::clone(&sender));
    let report = run_job(&job, dir.path(), &processor).expect("job");

    assert_eq!(report.job_name.as_deref(), Some("thumbs"));
    assert_eq!(report.succeeded, 2);
    assert_eq!(report.failed, 1);
    assert!(report.steps[1].error.as_deref().is_some_and(|error| error.contains("rotation backend offline")));

    let small = dir.path().join("out").join("small.png");
    assert_eq!(report.steps[0].output.as_deref(), Some(small.display().to_string().as_str()));
    assert_eq!(std::fs::read(&small).expect("saved"), png_bytes());
    assert!(dir.path().join("out").join("remote.jpg").exists());
    assert_eq!(processor.store().live_count(), 0);

    let seen = sender.seen.lock().expect("seen lock").clone();
    assert_eq!(
        seen,
        vec![
            ("/api/v1/resize".to_string(), true),
            ("/api/v1/rotate".to_string(), true),
            ("/api/v1/compress-by-url".to_string(), false),
        ]
    );
}

#[test]
fn invalid_inputs_fail_only_their_step() {
    let dir = tempdir().expect("tempdir");
    std::fs::write(dir.path().join("photo.png"), png_bytes()).expect("write photo");

    let mut bad_setting = step("compress", "a.jpg");
    bad_setting.settings = json!({"quality": 500});
    let mut bad_url = step("resize", "b.png");
    bad_url.file = None;
    bad_url.url = Some("https://picsum.photos/200".to_string());
    let job = JobSpec {
        name: None,
        steps: vec![
            step("sharpen", "c.png"),
            bad_setting,
            bad_url,
            step("blend", "d.png"),
            step("crop", "e.png"),
        ],
    };

    let sender = Arc::new(RecordingSender::default());
    let report = run_job(&job, dir.path(), &processor(Arc::clone(&sender))).expect("job");
    let errors = report
        .steps
        .iter()
        .map(|step| step.error.clone().unwrap_or_default())
        .collect::<Vec<_>>();
    assert!(errors[0].contains("sharpen"));
    assert!(errors[1].contains("quality"));
    assert!(errors[2].contains("does not appear to be an image"));
    assert!(errors[3].contains("blend"));
    assert!(errors[4].is_empty());
    assert_eq!(report.failed, 4);
    assert_eq!(sender.seen.lock().expect("seen lock").len(), 1);
}

#[test]
fn job_files_load_from_yaml_and_reports_save_as_json() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("job.yml");
    std::fs::write(
        &path,
        "name: demo\nsteps:\n  - tool: blend\n    url: https://example.com/a.png\n    overlay_url: https://example.com/b.png\n    settings:\n      opacity: 0.25\n    output: blended.png\n",
    )
    .expect("write job");

    let job = load_job(&path).expect("job");
    assert_eq!(job.name.as_deref(), Some("demo"));
    assert_eq!(job.steps[0].overlay_url.as_deref(), Some("https://example.com/b.png"));

    let sender = Arc::new(RecordingSender::default());
    let report = run_job(&job, dir.path(), &processor(Arc::clone(&sender))).expect("job");
    assert_eq!(report.succeeded, 1);
    assert_eq!(
        sender.seen.lock().expect("seen lock")[0],
        ("/api/v1/blend-by-url".to_string(), false)
    );

    let report_path = dir.path().join("report.json");
    save_report(&report_path, &report).expect("save report");
    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).expect("read")).expect("json");
    assert_eq!(saved["succeeded"], json!(1));
    assert_eq!(saved["steps"][0]["tool"], json!("blend"));
}

#[test]
fn malformed_jobs_are_rejected_up_front() {
    let empty = JobSpec {
        name: None,
        steps: vec![],
    };
    assert!(empty.validate().is_err());

    let mut both = step("resize", "a.png");
    both.url = Some("https://example.com/a.png".to_string());
    let mut neither = step("resize", "a.png");
    neither.file = None;
    let mut list_settings = step("resize", "a.png");
    list_settings.settings = json!([1, 2]);
    for bad in [both, neither, list_settings, step(" ", "a.png")] {
        let job = JobSpec {
            name: None,
            steps: vec![bad],
        };
        assert!(job.validate().is_err());
    }

    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("job.json");
    std::fs::write(&path, r#"{"steps": [{"tool": "crop", "file": "a.png", "output": "b.png", "extra": 1}]}"#)
        .expect("write");
    assert!(load_job(&path).is_err());
}
