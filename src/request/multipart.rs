use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::source::FileBlob;
use crate::tools::FILE_FIELD;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    File(FileBlob),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub value: FieldValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedForm {
    pub content_type: String,
    pub body: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    fields: Vec<FormField>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push(FormField {
            name: name.into(),
            value: FieldValue::Text(value.into()),
        });
    }

    pub fn push_file(&mut self, name: impl Into<String>, blob: FileBlob) {
        self.fields.push(FormField {
            name: name.into(),
            value: FieldValue::File(blob),
        });
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.iter().find_map(|field| match &field.value {
            FieldValue::Text(value) if field.name == name => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn file(&self, name: &str) -> Option<&FileBlob> {
        self.fields.iter().find_map(|field| match &field.value {
            FieldValue::File(blob) if field.name == name => Some(blob),
            _ => None,
        })
    }

    pub fn setting_names(&self) -> BTreeSet<&str> {
        self.fields
            .iter()
            .filter(|field| matches!(field.value, FieldValue::Text(_)) && field.name != FILE_FIELD)
            .map(|field| field.name.as_str())
            .collect()
    }

    pub fn encode(&self) -> EncodedForm {
        let mut boundary = next_boundary();
        while self.collides_with(&boundary) {
            boundary = next_boundary();
        }
        EncodedForm {
            content_type: format!("multipart/form-data; boundary={boundary}"),
            body: self.encode_with_boundary(&boundary),
        }
    }

    pub fn encode_with_boundary(&self, boundary: &str) -> Vec<u8> {
        let mut body = Vec::new();
        for field in &self.fields {
            body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
            match &field.value {
                FieldValue::Text(value) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                            escape_quoted(&field.name)
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(value.as_bytes());
                }
                FieldValue::File(blob) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                            escape_quoted(&field.name),
                            escape_quoted(blob.name()),
                            blob.content_type()
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(blob.bytes());
                }
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
        body
    }

    fn collides_with(&self, boundary: &str) -> bool {
        let needle = boundary.as_bytes();
        self.fields.iter().any(|field| {
            let haystack = match &field.value {
                FieldValue::Text(value) => value.as_bytes(),
                FieldValue::File(blob) => blob.bytes(),
            };
            haystack.windows(needle.len()).any(|window| window == needle)
        })
    }
}

fn next_boundary() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default();
    let sequence = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("imgtools-{nanos:016x}-{sequence:08x}")
}

fn escape_quoted(value: &str) -> String {
    value
        .replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
