use std::io::{Cursor, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use image::{ImageFormat, RgbImage};

pub(crate) fn png_bytes() -> Vec<u8> {
    let image = RgbImage::new(3, 2);
    let mut encoded = Cursor::new(Vec::new());
    image
        .write_to(&mut encoded, ImageFormat::Png)
        .expect("encode png");
    encoded.into_inner()
}

/// Local HTTP server answering exactly one request with a canned response.
pub(crate) struct OneShotServer {
    pub base: String,
    handle: JoinHandle<Vec<u8>>,
}

impl OneShotServer {
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    /// Raw request bytes received by the server.
    pub(crate) fn request(self) -> Vec<u8> {
        self.handle.join().expect("server thread")
    }
}

pub(crate) fn serve_once(status: u16, content_type: &str, body: Vec<u8>) -> OneShotServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let address = listener.local_addr().expect("local addr");
    let content_type = content_type.to_string();
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");
        let request = read_request(&mut stream);
        let reason = if status < 400 { "OK" } else { "Error" };
        let head = format!(
            "HTTP/1.1 {status} {reason}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );
        stream.write_all(head.as_bytes()).expect("write head");
        stream.write_all(&body).expect("write body");
        stream.flush().expect("flush");
        request
    });
    OneShotServer {
        base: format!("http://{address}"),
        handle,
    }
}

fn read_request(stream: &mut impl Read) -> Vec<u8> {
    let mut buffer = Vec::new();
    let mut chunk = [0_u8; 4096];
    loop {
        let read = stream.read(&mut chunk).expect("read request");
        if read == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..read]);
        if let Some(end) = find(&buffer, b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buffer[..end]).to_ascii_lowercase();
            let length = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buffer.len() >= end + 4 + length {
                break;
            }
        }
    }
    buffer
}

pub(crate) fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
