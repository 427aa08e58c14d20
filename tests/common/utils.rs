use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::path::PathBuf;
use std::thread;

use element_registry::contribution::contribution_model::Contribution;
use element_registry::contribution::source::{DocumentFormat, EmbeddedSource};

pub fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

pub fn fixture(name: &str) -> PathBuf {
    fixtures_root().join(name)
}

pub fn contribution(locator: &str, namespace: &str, entries: &[(&str, &str)]) -> Contribution {
    Contribution::new(
        locator,
        namespace,
        entries
            .iter()
            .map(|(s, i)| (s.to_string(), i.to_string()))
            .collect(),
    )
}

/// Embedded source of elements scripts, in the given order.
pub fn scripts(documents: &[(&str, &str)]) -> EmbeddedSource {
    documents
        .iter()
        .fold(EmbeddedSource::new(), |source, (locator, text)| {
            source.with_document(*locator, DocumentFormat::Maestro, *text)
        })
}

/// Answer a single HTTP request on localhost with `status` and `body`.
/// Returns the base URL, e.g. `http://127.0.0.1:40123`.
pub fn serve_once(status: &str, body: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut line = String::new();
        while reader.read_line(&mut line).unwrap() > 0 && line != "\r\n" {
            line.clear();
        }
        stream.write_all(response.as_bytes()).unwrap();
    });

    base
}

/// Base URL of a localhost port that nothing listens on.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
