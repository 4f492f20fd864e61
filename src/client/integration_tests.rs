//! Downloader tests against mock servers

use super::*;
use crate::error::AppError;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

fn downloader() -> HttpDownloader {
    HttpDownloader::new(Logger::new("NET")).unwrap()
}

/// Mount a GET handler for `/dl-<size>` returning `body_len` bytes
async fn mount_payload(server: &MockServer, size_kb: u64, body_len: usize, status: u16) {
    Mock::given(method("GET"))
        .and(path(format!("/dl-{}", size_kb)))
        .respond_with(ResponseTemplate::new(status).set_body_bytes(vec![b'x'; body_len]))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_download_counts_every_byte() {
    let server = MockServer::start().await;
    mount_payload(&server, 64, 64 * 1024, 200).await;

    let measurement = downloader().download(&server.uri(), 64, false).await.unwrap();

    assert_eq!(measurement.bytes, 64 * 1024);
    assert!(measurement.elapsed < Duration::from_secs(30));
}

#[tokio::test]
async fn test_dry_run_still_hits_the_server() {
    let server = MockServer::start().await;
    mount_payload(&server, 10240, 4096, 200).await;

    let measurement = downloader().download(&server.uri(), 10240, true).await.unwrap();

    assert_eq!(measurement.bytes, 1_000_000);
    assert_eq!(measurement.elapsed, Duration::from_secs(8));
    // `expect(1)` is verified when the server is dropped
}

#[tokio::test]
async fn test_error_status_is_not_an_error() {
    let server = MockServer::start().await;
    mount_payload(&server, 1, 4, 404).await;

    let measurement = downloader().download(&server.uri(), 1, false).await.unwrap();
    assert_eq!(measurement.bytes, 4);
}

#[tokio::test]
async fn test_slow_body_is_timed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dl-8"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(vec![0u8; 8 * 1024])
                .set_delay(Duration::from_millis(50)),
        )
        .mount(&server)
        .await;

    let measurement = downloader().download(&server.uri(), 8, false).await.unwrap();
    assert_eq!(measurement.bytes, 8 * 1024);
}

#[tokio::test]
async fn test_connection_refused_is_a_network_error() {
    // Bind then drop to get a port nobody listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let error = downloader()
        .download(&format!("http://{}", addr), 10240, false)
        .await
        .unwrap_err();

    assert!(matches!(error, AppError::Network(_)));
    assert!(error.to_string().contains("Error downloading data from"));
}

#[tokio::test]
async fn test_malformed_server_is_rejected_before_sending() {
    let error = downloader().download("not a url", 10, true).await.unwrap_err();
    assert!(matches!(error, AppError::Validation(_)));
    assert_eq!(error.exit_code(), 1);
}

#[tokio::test]
async fn test_truncated_body_is_a_read_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 1024];
        let _ = socket.read(&mut request).await;
        let _ = socket
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 1000\r\n\r\nonly a few bytes")
            .await;
        let _ = socket.shutdown().await;
    });

    let error = downloader()
        .download(&format!("http://{}", addr), 1, false)
        .await
        .unwrap_err();

    assert!(matches!(error, AppError::Network(_)));
    assert!(error.to_string().contains("Error reading response body"));
}

#[tokio::test]
async fn test_download_logs_when_verbose() {
    let server = MockServer::start().await;
    mount_payload(&server, 2, 2048, 200).await;

    let (logger, buffer) = Logger::capture("NET", 1);
    let downloader = HttpDownloader::new(logger).unwrap();
    downloader.download(&server.uri(), 2, false).await.unwrap();

    let output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
    assert!(output.contains("Starting download from"));
    assert!(output.contains("/dl-2"));
    assert!(output.contains("2048 bytes downloaded in"));
}

#[tokio::test]
async fn test_client_timeout_is_a_timeout_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dl-1"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let client = Client::builder().timeout(Duration::from_millis(100)).build().unwrap();
    let downloader = HttpDownloader::with_client(client, Logger::new("NET"));

    let error = downloader.download(&server.uri(), 1, false).await.unwrap_err();

    assert!(matches!(error, AppError::Timeout(_)));
    assert_eq!(error.exit_code(), 3);
    assert!(error.to_string().contains("Error downloading data from"));
}

#[tokio::test]
async fn test_redirect_loop_is_an_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dl-1"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/dl-1"))
        .mount(&server)
        .await;

    let error = downloader().download(&server.uri(), 1, false).await.unwrap_err();

    assert!(matches!(error, AppError::HttpRequest(_)));
    assert_eq!(error.category(), "HTTP");
    assert_eq!(error.exit_code(), 3);
}
