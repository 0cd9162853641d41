#![allow(dead_code)]

use domain_discovery::{Client, ClientParams};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use url::Url;

pub const API_KEY: &str = "at_LoremIpsumDolorSitAmetConsect";

pub const RESPONSE_OK: &str = r#"{"domainsCount":5,"domainsList":["internet-retailers.whoisxmlapi.com",
"threat-intelligence.whoisxmlapi.com","domain-reputation.whoisxmlapi.com","newly-created-websites.whoisxmlapi.com",
"registrant-alert-api.whoisxmlapi.com"]}"#;

pub const RESPONSE_UNPARSABLE: &str = r#"<?xml version="1.0" encoding="utf-8"?><>"#;

pub const RESPONSE_ERROR: &str = r#"{"code":499,"messages":"Test error message."}"#;

pub fn client_for(base: &str, path: &str) -> Client {
    client_with_http(base, path, reqwest::Client::builder().no_proxy().build().unwrap())
}

pub fn client_with_http(base: &str, path: &str, http_client: reqwest::Client) -> Client {
    let url = Url::parse(base).unwrap().join(path).unwrap();

    Client::new(
        API_KEY,
        ClientParams {
            http_client: Some(http_client),
            domain_discovery_base_url: Some(url),
        },
    )
    .unwrap()
}

/// The body cut short by 10 bytes.
pub fn truncated(body: &str) -> &str {
    &body[..body.len() - 10]
}

/// Serves one connection with `response` written verbatim, then closes it.
///
/// mockito always frames bodies correctly, so mismatched Content-Length needs this.
pub async fn raw_server(response: Vec<u8>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        read_request(&mut socket).await;
        socket.write_all(&response).await.unwrap();
        socket.flush().await.unwrap();
        let _ = socket.shutdown().await;
    });

    format!("http://{}", addr)
}

/// Writes `head` and then stalls without closing the connection.
pub async fn stalling_server(head: Vec<u8>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        read_request(&mut socket).await;
        if !head.is_empty() {
            socket.write_all(&head).await.unwrap();
            socket.flush().await.unwrap();
        }
        tokio::time::sleep(Duration::from_secs(30)).await;
    });

    format!("http://{}", addr)
}

/// Declares the full body length but only sends all but the last 10 bytes.
pub fn short_content_length_response(body: &str) -> Vec<u8> {
    let mut response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        body.len()
    )
    .into_bytes();
    response.extend_from_slice(truncated(body).as_bytes());
    response
}

async fn read_request(socket: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
    let content_length = head
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
}
