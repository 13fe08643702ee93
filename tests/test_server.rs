mod common;

use common::{empty_site, header, site, split_response};
use lantern::http::connection::Connection;
use lantern::server::context::ServerContext;
use lantern::server::listener::serve;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

async fn start(ctx: Arc<ServerContext>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(serve(listener, ctx));
    addr
}

async fn exchange(addr: SocketAddr, raw: &[u8]) -> (String, Vec<u8>) {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(raw).await.unwrap();

    let mut out = Vec::new();
    stream.read_to_end(&mut out).await.unwrap();
    split_response(&out)
}

#[tokio::test]
async fn test_serves_index_for_root() {
    let (_dir, ctx) = site(&[("index.html", b"<h1>hi</h1>")]);
    let addr = start(ctx).await;

    let (head, body) = exchange(addr, b"GET / HTTP/1.1\r\nAccept: text/html\r\n\r\n").await;

    assert!(head.starts_with("HTTP/1.1 200 OK\r\n"));
    assert_eq!(header(&head, "Content-Type"), Some("text/html"));
    assert_eq!(header(&head, "Content-Length"), Some("11"));
    assert_eq!(body, b"<h1>hi</h1>");
}

#[tokio::test]
async fn test_root_matches_index_path() {
    let (_dir, ctx) = site(&[("index.html", b"<p>same</p>")]);
    let addr = start(ctx).await;

    let (_, root) = exchange(addr, b"GET / HTTP/1.1\r\n\r\n").await;
    let (_, index) = exchange(addr, b"GET /index.html HTTP/1.1\r\n\r\n").await;

    assert_eq!(root, index);
}

#[tokio::test]
async fn test_binary_file_is_byte_exact() {
    let data: Vec<u8> = (0..=255u8).cycle().take(10_000).collect();
    let (_dir, ctx) = site(&[("img/blob.bin", &data)]);
    let addr = start(ctx).await;

    let (head, body) = exchange(addr, b"GET /img/blob.bin HTTP/1.1\r\n\r\n").await;

    assert_eq!(header(&head, "Content-Length"), Some("10000"));
    assert_eq!(body, data);
}

#[tokio::test]
async fn test_missing_page() {
    let (_dir, ctx) = site(&[("index.html", b"x")]);
    let addr = start(ctx).await;

    let (head, body) = exchange(addr, b"GET /missing.html HTTP/1.1\r\n\r\n").await;

    assert!(head.starts_with("HTTP/1.1 404 Page Not Found\r\n"));
    assert_eq!(header(&head, "Content-Length"), Some("0"));
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_post_not_allowed() {
    let (_dir, ctx) = site(&[("index.html", b"x")]);
    let addr = start(ctx).await;

    let (head, body) = exchange(addr, b"POST /index.html HTTP/1.1\r\n\r\n").await;

    assert!(head.starts_with("HTTP/1.1 405 Method Not Allowed\r\n"));
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_accept_headers_echoed() {
    let (_dir, ctx) = site(&[("a.txt", b"plain")]);
    let addr = start(ctx).await;

    let (head, _) = exchange(
        addr,
        b"GET /a.txt HTTP/1.1\r\nAccept: text/plain\r\nAccept-Encoding: identity\r\n\r\n",
    )
    .await;

    assert_eq!(header(&head, "Content-Type"), Some("text/plain"));
    assert_eq!(header(&head, "Content-Encoding"), Some("identity"));
}

#[tokio::test]
async fn test_etag_constant_per_server() {
    let (_dir, ctx) = site(&[("index.html", b"x")]);
    let (_other_dir, other_ctx) = site(&[("index.html", b"x")]);
    let addr = start(ctx).await;
    let other_addr = start(other_ctx).await;

    let (first, _) = exchange(addr, b"GET / HTTP/1.1\r\n\r\n").await;
    let (second, _) = exchange(addr, b"GET /missing HTTP/1.1\r\n\r\n").await;
    let (third, _) = exchange(other_addr, b"GET / HTTP/1.1\r\n\r\n").await;

    assert_eq!(header(&first, "Etag"), header(&second, "Etag"));
    assert_ne!(header(&first, "Etag"), header(&third, "Etag"));
}

#[tokio::test]
async fn test_request_split_across_writes() {
    let (_dir, ctx) = site(&[("index.html", b"ok")]);
    let addr = start(ctx).await;

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(b"GET / HTT").await.unwrap();
    stream.flush().await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    stream.write_all(b"P/1.1\r\nAccept: */*\r\n\r\n").await.unwrap();

    let mut out = Vec::new();
    stream.read_to_end(&mut out).await.unwrap();
    let (head, body) = split_response(&out);

    assert!(head.starts_with("HTTP/1.1 200 OK\r\n"));
    assert_eq!(body, b"ok");
}

#[tokio::test]
async fn test_bad_connection_does_not_stop_listener() {
    let (_dir, ctx) = site(&[("index.html", b"alive")]);
    let addr = start(ctx).await;

    // Connect and hang up without sending anything.
    drop(TcpStream::connect(addr).await.unwrap());

    let (head, body) = exchange(addr, b"GET / HTTP/1.1\r\n\r\n").await;
    assert!(head.starts_with("HTTP/1.1 200 OK\r\n"));
    assert_eq!(body, b"alive");
}

#[tokio::test]
async fn test_oversized_head_rejected() {
    let (_dir, ctx) = site(&[("index.html", b"x")]);
    let (client, server) = tokio::io::duplex(64 * 1024);

    let task = tokio::spawn(async move { Connection::new(server, ctx).run().await });

    let (mut read_half, mut write_half) = tokio::io::split(client);
    let mut raw = b"GET / HTTP/1.1\r\nX-Padding: ".to_vec();
    raw.extend(std::iter::repeat_n(b'a', 10_000));
    write_half.write_all(&raw).await.unwrap();

    let mut out = Vec::new();
    read_half.read_to_end(&mut out).await.unwrap();
    let (head, body) = split_response(&out);

    assert!(head.starts_with("HTTP/1.1 431 Request Header Fields Too Large\r\n"));
    assert!(body.is_empty());
    task.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_silent_client_gets_no_response() {
    let (_dir, ctx) = empty_site();
    let (mut client, server) = tokio::io::duplex(1024);

    client.shutdown().await.unwrap();
    Connection::new(server, ctx).run().await.unwrap();

    let mut out = Vec::new();
    client.read_to_end(&mut out).await.unwrap();
    assert!(out.is_empty());
}
