//! Local HTTP endpoint for the JSON tool interface
//!
//! Minimal HTTP/1.1: read the request line and headers, read a
//! Content-Length body, answer with a single JSON-RPC envelope, close.

use crate::mcp;
use crate::quiz::QuestionBank;
use anyhow::{Context, Result};
use serde_json::json;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tracing::Instrument;
use uuid::Uuid;

/// Upper bound on accepted request bodies
pub const MAX_BODY_BYTES: usize = 1 << 20;

/// Accept connections forever, one task per connection
pub async fn run_http_server(addr: &str, bank: Arc<QuestionBank>) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on http://{}/mcp", listener.local_addr()?);

    serve(listener, bank).await
}

/// Serve on an already-bound listener
pub async fn serve(listener: TcpListener, bank: Arc<QuestionBank>) -> Result<()> {
    loop {
        let (stream, peer) = listener.accept().await?;
        let bank = Arc::clone(&bank);

        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("request", %request_id, %peer);

        tokio::spawn(
            async move {
                if let Err(e) = handle_connection(stream, &bank).await {
                    tracing::warn!("Request error: {:#}", e);
                }
            }
            .instrument(span),
        );
    }
}

/// Handle one HTTP request on any byte stream
pub async fn handle_connection<S>(stream: S, bank: &QuestionBank) -> Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    reader.read_line(&mut request_line).await?;
    tracing::debug!(request_line = request_line.trim(), "http request");

    let mut content_length: usize = 0;
    loop {
        let mut header = String::new();
        let n = reader.read_line(&mut header).await?;
        if n == 0 || header.trim().is_empty() {
            break;
        }
        if header.to_lowercase().starts_with("content-length:") {
            content_length = header
                .split(':')
                .nth(1)
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(0);
        }
    }

    let response_body = if content_length > MAX_BODY_BYTES {
        json!({
            "jsonrpc": "2.0",
            "id": null,
            "error": {"code": -32600, "message": "Request body too large"}
        })
    } else {
        let mut body = vec![0u8; content_length];
        if content_length > 0 {
            reader.read_exact(&mut body).await?;
        }

        match serde_json::from_slice::<serde_json::Value>(&body) {
            Ok(request) => mcp::handle_rpc(&request, bank),
            Err(e) => json!({
                "jsonrpc": "2.0",
                "id": null,
                "error": {"code": -32700, "message": format!("Parse error: {}", e)}
            }),
        }
    };

    let response_str = serde_json::to_string(&response_body)?;
    let response = format!(
        "HTTP/1.1 200 OK\r\nDate: {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nAccess-Control-Allow-Origin: *\r\n\r\n{}",
        http_date(chrono::Utc::now()),
        response_str.len(),
        response_str
    );

    let stream = reader.get_mut();
    stream.write_all(response.as_bytes()).await?;
    stream.flush().await?;

    Ok(())
}

/// IMF-fixdate, as HTTP `Date` headers expect
fn http_date(at: chrono::DateTime<chrono::Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tokio::io::duplex;

    fn http_post(body: &str) -> String {
        format!(
            "POST /mcp HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
            body.len(),
            body
        )
    }

    async fn roundtrip(request: String) -> Value {
        roundtrip_with_headers(request).await.1
    }

    async fn roundtrip_with_headers(request: String) -> (String, Value) {
        let bank = QuestionBank::standard();
        let (mut client, server) = duplex(64 * 1024);

        client.write_all(request.as_bytes()).await.unwrap();
        handle_connection(server, &bank).await.unwrap();

        let mut raw = String::new();
        client.read_to_string(&mut raw).await.unwrap();
        assert!(raw.starts_with("HTTP/1.1 200 OK"));
        let (head, body) = raw.split_once("\r\n\r\n").unwrap();
        (head.to_string(), serde_json::from_str(body).unwrap())
    }

    #[tokio::test]
    async fn test_tools_call_over_http() {
        let body = r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"calculate_kpis","arguments":{}}}"#;
        let (head, response) = roundtrip_with_headers(http_post(body)).await;

        assert_eq!(response["id"], 3);
        assert_eq!(response["result"]["lines"][0], "MTBF = 200.00 hours");
        // JSON-RPC envelope carries only jsonrpc, id and result
        assert!(response.get("served_at").is_none());
        assert_eq!(response.as_object().unwrap().len(), 3);
        assert!(head.lines().any(|l| l.starts_with("Date: ") && l.ends_with(" GMT")));
    }

    #[test]
    fn test_http_date_format() {
        let at = chrono::DateTime::parse_from_rfc3339("2026-03-01T07:05:09Z")
            .unwrap()
            .with_timezone(&chrono::Utc);
        assert_eq!(http_date(at), "Sun, 01 Mar 2026 07:05:09 GMT");
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let response = roundtrip(http_post("{oops")).await;
        assert_eq!(response["error"]["code"], -32700);
    }

    #[test]
    fn test_oversized_body_rejected() {
        let request = format!(
            "POST /mcp HTTP/1.1\r\nContent-Length: {}\r\n\r\n",
            MAX_BODY_BYTES + 1
        );
        let response = tokio_test::block_on(roundtrip(request));
        assert_eq!(response["error"]["code"], -32600);
    }

    #[tokio::test]
    async fn test_serve_over_tcp() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let bank = Arc::new(QuestionBank::standard());
        let server = tokio::spawn(serve(listener, bank));

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        let body = r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#;
        stream.write_all(http_post(body).as_bytes()).await.unwrap();

        let mut raw = String::new();
        stream.read_to_string(&mut raw).await.unwrap();
        let json: Value = serde_json::from_str(raw.split("\r\n\r\n").nth(1).unwrap()).unwrap();
        assert_eq!(json["result"]["tools"].as_array().unwrap().len(), 6);

        server.abort();
    }
}
