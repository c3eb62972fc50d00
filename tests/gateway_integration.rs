use tester_talk::client::error_detail;
use tester_talk::filtering::ActiveFilters;
use tester_talk::{TalkClient, TalkError};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serves one canned response per connection, in order, and returns the
/// request heads it saw.
async fn serve(responses: Vec<String>) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let mut seen = Vec::new();
        for response in responses {
            let (mut socket, _) = listener.accept().await.unwrap();
            seen.push(read_request(&mut socket).await);
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        }
        seen
    });

    (format!("http://{}", addr), handle)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(end) = find_head_end(&buf) {
            let head = String::from_utf8_lossy(&buf[..end]).to_string();
            let length = content_length(&head);
            while buf.len() < end + 4 + length {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            break;
        }
    }
    String::from_utf8_lossy(&buf).to_string()
}

fn find_head_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

fn content_length(head: &str) -> usize {
    head.lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.eq_ignore_ascii_case("content-length") {
                value.trim().parse().ok()
            } else {
                None
            }
        })
        .unwrap_or(0)
}

fn json_response(status: &str, body: &str, extra_headers: &str) -> String {
    format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n{}\r\n{}",
        status,
        body.len(),
        extra_headers,
        body
    )
}

#[tokio::test]
async fn test_not_found_uses_error_field() {
    let (url, server) = serve(vec![json_response(
        "404 NOT FOUND",
        r#"{"error": "Issue not found"}"#,
        "",
    )])
    .await;

    let client = TalkClient::new(&url, None).unwrap();
    let err = client.get_issue(999).await.unwrap_err();

    match &err {
        TalkError::RequestFailed { status, message } => {
            assert_eq!(*status, Some(404));
            assert_eq!(message, "Issue not found");
        }
        other => panic!("Expected RequestFailed, got {:?}", other),
    }
    assert!(err.is_not_found());

    let requests = server.await.unwrap();
    assert!(requests[0].starts_with("GET /api/issues/999 "));
}

#[tokio::test]
async fn test_rejected_login_is_unauthorized() {
    let (url, server) = serve(vec![json_response(
        "401 UNAUTHORIZED",
        r#"{"error": "Invalid credentials"}"#,
        "",
    )])
    .await;

    let client = TalkClient::new(&url, None).unwrap();
    let err = client.login("alice", "wrong").await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "Request failed: Invalid credentials");

    let requests = server.await.unwrap();
    assert!(requests[0].starts_with("POST /api/auth/login "));
    assert!(requests[0].contains(r#""username":"alice""#));
}

#[tokio::test]
async fn test_login_captures_session_cookie() {
    let user = r#"{"id": 1, "username": "alice", "email": "alice@example.com", "role": "admin"}"#;
    let (url, server) = serve(vec![
        json_response("200 OK", user, "Set-Cookie: session=abc123; Path=/; HttpOnly\r\n"),
        json_response("200 OK", user, ""),
    ])
    .await;

    let client = TalkClient::new(&url, None).unwrap();
    assert_eq!(client.session_cookie(), None);

    let logged_in = client.login("alice", "secret").await.unwrap();
    assert!(logged_in.is_admin());
    assert_eq!(client.session_cookie().as_deref(), Some("session=abc123"));

    // The jar replays the cookie on the next request
    client.current_user().await.unwrap();
    let requests = server.await.unwrap();
    assert!(requests[1].to_lowercase().contains("cookie: session=abc123"));
}

#[tokio::test]
async fn test_stored_cookie_is_sent() {
    let (url, server) = serve(vec![json_response("200 OK", r#"["Weekly", "Daily"]"#, "")]).await;

    let client = TalkClient::new(&url, Some("session=stored")).unwrap();
    let builds = client.get_builds().await.unwrap();
    assert_eq!(builds, vec!["Weekly".to_string(), "Daily".to_string()]);

    let requests = server.await.unwrap();
    assert!(requests[0].starts_with("GET /api/builds "));
    assert!(requests[0].to_lowercase().contains("cookie: session=stored"));
}

#[tokio::test]
async fn test_search_posts_active_filters() {
    let (url, server) = serve(vec![json_response(
        "200 OK",
        r#"{"issues": [], "total": 0}"#,
        "",
    )])
    .await;

    let client = TalkClient::new(&url, None).unwrap();
    let filters = ActiveFilters {
        search: Some("crash".to_string()),
        ..Default::default()
    };
    let list = client.search_issues(&filters).await.unwrap();
    assert!(list.issues.is_empty());

    let requests = server.await.unwrap();
    assert!(requests[0].starts_with("POST /api/search "));
    assert!(requests[0].contains(r#""search":"crash""#));
}

#[tokio::test]
async fn test_server_error_without_json() {
    let (url, _server) = serve(vec![
        "HTTP/1.1 502 BAD GATEWAY\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_string(),
    ])
    .await;

    let client = TalkClient::new(&url, None).unwrap();
    let err = client.get_targets("251").await.unwrap_err();
    assert_eq!(err.status(), Some(502));
    assert_eq!(err.to_string(), "Request failed: Request failed with status 502");
}

#[tokio::test]
async fn test_connection_refused_has_no_status() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = TalkClient::new(&format!("http://{}", addr), None).unwrap();
    let err = client.get_issue(1).await.unwrap_err();

    match &err {
        TalkError::RequestFailed { status, message } => {
            assert_eq!(*status, None);
            assert!(!message.is_empty());
        }
        other => panic!("Expected RequestFailed, got {:?}", other),
    }
    assert!(!err.is_unauthorized());
    assert!(!err.is_not_found());
}

#[test]
fn test_error_detail_fallbacks() {
    assert_eq!(error_detail(400, r#"{"error": "Bad status"}"#), "Bad status");
    assert_eq!(error_detail(400, r#"{"message": "Nope"}"#), "Nope");
    assert_eq!(error_detail(400, r#"{"error": "", "message": "Nope"}"#), "Nope");
    assert_eq!(error_detail(500, "Internal Server Error"), "Internal Server Error");
    assert_eq!(error_detail(500, "   "), "Request failed with status 500");
}

#[test]
fn test_invalid_server_url() {
    let result = TalkClient::new("not a url", None);
    assert!(matches!(result, Err(TalkError::ConfigError(_))));
}
