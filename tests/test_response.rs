use std::fs;

use statica::http::request::{HeaderMap, Method, Request};
use statica::http::response::{Response, StatusCode};

fn request(close: bool) -> Request {
    Request {
        method: Method::GET,
        path: "/index.html".to_string(),
        version: "HTTP/1.1".to_string(),
        headers: HeaderMap::new(),
        host: "test".to_string(),
        close,
    }
}

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::BadRequest.as_u16(), 400);
    assert_eq!(StatusCode::NotFound.as_u16(), 404);
}

#[test]
fn test_status_code_reason_phrase() {
    assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    assert_eq!(StatusCode::BadRequest.reason_phrase(), "Bad Request");
    assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
}

#[test]
fn test_response_not_found_helper() {
    let response = Response::not_found();

    assert_eq!(response.status, StatusCode::NotFound);
    assert_eq!(response.protocol, "HTTP/1.1");
    assert_eq!(response.headers.get("Connection"), Some("close"));
    assert!(response.headers.contains("Date"));
    assert_eq!(response.headers.len(), 2);
    assert!(response.file.is_none());
    assert!(response.request.is_none());
    assert!(response.closes_connection());
}

#[test]
fn test_response_bad_request_helper() {
    let response = Response::bad_request();

    assert_eq!(response.status, StatusCode::BadRequest);
    assert_eq!(response.protocol, "HTTP/1.1");
    assert_eq!(response.headers.get("Connection"), Some("close"));
    assert!(response.headers.contains("Date"));
    assert_eq!(response.headers.len(), 2);
    assert!(response.file.is_none());
    assert!(response.request.is_none());
    assert!(response.closes_connection());
}

#[test]
fn test_response_ok_headers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("page.html");
    fs::write(&path, "<h1>hi</h1>").unwrap();
    let meta = fs::metadata(&path).unwrap();

    let response = Response::ok(request(false), path.clone(), &meta);

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.protocol, "HTTP/1.1");
    assert_eq!(response.headers.get("Content-Length"), Some("11"));
    assert_eq!(response.headers.get("Content-Type"), Some("text/html; charset=utf-8"));
    assert!(response.headers.contains("Date"));
    assert!(response.headers.contains("Last-Modified"));
    assert!(!response.headers.contains("Connection"));
    assert_eq!(response.file.as_deref(), Some(path.as_path()));
    assert_eq!(response.request, Some(request(false)));
    assert!(!response.closes_connection());
}

#[test]
fn test_response_ok_honors_close_flag() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.bin");
    fs::write(&path, [0u8, 1, 2]).unwrap();
    let meta = fs::metadata(&path).unwrap();

    let response = Response::ok(request(true), path, &meta);

    assert_eq!(response.headers.get("Connection"), Some("close"));
    assert_eq!(response.headers.get("Content-Type"), Some("application/octet-stream"));
    assert!(response.closes_connection());
}
