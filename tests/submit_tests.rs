
use std::time::{Duration, Instant};

use co_submit::{
    config::ClientConfig,
    error::SubmitError,
    submit::{RawResponse, Submitter},
};
use submit_support::{refused_url, serve_once, silent_server};

fn submitter() -> Submitter {
    let config = ClientConfig::builder()
        .timeout(Duration::from_secs(10))
        .connect_timeout(Duration::from_secs(5))
        .system_proxy(false)
        .build();
    Submitter::new(&config).expect("client")
}

#[test]
fn posts_json_and_captures_created_response() {
    let (url, server) = serve_once(
        201,
        "Created",
        &[("Content-Type", "application/json"), ("Location", "/submissions/9")],
        "[]",
    );

    let payload = br#"{"remote_evaluation":{}}"#.to_vec();
    let response = submitter().post(&url, payload.clone()).expect("response");
    let request = server.join().expect("server thread");

    assert!(request.head.starts_with("POST /evaluate HTTP/1.1"));
    assert_eq!(request.header("content-type").as_deref(), Some("application/json"));
    assert_eq!(request.body, payload);

    assert_eq!(response.status(), 201);
    assert_eq!(response.header("LOCATION"), Some("/submissions/9"));
    assert!(response.is_json());
    assert_eq!(response.content(), b"[]");
}

#[test]
fn error_statuses_are_responses_not_failures() {
    for (status, reason) in [(422, "Unprocessable Entity"), (503, "Service Unavailable")] {
        let (url, server) = serve_once(status, reason, &[("Content-Type", "text/plain")], "nope");
        let response = submitter().post(&url, b"{}".to_vec()).expect("response");
        server.join().expect("server thread");

        assert_eq!(response.status(), status);
        assert_eq!(response.content(), b"nope");
        assert!(!response.is_json());
    }
}

#[test]
fn refused_connection_is_a_network_error() {
    let url = refused_url();
    match submitter().post(&url, b"{}".to_vec()) {
        Err(SubmitError::Network { url: target, cause }) => {
            assert_eq!(target, url);
            assert!(!cause.is_empty());
        }
        other => panic!("expected network error, got {other:?}"),
    }
}

#[test]
fn silent_server_times_out_as_a_network_error() {
    let (_listener, url) = silent_server();
    let config = ClientConfig::builder()
        .timeout(Duration::from_secs(1))
        .connect_timeout(Duration::from_secs(1))
        .system_proxy(false)
        .build();
    let submitter = Submitter::new(&config).expect("client");

    let started = Instant::now();
    match submitter.post(&url, b"{}".to_vec()) {
        Err(SubmitError::Network { url: target, .. }) => assert_eq!(target, url),
        other => panic!("expected network error, got {other:?}"),
    }
    assert!(started.elapsed() < Duration::from_secs(30));
}

#[test]
fn malformed_url_is_a_network_error() {
    assert!(matches!(
        submitter().post("not a url", b"{}".to_vec()),
        Err(SubmitError::Network { .. })
    ));
}

#[test]
fn header_lookup_ignores_case_and_keeps_order() {
    let response = RawResponse::new(
        200,
        vec![
            ("X-First".into(), "1".into()),
            ("content-TYPE".into(), "application/json; charset=utf-8".into()),
            ("x-first".into(), "2".into()),
        ],
        "{}",
    );

    assert_eq!(response.header("x-FIRST"), Some("1"));
    assert!(response.is_json());
    assert_eq!(response.header("location"), None);
    assert_eq!(response.headers().len(), 3);
}

#[test]
fn config_defaults() {
    let config = ClientConfig::default();
    assert_eq!(config.timeout(), co_submit::constants::DEFAULT_TIMEOUT);
    assert_eq!(config.connect_timeout(), co_submit::constants::DEFAULT_CONNECT_TIMEOUT);
    assert!(config.user_agent().starts_with("co-submit/"));
    assert!(config.system_proxy());

    let config = config.with_timeout(Duration::from_secs(3));
    assert_eq!(config.timeout(), Duration::from_secs(3));
}
