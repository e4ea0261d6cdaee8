
use std::{fs, net::TcpListener, time::Duration};

use co_submit::{
    Outcome,
    config::{ClientConfig, ReportOptions},
    error::SubmitError,
    evaluate,
    response::ResponseDefect,
};
use submit_support::{cleanup, exercise, manifest, serve_once, temp_dir};

fn config() -> ClientConfig {
    ClientConfig::builder()
        .timeout(Duration::from_secs(10))
        .system_proxy(false)
        .build()
}

const ONE_RESULT: &str = r#"[{"filename":"a.py","passed":2,"count":2,"weight":1,"score":1.0,"status":"ok","message":""}]"#;

#[test]
fn graded_submission_end_to_end() {
    let (url, server) = serve_once(
        201,
        "Created",
        &[("Content-Type", "application/json"), ("Location", "http://x/submissions/1")],
        ONE_RESULT,
    );
    let root = exercise(
        &manifest(&url, &[("a.py", 1), ("b.py", 2)]),
        &[("a.py", "print(1)"), ("b.py", "print(2)")],
    );

    let mut text = String::new();
    let outcome = evaluate(&root, &ReportOptions::default(), &config(), |s| {
        text.push_str(s);
        text.push('\n');
    })
    .expect("evaluate");
    let request = server.join().expect("server thread");

    let sent: serde_json::Value = serde_json::from_slice(&request.body).expect("json body");
    let attrs = sent["remote_evaluation"]["files_attributes"]
        .as_object()
        .expect("files_attributes");
    assert_eq!(attrs.len(), 2);
    assert_eq!(sent["remote_evaluation"]["validation_token"], "secret-token");

    match outcome {
        Outcome::Graded { entries, aggregate } => {
            assert_eq!(entries.len(), 1);
            assert_eq!(aggregate.total_passed, 2);
            assert_eq!(aggregate.total_count, 2);
            assert_eq!(aggregate.total_weighted_score, 1.0);
            assert_eq!(aggregate.total_weight, 1.0);
            assert_eq!(aggregate.percent(), 100.0);
        }
        other => panic!("expected graded outcome, got {other:?}"),
    }

    assert!(text.contains(" a.py\n"));
    assert!(text.contains(" b.py\n"));
    assert!(text.contains("Submission created: http://x/submissions/1"));
    assert!(text.contains("100%"));

    cleanup(&root);
}

#[test]
fn empty_result_is_a_zero_file_report() {
    let (url, server) = serve_once(201, "Created", &[("Content-Type", "application/json")], "[]");
    let root = exercise(&manifest(&url, &[("a.py", 1)]), &[("a.py", "")]);

    let outcome = evaluate(&root, &ReportOptions::default(), &config(), |_| {}).expect("evaluate");
    server.join().expect("server thread");

    match outcome {
        Outcome::Graded { entries, aggregate } => {
            assert!(entries.is_empty());
            assert_eq!(aggregate.total_passed, 0);
            assert_eq!(aggregate.total_count, 0);
            assert_eq!(aggregate.percent(), 100.0);
        }
        other => panic!("expected graded outcome, got {other:?}"),
    }

    cleanup(&root);
}

#[test]
fn unavailable_server_is_reported_not_raised() {
    let (url, server) = serve_once(
        503,
        "Service Unavailable",
        &[("Content-Type", "text/html"), ("Retry-After", "30")],
        "<html>down</html>",
    );
    let root = exercise(&manifest(&url, &[("a.py", 1)]), &[("a.py", "")]);

    let mut text = String::new();
    let outcome = evaluate(&root, &ReportOptions::default(), &config(), |s| text.push_str(s))
        .expect("evaluate");
    server.join().expect("server thread");

    assert!(matches!(
        outcome,
        Outcome::Rejected {
            defect: ResponseDefect::Status(503),
            ..
        }
    ));
    assert!(text.contains("Try again later."));
    assert!(!text.contains("Retry-After"));

    cleanup(&root);
}

#[test]
fn wrong_content_type_is_dumped() {
    let (url, server) = serve_once(201, "Created", &[("Content-Type", "text/plain")], "hello");
    let root = exercise(&manifest(&url, &[("a.py", 1)]), &[("a.py", "")]);

    let mut text = String::new();
    let outcome = evaluate(&root, &ReportOptions::default(), &config(), |s| text.push_str(s))
        .expect("evaluate");
    server.join().expect("server thread");

    assert!(matches!(
        outcome,
        Outcome::Rejected {
            defect: ResponseDefect::ContentType(_),
            ..
        }
    ));
    // header names arrive lowercased from the HTTP stack
    assert!(text.contains("content-type : text/plain"));
    assert!(text.contains("hello"));

    cleanup(&root);
}

#[test]
fn missing_source_stops_before_any_request() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    listener.set_nonblocking(true).expect("nonblocking");
    let url = format!("http://{}/evaluate", listener.local_addr().expect("addr"));
    let root = exercise(&manifest(&url, &[("a.py", 1), ("missing.py", 2)]), &[("a.py", "")]);

    let result = evaluate(&root, &ReportOptions::default(), &config(), |_| {});
    match result {
        Err(SubmitError::NotFound { file }) => assert_eq!(file, "missing.py"),
        other => panic!("expected NotFound, got {other:?}"),
    }
    assert!(listener.accept().is_err(), "no connection should have been made");

    cleanup(&root);
}

#[test]
fn saves_raw_result_when_log_dir_exists() {
    let (url, server) = serve_once(201, "Created", &[("Content-Type", "application/json")], ONE_RESULT);
    let root = exercise(&manifest(&url, &[("a.py", 1)]), &[("a.py", "")]);
    fs::create_dir(root.join("log")).expect("log dir");

    evaluate(&root, &ReportOptions::default(), &config(), |_| {}).expect("evaluate");
    server.join().expect("server thread");

    let logs: Vec<_> = fs::read_dir(root.join("log"))
        .expect("read log dir")
        .flatten()
        .map(|e| e.path())
        .collect();
    assert_eq!(logs.len(), 1);
    let name = logs[0].file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("result_") && name.ends_with(".json"));
    assert_eq!(fs::read_to_string(&logs[0]).expect("read log"), ONE_RESULT);

    cleanup(&root);
}

#[test]
fn not_a_directory_is_reported() {
    let root = temp_dir();
    let file = root.join("plain.txt");
    fs::write(&file, "x").expect("write");

    assert!(matches!(
        evaluate(&file, &ReportOptions::default(), &config(), |_| {}),
        Err(SubmitError::NotADirectory { .. })
    ));

    cleanup(&root);
}
