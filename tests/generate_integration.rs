//! Output file integration tests

use h2gen::generate::{GenerateOptions, AFTER_EARLY_DATA_SUFFIX, EARLY_DATA_SUFFIX};
use h2gen::h2::{generate_session, H2Request, CONNECTION_PREFACE};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_write_normal_output() {
    let dir = TempDir::new().unwrap();
    let mut options = GenerateOptions::new("198.51.100.7");
    options.host = "example.com".to_string();
    options.url = "/x".to_string();
    options.repeat = 2;

    let generation = options.plan().unwrap();
    let paths = generation.write_to(dir.path()).unwrap();

    assert_eq!(paths, vec![dir.path().join("h2_request")]);
    let written = fs::read(&paths[0]).unwrap();

    let requests = vec![H2Request::new("example.com", "/x", "GET"); 2];
    assert_eq!(written, generate_session(&requests, true).unwrap().to_vec());
}

#[test]
fn test_write_early_data_outputs() {
    let dir = TempDir::new().unwrap();
    let mut options = GenerateOptions::new("198.51.100.7");
    options.early_data = true;
    options.early_data_url = Some("/early".to_string());
    options.output = "replay".to_string();

    let generation = options.plan().unwrap();
    let paths = generation.write_to(dir.path()).unwrap();

    assert_eq!(
        paths,
        vec![
            dir.path().join(format!("replay{}", EARLY_DATA_SUFFIX)),
            dir.path().join(format!("replay{}", AFTER_EARLY_DATA_SUFFIX)),
        ]
    );

    let early = fs::read(&paths[0]).unwrap();
    let after = fs::read(&paths[1]).unwrap();
    assert!(early.starts_with(CONNECTION_PREFACE));
    assert!(!after.starts_with(CONNECTION_PREFACE));

    let early_requests = vec![H2Request::new("www.google.com", "/early", "GET")];
    let after_requests = vec![H2Request::new("www.google.com", "/teapot", "GET")];
    assert_eq!(early, generate_session(&early_requests, true).unwrap().to_vec());
    assert_eq!(after, generate_session(&after_requests, false).unwrap().to_vec());

    assert!(generation.command.contains("-early_data replay_early_data"));
    assert!(generation.command.ends_with("< replay_more_after_early_data"));
}

#[test]
fn test_write_into_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("does-not-exist");

    let generation = GenerateOptions::new("198.51.100.7").plan().unwrap();
    let err = generation.write_to(&missing).unwrap_err();
    assert!(matches!(err, h2gen::h2::Error::Io(_)));
}
