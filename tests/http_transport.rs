//! The network transport against a local mock server.

use std::path::Path;
use std::time::Duration;

use fetch_artifact::transport::{HttpOptions, HttpTransport, LocalCache, ProxyConfig, Transport};
use fetch_artifact::{ArtifactResolver, FetchStatus, Repository};
use httpmock::prelude::*;

const POM: &str = "foo/bar/bar/1/bar-1.pom";

fn transport(cache: &Path) -> HttpTransport {
    let cache = LocalCache::create(cache).expect("create cache");
    HttpTransport::new(cache, HttpOptions::default()).expect("build transport")
}

#[test]
fn test_ok_response_is_cached_and_not_fetched_again() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/maven2/foo/bar/bar/1/bar-1.pom");
        then.status(200).body("<project/>");
    });
    let temp = tempfile::tempdir().unwrap();
    let transport = transport(temp.path());
    let repository = Repository::new("mock", server.url("/maven2/"));

    let first = transport.fetch(POM, &repository, Path::new(POM));
    let second = transport.fetch(POM, &repository, Path::new(POM));

    assert_eq!(first, FetchStatus::Successful);
    assert_eq!(second, FetchStatus::Successful);
    mock.assert_hits(1);
    assert_eq!(
        std::fs::read_to_string(temp.path().join(POM)).unwrap(),
        "<project/>"
    );
}

#[test]
fn test_not_found_response() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/foo/bar/bar/1/bar-1.pom");
        then.status(404);
    });
    let temp = tempfile::tempdir().unwrap();
    let transport = transport(temp.path());
    let repository = Repository::new("mock", server.base_url());

    assert_eq!(
        transport.fetch(POM, &repository, Path::new(POM)),
        FetchStatus::NotFound
    );
    mock.assert();
    assert!(!temp.path().join(POM).exists());
}

#[test]
fn test_unexpected_status_is_an_error_with_code() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/foo/bar/bar/1/bar-1.pom");
        then.status(500);
    });
    let temp = tempfile::tempdir().unwrap();
    let transport = transport(temp.path());
    let repository = Repository::new("mock", server.base_url());

    let status = transport.fetch(POM, &repository, Path::new(POM));

    let err = status.error().expect("expected a fetch error");
    assert_eq!(err.repository(), "mock");
    assert_eq!(err.code(), Some(500));
    assert!(!temp.path().join(POM).exists());
}

#[test]
fn test_empty_body_is_an_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/foo/bar/bar/1/bar-1.pom");
        then.status(200);
    });
    let temp = tempfile::tempdir().unwrap();
    let transport = transport(temp.path());
    let repository = Repository::new("mock", server.base_url());

    let status = transport.fetch(POM, &repository, Path::new(POM));

    let err = status.error().expect("expected a fetch error");
    assert!(err.message().ends_with("returned no content"), "{err}");
    assert!(!temp.path().join(POM).exists());
}

#[test]
fn test_timeout_applies_to_slow_responses() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/foo/bar/bar/1/bar-1.pom");
        then.status(200).body("<project/>").delay(Duration::from_secs(3));
    });
    let temp = tempfile::tempdir().unwrap();
    let options = HttpOptions {
        timeout: Some(Duration::from_millis(200)),
        ..HttpOptions::default()
    };
    let transport =
        HttpTransport::new(LocalCache::create(temp.path()).unwrap(), options).unwrap();
    let repository = Repository::new("slow", server.base_url());

    let status = transport.fetch(POM, &repository, Path::new(POM));

    let err = status.error().expect("expected a timeout");
    assert!(err.cause().is_some());
    assert!(!temp.path().join(POM).exists());
}

#[test]
fn test_no_timeout_waits_for_slow_responses() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/foo/bar/bar/1/bar-1.pom");
        then.status(200).body("<project/>").delay(Duration::from_secs(1));
    });
    let temp = tempfile::tempdir().unwrap();
    let options = HttpOptions {
        timeout: None,
        ..HttpOptions::default()
    };
    let transport =
        HttpTransport::new(LocalCache::create(temp.path()).unwrap(), options).unwrap();
    let repository = Repository::new("slow", server.base_url());

    assert_eq!(
        transport.fetch(POM, &repository, Path::new(POM)),
        FetchStatus::Successful
    );
}

#[test]
fn test_resolver_falls_back_across_servers() {
    let empty = MockServer::start();
    let missing = empty.mock(|when, then| {
        when.method(GET);
        then.status(404);
    });
    let full = MockServer::start();
    full.mock(|when, then| {
        when.method(GET).path("/foo/bar/bar/1/bar-1.pom");
        then.status(200).body("<project><packaging>jar</packaging></project>");
    });
    full.mock(|when, then| {
        when.method(GET).path("/foo/bar/bar/1/bar-1.jar");
        then.status(200).body("jar");
    });
    let temp = tempfile::tempdir().unwrap();
    let resolver = ArtifactResolver::new(
        vec![
            Repository::new("empty", empty.base_url()),
            Repository::new("full", full.base_url()),
        ],
        transport(temp.path()),
    );

    let (pom, file) = resolver
        .download_pom_and_file("foo.bar:bar:1")
        .expect("download through the second server");

    missing.assert_hits(2);
    assert!(pom.is_file());
    assert_eq!(std::fs::read_to_string(file).unwrap(), "jar");
}

#[test]
fn test_proxy_receives_credentials() {
    let proxy = MockServer::start();
    let mock = proxy.mock(|when, then| {
        when.method(GET)
            .path("/maven2/foo/bar/bar/1/bar-1.pom")
            .header("Proxy-Authorization", "Basic dXNlcjpwYXNz");
        then.status(200).body("<project/>");
    });
    let address = proxy.address();
    let options = HttpOptions {
        proxy: Some(ProxyConfig::parse(format!("http://user:pass@{address}")).unwrap()),
        ..HttpOptions::default()
    };
    let temp = tempfile::tempdir().unwrap();
    let transport =
        HttpTransport::new(LocalCache::create(temp.path()).unwrap(), options).unwrap();
    let repository = Repository::new("behind-proxy", "http://repo.invalid/maven2");

    let status = transport.fetch(POM, &repository, Path::new(POM));

    assert_eq!(status, FetchStatus::Successful);
    mock.assert();
}
