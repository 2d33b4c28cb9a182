//! In-memory transport for testing.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use super::{LocalCache, Retrieval, Transport};
use crate::repository::Repository;
use crate::status::FetchError;

type Key = (String, String);

/// A transport serving files from a map keyed by repository id and repository-relative path.
///
/// Every call to [`Transport::retrieve`] is recorded, so tests can check exactly which
/// repositories were contacted and how often. Fetched files are still written to the real
/// [`LocalCache`].
///
/// ```
/// use fetch_artifact::transport::{LocalCache, MemoryTransport, Transport};
/// use fetch_artifact::{FetchStatus, Repository};
/// use std::path::Path;
///
/// let dir = tempfile::tempdir()?;
/// let transport = MemoryTransport::new(LocalCache::create(dir.path())?)
///     .with_file("central", "a/b/1/b-1.pom", "<project/>");
/// let central = Repository::new("central", "https://repo.example.com");
/// let status = transport.fetch("a/b/1/b-1.pom", &central, Path::new("a/b/1/b-1.pom"));
/// assert_eq!(status, FetchStatus::Successful);
/// assert_eq!(transport.calls(), 1);
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct MemoryTransport {
    cache: LocalCache,
    files: HashMap<Key, Vec<u8>>,
    failures: HashMap<Key, u16>,
    requests: Mutex<Vec<Key>>,
}

impl MemoryTransport {
    pub fn new(cache: LocalCache) -> Self {
        Self {
            cache,
            files: HashMap::new(),
            failures: HashMap::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Serve `content` for `target` from the repository with id `repository`.
    pub fn with_file<R, T, C>(mut self, repository: R, target: T, content: C) -> Self
    where
        R: Into<String>,
        T: Into<String>,
        C: Into<Vec<u8>>,
    {
        self.files
            .insert((repository.into(), target.into()), content.into());
        self
    }

    /// Fail requests for `target` from `repository` as if the server answered with `code`.
    pub fn with_failure<R, T>(mut self, repository: R, target: T, code: u16) -> Self
    where
        R: Into<String>,
        T: Into<String>,
    {
        self.failures
            .insert((repository.into(), target.into()), code);
        self
    }

    /// Every `(repository id, target)` retrieved so far, in order.
    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// How many times `retrieve` was called.
    pub fn calls(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Transport for MemoryTransport {
    fn cache(&self) -> &LocalCache {
        &self.cache
    }

    fn retrieve(&self, target: &str, repository: &Repository) -> Retrieval {
        let key = (repository.id().to_string(), target.to_string());
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(key.clone());
        if let Some(code) = self.failures.get(&key) {
            let message = format!("{} returned status {code}", repository.url_for(target));
            return Retrieval::Failed(FetchError::new(repository.id(), message).with_code(*code));
        }
        match self.files.get(&key) {
            Some(content) => Retrieval::Content(content.clone()),
            None => Retrieval::NotFound,
        }
    }
}
