//! Fetching repository files into the local cache.
//!
//! A [`Transport`] only has to say how to get the bytes of a file from a repository
//! ([`Transport::retrieve`]). The policy around it lives in [`Transport::fetch`] and is the same for
//! every transport:
//!
//! 1. if the destination is already cached, succeed without calling `retrieve`;
//! 2. otherwise retrieve the file, write it atomically into the cache and check it landed.

use std::path::Path;

use crate::repository::Repository;
use crate::status::{FetchError, FetchStatus};

mod cache;
mod http;
#[cfg(any(test, feature = "mock"))]
mod memory;
mod proxy;

#[doc(inline)]
pub use cache::LocalCache;
#[doc(inline)]
pub use http::{HttpOptions, HttpTransport};
#[cfg(any(test, feature = "mock"))]
#[doc(inline)]
pub use memory::MemoryTransport;
#[doc(inline)]
pub use proxy::{PROXY_ENV_VAR, ProxyConfig, ProxyError};

/// The raw outcome of asking a repository for a file.
#[derive(Debug)]
pub enum Retrieval {
    Content(Vec<u8>),
    NotFound,
    Failed(FetchError),
}

/// A way of fetching repository files into a [`LocalCache`].
pub trait Transport {
    /// The cache fetched files are written to.
    fn cache(&self) -> &LocalCache;

    /// Get the bytes of `target` (a repository-relative path) from `repository`.
    fn retrieve(&self, target: &str, repository: &Repository) -> Retrieval;

    /// Fetch `target` from `repository` into the cache-relative path `destination`.
    fn fetch(&self, target: &str, repository: &Repository, destination: &Path) -> FetchStatus {
        fetch_into_cache(self, target, repository, destination)
    }
}

/// The fetch policy shared by every [`Transport`].
pub fn fetch_into_cache<T>(
    transport: &T,
    target: &str,
    repository: &Repository,
    destination: &Path,
) -> FetchStatus
where
    T: Transport + ?Sized,
{
    let cache = transport.cache();
    if cache.is_cached(destination) {
        tracing::debug!(path = %destination.display(), "already cached");
        return FetchStatus::Successful;
    }
    tracing::debug!(repository = repository.id(), path = target, "fetching");
    let content = match transport.retrieve(target, repository) {
        Retrieval::Content(content) => content,
        Retrieval::NotFound => return FetchStatus::NotFound,
        Retrieval::Failed(err) => {
            tracing::warn!(%err, "fetch failed");
            return FetchStatus::Error(err);
        }
    };
    let err = match cache.store(destination, &content) {
        Ok(path) if path.is_file() => {
            tracing::info!(repository = repository.id(), path = %path.display(), "fetched");
            return FetchStatus::Successful;
        }
        Ok(path) => FetchError::new(
            repository.id(),
            format!("fetched {target} but {} does not exist", path.display()),
        ),
        Err(cause) => FetchError::new(
            repository.id(),
            format!("fetched {target} but could not write it to the cache: {cause}"),
        )
        .with_cause(cause),
    };
    tracing::warn!(%err, "fetch failed");
    FetchStatus::Error(err)
}
