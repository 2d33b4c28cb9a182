//! Fetching from remote repositories over HTTP(S).

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;

use super::{LocalCache, ProxyConfig, Retrieval, Transport};
use crate::repository::Repository;
use crate::status::FetchError;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Client settings for [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct HttpOptions {
    /// Route every request through this proxy. `None` connects directly.
    pub proxy: Option<ProxyConfig>,
    /// Limit on each whole request, body included. `None` means no limit.
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            proxy: None,
            timeout: None,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

/// A transport which issues a blocking `GET {repository}/{target}` per fetch.
#[derive(Debug)]
pub struct HttpTransport {
    cache: LocalCache,
    client: Client,
    proxy: Option<ProxyConfig>,
}

impl HttpTransport {
    /// Build the client once. The proxy is fixed for the lifetime of the transport.
    pub fn new(cache: LocalCache, options: HttpOptions) -> Result<Self, crate::Error> {
        let mut builder = Client::builder()
            .user_agent(options.user_agent)
            .timeout(options.timeout);
        builder = match &options.proxy {
            Some(proxy) => {
                tracing::info!(%proxy, authenticated = proxy.has_credentials(), "using proxy");
                builder.proxy(proxy.to_reqwest()?)
            }
            // Ignore any system proxy settings as well.
            None => builder.no_proxy(),
        };
        Ok(Self {
            cache,
            client: builder.build()?,
            proxy: options.proxy,
        })
    }

    /// A transport using the proxy from `https_proxy`, if set.
    pub fn from_env(cache: LocalCache) -> Result<Self, crate::Error> {
        let options = HttpOptions {
            proxy: ProxyConfig::from_env()?,
            ..HttpOptions::default()
        };
        Self::new(cache, options)
    }

    pub fn proxy(&self) -> Option<&ProxyConfig> {
        self.proxy.as_ref()
    }
}

impl Transport for HttpTransport {
    fn cache(&self) -> &LocalCache {
        &self.cache
    }

    fn retrieve(&self, target: &str, repository: &Repository) -> Retrieval {
        let url = repository.url_for(target);
        let failed = |message: String| FetchError::new(repository.id(), message);
        let response = match self.client.get(&url).send() {
            Ok(response) => response,
            Err(err) => {
                let message = format!("GET {url} failed: {err}");
                return Retrieval::Failed(failed(message).with_cause(std::io::Error::other(err)));
            }
        };
        match response.status() {
            StatusCode::OK => match response.bytes() {
                Ok(body) if body.is_empty() => Retrieval::Failed(
                    failed(format!("{url} returned no content")).with_code(StatusCode::OK.as_u16()),
                ),
                Ok(body) => Retrieval::Content(body.to_vec()),
                Err(err) => {
                    let message = format!("failed to read response from {url}: {err}");
                    Retrieval::Failed(failed(message).with_cause(std::io::Error::other(err)))
                }
            },
            StatusCode::NOT_FOUND => Retrieval::NotFound,
            status => Retrieval::Failed(
                failed(format!("GET {url} returned {status}")).with_code(status.as_u16()),
            ),
        }
    }
}

#[cfg(test)]
mod test_http_transport {
    use super::*;

    #[test]
    fn default_options_connect_directly() {
        let temp = tempfile::tempdir().unwrap();
        let cache = LocalCache::create(temp.path()).unwrap();
        let transport = HttpTransport::new(cache, HttpOptions::default()).unwrap();
        assert!(transport.proxy().is_none());
        assert_eq!(transport.cache().root(), temp.path());
    }

    #[test]
    fn proxy_is_kept_for_the_lifetime_of_the_transport() {
        let temp = tempfile::tempdir().unwrap();
        let cache = LocalCache::create(temp.path()).unwrap();
        let options = HttpOptions {
            proxy: Some(ProxyConfig::parse("http://u:p@proxy.example.com:3128").unwrap()),
            timeout: Some(Duration::from_secs(5)),
            ..HttpOptions::default()
        };
        let transport = HttpTransport::new(cache, options).unwrap();
        assert_eq!(
            transport.proxy().map(ProxyConfig::endpoint).as_deref(),
            Some("http://proxy.example.com:3128")
        );
    }

    #[test]
    fn unreachable_repository_is_a_fetch_error() {
        let temp = tempfile::tempdir().unwrap();
        let cache = LocalCache::create(temp.path()).unwrap();
        let transport = HttpTransport::new(cache, HttpOptions::default()).unwrap();
        // Port 9 on localhost is the discard service and is essentially never listening.
        let repository = Repository::new("nowhere", "http://127.0.0.1:9");
        match transport.retrieve("a/b/1/b-1.pom", &repository) {
            Retrieval::Failed(err) => {
                assert_eq!(err.repository(), "nowhere");
                assert!(err.cause().is_some());
                assert!(err.code().is_none());
            }
            other => panic!("expected a failure, got {other:?}"),
        }
    }
}
