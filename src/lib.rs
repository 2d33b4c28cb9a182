#![allow(rustdoc::redundant_explicit_links)]
//! Resolve Maven coordinates against an ordered list of repositories and fetch their files into a
//! local cache.
//!
//! A coordinate `group:artifact:version` is resolved by fetching its descriptor (the `.pom` file)
//! from the first repository which has it. The descriptor's packaging decides the extension of the
//! primary file, which is then fetched the same way, together with the `sources` jar if asked for.
//!
//! # Core Features
//!
//! - Repositories are tried in order. A repository reporting a file absent, or failing to serve it,
//!   is skipped in favour of the next one.
//! - A file already in the cache is never fetched again, whichever repository it came from.
//! - Files land in the cache atomically, so a partially written file is never visible.
//! - The network transport honours the `https_proxy` environment variable, including
//!   `user:password@` credentials which are only ever sent to the proxy.
//! - Every fetch ends in exactly one [`FetchStatus`]: successful, not found, or an error naming the
//!   repository that failed.
//!
//! # Optional Features
//!
//! - `rayon` (default): download many coordinates in parallel with
//!   [`helper::parallel::download_all_par`](crate::helper::parallel::download_all_par).
//! - `mock`: the in-memory [`MemoryTransport`](crate::transport::MemoryTransport), for testing code
//!   built on this crate without a network.
//!
//! # Usage
//!
//! Describe the repositories and cache in TOML:
//!
//! ```rust
//! use fetch_artifact::ResolverConfig;
//!
//! let config = ResolverConfig::try_parse_toml(r#"
//! cache-dir = "/tmp/fetch-artifact"
//!
//! [[repository]]
//! id = "central"
//! url = "https://repo1.maven.org/maven2"
//!
//! [[repository]]
//! id = "google"
//! url = "https://maven.google.com"
//! "#)?;
//!
//! for repository in &config.repositories {
//!     println!("{repository}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Then download an artifact and its sources:
//!
//! ```no_run
//! # use fetch_artifact::Error;
//! use fetch_artifact::{ArtifactResolver, ResolverConfig};
//!
//! # fn main() -> Result<(), Error> {
//! let config = ResolverConfig::try_parse_toml(r#"
//! cache-dir = "/tmp/fetch-artifact"
//!
//! [[repository]]
//! id = "central"
//! url = "https://repo1.maven.org/maven2"
//! "#)?;
//!
//! let resolver = ArtifactResolver::from_config(&config)?;
//! let downloaded = resolver.download("com.google.guava:guava:33.4.0-jre", true)?;
//! println!("{}", downloaded.file.display());
//! if let Some(sources) = downloaded.sources {
//!     println!("{}", sources.display());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Snapshot versions are recognised but not resolved. Parent descriptors are not followed unless
//! asked for with [`ArtifactResolver::resolve_parent`].

mod artifact;
mod coordinate;
mod descriptor;
mod error;
pub mod helper;
mod repository;
mod resolver;
mod status;
pub mod transport;
mod version;

#[doc(inline)]
pub use crate::artifact::{
    Artifact, DESCRIPTOR_EXTENSION, ResolvedArtifact, SubArtifact, extension_for_packaging,
};
#[doc(inline)]
pub use crate::coordinate::Coordinate;
#[doc(inline)]
pub use crate::descriptor::{Descriptor, DescriptorParser, PomParser};
#[doc(inline)]
pub use crate::error::Error;
#[doc(inline)]
pub use crate::repository::{ConfigError, Repository, ResolverConfig};
#[doc(inline)]
pub use crate::resolver::{ArtifactResolver, Downloaded};
#[doc(inline)]
pub use crate::status::{FetchError, FetchStatus};
#[doc(inline)]
pub use crate::version::Version;
