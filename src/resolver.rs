//! Resolving coordinates against an ordered list of repositories.

use std::path::{Path, PathBuf};

use crate::artifact::{Artifact, ResolvedArtifact, SubArtifact};
use crate::coordinate::Coordinate;
use crate::descriptor::{DescriptorParser, PomParser};
use crate::error::Error;
use crate::repository::{Repository, ResolverConfig};
use crate::status::FetchStatus;
use crate::transport::{HttpTransport, Transport};

/// The files fetched by [`ArtifactResolver::download`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Downloaded {
    pub pom: PathBuf,
    pub file: PathBuf,
    /// `None` if no repository has the sources jar, or fetching it failed.
    pub sources: Option<PathBuf>,
}

/// Resolves and downloads artifacts, trying each enabled repository in order.
///
/// Every file is fetched with the same walk over the repositories: the first repository to
/// succeed wins, a repository reporting the file absent is skipped, and a repository which fails
/// is skipped while its error is remembered. A file already in the cache is never fetched again.
#[derive(Debug)]
pub struct ArtifactResolver<T, P = PomParser> {
    repositories: Vec<Repository>,
    transport: T,
    parser: P,
}

impl<T: Transport> ArtifactResolver<T> {
    pub fn new(repositories: Vec<Repository>, transport: T) -> Self {
        Self {
            repositories,
            transport,
            parser: PomParser,
        }
    }
}

impl ArtifactResolver<HttpTransport> {
    /// A resolver over the network, set up from a parsed configuration.
    pub fn from_config(config: &ResolverConfig) -> Result<Self, Error> {
        Ok(Self::new(
            config.repositories.clone(),
            config.http_transport()?,
        ))
    }
}

impl<T: Transport, P: DescriptorParser> ArtifactResolver<T, P> {
    /// Replace the descriptor parser.
    pub fn with_parser<Q: DescriptorParser>(self, parser: Q) -> ArtifactResolver<T, Q> {
        ArtifactResolver {
            repositories: self.repositories,
            transport: self.transport,
            parser,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn repositories(&self) -> &[Repository] {
        &self.repositories
    }

    /// Map a coordinate string onto the repository layout. No I/O is performed.
    pub fn artifact_for<S: AsRef<str>>(&self, coordinate: S) -> Result<Artifact, Error> {
        Coordinate::parse(coordinate).map(Artifact::new)
    }

    /// Fetch and parse the descriptor of `artifact`.
    ///
    /// Returns `Ok(None)` if no repository supplies the descriptor. Fails for snapshot versions,
    /// and when a descriptor was fetched but could not be read or parsed.
    pub fn resolve_artifact(&self, artifact: &Artifact) -> Result<Option<ResolvedArtifact>, Error> {
        match self.fetch_descriptor(artifact)? {
            FetchStatus::Successful => self.parse_descriptor(artifact).map(Some),
            _ => Ok(None),
        }
    }

    /// Resolve the parent declared by `resolved`, if any. Only one level is followed.
    pub fn resolve_parent(
        &self,
        resolved: &ResolvedArtifact,
    ) -> Result<Option<ResolvedArtifact>, Error> {
        match resolved.parent() {
            Some(parent) => self.resolve_artifact(&Artifact::new(parent.clone())),
            None => Ok(None),
        }
    }

    /// Fetch the primary file of a resolved artifact.
    pub fn download_artifact(&self, resolved: &ResolvedArtifact) -> FetchStatus {
        self.download_sub_artifact(&resolved.main_artifact())
    }

    /// Fetch the sources jar. [`FetchStatus::NotFound`] is the usual way of saying there is none.
    pub fn download_sources(&self, resolved: &ResolvedArtifact) -> FetchStatus {
        self.download_sub_artifact(&resolved.sources())
    }

    pub fn download_sub_artifact(&self, sub_artifact: &SubArtifact) -> FetchStatus {
        self.fetch_first(&sub_artifact.repository_path(), &sub_artifact.cache_path())
    }

    /// Resolve `coordinate`, then fetch its primary file and, if asked, its sources.
    ///
    /// Missing or failing sources are not an error; they are reported as `sources: None`.
    pub fn download<S: AsRef<str>>(
        &self,
        coordinate: S,
        fetch_sources: bool,
    ) -> Result<Downloaded, Error> {
        let artifact = self.artifact_for(coordinate)?;
        let resolved = match self.fetch_descriptor(&artifact)? {
            FetchStatus::Successful => self.parse_descriptor(&artifact)?,
            status => {
                return Err(Error::Unresolved {
                    coordinate: artifact.to_string(),
                    last_error: status.error().cloned(),
                });
            }
        };

        let main = resolved.main_artifact();
        match self.download_sub_artifact(&main) {
            FetchStatus::Successful => {}
            FetchStatus::NotFound => {
                return Err(Error::ArtifactNotFound {
                    coordinate: artifact.to_string(),
                    file: main.file_name(),
                });
            }
            FetchStatus::Error(err) => {
                return Err(Error::ArtifactFetch {
                    coordinate: artifact.to_string(),
                    file: main.file_name(),
                    err,
                });
            }
        }

        let sources = if fetch_sources {
            let sources = resolved.sources();
            match self.download_sub_artifact(&sources) {
                FetchStatus::Successful => Some(sources.local_path().to_path_buf()),
                FetchStatus::NotFound => {
                    tracing::debug!(coordinate = %artifact, "no sources available");
                    None
                }
                FetchStatus::Error(err) => {
                    tracing::warn!(coordinate = %artifact, %err, "failed to fetch sources");
                    None
                }
            }
        } else {
            None
        };

        Ok(Downloaded {
            pom: resolved.pom().to_path_buf(),
            file: main.local_path().to_path_buf(),
            sources,
        })
    }

    /// Fetch the descriptor and primary file, returning both paths.
    pub fn download_pom_and_file<S: AsRef<str>>(
        &self,
        coordinate: S,
    ) -> Result<(PathBuf, PathBuf), Error> {
        let Downloaded { pom, file, .. } = self.download(coordinate, false)?;
        Ok((pom, file))
    }

    fn fetch_descriptor(&self, artifact: &Artifact) -> Result<FetchStatus, Error> {
        if artifact.coordinate().parsed_version().is_snapshot() {
            return Err(Error::SnapshotUnsupported {
                coordinate: artifact.to_string(),
            });
        }
        let status = self.fetch_first(
            &artifact.descriptor_path(),
            &artifact.descriptor_cache_path(),
        );
        if !status.is_successful() {
            tracing::warn!(coordinate = %artifact, %status, "could not resolve descriptor");
        }
        Ok(status)
    }

    fn parse_descriptor(&self, artifact: &Artifact) -> Result<ResolvedArtifact, Error> {
        let pom = self
            .transport
            .cache()
            .path_for(artifact.descriptor_cache_path());
        let descriptor = self.parser.parse(&pom)?;
        Ok(ResolvedArtifact::new(
            artifact.clone(),
            descriptor.packaging,
            pom,
            descriptor.parent,
        ))
    }

    fn fetch_first(&self, target: &str, destination: &Path) -> FetchStatus {
        let mut last_error = None;
        for repository in self.repositories.iter().filter(|r| r.is_enabled()) {
            match self.transport.fetch(target, repository, destination) {
                FetchStatus::Successful => return FetchStatus::Successful,
                FetchStatus::NotFound => {}
                FetchStatus::Error(err) => last_error = Some(err),
            }
        }
        last_error.map_or(FetchStatus::NotFound, FetchStatus::Error)
    }
}
