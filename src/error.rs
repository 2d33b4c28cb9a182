use crate::repository::ConfigError;
use crate::status::FetchError;
use crate::transport::ProxyError;

/// The main error enum for this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Proxy(#[from] ProxyError),

    /// A coordinate string was not of the form `group:artifact:version`.
    #[error("malformed coordinate '{coordinate}': expected 'group:artifact:version'")]
    MalformedCoordinate { coordinate: String },

    /// A classifier or extension would produce an ambiguous file name.
    #[error("invalid {field} '{value}' for {coordinate}")]
    InvalidSubArtifact {
        coordinate: String,
        field: &'static str,
        value: String,
    },

    /// Snapshot versions are recognised but never resolved.
    #[error("snapshot versions are not supported: {coordinate}")]
    SnapshotUnsupported { coordinate: String },

    /// A descriptor was fetched but could not be understood.
    #[error("failed to parse descriptor {}: {message}", path.display())]
    Descriptor {
        path: std::path::PathBuf,
        message: String,
    },

    /// No configured repository supplied the descriptor.
    #[error("Could not resolve pom file for {coordinate}")]
    Unresolved {
        coordinate: String,
        #[source]
        last_error: Option<FetchError>,
    },

    /// The descriptor resolved but the primary file is absent from every repository.
    #[error("no repository has {file} for {coordinate}")]
    ArtifactNotFound { coordinate: String, file: String },

    #[error("failed to fetch {file} for {coordinate}")]
    ArtifactFetch {
        coordinate: String,
        file: String,
        #[source]
        err: FetchError,
    },
}

impl Error {
    pub(crate) fn malformed<S: Into<String>>(coordinate: S) -> Self {
        Self::MalformedCoordinate {
            coordinate: coordinate.into(),
        }
    }
}
