//! The outcome of a single fetch.

use std::sync::Arc;

/// Everything needed to report a failed fetch without inspecting its cause.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message} (repository '{repository}'{})", .code.map(|c| format!(", status {c}")).unwrap_or_default())]
pub struct FetchError {
    repository: String,
    message: String,
    code: Option<u16>,
    #[source]
    cause: Option<Arc<std::io::Error>>,
}

impl FetchError {
    pub fn new<R: Into<String>, M: Into<String>>(repository: R, message: M) -> Self {
        Self {
            repository: repository.into(),
            message: message.into(),
            code: None,
            cause: None,
        }
    }

    /// Attach the response code which caused the failure.
    pub fn with_code(mut self, code: u16) -> Self {
        self.code = Some(code);
        self
    }

    /// Attach the underlying I/O error.
    pub fn with_cause(mut self, cause: std::io::Error) -> Self {
        self.cause = Some(Arc::new(cause));
        self
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> Option<u16> {
        self.code
    }

    pub fn cause(&self) -> Option<&std::io::Error> {
        self.cause.as_deref()
    }
}

impl PartialEq for FetchError {
    fn eq(&self, other: &Self) -> bool {
        self.repository == other.repository
            && self.message == other.message
            && self.code == other.code
            && self.cause.as_ref().map(|e| e.kind()) == other.cause.as_ref().map(|e| e.kind())
    }
}

impl Eq for FetchError {}

/// The result of fetching one file. There is no other outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    /// The file was fetched, or was already in the cache.
    Successful,
    /// The repository reported that the file does not exist.
    NotFound,
    /// The fetch failed.
    Error(FetchError),
}

impl FetchStatus {
    pub fn is_successful(&self) -> bool {
        matches!(self, Self::Successful)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            Self::Error(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FetchError> for FetchStatus {
    fn from(err: FetchError) -> Self {
        Self::Error(err)
    }
}

impl std::fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Successful => write!(f, "successful"),
            Self::NotFound => write!(f, "not found"),
            Self::Error(err) => write!(f, "error: {err}"),
        }
    }
}
