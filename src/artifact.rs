//! Artifacts at each stage of resolution, and where their files live.
//!
//! Every file belonging to an artifact sits in one directory, both in a remote repository and in
//! the local cache:
//!
//! ```text
//! <group/with/slashes>/<artifact>/<version>/<artifact>-<version>[-<classifier>].<extension>
//! ```

use std::path::{Path, PathBuf};

use crate::coordinate::Coordinate;
use crate::error::Error;

/// Extension of the descriptor file.
pub const DESCRIPTOR_EXTENSION: &str = "pom";

const SOURCES_CLASSIFIER: &str = "sources";
const SOURCES_EXTENSION: &str = "jar";

/// Packaging types whose primary file is a plain jar.
const JAR_PACKAGINGS: &[&str] = &[
    "jar",
    "bundle",
    "maven-plugin",
    "eclipse-plugin",
    "ejb",
    "test-jar",
    "java-source",
    "javadoc",
];

/// The file extension of the primary artifact for a packaging type.
pub fn extension_for_packaging(packaging: &str) -> &str {
    if JAR_PACKAGINGS.contains(&packaging) {
        "jar"
    } else {
        packaging
    }
}

/// A coordinate mapped onto the repository layout. Creating one performs no I/O.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Artifact {
    coordinate: Coordinate,
}

impl Artifact {
    pub fn new(coordinate: Coordinate) -> Self {
        Self { coordinate }
    }

    pub fn coordinate(&self) -> &Coordinate {
        &self.coordinate
    }

    /// The repository-relative directory, `group/path/artifact/version/`.
    pub fn directory(&self) -> String {
        format!(
            "{}/{}/{}/",
            self.coordinate.group_path(),
            self.coordinate.artifact(),
            self.coordinate.version()
        )
    }

    /// The same directory as a relative filesystem path.
    pub fn cache_directory(&self) -> PathBuf {
        let mut path = PathBuf::from_iter(self.coordinate.group().split('.'));
        path.push(self.coordinate.artifact());
        path.push(self.coordinate.version());
        path
    }

    /// `artifact-version[-classifier].extension`
    pub fn file_name(&self, classifier: Option<&str>, extension: &str) -> String {
        let stem = format!("{}-{}", self.coordinate.artifact(), self.coordinate.version());
        match classifier {
            Some(classifier) => format!("{stem}-{classifier}.{extension}"),
            None => format!("{stem}.{extension}"),
        }
    }

    /// The repository-relative path of the descriptor.
    pub fn descriptor_path(&self) -> String {
        format!(
            "{}{}",
            self.directory(),
            self.file_name(None, DESCRIPTOR_EXTENSION)
        )
    }

    /// The cache-relative path of the descriptor.
    pub fn descriptor_cache_path(&self) -> PathBuf {
        self.cache_directory()
            .join(self.file_name(None, DESCRIPTOR_EXTENSION))
    }
}

impl std::fmt::Display for Artifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.coordinate.fmt(f)
    }
}

/// An artifact whose descriptor has been fetched and parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArtifact {
    artifact: Artifact,
    packaging: String,
    pom: PathBuf,
    parent: Option<Coordinate>,
}

impl ResolvedArtifact {
    /// `pom` is the local path of the fetched descriptor; sibling files are placed next to it.
    pub fn new<S: Into<String>>(
        artifact: Artifact,
        packaging: S,
        pom: PathBuf,
        parent: Option<Coordinate>,
    ) -> Self {
        Self {
            artifact,
            packaging: packaging.into(),
            pom,
            parent,
        }
    }

    pub fn artifact(&self) -> &Artifact {
        &self.artifact
    }

    pub fn coordinate(&self) -> &Coordinate {
        self.artifact.coordinate()
    }

    /// The packaging declared by the descriptor.
    pub fn packaging(&self) -> &str {
        &self.packaging
    }

    /// The extension of the primary file.
    pub fn extension(&self) -> &str {
        extension_for_packaging(&self.packaging)
    }

    /// The local path of the fetched descriptor.
    pub fn pom(&self) -> &Path {
        &self.pom
    }

    /// The parent coordinate, if the descriptor declares one. It is not resolved.
    pub fn parent(&self) -> Option<&Coordinate> {
        self.parent.as_ref()
    }

    fn local_directory(&self) -> &Path {
        self.pom.parent().unwrap_or(Path::new(""))
    }

    /// The primary file.
    pub fn main_artifact(&self) -> SubArtifact {
        SubArtifact::unchecked(self, None, self.extension().to_string())
    }

    /// The `sources` jar.
    pub fn sources(&self) -> SubArtifact {
        SubArtifact::unchecked(
            self,
            Some(SOURCES_CLASSIFIER.to_string()),
            SOURCES_EXTENSION.to_string(),
        )
    }

    /// Any classified file. An empty classifier means no classifier.
    ///
    /// Classifiers may not contain `.` and neither part may contain a path separator, so that
    /// distinct pairs always map onto distinct file names.
    pub fn sub_artifact<C, E>(&self, classifier: C, extension: E) -> Result<SubArtifact, Error>
    where
        C: AsRef<str>,
        E: AsRef<str>,
    {
        let (classifier, extension) = (classifier.as_ref(), extension.as_ref());
        let invalid = |field, value: &str| Error::InvalidSubArtifact {
            coordinate: self.coordinate().to_string(),
            field,
            value: value.to_string(),
        };
        if classifier.contains(['.', '/', '\\']) {
            return Err(invalid("classifier", classifier));
        }
        if extension.is_empty() || extension.contains(['/', '\\']) {
            return Err(invalid("extension", extension));
        }
        let classifier = (!classifier.is_empty()).then(|| classifier.to_string());
        Ok(SubArtifact::unchecked(self, classifier, extension.to_string()))
    }
}

/// One file of a resolved artifact, identified by classifier and extension.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubArtifact {
    artifact: Artifact,
    classifier: Option<String>,
    extension: String,
    local: PathBuf,
}

impl SubArtifact {
    fn unchecked(resolved: &ResolvedArtifact, classifier: Option<String>, extension: String) -> Self {
        let artifact = resolved.artifact.clone();
        let local = resolved
            .local_directory()
            .join(artifact.file_name(classifier.as_deref(), &extension));
        Self {
            artifact,
            classifier,
            extension,
            local,
        }
    }

    pub fn artifact(&self) -> &Artifact {
        &self.artifact
    }

    pub fn classifier(&self) -> Option<&str> {
        self.classifier.as_deref()
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn file_name(&self) -> String {
        self.artifact
            .file_name(self.classifier.as_deref(), &self.extension)
    }

    /// The repository-relative path of this file.
    pub fn repository_path(&self) -> String {
        format!("{}{}", self.artifact.directory(), self.file_name())
    }

    /// The cache-relative path of this file.
    pub fn cache_path(&self) -> PathBuf {
        self.artifact.cache_directory().join(self.file_name())
    }

    /// Where this file lives once fetched.
    pub fn local_path(&self) -> &Path {
        &self.local
    }
}
