//! Dependency coordinates of the form `group:artifact:version`.

use crate::error::Error;
use crate::version::Version;

/// A `group:artifact:version` triple identifying one immutable dependency.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coordinate {
    group: String,
    artifact: String,
    version: String,
}

impl Coordinate {
    /// Parse a coordinate string. Exactly three `:`-separated segments are required.
    ///
    /// No segment may be empty, be `.` or `..`, or contain a path separator, and the group may not
    /// have empty `.`-separated parts. Each coordinate therefore has a cache directory of its own.
    ///
    /// ```
    /// use fetch_artifact::Coordinate;
    ///
    /// let coordinate = Coordinate::parse("com.google.guava:guava:33.0.0-jre")?;
    /// assert_eq!(coordinate.group(), "com.google.guava");
    /// assert_eq!(coordinate.to_string(), "com.google.guava:guava:33.0.0-jre");
    /// # Ok::<(), fetch_artifact::Error>(())
    /// ```
    pub fn parse<S: AsRef<str>>(coordinate: S) -> Result<Self, Error> {
        let coordinate = coordinate.as_ref();
        let segments = coordinate.split(':').collect::<Vec<_>>();
        match segments.as_slice() {
            [group, artifact, version] if is_valid(group, artifact, version) => {
                Ok(Self::new(*group, *artifact, *version))
            }
            _ => Err(Error::malformed(coordinate)),
        }
    }

    /// Like [`Coordinate::new`], but with the checks of [`Coordinate::parse`].
    pub fn try_new<G, A, V>(group: G, artifact: A, version: V) -> Result<Self, Error>
    where
        G: Into<String>,
        A: Into<String>,
        V: Into<String>,
    {
        let coordinate = Self::new(group, artifact, version);
        if is_valid(&coordinate.group, &coordinate.artifact, &coordinate.version) {
            Ok(coordinate)
        } else {
            Err(Error::malformed(coordinate.to_string()))
        }
    }

    pub fn new<G, A, V>(group: G, artifact: A, version: V) -> Self
    where
        G: Into<String>,
        A: Into<String>,
        V: Into<String>,
    {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version: version.into(),
        }
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn artifact(&self) -> &str {
        &self.artifact
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// The version as a comparable value.
    pub fn parsed_version(&self) -> Version {
        Version::parse(&self.version)
    }

    /// The group with dots mapped onto path segments, e.g. `foo.bar` -> `foo/bar`.
    pub fn group_path(&self) -> String {
        self.group.replace('.', "/")
    }
}

fn is_path_segment(segment: &str) -> bool {
    !segment.is_empty() && !matches!(segment, "." | "..") && !segment.contains(['/', '\\', ':'])
}

fn is_valid(group: &str, artifact: &str, version: &str) -> bool {
    group.split('.').all(is_path_segment) && is_path_segment(artifact) && is_path_segment(version)
}

impl std::str::FromStr for Coordinate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)
    }
}
