//! The on-disk cache that every fetched file is materialised into.
//!
//! Files are keyed by their cache-relative path only (coordinate, classifier and extension), never
//! by the repository that supplied them. Nothing is ever evicted.

use std::io::Write;
use std::path::{Component, Path, PathBuf};

/// A cache rooted at a local directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalCache {
    root: PathBuf,
}

impl LocalCache {
    /// Use `root` as the cache directory, creating it if it does not exist.
    pub fn create<P: AsRef<Path>>(root: P) -> std::io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.exists() {
            std::fs::create_dir_all(&root)?;
        }
        Ok(Self { root })
    }

    /// Get the cache directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the absolute path of a cache-relative path. Components which would escape the root
    /// (`..`, a leading `/`) are dropped.
    pub fn path_for<P: AsRef<Path>>(&self, relative: P) -> PathBuf {
        relative
            .as_ref()
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part),
                _ => None,
            })
            .fold(self.root.clone(), |path, part| path.join(part))
    }

    /// Check whether a file is already cached at the given cache-relative path.
    pub fn is_cached<P: AsRef<Path>>(&self, relative: P) -> bool {
        self.path_for(relative).is_file()
    }

    /// Write `content` to the cache-relative path and return the absolute path.
    ///
    /// The bytes go to a temporary file in the destination directory which is then renamed into
    /// place, so readers see either nothing or the complete file. A concurrent writer of the same
    /// path simply replaces identical content.
    pub fn store<P: AsRef<Path>>(&self, relative: P, content: &[u8]) -> std::io::Result<PathBuf> {
        let dest = self.path_for(relative);
        let dir = dest.parent().unwrap_or(&self.root);
        std::fs::create_dir_all(dir)?;
        let mut staged = tempfile::NamedTempFile::new_in(dir)?;
        staged.write_all(content)?;
        staged.as_file().sync_all()?;
        staged.persist(&dest).map_err(|err| err.error)?;
        Ok(dest)
    }
}
