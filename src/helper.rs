use crate::descriptor::DescriptorParser;
use crate::resolver::{ArtifactResolver, Downloaded};
use crate::transport::Transport;

pub mod serial {
    use super::*;

    pub fn download_all<T, P, I, S>(
        resolver: &ArtifactResolver<T, P>,
        coordinates: I,
        fetch_sources: bool,
    ) -> Vec<Result<Downloaded, crate::Error>>
    where
        T: Transport,
        P: DescriptorParser,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        coordinates
            .into_iter()
            .map(|c| resolver.download(c, fetch_sources))
            .collect()
    }
}

#[cfg(feature = "rayon")]
pub mod parallel {
    use super::*;
    use rayon::prelude::*;

    pub fn download_all_par<T, P, I, S>(
        resolver: &ArtifactResolver<T, P>,
        coordinates: I,
        fetch_sources: bool,
    ) -> Vec<Result<Downloaded, crate::Error>>
    where
        T: Transport + Sync,
        P: DescriptorParser + Sync,
        I: IntoParallelIterator<Item = S>,
        S: AsRef<str> + Send,
    {
        coordinates
            .into_par_iter()
            .map(|c| resolver.download(c, fetch_sources))
            .collect::<Vec<_>>()
    }
}

#[cfg(test)]
mod test_download_all {
    use super::*;
    use crate::repository::Repository;
    use crate::transport::{LocalCache, MemoryTransport};

    fn resolver(root: &std::path::Path) -> ArtifactResolver<MemoryTransport> {
        let transport = MemoryTransport::new(LocalCache::create(root).unwrap())
            .with_file("r", "a/x/1/x-1.pom", "<project/>")
            .with_file("r", "a/x/1/x-1.jar", "x")
            .with_file("r", "a/y/2/y-2.pom", "<project/>")
            .with_file("r", "a/y/2/y-2.jar", "y");
        ArtifactResolver::new(vec![Repository::new("r", "mem://r")], transport)
    }

    #[test]
    fn serial_results_follow_input_order() {
        let temp = tempfile::tempdir().unwrap();
        let resolver = resolver(temp.path());
        let results = serial::download_all(&resolver, ["a:y:2", "a:missing:1", "a:x:1"], false);
        assert_eq!(results.len(), 3);
        assert!(results[0].as_ref().unwrap().file.ends_with("y-2.jar"));
        assert!(matches!(results[1], Err(crate::Error::Unresolved { .. })));
        assert!(results[2].as_ref().unwrap().file.ends_with("x-1.jar"));
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn parallel_results_follow_input_order() {
        let temp = tempfile::tempdir().unwrap();
        let resolver = resolver(temp.path());
        let coordinates = vec!["a:x:1", "a:y:2", "a:x:1", "a:y:2"];
        let results = parallel::download_all_par(&resolver, coordinates, false);
        let files = results
            .into_iter()
            .map(|r| r.unwrap().file.file_name().unwrap().to_string_lossy().into_owned())
            .collect::<Vec<_>>();
        assert_eq!(files, ["x-1.jar", "y-2.jar", "x-1.jar", "y-2.jar"]);
    }
}
