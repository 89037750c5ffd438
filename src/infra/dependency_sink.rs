use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::ports::DependencySink;

/// In-memory dependency set shared across concurrent resolutions.
///
/// Appends are serialized by the mutex; records already appended stay valid
/// when an in-flight resolution is abandoned.
#[derive(Debug, Default, Clone)]
pub struct SharedDependencySet {
    paths: Arc<Mutex<BTreeSet<PathBuf>>>,
}

impl SharedDependencySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current contents, in path order.
    pub fn snapshot(&self) -> Vec<PathBuf> {
        self.paths.lock().unwrap().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.paths.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.lock().unwrap().is_empty()
    }
}

impl DependencySink for SharedDependencySet {
    fn add_dependency(&self, path: &Path) {
        let mut paths = self.paths.lock().unwrap();
        paths.insert(path.to_path_buf());

        debug!("Registered build dependency {}", path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_appends_deduplicate() {
        let sink = SharedDependencySet::new();
        sink.add_dependency(Path::new("/a.scss"));
        sink.add_dependency(Path::new("/a.scss"));
        sink.add_dependency(Path::new("/b.scss"));

        assert_eq!(sink.len(), 2);
        assert_eq!(
            sink.snapshot(),
            vec![PathBuf::from("/a.scss"), PathBuf::from("/b.scss")]
        );
    }

    #[tokio::test]
    async fn concurrent_appends_all_land() {
        let sink = SharedDependencySet::new();

        let mut handles = Vec::new();
        for i in 0..32 {
            let sink = sink.clone();
            handles.push(tokio::spawn(async move {
                sink.add_dependency(Path::new(&format!("/dep-{i}.scss")));
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(sink.len(), 32);
    }
}
