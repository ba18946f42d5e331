use std::fs;
use std::sync::OnceLock;
use std::time::Instant;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{info, warn};

use crate::error::SourceError;
use crate::model::{AboutPage, Project, Snapshot};
use crate::source::ContentSource;

/// Serves everything from one consolidated JSON document.
///
/// The document is read on first use and kept for the lifetime of the source.
/// A failed read is remembered as an empty snapshot; there is no retry and no
/// invalidation.
pub struct SnapshotSource {
    path: Utf8PathBuf,
    cache: OnceLock<Snapshot>,
}

impl SnapshotSource {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: OnceLock::new(),
        }
    }

    /// A source over an already loaded snapshot.
    pub fn preloaded(snapshot: Snapshot) -> Self {
        Self {
            path: Utf8PathBuf::new(),
            cache: OnceLock::from(snapshot),
        }
    }

    fn snapshot(&self) -> &Snapshot {
        self.cache.get_or_init(|| match load(&self.path) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(path = %self.path, "static data load error: {err}");
                Snapshot::default()
            }
        })
    }
}

fn load(path: &Utf8Path) -> Result<Snapshot, SourceError> {
    let s = Instant::now();
    let text = fs::read_to_string(path)?;
    let snapshot: Snapshot = serde_json::from_str(&text)?;

    info!(
        %path,
        projects = snapshot.projects.len(),
        generated = ?snapshot.meta.as_ref().and_then(|meta| meta.generated_at),
        "loaded content snapshot {}",
        crate::io::as_overhead(s)
    );

    Ok(snapshot)
}

impl ContentSource for SnapshotSource {
    fn get_about(&self) -> Option<AboutPage> {
        self.snapshot().about.clone()
    }

    fn list_projects(&self) -> Vec<Project> {
        self.snapshot().projects.clone()
    }

    fn get_project_by_slug(&self, slug: &str) -> Option<Project> {
        if slug.is_empty() {
            return None;
        }

        self.snapshot()
            .projects
            .iter()
            .find(|project| project.slug == slug)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    static COUNTER: AtomicUsize = AtomicUsize::new(0);

    fn temp_file(contents: &str) -> Utf8PathBuf {
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        let dir = Utf8PathBuf::try_from(std::env::temp_dir()).unwrap();
        let path = dir.join(format!("folio-snapshot-{}-{n}.json", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    const DOCUMENT: &str = r#"{
        "about": { "bio": "Hello", "cv": [] },
        "projects": [
            { "slug": "b", "title": "B", "year": 2024, "content": [] },
            { "slug": "a", "title": "A", "year": 2020, "content": [] }
        ],
        "meta": { "generatedAt": "2024-05-01T10:00:00.000Z" }
    }"#;

    #[test]
    fn test_serves_all_methods() {
        let path = temp_file(DOCUMENT);
        let source = SnapshotSource::new(&path);

        assert_eq!(source.get_about().unwrap().bio, "Hello");
        let slugs: Vec<_> = source.list_projects().into_iter().map(|p| p.slug).collect();
        assert_eq!(slugs, ["b", "a"]);
        assert_eq!(source.get_project_by_slug("a").unwrap().title, "A");
        assert!(source.get_project_by_slug("zzz").is_none());
        assert!(source.get_project_by_slug("").is_none());

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_loads_once() {
        let path = temp_file(DOCUMENT);
        let source = SnapshotSource::new(&path);
        assert_eq!(source.list_projects().len(), 2);

        // later changes on disk are not observed
        fs::write(&path, r#"{ "projects": [] }"#).unwrap();
        assert_eq!(source.list_projects().len(), 2);

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_missing_file_is_empty() {
        let source = SnapshotSource::new("/nonexistent/folio/data.json");
        assert!(source.get_about().is_none());
        assert!(source.list_projects().is_empty());
        assert!(source.get_project_by_slug("a").is_none());
    }

    #[test]
    fn test_malformed_file_is_empty() {
        let path = temp_file("{ not json");
        let source = SnapshotSource::new(&path);
        assert!(source.list_projects().is_empty());
        assert!(source.get_about().is_none());
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_preloaded() {
        let source = SnapshotSource::preloaded(Snapshot::default());
        assert!(source.list_projects().is_empty());
    }
}
