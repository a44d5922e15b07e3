use anyhow::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Finds every file with an exact file name below a root directory.
pub struct ArtifactWalker {
    root: PathBuf,
    file_name: String,
    follow_links: bool,
}

/// Result of a walk: the matching files plus every entry that could not be
/// read. Unreadable entries do not stop the walk.
#[derive(Debug, Default)]
pub struct Discovered {
    pub files: Vec<PathBuf>,
    pub unreadable: Vec<(PathBuf, std::io::Error)>,
}

impl ArtifactWalker {
    pub fn new(root: PathBuf, file_name: impl Into<String>) -> Self {
        Self {
            root,
            file_name: file_name.into(),
            follow_links: false,
        }
    }

    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Matching paths, sorted so batch output is deterministic.
    ///
    /// Only a root that cannot be read fails the walk.
    pub fn walk(&self) -> Result<Discovered> {
        let mut discovered = Discovered::default();
        let walker = WalkDir::new(&self.root)
            .follow_links(self.follow_links)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => return Err(e.into()),
                Err(e) => {
                    let path = e
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| self.root.clone());
                    log::warn!("Cannot read {}: {}", path.display(), e);
                    discovered.unreadable.push((path, e.into()));
                    continue;
                }
            };
            if entry.file_type().is_file() && self.should_process(entry.path()) {
                discovered.files.push(entry.into_path());
            }
        }

        Ok(discovered)
    }

    fn should_process(&self, path: &Path) -> bool {
        path.file_name()
            .map(|name| name.to_string_lossy() == self.file_name.as_str())
            .unwrap_or(false)
    }
}

pub fn find_graph_files(root: &Path, graph_filename: &str, follow_links: bool) -> Result<Discovered> {
    ArtifactWalker::new(root.to_path_buf(), graph_filename)
        .follow_links(follow_links)
        .walk()
}
