//! Maps request paths to files under the web root.
//!
//! `/` is served from `index.html`. Any other path has its leading slash
//! removed and is joined to the root. Paths that try to leave the root,
//! either lexically (`..`, absolute components) or through a symlink, are
//! reported as [`Resolution::Forbidden`] instead of being read.

use std::path::{Component, Path, PathBuf};

use anyhow::Context;
use tokio::fs;

/// File served for the bare `/` path.
pub const INDEX_FILE: &str = "index.html";

/// Outcome of resolving a request path.
#[derive(Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The file exists; its full contents.
    Found(Vec<u8>),
    /// No regular file at that path.
    NotFound,
    /// The path points outside the web root.
    Forbidden,
}

#[derive(Debug, Clone)]
pub struct ContentResolver {
    root: PathBuf,
}

impl ContentResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Loads the file a request path refers to.
    ///
    /// Absence is a normal outcome, not an error. `Err` is only returned when
    /// an existing file cannot be read.
    pub async fn resolve(&self, request_path: &str) -> anyhow::Result<Resolution> {
        let Some(relative) = relative_path(request_path) else {
            tracing::warn!(path = %request_path, "Rejected path outside web root");
            return Ok(Resolution::Forbidden);
        };

        let candidate = self.root.join(relative);
        let metadata = match fs::metadata(&candidate).await {
            Ok(metadata) => metadata,
            Err(e) => {
                tracing::debug!(path = %candidate.display(), error = %e, "No file to serve");
                return Ok(Resolution::NotFound);
            }
        };

        if !metadata.is_file() {
            return Ok(Resolution::NotFound);
        }

        if !self.contains(&candidate).await? {
            tracing::warn!(path = %request_path, "Rejected symlink escaping web root");
            return Ok(Resolution::Forbidden);
        }

        let bytes = fs::read(&candidate)
            .await
            .with_context(|| format!("failed to read {}", candidate.display()))?;

        Ok(Resolution::Found(bytes))
    }

    /// Whether the canonical form of `path` lies under the canonical root.
    async fn contains(&self, path: &Path) -> anyhow::Result<bool> {
        let root = fs::canonicalize(&self.root)
            .await
            .with_context(|| format!("failed to canonicalize web root {}", self.root.display()))?;
        let target = fs::canonicalize(path)
            .await
            .with_context(|| format!("failed to canonicalize {}", path.display()))?;

        Ok(target.starts_with(&root))
    }
}

/// Turns a request target into a path relative to the web root.
///
/// The query string and fragment are dropped. Returns `None` when the result
/// would not stay inside the root.
pub fn relative_path(request_path: &str) -> Option<PathBuf> {
    let path = request_path
        .split(['?', '#'])
        .next()
        .unwrap_or_default();

    let trimmed = path.strip_prefix('/').unwrap_or(path);
    if trimmed.is_empty() {
        return Some(PathBuf::from(INDEX_FILE));
    }

    let relative = Path::new(trimmed);
    let stays_inside = relative
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));

    stays_inside.then(|| relative.to_path_buf())
}
