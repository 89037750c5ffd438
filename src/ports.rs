//! Seams to the host build system.
//!
//! The resolver core talks to the outside world only through these traits; it
//! never touches the filesystem itself.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

/// The external resolver found nothing for a request.
///
/// This is routine control flow for the backtracking search, not an error:
/// every rejection just means "try the next candidate". The search does not
/// care whether the directory or the file was the missing piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveRejected;

/// Filesystem/package-aware resolution supplied by the host build system.
///
/// Implementations own all alias, package entry-point and default-extension
/// rules; the core hands them one request at a time and acts on the outcome.
#[async_trait]
pub trait ExternalResolver: Send + Sync {
    /// Resolve `request` relative to `directory` to an absolute file path.
    async fn resolve(&self, directory: &Path, request: &str)
        -> Result<PathBuf, ResolveRejected>;
}

/// Build-input registration on the host build context.
///
/// Appends may happen from many concurrent resolutions; implementations must
/// not lose updates. No ordering between records is required.
pub trait DependencySink: Send + Sync {
    fn add_dependency(&self, path: &Path);
}
