//! Resolution orchestrator: the ordered, backtracking search that turns one
//! import specifier into a resolved file, or defers to the compiler's own
//! fallback handling.
//!
//! Precedence mirrors what the compiler has already tried before this
//! resolver runs: include-path directories first (plain directory lookup,
//! spelled-out candidates), then the importing file's directory with the
//! bundler's own resolution rules. First match wins, deterministically.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::candidates::{possible_requests, RequestMode};
use crate::config::Config;
use crate::engine::EngineProfile;
use crate::ports::{DependencySink, ExternalResolver};

/// Where an import statement came from.
///
/// The compiler reports the synthetic top-level buffer with a sentinel rather
/// than a real path; modeling it as a variant keeps it from ever colliding
/// with an actual file named like the sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOrigin {
    /// The synthetic entry buffer handed to the compiler.
    EntryBuffer,
    /// A real stylesheet file on disk.
    SourceFile(PathBuf),
}

impl ImportOrigin {
    /// Directory the final search context is anchored to. The entry buffer
    /// maps to the directory of the file the compilation was started for.
    fn directory(&self, entry_file: &Path) -> PathBuf {
        let file = match self {
            ImportOrigin::EntryBuffer => entry_file,
            ImportOrigin::SourceFile(path) => path.as_path(),
        };
        file.parent().map(Path::to_path_buf).unwrap_or_default()
    }
}

/// Outcome of one resolution call. There is no partial or ambiguous case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// The import maps to this file descriptor.
    Resolved { file: PathBuf },
    /// Nothing matched; the caller falls back to treating the specifier as a
    /// literal filename. Not an error.
    Unhandled,
}

/// One precedence tier: a directory plus the remaining requests to try in it.
struct SearchContext {
    directory: PathBuf,
    requests: VecDeque<String>,
}

/// Import resolver configured for one compilation.
pub struct ImportResolver {
    include_paths: Vec<PathBuf>,
    entry_file: PathBuf,
    engine: EngineProfile,
}

impl ImportResolver {
    pub fn new(include_paths: Vec<PathBuf>, entry_file: PathBuf, engine: EngineProfile) -> Self {
        Self {
            include_paths,
            entry_file,
            engine,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.resolver.include_paths.clone(),
            config.resolver.entry.clone(),
            config.engine.profile(),
        )
    }

    /// Resolve one import specifier.
    ///
    /// Drives `external` across the search space one request at a time; each
    /// attempt's outcome strictly gates the next, so precedence holds even
    /// when the external resolver is asynchronous. On success the resolved
    /// path is registered with `sink` exactly once; failed attempts register
    /// nothing.
    #[instrument(skip(self, external, sink), fields(specifier = %specifier))]
    pub async fn resolve_import(
        &self,
        specifier: &str,
        origin: &ImportOrigin,
        external: &dyn ExternalResolver,
        sink: &dyn DependencySink,
    ) -> ResolutionOutcome {
        let mut worklist = self.search_contexts(specifier, origin);

        while let Some(context) = worklist.front_mut() {
            let Some(request) = context.requests.pop_front() else {
                worklist.pop_front();
                continue;
            };

            match external.resolve(&context.directory, &request).await {
                Ok(resolved) => {
                    sink.add_dependency(&resolved);
                    let file = self.descriptor_for(resolved);
                    debug!("Resolved '{}' to {}", specifier, file.display());
                    return ResolutionOutcome::Resolved { file };
                }
                Err(_) => {
                    debug!(
                        "No match for '{}' in {}",
                        request,
                        context.directory.display()
                    );
                }
            }
        }

        debug!("Specifier '{}' left unhandled", specifier);
        ResolutionOutcome::Unhandled
    }

    /// Build the ordered search space: one context per include path with
    /// spelled-out candidates, then the importing file's directory with
    /// bundler-style candidates.
    fn search_contexts(&self, specifier: &str, origin: &ImportOrigin) -> VecDeque<SearchContext> {
        let mut contexts: VecDeque<SearchContext> = self
            .include_paths
            .iter()
            .map(|dir| SearchContext {
                directory: dir.clone(),
                requests: possible_requests(specifier, RequestMode::Preprocessor).into(),
            })
            .collect();

        contexts.push_back(SearchContext {
            directory: origin.directory(&self.entry_file),
            requests: possible_requests(specifier, RequestMode::Bundler).into(),
        });

        contexts
    }

    /// Removing the `.css` extension tells an engine that supports it to
    /// inline the file's contents as preprocessor syntax instead of linking
    /// it as an external stylesheet. Preprocessor extensions always stay.
    fn descriptor_for(&self, resolved: PathBuf) -> PathBuf {
        let is_plain_css = resolved
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("css"));

        if self.engine.inlines_plain_css && is_plain_css {
            resolved.with_extension("")
        } else {
            resolved
        }
    }
}
