//! Importer hook chain.
//!
//! The compiler consults registered hooks, in order, for every import it
//! cannot resolve with its own filesystem-relative rules. The bundler-backed
//! importer built from this crate's resolver is installed last: earlier hooks
//! always get the first chance to intercept, and anything the resolver leaves
//! unhandled passes back to the compiler's literal-filename fallback.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::ports::{DependencySink, ExternalResolver};
use crate::resolver::{ImportOrigin, ImportResolver, ResolutionOutcome};

/// Result of consulting one hook for an import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookOutcome {
    /// Compile this file in place of the written specifier.
    Redirect(PathBuf),
    /// Let the next hook, or the compiler itself, handle the specifier.
    PassThrough,
}

/// One entry in the compiler's import-resolution hook list.
#[async_trait]
pub trait ImporterHook: Send + Sync {
    async fn import(&self, specifier: &str, origin: &ImportOrigin) -> HookOutcome;
}

/// Importer that redirects imports through the bundler's resolution rules.
pub struct BundlerImporter {
    resolver: ImportResolver,
    external: Arc<dyn ExternalResolver>,
    sink: Arc<dyn DependencySink>,
}

impl BundlerImporter {
    pub fn new(
        resolver: ImportResolver,
        external: Arc<dyn ExternalResolver>,
        sink: Arc<dyn DependencySink>,
    ) -> Self {
        Self {
            resolver,
            external,
            sink,
        }
    }
}

#[async_trait]
impl ImporterHook for BundlerImporter {
    async fn import(&self, specifier: &str, origin: &ImportOrigin) -> HookOutcome {
        let outcome = self
            .resolver
            .resolve_import(specifier, origin, self.external.as_ref(), self.sink.as_ref())
            .await;

        match outcome {
            ResolutionOutcome::Resolved { file } => HookOutcome::Redirect(file),
            ResolutionOutcome::Unhandled => HookOutcome::PassThrough,
        }
    }
}

/// Ordered list of import hooks consulted for each import statement.
#[derive(Default)]
pub struct ImporterChain {
    hooks: Vec<Box<dyn ImporterHook>>,
}

impl ImporterChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a hook; registration order is consultation order.
    pub fn register(&mut self, hook: Box<dyn ImporterHook>) {
        self.hooks.push(hook);
    }

    /// Consult hooks in order; the first redirect wins.
    pub async fn import(&self, specifier: &str, origin: &ImportOrigin) -> HookOutcome {
        for hook in &self.hooks {
            if let HookOutcome::Redirect(file) = hook.import(specifier, origin).await {
                return HookOutcome::Redirect(file);
            }
        }
        debug!("No hook handled '{}'", specifier);
        HookOutcome::PassThrough
    }
}
