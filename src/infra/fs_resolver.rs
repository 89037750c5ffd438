//! Filesystem implementation of the external resolver port.
//!
//! Owns the bundler-side resolution rules the core delegates to: specifier
//! aliases, module-root lookup for `~`-prefixed and bare package requests, a
//! package manifest entry field, and default extension/index probing for
//! requests that name no concrete file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::trace;

use crate::config::Config;
use crate::ports::{ExternalResolver, ResolveRejected};

/// Extensions appended to extensionless requests, in probe order.
const DEFAULT_EXTENSIONS: &[&str] = &["scss", "sass", "css"];

/// Files probed inside a resolved directory, in probe order.
const INDEX_FILES: &[&str] = &["_index", "index"];

/// Manifest fields naming a package's stylesheet entry point, in probe order.
const ENTRY_FIELDS: &[&str] = &["style", "main"];

pub struct FsResolver {
    /// Prefix aliases, longest prefix first.
    aliases: Vec<(String, PathBuf)>,
    module_roots: Vec<PathBuf>,
}

impl FsResolver {
    pub fn new(aliases: Vec<(String, PathBuf)>, module_roots: Vec<PathBuf>) -> Self {
        let mut aliases = aliases;
        aliases.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        Self {
            aliases,
            module_roots,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config
                .resolver
                .aliases
                .iter()
                .map(|(prefix, target)| (prefix.clone(), target.clone()))
                .collect(),
            config.resolver.module_roots.clone(),
        )
    }

    /// Expand `request` against the alias table. An alias matches the whole
    /// request or a `/`-separated prefix of it.
    fn expand_alias(&self, request: &str) -> Option<PathBuf> {
        for (prefix, target) in &self.aliases {
            if request == prefix {
                return Some(target.clone());
            }
            if let Some(rest) = request.strip_prefix(prefix.as_str()) {
                if let Some(rest) = rest.strip_prefix('/') {
                    return Some(target.join(rest));
                }
            }
        }
        None
    }

    /// Look a module request up under each configured module root.
    async fn resolve_in_module_roots(&self, request: &str) -> Option<PathBuf> {
        for root in &self.module_roots {
            if let Some(found) = self.probe(&root.join(request)).await {
                return Some(found);
            }
        }
        None
    }

    /// Probe one base path: the exact file, then default extensions, then
    /// directory rules (manifest entry field, index files).
    async fn probe(&self, base: &Path) -> Option<PathBuf> {
        if is_file(base).await {
            return Some(base.to_path_buf());
        }

        for ext in DEFAULT_EXTENSIONS {
            let candidate = with_appended_extension(base, ext);
            if is_file(&candidate).await {
                return Some(candidate);
            }
        }

        if is_dir(base).await {
            return self.probe_directory(base).await;
        }

        None
    }

    async fn probe_directory(&self, dir: &Path) -> Option<PathBuf> {
        if let Some(entry) = manifest_entry(dir).await {
            if is_file(&entry).await {
                return Some(entry);
            }
            for ext in DEFAULT_EXTENSIONS {
                let candidate = with_appended_extension(&entry, ext);
                if is_file(&candidate).await {
                    return Some(candidate);
                }
            }
        }

        for name in INDEX_FILES {
            for ext in DEFAULT_EXTENSIONS {
                let candidate = dir.join(format!("{name}.{ext}"));
                if is_file(&candidate).await {
                    return Some(candidate);
                }
            }
        }

        None
    }
}

#[async_trait]
impl ExternalResolver for FsResolver {
    async fn resolve(
        &self,
        directory: &Path,
        request: &str,
    ) -> Result<PathBuf, ResolveRejected> {
        trace!("Resolving '{}' in {}", request, directory.display());

        if let Some(expanded) = self.expand_alias(request) {
            if let Some(found) = self.probe(&expanded).await {
                return Ok(found);
            }
        }

        if let Some(rest) = request.strip_prefix('~') {
            return self.resolve_in_module_roots(rest).await.ok_or(ResolveRejected);
        }

        if let Some(found) = self.probe(&directory.join(request)).await {
            return Ok(found);
        }

        let relative = request.starts_with("./") || request.starts_with("../");
        if !relative && !request.starts_with('/') {
            if let Some(found) = self.resolve_in_module_roots(request).await {
                return Ok(found);
            }
        }

        Err(ResolveRejected)
    }
}

/// Append an extension without replacing an existing one, so `foo.config`
/// probes as `foo.config.scss`.
fn with_appended_extension(base: &Path, ext: &str) -> PathBuf {
    let mut os = base.as_os_str().to_os_string();
    os.push(format!(".{ext}"));
    PathBuf::from(os)
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}

async fn is_dir(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false)
}

/// Read the stylesheet entry point out of a package manifest, if any.
async fn manifest_entry(dir: &Path) -> Option<PathBuf> {
    let content = tokio::fs::read_to_string(dir.join("package.json")).await.ok()?;
    let manifest: serde_json::Value = serde_json::from_str(&content).ok()?;

    for field in ENTRY_FIELDS {
        if let Some(rel) = manifest.get(*field).and_then(|v| v.as_str()) {
            return Some(dir.join(rel));
        }
    }
    None
}
