//! Candidate request generation for stylesheet import specifiers.
//!
//! A single written specifier like `variables` can refer to `_variables.scss`,
//! `variables.sass`, `variables/_index.scss` and so on. This module maps one
//! specifier to the ordered list of concrete requests to hand to the resolver,
//! most specific first. It is a pure transformation: no filesystem access.

/// Preprocessor extensions in probe order: expanded syntax before indented.
const PREPROCESSOR_EXTENSIONS: &[&str] = &["scss", "sass"];

/// Extensions that mark a specifier as already fully qualified.
const STYLESHEET_EXTENSIONS: &[&str] = &["scss", "sass", "css"];

/// Which resolver the generated requests are destined for.
///
/// The bundler resolver knows how to apply its own default-extension and
/// main-file rules to a bare specifier, so it gets the unmodified specifier as
/// the first request. Plain directory lookup has no such rules, so the
/// preprocessor mode emits only fully spelled-out variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
    Bundler,
    Preprocessor,
}

/// Build the ordered candidate requests for one import specifier.
///
/// An explicit stylesheet extension short-circuits everything: the author
/// named an exact file, so that literal specifier is the only candidate.
/// Otherwise partial-prefixed variants come before plain extension variants,
/// and directory-like specifiers additionally get index-file variants last.
pub fn possible_requests(specifier: &str, mode: RequestMode) -> Vec<String> {
    if has_stylesheet_extension(specifier) {
        return vec![specifier.to_string()];
    }

    let trimmed = specifier.trim_end_matches('/');
    let directory_like = trimmed.len() != specifier.len() || trimmed.is_empty();
    let (dir, base) = match trimmed.rfind('/') {
        Some(idx) => (&trimmed[..=idx], &trimmed[idx + 1..]),
        None => ("", trimmed),
    };

    let mut requests = Vec::new();

    if mode == RequestMode::Bundler {
        requests.push(specifier.to_string());
    }

    for ext in PREPROCESSOR_EXTENSIONS {
        requests.push(format!("{dir}_{base}.{ext}"));
    }
    for ext in PREPROCESSOR_EXTENSIONS {
        requests.push(format!("{dir}{base}.{ext}"));
    }

    if directory_like {
        let prefix = if trimmed.is_empty() {
            String::new()
        } else {
            format!("{trimmed}/")
        };
        for ext in PREPROCESSOR_EXTENSIONS {
            requests.push(format!("{prefix}_index.{ext}"));
        }
        for ext in PREPROCESSOR_EXTENSIONS {
            requests.push(format!("{prefix}index.{ext}"));
        }
    }

    requests.dedup();
    requests
}

/// True when the final path segment ends in a recognized stylesheet
/// extension, compared case-insensitively.
pub fn has_stylesheet_extension(specifier: &str) -> bool {
    let leaf = specifier.rsplit('/').next().unwrap_or(specifier);
    match leaf.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => STYLESHEET_EXTENSIONS
            .iter()
            .any(|known| ext.eq_ignore_ascii_case(known)),
        _ => false,
    }
}
