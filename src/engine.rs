//! Capability profile of the underlying stylesheet compiler engine.
//!
//! The two engines disagree on plain CSS imports: the legacy engine inlines a
//! resolved `.css` file as preprocessor source when the extension is removed
//! from the descriptor, while the modern engine always links it as an opaque
//! external stylesheet. The resolver must not guess from the extension alone,
//! so the capability is an explicit flag chosen per engine.

/// What the compiler engine can do with resolved files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineProfile {
    /// Whether a resolved plain `.css` file may be inlined as preprocessor
    /// syntax by stripping its extension from the descriptor.
    pub inlines_plain_css: bool,
}

impl EngineProfile {
    /// Profile of the legacy engine, which inlines plain CSS.
    pub fn legacy() -> Self {
        Self {
            inlines_plain_css: true,
        }
    }

    /// Profile of the modern engine, which links plain CSS opaquely.
    pub fn modern() -> Self {
        Self {
            inlines_plain_css: false,
        }
    }
}
