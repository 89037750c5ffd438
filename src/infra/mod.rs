//! Adapters behind the resolver's port traits.

mod dependency_sink;
mod fs_resolver;

pub use dependency_sink::SharedDependencySet;
pub use fs_resolver::FsResolver;
