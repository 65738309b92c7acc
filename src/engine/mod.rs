//! Version engine - base discovery and branch rules

pub mod version_engine;

pub use version_engine::{ResolvedVersion, VersionEngine, MAIN_PRERELEASE_KIND};
