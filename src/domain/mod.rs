//! Domain logic - pure versioning rules independent of git access

pub mod branch;
pub mod prerelease;
pub mod tag;
pub mod version;

pub use branch::{sanitize_label, BranchContext};
pub use prerelease::PreRelease;
pub use tag::{Tag, TagPrefix};
pub use version::Version;
