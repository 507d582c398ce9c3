//! Domain logic - pure release rules independent of git operations

pub mod commit;
pub mod tag;
pub mod version;

pub use commit::{CategorizedCommits, CommitCategory, CommitRecord};
pub use tag::TagPattern;
pub use version::{Version, VersionBump};
