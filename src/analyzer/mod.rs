//! Analysis engine: history collection and next-version planning

pub mod history;
pub mod version_planner;

pub use history::{collect_commits, latest_release, LatestRelease};
pub use version_planner::{decide_bump, plan, ReleasePlan};
