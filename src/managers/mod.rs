pub mod hotspots;
pub mod issues;
pub mod projects;
pub mod quality_gates;

pub use hotspots::HotspotsManager;
pub use issues::IssuesManager;
pub use projects::ProjectsManager;
pub use quality_gates::QualityGatesManager;

/// Upper bound SonarCloud accepts for `ps`/`pageSize`.
pub(crate) const MAX_PAGE_SIZE: u32 = 500;

pub(crate) fn default_page() -> u32 {
    crate::constants::pagination::DEFAULT_PAGE_INDEX
}

pub(crate) fn default_page_size() -> u32 {
    crate::constants::pagination::DEFAULT_PAGE_SIZE
}
