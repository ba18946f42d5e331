//! Content access, from a snapshot or from the live CMS.
//!
//! Exactly one strategy is picked per [`Site`](crate::Site), from the
//! configured [`Mode`]. Neither strategy ever fails outward: errors are
//! logged and surface as `None` or an empty list, which the pages render as
//! "nothing here".

#[cfg(feature = "live")]
mod api;
mod snapshot;

#[cfg(feature = "live")]
pub use api::{ApiSource, RawSnapshot};
pub use snapshot::SnapshotSource;

use tracing::info;

use crate::config::{Config, Mode};
use crate::error::ConfigError;
use crate::model::{AboutPage, Project};

/// Read access to the site's content.
pub trait ContentSource: Send + Sync {
    /// The about page, `None` when unavailable.
    fn get_about(&self) -> Option<AboutPage>;

    /// Every project, newest year first. Empty when unavailable.
    fn list_projects(&self) -> Vec<Project>;

    /// The project with the given slug, `None` when missing or unavailable.
    fn get_project_by_slug(&self, slug: &str) -> Option<Project>;
}

/// Build the strategy selected by `config.mode`.
pub fn from_config(config: &Config) -> Result<Box<dyn ContentSource>, ConfigError> {
    info!(mode = %config.mode, "selecting content source");

    match config.mode {
        Mode::Static => Ok(Box::new(SnapshotSource::new(config.snapshot.clone()))),
        #[cfg(feature = "live")]
        Mode::Live => Ok(Box::new(ApiSource::new(&config.api_base)?)),
        #[cfg(not(feature = "live"))]
        Mode::Live => Err(ConfigError::LiveUnavailable),
    }
}
