//! Subcommand implementations

pub(crate) mod browse;
pub(crate) mod check;
pub(crate) mod home;
pub(crate) mod options;
pub(crate) mod recommend;

use dinerec::config::{ArtifactConfig, RecommenderConfig};
use dinerec::loading::AppContext;
use tracing::debug;

use crate::error::Result;

/// Settings shared by every subcommand, after config file and flags merge.
#[derive(Debug, Clone, Default)]
pub(crate) struct Settings {
    pub(crate) artifacts: ArtifactConfig,
    pub(crate) recommender: RecommenderConfig,
    pub(crate) json: bool,
    pub(crate) quiet: bool,
}

impl Settings {
    /// Load the artifacts this invocation points at
    pub(crate) fn load_context(&self) -> Result<AppContext> {
        debug!(data_dir = %self.artifacts.data_dir.display(), "loading artifacts");
        Ok(AppContext::load(&self.artifacts)?)
    }
}
