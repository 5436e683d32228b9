//! Config loading entry point. Sources are applied in merge-policy order:
//! defaults, then the user file or an explicit file, then environment.

use crate::config::merge::merge_policy;
use crate::config::sources::{environment, explicit_file, global_file};
use crate::config::DeepwikiConfig;
use crate::error::ClientError;
use std::path::Path;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration. An explicit file replaces the user config file.
    pub fn load(explicit: Option<&Path>) -> Result<DeepwikiConfig, ClientError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = match explicit {
            Some(path) => explicit_file::add_to_builder(builder, path)?,
            None => global_file::add_to_builder(builder)?,
        };
        let builder = environment::add_to_builder(builder);

        let config: DeepwikiConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file (plus environment overrides).
    pub fn load_from_file(path: &Path) -> Result<DeepwikiConfig, ClientError> {
        Self::load(Some(path))
    }
}
