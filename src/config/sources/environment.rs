//! Environment source: DEEPWIKI_<SECTION>__<KEY>, e.g. DEEPWIKI_CLIENT__TIMEOUT_MS.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("DEEPWIKI")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    )
}
