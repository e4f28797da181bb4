pub mod edit;
pub mod i18n;
pub mod normalize;
pub mod schema;
pub mod validate;
pub mod view;

use survey_spec::Catalog;

use crate::config::BuilderConfig;

/// Settings and messages shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct Context {
    pub config: BuilderConfig,
    pub catalog: Catalog,
}

impl Context {
    pub fn new(config: BuilderConfig, catalog: Catalog) -> Self {
        Self { config, catalog }
    }
}
