pub mod core;
pub mod loader;
pub mod validation;

pub use self::core::{CouplingConfig, IgnoreConfig, MetricsConfig, ScopeConfig};
pub use loader::{
    directory_ancestors, find_config, load_config, load_config_from, parse_and_validate_config,
};
pub use validation::validate_config;

/// File name searched for in the working directory and its ancestors.
pub const CONFIG_FILE_NAME: &str = ".couplingmap.toml";

/// Commented default configuration written by `couplingmap init`.
pub fn default_config_template() -> crate::core::Result<String> {
    let body = toml::to_string_pretty(&CouplingConfig::default())
        .map_err(|e| crate::core::Error::configuration(e.to_string()))?;
    Ok(format!(
        "# Couplingmap Configuration\n\
         #\n\
         # scope.whitelist: packages or types that always count as project code\n\
         # metrics.compiled / metrics.source: call, field, import, inheritance,\n\
         #   package, structural_debt\n\n{body}"
    ))
}
