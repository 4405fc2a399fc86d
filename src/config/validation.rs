use super::core::CouplingConfig;
use crate::analysis::plan::MetricPlan;
use crate::core::{Error, Result};

/// Reject configurations that cannot produce a meaningful run.
///
/// Runs before any extraction starts.
pub fn validate_config(config: &CouplingConfig) -> Result<()> {
    let metrics = &config.metrics;
    if metrics.compiled.is_empty() && metrics.source.is_empty() {
        return Err(Error::configuration(
            "no coupling kind selected for either representation",
        ));
    }

    MetricPlan::new(&metrics.compiled, metrics.derive_package_for_debt)?;
    MetricPlan::new(&metrics.source, metrics.derive_package_for_debt)?;

    if let Some(index) = config
        .ignore
        .rules
        .iter()
        .position(|rule| rule.is_unconstrained())
    {
        return Err(Error::configuration(format!(
            "ignore rule #{index} sets no criterion"
        )));
    }

    if config.scope.whitelist.iter().any(|name| name.trim().is_empty()) {
        return Err(Error::configuration("whitelist contains an empty entry"));
    }

    Ok(())
}
