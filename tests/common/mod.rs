//! Shared builders for integration tests.

use hlp_sim::config::HouseholdConfig;
use hlp_sim::sim::profile::BuiltinLoadProfile;

/// The fixed reference scenario: four residents, seed 1, hourly
/// hold-last output, no hot water, no per-device resolution.
pub fn reference_config() -> HouseholdConfig {
    let mut config = HouseholdConfig::default();
    config.household.residents = 4;
    config.household.seed = 1;
    config.output.freq = "60min".to_string();
    config.output.resample_mean = false;
    config.output.resolved_load = false;
    config.output.hot_water = false;
    config
}

/// Builds a household over the built-in engines.
pub fn profile_with(residents: usize, seed: u64) -> BuiltinLoadProfile {
    let mut config = HouseholdConfig::default();
    config.household.residents = residents;
    config.household.seed = seed;
    BuiltinLoadProfile::with_builtin(config).expect("config should be valid")
}
