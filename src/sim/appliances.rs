//! Appliance engine: ownership assignment and cycle-based demand.

use rand::rngs::StdRng;

use crate::config::{ConfigError, HouseholdConfig};
use crate::data::DataSource;
use crate::devices::{Appliance, Load, MINUTES_PER_DAY};
use crate::sim::SimDay;
use crate::sim::occupancy::DailyOccupancy;

/// Fraction of appliance consumption released into the room as heat.
const APPLIANCE_HEAT_FRACTION: f64 = 0.8;

/// Per-minute appliance output for one simulated day.
#[derive(Debug, Clone)]
pub struct DayAppliances {
    /// Total appliance consumption per minute (W).
    pub total_consumption: Vec<f64>,
    /// Total appliance heat gain per minute (W).
    pub total_heat_gain: Vec<f64>,
    /// Hot-water draw per minute (l/min), when enabled.
    pub total_hot_water: Option<Vec<f64>>,
    /// Per-owned-appliance day series in catalog order, when enabled.
    pub resolved: Vec<(String, Vec<f64>)>,
}

/// Simulates one day of appliance demand given the occupancy summary.
pub trait ApplianceSim {
    /// Produces the appliance consumption, heat-gain, and optional
    /// hot-water arrays for one day.
    fn run(&mut self, day: SimDay, occupancy: &DailyOccupancy, rng: &mut StdRng) -> DayAppliances;

    /// Keys of the owned appliances, in the order used by `resolved`.
    fn load_keys(&self) -> Vec<String>;
}

/// Built-in cycle-based appliance engine.
///
/// Ownership is assigned once at construction; only owned appliances
/// participate in the daily loop. Each owned appliance performs a
/// per-minute stochastic activation test whose modifier carries the
/// occupancy conditioning for occupancy-dependent types.
pub struct AppliancesModel {
    loads: Vec<Appliance>,
    get_hot_water: bool,
    collect_resolved: bool,
}

impl AppliancesModel {
    /// Builds the owned appliance set from the catalog.
    ///
    /// Weight and ownership draws both come from `rng`, which the
    /// caller seeds independently of the daily simulation stream so
    /// household composition is reproducible on its own.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if any catalog entry carries an
    /// ownership probability outside `[0, 1]`.
    pub fn new<D: DataSource>(
        data: &D,
        config: &HouseholdConfig,
        household_active: bool,
        rng: &mut StdRng,
    ) -> Result<Self, ConfigError> {
        let mut loads = Vec::new();
        for spec in data.appliance_specs() {
            if !(0.0..=1.0).contains(&spec.ownership_probability) {
                return Err(ConfigError {
                    field: format!("catalog.{}.ownership_probability", spec.key),
                    message: format!("must be in [0.0, 1.0], got {}", spec.ownership_probability),
                });
            }
            let mut appliance =
                Appliance::from_spec(&spec, config.calibration.appliance_scalar, rng);
            if appliance.set_ownership(rng, household_active) {
                loads.push(appliance);
            }
        }
        Ok(Self {
            loads,
            get_hot_water: config.output.hot_water,
            collect_resolved: config.output.resolved_load,
        })
    }

    /// Read access to the owned appliances.
    pub fn loads(&self) -> &[Appliance] {
        &self.loads
    }
}

impl ApplianceSim for AppliancesModel {
    fn run(&mut self, _day: SimDay, occupancy: &DailyOccupancy, rng: &mut StdRng) -> DayAppliances {
        for appliance in &mut self.loads {
            appliance.reset_day();
        }

        for minute in 0..MINUTES_PER_DAY {
            let active = occupancy.active_at_minute(minute);
            for appliance in &mut self.loads {
                let modifier = if appliance.occupancy_dependent {
                    active
                } else {
                    1.0
                };
                appliance.advance_minute(minute, modifier, rng);
            }
        }

        let mut total_consumption = vec![0.0; MINUTES_PER_DAY];
        let mut total_heat_gain = vec![0.0; MINUTES_PER_DAY];
        let mut total_hot_water = self.get_hot_water.then(|| vec![0.0; MINUTES_PER_DAY]);
        for appliance in &self.loads {
            for (minute, &w) in appliance.consumption().iter().enumerate() {
                total_consumption[minute] += w;
                total_heat_gain[minute] += w * APPLIANCE_HEAT_FRACTION;
            }
            if let Some(hot_water) = total_hot_water.as_mut()
                && appliance.hot_water_l_per_min > 0.0
            {
                for (minute, &on) in appliance.switched_on().iter().enumerate() {
                    hot_water[minute] += on * appliance.hot_water_l_per_min;
                }
            }
        }

        let resolved = if self.collect_resolved {
            self.loads
                .iter()
                .map(|a| (a.key().to_string(), a.consumption().to_vec()))
                .collect()
        } else {
            Vec::new()
        };

        DayAppliances {
            total_consumption,
            total_heat_gain,
            total_hot_water,
            resolved,
        }
    }

    fn load_keys(&self) -> Vec<String> {
        self.loads.iter().map(|a| a.key().to_string()).collect()
    }
}
