//! Annual simulation orchestrator.
//!
//! Drives one household through every calendar day of a target year,
//! applies the seasonal correction, accumulates the results at two
//! time granularities, and re-indexes them onto the requested output
//! frequency.

use chrono::NaiveDate;
use rand::{SeedableRng, rngs::StdRng};

use crate::config::{ConfigError, HouseholdConfig};
use crate::data::BuiltinData;
use crate::devices::{MINUTES_PER_DAY, OCC_SLOTS_PER_DAY};
use crate::sim::SimDay;
use crate::sim::appliances::{ApplianceSim, AppliancesModel};
use crate::sim::calendar::{
    DayType, HOT_WATER_CORRECTION, day_type, days_in_year, seasonal_factor,
};
use crate::sim::lighting::{LightingModel, LightingSim};
use crate::sim::occupancy::{DailyOccupancy, OccupancyModel, OccupancySim};
use crate::sim::resample::{ProfileTable, ResamplePolicy, parse_freq, resample};

/// Seed offset for the one-time setup RNG (device weights, ownership)
/// to decorrelate it from the daily simulation stream.
const SETUP_SEED_OFFSET: u64 = 31;

/// Transient output of a single simulated day.
#[derive(Debug, Clone)]
pub struct DayResult {
    /// Combined appliance and lighting consumption per minute (W).
    pub total_consumption: Vec<f64>,
    /// Combined appliance and lighting heat gain per minute (W).
    pub total_heat_gain: Vec<f64>,
    /// Hot-water draw per minute (l/min), when enabled.
    pub total_hot_water: Option<Vec<f64>>,
    /// Lighting-only consumption per minute (W).
    pub lighting_consumption: Vec<f64>,
    /// Occupancy summary at ten-minute resolution.
    pub occupancy: DailyOccupancy,
    /// Per-owned-appliance day series, when resolved output is enabled.
    pub resolved: Vec<(String, Vec<f64>)>,
}

/// Per-device annual breakdown, materialized only on request.
#[derive(Debug, Clone)]
pub struct ResolvedLoads {
    /// Column names: one per owned appliance plus `LIGHTS`.
    pub names: Vec<String>,
    /// Annual 1-minute series per column, same order as `names`.
    pub series: Vec<Vec<f64>>,
}

/// Full-year accumulators at 1-minute and 10-minute resolution.
#[derive(Debug, Clone)]
pub struct AnnualSeries {
    /// Seasonally corrected total load (W), `1440 × days` values.
    pub total_load: Vec<f64>,
    /// Seasonally corrected total heat gain (W), `1440 × days` values.
    pub app_heat_gain: Vec<f64>,
    /// Active-occupant counts, `144 × days` values, not corrected.
    pub occ_active: Vec<f64>,
    /// Not-active occupant counts, `144 × days` values, not corrected.
    pub occ_not_active: Vec<f64>,
    /// Hot-water draw (l/min), `1440 × days` values, when enabled.
    pub hot_water: Option<Vec<f64>>,
    /// Seasonally corrected lighting-only load (W).
    pub light: Vec<f64>,
    /// Per-device breakdown, when resolved output is enabled.
    pub resolved: Option<ResolvedLoads>,
}

/// Annual load-profile orchestrator for one simulated household.
///
/// Generic over the three collaborator engines for static dispatch, so
/// tests can substitute counting or canned doubles. One instance
/// corresponds to exactly one household; all randomness flows through
/// the instance's own seeded generator.
pub struct LoadProfile<O: OccupancySim, L: LightingSim, A: ApplianceSim> {
    config: HouseholdConfig,
    occupancy: O,
    lighting: L,
    appliances: A,
    rng: StdRng,
    cache: Option<(i32, AnnualSeries)>,
}

/// The orchestrator wired to the built-in engines.
pub type BuiltinLoadProfile = LoadProfile<OccupancyModel, LightingModel<BuiltinData>, AppliancesModel>;

impl BuiltinLoadProfile {
    /// Builds a household with the built-in occupancy, lighting, and
    /// appliance engines over the compiled-in calibration tables.
    ///
    /// Device weights and ownership are drawn here, from a dedicated
    /// stream derived from the master seed, before any day is
    /// simulated.
    ///
    /// # Errors
    ///
    /// Returns the first configuration error, before any simulation.
    pub fn with_builtin(config: HouseholdConfig) -> Result<Self, ConfigError> {
        if let Some(e) = config.validate().into_iter().next() {
            return Err(e);
        }
        let data = BuiltinData;
        let mut setup_rng =
            StdRng::seed_from_u64(config.household.seed.wrapping_add(SETUP_SEED_OFFSET));
        let occupancy = OccupancyModel::new(config.household.residents, &data);
        let lighting = LightingModel::new(&config.calibration, data, &mut setup_rng);
        let appliances =
            AppliancesModel::new(&data, &config, config.household.residents > 0, &mut setup_rng)?;
        Self::new(config, occupancy, lighting, appliances)
    }
}

impl<O: OccupancySim, L: LightingSim, A: ApplianceSim> LoadProfile<O, L, A> {
    /// Creates an orchestrator over pre-built collaborator engines.
    ///
    /// # Errors
    ///
    /// Returns the first configuration error (invalid resident count,
    /// malformed frequency, non-positive calibration scalar) before
    /// any simulation runs.
    pub fn new(
        config: HouseholdConfig,
        occupancy: O,
        lighting: L,
        appliances: A,
    ) -> Result<Self, ConfigError> {
        if let Some(e) = config.validate().into_iter().next() {
            return Err(e);
        }
        let rng = StdRng::seed_from_u64(config.household.seed);
        Ok(Self {
            config,
            occupancy,
            lighting,
            appliances,
            rng,
            cache: None,
        })
    }

    /// Returns a reference to the configuration.
    pub fn config(&self) -> &HouseholdConfig {
        &self.config
    }

    /// Runs exactly one simulated day.
    ///
    /// Invokes occupancy, then lighting, then appliances, in that
    /// dependency order, and combines their outputs. Side effects are
    /// confined to this call's transient buffers; nothing is appended
    /// to the annual accumulators.
    pub fn run(&mut self, year: i32, day_type: DayType, day_in_year: u32) -> DayResult {
        debug_assert!(day_in_year >= 1, "day_in_year is 1-based");
        let day = SimDay {
            year,
            day_type,
            day_in_year,
        };
        let occupancy = self.occupancy.run(day_type, &mut self.rng);
        let lighting = self.lighting.run(day, &occupancy, &mut self.rng);
        let appliances = self.appliances.run(day, &occupancy, &mut self.rng);

        let total_consumption: Vec<f64> = appliances
            .total_consumption
            .iter()
            .zip(&lighting.total_consumption)
            .map(|(a, l)| a + l)
            .collect();
        let total_heat_gain: Vec<f64> = appliances
            .total_heat_gain
            .iter()
            .zip(&lighting.total_heat_gain)
            .map(|(a, l)| a + l)
            .collect();

        DayResult {
            total_consumption,
            total_heat_gain,
            total_hot_water: appliances.total_hot_water,
            lighting_consumption: lighting.total_consumption,
            occupancy,
            resolved: appliances.resolved,
        }
    }

    /// Runs every calendar day of `year` and accumulates the annual
    /// series.
    ///
    /// Weekday/weekend classification follows the target year's real
    /// calendar. Consumption and heat gain are scaled by the seasonal
    /// polynomial factor of the day; hot water by the fixed correction
    /// constant; occupancy is accumulated unscaled. A repeat call for
    /// the cached year is a no-op; a different year recomputes from
    /// scratch and discards the previous result.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if `year` falls outside the supported
    /// calendar range.
    pub fn run_for_year(&mut self, year: i32) -> Result<&AnnualSeries, ConfigError> {
        if self.cache.as_ref().map(|(y, _)| *y) != Some(year) {
            let series = self.compute_year(year)?;
            self.cache = Some((year, series));
        }
        let Some((_, series)) = self.cache.as_ref() else {
            unreachable!("cache is populated above")
        };
        Ok(series)
    }

    fn compute_year(&mut self, year: i32) -> Result<AnnualSeries, ConfigError> {
        let n_days = days_in_year(year) as usize;
        let mut total_load = vec![0.0; MINUTES_PER_DAY * n_days];
        let mut app_heat_gain = vec![0.0; MINUTES_PER_DAY * n_days];
        let mut light = vec![0.0; MINUTES_PER_DAY * n_days];
        let mut occ_active = vec![0.0; OCC_SLOTS_PER_DAY * n_days];
        let mut occ_not_active = vec![0.0; OCC_SLOTS_PER_DAY * n_days];
        let mut hot_water = self
            .config
            .output
            .hot_water
            .then(|| vec![0.0; MINUTES_PER_DAY * n_days]);
        let mut resolved = if self.config.output.resolved_load {
            let mut names = self.appliances.load_keys();
            names.push("LIGHTS".to_string());
            let series = vec![vec![0.0; MINUTES_PER_DAY * n_days]; names.len()];
            Some(ResolvedLoads { names, series })
        } else {
            None
        };

        for ii in 0..n_days {
            let day_in_year = ii as u32 + 1;
            let date = NaiveDate::from_yo_opt(year, day_in_year).ok_or_else(|| ConfigError {
                field: "year".to_string(),
                message: format!("year {year} is outside the supported calendar range"),
            })?;
            let f = seasonal_factor(day_in_year);
            let day = self.run(year, day_type(date), day_in_year);

            let minutes = MINUTES_PER_DAY * ii..MINUTES_PER_DAY * (ii + 1);
            let slots = OCC_SLOTS_PER_DAY * ii..OCC_SLOTS_PER_DAY * (ii + 1);

            scale_into(&mut total_load[minutes.clone()], &day.total_consumption, f);
            scale_into(&mut app_heat_gain[minutes.clone()], &day.total_heat_gain, f);
            scale_into(&mut light[minutes.clone()], &day.lighting_consumption, f);
            if let (Some(annual), Some(daily)) = (hot_water.as_mut(), day.total_hot_water.as_ref())
            {
                scale_into(&mut annual[minutes.clone()], daily, HOT_WATER_CORRECTION);
            }
            occ_active[slots.clone()].copy_from_slice(&day.occupancy.occ_activity);
            occ_not_active[slots].copy_from_slice(&day.occupancy.occ_no_activity);

            if let Some(resolved) = resolved.as_mut() {
                for (column, (_, daily)) in resolved.series.iter_mut().zip(&day.resolved) {
                    scale_into(&mut column[minutes.clone()], daily, f);
                }
                if let Some(lights_column) = resolved.series.last_mut() {
                    scale_into(
                        &mut lights_column[minutes.clone()],
                        &day.lighting_consumption,
                        f,
                    );
                }
            }
        }

        Ok(AnnualSeries {
            total_load,
            app_heat_gain,
            occ_active,
            occ_not_active,
            hot_water,
            light,
            resolved,
        })
    }

    /// Re-indexes the cached annual series onto the configured output
    /// frequency, computing the year first if it is not cached.
    ///
    /// Non-resolved output carries the columns `Load`, `AppHeatGain`,
    /// `OccActive`, `OccNotActive`, plus `HotWater` when enabled; the
    /// occupancy series are truncated to integers before resampling,
    /// and the hot-water column always uses hold-last re-indexing.
    /// Resolved output carries one column per owned appliance plus
    /// `LIGHTS`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for a malformed output frequency or an
    /// out-of-range year.
    pub fn get_rescheduled_profiles(&mut self, year: i32) -> Result<ProfileTable, ConfigError> {
        let freq_min = parse_freq(&self.config.output.freq)?;
        let policy = if self.config.output.resample_mean {
            ResamplePolicy::Mean
        } else {
            ResamplePolicy::HoldLast
        };
        self.run_for_year(year)?;
        let Some((_, series)) = self.cache.as_ref() else {
            unreachable!("run_for_year populates the cache")
        };

        let mut table = ProfileTable::new(freq_min);
        if let Some(resolved) = series.resolved.as_ref() {
            for (name, column) in resolved.names.iter().zip(&resolved.series) {
                table.push_column(name, resample(column, 1, freq_min, policy))?;
            }
        } else {
            table.push_column("Load", resample(&series.total_load, 1, freq_min, policy))?;
            table.push_column(
                "AppHeatGain",
                resample(&series.app_heat_gain, 1, freq_min, policy),
            )?;
            table.push_column(
                "OccActive",
                resample(&truncate_to_int(&series.occ_active), 10, freq_min, policy),
            )?;
            table.push_column(
                "OccNotActive",
                resample(
                    &truncate_to_int(&series.occ_not_active),
                    10,
                    freq_min,
                    policy,
                ),
            )?;
            if let Some(hot_water) = series.hot_water.as_ref() {
                // Hot water keeps point-in-time semantics under either policy.
                table.push_column(
                    "HotWater",
                    resample(hot_water, 1, freq_min, ResamplePolicy::HoldLast),
                )?;
            }
        }
        Ok(table)
    }
}

fn scale_into(dst: &mut [f64], src: &[f64], factor: f64) {
    for (d, s) in dst.iter_mut().zip(src) {
        *d = s * factor;
    }
}

fn truncate_to_int(values: &[f64]) -> Vec<f64> {
    values.iter().map(|v| v.trunc()).collect()
}
