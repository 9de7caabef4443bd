//! Calibration-data source abstraction and built-in tables.

use crate::devices::ApplianceSpec;
use crate::devices::MINUTES_PER_DAY;
use crate::sim::calendar::DayType;

/// Source of the calibration tables and weather series consumed by the
/// behavioral engines.
///
/// The built-in implementation compiles the tables in; alternative
/// sources (measured weather, derived catalogs) implement the same
/// trait. File and format handling is deliberately out of scope here.
pub trait DataSource {
    /// Rated powers of the household's bulb stock (W).
    fn bulb_ratings(&self) -> Vec<f64>;

    /// The appliance catalog with ownership and cycle calibration.
    fn appliance_specs(&self) -> Vec<ApplianceSpec>;

    /// Hourly probability that an individual occupant is active, per
    /// day type (24 values).
    fn activity_curve(&self, day_type: DayType) -> [f64; 24];

    /// Global horizontal irradiance for the given 1-based day of year,
    /// one value per minute (W/m²).
    fn irradiance_profile(&self, day_in_year: u32) -> Vec<f64>;
}

/// Built-in calibration tables with a clear-sky irradiance model.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinData;

/// Bulb stock of a typical dwelling (rated W per fitting).
const BULB_RATINGS: [f64; 10] = [60.0, 60.0, 40.0, 40.0, 25.0, 75.0, 60.0, 11.0, 11.0, 100.0];

/// Appliance catalog: key, rating W, standby W, ownership probability,
/// occupancy-dependent, cycle minutes, restart delay minutes, hot-water
/// liters per minute.
const APPLIANCE_CATALOG: [ApplianceSpec; 12] = [
    ApplianceSpec {
        key: "chest_freezer",
        rating_w: 190.0,
        standby_w: 0.0,
        ownership_probability: 0.30,
        occupancy_dependent: false,
        cycle_length_min: 14,
        restart_delay_min: 28,
        hot_water_l_per_min: 0.0,
    },
    ApplianceSpec {
        key: "fridge_freezer",
        rating_w: 190.0,
        standby_w: 0.0,
        ownership_probability: 0.65,
        occupancy_dependent: false,
        cycle_length_min: 16,
        restart_delay_min: 26,
        hot_water_l_per_min: 0.0,
    },
    ApplianceSpec {
        key: "refrigerator",
        rating_w: 110.0,
        standby_w: 0.0,
        ownership_probability: 0.45,
        occupancy_dependent: false,
        cycle_length_min: 14,
        restart_delay_min: 30,
        hot_water_l_per_min: 0.0,
    },
    ApplianceSpec {
        key: "washing_machine",
        rating_w: 2000.0,
        standby_w: 1.0,
        ownership_probability: 0.95,
        occupancy_dependent: true,
        cycle_length_min: 75,
        restart_delay_min: 600,
        hot_water_l_per_min: 8.0,
    },
    ApplianceSpec {
        key: "dishwasher",
        rating_w: 1700.0,
        standby_w: 1.0,
        ownership_probability: 0.65,
        occupancy_dependent: true,
        cycle_length_min: 90,
        restart_delay_min: 720,
        hot_water_l_per_min: 6.0,
    },
    ApplianceSpec {
        key: "tumble_dryer",
        rating_w: 2500.0,
        standby_w: 1.0,
        ownership_probability: 0.42,
        occupancy_dependent: true,
        cycle_length_min: 60,
        restart_delay_min: 900,
        hot_water_l_per_min: 0.0,
    },
    ApplianceSpec {
        key: "electric_oven",
        rating_w: 2100.0,
        standby_w: 2.0,
        ownership_probability: 0.60,
        occupancy_dependent: true,
        cycle_length_min: 45,
        restart_delay_min: 480,
        hot_water_l_per_min: 0.0,
    },
    ApplianceSpec {
        key: "microwave",
        rating_w: 1200.0,
        standby_w: 2.0,
        ownership_probability: 0.86,
        occupancy_dependent: true,
        cycle_length_min: 5,
        restart_delay_min: 120,
        hot_water_l_per_min: 0.0,
    },
    ApplianceSpec {
        key: "kettle",
        rating_w: 2200.0,
        standby_w: 0.0,
        ownership_probability: 0.98,
        occupancy_dependent: true,
        cycle_length_min: 3,
        restart_delay_min: 45,
        hot_water_l_per_min: 0.0,
    },
    ApplianceSpec {
        key: "tv",
        rating_w: 120.0,
        standby_w: 3.0,
        ownership_probability: 0.98,
        occupancy_dependent: true,
        cycle_length_min: 110,
        restart_delay_min: 30,
        hot_water_l_per_min: 0.0,
    },
    ApplianceSpec {
        key: "vacuum",
        rating_w: 1200.0,
        standby_w: 0.0,
        ownership_probability: 0.94,
        occupancy_dependent: true,
        cycle_length_min: 20,
        restart_delay_min: 1200,
        hot_water_l_per_min: 0.0,
    },
    ApplianceSpec {
        key: "iron",
        rating_w: 1000.0,
        standby_w: 0.0,
        ownership_probability: 0.90,
        occupancy_dependent: true,
        cycle_length_min: 25,
        restart_delay_min: 1380,
        hot_water_l_per_min: 0.0,
    },
];

/// Hourly individual-activity probabilities for working days.
const ACTIVITY_WEEKDAY: [f64; 24] = [
    0.02, 0.01, 0.01, 0.01, 0.02, 0.08, 0.35, 0.55, 0.40, 0.22, 0.18, 0.20, //
    0.25, 0.20, 0.18, 0.22, 0.35, 0.55, 0.70, 0.72, 0.65, 0.50, 0.25, 0.08,
];

/// Hourly individual-activity probabilities for weekend days.
const ACTIVITY_WEEKEND: [f64; 24] = [
    0.03, 0.02, 0.01, 0.01, 0.01, 0.02, 0.08, 0.20, 0.42, 0.55, 0.50, 0.48, //
    0.52, 0.45, 0.40, 0.42, 0.48, 0.58, 0.68, 0.70, 0.62, 0.48, 0.28, 0.10,
];

impl DataSource for BuiltinData {
    fn bulb_ratings(&self) -> Vec<f64> {
        BULB_RATINGS.to_vec()
    }

    fn appliance_specs(&self) -> Vec<ApplianceSpec> {
        APPLIANCE_CATALOG.to_vec()
    }

    fn activity_curve(&self, day_type: DayType) -> [f64; 24] {
        match day_type {
            DayType::Weekday => ACTIVITY_WEEKDAY,
            DayType::Weekend => ACTIVITY_WEEKEND,
        }
    }

    fn irradiance_profile(&self, day_in_year: u32) -> Vec<f64> {
        clear_sky_irradiance(day_in_year)
    }
}

/// Clear-sky GHI model: a cosine arc around solar noon whose width and
/// peak follow the season (longest, brightest days at midsummer).
fn clear_sky_irradiance(day_in_year: u32) -> Vec<f64> {
    // +1 at the June solstice (day 172), -1 midwinter.
    let season = (2.0 * std::f64::consts::PI * (f64::from(day_in_year) - 172.0) / 365.25).cos();
    let half_day_min = 360.0 + 120.0 * season;
    let peak_wm2 = 450.0 + 350.0 * season;

    let mut profile = Vec::with_capacity(MINUTES_PER_DAY);
    for minute in 0..MINUTES_PER_DAY {
        let from_noon = (minute as f64 - 720.0).abs();
        let irr = if from_noon < half_day_min {
            peak_wm2 * (std::f64::consts::FRAC_PI_2 * from_noon / half_day_min).cos()
        } else {
            0.0
        };
        profile.push(irr);
    }
    profile
}
