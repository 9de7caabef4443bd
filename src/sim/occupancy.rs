//! Occupant activity simulation at ten-minute resolution.

use rand::{Rng, rngs::StdRng};

use crate::data::DataSource;
use crate::devices::OCC_SLOTS_PER_DAY;
use crate::sim::calendar::DayType;

/// One simulated day of occupant activity at ten-minute resolution.
#[derive(Debug, Clone)]
pub struct DailyOccupancy {
    /// Active-occupant count per ten-minute slot (144 values).
    pub occ_activity: Vec<f64>,
    /// Not-active occupant count per ten-minute slot (144 values).
    pub occ_no_activity: Vec<f64>,
}

impl DailyOccupancy {
    /// Returns the active-occupant count for a given minute of the day.
    pub fn active_at_minute(&self, minute: usize) -> f64 {
        let slot = minute / 10;
        self.occ_activity.get(slot).copied().unwrap_or(0.0)
    }
}

/// Simulates one day of occupant activity for a given day type.
///
/// The orchestrator only depends on this trait; the built-in model can
/// be swapped for a test double or a richer transition-matrix model.
pub trait OccupancySim {
    /// Produces the occupancy summary for one simulated day.
    fn run(&mut self, day_type: DayType, rng: &mut StdRng) -> DailyOccupancy;
}

/// Built-in activity-curve occupancy model.
///
/// Each resident is independently active in a ten-minute slot with the
/// hour-of-day probability from the calibration curve for the day type.
pub struct OccupancyModel {
    residents: usize,
    weekday_curve: [f64; 24],
    weekend_curve: [f64; 24],
}

impl OccupancyModel {
    /// Creates an occupancy model for the given number of residents,
    /// copying the activity curves out of the data source.
    pub fn new<D: DataSource>(residents: usize, data: &D) -> Self {
        Self {
            residents,
            weekday_curve: data.activity_curve(DayType::Weekday),
            weekend_curve: data.activity_curve(DayType::Weekend),
        }
    }

    /// Number of residents this model simulates.
    pub fn residents(&self) -> usize {
        self.residents
    }
}

impl OccupancySim for OccupancyModel {
    fn run(&mut self, day_type: DayType, rng: &mut StdRng) -> DailyOccupancy {
        let curve = match day_type {
            DayType::Weekday => &self.weekday_curve,
            DayType::Weekend => &self.weekend_curve,
        };

        let mut occ_activity = Vec::with_capacity(OCC_SLOTS_PER_DAY);
        let mut occ_no_activity = Vec::with_capacity(OCC_SLOTS_PER_DAY);
        for slot in 0..OCC_SLOTS_PER_DAY {
            let p = curve[slot / 6];
            let mut active = 0usize;
            for _ in 0..self.residents {
                if rng.random::<f64>() < p {
                    active += 1;
                }
            }
            occ_activity.push(active as f64);
            occ_no_activity.push((self.residents - active) as f64);
        }

        DailyOccupancy {
            occ_activity,
            occ_no_activity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::BuiltinData;
    use rand::SeedableRng;

    #[test]
    fn counts_partition_the_residents() {
        let mut model = OccupancyModel::new(4, &BuiltinData);
        let mut rng = StdRng::seed_from_u64(9);
        let day = model.run(DayType::Weekday, &mut rng);
        assert_eq!(day.occ_activity.len(), OCC_SLOTS_PER_DAY);
        assert_eq!(day.occ_no_activity.len(), OCC_SLOTS_PER_DAY);
        for slot in 0..OCC_SLOTS_PER_DAY {
            let total = day.occ_activity[slot] + day.occ_no_activity[slot];
            assert_eq!(total, 4.0, "slot {slot}");
            assert!(day.occ_activity[slot] >= 0.0);
        }
    }

    #[test]
    fn evenings_are_busier_than_deep_night() {
        let mut model = OccupancyModel::new(5, &BuiltinData);
        let mut rng = StdRng::seed_from_u64(10);
        let mut night = 0.0;
        let mut evening = 0.0;
        for _ in 0..50 {
            let day = model.run(DayType::Weekday, &mut rng);
            // Slots 12..24 cover 02:00-04:00, slots 114..126 cover 19:00-21:00.
            night += day.occ_activity[12..24].iter().sum::<f64>();
            evening += day.occ_activity[114..126].iter().sum::<f64>();
        }
        assert!(evening > night);
    }

    #[test]
    fn active_at_minute_maps_to_ten_minute_slot() {
        let day = DailyOccupancy {
            occ_activity: (0..OCC_SLOTS_PER_DAY).map(|s| s as f64).collect(),
            occ_no_activity: vec![0.0; OCC_SLOTS_PER_DAY],
        };
        assert_eq!(day.active_at_minute(0), 0.0);
        assert_eq!(day.active_at_minute(9), 0.0);
        assert_eq!(day.active_at_minute(10), 1.0);
        assert_eq!(day.active_at_minute(1439), 143.0);
        assert_eq!(day.active_at_minute(5000), 0.0);
    }
}
