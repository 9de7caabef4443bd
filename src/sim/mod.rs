//! Simulation engines and annual aggregation.

/// Cycle-based appliance engine.
pub mod appliances;
/// Calendar classification and seasonal correction.
pub mod calendar;
/// Irradiance-gated lighting engine.
pub mod lighting;
pub mod occupancy;
/// Annual orchestrator tying the engines together.
pub mod profile;
pub mod resample;

use calendar::DayType;

/// Identifies one simulated day within a year.
#[derive(Debug, Clone, Copy)]
pub struct SimDay {
    /// Calendar year being simulated.
    pub year: i32,
    /// Weekday/weekend classification.
    pub day_type: DayType,
    /// 1-based day of year.
    pub day_in_year: u32,
}
