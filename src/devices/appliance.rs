use rand::{Rng, rngs::StdRng};

use super::types::{Load, MINUTES_PER_DAY, draw_activation_weight};

/// Static description of an appliance type in the calibration catalog.
#[derive(Debug, Clone, Copy)]
pub struct ApplianceSpec {
    /// Unique catalog key.
    pub key: &'static str,
    /// Rated power draw while running (W).
    pub rating_w: f64,
    /// Standby power draw while idle (W).
    pub standby_w: f64,
    /// Probability that a household owns this appliance type, in [0, 1].
    pub ownership_probability: f64,
    /// Whether ownership and activation depend on occupant activity.
    pub occupancy_dependent: bool,
    /// Mean running-cycle length in minutes.
    pub cycle_length_min: usize,
    /// Minimum idle time after a cycle before the next switch-on test.
    pub restart_delay_min: usize,
    /// Hot-water draw while running (liters per minute, 0 for none).
    pub hot_water_l_per_min: f64,
}

/// A cycle-based household appliance.
///
/// An appliance is constructed once per household-simulation instance.
/// Ownership is decided by a single memoized probability draw; the
/// activation weight is drawn once at construction. Both stay fixed for
/// the appliance's lifetime, while the per-day consumption series is
/// reset and refilled every simulated day.
#[derive(Debug, Clone)]
pub struct Appliance {
    key: String,

    /// Rated power draw while running (W).
    pub rating_w: f64,
    /// Standby power draw while idle (W).
    pub standby_w: f64,
    /// Per-appliance activation weight, drawn once at construction.
    pub weight: f64,
    /// Whether activation requires occupant activity.
    pub occupancy_dependent: bool,
    /// Hot-water draw while running (liters per minute).
    pub hot_water_l_per_min: f64,

    ownership_probability: f64,
    cycle_length_min: usize,
    restart_delay_min: usize,

    owned: Option<bool>,
    cycle_remaining: usize,
    delay_remaining: usize,
    consumption: Vec<f64>,
    switched_on: Vec<f64>,
}

impl Appliance {
    /// Creates an appliance from a catalog entry, drawing its activation
    /// weight from `rng`.
    pub fn from_spec(spec: &ApplianceSpec, calibration: f64, rng: &mut StdRng) -> Self {
        Self {
            key: spec.key.to_uppercase(),
            rating_w: spec.rating_w,
            standby_w: spec.standby_w,
            weight: draw_activation_weight(rng, calibration),
            occupancy_dependent: spec.occupancy_dependent,
            hot_water_l_per_min: spec.hot_water_l_per_min,
            ownership_probability: spec.ownership_probability,
            cycle_length_min: spec.cycle_length_min,
            restart_delay_min: spec.restart_delay_min,
            owned: None,
            cycle_remaining: 0,
            delay_remaining: 0,
            consumption: vec![0.0; MINUTES_PER_DAY],
            switched_on: vec![0.0; MINUTES_PER_DAY],
        }
    }

    /// Decides whether this household owns the appliance.
    ///
    /// Draws `U ~ Uniform[0, 1)` and compares it against the configured
    /// ownership probability. Occupancy-dependent types additionally
    /// require the household to have any occupancy-active period at all
    /// (`household_active`, supplied by the caller). The result is
    /// memoized: repeat calls return the first decision without a new
    /// draw.
    pub fn set_ownership(&mut self, rng: &mut StdRng, household_active: bool) -> bool {
        if let Some(owned) = self.owned {
            return owned;
        }
        let u: f64 = rng.random();
        let threshold_met = u < self.ownership_probability;
        let owned = if self.occupancy_dependent {
            household_active && threshold_met
        } else {
            threshold_met
        };
        self.owned = Some(owned);
        owned
    }

    /// Returns the memoized ownership decision (false if not yet drawn).
    pub fn is_owned(&self) -> bool {
        self.owned.unwrap_or(false)
    }

    /// Advances the appliance by one minute of the simulated day.
    ///
    /// A running cycle continues at rated power until it completes, then
    /// the restart delay counts down at standby power. Once idle, a
    /// stochastic switch-on test fires with probability
    /// `weight * modifier` (capped at 1); `modifier` carries the
    /// occupancy conditioning supplied by the appliance engine and a
    /// value of 0 suppresses activation entirely.
    pub fn advance_minute(&mut self, minute: usize, modifier: f64, rng: &mut StdRng) {
        if minute >= MINUTES_PER_DAY {
            return;
        }
        if self.cycle_remaining > 0 {
            self.switch_on(minute);
            self.cycle_remaining -= 1;
            if self.cycle_remaining == 0 {
                self.delay_remaining = self.restart_delay_min;
            }
            return;
        }
        if self.delay_remaining > 0 {
            self.delay_remaining -= 1;
            self.consumption[minute] = self.standby_w;
            return;
        }
        let p = (self.weight * modifier).min(1.0);
        if modifier > 0.0 && rng.random::<f64>() < p {
            self.switch_on(minute);
            if self.cycle_length_min > 1 {
                self.cycle_remaining = self.cycle_length_min - 1;
            } else {
                self.delay_remaining = self.restart_delay_min;
            }
        } else {
            self.consumption[minute] = self.standby_w;
        }
    }

    /// Returns the parallel switched-on indicator series (0 or 1 per minute).
    pub fn switched_on(&self) -> &[f64] {
        &self.switched_on
    }
}

impl Load for Appliance {
    fn key(&self) -> &str {
        &self.key
    }

    fn rating_w(&self) -> f64 {
        self.rating_w
    }

    fn consumption(&self) -> &[f64] {
        &self.consumption
    }

    fn switch_on(&mut self, minute: usize) {
        if minute < MINUTES_PER_DAY {
            self.consumption[minute] = self.rating_w;
            self.switched_on[minute] = 1.0;
        }
    }

    fn reset_day(&mut self) {
        self.consumption.fill(0.0);
        self.switched_on.fill(0.0);
        self.cycle_remaining = 0;
        self.delay_remaining = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn spec(probability: f64, occupancy_dependent: bool) -> ApplianceSpec {
        ApplianceSpec {
            key: "washing_machine",
            rating_w: 2000.0,
            standby_w: 1.0,
            ownership_probability: probability,
            occupancy_dependent,
            cycle_length_min: 75,
            restart_delay_min: 600,
            hot_water_l_per_min: 8.0,
        }
    }

    #[test]
    fn ownership_probability_zero_never_owned() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1_000 {
            let mut app = Appliance::from_spec(&spec(0.0, false), 0.02, &mut rng);
            assert!(!app.set_ownership(&mut rng, true));
        }
    }

    #[test]
    fn ownership_probability_one_always_owned() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..1_000 {
            let mut app = Appliance::from_spec(&spec(1.0, false), 0.02, &mut rng);
            assert!(app.set_ownership(&mut rng, true));
        }
    }

    #[test]
    fn ownership_is_memoized() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut app = Appliance::from_spec(&spec(0.5, false), 0.02, &mut rng);
        let first = app.set_ownership(&mut rng, true);
        for _ in 0..100 {
            assert_eq!(app.set_ownership(&mut rng, true), first);
        }
    }

    #[test]
    fn occupancy_dependent_requires_active_household() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut app = Appliance::from_spec(&spec(1.0, true), 0.02, &mut rng);
        assert!(!app.set_ownership(&mut rng, false));
    }

    #[test]
    fn cycle_runs_to_completion_then_waits() {
        let mut rng = StdRng::seed_from_u64(5);
        let s = ApplianceSpec {
            cycle_length_min: 3,
            restart_delay_min: 5,
            ..spec(1.0, false)
        };
        let mut app = Appliance::from_spec(&s, 0.02, &mut rng);
        // Force a switch-on, then advance with activation suppressed.
        app.switch_on(0);
        app.cycle_remaining = 2;
        for minute in 1..10 {
            app.advance_minute(minute, 0.0, &mut rng);
        }
        assert_eq!(app.consumption()[0], 2000.0);
        assert_eq!(app.consumption()[1], 2000.0);
        assert_eq!(app.consumption()[2], 2000.0);
        // Restart delay at standby power, no re-activation.
        for minute in 3..10 {
            assert_eq!(app.consumption()[minute], 1.0, "minute {minute}");
        }
    }

    #[test]
    fn zero_modifier_suppresses_activation() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut app = Appliance::from_spec(&spec(1.0, true), 10.0, &mut rng);
        for minute in 0..MINUTES_PER_DAY {
            app.advance_minute(minute, 0.0, &mut rng);
        }
        assert!(app.switched_on().iter().all(|&v| v == 0.0));
        assert!(app.consumption().iter().all(|&v| v == 1.0));
    }

    #[test]
    fn advance_minute_out_of_range_is_a_no_op() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut app = Appliance::from_spec(&spec(1.0, false), 0.02, &mut rng);
        app.advance_minute(MINUTES_PER_DAY, 1.0, &mut rng);
        assert!(app.consumption().iter().all(|&v| v == 0.0));
    }
}
