use rand::rngs::StdRng;

use super::types::{Load, MINUTES_PER_DAY, draw_activation_weight};

/// Fraction of a bulb's electrical draw released into the room as heat.
const BULB_HEAT_GAIN: f64 = 0.97;

/// A single light bulb with a stochastic switch-on propensity.
///
/// Each bulb draws an activation weight once at construction; a larger
/// weight makes this particular bulb more likely to be switched on in
/// any given minute. The weight models inter-device variability and is
/// fixed for the bulb's lifetime.
///
/// # Examples
///
/// ```
/// use rand::{SeedableRng, rngs::StdRng};
/// use hlp_sim::devices::{Bulb, Load};
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let mut bulb = Bulb::new("bulb_0", 60.0, 0.008, &mut rng);
/// bulb.switch_on(0);
/// assert_eq!(bulb.consumption()[0], 60.0);
/// ```
#[derive(Debug, Clone)]
pub struct Bulb {
    key: String,

    /// Rated power draw in watts.
    pub rating_w: f64,

    /// Per-bulb activation weight, drawn once at construction.
    pub weight: f64,

    /// Fraction of the electrical draw converted to a heat gain.
    pub heat_gain: f64,

    consumption: Vec<f64>,
    switched_on: Vec<f64>,
}

impl Bulb {
    /// Creates a new bulb with the given key and rating.
    ///
    /// # Arguments
    ///
    /// * `key` - Unique identifier, normalized to upper case
    /// * `rating_w` - Rated power draw in watts
    /// * `calibration` - Activation-weight calibration scalar
    /// * `rng` - Random number generator for the one-time weight draw
    pub fn new(key: &str, rating_w: f64, calibration: f64, rng: &mut StdRng) -> Self {
        Self {
            key: key.to_uppercase(),
            rating_w,
            weight: draw_activation_weight(rng, calibration),
            heat_gain: BULB_HEAT_GAIN,
            consumption: vec![0.0; MINUTES_PER_DAY],
            switched_on: vec![0.0; MINUTES_PER_DAY],
        }
    }

    /// Returns the parallel switched-on indicator series (0 or 1 per minute).
    pub fn switched_on(&self) -> &[f64] {
        &self.switched_on
    }

    /// Returns whether the bulb is on during the given minute.
    pub fn is_on(&self, minute: usize) -> bool {
        minute < MINUTES_PER_DAY && self.switched_on[minute] > 0.0
    }
}

impl Load for Bulb {
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
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn bulb() -> Bulb {
        let mut rng = StdRng::seed_from_u64(3);
        Bulb::new("bulb_0", 60.0, 0.008, &mut rng)
    }

    #[test]
    fn key_is_case_normalized() {
        assert_eq!(bulb().key(), "BULB_0");
    }

    #[test]
    fn switch_on_sets_rating_and_indicator() {
        let mut b = bulb();
        b.switch_on(5);
        assert_eq!(b.consumption()[5], 60.0);
        assert_eq!(b.switched_on()[5], 1.0);
        assert!(b.is_on(5));
        assert_eq!(b.consumption()[4], 0.0);
        assert!(!b.is_on(4));
    }

    #[test]
    fn switch_on_out_of_range_is_a_no_op() {
        let mut b = bulb();
        b.switch_on(1440);
        b.switch_on(usize::MAX);
        assert!(b.consumption().iter().all(|&v| v == 0.0));
        assert!(b.switched_on().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn reset_day_clears_both_series() {
        let mut b = bulb();
        b.switch_on(0);
        b.switch_on(1439);
        b.reset_day();
        assert!(b.consumption().iter().all(|&v| v == 0.0));
        assert!(b.switched_on().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn weights_differ_between_bulbs() {
        let mut rng = StdRng::seed_from_u64(3);
        let a = Bulb::new("a", 60.0, 0.008, &mut rng);
        let b = Bulb::new("b", 60.0, 0.008, &mut rng);
        assert_ne!(a.weight, b.weight);
        assert!(a.weight > 0.0 && b.weight > 0.0);
    }
}
