//! Common types and traits for simulated household loads.

use rand::{Rng, rngs::StdRng};

/// Number of one-minute consumption slots in a simulated day.
pub const MINUTES_PER_DAY: usize = 1440;

/// Number of ten-minute occupancy slots in a simulated day.
pub const OCC_SLOTS_PER_DAY: usize = 144;

/// Trait defining a simulated electrical load with a per-minute
/// consumption series for one day.
///
/// This trait provides a common interface for all controllable loads in
/// the simulation, allowing the engines to drive bulbs and appliances
/// through the same switch-on primitive.
pub trait Load {
    /// Returns the load's unique, case-normalized key.
    fn key(&self) -> &str;

    /// Returns the rated power draw in watts.
    fn rating_w(&self) -> f64;

    /// Returns the per-minute consumption series for the current day (W).
    fn consumption(&self) -> &[f64];

    /// Marks the load as drawing its rated power during the given minute.
    ///
    /// Sets the consumption slot to the rated power and the parallel
    /// switched-on indicator to 1. A minute outside `[0, 1440)` is a
    /// silent no-op; callers are expected to guard ranges, but the
    /// primitive stays defensive.
    fn switch_on(&mut self, minute: usize);

    /// Clears the per-day series so the load can be reused for the next
    /// simulated day.
    fn reset_day(&mut self);
}

/// Draws a per-device activation weight via inverse-transform sampling
/// from an exponential distribution: `weight = -ln(U) * calibration`.
///
/// The weight encodes how switch-on-prone this particular device
/// instance is relative to its peers and stays fixed for the device's
/// lifetime. It is strictly positive for any `calibration > 0`.
///
/// # Arguments
///
/// * `rng` - Random number generator
/// * `calibration` - Scalar tuning the long-run average activation rate
pub fn draw_activation_weight(rng: &mut StdRng, calibration: f64) -> f64 {
    let u: f64 = rng.random::<f64>().max(1e-12);
    -u.ln() * calibration
}

#[cfg(test)]
mod tests {
    use super::draw_activation_weight;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn activation_weight_is_strictly_positive() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10_000 {
            let w = draw_activation_weight(&mut rng, 0.008);
            assert!(w > 0.0, "weight must be strictly positive, got {w}");
            assert!(w.is_finite());
        }
    }

    #[test]
    fn activation_weight_scales_with_calibration() {
        let mut rng_a = StdRng::seed_from_u64(11);
        let mut rng_b = StdRng::seed_from_u64(11);
        let mean = |rng: &mut StdRng, cal: f64| -> f64 {
            (0..5_000)
                .map(|_| draw_activation_weight(rng, cal))
                .sum::<f64>()
                / 5_000.0
        };
        let small = mean(&mut rng_a, 0.008);
        let large = mean(&mut rng_b, 0.08);
        assert!(large > small, "larger calibration should raise the mean");
    }
}
