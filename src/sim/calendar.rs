//! Calendar classification and seasonal demand correction.

use chrono::{Datelike, NaiveDate, Weekday};

/// Classification of a calendar day used by the behavioral engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayType {
    /// Monday through Friday.
    Weekday,
    /// Saturday or Sunday.
    Weekend,
}

/// Coefficients of the seasonal demand correction polynomial, ordered
/// from degree 4 down to degree 0. Fixed calibration constants.
const SEASONAL_COEFFS: [f64; 5] = [
    -2.46333771e-10,
    2.09410267e-07,
    -4.91019666e-05,
    1.99475890e-03,
    1.13989689e0,
];

/// Fixed multiplicative correction applied to the hot-water profile
/// instead of the seasonal polynomial.
pub const HOT_WATER_CORRECTION: f64 = 0.7;

/// Returns the number of days in the given calendar year (365 or 366).
pub fn days_in_year(year: i32) -> u32 {
    if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
        366
    } else {
        365
    }
}

/// Classifies a calendar date as weekday or weekend.
pub fn day_type(date: NaiveDate) -> DayType {
    match date.weekday() {
        Weekday::Sat | Weekday::Sun => DayType::Weekend,
        _ => DayType::Weekday,
    }
}

/// Evaluates the seasonal demand correction factor for a 1-based day of
/// year, using Horner's scheme over the fixed polynomial coefficients.
pub fn seasonal_factor(day_of_year: u32) -> f64 {
    let x = f64::from(day_of_year);
    SEASONAL_COEFFS.iter().fold(0.0, |acc, c| acc * x + c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn days_in_year_handles_leap_rules() {
        assert_eq!(days_in_year(2010), 365);
        assert_eq!(days_in_year(2012), 366);
        assert_eq!(days_in_year(2000), 366);
        assert_eq!(days_in_year(1900), 365);
    }

    #[test]
    fn day_type_matches_known_dates() {
        // 2010-01-01 was a Friday, 2010-01-02 a Saturday.
        let fri = NaiveDate::from_ymd_opt(2010, 1, 1);
        let sat = NaiveDate::from_ymd_opt(2010, 1, 2);
        let sun = NaiveDate::from_ymd_opt(2010, 1, 3);
        assert_eq!(fri.map(day_type), Some(DayType::Weekday));
        assert_eq!(sat.map(day_type), Some(DayType::Weekend));
        assert_eq!(sun.map(day_type), Some(DayType::Weekend));
    }

    #[test]
    fn seasonal_factor_is_positive_all_year() {
        for day in 1..=366 {
            let f = seasonal_factor(day);
            assert!(f > 0.0, "factor should stay positive at day {day}, got {f}");
            assert!(f < 2.0, "factor should stay bounded at day {day}, got {f}");
        }
    }

    #[test]
    fn seasonal_factor_matches_horner_expansion_at_day_one() {
        // Sum of the coefficients evaluated at x = 1.
        let expected: f64 = -2.46333771e-10 + 2.09410267e-07 - 4.91019666e-05
            + 1.99475890e-03
            + 1.13989689e0;
        assert!((seasonal_factor(1) - expected).abs() < 1e-12);
    }

    #[test]
    fn seasonal_factor_peaks_in_winter() {
        // The correction boosts winter demand relative to midsummer.
        assert!(seasonal_factor(1) > seasonal_factor(180));
        assert!(seasonal_factor(365) > seasonal_factor(180));
    }
}
