use core::fmt;

/// Pricing strategy for a movie category.
///
/// Implementations are stateless: one shared instance per category kind,
/// cloned as an `Arc` into every movie assigned to it. Both functions are
/// total over the whole `i64` range — a non-positive day count prices to
/// zero and awards zero points, it never panics.
pub trait PriceCategory: fmt::Debug + Send + Sync {
    /// Display name, doubling as the registry identifier.
    fn name(&self) -> &'static str;

    /// Charge for keeping a movie of this category for `days` days.
    fn charge(&self, days: i64) -> f64;

    /// Loyalty points awarded for a rental of `days` days.
    fn frequent_renter_points(&self, days: i64) -> u32;
}

/// Standard back-catalog pricing: flat rate for the first two days, then a
/// per-day surcharge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Regular;

impl PriceCategory for Regular {
    fn name(&self) -> &'static str {
        "Regular"
    }

    fn charge(&self, days: i64) -> f64 {
        if days <= 0 {
            0.0
        } else if days <= 2 {
            2.0
        } else {
            2.0 + 1.5 * (days - 2) as f64
        }
    }

    fn frequent_renter_points(&self, days: i64) -> u32 {
        if days >= 1 { 1 } else { 0 }
    }
}

impl fmt::Display for Regular {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// New-release pricing: full rate every day, double points from the second
/// day on (capped at 2 no matter how long the rental runs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewRelease;

impl PriceCategory for NewRelease {
    fn name(&self) -> &'static str {
        "New Release"
    }

    fn charge(&self, days: i64) -> f64 {
        if days <= 0 { 0.0 } else { 3.0 * days as f64 }
    }

    fn frequent_renter_points(&self, days: i64) -> u32 {
        match days {
            d if d <= 0 => 0,
            1 => 1,
            _ => 2,
        }
    }
}

impl fmt::Display for NewRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TOLERANCE: f64 = 1.0e-10;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < TOLERANCE,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn regular_charge() {
        let pc = Regular;
        assert_close(pc.charge(-5), 0.0);
        assert_close(pc.charge(0), 0.0);
        assert_close(pc.charge(1), 2.0);
        assert_close(pc.charge(2), 2.0);
        assert_close(pc.charge(3), 3.5);
        assert_close(pc.charge(4), 5.0);
        assert_close(pc.charge(22), 32.0);
    }

    #[test]
    fn regular_frequent_renter_points() {
        let pc = Regular;
        assert_eq!(pc.frequent_renter_points(-3), 0);
        assert_eq!(pc.frequent_renter_points(0), 0);
        assert_eq!(pc.frequent_renter_points(1), 1);
        assert_eq!(pc.frequent_renter_points(50), 1);
    }

    #[test]
    fn new_release_charge() {
        let pc = NewRelease;
        assert_close(pc.charge(-5), 0.0);
        assert_close(pc.charge(0), 0.0);
        assert_close(pc.charge(1), 3.0);
        assert_close(pc.charge(2), 6.0);
        assert_close(pc.charge(22), 66.0);
    }

    #[test]
    fn new_release_frequent_renter_points() {
        let pc = NewRelease;
        assert_eq!(pc.frequent_renter_points(-3), 0);
        assert_eq!(pc.frequent_renter_points(0), 0);
        assert_eq!(pc.frequent_renter_points(1), 1);
        assert_eq!(pc.frequent_renter_points(2), 2);
        assert_eq!(pc.frequent_renter_points(50), 2);
    }

    #[test]
    fn display_names() {
        assert_eq!(Regular.to_string(), "Regular");
        assert_eq!(NewRelease.to_string(), "New Release");
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: charges are never negative and never decrease as the
        /// rental runs longer.
        #[test]
        fn charges_are_non_negative_and_monotone(days in -100i64..1000i64) {
            for pc in [&Regular as &dyn PriceCategory, &NewRelease] {
                let today = pc.charge(days);
                let tomorrow = pc.charge(days + 1);
                prop_assert!(today >= 0.0);
                prop_assert!(tomorrow >= today);
            }
        }

        /// Property: points stay within each category's cap.
        #[test]
        fn points_respect_caps(days in -100i64..1000i64) {
            prop_assert!(Regular.frequent_renter_points(days) <= 1);
            prop_assert!(NewRelease.frequent_renter_points(days) <= 2);
        }
    }
}
