use std::ops::Mul;

use chrono::TimeDelta;

use crate::quantity::energy::KilowattHours;

quantity!(Watts, suffix: "W", precision: 0);

impl Watts {
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0.0
    }
}

impl Mul<TimeDelta> for Watts {
    type Output = KilowattHours;

    fn mul(self, rhs: TimeDelta) -> Self::Output {
        let hours = rhs.as_seconds_f64() / 3600.0;
        KilowattHours(self.0 * 0.001 * hours)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_energy_over_partial_hour() {
        assert_abs_diff_eq!((Watts(1000.0) * TimeDelta::minutes(30)).0, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(
            (Watts(2200.0) * TimeDelta::minutes(90)).0,
            3.3,
            epsilon = 1e-12
        );
    }
}
