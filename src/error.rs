//! Errors raised when constructing positions, readings, and configurations.
//!
//! Every check happens once, when a value is built. The transforms and the flight model that
//! consume those values are total and never fail.

/// Result type for fallible constructors in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Reasons a position, reading, or configuration was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A numeric field was NaN or infinite.
    #[error("{field} must be finite, got {value}")]
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Latitude does not lie in [-90°, 90°] once wrapped to a single turn.
    #[error("latitude must be in [-90°, 90°], got {degrees}°")]
    LatitudeOutOfRange {
        /// The rejected latitude in degrees.
        degrees: f64,
    },

    /// Flight radius was negative.
    #[error("flight radius must not be negative, got {meters}m")]
    NegativeRadius {
        /// The rejected radius in meters.
        meters: f64,
    },

    /// Flight speed multiplier was zero or negative.
    #[error("flight speed must be positive, got {speed}")]
    NonPositiveSpeed {
        /// The rejected multiplier.
        speed: f64,
    },

    /// Minimum flight altitude was above the maximum.
    #[error("minimum altitude {min}m is above maximum altitude {max}m")]
    AltitudeRangeInverted {
        /// Minimum altitude offset in meters.
        min: f64,
        /// Maximum altitude offset in meters.
        max: f64,
    },

    /// Jitter bounds were negative or inverted.
    #[error("jitter range must satisfy 0 <= min <= max, got [{min}m, {max}m]")]
    InvalidJitterRange {
        /// Lower bound in meters.
        min: f64,
        /// Upper bound in meters.
        max: f64,
    },

    /// Visibility radius was negative.
    #[error("visibility radius must not be negative, got {meters}m")]
    NegativeVisibilityRadius {
        /// The rejected radius in meters.
        meters: f64,
    },

    /// Tick interval was zero or negative.
    #[error("tick interval must be positive, got {millis}ms")]
    NonPositiveTickInterval {
        /// The rejected interval in milliseconds.
        millis: f64,
    },

    /// Reported sensor accuracy was negative.
    #[error("position accuracy must not be negative, got {meters}m")]
    NegativeAccuracy {
        /// The rejected accuracy in meters.
        meters: f64,
    },
}

/// Rejects NaN and infinities, naming the field in the error.
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        tracing::debug!(field, value, "rejecting non-finite input");
        Err(Error::NonFinite { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::{ensure_finite, Error};
    use rstest::rstest;

    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[case(f64::NEG_INFINITY)]
    fn non_finite_is_rejected(#[case] value: f64) {
        let err = ensure_finite("latitude", value).unwrap_err();
        assert!(matches!(err, Error::NonFinite { field: "latitude", .. }));
    }

    #[test]
    fn finite_passes_through() {
        assert_eq!(ensure_finite("altitude", -12.5), Ok(-12.5));
    }

    #[test]
    fn messages_name_the_problem() {
        insta::assert_snapshot!(
            Error::AltitudeRangeInverted { min: 30., max: 10. },
            @"minimum altitude 30m is above maximum altitude 10m"
        );
        insta::assert_snapshot!(
            Error::NonPositiveSpeed { speed: 0. },
            @"flight speed must be positive, got 0"
        );
        insta::assert_snapshot!(
            Error::NegativeVisibilityRadius { meters: -5. },
            @"visibility radius must not be negative, got -5m"
        );
    }
}
