//! Unit newtypes for scheduling quantities.
//!
//! Scalar limits and tariffs carry their unit in the type so that a power cap
//! cannot be passed where an energy limit or a tariff is expected. All types
//! are `#[repr(transparent)]` and serialize as bare numbers.
//!
//! ```
//! use loadshift_core::units::{CurrencyPerKwh, KilowattHours};
//!
//! let limit = KilowattHours(2.5);
//! let tariff = CurrencyPerKwh(0.5);
//! assert_eq!((limit * 2.0).value(), 5.0);
//! assert_eq!((tariff + CurrencyPerKwh(0.25)).value(), 0.75);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Neg, Sub};

macro_rules! impl_unit_ops {
    ($type:ty, $unit_name:literal) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Neg for $type {
            type Output = Self;
            fn neg(self) -> Self::Output {
                Self(-self.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Mul<$type> for f64 {
            type Output = $type;
            fn mul(self, rhs: $type) -> Self::Output {
                <$type>::new(self * rhs.0)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl std::fmt::Display for $type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{:.3} {}", self.0, $unit_name)
            }
        }

        impl $type {
            #[inline]
            pub const fn new(value: f64) -> Self {
                Self(value)
            }

            #[inline]
            pub const fn value(self) -> f64 {
                self.0
            }

            #[inline]
            pub fn is_finite(self) -> bool {
                self.0.is_finite()
            }
        }
    };
}

/// Energy per hour slot in kilowatt-hours (kWh)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct KilowattHours(pub f64);

impl_unit_ops!(KilowattHours, "kWh");

/// Grid connection power in kilowatts (kW)
///
/// With hourly slots a power cap of `x` kW bounds the energy exchanged in a
/// slot to `x` kWh, which is how the schedule model uses it.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Kilowatts(pub f64);

impl_unit_ops!(Kilowatts, "kW");

impl Kilowatts {
    /// Energy exchanged over one hour at this power.
    #[inline]
    pub fn over_one_hour(self) -> KilowattHours {
        KilowattHours(self.0)
    }
}

/// Price or tariff in currency per kilowatt-hour
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct CurrencyPerKwh(pub f64);

impl_unit_ops!(CurrencyPerKwh, "/kWh");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kilowatt_hours_arithmetic() {
        let a = KilowattHours(3.0);
        let b = KilowattHours(1.0);

        assert_eq!((a + b).value(), 4.0);
        assert_eq!((a - b).value(), 2.0);
        assert_eq!((-a).value(), -3.0);
        assert_eq!((2.0 * a).value(), 6.0);
        assert_eq!((a / 2.0).value(), 1.5);
    }

    #[test]
    fn test_power_over_one_hour() {
        assert_eq!(Kilowatts(4.0).over_one_hour(), KilowattHours(4.0));
    }

    #[test]
    fn test_units_serialize_as_numbers() {
        let json = serde_json::to_string(&CurrencyPerKwh(0.25)).unwrap();
        assert_eq!(json, "0.25");
        let parsed: Kilowatts = serde_json::from_str("5.0").unwrap();
        assert_eq!(parsed, Kilowatts(5.0));
    }

    #[test]
    fn test_display_includes_unit() {
        assert_eq!(KilowattHours(1.5).to_string(), "1.500 kWh");
    }
}
