use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};

/// A length in kilometers. Unlike the vehicle-scheduling domain this
/// model has no scheduling notion of "infinite" distance — unreachable
/// queries return an empty path rather than an infinite-distance one
/// (§4.1 edge case policy), so this is a plain newtype, not an enum.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
pub struct Distance(f64);

impl Distance {
    pub const ZERO: Distance = Distance(0.0);

    pub fn from_km(km: f64) -> Distance {
        Distance(km)
    }

    pub fn km(&self) -> f64 {
        self.0
    }
}

impl Add for Distance {
    type Output = Distance;
    fn add(self, other: Distance) -> Distance {
        Distance(self.0 + other.0)
    }
}

impl Sub for Distance {
    type Output = Distance;
    fn sub(self, other: Distance) -> Distance {
        Distance(self.0 - other.0)
    }
}

impl Sum for Distance {
    fn sum<I: Iterator<Item = Distance>>(iter: I) -> Distance {
        iter.fold(Distance::ZERO, |a, b| a + b)
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:.1}km", self.0)
    }
}
