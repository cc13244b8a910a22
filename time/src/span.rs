use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Neg, Sub};

/// A signed duration at second resolution. Unlike a calendar duration, a
/// `Span` may be negative (e.g. "3 minutes early").
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Serialize, Deserialize)]
pub struct Span {
    seconds: i64,
}

impl Span {
    pub const ZERO: Span = Span { seconds: 0 };

    pub fn from_seconds(seconds: i64) -> Span {
        Span { seconds }
    }

    pub fn from_minutes(minutes: f64) -> Span {
        Span {
            seconds: (minutes * 60.0).round() as i64,
        }
    }

    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    pub fn minutes(&self) -> f64 {
        self.seconds as f64 / 60.0
    }

    pub fn is_zero(&self) -> bool {
        self.seconds == 0
    }

    pub fn abs(&self) -> Span {
        Span {
            seconds: self.seconds.abs(),
        }
    }

    pub fn max(self, other: Span) -> Span {
        Span {
            seconds: self.seconds.max(other.seconds),
        }
    }

    pub fn min(self, other: Span) -> Span {
        Span {
            seconds: self.seconds.min(other.seconds),
        }
    }
}

impl Add for Span {
    type Output = Span;
    fn add(self, other: Span) -> Span {
        Span {
            seconds: self.seconds + other.seconds,
        }
    }
}

impl Sub for Span {
    type Output = Span;
    fn sub(self, other: Span) -> Span {
        Span {
            seconds: self.seconds - other.seconds,
        }
    }
}

impl Neg for Span {
    type Output = Span;
    fn neg(self) -> Span {
        Span {
            seconds: -self.seconds,
        }
    }
}

impl Sum for Span {
    fn sum<I: Iterator<Item = Span>>(iter: I) -> Span {
        iter.fold(Span::ZERO, |a, b| a + b)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let total = self.seconds;
        let sign = if total < 0 { "-" } else { "" };
        let total = total.abs();
        let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);
        if s > 0 {
            write!(f, "{sign}{h:02}:{m:02}:{s:02}")
        } else {
            write!(f, "{sign}{h:02}:{m:02}")
        }
    }
}
