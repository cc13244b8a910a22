use crate::Span;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// An absolute instant at second resolution, with no owned calendar or
/// timezone. Facades are responsible for turning `"HH:MM"` wall-clock
/// strings into `Instant`s on a chosen calendar day; the core only ever
/// adds, subtracts and compares instants.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Serialize, Deserialize)]
pub struct Instant {
    seconds_since_epoch: i64,
}

impl Instant {
    pub fn from_seconds_since_epoch(seconds: i64) -> Instant {
        Instant {
            seconds_since_epoch: seconds,
        }
    }

    pub fn seconds_since_epoch(&self) -> i64 {
        self.seconds_since_epoch
    }
}

impl Add<Span> for Instant {
    type Output = Instant;
    fn add(self, span: Span) -> Instant {
        Instant {
            seconds_since_epoch: self.seconds_since_epoch + span.seconds(),
        }
    }
}

impl Sub<Span> for Instant {
    type Output = Instant;
    fn sub(self, span: Span) -> Instant {
        Instant {
            seconds_since_epoch: self.seconds_since_epoch - span.seconds(),
        }
    }
}

impl Sub for Instant {
    type Output = Span;
    fn sub(self, other: Instant) -> Span {
        Span::from_seconds(self.seconds_since_epoch - other.seconds_since_epoch)
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let total = self.seconds_since_epoch.rem_euclid(86_400);
        write!(f, "{:02}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
    }
}
