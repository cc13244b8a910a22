use std::fmt;
use std::sync::Arc;

pub mod distance;
pub mod enums;

pub use distance::Distance;
pub use enums::{NodeType, TrackType, TrainType};

macro_rules! id_type {
    ($name:ident) => {
        #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
        pub struct $name(Arc<str>);

        impl $name {
            pub fn new(id: impl Into<Arc<str>>) -> $name {
                $name(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> $name {
                $name::new(id)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> $name {
                $name::new(id)
            }
        }
    };
}

id_type!(NodeId);
id_type!(TrainId);
id_type!(ScheduleId);

/// 1-indexed platform number, never 0 (§4.1 invariant).
pub type Platform = u32;

/// Speed in km/h.
pub type Speed = f64;

/// Linear acceleration/deceleration in m/s^2.
pub type Acceleration = f64;
