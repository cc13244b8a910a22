use crate::base_types::{Acceleration, Speed, TrainId, TrainType};

#[derive(Clone, Debug)]
pub struct Train {
    id: TrainId,
    name: String,
    kind: TrainType,
    max_speed: Speed,
    acceleration: Acceleration,
    deceleration: Acceleration,
}

impl Train {
    pub fn new(
        id: impl Into<TrainId>,
        name: impl Into<String>,
        kind: TrainType,
        max_speed: Speed,
        acceleration: Acceleration,
        deceleration: Acceleration,
    ) -> Train {
        Train {
            id: id.into(),
            name: name.into(),
            kind,
            max_speed,
            acceleration,
            deceleration,
        }
    }

    pub fn default_for(id: impl Into<TrainId>, name: impl Into<String>, kind: TrainType) -> Train {
        Train::new(id, name, kind, 160.0, 0.6, 0.8)
    }

    pub fn id(&self) -> &TrainId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> TrainType {
        self.kind
    }

    pub fn max_speed(&self) -> Speed {
        self.max_speed
    }

    /// Effective cruise speed over a track segment: `min(train max, track
    /// max)` (§3 "Derived contract").
    pub fn effective_speed(&self, track_max_speed: Speed) -> Speed {
        self.max_speed.min(track_max_speed)
    }

    /// Travel time in hours over `length_km`, respecting a trapezoidal
    /// speed profile (accelerate, cruise at the effective speed, brake)
    /// when the segment is long enough to reach cruise speed, and a
    /// pure accelerate/decelerate triangle otherwise (§3).
    pub fn travel_time_hours(&self, length_km: f64, track_max_speed: Speed) -> f64 {
        if length_km <= 0.0 {
            return 0.0;
        }
        let cruise = self.effective_speed(track_max_speed);
        // km/h / (m/s^2) -> convert to consistent units (km, h).
        let accel_km_per_h2 = self.acceleration * 3600.0 * 3600.0 / 1000.0;
        let decel_km_per_h2 = self.deceleration * 3600.0 * 3600.0 / 1000.0;

        let accel_distance = cruise * cruise / (2.0 * accel_km_per_h2);
        let decel_distance = cruise * cruise / (2.0 * decel_km_per_h2);

        if accel_distance + decel_distance <= length_km {
            let cruise_distance = length_km - accel_distance - decel_distance;
            let accel_time = cruise / accel_km_per_h2;
            let decel_time = cruise / decel_km_per_h2;
            let cruise_time = cruise_distance / cruise;
            accel_time + cruise_time + decel_time
        } else {
            // Never reaches cruise speed: solve for the peak speed of the
            // accelerate/decelerate triangle covering `length_km`.
            let peak = (2.0 * length_km * accel_km_per_h2 * decel_km_per_h2
                / (accel_km_per_h2 + decel_km_per_h2))
                .sqrt();
            peak / accel_km_per_h2 + peak / decel_km_per_h2
        }
    }
}
