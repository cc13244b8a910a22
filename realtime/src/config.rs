use serde::{Deserialize, Serialize};
use time::Span;

/// Real-time optimizer config (C7, §4.7). `Default` matches the
/// "balanced" preset.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct RealTimeConfig {
    pub horizon_seconds: i64,
    pub confidence_threshold: f64,
    pub delay_tolerance_seconds: i64,
    pub enable_reroute: bool,
    pub enable_stop_skip: bool,
    pub max_adjustments_per_cycle: usize,
    pub update_frequency_seconds: i64,
}

impl RealTimeConfig {
    pub fn horizon(&self) -> Span {
        Span::from_seconds(self.horizon_seconds)
    }

    pub fn delay_tolerance(&self) -> Span {
        Span::from_seconds(self.delay_tolerance_seconds)
    }

    pub fn update_frequency(&self) -> Span {
        Span::from_seconds(self.update_frequency_seconds)
    }

    /// 15-min horizon, 0.8 threshold, speed-only adjustments (§4.7).
    pub fn conservative() -> RealTimeConfig {
        RealTimeConfig {
            horizon_seconds: 15 * 60,
            confidence_threshold: 0.8,
            delay_tolerance_seconds: 10 * 60,
            enable_reroute: false,
            enable_stop_skip: false,
            max_adjustments_per_cycle: 3,
            update_frequency_seconds: 30,
        }
    }

    /// 30-min horizon, 0.7 threshold, speed + reroute (§4.7).
    pub fn balanced() -> RealTimeConfig {
        RealTimeConfig {
            horizon_seconds: 30 * 60,
            confidence_threshold: 0.7,
            delay_tolerance_seconds: 5 * 60,
            enable_reroute: true,
            enable_stop_skip: false,
            max_adjustments_per_cycle: 5,
            update_frequency_seconds: 10,
        }
    }

    /// 45-min horizon, 0.6 threshold, speed + reroute + stop-skip (§4.7).
    pub fn aggressive() -> RealTimeConfig {
        RealTimeConfig {
            horizon_seconds: 45 * 60,
            confidence_threshold: 0.6,
            delay_tolerance_seconds: 2 * 60,
            enable_reroute: true,
            enable_stop_skip: true,
            max_adjustments_per_cycle: 8,
            update_frequency_seconds: 5,
        }
    }
}

impl Default for RealTimeConfig {
    fn default() -> RealTimeConfig {
        RealTimeConfig::balanced()
    }
}
