//! System configuration parameters
//!
//! All tunable parameters for the solar monitor. There is no persistent
//! storage — every restart boots with these compiled defaults, and the only
//! runtime mutation path is the threshold-setter console commands.

use serde::{Deserialize, Serialize};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Relay hysteresis ---
    /// Bus voltage (V) at or above which the relay closes in AUTO mode
    pub relay_on_threshold_v: f32,
    /// Bus voltage (V) at or below which the relay opens in AUTO mode
    pub relay_off_threshold_v: f32,

    // --- Power meter ---
    /// Settle time after waking the meter before a conversion is trusted (ms)
    pub meter_settle_ms: u32,

    // --- Temperature probes ---
    /// Worst-case conversion time for the configured probe resolution (ms)
    pub probe_conversion_ms: u32,

    // --- Timing ---
    /// Control loop interval (milliseconds)
    pub control_loop_interval_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Hysteresis: 0.2 V dead band around a nominal 12 V battery
            relay_on_threshold_v: 12.6,
            relay_off_threshold_v: 12.4,

            // INA219 needs a short settle after leaving power-down
            meter_settle_ms: 50,

            // DS18B20 at 10-bit resolution converts in at most 187.5 ms
            probe_conversion_ms: 190,

            control_loop_interval_ms: 1000, // 1 Hz
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let c = SystemConfig::default();
        assert!(c.relay_on_threshold_v > 0.0);
        assert!(c.relay_off_threshold_v > 0.0);
        assert!(c.meter_settle_ms > 0);
        assert!(c.probe_conversion_ms > 0);
        assert!(c.control_loop_interval_ms > 0);
    }

    #[test]
    fn default_dead_band_is_open() {
        let c = SystemConfig::default();
        assert!(
            c.relay_on_threshold_v > c.relay_off_threshold_v,
            "default thresholds must leave a dead band to prevent relay chatter"
        );
    }

    #[test]
    fn serde_roundtrip() {
        let c = SystemConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        let c2: SystemConfig = serde_json::from_str(&json).unwrap();
        assert!((c.relay_on_threshold_v - c2.relay_on_threshold_v).abs() < 0.001);
        assert!((c.relay_off_threshold_v - c2.relay_off_threshold_v).abs() < 0.001);
        assert_eq!(c.meter_settle_ms, c2.meter_settle_ms);
    }
}
