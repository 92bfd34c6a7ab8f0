//! Wire-format rendering.
//!
//! Every reply and autonomous event is a single-line JSON object; the host
//! side ignores any line that is not one (log output shares the UART).
//! Readings render as numbers rounded to two decimals, failures as the
//! string `"error"` — a disconnected probe must never surface as a number.

use serde_json::json;

use crate::control::{ControlMode, ControlState, RelayEvent, RelayState};
use crate::error::{CommandError, SensorError};
use crate::sensors::power_meter::PowerSample;
use crate::sensors::probes::ProbeId;

/// Two-decimal rounding, via f64 so f32 artifacts don't leak into the JSON
/// (12.6f32 would otherwise print as 12.600000381469727).
fn round2(v: f32) -> f64 {
    (f64::from(v) * 100.0).round() / 100.0
}

fn value_or_error(reading: Result<f32, SensorError>) -> serde_json::Value {
    match reading {
        Ok(v) => json!(round2(v)),
        Err(_) => json!("error"),
    }
}

/// `{"sensor":"o_temp","value":21.5}` / `{"sensor":"i_temp","value":"error"}`
pub fn probe_line(probe: ProbeId, reading: Result<f32, SensorError>) -> String {
    json!({
        "sensor": probe.wire_name(),
        "value": value_or_error(reading),
    })
    .to_string()
}

/// Combined reply for the `t` command; each probe fails independently.
pub fn both_probes_line(
    outdoor: Result<f32, SensorError>,
    indoor: Result<f32, SensorError>,
) -> String {
    json!({
        "o_temp": value_or_error(outdoor),
        "i_temp": value_or_error(indoor),
    })
    .to_string()
}

/// Meter reply: full sample on success, `status:"error"` on any failure
/// (absent at boot and mid-read bus faults render identically).
pub fn solar_line(sample: Result<PowerSample, SensorError>) -> String {
    match sample {
        Ok(s) => json!({
            "sensor": "solar_pwr",
            "voltage_V": round2(s.voltage_v),
            "current_mA": round2(s.current_ma),
            "power_mW": round2(s.power_mw),
        }),
        Err(_) => json!({
            "sensor": "solar_pwr",
            "status": "error",
        }),
    }
    .to_string()
}

/// `{"sensor":"relay","value":"ON"}`
pub fn relay_line(state: RelayState) -> String {
    json!({
        "sensor": "relay",
        "value": state.as_str(),
    })
    .to_string()
}

/// `{"mode":"auto","status":"enabled"}`
pub fn mode_line(mode: ControlMode) -> String {
    json!({
        "mode": mode.as_str(),
        "status": "enabled",
    })
    .to_string()
}

/// Echo of a successful threshold setter: `{"command":"set_on_V","value":13.0}`
pub fn threshold_line(verb: &str, value_v: f32) -> String {
    json!({
        "command": verb,
        "value": round2(value_v),
    })
    .to_string()
}

/// `get_settings` reply, reflecting exactly the last-applied configuration.
pub fn settings_line(state: &ControlState) -> String {
    json!({
        "relay_settings": {
            "mode": state.mode.as_str(),
            "voltage_on_threshold": round2(state.on_threshold_v),
            "voltage_off_threshold": round2(state.off_threshold_v),
        }
    })
    .to_string()
}

/// Rejection reply for a known verb with a bad argument.
pub fn invalid_value_line(verb: &str) -> String {
    json!({
        "command": verb,
        "error": CommandError::InvalidValue.wire_tag(),
    })
    .to_string()
}

/// Generic rejection for anything outside the verb table.
pub fn invalid_command_line() -> String {
    json!({
        "error": CommandError::Unrecognized.wire_tag(),
    })
    .to_string()
}

/// Autonomous transition event: `{"relay_event":"auto_on","voltage":12.61}`
pub fn relay_event_line(event: &RelayEvent) -> String {
    let (tag, voltage_v) = match *event {
        RelayEvent::AutoOn { voltage_v } => ("auto_on", voltage_v),
        RelayEvent::AutoOff { voltage_v } => ("auto_off", voltage_v),
    };
    json!({
        "relay_event": tag,
        "voltage": round2(voltage_v),
    })
    .to_string()
}

impl CommandError {
    /// Machine-readable tag used in rejection replies.
    pub const fn wire_tag(self) -> &'static str {
        match self {
            Self::InvalidValue => "invalid_value",
            Self::Unrecognized => "invalid_command",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SystemConfig;
    use serde_json::Value;

    fn parse(line: &str) -> Value {
        serde_json::from_str(line).expect("every output line must be valid JSON")
    }

    #[test]
    fn lines_are_single_line_json() {
        let lines = [
            probe_line(ProbeId::Outdoor, Ok(21.5)),
            both_probes_line(Ok(5.25), Err(SensorError::Disconnected)),
            solar_line(Err(SensorError::Unavailable)),
            relay_line(RelayState::On),
            mode_line(ControlMode::Auto),
            settings_line(&ControlState::new(&SystemConfig::default())),
            invalid_command_line(),
            relay_event_line(&RelayEvent::AutoOn { voltage_v: 12.6 }),
        ];
        for line in lines {
            assert!(!line.contains('\n'));
            parse(&line);
        }
    }

    #[test]
    fn probe_reading_renders_value() {
        let v = parse(&probe_line(ProbeId::Outdoor, Ok(21.5)));
        assert_eq!(v["sensor"], "o_temp");
        assert_eq!(v["value"], 21.5);
    }

    #[test]
    fn probe_failure_renders_error_string() {
        let v = parse(&probe_line(ProbeId::Indoor, Err(SensorError::Disconnected)));
        assert_eq!(v["sensor"], "i_temp");
        assert_eq!(v["value"], "error");
    }

    #[test]
    fn both_probes_fail_independently() {
        let v = parse(&both_probes_line(Ok(3.75), Err(SensorError::Disconnected)));
        assert_eq!(v["o_temp"], 3.75);
        assert_eq!(v["i_temp"], "error");
    }

    #[test]
    fn solar_success_carries_all_three_channels() {
        let sample = PowerSample {
            voltage_v: 13.12,
            current_ma: 420.5,
            power_mw: 5516.0,
        };
        let v = parse(&solar_line(Ok(sample)));
        assert_eq!(v["sensor"], "solar_pwr");
        assert_eq!(v["voltage_V"], 13.12);
        assert_eq!(v["current_mA"], 420.5);
        assert_eq!(v["power_mW"], 5516.0);
        assert!(v.get("status").is_none());
    }

    #[test]
    fn solar_failure_is_status_error_without_channels() {
        let v = parse(&solar_line(Err(SensorError::Unavailable)));
        assert_eq!(v["sensor"], "solar_pwr");
        assert_eq!(v["status"], "error");
        assert!(v.get("voltage_V").is_none());
    }

    #[test]
    fn f32_rounding_does_not_leak_artifacts() {
        let v = parse(&threshold_line("set_on_V", 12.6));
        assert_eq!(v["value"], 12.6);
    }

    #[test]
    fn settings_reflect_state() {
        let mut state = ControlState::new(&SystemConfig::default());
        state.mode = ControlMode::Manual;
        state.on_threshold_v = 13.1;
        state.off_threshold_v = 11.9;

        let v = parse(&settings_line(&state));
        assert_eq!(v["relay_settings"]["mode"], "manual");
        assert_eq!(v["relay_settings"]["voltage_on_threshold"], 13.1);
        assert_eq!(v["relay_settings"]["voltage_off_threshold"], 11.9);
    }

    #[test]
    fn event_lines_carry_trigger_voltage() {
        let v = parse(&relay_event_line(&RelayEvent::AutoOff { voltage_v: 12.4 }));
        assert_eq!(v["relay_event"], "auto_off");
        assert_eq!(v["voltage"], 12.4);
    }

    #[test]
    fn rejection_shapes() {
        let v = parse(&invalid_value_line("set_off_V"));
        assert_eq!(v["command"], "set_off_V");
        assert_eq!(v["error"], "invalid_value");

        let v = parse(&invalid_command_line());
        assert_eq!(v["error"], "invalid_command");
    }
}
