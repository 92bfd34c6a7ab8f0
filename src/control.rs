//! Relay hysteresis control.
//!
//! The relay is driven from the meter's bus voltage with **two** thresholds:
//!
//! ```text
//!            off_threshold      on_threshold
//!  ───────────────┴──── dead band ────┴───────────────▶ voltage
//!   relay opens here ◀──            ──▶ relay closes here
//! ```
//!
//! A single setpoint would make the relay oscillate every tick near that
//! point; the dead band between the thresholds suppresses chatter. If the
//! thresholds are configured inverted (`on <= off`) the dead band collapses
//! and every tick may transition — that is a configuration hazard the
//! controller tolerates but does not correct.
//!
//! All control state lives in one [`ControlState`] aggregate owned by the
//! monitor service and passed by reference to the tick and dispatch paths.
//! There is exactly one writer context (the loop), so no locking.

use crate::config::SystemConfig;
use crate::error::CommandError;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Relay actuator state, mirroring the physical pin. Boots [`Off`](Self::Off).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayState {
    Off,
    On,
}

impl RelayState {
    /// Wire representation (`"ON"` / `"OFF"`).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::On => "ON",
            Self::Off => "OFF",
        }
    }
}

/// Whether the relay is under autonomous or operator control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlMode {
    Auto,
    Manual,
}

impl ControlMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Manual => "manual",
        }
    }
}

/// Which threshold a setter command targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdKind {
    /// Voltage at or above which the relay closes.
    On,
    /// Voltage at or below which the relay opens.
    Off,
}

// ---------------------------------------------------------------------------
// Autonomous events
// ---------------------------------------------------------------------------

/// Emitted when an AUTO-mode tick transitions the relay. Carries the bus
/// voltage that triggered the transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RelayEvent {
    AutoOn { voltage_v: f32 },
    AutoOff { voltage_v: f32 },
}

// ---------------------------------------------------------------------------
// Control state aggregate
// ---------------------------------------------------------------------------

/// Mode, thresholds and relay mirror — the process-wide mutable control
/// state. Mutated only by the hysteresis rule ([`apply_voltage`]) and the
/// dispatcher entry points below; nothing holds a private copy.
///
/// [`apply_voltage`]: ControlState::apply_voltage
#[derive(Debug, Clone)]
pub struct ControlState {
    pub mode: ControlMode,
    pub on_threshold_v: f32,
    pub off_threshold_v: f32,
    pub relay: RelayState,
}

impl ControlState {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            mode: ControlMode::Auto,
            on_threshold_v: config.relay_on_threshold_v,
            off_threshold_v: config.relay_off_threshold_v,
            relay: RelayState::Off,
        }
    }

    /// Apply one observed bus voltage to the hysteresis rule.
    ///
    /// Returns the transition event if the relay changed, `None` inside the
    /// dead band or in MANUAL mode. The caller is responsible for actuating
    /// the physical pin when a transition is returned.
    pub fn apply_voltage(&mut self, voltage_v: f32) -> Option<RelayEvent> {
        if self.mode == ControlMode::Manual {
            return None;
        }
        match self.relay {
            RelayState::Off if voltage_v >= self.on_threshold_v => {
                self.relay = RelayState::On;
                Some(RelayEvent::AutoOn { voltage_v })
            }
            RelayState::On if voltage_v <= self.off_threshold_v => {
                self.relay = RelayState::Off;
                Some(RelayEvent::AutoOff { voltage_v })
            }
            _ => None, // dead band
        }
    }

    /// Switch between AUTO and MANUAL. Unconditional, no validation.
    pub fn set_mode(&mut self, mode: ControlMode) {
        self.mode = mode;
    }

    /// Force the relay to a state and suspend automatic control.
    ///
    /// A manual override always switches to MANUAL; automatic control stays
    /// suspended until an explicit `auto` command re-enables it.
    pub fn force_relay(&mut self, state: RelayState) {
        self.relay = state;
        self.mode = ControlMode::Manual;
    }

    /// Store a new threshold. Accepts strictly positive, finite voltages;
    /// anything else is rejected and the prior value kept. Does not change
    /// the control mode.
    pub fn set_threshold(&mut self, kind: ThresholdKind, value_v: f32) -> Result<f32, CommandError> {
        if !(value_v.is_finite() && value_v > 0.0) {
            return Err(CommandError::InvalidValue);
        }
        match kind {
            ThresholdKind::On => self.on_threshold_v = value_v,
            ThresholdKind::Off => self.off_threshold_v = value_v,
        }
        Ok(value_v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_state() -> ControlState {
        ControlState::new(&SystemConfig::default())
    }

    #[test]
    fn boots_off_in_auto() {
        let s = make_state();
        assert_eq!(s.relay, RelayState::Off);
        assert_eq!(s.mode, ControlMode::Auto);
    }

    #[test]
    fn turns_on_at_and_only_at_first_sample_above_on_threshold() {
        let mut s = make_state();
        s.on_threshold_v = 12.6;
        s.off_threshold_v = 12.4;

        let mut transitions = Vec::new();
        for v in [12.3, 12.5, 12.6, 12.7] {
            if let Some(e) = s.apply_voltage(v) {
                transitions.push((v, e));
            }
        }
        assert_eq!(transitions.len(), 1);
        assert_eq!(transitions[0].0, 12.6);
        assert_eq!(
            transitions[0].1,
            RelayEvent::AutoOn { voltage_v: 12.6 },
            "event must carry the observed voltage"
        );
        assert_eq!(s.relay, RelayState::On);
    }

    #[test]
    fn no_chatter_inside_dead_band() {
        let mut s = make_state();
        s.relay = RelayState::On;

        // Anything strictly between off and on thresholds must not move the relay.
        for v in [12.41, 12.45, 12.5, 12.55, 12.59] {
            assert_eq!(s.apply_voltage(v), None, "transition at {v} inside dead band");
        }
        assert_eq!(s.relay, RelayState::On);
    }

    #[test]
    fn turns_off_at_off_threshold() {
        let mut s = make_state();
        s.relay = RelayState::On;
        assert_eq!(
            s.apply_voltage(12.4),
            Some(RelayEvent::AutoOff { voltage_v: 12.4 })
        );
        assert_eq!(s.relay, RelayState::Off);
    }

    #[test]
    fn manual_mode_suppresses_transitions() {
        let mut s = make_state();
        s.force_relay(RelayState::On);
        assert_eq!(s.mode, ControlMode::Manual);

        // Deep below the off threshold — no automatic transition in MANUAL.
        assert_eq!(s.apply_voltage(10.0), None);
        assert_eq!(s.relay, RelayState::On);

        // Re-enabling AUTO resumes control on the next sample.
        s.set_mode(ControlMode::Auto);
        assert_eq!(
            s.apply_voltage(10.0),
            Some(RelayEvent::AutoOff { voltage_v: 10.0 })
        );
    }

    #[test]
    fn force_relay_switches_to_manual() {
        let mut s = make_state();
        s.force_relay(RelayState::On);
        assert_eq!(s.relay, RelayState::On);
        assert_eq!(s.mode, ControlMode::Manual);

        s.set_mode(ControlMode::Auto);
        s.force_relay(RelayState::Off);
        assert_eq!(s.relay, RelayState::Off);
        assert_eq!(s.mode, ControlMode::Manual);
    }

    #[test]
    fn set_threshold_rejects_non_positive_and_keeps_prior() {
        let mut s = make_state();
        let prior = s.on_threshold_v;

        assert_eq!(
            s.set_threshold(ThresholdKind::On, -1.0),
            Err(CommandError::InvalidValue)
        );
        assert_eq!(
            s.set_threshold(ThresholdKind::On, 0.0),
            Err(CommandError::InvalidValue)
        );
        assert_eq!(
            s.set_threshold(ThresholdKind::On, f32::NAN),
            Err(CommandError::InvalidValue)
        );
        assert_eq!(
            s.set_threshold(ThresholdKind::On, f32::INFINITY),
            Err(CommandError::InvalidValue)
        );
        assert_eq!(s.on_threshold_v, prior);
    }

    #[test]
    fn set_threshold_stores_and_keeps_mode() {
        let mut s = make_state();
        assert_eq!(s.set_threshold(ThresholdKind::On, 13.0), Ok(13.0));
        assert_eq!(s.on_threshold_v, 13.0);
        assert_eq!(s.mode, ControlMode::Auto, "threshold setter must not touch mode");

        assert_eq!(s.set_threshold(ThresholdKind::Off, 12.1), Ok(12.1));
        assert_eq!(s.off_threshold_v, 12.1);
    }

    #[test]
    fn inverted_thresholds_oscillate_without_panic() {
        // on <= off collapses the dead band: the controller must survive it.
        let mut s = make_state();
        s.on_threshold_v = 12.0;
        s.off_threshold_v = 12.5;

        // 12.2 is >= on (close) and <= off (open): the relay toggles every tick.
        assert_eq!(
            s.apply_voltage(12.2),
            Some(RelayEvent::AutoOn { voltage_v: 12.2 })
        );
        assert_eq!(
            s.apply_voltage(12.2),
            Some(RelayEvent::AutoOff { voltage_v: 12.2 })
        );
        assert_eq!(
            s.apply_voltage(12.2),
            Some(RelayEvent::AutoOn { voltage_v: 12.2 })
        );
    }

    #[test]
    fn equal_thresholds_behave_as_single_setpoint() {
        let mut s = make_state();
        s.on_threshold_v = 12.5;
        s.off_threshold_v = 12.5;

        assert!(s.apply_voltage(12.5).is_some());
        assert!(s.apply_voltage(12.5).is_some());
    }
}
