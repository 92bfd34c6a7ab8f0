//! Monitor service — the hexagonal core.
//!
//! [`MonitorService`] owns the [`ControlState`] aggregate and drives the two
//! halves of every loop iteration:
//!
//! 1. [`tick`](MonitorService::tick) — the autonomous relay control pass,
//!    evaluated first;
//! 2. [`handle_line`](MonitorService::handle_line) — at most one console
//!    command, evaluated second.
//!
//! Because the tick runs first, a command that changes mode or thresholds
//! takes effect starting with the *next* tick, never the current iteration's.
//! All I/O flows through the port traits, so the whole service runs against
//! mock adapters in tests.

use log::{info, warn};

use crate::config::SystemConfig;
use crate::control::{ControlMode, ControlState, RelayState, ThresholdKind};
use crate::error::SensorError;
use crate::sensors::probes::ProbeId;
use crate::telemetry;

use super::commands::Command;
use super::ports::{LineSink, PowerMeterPort, ProbePort, RelayPort};

/// Orchestrates autonomous control and command dispatch over one shared
/// [`ControlState`].
pub struct MonitorService {
    state: ControlState,
    tick_count: u64,
}

impl MonitorService {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            state: ControlState::new(config),
            tick_count: 0,
        }
    }

    // ── Autonomous control ────────────────────────────────────

    /// One control pass: gated meter read, hysteresis rule, relay actuation.
    ///
    /// A no-op in MANUAL mode and while the meter is unavailable. The gated
    /// read releases the meter on every path, so a mid-read bus fault costs
    /// this tick nothing but the sample.
    pub fn tick(&mut self, hw: &mut (impl PowerMeterPort + RelayPort), sink: &mut impl LineSink) {
        self.tick_count += 1;

        if self.state.mode == ControlMode::Manual {
            return;
        }

        match hw.read_gated() {
            Ok(sample) => {
                if let Some(event) = self.state.apply_voltage(sample.voltage_v) {
                    hw.set_relay(self.state.relay);
                    info!(
                        "relay {} at {:.2} V",
                        self.state.relay.as_str(),
                        sample.voltage_v
                    );
                    sink.send_line(&telemetry::relay_event_line(&event));
                }
            }
            // Meter absent since boot: autonomous control is permanently inert.
            Err(SensorError::Unavailable) => {}
            Err(e) => warn!("tick: meter read failed: {e}"),
        }
    }

    // ── Command dispatch ──────────────────────────────────────

    /// Parse and execute one input line. Every line — valid, invalid or
    /// unrecognized — produces exactly one reply on the sink.
    pub fn handle_line(
        &mut self,
        line: &str,
        hw: &mut (impl PowerMeterPort + ProbePort + RelayPort),
        sink: &mut impl LineSink,
    ) {
        let cmd = Command::parse(line);
        if cmd == Command::Unrecognized {
            warn!("unrecognized command: {:?}", line.trim());
        }
        let reply = self.execute(cmd, hw);
        sink.send_line(&reply);
    }

    fn execute(
        &mut self,
        cmd: Command,
        hw: &mut (impl PowerMeterPort + ProbePort + RelayPort),
    ) -> String {
        match cmd {
            Command::ReadOutdoor => {
                hw.request_conversion();
                telemetry::probe_line(ProbeId::Outdoor, hw.read_probe(ProbeId::Outdoor))
            }
            Command::ReadIndoor => {
                hw.request_conversion();
                telemetry::probe_line(ProbeId::Indoor, hw.read_probe(ProbeId::Indoor))
            }
            Command::ReadBoth => {
                // One conversion cycle covers both probes.
                hw.request_conversion();
                let outdoor = hw.read_probe(ProbeId::Outdoor);
                let indoor = hw.read_probe(ProbeId::Indoor);
                telemetry::both_probes_line(outdoor, indoor)
            }
            Command::ReadSolar => telemetry::solar_line(hw.read_gated()),
            Command::ReadRelay => telemetry::relay_line(hw.relay_state()),
            Command::RelayOn => self.force_relay(RelayState::On, hw),
            Command::RelayOff => self.force_relay(RelayState::Off, hw),
            Command::ModeAuto => {
                self.state.set_mode(ControlMode::Auto);
                info!("automatic control enabled");
                telemetry::mode_line(ControlMode::Auto)
            }
            Command::ModeManual => {
                self.state.set_mode(ControlMode::Manual);
                info!("manual control enabled");
                telemetry::mode_line(ControlMode::Manual)
            }
            Command::SetOnThreshold(arg) => self.set_threshold(ThresholdKind::On, "set_on_V", arg),
            Command::SetOffThreshold(arg) => {
                self.set_threshold(ThresholdKind::Off, "set_off_V", arg)
            }
            Command::GetSettings => telemetry::settings_line(&self.state),
            Command::Unrecognized => telemetry::invalid_command_line(),
        }
    }

    /// `r1` / `r0`: drive the relay and suspend automatic control.
    fn force_relay(&mut self, target: RelayState, hw: &mut impl RelayPort) -> String {
        self.state.force_relay(target);
        hw.set_relay(self.state.relay);
        info!("relay forced {} (mode now manual)", target.as_str());
        telemetry::relay_line(hw.relay_state())
    }

    /// Threshold setter with the strict argument contract: a missing,
    /// unparsable or non-positive value is rejected with no mutation.
    fn set_threshold(
        &mut self,
        kind: ThresholdKind,
        verb: &'static str,
        arg: Option<f32>,
    ) -> String {
        let Some(value_v) = arg else {
            warn!("{verb}: malformed argument");
            return telemetry::invalid_value_line(verb);
        };
        match self.state.set_threshold(kind, value_v) {
            Ok(stored) => {
                info!("{verb} = {stored:.2} V");
                telemetry::threshold_line(verb, stored)
            }
            Err(_) => {
                warn!("{verb}: rejected non-positive value {value_v}");
                telemetry::invalid_value_line(verb)
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// The shared control aggregate (read-only view).
    pub fn control(&self) -> &ControlState {
        &self.state
    }

    /// Total control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}
