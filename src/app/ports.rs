//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ MonitorService (domain)
//! ```
//!
//! Driven adapters (the power meter, the probe bus, the relay pin, the
//! console) implement these traits. The
//! [`MonitorService`](super::service::MonitorService) consumes them via
//! generics, so the domain core never touches hardware directly.

use crate::control::RelayState;
use crate::error::SensorError;
use crate::sensors::power_meter::PowerSample;
use crate::sensors::probes::ProbeId;

// ───────────────────────────────────────────────────────────────
// Power meter port (power-gated bus monitor)
// ───────────────────────────────────────────────────────────────

/// Read-side port for the bus voltage/current/power meter.
///
/// The device is power-gated: it idles in its lowest-power mode and is only
/// active between [`acquire`](Self::acquire) and [`release`](Self::release).
/// Callers go through [`read_gated`](Self::read_gated), which guarantees the
/// release on every exit path of a read — the bus protocol is not reentrant
/// and a meter left awake defeats the idle-draw budget.
pub trait PowerMeterPort {
    /// Wake the device and wait out its settle time.
    ///
    /// Fails with [`SensorError::Unavailable`] when boot-time detection did
    /// not find the device; that failure is sticky and never retried.
    fn acquire(&mut self) -> Result<(), SensorError>;

    /// Read one sample. Only valid between `acquire` and `release`.
    fn read(&mut self) -> Result<PowerSample, SensorError>;

    /// Return the device to its lowest-power mode. Infallible by design: a
    /// failed power-down write has no caller-visible recovery.
    fn release(&mut self);

    /// Scoped read: acquire, read, release — release runs even when the
    /// read fails.
    fn read_gated(&mut self) -> Result<PowerSample, SensorError> {
        self.acquire()?;
        let sample = self.read();
        self.release();
        sample
    }
}

// ───────────────────────────────────────────────────────────────
// Temperature probe port
// ───────────────────────────────────────────────────────────────

/// Read-side port for the two fixed-identity temperature probes.
pub trait ProbePort {
    /// Trigger one conversion cycle covering **both** probes and wait it
    /// out. Reading two probes together costs one conversion, not two.
    fn request_conversion(&mut self);

    /// Fetch the last converted temperature (°C) of one probe. Failure is
    /// local to that probe and does not affect the other.
    fn read_probe(&mut self, probe: ProbeId) -> Result<f32, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Relay port (actuator)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the load-disconnect relay.
pub trait RelayPort {
    /// Drive the relay pin.
    fn set_relay(&mut self, state: RelayState);

    /// Mirror of the pin as last driven.
    fn relay_state(&self) -> RelayState;
}

// ───────────────────────────────────────────────────────────────
// Line sink port (console output)
// ───────────────────────────────────────────────────────────────

/// The domain emits replies and autonomous events through this port, one
/// line per call. Command replies and relay events share the stream and
/// interleave; the consumer distinguishes them by shape.
pub trait LineSink {
    fn send_line(&mut self, line: &str);
}
