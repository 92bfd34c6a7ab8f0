//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the power meter, the probe pair and the relay driver, exposing them
//! through [`PowerMeterPort`], [`ProbePort`] and [`RelayPort`]. This is the
//! only module in the system that holds actual bus/pin drivers; on host
//! targets the underlying drivers use their simulation stubs.

use embedded_hal::i2c::I2c;

use crate::app::ports::{PowerMeterPort, ProbePort, RelayPort};
use crate::control::RelayState;
use crate::drivers::relay::RelayDriver;
use crate::error::SensorError;
use crate::sensors::power_meter::{PowerMeter, PowerSample};
use crate::sensors::probes::{ProbeId, TemperatureProbes};

/// Concrete adapter that combines all hardware behind the port traits.
pub struct HardwareAdapter<I2C> {
    meter: PowerMeter<I2C>,
    probes: TemperatureProbes,
    relay: RelayDriver,
}

impl<I2C: I2c> HardwareAdapter<I2C> {
    pub fn new(meter: PowerMeter<I2C>, probes: TemperatureProbes, relay: RelayDriver) -> Self {
        Self {
            meter,
            probes,
            relay,
        }
    }
}

// ── PowerMeterPort implementation ─────────────────────────────

impl<I2C: I2c> PowerMeterPort for HardwareAdapter<I2C> {
    fn acquire(&mut self) -> Result<(), SensorError> {
        self.meter.acquire()
    }

    fn read(&mut self) -> Result<PowerSample, SensorError> {
        self.meter.read()
    }

    fn release(&mut self) {
        self.meter.release();
    }
}

// ── ProbePort implementation ──────────────────────────────────

impl<I2C: I2c> ProbePort for HardwareAdapter<I2C> {
    fn request_conversion(&mut self) {
        self.probes.request_conversion();
    }

    fn read_probe(&mut self, probe: ProbeId) -> Result<f32, SensorError> {
        self.probes.read_probe(probe)
    }
}

// ── RelayPort implementation ──────────────────────────────────

impl<I2C: I2c> RelayPort for HardwareAdapter<I2C> {
    fn set_relay(&mut self, state: RelayState) {
        self.relay.set(state);
    }

    fn relay_state(&self) -> RelayState {
        self.relay.state()
    }
}
