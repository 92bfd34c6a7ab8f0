//! INA219 bus voltage/current/power meter, power-gated.
//!
//! The meter spends its life in power-down and is woken only for the
//! duration of a read: wake via a config-register write, wait out the
//! settle time, read the three result registers, put it back to sleep.
//! The sleep write runs on **every** exit path of a read — see
//! [`PowerMeterPort::read_gated`](crate::app::ports::PowerMeterPort).
//!
//! Generic over [`embedded_hal::i2c::I2c`] so the register protocol can be
//! exercised against a scripted bus on the host.

use core::time::Duration;

use embedded_hal::i2c::I2c;
use log::warn;

use crate::app::ports::PowerMeterPort;
use crate::error::SensorError;

// ── Register map ──────────────────────────────────────────────

const REG_CONFIG: u8 = 0x00;
const REG_BUS_VOLTAGE: u8 = 0x02;
const REG_POWER: u8 = 0x03;
const REG_CURRENT: u8 = 0x04;
const REG_CALIBRATION: u8 = 0x05;

/// 32 V range, ±320 mV shunt gain, 12-bit continuous conversion.
const CONFIG_ACTIVE: u16 = 0x399F;
/// Same configuration with the mode bits cleared: power-down.
const CONFIG_POWER_DOWN: u16 = CONFIG_ACTIVE & !0x0007;

/// Calibration for a 0.1 Ω shunt at 0.1 mA/bit: 0.04096 / (lsb × R).
const CALIBRATION: u16 = 4096;
const CURRENT_LSB_MA: f32 = 0.1;
/// The power register counts in units of 20 × the current LSB.
const POWER_LSB_MW: f32 = 20.0 * CURRENT_LSB_MA;
/// Bus voltage register: result is left-shifted 3, in 4 mV steps.
const BUS_VOLTAGE_LSB_MV: f32 = 4.0;

/// One complete meter sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerSample {
    pub voltage_v: f32,
    pub current_ma: f32,
    pub power_mw: f32,
}

/// INA219 gateway. Detection happens once, in [`new`](Self::new): a device
/// that does not answer at boot stays unavailable until reboot.
pub struct PowerMeter<I2C> {
    i2c: I2C,
    addr: u8,
    settle: Duration,
    present: bool,
}

impl<I2C: I2c> PowerMeter<I2C> {
    /// Probe the device, program its calibration, and leave it powered
    /// down. Any failure here marks the meter absent for good.
    pub fn new(i2c: I2C, addr: u8, settle_ms: u32) -> Self {
        let mut meter = Self {
            i2c,
            addr,
            settle: Duration::from_millis(u64::from(settle_ms)),
            present: false,
        };
        match meter.calibrate() {
            Ok(()) => meter.present = true,
            Err(_) => warn!("power meter: no INA219 at 0x{:02X}, readings disabled", addr),
        }
        meter
    }

    /// Sticky boot-time detection result.
    pub fn is_present(&self) -> bool {
        self.present
    }

    fn calibrate(&mut self) -> Result<(), SensorError> {
        self.write_register(REG_CALIBRATION, CALIBRATION)?;
        self.write_register(REG_CONFIG, CONFIG_POWER_DOWN)?;
        Ok(())
    }

    fn write_register(&mut self, reg: u8, value: u16) -> Result<(), SensorError> {
        let [hi, lo] = value.to_be_bytes();
        self.i2c
            .write(self.addr, &[reg, hi, lo])
            .map_err(|_| SensorError::BusFault)
    }

    fn read_register(&mut self, reg: u8) -> Result<u16, SensorError> {
        let mut buf = [0u8; 2];
        self.i2c
            .write_read(self.addr, &[reg], &mut buf)
            .map_err(|_| SensorError::BusFault)?;
        Ok(u16::from_be_bytes(buf))
    }
}

impl<I2C: I2c> PowerMeterPort for PowerMeter<I2C> {
    fn acquire(&mut self) -> Result<(), SensorError> {
        if !self.present {
            return Err(SensorError::Unavailable);
        }
        self.write_register(REG_CONFIG, CONFIG_ACTIVE)?;
        // Blocking settle: the first conversion after leaving power-down is
        // not trustworthy. Stalls the whole loop for its duration — accepted
        // latency/simplicity tradeoff.
        std::thread::sleep(self.settle);
        Ok(())
    }

    fn read(&mut self) -> Result<PowerSample, SensorError> {
        let bus_raw = self.read_register(REG_BUS_VOLTAGE)?;
        let current_raw = self.read_register(REG_CURRENT)? as i16;
        let power_raw = self.read_register(REG_POWER)?;

        Ok(PowerSample {
            voltage_v: f32::from(bus_raw >> 3) * BUS_VOLTAGE_LSB_MV / 1000.0,
            current_ma: f32::from(current_raw) * CURRENT_LSB_MA,
            power_mw: f32::from(power_raw) * POWER_LSB_MW,
        })
    }

    fn release(&mut self) {
        // A failed sleep write costs idle power, nothing else; log and move on.
        if self.write_register(REG_CONFIG, CONFIG_POWER_DOWN).is_err() {
            warn!("power meter: power-down write failed, device may stay awake");
        }
    }
}
