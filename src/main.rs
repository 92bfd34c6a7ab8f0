//! Solar Monitor Firmware — Main Entry Point
//!
//! Hexagonal architecture around a single cooperative control loop:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Adapters (outer ring)                    │
//! │                                                              │
//! │  HardwareAdapter                 SerialConsole               │
//! │  (PowerMeter+Probes+Relay)       (line input + LineSink)     │
//! │                                                              │
//! │  ─────────────── Port Trait Boundary ──────────────────      │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────┐      │
//! │  │           MonitorService (pure logic)              │      │
//! │  │  relay hysteresis · command dispatch               │      │
//! │  └────────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each loop iteration runs one autonomous relay tick first, then at most
//! one console command. CPU frequency scaling and radio shutdown (the other
//! half of the power budget) are handled by sdkconfig, not here.

#![deny(unused_must_use)]

// ── Module declarations ───────────────────────────────────────
pub mod config;
mod control;
mod error;
mod pins;
mod telemetry;

pub mod app;
mod adapters;
mod drivers;
mod sensors;

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use core::time::Duration;
use log::{info, warn};

use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::FromValueType;

use adapters::console::SerialConsole;
use adapters::hardware::HardwareAdapter;
use app::service::MonitorService;
use config::SystemConfig;
use drivers::relay::RelayDriver;
use sensors::power_meter::PowerMeter;
use sensors::probes::TemperatureProbes;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("solarmon v{} starting", env!("CARGO_PKG_VERSION"));

    // ── 2. Peripherals ────────────────────────────────────────
    if let Err(e) = drivers::hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        // In production the watchdog resets the chip after timeout.
        log::error!("hw_init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    let peripherals = Peripherals::take()?;
    let i2c_config = I2cConfig::new().baudrate(100.kHz().into());
    // SDA/SCL per pins::I2C_SDA_GPIO / I2C_SCL_GPIO.
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio21,
        peripherals.pins.gpio22,
        &i2c_config,
    )?;

    // ── 3. Gateways and adapters ──────────────────────────────
    let config = SystemConfig::default();

    // Boot-time detection: an absent meter stays absent until reboot.
    let meter = PowerMeter::new(i2c, pins::INA219_ADDR, config.meter_settle_ms);
    if !meter.is_present() {
        warn!("meter absent: 's' reports errors, AUTO control is inert");
    }

    let probes = TemperatureProbes::new(&config);
    let relay = RelayDriver::new();
    let mut hw = HardwareAdapter::new(meter, probes, relay);
    let mut console = SerialConsole::new();

    // ── 4. Service + control loop ─────────────────────────────
    let mut service = MonitorService::new(&config);
    let interval = Duration::from_millis(u64::from(config.control_loop_interval_ms));

    info!("system ready, entering control loop");

    loop {
        // Autonomous control first: a command handled below takes effect
        // starting with the next iteration's tick.
        service.tick(&mut hw, &mut console);

        if let Some(line) = console.poll_line() {
            service.handle_line(&line, &mut hw, &mut console);
        }

        std::thread::sleep(interval);
    }
}
