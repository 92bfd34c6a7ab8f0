//! One-shot hardware peripheral initialization and raw pin/UART shims.
//!
//! Configures GPIO directions and the console UART receive path using raw
//! ESP-IDF sys calls. Called once from `main()` before the control loop
//! starts. On host targets the shims are no-ops or read from simulation
//! state so the rest of the crate compiles and tests unchanged.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
    UartDriverFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::UartDriverFailed(rc) => write!(f, "UART driver install failed (rc={})", rc),
        }
    }
}

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the control loop; single-threaded.
    unsafe {
        init_relay_gpio()?;
        init_onewire_gpio()?;
        init_console_uart()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── Relay GPIO ────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_relay_gpio() -> Result<(), HwInitError> {
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::RELAY_GPIO,
        mode: gpio_mode_t_GPIO_MODE_OUTPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::GpioConfigFailed(ret));
    }
    // Relay boots open (load disconnected).
    unsafe { gpio_set_level(pins::RELAY_GPIO, 0) };
    info!("hw_init: relay GPIO configured");
    Ok(())
}

// ── One-wire GPIO ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_onewire_gpio() -> Result<(), HwInitError> {
    // Open-drain with the external 4.7 kΩ pull-up: drive 0 to pull the bus
    // low, drive 1 to release it.
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::ONEWIRE_GPIO,
        mode: gpio_mode_t_GPIO_MODE_INPUT_OUTPUT_OD,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::GpioConfigFailed(ret));
    }
    unsafe { gpio_set_level(pins::ONEWIRE_GPIO, 1) }; // released
    info!("hw_init: one-wire GPIO configured");
    Ok(())
}

// ── Console UART ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_console_uart() -> Result<(), HwInitError> {
    // UART0 TX is already routed to the console by the bootloader; install
    // the driver so RX bytes can be polled without blocking.
    let ret = unsafe {
        uart_driver_install(
            pins::CONSOLE_UART as i32,
            256, // RX ring buffer
            0,   // no TX buffer: writes stay blocking
            0,
            core::ptr::null_mut(),
            0,
        )
    };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::UartDriverFailed(ret));
    }
    info!("hw_init: console UART driver installed");
    Ok(())
}

// ── GPIO shims ────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an already-configured output pin;
    // pin was validated during init_peripherals(). Main-loop only.
    unsafe {
        gpio_set_level(pin, if high { 1 } else { 0 });
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) {}

// ── UART shims ────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn uart_read_byte() -> Option<u8> {
    let mut byte = 0u8;
    // SAFETY: driver installed in init_console_uart(); zero timeout makes
    // this a pure poll. Main-loop only.
    let n = unsafe {
        uart_read_bytes(
            pins::CONSOLE_UART as i32,
            (&raw mut byte).cast(),
            1,
            0,
        )
    };
    (n == 1).then_some(byte)
}

#[cfg(not(target_os = "espidf"))]
pub fn uart_read_byte() -> Option<u8> {
    sim_uart::pop()
}

// ── Host-side UART simulation ─────────────────────────────────

#[cfg(not(target_os = "espidf"))]
pub mod sim_uart {
    //! Byte-queue stand-in for the console RX path on host builds.

    use std::collections::VecDeque;
    use std::sync::Mutex;

    static RX_QUEUE: Mutex<VecDeque<u8>> = Mutex::new(VecDeque::new());

    /// Queue bytes for [`uart_read_byte`](super::uart_read_byte) to return.
    pub fn push(bytes: &[u8]) {
        RX_QUEUE.lock().unwrap().extend(bytes.iter().copied());
    }

    /// Drop anything still queued (test isolation).
    pub fn clear() {
        RX_QUEUE.lock().unwrap().clear();
    }

    pub(super) fn pop() -> Option<u8> {
        RX_QUEUE.lock().unwrap().pop_front()
    }
}
