//! GPIO / peripheral assignments for the solar monitor board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers or bus addresses.

// ---------------------------------------------------------------------------
// Load relay
// ---------------------------------------------------------------------------

/// Digital output driving the load-disconnect relay coil (active HIGH).
pub const RELAY_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// One-wire temperature probes (DS18B20)
// ---------------------------------------------------------------------------

/// Shared one-wire data line for both probes (external 4.7 kΩ pull-up).
pub const ONEWIRE_GPIO: i32 = 4;

/// Fixed ROM identity of the outdoor probe. Probes are addressed by ROM id
/// rather than bus enumeration order so a wiring swap cannot exchange them.
pub const OUTDOOR_PROBE_ROM: [u8; 8] = [0x28, 0x09, 0x8A, 0xC0, 0x00, 0x00, 0x00, 0xC7];
/// Fixed ROM identity of the indoor probe.
pub const INDOOR_PROBE_ROM: [u8; 8] = [0x28, 0x07, 0xBB, 0x83, 0x00, 0x00, 0x00, 0xF5];

/// Probe conversion resolution in bits (9–12). 10 bits = 0.25 °C steps.
pub const PROBE_RESOLUTION_BITS: u8 = 10;

// ---------------------------------------------------------------------------
// I²C bus (power meter)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 21;
pub const I2C_SCL_GPIO: i32 = 22;

/// INA219 bus/shunt power monitor, default slave address.
pub const INA219_ADDR: u8 = 0x40;

// ---------------------------------------------------------------------------
// Console UART
// ---------------------------------------------------------------------------

/// UART0 doubles as log output and the command channel.
pub const CONSOLE_UART: u32 = 0;
pub const CONSOLE_BAUD: u32 = 115_200;
