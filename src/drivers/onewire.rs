//! One-wire bus primitives (ESP-IDF only).
//!
//! Bit-banged Dallas one-wire master over a single open-drain GPIO with an
//! external pull-up. Timings follow the DS18B20 datasheet standard-speed
//! figures. The bus is not reentrant: all calls happen from the main loop.
//!
//! ROM discovery is deliberately absent — both probe identities are
//! compiled in (`pins::*_PROBE_ROM`) and selected with MATCH ROM.

use esp_idf_svc::sys::*;

// ── ROM / function commands ───────────────────────────────────

pub const CMD_SKIP_ROM: u8 = 0xCC;
pub const CMD_MATCH_ROM: u8 = 0x55;
pub const CMD_CONVERT_T: u8 = 0x44;
pub const CMD_READ_SCRATCHPAD: u8 = 0xBE;

// ── Pin helpers ───────────────────────────────────────────────

fn drive_low(pin: i32) {
    // SAFETY: pin is configured open-drain output in hw_init; register
    // write from the single main-loop context.
    unsafe {
        gpio_set_level(pin, 0);
    }
}

fn release(pin: i32) {
    // SAFETY: see drive_low.
    unsafe {
        gpio_set_level(pin, 1);
    }
}

fn sample(pin: i32) -> bool {
    // SAFETY: read-only register access on a configured pin.
    (unsafe { gpio_get_level(pin) }) != 0
}

fn delay_us(us: u32) {
    // SAFETY: busy-wait in ROM code; no side effects.
    unsafe {
        esp_rom_delay_us(us);
    }
}

// ── Bus primitives ────────────────────────────────────────────

/// Reset pulse. Returns `true` when at least one device answered with a
/// presence pulse.
pub fn reset(pin: i32) -> bool {
    drive_low(pin);
    delay_us(480);
    release(pin);
    delay_us(70);
    let presence = !sample(pin);
    delay_us(410);
    presence
}

fn write_bit(pin: i32, bit: bool) {
    if bit {
        drive_low(pin);
        delay_us(6);
        release(pin);
        delay_us(64);
    } else {
        drive_low(pin);
        delay_us(60);
        release(pin);
        delay_us(10);
    }
}

fn read_bit(pin: i32) -> bool {
    drive_low(pin);
    delay_us(6);
    release(pin);
    delay_us(9);
    let bit = sample(pin);
    delay_us(55);
    bit
}

/// Write one byte, LSB first.
pub fn write_byte(pin: i32, byte: u8) {
    for i in 0..8 {
        write_bit(pin, (byte >> i) & 0x01 != 0);
    }
}

/// Read one byte, LSB first.
pub fn read_byte(pin: i32) -> u8 {
    let mut byte = 0u8;
    for i in 0..8 {
        if read_bit(pin) {
            byte |= 1 << i;
        }
    }
    byte
}

/// Address every device on the bus at once.
pub fn skip_rom(pin: i32) {
    write_byte(pin, CMD_SKIP_ROM);
}

/// Address a single device by its 64-bit ROM identity.
pub fn match_rom(pin: i32, rom: &[u8; 8]) {
    write_byte(pin, CMD_MATCH_ROM);
    for &byte in rom {
        write_byte(pin, byte);
    }
}
