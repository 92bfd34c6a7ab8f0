#![allow(dead_code)] // Top-level funnel reserved for typed port returns

//! Unified error types for the solar monitor firmware.
//!
//! A single `Error` enum that every subsystem can convert into, keeping the
//! control loop's error handling uniform. All variants are `Copy` so they can
//! be passed through the dispatcher and controller without allocation.
//!
//! Nothing here is fatal: the loop never halts or resets on an error. Every
//! failure is surfaced synchronously as the reply to the command that
//! triggered it (or swallowed with a log line on the autonomous tick path).

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A sensor could not be read.
    Sensor(SensorError),
    /// A console command was rejected.
    Command(CommandError),
    /// Peripheral initialisation failed.
    Init(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Command(e) => write!(f, "command: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The power meter was not detected at boot. Sticky: once set it holds
    /// for the lifetime of the process, no retry.
    Unavailable,
    /// An I²C transaction failed mid-read. Rendered the same as
    /// [`Unavailable`](Self::Unavailable) on the wire, distinct in logs.
    BusFault,
    /// A temperature probe did not answer or returned a corrupt scratchpad.
    /// Transient: re-evaluated on every poll, independent per probe.
    Disconnected,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "device not present at boot"),
            Self::BusFault => write!(f, "bus transaction failed"),
            Self::Disconnected => write!(f, "probe disconnected"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Command errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    /// Argument missing, unparsable, or not a positive number. The prior
    /// configuration is always left untouched.
    InvalidValue,
    /// Verb not in the command table.
    Unrecognized,
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue => write!(f, "invalid value"),
            Self::Unrecognized => write!(f, "unrecognized command"),
        }
    }
}

impl From<CommandError> for Error {
    fn from(e: CommandError) -> Self {
        Self::Command(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
