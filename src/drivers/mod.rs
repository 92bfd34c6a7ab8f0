//! Low-level peripheral drivers.
//!
//! Everything here is either one-shot boot configuration ([`hw_init`]) or a
//! dumb actuator/bus primitive. Policy lives in the application core.

pub mod hw_init;
#[cfg(target_os = "espidf")]
pub mod onewire;
pub mod relay;
