//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the business rules for the solar monitor: the
//! autonomous relay tick and the console command dispatch. All interaction
//! with hardware happens through **port traits** defined in [`ports`],
//! keeping this layer fully testable without real peripherals.

pub mod commands;
pub mod ports;
pub mod service;
