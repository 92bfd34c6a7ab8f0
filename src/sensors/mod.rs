//! Sensor gateways — the power meter and the temperature probe pair.
//!
//! Both gateways expose exactly the operations the domain ports need and
//! keep the bus protocol details (register maps, one-wire timing) out of
//! the application core.

pub mod power_meter;
pub mod probes;
