//! Load-disconnect relay driver.
//!
//! A dumb actuator: drives the coil pin and mirrors the last commanded
//! state. All policy (hysteresis, manual overrides) lives in the
//! application core; this driver never decides anything.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: writes the real GPIO via the hw_init shim.
//! On host/test: the shim is a no-op and only the mirror updates.

use crate::control::RelayState;
use crate::drivers::hw_init;
use crate::pins;

pub struct RelayDriver {
    state: RelayState,
}

impl RelayDriver {
    /// Construct with the relay open — the pin is already low from
    /// peripheral init, so mirror and hardware agree at boot.
    pub fn new() -> Self {
        Self {
            state: RelayState::Off,
        }
    }

    pub fn set(&mut self, state: RelayState) {
        hw_init::gpio_write(pins::RELAY_GPIO, matches!(state, RelayState::On));
        self.state = state;
    }

    /// Mirror of the pin as last driven.
    pub fn state(&self) -> RelayState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boots_open() {
        let relay = RelayDriver::new();
        assert_eq!(relay.state(), RelayState::Off);
    }

    #[test]
    fn mirror_follows_commands() {
        let mut relay = RelayDriver::new();
        relay.set(RelayState::On);
        assert_eq!(relay.state(), RelayState::On);
        relay.set(RelayState::Off);
        assert_eq!(relay.state(), RelayState::Off);
    }
}
