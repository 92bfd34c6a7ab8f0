//! Fuzz target: `Command::parse`
//!
//! Drives arbitrary byte sequences through the console line parser and
//! asserts that it never panics and that the strict argument grammar holds:
//! a parsed setter payload is always a real (non-NaN-producing) float token,
//! and garbage never silently coerces into a bare verb.
//!
//! cargo fuzz run fuzz_parse_command

#![no_main]

use libfuzzer_sys::fuzz_target;
use solarmon::app::commands::Command;

fuzz_target!(|data: &[u8]| {
    let Ok(line) = core::str::from_utf8(data) else {
        return;
    };

    let cmd = Command::parse(line);

    // A carried setter value must have come from a parseable second token.
    if let Command::SetOnThreshold(Some(v)) | Command::SetOffThreshold(Some(v)) = cmd {
        let mut tokens = line.split_whitespace();
        let _verb = tokens.next();
        let arg = tokens.next().expect("a carried value implies an argument");
        let reparsed: f32 = arg.parse().expect("argument must be a float token");
        assert!(v == reparsed || (v.is_nan() && reparsed.is_nan()));
    }

    // Bare verbs never absorb extra tokens.
    if matches!(cmd, Command::ReadSolar | Command::RelayOn | Command::RelayOff) {
        assert_eq!(line.split_whitespace().count(), 1);
    }
});
