//! Console adapter — the UART line channel.
//!
//! Input: accumulates RX bytes into a fixed-capacity buffer and yields at
//! most one newline-terminated line per poll. Never blocks: a poll with no
//! complete line pending returns `None` immediately.
//!
//! Output: implements [`LineSink`] by printing one line per call. Command
//! replies, autonomous relay events and log output all share UART0; the
//! host side keeps only `{...}` lines, so the JSON framing is what
//! separates protocol from noise.

use heapless::String;
use log::warn;

use crate::app::ports::LineSink;
use crate::drivers::hw_init;

/// Longest accepted input line. Anything longer is discarded whole.
pub const MAX_LINE_LEN: usize = 96;

/// Line-oriented console over the UART shims.
pub struct SerialConsole {
    buf: String<MAX_LINE_LEN>,
    overflowed: bool,
}

impl SerialConsole {
    pub fn new() -> Self {
        Self {
            buf: String::new(),
            overflowed: false,
        }
    }

    /// Drain available RX bytes; return the next complete line, if any.
    ///
    /// CR and LF both terminate a line, so CRLF terminals produce no empty
    /// phantom lines. A line that overruns [`MAX_LINE_LEN`] is dropped in
    /// full rather than truncated into a different command.
    pub fn poll_line(&mut self) -> Option<String<MAX_LINE_LEN>> {
        while let Some(byte) = hw_init::uart_read_byte() {
            match byte {
                b'\n' | b'\r' => {
                    if self.overflowed {
                        warn!("console: dropped over-long input line");
                        self.overflowed = false;
                        self.buf.clear();
                        continue;
                    }
                    if self.buf.is_empty() {
                        continue;
                    }
                    let line = self.buf.clone();
                    self.buf.clear();
                    return Some(line);
                }
                _ => {
                    if self.overflowed {
                        continue;
                    }
                    if self.buf.push(byte as char).is_err() {
                        self.overflowed = true;
                    }
                }
            }
        }
        None
    }
}

impl LineSink for SerialConsole {
    fn send_line(&mut self, line: &str) {
        println!("{line}");
    }
}
