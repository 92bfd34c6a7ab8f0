//! Console command vocabulary and line parsing.
//!
//! One newline-terminated line is one command. The verb is matched exactly
//! against the table below; the two threshold setters take a single float
//! argument in the form `<verb> <value>`. Argument problems are carried as
//! `None` in the payload — explicit, never silently coerced — and rejected
//! by the dispatcher with an invalid-value reply.
//!
//! | verb           | effect                                   |
//! |----------------|------------------------------------------|
//! | `o`            | read outdoor probe                       |
//! | `i`            | read indoor probe                        |
//! | `t`            | read both probes (single conversion)     |
//! | `s`            | gated power-meter read                   |
//! | `r`            | read relay state                         |
//! | `r1` / `r0`    | force relay ON / OFF, mode → MANUAL      |
//! | `auto`         | mode → AUTO                              |
//! | `manual`       | mode → MANUAL                            |
//! | `set_on_V <v>` | set the close threshold (v > 0)          |
//! | `set_off_V <v>`| set the open threshold (v > 0)           |
//! | `get_settings` | report mode and thresholds               |

/// A parsed console command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    ReadOutdoor,
    ReadIndoor,
    ReadBoth,
    ReadSolar,
    ReadRelay,
    RelayOn,
    RelayOff,
    ModeAuto,
    ModeManual,
    /// `None` when the argument is missing or unparsable.
    SetOnThreshold(Option<f32>),
    SetOffThreshold(Option<f32>),
    GetSettings,
    /// Anything that did not match the verb table.
    Unrecognized,
}

impl Command {
    /// Parse one input line. Surrounding whitespace is trimmed; the verb
    /// must match exactly. Never fails — unmatched input parses to
    /// [`Unrecognized`](Self::Unrecognized).
    pub fn parse(line: &str) -> Self {
        let mut tokens = line.split_whitespace();
        let verb = tokens.next().unwrap_or("");
        let arg = tokens.next();

        // A third token makes the line ill-formed regardless of verb.
        if tokens.next().is_some() {
            return Self::Unrecognized;
        }

        match (verb, arg) {
            ("o", None) => Self::ReadOutdoor,
            ("i", None) => Self::ReadIndoor,
            ("t", None) => Self::ReadBoth,
            ("s", None) => Self::ReadSolar,
            ("r", None) => Self::ReadRelay,
            ("r1", None) => Self::RelayOn,
            ("r0", None) => Self::RelayOff,
            ("auto", None) => Self::ModeAuto,
            ("manual", None) => Self::ModeManual,
            ("get_settings", None) => Self::GetSettings,
            ("set_on_V", arg) => Self::SetOnThreshold(parse_float_arg(arg)),
            ("set_off_V", arg) => Self::SetOffThreshold(parse_float_arg(arg)),
            _ => Self::Unrecognized,
        }
    }
}

/// Strict float grammar for setter arguments. `None` on absence or parse
/// failure; range validation (must be positive) belongs to the control
/// state setter.
fn parse_float_arg(arg: Option<&str>) -> Option<f32> {
    arg.and_then(|s| s.parse::<f32>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_verbs_parse() {
        assert_eq!(Command::parse("o"), Command::ReadOutdoor);
        assert_eq!(Command::parse("i"), Command::ReadIndoor);
        assert_eq!(Command::parse("t"), Command::ReadBoth);
        assert_eq!(Command::parse("s"), Command::ReadSolar);
        assert_eq!(Command::parse("r"), Command::ReadRelay);
        assert_eq!(Command::parse("r1"), Command::RelayOn);
        assert_eq!(Command::parse("r0"), Command::RelayOff);
        assert_eq!(Command::parse("auto"), Command::ModeAuto);
        assert_eq!(Command::parse("manual"), Command::ModeManual);
        assert_eq!(Command::parse("get_settings"), Command::GetSettings);
    }

    #[test]
    fn whitespace_is_trimmed() {
        assert_eq!(Command::parse("  r1  \r"), Command::RelayOn);
        assert_eq!(Command::parse("\tset_on_V  12.8 "), Command::SetOnThreshold(Some(12.8)));
    }

    #[test]
    fn verbs_are_matched_exactly() {
        assert_eq!(Command::parse("R1"), Command::Unrecognized);
        assert_eq!(Command::parse("relay"), Command::Unrecognized);
        assert_eq!(Command::parse("set_on_v 12.0"), Command::Unrecognized);
        assert_eq!(Command::parse("auto2"), Command::Unrecognized);
        assert_eq!(Command::parse(""), Command::Unrecognized);
        assert_eq!(Command::parse("   "), Command::Unrecognized);
    }

    #[test]
    fn bare_verbs_reject_stray_arguments() {
        assert_eq!(Command::parse("o 5"), Command::Unrecognized);
        assert_eq!(Command::parse("auto now"), Command::Unrecognized);
    }

    #[test]
    fn setter_arguments_parse_or_carry_none() {
        assert_eq!(Command::parse("set_on_V 13.0"), Command::SetOnThreshold(Some(13.0)));
        assert_eq!(Command::parse("set_off_V 11.9"), Command::SetOffThreshold(Some(11.9)));
        // Non-positive values still parse here; the control state rejects them.
        assert_eq!(Command::parse("set_on_V -1"), Command::SetOnThreshold(Some(-1.0)));

        assert_eq!(Command::parse("set_on_V"), Command::SetOnThreshold(None));
        assert_eq!(Command::parse("set_on_V twelve"), Command::SetOnThreshold(None));
        assert_eq!(Command::parse("set_off_V 12,4"), Command::SetOffThreshold(None));
    }

    #[test]
    fn setter_rejects_extra_tokens() {
        assert_eq!(Command::parse("set_on_V 12.0 13.0"), Command::Unrecognized);
    }
}
