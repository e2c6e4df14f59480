//! Scripted input for the headless driver.
//!
//! One event per line, `<frame> <action> [args..]`:
//!
//! ```text
//! # walk forward for a second, then stop
//! 10 down w
//! 70 up w
//! 80 press x
//! 90 pointer 400 300 800 600
//! 95 click videos/intro.mp4
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.

use std::collections::VecDeque;
use std::str::FromStr;

use crate::error::ScriptError;
use crate::events::{InputEvent, Key, KeyPhase};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputScript {
    events: VecDeque<(u64, InputEvent)>,
}

impl InputScript {
    pub fn parse(source: &str) -> Result<Self, ScriptError> {
        let mut events = Vec::new();
        for (index, raw) in source.lines().enumerate() {
            let line = index + 1;
            let text = raw.trim();
            if text.is_empty() || text.starts_with('#') {
                continue;
            }
            events.push(parse_line(line, text)?);
        }

        // Stable, so same-frame events keep their file order
        events.sort_by_key(|(frame, _)| *frame);
        Ok(Self {
            events: events.into(),
        })
    }

    /// Removes and returns every event scheduled at or before `frame`.
    pub fn take_due(&mut self, frame: u64) -> Vec<InputEvent> {
        let mut due = Vec::new();
        while self.events.front().is_some_and(|(at, _)| *at <= frame) {
            if let Some((_, event)) = self.events.pop_front() {
                due.push(event);
            }
        }
        due
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Frame of the last scheduled event, if any.
    pub fn last_frame(&self) -> Option<u64> {
        self.events.back().map(|(frame, _)| *frame)
    }
}

fn parse_line(line: usize, text: &str) -> Result<(u64, InputEvent), ScriptError> {
    let mut parts = text.split_whitespace();
    let (Some(frame), Some(action)) = (parts.next(), parts.next()) else {
        return Err(ScriptError::Malformed { line });
    };

    let frame = frame.parse::<u64>().map_err(|_| ScriptError::InvalidFrame {
        line,
        value: frame.to_string(),
    })?;

    let event = match action {
        "click" => InputEvent::Click {
            video: parts.next().map(str::to_string),
        },
        "pointer" => {
            let mut number = || -> Result<f32, ScriptError> {
                let value = parts.next().ok_or(ScriptError::Malformed { line })?;
                value.parse::<f32>().map_err(|_| ScriptError::InvalidNumber {
                    line,
                    value: value.to_string(),
                })
            };
            InputEvent::PointerMove {
                x: number()?,
                y: number()?,
                width: number()?,
                height: number()?,
            }
        }
        _ => {
            let phase = KeyPhase::from_str(action).map_err(|_| ScriptError::UnknownAction {
                line,
                value: action.to_string(),
            })?;
            let value = parts.next().ok_or(ScriptError::Malformed { line })?;
            let key = Key::from_str(value).map_err(|_| ScriptError::UnknownKey {
                line,
                value: value.to_string(),
            })?;
            InputEvent::Key { key, phase }
        }
    };

    Ok((frame, event))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_orders_events() {
        let script = InputScript::parse("# comment\n20 up W\n\n10 down w\n15 pointer 0 0 100 100\n").unwrap();
        let mut script = script;
        assert_eq!(script.take_due(10), vec![InputEvent::key_down(Key::W)]);
        assert_eq!(script.take_due(19).len(), 1);
        assert_eq!(script.take_due(25), vec![InputEvent::key_up(Key::W)]);
        assert!(script.is_empty());
    }

    #[test]
    fn reports_the_offending_line() {
        assert_eq!(
            InputScript::parse("1 down w\n2 jump w"),
            Err(ScriptError::UnknownAction {
                line: 2,
                value: "jump".to_string()
            })
        );
        assert_eq!(
            InputScript::parse("1 down q"),
            Err(ScriptError::UnknownKey {
                line: 1,
                value: "q".to_string()
            })
        );
    }
}
