#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure steering system that turns player heading intents into world commands.

use thiserror::Error;
use torus_snake_core::{Command, Event, Heading};

/// Steering system that forwards at most one heading change per tick.
///
/// Intents only reach the world while a session is live. When several
/// intents pile up between ticks, the most recent one that leaves the
/// current axis wins, so a quick double tap cannot fold the head back
/// into the neck.
#[derive(Clone, Debug)]
pub struct Steering {
    live: bool,
    heading: Heading,
}

impl Default for Steering {
    fn default() -> Self {
        Self::new()
    }
}

impl Steering {
    /// Creates a steering system that waits for a session to start.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            live: false,
            heading: Heading::Right,
        }
    }

    /// Reports whether the system currently forwards intents.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        self.live
    }

    /// Consumes world events and queued intents to emit heading commands.
    pub fn handle(&mut self, events: &[Event], intents: &[Heading], out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::SessionStarted { heading, .. } => {
                    self.live = true;
                    self.heading = *heading;
                }
                Event::HeadingChanged { to, .. } => self.heading = *to,
                Event::GameOver { .. } => self.live = false,
                _ => {}
            }
        }

        if !self.live {
            return;
        }

        let current = self.heading;
        if let Some(heading) = intents
            .iter()
            .rev()
            .copied()
            .find(|heading| !heading.shares_axis_with(current))
        {
            out.push(Command::SetHeading { heading });
        }
    }
}

/// Sequence of per-tick heading intents written as a compact string.
///
/// `U`, `D`, `L` and `R` (any case) request a heading on that tick, `.`
/// leaves the heading alone. Whitespace is ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Script {
    moves: Vec<Option<Heading>>,
}

impl Script {
    /// Parses a script string.
    pub fn parse(source: &str) -> Result<Self, ScriptError> {
        let mut moves = Vec::with_capacity(source.len());
        for (index, symbol) in source.chars().enumerate() {
            if symbol.is_whitespace() {
                continue;
            }
            let intent = match symbol.to_ascii_uppercase() {
                'U' => Some(Heading::Up),
                'D' => Some(Heading::Down),
                'L' => Some(Heading::Left),
                'R' => Some(Heading::Right),
                '.' => None,
                _ => return Err(ScriptError::UnknownSymbol { index, symbol }),
            };
            moves.push(intent);
        }
        Ok(Self { moves })
    }

    /// Number of ticks covered by the script.
    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Reports whether the script covers no ticks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Intent scheduled for the provided tick. Ticks past the end carry no intent.
    #[must_use]
    pub fn intent_at(&self, tick: usize) -> Option<Heading> {
        self.moves.get(tick).copied().flatten()
    }
}

/// Reasons a script string is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ScriptError {
    /// The script contains a character outside `UDLR.`.
    #[error("unexpected move {symbol:?} at position {index}")]
    UnknownSymbol {
        /// Character offset of the symbol.
        index: usize,
        /// Offending character.
        symbol: char,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_skips_whitespace_and_keeps_gaps() {
        let script = Script::parse("r. d\nL").expect("valid script");
        assert_eq!(script.len(), 4);
        assert_eq!(script.intent_at(0), Some(Heading::Right));
        assert_eq!(script.intent_at(1), None);
        assert_eq!(script.intent_at(2), Some(Heading::Down));
        assert_eq!(script.intent_at(3), Some(Heading::Left));
        assert_eq!(script.intent_at(99), None);
    }

    #[test]
    fn script_rejects_unknown_symbols() {
        assert_eq!(
            Script::parse("UDx"),
            Err(ScriptError::UnknownSymbol {
                index: 2,
                symbol: 'x'
            })
        );
    }
}
