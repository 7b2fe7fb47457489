use log::debug;
use serde::Serialize;

use crate::tables;

pub const EXTENDED_PREFIX: u8 = 0xE0;
pub const PAUSE_PREFIX: u8 = 0xE1;
pub const BREAK_PREFIX: u8 = 0xF0;

/// Longest prefix trail kept before the decoder assumes a corrupted stream
/// and resets itself.
const MAX_PENDING: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    Press,
    Release,
}

/// A fully decoded key transition, including the raw byte trail that
/// produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyEvent {
    pub key_name: String,
    pub direction: Direction,
    pub extended: bool,
    pub raw_bytes: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecoderState {
    pub expecting_break: bool,
    pub expecting_extended: bool,
    pub pending: Vec<u8>,
    pub pause_prefix: bool,
}

/// Scan Code Set 2 state machine.
///
/// Consumes one validated byte at a time, tracking the `0xE0`/`0xF0` prefix
/// flags until a terminal scan code arrives. The `0xE1` pause sequence is not
/// decoded in full: it restarts the byte trail and is left to the overflow
/// guard, which is fine for ordinary typing since pause is the only key that
/// uses it.
#[derive(Debug, Default)]
pub struct Set2Decoder {
    state: DecoderState,
}

impl Set2Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DecoderState {
        &self.state
    }

    /// Feeds one byte through the machine; returns an event once a terminal
    /// scan code completes a sequence.
    pub fn consume(&mut self, byte: u8) -> Option<KeyEvent> {
        let event = match byte {
            EXTENDED_PREFIX => {
                self.state.expecting_extended = true;
                self.state.pending.push(byte);
                None
            }
            PAUSE_PREFIX => {
                self.state.pending = vec![byte];
                self.state.pause_prefix = true;
                None
            }
            BREAK_PREFIX => {
                self.state.expecting_break = true;
                self.state.pending.push(byte);
                None
            }
            _ => {
                let key_name = tables::lookup(byte, self.state.expecting_extended);
                let mut raw_bytes = std::mem::take(&mut self.state.pending);
                raw_bytes.push(byte);
                let event = KeyEvent {
                    key_name,
                    direction: if self.state.expecting_break {
                        Direction::Release
                    } else {
                        Direction::Press
                    },
                    extended: self.state.expecting_extended,
                    raw_bytes,
                };
                self.state = DecoderState::default();
                Some(event)
            }
        };

        if self.state.pending.len() > MAX_PENDING {
            debug!("prefix trail exceeded {MAX_PENDING} bytes, resetting decoder");
            self.state = DecoderState::default();
        }
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn consume_all(decoder: &mut Set2Decoder, bytes: &[u8]) -> Vec<KeyEvent> {
        bytes.iter().filter_map(|&b| decoder.consume(b)).collect()
    }

    #[test]
    fn plain_scan_code_is_a_press() {
        let mut decoder = Set2Decoder::new();
        let event = decoder.consume(0x1C).expect("event expected");
        assert_eq!(event.key_name, "A");
        assert_eq!(event.direction, Direction::Press);
        assert!(!event.extended);
        assert_eq!(event.raw_bytes, vec![0x1C]);
    }

    #[test]
    fn break_prefix_turns_the_event_into_a_release() {
        let mut decoder = Set2Decoder::new();
        assert!(decoder.consume(0xF0).is_none());
        let event = decoder.consume(0x1C).expect("event expected");
        assert_eq!(event.key_name, "A");
        assert_eq!(event.direction, Direction::Release);
        assert_eq!(event.raw_bytes, vec![0xF0, 0x1C]);
        assert_eq!(*decoder.state(), DecoderState::default());
    }

    #[test]
    fn extended_prefix_selects_the_extended_table() {
        let mut decoder = Set2Decoder::new();
        let events = consume_all(&mut decoder, &[0xE0, 0x75]);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].key_name, "UP");
        assert_eq!(events[0].direction, Direction::Press);
        assert!(events[0].extended);
    }

    #[test]
    fn extended_break_sequence_releases_an_extended_key() {
        let mut decoder = Set2Decoder::new();
        let events = consume_all(&mut decoder, &[0xE0, 0xF0, 0x75]);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].key_name, "UP");
        assert_eq!(events[0].direction, Direction::Release);
        assert!(events[0].extended);
        assert_eq!(events[0].raw_bytes, vec![0xE0, 0xF0, 0x75]);
    }

    #[test]
    fn unmapped_byte_still_emits_with_a_fallback_label() {
        let mut decoder = Set2Decoder::new();
        let event = decoder.consume(0x02).expect("event expected");
        assert_eq!(event.key_name, "UNKNOWN_02");
    }

    #[test]
    fn pause_prefix_restarts_the_byte_trail() {
        let mut decoder = Set2Decoder::new();
        assert!(decoder.consume(0xE0).is_none());
        assert!(decoder.consume(0xE1).is_none());
        assert_eq!(decoder.state().pending, vec![0xE1]);
        assert!(decoder.state().pause_prefix);
    }

    #[test]
    fn prefix_overflow_resets_silently_and_decoding_resumes_fresh() {
        let mut decoder = Set2Decoder::new();
        for _ in 0..9 {
            assert!(decoder.consume(0xF0).is_none());
        }
        assert_eq!(*decoder.state(), DecoderState::default());

        // The next ordinary byte decodes with no leftover break flag.
        let event = decoder.consume(0x1C).expect("event expected");
        assert_eq!(event.direction, Direction::Press);
        assert_eq!(event.raw_bytes, vec![0x1C]);
    }
}
