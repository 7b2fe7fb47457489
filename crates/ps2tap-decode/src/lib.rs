//! Scan-code decoding: Scan Code Set 2 state machine and key tables.

pub mod set2;
pub mod tables;

pub use set2::{Direction, KeyEvent, Set2Decoder};
