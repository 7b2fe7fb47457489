use thiserror::Error;

/// One 11-bit PS/2 transmission: start, 8 data bits (LSB first), odd parity, stop.
///
/// Built fresh per transmission by the sampler and consumed immediately; the
/// levels are kept as sampled so a malformed frame can still be reported with
/// whatever byte value its data bits spell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub start: bool,
    pub data: [bool; 8],
    pub parity: bool,
    pub stop: bool,
}

/// Framing-bit violation: the start bit must be LOW and the stop bit HIGH.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid frame {value:#04X} (start={start}, stop={stop})")]
pub struct InvalidFrame {
    pub value: u8,
    pub start: bool,
    pub stop: bool,
}

impl Frame {
    /// Reconstructs the byte, bit 0 sampled first and least significant.
    pub fn value(&self) -> u8 {
        self.data
            .iter()
            .enumerate()
            .fold(0u8, |acc, (i, &bit)| acc | ((bit as u8) << i))
    }

    /// Odd-parity check over the data bits.
    ///
    /// Informational only: parity has never gated validity in this decoder,
    /// so a mismatch is surfaced in logs but the byte is still accepted.
    pub fn parity_ok(&self) -> bool {
        let ones = self.data.iter().filter(|&&b| b).count() as u8 + self.parity as u8;
        ones % 2 == 1
    }

    pub fn decode(&self) -> Result<u8, InvalidFrame> {
        let value = self.value();
        if !self.start && self.stop {
            Ok(value)
        } else {
            Err(InvalidFrame { value, start: self.start, stop: self.stop })
        }
    }
}
