//! The two-address command format packed into a single drum word.
//!
//! | Field | Width | Bit range | Meaning                              |
//! |-------|-------|-----------|---------------------------------------|
//! | P     | 1     | 0         | immediate (0) vs deferred (1)         |
//! | T     | 7     | 1..=7     | word-time of execution                |
//! | BP    | 1     | 8         | breakpoint flag                       |
//! | N     | 7     | 9..=15    | next-command word-time                |
//! | C     | 2     | 16..=17   | characteristic (operation modifier)   |
//! | S     | 5     | 18..=22   | source address                        |
//! | D     | 5     | 23..=27   | destination address                   |
//! | DS    | 1     | 28        | double/single precision selector      |
//!
//! The fields sum to 29 bits and fill the word exactly.

use crate::bitfield::BitField;
use crate::word::Word;

const P: BitField = BitField::new(0, 1);
const T: BitField = BitField::new(1, 7);
const BP: BitField = BitField::new(8, 1);
const N: BitField = BitField::new(9, 7);
const C: BitField = BitField::new(16, 2);
const S: BitField = BitField::new(18, 5);
const D: BitField = BitField::new(23, 5);
const DS: BitField = BitField::new(28, 1);

/// Highest address that can be named by an S or D field (5 bits).
pub const MAX_ADDRESS: u8 = 31;

/// Destination/source address reserved for the explicit halt command.
pub const HALT_ADDRESS: u8 = 31;

/// A command word unpacked into its named fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    /// Immediate (false) vs deferred (true) execution.
    pub deferred: bool,
    /// Word-time of execution within the selected revolution.
    pub t: u8,
    /// Breakpoint flag.
    pub breakpoint: bool,
    /// Word-time at which the next command fetch should occur.
    pub n: u8,
    /// Characteristic: 2-bit operation modifier.
    pub characteristic: u8,
    /// Source address (0..=31).
    pub source: u8,
    /// Destination address (0..=31).
    pub destination: u8,
    /// Double (true) vs single (false) precision selector.
    pub double_precision: bool,
}

impl Command {
    /// Unpack a command word into its fields.
    #[must_use]
    pub fn unpack(word: Word) -> Self {
        let bits = word.bits();
        Self {
            deferred: P.extract(bits) != 0,
            t: T.extract(bits) as u8,
            breakpoint: BP.extract(bits) != 0,
            n: N.extract(bits) as u8,
            characteristic: C.extract(bits) as u8,
            source: S.extract(bits) as u8,
            destination: D.extract(bits) as u8,
            double_precision: DS.extract(bits) != 0,
        }
    }

    /// Repack the fields into a single drum word.
    #[must_use]
    pub fn pack(self) -> Word {
        let mut bits = 0u32;
        bits = P.insert(bits, self.deferred as u32);
        bits = T.insert(bits, u32::from(self.t));
        bits = BP.insert(bits, self.breakpoint as u32);
        bits = N.insert(bits, u32::from(self.n));
        bits = C.insert(bits, u32::from(self.characteristic));
        bits = S.insert(bits, u32::from(self.source));
        bits = D.insert(bits, u32::from(self.destination));
        bits = DS.insert(bits, self.double_precision as u32);
        Word::new(bits)
    }

    /// True if this command halts the interpreter (D = 31).
    #[must_use]
    pub const fn is_halt(self) -> bool {
        self.destination == HALT_ADDRESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_unpack_round_trips() {
        let cmd = Command {
            deferred: true,
            t: 53,
            breakpoint: true,
            n: 12,
            characteristic: 2,
            source: 19,
            destination: 24,
            double_precision: false,
        };
        let round_tripped = Command::unpack(cmd.pack());
        assert_eq!(cmd, round_tripped);
    }

    #[test]
    fn halt_address_detected() {
        let mut cmd = Command::unpack(Word::ZERO);
        cmd.destination = HALT_ADDRESS;
        assert!(cmd.is_halt());
    }

    #[test]
    fn fields_fill_the_word_exactly() {
        let cmd = Command {
            deferred: true,
            t: 0x7F,
            breakpoint: true,
            n: 0x7F,
            characteristic: 0b11,
            source: 0b1_1111,
            destination: 0b1_1111,
            double_precision: true,
        };
        assert_eq!(cmd.pack().bits(), crate::word::WORD_MASK);
    }
}
