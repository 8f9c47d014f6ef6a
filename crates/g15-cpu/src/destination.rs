//! Decoding the 5-bit destination address into a storage location or one of
//! the three operation-code destinations in 29..=31.

use g15_core::{track_for_address, Track};

/// What a command's destination field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Storage(Track),
    /// Address 29: latch an I/O operation.
    Io,
    /// Address 30: trigger shift/multiply/divide/normalize (selected by C).
    ArithOp,
    /// Address 31: halt.
    Halt,
}

impl Destination {
    #[must_use]
    pub const fn decode(d: u8) -> Self {
        match track_for_address(d) {
            Some(track) => Self::Storage(track),
            None => match d {
                29 => Self::Io,
                30 => Self::ArithOp,
                _ => Self::Halt,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_arithop_halt_addresses() {
        assert_eq!(Destination::decode(29), Destination::Io);
        assert_eq!(Destination::decode(30), Destination::ArithOp);
        assert_eq!(Destination::decode(31), Destination::Halt);
    }

    #[test]
    fn storage_addresses_map_to_tracks() {
        assert_eq!(Destination::decode(0), Destination::Storage(Track::Long(0)));
        assert_eq!(Destination::decode(24), Destination::Storage(Track::Ar));
    }
}
