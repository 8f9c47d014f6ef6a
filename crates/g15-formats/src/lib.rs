//! Paper tape image formats.
//!
//! `.pti` is a human-editable text listing: one character per code, `#`
//! starts a comment that runs to end of line, and bare `\r`/`\n` are frame
//! separators rather than codes (unlike a punched space, which is itself
//! meaningful code 0 and must round-trip exactly).
//!
//! `.ptr`/`.pt` are binary images, one byte per tape frame. `.ptr` lays
//! channels out as `___54321` (bit 0 of the byte is channel 1, the code's
//! own bit order, unreversed); `.pt` lays them out as `___12345`, equivalent
//! to `.ptr` with the low 5 bits bit-reversed. Both ignore the top 3 bits of
//! each byte on read and leave them zero on write.

use std::fmt;

use g15_io::{external_to_internal, internal_to_printable, reverse_bits5, IGNORED};

#[derive(Debug)]
pub enum FormatError {
    /// Byte at this offset didn't decode to a recognized character.
    UnrecognizedByte { offset: usize, byte: u8 },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnrecognizedByte { offset, byte } => {
                write!(f, "unrecognized character {byte:#04x} at offset {offset}")
            }
        }
    }
}

impl std::error::Error for FormatError {}

/// Parse a `.pti` text listing into the sequence of internal 5-bit codes it
/// punches, stripping `#` comments and frame-separator whitespace.
pub fn parse_pti(text: &str) -> Result<Vec<u8>, FormatError> {
    let mut codes = Vec::new();
    let mut in_comment = false;
    for (offset, byte) in text.bytes().enumerate() {
        match byte {
            b'#' => in_comment = true,
            b'\n' | b'\r' | b'\x0c' => in_comment = false,
            _ if in_comment => {}
            _ => {
                let code = external_to_internal(byte);
                if code == IGNORED {
                    return Err(FormatError::UnrecognizedByte { offset, byte });
                }
                codes.push(code);
            }
        }
    }
    Ok(codes)
}

/// Render a sequence of internal codes as a `.pti` text listing.
#[must_use]
pub fn write_pti(codes: &[u8]) -> String {
    codes.iter().map(|&c| internal_to_printable(c)).collect()
}

/// Parse a `.ptr` binary image (`___54321`, the code's own bit order) into
/// internal codes.
#[must_use]
pub fn parse_ptr(bytes: &[u8]) -> Vec<u8> {
    bytes.iter().map(|&b| b & 0x1F).collect()
}

/// Render internal codes as a `.ptr` binary image (`___54321`, the code's
/// own bit order).
#[must_use]
pub fn write_ptr(codes: &[u8]) -> Vec<u8> {
    codes.iter().map(|&c| c & 0x1F).collect()
}

/// Parse a `.pt` binary image (`___12345`, bit-reversed relative to `.ptr`)
/// into internal codes.
#[must_use]
pub fn parse_pt(bytes: &[u8]) -> Vec<u8> {
    bytes.iter().map(|&b| reverse_bits5(b & 0x1F)).collect()
}

/// Render internal codes as a `.pt` binary image (`___12345`, bit-reversed
/// relative to `.ptr`).
#[must_use]
pub fn write_pt(codes: &[u8]) -> Vec<u8> {
    codes.iter().map(|&c| reverse_bits5(c & 0x1F)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pti_round_trips_through_printable_characters() {
        let codes = vec![16, 17, 0, 1, 3, 4];
        let text = write_pti(&codes);
        assert_eq!(parse_pti(&text).unwrap(), codes);
    }

    #[test]
    fn pti_comment_is_stripped() {
        let codes = parse_pti("01 # trailing remark\n23").unwrap();
        assert_eq!(codes, vec![16, 17, 0, 16 + 2, 16 + 3]);
    }

    #[test]
    fn pti_rejects_unrecognized_character() {
        assert!(parse_pti("0*1").is_err());
    }

    #[test]
    fn ptr_bit_order_round_trips() {
        let codes: Vec<u8> = (0..32).collect();
        assert_eq!(parse_ptr(&write_ptr(&codes)), codes);
    }

    #[test]
    fn pt_and_ptr_differ_by_bit_reversal() {
        let codes = vec![0b10010u8];
        let pt = write_pt(&codes);
        let ptr = write_ptr(&codes);
        assert_eq!(pt[0], codes[0]);
        assert_eq!(ptr[0], reverse_bits5(codes[0]));
        assert_ne!(pt[0], ptr[0]);
    }
}
