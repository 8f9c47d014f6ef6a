//! The seam between the command interpreter and whatever handles the I/O
//! range of destinations. Defined here (rather than in the interpreter's own
//! crate) so the I/O subsystem crate can implement it without depending back
//! on the interpreter.

use crate::error::CoreError;

/// What the command interpreter needs from the I/O subsystem when a command
/// targets the I/O destination.
pub trait IoDispatch {
    /// Latch an I/O command: `characteristic` selects the operation variant,
    /// `source` names the drum line to transmit (for output) or is ignored
    /// (for input start), `device` selects which peripheral is addressed.
    ///
    /// Returns `Err(CoreError::Violation)` if an I/O is already in progress.
    fn start(&mut self, characteristic: u8, source: u8, device: u8) -> Result<(), CoreError>;

    /// True while an I/O block is in progress.
    fn is_busy(&self) -> bool;

    /// Cancel the active I/O. Idempotent.
    fn cancel(&mut self);
}
