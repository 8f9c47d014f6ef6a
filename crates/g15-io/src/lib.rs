//! Character codes and the I/O dispatch seam between the command
//! interpreter and the peripherals.

mod codes;
mod subsystem;

pub use codes::{external_to_internal, internal_to_printable, reverse_bits5, TerminationCode, IGNORED};
pub use subsystem::{Device, IOSubsystem, IoOutcome};
