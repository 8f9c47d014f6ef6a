//! Error kinds surfaced by the core (see DESIGN.md for the error table).

use std::fmt;

/// Errors produced by core operations. Nothing in the core panics or
/// unwinds on these conditions; callers explicitly match on the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreError {
    /// Unsafe destination during the power-up window, or a double-started I/O.
    Violation,
    /// A device sent a code while precession was still in progress.
    InputOverrun,
    /// A device refused an output code mid-block.
    OutputOverrun,
    /// An in-flight I/O was cancelled by user action.
    IoCanceled,
    /// The reader hit end of tape mid-block.
    EndOfMedium,
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Violation => write!(f, "violation: unsafe operation latched VV"),
            Self::InputOverrun => write!(f, "input overrun: code received before precession completed"),
            Self::OutputOverrun => write!(f, "output overrun: device refused an output code"),
            Self::IoCanceled => write!(f, "I/O cancelled"),
            Self::EndOfMedium => write!(f, "end of medium reached mid-block"),
        }
    }
}

impl std::error::Error for CoreError {}
