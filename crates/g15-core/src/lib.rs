//! Drum storage model and 29-bit word semantics for the core emulation engine.
//!
//! Everything else in the emulator builds on three things defined here: the
//! [`Word`] representation, the [`Drum`] that stores 29-bit words across long
//! and fast tracks plus the special register lines, and the word-time clock
//! ([`WordTimes`], [`RotationalPosition`]) that all components share.

mod bitfield;
mod bus;
mod command;
mod drum;
mod error;
mod flipflops;
mod iface;
mod observable;
mod word;
mod wordtime;

pub use bitfield::BitField;
pub use bus::{ComputeSwitch, EnableSwitch, PunchSwitch, SystemBus};
pub use command::{Command, HALT_ADDRESS, MAX_ADDRESS};
pub use drum::{
    track_for_address, Drum, Track, FAST_TRACKS, FAST_TRACK_LEN, INPUT_TRACK, LONG_TRACKS,
    LONG_TRACK_LEN,
};
pub use error::CoreError;
pub use flipflops::FlipFlops;
pub use iface::IoDispatch;
pub use observable::{Observable, Value};
pub use word::{Word, MAGNITUDE_BITS, MAGNITUDE_MASK, WORD_BITS, WORD_MASK};
pub use wordtime::{RotationalPosition, WordTimes, WORDS_PER_REVOLUTION};
