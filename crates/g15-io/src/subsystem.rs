//! Input/output dispatch: the seam between the command interpreter and the
//! paper tape reader, punch, typewriter, and plotter.
//!
//! Nothing here runs a wall clock. Each call represents one word-time's
//! worth of progress; the caller (the machine orchestration layer) is the
//! one deciding how that word-time maps to real time.

use g15_core::{CoreError, Drum, IoDispatch};

use crate::codes::TerminationCode;

/// Which peripheral currently owns the I/O line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Device {
    PaperTapeReader,
    PaperTapePunch,
    Typewriter,
    Plotter,
}

/// Result of feeding the subsystem one more word-time of service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoOutcome {
    /// The operation is still running; call again next word-time.
    Pending,
    /// The operation ended normally (a Stop code, or the device ran dry).
    Complete,
    /// The operation was cut short by [`IOSubsystem::cancel_io`].
    Canceled,
}

/// Word-times between two bell rings below which the second ring is
/// suppressed, expressed as whole drum revolutions.
const BELL_MIN_GAP_REVOLUTIONS: u64 = 3;

/// Owns the busy/cancel protocol shared by every peripheral and precesses
/// incoming characters into the drum's input line.
pub struct IOSubsystem {
    active: Option<Device>,
    /// Source address latched by `start_output`, the drum line an output
    /// block transmits from (§4.4's "transmit the source line").
    output_source: Option<u8>,
    canceled: bool,
    bell_last_ring: Option<u64>,
}

impl IOSubsystem {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            active: None,
            output_source: None,
            canceled: false,
            bell_last_ring: None,
        }
    }

    #[must_use]
    pub const fn active_device(&self) -> Option<Device> {
        self.active
    }

    /// The drum address an active output block is transmitting from.
    #[must_use]
    pub const fn output_source(&self) -> Option<u8> {
        self.output_source
    }

    /// Feed one already-filtered 5-bit code in from the reader or keyboard,
    /// precessing it onto the drum's input line. A recognized Stop code ends
    /// the block.
    pub fn receive_input_code(&mut self, drum: &mut Drum, code: u8) -> IoOutcome {
        self.active.get_or_insert(Device::PaperTapeReader);
        if self.canceled {
            return self.finish(IoOutcome::Canceled);
        }
        drum.precess(code & 0x1F);
        if matches!(TerminationCode::from_internal(code), Some(TerminationCode::Stop)) {
            return self.finish(IoOutcome::Complete);
        }
        IoOutcome::Pending
    }

    /// Begin an output operation on `device`, transmitting from `source`;
    /// fails with a violation if the line is already busy.
    pub fn start_output(&mut self, device: Device, source: u8) -> Result<(), CoreError> {
        if self.active.is_some() {
            return Err(CoreError::Violation);
        }
        self.active = Some(device);
        self.output_source = Some(source);
        self.canceled = false;
        Ok(())
    }

    /// Deliver one outgoing code; `None` means the device has no more data
    /// and the operation ends.
    pub fn send_output_code(&mut self, code: Option<u8>) -> IoOutcome {
        if self.canceled {
            return self.finish(IoOutcome::Canceled);
        }
        match code {
            Some(_) => IoOutcome::Pending,
            None => self.finish(IoOutcome::Complete),
        }
    }

    /// Request that the current operation stop at its next opportunity.
    pub fn cancel_io(&mut self) {
        if self.active.is_some() {
            self.canceled = true;
        }
    }

    fn finish(&mut self, outcome: IoOutcome) -> IoOutcome {
        self.active = None;
        self.output_source = None;
        self.canceled = false;
        outcome
    }

    /// Ring the bell for a field of `word_times` width at the given absolute
    /// word-time. Returns the amplitude (0.0..=1.0, scaled by field width up
    /// to one drum revolution) or `None` if the minimum gap since the last
    /// ring hasn't elapsed.
    pub fn ring_bell(&mut self, now_word_time: u64, word_times: u32) -> Option<f32> {
        const WORDS_PER_REVOLUTION: u64 = g15_core::WORDS_PER_REVOLUTION as u64;
        if let Some(last) = self.bell_last_ring {
            if now_word_time.saturating_sub(last) < BELL_MIN_GAP_REVOLUTIONS * WORDS_PER_REVOLUTION {
                return None;
            }
        }
        self.bell_last_ring = Some(now_word_time);
        Some((word_times as f32 / WORDS_PER_REVOLUTION as f32).min(1.0))
    }
}

impl Default for IOSubsystem {
    fn default() -> Self {
        Self::new()
    }
}

impl IoDispatch for IOSubsystem {
    fn start(&mut self, characteristic: u8, source: u8, destination: u8) -> Result<(), CoreError> {
        // `destination` is always the I/O trigger address itself (29); it
        // carries no further meaning once the command has been dispatched.
        let _ = destination;
        let device = match characteristic & 0b11 {
            0 => Device::PaperTapePunch,
            1 => Device::Typewriter,
            2 => Device::Plotter,
            _ => Device::PaperTapeReader,
        };
        self.start_output(device, source)
    }

    fn is_busy(&self) -> bool {
        self.active.is_some()
    }

    fn cancel(&mut self) {
        self.cancel_io();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use g15_core::Drum;

    #[test]
    fn stop_code_ends_the_input_block() {
        let mut drum = Drum::new();
        let mut io = IOSubsystem::new();
        assert_eq!(io.receive_input_code(&mut drum, 3), IoOutcome::Pending);
        assert_eq!(io.receive_input_code(&mut drum, 4), IoOutcome::Complete);
        assert!(io.active_device().is_none());
    }

    #[test]
    fn cancel_ends_the_next_call() {
        let mut drum = Drum::new();
        let mut io = IOSubsystem::new();
        io.receive_input_code(&mut drum, 0);
        io.cancel_io();
        assert_eq!(io.receive_input_code(&mut drum, 0), IoOutcome::Canceled);
    }

    #[test]
    fn bell_suppressed_inside_minimum_gap() {
        let mut io = IOSubsystem::new();
        assert!(io.ring_bell(0, 10).is_some());
        assert!(io.ring_bell(10, 10).is_none());
        assert!(io.ring_bell(3 * 108, 10).is_some());
    }

    #[test]
    fn dispatch_rejects_double_start() {
        let mut io = IOSubsystem::new();
        assert!(io.start(1, 0, 29).is_ok());
        assert!(io.start(1, 0, 29).is_err());
    }
}
