//! The command interpreter: fetch/decode/execute cycle driven by the drum
//! clock, one word-time at a time.

use g15_core::{Command, ComputeSwitch, CoreError, Drum, FlipFlops, IoDispatch, SystemBus, Track, Word};

use crate::arithmetic::{self, ArithOp};
use crate::destination::Destination;
use crate::trace::{TraceRecord, TraceSink};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    AwaitFetch,
    AwaitExecute,
}

/// The command interpreter. Owns the documented flip-flops and the
/// currently-decoded command; everything else (drum contents, I/O state,
/// switch positions) is passed in by reference on each tick.
pub struct CommandInterpreter {
    pub flipflops: FlipFlops,
    current: Command,
    phase: Phase,
    /// Word-time at which the next fetch should occur (from the prior
    /// command's N field, or 0 after a reset).
    fetch_position: u8,
    /// Revolution count (as reported by the drum) at or after which the
    /// currently-decoded command may execute.
    target_revolution: u64,
}

impl CommandInterpreter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            flipflops: FlipFlops::reset(),
            current: Command::unpack(Word::ZERO),
            phase: Phase::AwaitFetch,
            fetch_position: 0,
            target_revolution: 0,
        }
    }

    /// System reset: flip-flops and fetch position return to their initial
    /// state. Drum contents are untouched (the caller resets L separately).
    pub fn reset(&mut self) {
        self.flipflops = FlipFlops::reset();
        self.phase = Phase::AwaitFetch;
        self.fetch_position = 0;
    }

    #[must_use]
    pub const fn is_halted(&self) -> bool {
        self.flipflops.ch
    }

    /// Clear CH and resume from a halted state.
    pub fn start(&mut self) {
        self.flipflops.ch = false;
    }

    /// Advance by one word-time.
    pub fn tick<IO: IoDispatch>(
        &mut self,
        drum: &mut Drum,
        io: &mut IO,
        bus: &mut SystemBus,
        mut trace: Option<&mut dyn TraceSink>,
    ) {
        let l = drum.position();
        let halted = self.flipflops.ch || bus.compute == ComputeSwitch::Off;

        if !halted {
            if self.phase == Phase::AwaitFetch {
                self.try_fetch(drum, l);
            }
            // Falls through in the same word-time a fetch just happened, so
            // the P=0/T==L tie-break (execute immediately) and the P=1/T==L
            // tie-break (target_revolution is already one ahead) both fall
            // out of the same check rather than needing special-casing.
            if self.phase == Phase::AwaitExecute {
                let revolution_ready = drum.revolution() >= self.target_revolution;
                if revolution_ready && l == self.current.t {
                    self.execute(drum, io, bus, trace.as_deref_mut());
                    self.schedule_next();
                }
            }
        }

        // TR reflects the I/O subsystem's own busy state, not just the
        // moment a command latched it: once the active device's block ends
        // (normally or via cancel), the line goes idle and TR follows it.
        if self.flipflops.tr && !io.is_busy() {
            self.flipflops.tr = false;
        }

        drum.rotate();
    }

    fn try_fetch(&mut self, drum: &mut Drum, l: u8) {
        if !self.flipflops.rc || l != self.fetch_position {
            return;
        }
        let word = drum.read_word(Track::Cm, l as usize);
        self.current = Command::unpack(word);
        self.flipflops.rc = false;
        self.flipflops.bp = self.current.breakpoint;
        self.flipflops.di = self.current.deferred;
        // Deferred (P=1) always targets the next revolution; immediate
        // (P=0) targets this one, including the T == L tie-break case.
        self.target_revolution = drum.revolution() + u64::from(self.current.deferred);
        self.phase = Phase::AwaitExecute;
    }

    fn schedule_next(&mut self) {
        if self.current.is_halt() {
            self.flipflops.ch = true;
            self.flipflops.rc = false;
        } else {
            self.fetch_position = self.current.n;
            self.flipflops.rc = true;
        }
        self.phase = Phase::AwaitFetch;
    }

    fn read_operand(&self, drum: &Drum, address: u8) -> Word {
        match g15_core::track_for_address(address) {
            Some(track) => drum.read_at_current(track),
            None => Word::ZERO,
        }
    }

    fn execute<IO: IoDispatch>(
        &mut self,
        drum: &mut Drum,
        io: &mut IO,
        bus: &mut SystemBus,
        trace: Option<&mut dyn TraceSink>,
    ) {
        let cmd = self.current;
        let before = self.flipflops;

        match Destination::decode(cmd.destination) {
            Destination::Storage(Track::Ar) => {
                let operand = self.read_operand(drum, cmd.source);
                let op = ArithOp::from_characteristic(cmd.characteristic);
                let accumulator = drum.read_word(Track::Ar, 0);
                let result = arithmetic::apply(op, accumulator, operand);
                drum.write_word(Track::Ar, 0, result.value);
                self.flipflops.fo |= result.overflow;
                self.flipflops.cq = result.value.is_zero();
            }
            Destination::Storage(dest_track) => {
                if let Some(source_track) = g15_core::track_for_address(cmd.source) {
                    let both_pairs = cmd.double_precision
                        && is_register_pair(dest_track)
                        && is_register_pair(source_track);
                    if both_pairs {
                        drum.write_word(dest_track, 0, drum.read_word(source_track, 0));
                        drum.write_word(dest_track, 1, drum.read_word(source_track, 1));
                    } else {
                        let value = drum.read_at_current(source_track);
                        drum.write_at_current(dest_track, value);
                    }
                }
            }
            Destination::Io => {
                // Starting a second I/O while the line is already busy is a
                // violation (§7): latch VV on the bus rather than silently
                // dropping the command.
                match io.start(cmd.characteristic, cmd.source, cmd.destination) {
                    Ok(()) => self.flipflops.tr = true,
                    Err(CoreError::Violation) => bus.latch_violation(),
                    Err(_) => {}
                }
            }
            Destination::ArithOp => self.execute_arith_op(drum, cmd),
            Destination::Halt => self.flipflops.ch = true,
        }

        if let Some(sink) = trace {
            sink.record(TraceRecord {
                l: drum.position(),
                command: cmd,
                flipflops_before: before,
                flipflops_after: self.flipflops,
            });
        }
    }

    fn execute_arith_op(&mut self, drum: &mut Drum, cmd: Command) {
        match cmd.characteristic {
            0 => {
                // Shift: source field doubles as the shift amount (0..=31),
                // since the characteristic is fully spent selecting this op.
                let pn = drum.read_word(Track::Pn, 0);
                let mq = drum.read_word(Track::Mq, 0);
                let (pn2, mq2) = arithmetic::shift_left(pn, mq, u32::from(cmd.source));
                drum.write_word(Track::Pn, 0, pn2);
                drum.write_word(Track::Mq, 0, mq2);
            }
            1 => {
                let multiplicand = self.read_operand(drum, cmd.source);
                let multiplier = drum.read_word(Track::Mq, 0);
                let product = arithmetic::multiply(multiplicand, multiplier);
                drum.write_word(Track::Pn, 0, product.pn);
                drum.write_word(Track::Mq, 0, product.mq);
                self.flipflops.ip = product.pn.sign();
                self.flipflops.fo |= product.overflow;
            }
            2 => {
                let divisor = self.read_operand(drum, cmd.source);
                if divisor.is_zero() {
                    self.flipflops.fo = true;
                } else {
                    let pn_high = drum.read_word(Track::Pn, 0);
                    let id_low = drum.read_word(Track::Id, 0);
                    let quotient = arithmetic::divide(pn_high, id_low, divisor);
                    drum.write_word(Track::Mq, 0, quotient.mq);
                    drum.write_word(Track::Pn, 0, quotient.pn);
                    self.flipflops.fo |= quotient.overflow;
                }
            }
            _ => {
                let pn = drum.read_word(Track::Pn, 0);
                let mq = drum.read_word(Track::Mq, 0);
                let (pn2, mq2, shifts) = arithmetic::normalize(pn, mq);
                drum.write_word(Track::Pn, 0, pn2);
                drum.write_word(Track::Mq, 0, mq2);
                let ar = drum.read_word(Track::Ar, 0);
                drum.write_word(Track::Ar, 0, Word::from_signed(ar.to_signed() - shifts as i32));
            }
        }
    }
}

impl Default for CommandInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

const fn is_register_pair(track: Track) -> bool {
    matches!(track, Track::Mq | Track::Id | Track::Pn)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullIo;
    impl IoDispatch for NullIo {
        fn start(&mut self, _c: u8, _s: u8, _d: u8) -> Result<(), CoreError> {
            Ok(())
        }
        fn is_busy(&self) -> bool {
            false
        }
        fn cancel(&mut self) {}
    }

    fn run_until(interp: &mut CommandInterpreter, drum: &mut Drum, ticks: u32) {
        let mut io = NullIo;
        let mut bus = SystemBus::new();
        bus.compute = ComputeSwitch::Go;
        for _ in 0..ticks {
            interp.tick(drum, &mut io, &mut bus, None);
        }
    }

    #[test]
    fn scenario_add_one_plus_two() {
        // Preload long line 0 word0=+1, word1=+2. Two chained commands each
        // add one word into AR: the first (T=0, N=1) adds word0 and fetches
        // the next command at word-time 1; the second (T=1) adds word1.
        // End state: AR=+3.
        let mut drum = Drum::new();
        drum.write_word(Track::Long(0), 0, Word::from_signed(1));
        drum.write_word(Track::Long(0), 1, Word::from_signed(2));

        let cmd0 = Command {
            deferred: false,
            t: 0,
            breakpoint: false,
            n: 1,
            characteristic: 0,
            source: 0,
            destination: 24,
            double_precision: false,
        };
        drum.write_word(Track::Cm, 0, cmd0.pack());

        let cmd1 = Command {
            deferred: false,
            t: 1,
            breakpoint: false,
            n: 0,
            characteristic: 0,
            source: 0,
            destination: 24,
            double_precision: false,
        };
        drum.write_word(Track::Cm, 1, cmd1.pack());

        let mut interp = CommandInterpreter::new();
        interp.start();
        interp.flipflops.rc = true;
        run_until(&mut interp, &mut drum, 2);

        assert_eq!(drum.read_word(Track::Ar, 0), Word::from_signed(3));
        assert!(!interp.flipflops.fo);
    }

    #[test]
    fn halt_command_sets_ch_and_stops_fetching() {
        let mut drum = Drum::new();
        let halt_cmd = Command {
            deferred: false,
            t: 0,
            breakpoint: false,
            n: 0,
            characteristic: 0,
            source: 0,
            destination: 31,
            double_precision: false,
        };
        drum.write_word(Track::Cm, 0, halt_cmd.pack());

        let mut interp = CommandInterpreter::new();
        interp.start();
        interp.flipflops.rc = true;
        run_until(&mut interp, &mut drum, 2);

        assert!(interp.is_halted());
    }
}
