//! The assembled machine: drum, command interpreter, I/O subsystem,
//! peripherals, and the wall-clock scheduler that paces them.

pub mod config;

use std::sync::atomic::AtomicBool;

use g15_core::{ComputeSwitch, Drum, SystemBus};
use g15_cpu::{CommandInterpreter, TraceSink};
use g15_devices::{DeviceInterface, PaperTapePunch, PaperTapeReader, Plotter, Typewriter};
use g15_io::{Device, IOSubsystem};
use g15_scheduler::TimingScheduler;

pub use config::MachineConfig;

pub struct Machine {
    pub drum: Drum,
    pub interpreter: CommandInterpreter,
    pub bus: SystemBus,
    io: IOSubsystem,
    reader: PaperTapeReader,
    punch: PaperTapePunch,
    typewriter: Typewriter,
    plotter: Plotter,
    scheduler: TimingScheduler,
}

impl Machine {
    #[must_use]
    pub fn new(config: MachineConfig) -> Self {
        let mut bus = SystemBus::new();
        bus.power_up();
        Self {
            drum: Drum::new(),
            interpreter: CommandInterpreter::new(),
            bus,
            io: IOSubsystem::new(),
            reader: PaperTapeReader::new(config.reader_period_word_times),
            punch: PaperTapePunch::new(config.punch_period_word_times),
            typewriter: Typewriter::new(config.typewriter_period_word_times),
            plotter: Plotter::new(config.plotter_period_word_times),
            scheduler: TimingScheduler::from_drum_rpm(config.drum_rpm),
        }
    }

    /// Load a tape's worth of already-filtered internal codes into the
    /// reader, ready to be precessed in on the next `Io` command that picks
    /// the reader.
    pub fn load_reader_tape(&mut self, codes: impl IntoIterator<Item = u8>) {
        self.reader.load(codes);
    }

    /// Drain everything punched since the last call.
    pub fn take_punch_output(&mut self) -> Vec<u8> {
        self.punch.take_output()
    }

    #[must_use]
    pub fn typewriter_transcript(&self) -> &str {
        self.typewriter.printed()
    }

    #[must_use]
    pub fn plotter_path(&self) -> &[(i32, i32, bool)] {
        self.plotter.path()
    }

    pub fn start(&mut self) {
        self.bus.compute = ComputeSwitch::Go;
        self.interpreter.start();
    }

    pub fn stop(&mut self) {
        self.bus.compute = ComputeSwitch::Off;
    }

    #[must_use]
    pub fn is_halted(&self) -> bool {
        self.interpreter.is_halted()
    }

    /// Advance everything by one word-time.
    pub fn step(&mut self, trace: Option<&mut dyn TraceSink>) {
        self.interpreter.tick(&mut self.drum, &mut self.io, &mut self.bus, trace);
        self.service_io();
        self.punch.tick();
        self.typewriter.tick();
        self.plotter.tick();
    }

    /// Run word-times at the machine's configured real-time rate until
    /// halted or `cancel` is set.
    pub fn run_paced(&mut self, cancel: &AtomicBool) {
        while !self.is_halted() {
            self.step(None);
            if !self.scheduler.wait_for_next_word_time(cancel) {
                break;
            }
        }
    }

    /// Abort the active I/O: tell the owning device to stop accepting new
    /// frames, then let the I/O subsystem observe the cancellation once the
    /// in-flight character (if any) has drained.
    pub fn cancel_io(&mut self) {
        match self.io.active_device() {
            Some(Device::PaperTapeReader) => self.reader.cancel(),
            Some(Device::PaperTapePunch) => self.punch.cancel(),
            Some(Device::Typewriter) => self.typewriter.cancel(),
            Some(Device::Plotter) => self.plotter.cancel(),
            None => {}
        }
        self.io.cancel_io();
    }

    fn service_io(&mut self) {
        match self.io.active_device() {
            Some(Device::PaperTapeReader) => {
                if let Some(code) = self.reader.read() {
                    self.io.receive_input_code(&mut self.drum, code);
                } else if self.reader.is_canceled() {
                    // No further codes will come; let the subsystem observe
                    // the cancellation and go idle. The subsystem's own
                    // `canceled` flag (set by `cancel_io`) makes the `code`
                    // argument irrelevant here.
                    self.io.receive_input_code(&mut self.drum, 0);
                }
            }
            Some(device @ (Device::PaperTapePunch | Device::Typewriter | Device::Plotter)) => {
                self.service_output(device);
            }
            None => {}
        }
    }

    /// Feed one word-time of an active output block: transmit at most one
    /// code per device period (§4.4/§6.3), reading it from the command's
    /// latched source line rather than hardcoding the accumulator, and end
    /// the block on a Stop code or once the device has been cancelled and
    /// finished its in-flight character.
    fn service_output(&mut self, device: Device) {
        let busy = match device {
            Device::PaperTapePunch => self.punch.is_busy(),
            Device::Typewriter => self.typewriter.is_busy(),
            Device::Plotter => self.plotter.is_busy(),
            Device::PaperTapeReader => unreachable!(),
        };
        if busy {
            return;
        }

        let canceled = match device {
            Device::PaperTapePunch => self.punch.is_canceled(),
            Device::Typewriter => self.typewriter.is_canceled(),
            Device::Plotter => self.plotter.is_canceled(),
            Device::PaperTapeReader => unreachable!(),
        };
        if canceled {
            self.io.send_output_code(None);
            return;
        }

        let track = self
            .io
            .output_source()
            .and_then(g15_core::track_for_address)
            .unwrap_or(g15_core::Track::Ar);
        let code = self.drum.read_at_current(track).bits() as u8 & 0x1F;
        let stop = matches!(
            g15_io::TerminationCode::from_internal(code),
            Some(g15_io::TerminationCode::Stop)
        );
        match device {
            Device::PaperTapePunch => self.punch.write(code),
            Device::Typewriter => self.typewriter.write(code),
            Device::Plotter => self.plotter.write(code),
            Device::PaperTapeReader => unreachable!(),
        }
        self.io.send_output_code(if stop { None } else { Some(code) });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use g15_core::{Command, Track, Word};

    #[test]
    fn halted_machine_does_not_advance_l() {
        let mut machine = Machine::new(MachineConfig::default());
        let before = machine.drum.position();
        machine.step(None);
        // Halted (CH defaults true on power-up, before `start()` is called):
        // L still advances since the drum itself never stops turning, only
        // the interpreter does.
        assert_eq!(machine.drum.position(), before + 1);
    }

    #[test]
    fn starting_clears_the_halt_latch() {
        let mut machine = Machine::new(MachineConfig::default());
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
        machine.drum.write_word(Track::Cm, 0, halt_cmd.pack());
        machine.start();
        machine.interpreter.flipflops.rc = true;
        for _ in 0..2 {
            machine.step(None);
        }
        assert!(machine.is_halted());
    }

    fn typewriter_output_config() -> MachineConfig {
        MachineConfig {
            typewriter_period_word_times: 1,
            ..MachineConfig::default()
        }
    }

    fn typewriter_out_command() -> Command {
        Command {
            deferred: false,
            t: 0,
            breakpoint: false,
            n: 0,
            characteristic: 0b01,
            source: 5,
            destination: 29,
            double_precision: false,
        }
    }

    #[test]
    fn output_block_ends_on_stop_code() {
        let mut machine = Machine::new(typewriter_output_config());
        // Digits '0','1','2' then a Stop code; sampled starting at word 1
        // since L has already advanced past the word-time the Io command
        // itself executed on by the time `service_io` samples it.
        machine.drum.write_word(Track::Long(5), 1, Word::new(16));
        machine.drum.write_word(Track::Long(5), 2, Word::new(17));
        machine.drum.write_word(Track::Long(5), 3, Word::new(18));
        machine.drum.write_word(Track::Long(5), 4, Word::new(4));
        machine.drum.write_word(Track::Cm, 0, typewriter_out_command().pack());

        machine.start();
        machine.interpreter.flipflops.rc = true;
        for _ in 0..5 {
            machine.step(None);
        }

        // The Stop code itself is written to the device, same as the input
        // path precesses it before ending the block (§4.4 symmetry).
        assert_eq!(machine.typewriter_transcript(), "012S");
        assert!(machine.io.active_device().is_none());
    }

    #[test]
    fn cancel_io_stops_transmission_early() {
        let mut machine = Machine::new(typewriter_output_config());
        for word in 1..10 {
            machine.drum.write_word(Track::Long(5), word, Word::new(16));
        }
        machine.drum.write_word(Track::Cm, 0, typewriter_out_command().pack());

        machine.start();
        machine.interpreter.flipflops.rc = true;
        for _ in 0..3 {
            machine.step(None);
        }
        assert_eq!(machine.typewriter_transcript(), "000");

        machine.cancel_io();
        for _ in 0..2 {
            machine.step(None);
        }

        assert_eq!(machine.typewriter_transcript(), "000");
        assert!(machine.typewriter.is_canceled());
        assert!(machine.io.active_device().is_none());
        assert!(!machine.interpreter.flipflops.tr);
    }
}
