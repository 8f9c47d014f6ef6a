//! Headless runner: load a paper tape image, seed the reader-in bootstrap,
//! and run the machine to completion.

use std::path::PathBuf;
use std::process;

use g15_core::{Command, Track};
use g15_cpu::{TraceSink, VecTraceSink};
use machine_g15::{Machine, MachineConfig};

struct CliArgs {
    tape_path: PathBuf,
    trace: bool,
    tick_cap: u64,
}

fn parse_args() -> CliArgs {
    let mut tape_path = None;
    let mut trace = false;
    let mut tick_cap = 10_000_000;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--trace" => trace = true,
            "--ticks" => {
                tick_cap = args
                    .next()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or_else(|| usage_and_exit());
            }
            other => tape_path = Some(PathBuf::from(other)),
        }
    }

    CliArgs {
        tape_path: tape_path.unwrap_or_else(|| usage_and_exit()),
        trace,
        tick_cap,
    }
}

fn usage_and_exit() -> ! {
    eprintln!("usage: g15-cli [--trace] [--ticks N] <tape.pti|tape.ptr|tape.pt>");
    process::exit(2);
}

fn load_tape(path: &std::path::Path) -> Vec<u8> {
    let bytes = std::fs::read(path).unwrap_or_else(|err| {
        eprintln!("reading {}: {err}", path.display());
        process::exit(1);
    });

    match path.extension().and_then(|e| e.to_str()) {
        Some("pti") => {
            let text = String::from_utf8_lossy(&bytes);
            g15_formats::parse_pti(&text).unwrap_or_else(|err| {
                eprintln!("parsing {}: {err}", path.display());
                process::exit(1);
            })
        }
        Some("pt") => g15_formats::parse_pt(&bytes),
        _ => g15_formats::parse_ptr(&bytes),
    }
}

/// Seed the command track with the one command a real operator would enter
/// at the front panel to start a cold boot: repeatedly read characteristic
/// into the input line from the reader. This stands in for the physical
/// "Reader In" toggle switch, which this headless runner has no panel for.
fn seed_reader_in_bootstrap(machine: &mut Machine) {
    let read_from_reader = Command {
        deferred: false,
        t: 0,
        breakpoint: false,
        n: 0,
        characteristic: 0b11,
        source: 0,
        destination: 29,
        double_precision: false,
    };
    machine.drum.write_word(Track::Cm, 0, read_from_reader.pack());
}

fn main() {
    let args = parse_args();
    let codes = load_tape(&args.tape_path);

    let mut machine = Machine::new(MachineConfig::default());
    machine.load_reader_tape(codes);
    seed_reader_in_bootstrap(&mut machine);
    machine.start();
    machine.interpreter.flipflops.rc = true;

    let mut sink = VecTraceSink::default();
    let mut ticks = 0u64;
    while !machine.is_halted() && ticks < args.tick_cap {
        if args.trace {
            machine.step(Some(&mut sink as &mut dyn TraceSink));
        } else {
            machine.step(None);
        }
        ticks += 1;
    }

    if args.trace {
        for record in &sink.0 {
            println!("{:?}", record);
        }
    }

    println!("ticks: {ticks}");
    println!("halted: {}", machine.is_halted());
    println!("AR: {}", machine.drum.read_word(Track::Ar, 0).to_signed());
    println!("MQ: {}", machine.drum.read_word(Track::Mq, 0).to_signed());
    let transcript = machine.typewriter_transcript();
    if !transcript.is_empty() {
        println!("typewriter: {transcript}");
    }
}
