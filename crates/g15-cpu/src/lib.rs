//! Arithmetic unit and command interpreter.
//!
//! The interpreter drives the fetch/decode/execute cycle one word-time at a
//! time; the arithmetic unit is a pure function library it calls into for
//! the AR destination and the multiply/divide/normalize/shift operation
//! codes.

mod arithmetic;
mod destination;
mod interpreter;
mod trace;

pub use arithmetic::{
    add, apply, divide, multiply, normalize, shift_left, subtract, ArithOp, ArithResult, Product,
    Quotient,
};
pub use destination::Destination;
pub use interpreter::CommandInterpreter;
pub use trace::{TraceRecord, TraceSink, VecTraceSink};
