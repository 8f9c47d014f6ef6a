//! Concrete peripherals attached to the I/O line: paper tape reader and
//! punch, the console typewriter, and the drum plotter.

mod device;
mod plotter;
mod punch;
mod reader;
mod typewriter;

pub use device::DeviceInterface;
pub use plotter::Plotter;
pub use punch::PaperTapePunch;
pub use reader::PaperTapeReader;
pub use typewriter::Typewriter;
