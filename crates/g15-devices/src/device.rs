//! The common shape every peripheral presents to the machine loop.

/// A peripheral attached to the I/O line. Mirrors the busy/cancel protocol
/// the command interpreter itself exposes through `IoDispatch`, at the
/// level of one physical device rather than the whole line.
pub trait DeviceInterface {
    /// The device has data (input) or room (output) and isn't canceled.
    fn is_ready(&self) -> bool;
    /// The device is in the middle of an operation.
    fn is_busy(&self) -> bool;
    fn is_canceled(&self) -> bool;
    /// Hand one internal code to an output device.
    fn write(&mut self, code: u8);
    /// Pull one internal code from an input device, if its mechanical
    /// period has elapsed since the last one.
    fn read(&mut self) -> Option<u8>;
    fn cancel(&mut self);
    /// Reset to power-up state, discarding anything in flight.
    fn shut_down(&mut self);
}
