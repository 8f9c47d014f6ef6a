//! The system bus: power/reset state and the three front-panel switches.

/// Compute switch: gates command execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComputeSwitch {
    Off,
    #[default]
    Go,
    /// Honor breakpoint flags: halt after a command whose BP bit is set.
    Bp,
}

/// Enable switch: arms typewriter keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnableSwitch {
    #[default]
    Off,
    On,
}

/// Punch switch: connects the paper-tape punch or requests a reader rewind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PunchSwitch {
    #[default]
    Off,
    On,
    Rewind,
}

/// Front-panel switches and the violation latch, scoped process-wide.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBus {
    pub compute: ComputeSwitch,
    pub enable: EnableSwitch,
    pub punch: PunchSwitch,
    /// Latched violation state; cleared only by an explicit reset action.
    violation: bool,
    powered: bool,
}

impl SystemBus {
    #[must_use]
    pub fn new() -> Self {
        Self {
            compute: ComputeSwitch::default(),
            enable: EnableSwitch::default(),
            punch: PunchSwitch::default(),
            violation: false,
            powered: false,
        }
    }

    #[must_use]
    pub const fn is_violated(&self) -> bool {
        self.violation
    }

    /// Latch a violation. Cleared only by `reset`.
    pub fn latch_violation(&mut self) {
        self.violation = true;
    }

    #[must_use]
    pub const fn is_powered(&self) -> bool {
        self.powered
    }

    pub fn power_up(&mut self) {
        self.powered = true;
    }

    pub fn power_down(&mut self) {
        self.powered = false;
    }

    /// Explicit user reset: clears the violation latch. Switch positions
    /// and power state are untouched (matching the hardware front panel).
    pub fn reset(&mut self) {
        self.violation = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn violation_survives_until_reset() {
        let mut bus = SystemBus::new();
        bus.latch_violation();
        assert!(bus.is_violated());
        bus.reset();
        assert!(!bus.is_violated());
    }
}
