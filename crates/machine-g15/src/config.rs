//! Machine-wide configuration: drum speed and peripheral rates.

/// The drum's documented rotational speed.
pub const DRUM_RPM: f64 = 1800.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MachineConfig {
    pub drum_rpm: f64,
    pub reader_period_word_times: u32,
    pub punch_period_word_times: u32,
    pub typewriter_period_word_times: u32,
    pub plotter_period_word_times: u32,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            drum_rpm: DRUM_RPM,
            // 250 frames/sec at ~3.72 kHz word-time rate.
            reader_period_word_times: 15,
            // One frame every two drum cycles.
            punch_period_word_times: 2 * g15_core::WORDS_PER_REVOLUTION,
            // One character every four drum cycles.
            typewriter_period_word_times: 4 * g15_core::WORDS_PER_REVOLUTION,
            // One step every 5 ms at ~3.72 kHz; pen up/down settle time
            // (145 ms) isn't separately modeled.
            plotter_period_word_times: 19,
        }
    }
}
