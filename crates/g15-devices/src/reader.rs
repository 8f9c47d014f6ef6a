//! Paper tape reader: a queue of pre-filtered internal codes released one
//! at a time at the tape's mechanical feed rate.

use std::collections::VecDeque;

use crate::device::DeviceInterface;

pub struct PaperTapeReader {
    queue: VecDeque<u8>,
    period_word_times: u32,
    counter: u32,
    canceled: bool,
}

impl PaperTapeReader {
    #[must_use]
    pub fn new(period_word_times: u32) -> Self {
        Self {
            queue: VecDeque::new(),
            period_word_times: period_word_times.max(1),
            counter: 0,
            canceled: false,
        }
    }

    /// Load a tape image's worth of already-filtered codes.
    pub fn load(&mut self, codes: impl IntoIterator<Item = u8>) {
        self.queue.extend(codes);
        self.canceled = false;
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl DeviceInterface for PaperTapeReader {
    fn is_ready(&self) -> bool {
        !self.queue.is_empty() && !self.canceled
    }

    fn is_busy(&self) -> bool {
        !self.queue.is_empty()
    }

    fn is_canceled(&self) -> bool {
        self.canceled
    }

    fn write(&mut self, _code: u8) {
        // The reader is input-only.
    }

    fn read(&mut self) -> Option<u8> {
        if self.canceled || self.queue.is_empty() {
            return None;
        }
        self.counter += 1;
        if self.counter < self.period_word_times {
            return None;
        }
        self.counter = 0;
        self.queue.pop_front()
    }

    fn cancel(&mut self) {
        self.canceled = true;
    }

    fn shut_down(&mut self) {
        self.queue.clear();
        self.counter = 0;
        self.canceled = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn releases_one_code_per_period() {
        let mut reader = PaperTapeReader::new(3);
        reader.load([10, 20]);
        assert_eq!(reader.read(), None);
        assert_eq!(reader.read(), None);
        assert_eq!(reader.read(), Some(10));
        assert_eq!(reader.read(), None);
        assert_eq!(reader.read(), None);
        assert_eq!(reader.read(), Some(20));
    }

    #[test]
    fn cancel_stops_further_reads() {
        let mut reader = PaperTapeReader::new(1);
        reader.load([1, 2, 3]);
        reader.cancel();
        assert_eq!(reader.read(), None);
        assert!(reader.is_canceled());
    }
}
