use std::time::Duration;

use crossbeam::channel::{Receiver, RecvTimeoutError, Sender, bounded};

const IDLE_INTERVAL: Duration = Duration::from_millis(1);

/// Admission gate bounding the frames in flight.
///
/// Tokens are slot indices `0..capacity`; a frame holds its token from
/// acquisition until the GPU reports completion. The index doubles as the
/// frame's uniform slot, so CPU writes never touch data an in-flight frame reads.
#[derive(Debug)]
pub struct FrameGate {
    tx: Sender<usize>,
    rx: Receiver<usize>,
    capacity: usize,
}

impl FrameGate {
    pub fn new(frames_in_flight: usize) -> Self {
        let capacity = frames_in_flight.max(1);
        let (tx, rx) = bounded(capacity);
        for slot in 0..capacity {
            let _ = tx.send(slot);
        }
        Self { tx, rx, capacity }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Slots not currently held by a frame.
    #[inline]
    pub fn available(&self) -> usize {
        self.rx.len()
    }

    pub fn try_acquire(&self) -> Option<usize> {
        self.rx.try_recv().ok()
    }

    /// Blocks until a slot is free, calling `idle` between waits.
    ///
    /// `idle` is where the caller lets completion callbacks run (device polling).
    pub fn acquire_with(&self, mut idle: impl FnMut()) -> usize {
        loop {
            match self.rx.recv_timeout(IDLE_INTERVAL) {
                Ok(slot) => return slot,
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => idle(),
            }
        }
    }

    /// Returns a slot that never reached the GPU.
    pub fn release(&self, slot: usize) {
        let _ = self.tx.send(slot);
    }

    /// Callback that returns `slot` when run; handed to the queue's completion hook.
    pub fn releaser(&self, slot: usize) -> impl FnOnce() + Send + 'static {
        let tx = self.tx.clone();
        move || {
            let _ = tx.send(slot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admits_at_most_capacity_frames() {
        let gate = FrameGate::new(3);
        let slots: Vec<usize> = (0..3).filter_map(|_| gate.try_acquire()).collect();
        assert_eq!(slots, vec![0, 1, 2]);
        assert_eq!(gate.try_acquire(), None);

        gate.release(1);
        assert_eq!(gate.try_acquire(), Some(1));
    }

    #[test]
    fn zero_capacity_still_admits_one() {
        let gate = FrameGate::new(0);
        assert_eq!(gate.capacity(), 1);
        assert_eq!(gate.try_acquire(), Some(0));
    }

    #[test]
    fn releaser_works_across_threads() {
        let gate = FrameGate::new(1);
        let slot = gate.try_acquire().unwrap();
        let release = gate.releaser(slot);
        std::thread::spawn(release).join().unwrap();
        assert_eq!(gate.available(), 1);
    }

    #[test]
    fn blocked_acquire_idles_until_released() {
        let gate = FrameGate::new(1);
        let slot = gate.try_acquire().unwrap();
        let mut pending = Some(gate.releaser(slot));
        let mut idles = 0;

        let got = gate.acquire_with(|| {
            idles += 1;
            if let Some(release) = pending.take() {
                release();
            }
        });

        assert_eq!(got, slot);
        assert!(idles >= 1);
    }
}
