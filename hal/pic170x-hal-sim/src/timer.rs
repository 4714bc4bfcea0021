//! Simulated Timer0

use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use pic170x_hal::TickTimer;

/// Prescaler value before the first `configure`
const UNCONFIGURED: u8 = 0xFF;

/// Timer0 with a manually fired overflow
///
/// Backed by atomics so a timer service built on it can be `static`.
#[derive(Debug)]
pub struct SimTimer {
    prescale_bits: AtomicU8,
    interrupt_enabled: AtomicBool,
    pending: AtomicBool,
}

impl Default for SimTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl SimTimer {
    /// Create an unconfigured timer
    pub const fn new() -> Self {
        Self {
            prescale_bits: AtomicU8::new(UNCONFIGURED),
            interrupt_enabled: AtomicBool::new(false),
            pending: AtomicBool::new(false),
        }
    }

    /// Simulate a counter overflow (raises the pending flag)
    pub fn fire(&self) {
        self.pending.store(true, Ordering::Relaxed);
    }

    /// Prescaler bits last programmed, if any
    pub fn prescale_bits(&self) -> Option<u8> {
        match self.prescale_bits.load(Ordering::Relaxed) {
            UNCONFIGURED => None,
            bits => Some(bits),
        }
    }

    /// Check if the overflow interrupt is enabled
    pub fn interrupt_enabled(&self) -> bool {
        self.interrupt_enabled.load(Ordering::Relaxed)
    }
}

impl TickTimer for SimTimer {
    fn configure(&self, prescale_bits: u8) {
        self.prescale_bits
            .store(prescale_bits & 0x07, Ordering::Relaxed);
    }

    fn enable_interrupt(&self) {
        self.interrupt_enabled.store(true, Ordering::Relaxed);
    }

    fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Relaxed)
    }

    fn clear_pending(&self) {
        self.pending.store(false, Ordering::Relaxed);
    }
}
