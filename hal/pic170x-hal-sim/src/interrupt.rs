//! Simulated global interrupt-enable flag

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use pic170x_hal::InterruptControl;

/// Global interrupt-enable flag (GIE)
///
/// Starts disabled, like the hardware after reset. Counts how many times
/// interrupts were disabled so tests can check that an operation ran
/// inside a critical section.
///
/// Backed by atomics so it can live in a `static` next to the state it
/// guards, the way the real flag is reached from the interrupt vector.
#[derive(Debug, Default)]
pub struct SimInterrupts {
    enabled: AtomicBool,
    disable_count: AtomicU32,
}

impl SimInterrupts {
    /// Create a flag in the given state
    pub const fn new(enabled: bool) -> Self {
        Self {
            enabled: AtomicBool::new(enabled),
            disable_count: AtomicU32::new(0),
        }
    }

    /// Number of enabled -> disabled transitions observed
    pub fn disable_count(&self) -> u32 {
        self.disable_count.load(Ordering::Relaxed)
    }
}

impl InterruptControl for SimInterrupts {
    fn interrupts_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    fn set_interrupts_enabled(&self, enabled: bool) {
        if self.enabled.swap(enabled, Ordering::Relaxed) && !enabled {
            self.disable_count.fetch_add(1, Ordering::Relaxed);
        }
    }
}
