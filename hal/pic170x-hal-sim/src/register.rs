//! Simulated register

use core::sync::atomic::{AtomicU8, Ordering};

use pic170x_hal::Register;

/// Register backed by an atomic byte
#[derive(Debug, Default)]
pub struct SimRegister {
    value: AtomicU8,
}

impl SimRegister {
    /// Create a register holding `value`
    pub const fn new(value: u8) -> Self {
        Self {
            value: AtomicU8::new(value),
        }
    }

    /// Current value (for test verification)
    pub fn value(&self) -> u8 {
        self.value.load(Ordering::Relaxed)
    }
}

impl Register for SimRegister {
    fn read(&self) -> u8 {
        self.value.load(Ordering::Relaxed)
    }

    fn write(&self, value: u8) {
        self.value.store(value, Ordering::Relaxed);
    }
}
