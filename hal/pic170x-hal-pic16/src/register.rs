//! Volatile memory-mapped register

use pic170x_hal::Register;

/// A special-function register at a fixed data-memory address
#[derive(Debug, PartialEq, Eq)]
pub struct VolatileRegister {
    addr: usize,
}

impl VolatileRegister {
    /// Create a handle to the register at `addr`
    ///
    /// # Safety
    ///
    /// `addr` must be the address of a special-function register on the
    /// running chip. Handles are not exclusive: callers sharing a register
    /// between contexts must use a critical section.
    pub const unsafe fn new(addr: usize) -> Self {
        Self { addr }
    }

    /// Data-memory address of the register
    pub const fn address(&self) -> usize {
        self.addr
    }
}

impl Register for VolatileRegister {
    #[inline]
    fn read(&self) -> u8 {
        // SAFETY: `new` requires a valid SFR address
        unsafe { core::ptr::read_volatile(self.addr as *const u8) }
    }

    #[inline]
    fn write(&self, value: u8) {
        // SAFETY: `new` requires a valid SFR address
        unsafe { core::ptr::write_volatile(self.addr as *mut u8, value) }
    }
}
