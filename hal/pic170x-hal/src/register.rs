//! Register access abstraction
//!
//! Every pin and peripheral control on the target lives in an 8-bit
//! special-function register. Drivers only ever need to read, write and
//! flip bits in them, so that is all this trait exposes.

/// An addressable 8-bit register
pub trait Register {
    /// Read the current register value
    fn read(&self) -> u8;

    /// Write a new register value
    fn write(&self, value: u8);

    /// Read-modify-write the register
    fn modify<F>(&self, f: F)
    where
        F: FnOnce(u8) -> u8,
    {
        let value = self.read();
        self.write(f(value));
    }

    /// Set every bit in `mask`
    fn set_bits(&self, mask: u8) {
        self.modify(|v| v | mask);
    }

    /// Clear every bit in `mask`
    fn clear_bits(&self, mask: u8) {
        self.modify(|v| v & !mask);
    }

    /// Set or clear every bit in `mask`
    fn write_bits(&self, mask: u8, set: bool) {
        if set {
            self.set_bits(mask);
        } else {
            self.clear_bits(mask);
        }
    }

    /// Check if any bit in `mask` is set
    fn is_set(&self, mask: u8) -> bool {
        self.read() & mask != 0
    }
}

impl<T: Register + ?Sized> Register for &T {
    fn read(&self) -> u8 {
        (**self).read()
    }

    fn write(&self, value: u8) {
        (**self).write(value)
    }
}
