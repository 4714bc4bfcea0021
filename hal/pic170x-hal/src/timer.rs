//! Periodic tick timer abstraction
//!
//! The timer service only needs a free-running counter that raises a
//! pending flag (and an interrupt) every time it overflows.

/// Free-running timer peripheral that raises a periodic tick
pub trait TickTimer {
    /// Clock the timer from the instruction clock through the given
    /// prescaler selection bits
    fn configure(&self, prescale_bits: u8);

    /// Enable the overflow interrupt source
    fn enable_interrupt(&self);

    /// Check if a tick is pending
    fn is_pending(&self) -> bool;

    /// Acknowledge the pending tick
    fn clear_pending(&self);
}

impl<T: TickTimer + ?Sized> TickTimer for &T {
    fn configure(&self, prescale_bits: u8) {
        (**self).configure(prescale_bits)
    }

    fn enable_interrupt(&self) {
        (**self).enable_interrupt()
    }

    fn is_pending(&self) -> bool {
        (**self).is_pending()
    }

    fn clear_pending(&self) {
        (**self).clear_pending()
    }
}
