//! Global interrupt enable (INTCON.GIE)

use pic170x_hal::{InterruptControl, Register};

use crate::register::VolatileRegister;
use crate::sfr::{self, intcon};

/// The GIE bit of INTCON
#[derive(Debug)]
pub struct Gie {
    intcon: VolatileRegister,
}

impl Gie {
    /// # Safety
    ///
    /// Must only be used on a PIC16(L)F170x.
    pub const unsafe fn steal() -> Self {
        Self {
            intcon: VolatileRegister::new(sfr::INTCON),
        }
    }

    /// Enable peripheral interrupts (EUSART, ...) in addition to GIE
    pub fn enable_peripheral_interrupts(&self) {
        self.intcon.set_bits(intcon::PEIE);
    }
}

impl InterruptControl for Gie {
    fn interrupts_enabled(&self) -> bool {
        self.intcon.is_set(intcon::GIE)
    }

    fn set_interrupts_enabled(&self, enabled: bool) {
        self.intcon.write_bits(intcon::GIE, enabled);
    }
}

/// Process-wide GIE handle used by the critical-section implementation
// SAFETY: INTCON exists on every supported chip
pub static GIE: Gie = unsafe { Gie::steal() };

#[cfg(feature = "critical-section-impl")]
mod critical_section_impl {
    use critical_section::{set_impl, Impl, RawRestoreState};
    use pic170x_hal::InterruptControl;

    use super::GIE;

    struct GieCriticalSection;
    set_impl!(GieCriticalSection);

    unsafe impl Impl for GieCriticalSection {
        unsafe fn acquire() -> RawRestoreState {
            GIE.disable()
        }

        unsafe fn release(was_enabled: RawRestoreState) {
            // Only re-enable interrupts if they were enabled before
            GIE.restore(was_enabled);
        }
    }
}
