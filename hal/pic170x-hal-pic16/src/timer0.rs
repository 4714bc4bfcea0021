//! Timer0 tick source

use pic170x_hal::{Register, TickTimer};

use crate::register::VolatileRegister;
use crate::sfr::{self, intcon, option_reg};

/// Timer0 clocked from Fosc/4 through the prescaler
#[derive(Debug)]
pub struct Timer0 {
    option_reg: VolatileRegister,
    intcon: VolatileRegister,
}

impl Timer0 {
    /// # Safety
    ///
    /// Must only be used on a PIC16(L)F170x, and only once.
    pub const unsafe fn steal() -> Self {
        Self {
            option_reg: VolatileRegister::new(sfr::OPTION_REG),
            intcon: VolatileRegister::new(sfr::INTCON),
        }
    }
}

impl TickTimer for Timer0 {
    fn configure(&self, prescale_bits: u8) {
        // TMR0CS = 0 (instruction clock), PSA = 0 (prescaler assigned)
        self.option_reg.modify(|v| {
            (v & option_reg::KEEP_MASK) | (prescale_bits & option_reg::PS_MASK)
        });
    }

    fn enable_interrupt(&self) {
        self.intcon.set_bits(intcon::TMR0IE);
    }

    fn is_pending(&self) -> bool {
        self.intcon.is_set(intcon::TMR0IF)
    }

    fn clear_pending(&self) {
        self.intcon.clear_bits(intcon::TMR0IF);
    }
}
