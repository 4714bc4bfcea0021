//! Simulated chip
//!
//! Bundles every simulated peripheral with the power-on reset values of a
//! PIC16(L)F170x: all pins are analog inputs, latches are clear and
//! interrupts are globally disabled.

use pic170x_hal::gpio::PINS_PER_PORT;
use pic170x_hal::{Port, PortBank, PortBanks, Register};

use crate::{SimInterrupts, SimRegister, SimTimer, SimUart};

/// OSCCON value after reset (500 kHz internal oscillator)
pub const OSCCON_RESET: u8 = 0b0011_1000;

/// Simulated PIC16(L)F170x
#[derive(Debug)]
pub struct SimChip {
    /// GPIO register banks
    pub ports: PortBanks<SimRegister>,
    /// Oscillator control register
    pub osccon: SimRegister,
    /// Global interrupt-enable flag
    pub gie: SimInterrupts,
    /// Timer0
    pub timer0: SimTimer,
    /// EUSART
    pub uart: SimUart,
}

impl Default for SimChip {
    fn default() -> Self {
        Self::new()
    }
}

impl SimChip {
    /// Create a chip in its power-on reset state
    pub fn new() -> Self {
        Self {
            ports: PortBanks {
                a: reset_bank(),
                b: reset_bank(),
                c: reset_bank(),
            },
            osccon: SimRegister::new(OSCCON_RESET),
            gie: SimInterrupts::new(false),
            timer0: SimTimer::new(),
            uart: SimUart::new(),
        }
    }

    /// Drive the electrical level of pins on a port
    ///
    /// Only affects the input (PORTx) register; the latch keeps the
    /// commanded output level.
    pub fn drive_input(&self, port: Port, mask: u8, high: bool) {
        self.ports.bank(port).port.write_bits(mask, high);
    }
}

fn reset_bank() -> PortBank<SimRegister> {
    PortBank {
        tris: SimRegister::new(0xFF),
        port: SimRegister::new(0x00),
        latch: SimRegister::new(0x00),
        ansel: SimRegister::new(0xFF),
        pps: core::array::from_fn::<_, PINS_PER_PORT, _>(|_| SimRegister::new(0)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pic170x_hal::InterruptControl;

    #[test]
    fn test_reset_state() {
        let chip = SimChip::new();

        assert_eq!(chip.ports.a.tris.value(), 0xFF);
        assert_eq!(chip.ports.c.ansel.value(), 0xFF);
        assert_eq!(chip.ports.b.latch.value(), 0x00);
        assert_eq!(chip.osccon.value(), OSCCON_RESET);
        assert!(!chip.gie.interrupts_enabled());
    }

    #[test]
    fn test_drive_input() {
        let chip = SimChip::new();

        chip.drive_input(Port::C, 0b0000_1000, true);
        assert_eq!(chip.ports.c.port.value(), 0b0000_1000);
        assert_eq!(chip.ports.c.latch.value(), 0);

        chip.drive_input(Port::C, 0b0000_1000, false);
        assert_eq!(chip.ports.c.port.value(), 0);
    }
}
