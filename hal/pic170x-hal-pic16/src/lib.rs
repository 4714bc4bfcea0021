//! PIC16(L)F1705/1709 support for pic170x
//!
//! This crate binds the `pic170x-hal` traits to the special-function
//! registers of the PIC16(L)F170x family:
//!
//! - [`register::VolatileRegister`] - volatile access to one SFR
//! - [`eusart::Eusart`] - the EUSART as a [`pic170x_hal::UartPeripheral`]
//! - [`timer0::Timer0`] - Timer0 as a [`pic170x_hal::TickTimer`]
//! - [`interrupt::Gie`] - INTCON.GIE as a [`pic170x_hal::InterruptControl`]
//!
//! # Features
//!
//! - `critical-section-impl` - Register a `critical-section` implementation
//!   backed by GIE. Firmware enables this once; `pic170x_hal::Mutex` and
//!   `with_critical_section` are built on `critical_section::with`
//! - `defmt` - Enable debug formatting support
//!
//! # Usage
//!
//! ```ignore
//! static CHIP: Pic16 = unsafe { Pic16::steal() };
//! ```
//!
//! The chip variant only matters for which pins exist; that choice is made
//! by the pin map in `pic170x-core`.

#![no_std]

pub mod eusart;
pub mod interrupt;
pub mod register;
pub mod sfr;
pub mod timer0;

use pic170x_hal::gpio::{PortBank, PortBanks};

pub use eusart::Eusart;
pub use interrupt::{Gie, GIE};
pub use register::VolatileRegister;
pub use timer0::Timer0;

/// Every peripheral the core library uses
#[derive(Debug)]
pub struct Pic16 {
    /// GPIO register banks
    pub ports: PortBanks<VolatileRegister>,
    /// Oscillator control register
    pub osccon: VolatileRegister,
    /// Global interrupt enable
    pub gie: Gie,
    /// Timer0
    pub timer0: Timer0,
    /// EUSART
    pub eusart: Eusart,
}

impl Pic16 {
    /// Create handles to every peripheral
    ///
    /// # Safety
    ///
    /// Must only be called once, on a PIC16(L)F170x.
    pub const unsafe fn steal() -> Self {
        Self {
            ports: PortBanks {
                a: port_bank(sfr::TRISA, sfr::PORTA, sfr::LATA, sfr::ANSELA, sfr::RA0PPS),
                b: port_bank(sfr::TRISB, sfr::PORTB, sfr::LATB, sfr::ANSELB, sfr::RB0PPS),
                c: port_bank(sfr::TRISC, sfr::PORTC, sfr::LATC, sfr::ANSELC, sfr::RC0PPS),
            },
            osccon: VolatileRegister::new(sfr::OSCCON),
            gie: Gie::steal(),
            timer0: Timer0::steal(),
            eusart: Eusart::steal(),
        }
    }
}

const unsafe fn port_bank(
    tris: usize,
    port: usize,
    latch: usize,
    ansel: usize,
    pps_base: usize,
) -> PortBank<VolatileRegister> {
    PortBank {
        tris: VolatileRegister::new(tris),
        port: VolatileRegister::new(port),
        latch: VolatileRegister::new(latch),
        ansel: VolatileRegister::new(ansel),
        pps: [
            VolatileRegister::new(sfr::output_pps(pps_base, 0)),
            VolatileRegister::new(sfr::output_pps(pps_base, 1)),
            VolatileRegister::new(sfr::output_pps(pps_base, 2)),
            VolatileRegister::new(sfr::output_pps(pps_base, 3)),
            VolatileRegister::new(sfr::output_pps(pps_base, 4)),
            VolatileRegister::new(sfr::output_pps(pps_base, 5)),
            VolatileRegister::new(sfr::output_pps(pps_base, 6)),
            VolatileRegister::new(sfr::output_pps(pps_base, 7)),
        ],
    }
}
