//! Special-function register addresses
//!
//! Banked data-memory addresses (bank × 0x80 + offset) of the registers
//! this crate touches, identical on the PIC16(L)F1705 and PIC16(L)F1709.
//! PORTB/TRISB/LATB/ANSELB and the RBxPPS registers only exist on the 1709.

/// Interrupt control (core register, mirrored in every bank)
pub const INTCON: usize = 0x00B;
pub const PORTA: usize = 0x00C;
pub const PORTB: usize = 0x00D;
pub const PORTC: usize = 0x00E;
/// Peripheral interrupt request 1
pub const PIR1: usize = 0x011;

pub const TRISA: usize = 0x08C;
pub const TRISB: usize = 0x08D;
pub const TRISC: usize = 0x08E;
/// Peripheral interrupt enable 1
pub const PIE1: usize = 0x091;
pub const OPTION_REG: usize = 0x095;
pub const OSCCON: usize = 0x099;

pub const LATA: usize = 0x10C;
pub const LATB: usize = 0x10D;
pub const LATC: usize = 0x10E;

pub const ANSELA: usize = 0x18C;
pub const ANSELB: usize = 0x18D;
pub const ANSELC: usize = 0x18E;
pub const RC1REG: usize = 0x199;
pub const TX1REG: usize = 0x19A;
pub const SP1BRGL: usize = 0x19B;
pub const SP1BRGH: usize = 0x19C;
pub const RC1STA: usize = 0x19D;
pub const TX1STA: usize = 0x19E;
pub const BAUD1CON: usize = 0x19F;

/// EUSART receive input pin selection
pub const RXPPS: usize = 0xE24;
/// First output source selection register (RA0PPS)
pub const RA0PPS: usize = 0xE90;
pub const RB0PPS: usize = 0xE98;
pub const RC0PPS: usize = 0xEA0;

/// INTCON bits
pub mod intcon {
    pub const GIE: u8 = 1 << 7;
    pub const PEIE: u8 = 1 << 6;
    pub const TMR0IE: u8 = 1 << 5;
    pub const TMR0IF: u8 = 1 << 2;
}

/// PIR1 / PIE1 bits
pub mod pir1 {
    pub const RCIF: u8 = 1 << 5;
    pub const TXIF: u8 = 1 << 4;
}

/// OPTION_REG bits
pub mod option_reg {
    /// Bits preserved when reprogramming the timer source and prescaler
    pub const KEEP_MASK: u8 = 0b1101_0000;
    pub const PS_MASK: u8 = 0b0000_0111;
}

/// RC1STA bits
pub mod rcsta {
    pub const SPEN: u8 = 1 << 7;
    pub const CREN: u8 = 1 << 4;
    pub const FERR: u8 = 1 << 2;
    pub const OERR: u8 = 1 << 1;
}

/// TX1STA bits
pub mod txsta {
    pub const TXEN: u8 = 1 << 5;
    pub const SYNC: u8 = 1 << 4;
    pub const BRGH: u8 = 1 << 2;
}

/// BAUD1CON bits
pub mod baudcon {
    pub const BRG16: u8 = 1 << 3;
}

/// Output source code routing the EUSART TX/CK signal to a pin
pub const PPS_OUT_TX: u8 = 0b1_0100;

/// Address of the output source selection register for a port pin
pub const fn output_pps(port_base: usize, bit: u8) -> usize {
    port_base + bit as usize
}
