//! EUSART binding

use pic170x_hal::{BaudSetting, Register, UartPeripheral};

use crate::register::VolatileRegister;
use crate::sfr::{self, baudcon, pir1, rcsta, txsta};

/// The EUSART peripheral
#[derive(Debug)]
pub struct Eusart {
    rcsta: VolatileRegister,
    txsta: VolatileRegister,
    baudcon: VolatileRegister,
    spbrgl: VolatileRegister,
    spbrgh: VolatileRegister,
    rcreg: VolatileRegister,
    txreg: VolatileRegister,
    pir1: VolatileRegister,
    pie1: VolatileRegister,
    rxpps: VolatileRegister,
}

impl Eusart {
    /// # Safety
    ///
    /// Must only be used on a PIC16(L)F170x, and only once.
    pub const unsafe fn steal() -> Self {
        Self {
            rcsta: VolatileRegister::new(sfr::RC1STA),
            txsta: VolatileRegister::new(sfr::TX1STA),
            baudcon: VolatileRegister::new(sfr::BAUD1CON),
            spbrgl: VolatileRegister::new(sfr::SP1BRGL),
            spbrgh: VolatileRegister::new(sfr::SP1BRGH),
            rcreg: VolatileRegister::new(sfr::RC1REG),
            txreg: VolatileRegister::new(sfr::TX1REG),
            pir1: VolatileRegister::new(sfr::PIR1),
            pie1: VolatileRegister::new(sfr::PIE1),
            rxpps: VolatileRegister::new(sfr::RXPPS),
        }
    }

    /// Raise an interrupt when a byte is received
    pub fn enable_receive_interrupt(&self) {
        self.pie1.set_bits(pir1::RCIF);
    }
}

impl UartPeripheral for Eusart {
    const TX_OUTPUT_SOURCE: u8 = sfr::PPS_OUT_TX;

    fn set_async_mode(&self) {
        self.txsta.clear_bits(txsta::SYNC);
    }

    fn set_baud(&self, setting: BaudSetting) {
        self.baudcon.write_bits(baudcon::BRG16, setting.brg16);
        self.txsta.write_bits(txsta::BRGH, setting.brgh);
        self.spbrgh.write((setting.divisor >> 8) as u8);
        self.spbrgl.write(setting.divisor as u8);
    }

    fn route_receive(&self, pin_select: u8) {
        self.rxpps.write(pin_select);
    }

    fn set_receiver_enabled(&self, enabled: bool) {
        self.rcsta.write_bits(rcsta::CREN, enabled);
    }

    fn set_transmitter_enabled(&self, enabled: bool) {
        self.txsta.write_bits(txsta::TXEN, enabled);
    }

    fn set_port_enabled(&self, enabled: bool) {
        self.rcsta.write_bits(rcsta::SPEN, enabled);
    }

    fn overrun_error(&self) -> bool {
        self.rcsta.is_set(rcsta::OERR)
    }

    fn framing_error(&self) -> bool {
        self.rcsta.is_set(rcsta::FERR)
    }

    fn rx_ready(&self) -> bool {
        self.pir1.is_set(pir1::RCIF)
    }

    fn read_byte(&self) -> u8 {
        self.rcreg.read()
    }

    fn tx_ready(&self) -> bool {
        self.pir1.is_set(pir1::TXIF)
    }

    fn write_byte(&self, byte: u8) {
        self.txreg.write(byte);
    }
}
