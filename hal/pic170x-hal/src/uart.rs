//! UART serial peripheral abstraction
//!
//! Models an interrupt-serviced asynchronous receiver/transmitter at the
//! level of its status flags and data registers. Framing on the wire is
//! done by the peripheral; drivers only move bytes and watch the flags.

/// Baud-rate generator programming
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BaudSetting {
    /// Generator divisor (SPBRG)
    pub divisor: u16,
    /// Use the 16-bit generator (BRG16)
    pub brg16: bool,
    /// High-speed clock select (BRGH)
    pub brgh: bool,
}

/// UART peripheral
///
/// Flag reads must not have side effects; reading the data register is the
/// only way to consume a received byte.
pub trait UartPeripheral {
    /// Output-source code that routes the transmit signal to a pin
    const TX_OUTPUT_SOURCE: u8;

    /// Select asynchronous (not synchronous/clocked) operation
    fn set_async_mode(&self);

    /// Program the baud-rate generator
    fn set_baud(&self, setting: BaudSetting);

    /// Route the receive input from the pin with the given selector code
    fn route_receive(&self, pin_select: u8);

    /// Enable or disable the receiver
    ///
    /// Disabling the receiver clears a latched overrun condition.
    fn set_receiver_enabled(&self, enabled: bool);

    /// Enable or disable the transmitter
    fn set_transmitter_enabled(&self, enabled: bool);

    /// Enable or disable the serial port as a whole
    fn set_port_enabled(&self, enabled: bool);

    /// Receive overrun error is latched
    fn overrun_error(&self) -> bool;

    /// The byte at the head of the receive FIFO has a framing error
    fn framing_error(&self) -> bool;

    /// A received byte is waiting
    fn rx_ready(&self) -> bool;

    /// Read the next received byte
    fn read_byte(&self) -> u8;

    /// The transmit buffer can accept a byte
    fn tx_ready(&self) -> bool;

    /// Write a byte to the transmit buffer
    fn write_byte(&self, byte: u8);
}

impl<T: UartPeripheral + ?Sized> UartPeripheral for &T {
    const TX_OUTPUT_SOURCE: u8 = T::TX_OUTPUT_SOURCE;

    fn set_async_mode(&self) {
        (**self).set_async_mode()
    }

    fn set_baud(&self, setting: BaudSetting) {
        (**self).set_baud(setting)
    }

    fn route_receive(&self, pin_select: u8) {
        (**self).route_receive(pin_select)
    }

    fn set_receiver_enabled(&self, enabled: bool) {
        (**self).set_receiver_enabled(enabled)
    }

    fn set_transmitter_enabled(&self, enabled: bool) {
        (**self).set_transmitter_enabled(enabled)
    }

    fn set_port_enabled(&self, enabled: bool) {
        (**self).set_port_enabled(enabled)
    }

    fn overrun_error(&self) -> bool {
        (**self).overrun_error()
    }

    fn framing_error(&self) -> bool {
        (**self).framing_error()
    }

    fn rx_ready(&self) -> bool {
        (**self).rx_ready()
    }

    fn read_byte(&self) -> u8 {
        (**self).read_byte()
    }

    fn tx_ready(&self) -> bool {
        (**self).tx_ready()
    }

    fn write_byte(&self, byte: u8) {
        (**self).write_byte(byte)
    }
}
