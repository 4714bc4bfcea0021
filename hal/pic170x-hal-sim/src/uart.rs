//! Simulated EUSART
//!
//! Behaves like the PIC16F170x EUSART as far as the serial driver can
//! observe it:
//!
//! - The receive FIFO holds two bytes. A third byte arriving before the
//!   FIFO is read latches the overrun error and is lost.
//! - While overrun is latched no further bytes are received. Disabling the
//!   receiver clears the latch and flushes the FIFO.
//! - The framing error flag describes the byte at the head of the FIFO and
//!   is cleared by reading that byte.
//! - Writing the transmit register clears transmit-ready until the test
//!   calls [`SimUart::finish_transmit`].

use core::cell::RefCell;
use core::fmt;

use critical_section::Mutex;
use heapless::{Deque, Vec};
use pic170x_hal::{BaudSetting, UartPeripheral};

/// Depth of the hardware receive FIFO
pub const RX_FIFO_DEPTH: usize = 2;

/// Number of transmitted bytes the simulation remembers
pub const TX_LOG_CAPACITY: usize = 256;

/// A received byte and whether it arrived with a framing error
#[derive(Debug, Clone, Copy)]
struct RxSlot {
    byte: u8,
    framing_error: bool,
}

#[derive(Debug)]
struct UartRegs {
    async_mode: bool,
    baud: Option<BaudSetting>,
    rx_select: Option<u8>,
    receiver_enabled: bool,
    transmitter_enabled: bool,
    port_enabled: bool,
    overrun: bool,
    rx_fifo: Deque<RxSlot, RX_FIFO_DEPTH>,
    tx_ready: bool,
    tx_log: Vec<u8, TX_LOG_CAPACITY>,
}

impl UartRegs {
    fn receiving(&self) -> bool {
        self.port_enabled && self.receiver_enabled && !self.overrun
    }
}

/// Simulated EUSART
///
/// The register file sits behind a `critical_section::Mutex`, so a
/// `SimUart` can be shared with an interrupt handler through a `static`
/// just like the real peripheral.
pub struct SimUart {
    regs: Mutex<RefCell<UartRegs>>,
}

impl fmt::Debug for SimUart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.regs(|regs| f.debug_struct("SimUart").field("regs", regs).finish())
    }
}

impl Default for SimUart {
    fn default() -> Self {
        Self::new()
    }
}

impl SimUart {
    /// Create a disabled EUSART in its reset state
    pub const fn new() -> Self {
        Self {
            regs: Mutex::new(RefCell::new(UartRegs {
                async_mode: false,
                baud: None,
                rx_select: None,
                receiver_enabled: false,
                transmitter_enabled: false,
                port_enabled: false,
                overrun: false,
                rx_fifo: Deque::new(),
                tx_ready: true,
                tx_log: Vec::new(),
            })),
        }
    }

    fn regs<R>(&self, f: impl FnOnce(&mut UartRegs) -> R) -> R {
        critical_section::with(|cs| f(&mut self.regs.borrow_ref_mut(cs)))
    }

    fn push_rx(&self, slot: RxSlot) -> bool {
        self.regs(|regs| {
            if !regs.receiving() {
                return false;
            }
            if regs.rx_fifo.push_back(slot).is_err() {
                regs.overrun = true;
                return false;
            }
            true
        })
    }

    /// Simulate a byte arriving on the receive pin
    ///
    /// Returns `false` if the byte was lost (receiver off, overrun latched,
    /// or FIFO full, in which case overrun is latched now).
    pub fn inject_byte(&self, byte: u8) -> bool {
        self.push_rx(RxSlot {
            byte,
            framing_error: false,
        })
    }

    /// Simulate a byte arriving with a bad stop bit
    pub fn inject_framing_error(&self, byte: u8) -> bool {
        self.push_rx(RxSlot {
            byte,
            framing_error: true,
        })
    }

    /// Latch the overrun error directly
    pub fn assert_overrun(&self) {
        self.regs(|regs| regs.overrun = true);
    }

    /// Number of bytes waiting in the receive FIFO
    pub fn rx_pending(&self) -> usize {
        self.regs(|regs| regs.rx_fifo.len())
    }

    /// Simulate the shift register finishing the current byte
    pub fn finish_transmit(&self) {
        self.regs(|regs| regs.tx_ready = true);
    }

    /// Bytes written to the transmit register so far
    pub fn transmitted(&self) -> Vec<u8, TX_LOG_CAPACITY> {
        self.regs(|regs| regs.tx_log.clone())
    }

    /// Forget previously transmitted bytes
    pub fn clear_transmitted(&self) {
        self.regs(|regs| regs.tx_log.clear());
    }

    /// Baud-rate generator setting last programmed
    pub fn baud(&self) -> Option<BaudSetting> {
        self.regs(|regs| regs.baud)
    }

    /// Receive pin selector last programmed
    pub fn rx_select(&self) -> Option<u8> {
        self.regs(|regs| regs.rx_select)
    }

    /// Check if asynchronous mode was selected
    pub fn is_async(&self) -> bool {
        self.regs(|regs| regs.async_mode)
    }

    /// Check if the receiver is enabled
    pub fn receiver_enabled(&self) -> bool {
        self.regs(|regs| regs.receiver_enabled)
    }

    /// Check if the transmitter is enabled
    pub fn transmitter_enabled(&self) -> bool {
        self.regs(|regs| regs.transmitter_enabled)
    }

    /// Check if the serial port is enabled
    pub fn port_enabled(&self) -> bool {
        self.regs(|regs| regs.port_enabled)
    }
}

impl UartPeripheral for SimUart {
    const TX_OUTPUT_SOURCE: u8 = 0b1_0100;

    fn set_async_mode(&self) {
        self.regs(|regs| regs.async_mode = true);
    }

    fn set_baud(&self, setting: BaudSetting) {
        self.regs(|regs| regs.baud = Some(setting));
    }

    fn route_receive(&self, pin_select: u8) {
        self.regs(|regs| regs.rx_select = Some(pin_select));
    }

    fn set_receiver_enabled(&self, enabled: bool) {
        self.regs(|regs| {
            if !enabled {
                regs.overrun = false;
                regs.rx_fifo.clear();
            }
            regs.receiver_enabled = enabled;
        });
    }

    fn set_transmitter_enabled(&self, enabled: bool) {
        self.regs(|regs| regs.transmitter_enabled = enabled);
    }

    fn set_port_enabled(&self, enabled: bool) {
        self.regs(|regs| regs.port_enabled = enabled);
    }

    fn overrun_error(&self) -> bool {
        self.regs(|regs| regs.overrun)
    }

    fn framing_error(&self) -> bool {
        self.regs(|regs| {
            regs.rx_fifo
                .front()
                .map(|slot| slot.framing_error)
                .unwrap_or(false)
        })
    }

    fn rx_ready(&self) -> bool {
        self.regs(|regs| !regs.rx_fifo.is_empty())
    }

    fn read_byte(&self) -> u8 {
        self.regs(|regs| regs.rx_fifo.pop_front().map(|slot| slot.byte).unwrap_or(0))
    }

    fn tx_ready(&self) -> bool {
        self.regs(|regs| regs.tx_ready)
    }

    fn write_byte(&self, byte: u8) {
        self.regs(|regs| {
            if !(regs.port_enabled && regs.transmitter_enabled) {
                return;
            }
            // Oldest bytes are kept once the log is full
            let _ = regs.tx_log.push(byte);
            regs.tx_ready = false;
        });
    }
}
