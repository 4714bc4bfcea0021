//! Interrupt-serviced UART driver
//!
//! [`SerialState`] holds fixed-capacity receive and send queues that the
//! application reads and writes directly. [`SerialDriver::process`] moves
//! bytes between those queues and the peripheral; it is called from the
//! interrupt handler (or polled) and never blocks.
//!
//! # Error policy
//!
//! Receive faults never stop the driver. Overrun, framing errors and a full
//! receive queue all drop the affected byte and set
//! [`SerialState::had_error`], which stays set until the application clears
//! it.
//!
//! # Sharing
//!
//! The interrupt context services the queues, so background code must only
//! touch a `SerialState` inside a critical section, normally by keeping it in
//! a [`pic170x_hal::Mutex`].

mod baud;

pub use baud::{select_baud, BaudSelection, BaudTier, DEFAULT_BAUD_TIERS};

use core::fmt;

use heapless::Vec;
use pic170x_hal::{with_critical_section, InterruptControl, Register, UartPeripheral};

use crate::freq::ClockFrequency;
use crate::pins::{Direction, InputMode, PinDescriptor};

/// Default capacity of each serial queue
pub const SERIAL_QUEUE_LEN: usize = 32;

/// Serial initialization errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SerialError {
    /// A baud rate of zero was requested
    ZeroBaudRate,
    /// No baud-rate generator mode can produce the requested rate
    UnsupportedBaudRate { requested: u32 },
}

impl fmt::Display for SerialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerialError::ZeroBaudRate => write!(f, "baud rate must be non-zero"),
            SerialError::UnsupportedBaudRate { requested } => {
                write!(f, "unsupported baud rate: {}", requested)
            }
        }
    }
}

/// Queues, error flag and pin bindings of one serial port
///
/// Invariant: `send_cursor <= send_queue.len()`. Bytes before the cursor
/// have been handed to the peripheral.
#[derive(Debug)]
pub struct SerialState<'p, R, const N: usize = SERIAL_QUEUE_LEN> {
    /// Bytes received and not yet consumed by the application
    pub receive_queue: Vec<u8, N>,
    /// Bytes to transmit
    pub send_queue: Vec<u8, N>,
    /// Index of the next byte of `send_queue` to transmit
    pub send_cursor: usize,
    /// Set on any receive fault; cleared only by the application
    pub had_error: bool,
    rc_pin: Option<&'p PinDescriptor<'p, R>>,
    tx_pin: Option<&'p PinDescriptor<'p, R>>,
}

impl<R, const N: usize> Default for SerialState<'_, R, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'p, R, const N: usize> SerialState<'p, R, N> {
    /// Empty state with no pins bound
    pub const fn new() -> Self {
        Self {
            receive_queue: Vec::new(),
            send_queue: Vec::new(),
            send_cursor: 0,
            had_error: false,
            rc_pin: None,
            tx_pin: None,
        }
    }

    /// Receive pin bound by the last successful init
    pub fn rc_pin(&self) -> Option<&'p PinDescriptor<'p, R>> {
        self.rc_pin
    }

    /// Transmit pin bound by the last successful init
    ///
    /// `None` if no pin was given or the given pin cannot carry the
    /// transmit signal.
    pub fn tx_pin(&self) -> Option<&'p PinDescriptor<'p, R>> {
        self.tx_pin
    }

    /// Number of queued bytes not yet transmitted
    pub fn pending_send(&self) -> usize {
        self.send_queue.len().saturating_sub(self.send_cursor)
    }

    /// Replace the send queue with `data`
    ///
    /// Returns how many bytes fit.
    pub fn load_send(&mut self, data: &[u8]) -> usize {
        self.send_queue.clear();
        self.send_cursor = 0;
        self.push_send(data)
    }

    /// Append `data` behind any untransmitted bytes
    ///
    /// Already transmitted bytes are discarded first to make room. Returns
    /// how many bytes fit.
    pub fn enqueue_send(&mut self, data: &[u8]) -> usize {
        let len = self.send_queue.len();
        let sent = self.send_cursor.min(len);
        if sent > 0 {
            self.send_queue.copy_within(sent..len, 0);
            self.send_queue.truncate(len - sent);
            self.send_cursor = 0;
        }
        self.push_send(data)
    }

    fn push_send(&mut self, data: &[u8]) -> usize {
        let mut count = 0;
        for &byte in data {
            if self.send_queue.push(byte).is_err() {
                break;
            }
            count += 1;
        }
        count
    }

    /// Move received bytes into `buf`, oldest first
    ///
    /// Returns the number of bytes copied; the rest stay queued.
    pub fn take_received(&mut self, buf: &mut [u8]) -> usize {
        let len = self.receive_queue.len();
        let n = len.min(buf.len());
        buf[..n].copy_from_slice(&self.receive_queue[..n]);
        self.receive_queue.copy_within(n..len, 0);
        self.receive_queue.truncate(len - n);
        n
    }

    /// Clear the error flag, returning its previous value
    pub fn clear_error(&mut self) -> bool {
        core::mem::replace(&mut self.had_error, false)
    }
}

/// Serial driver for one UART peripheral
#[derive(Debug)]
pub struct SerialDriver<U, I> {
    uart: U,
    irq: I,
    clock: ClockFrequency,
    tiers: &'static [BaudTier],
}

impl<U: UartPeripheral, I: InterruptControl> SerialDriver<U, I> {
    /// Create a driver using the default baud-rate tiers
    pub const fn new(uart: U, irq: I, clock: ClockFrequency) -> Self {
        Self {
            uart,
            irq,
            clock,
            tiers: DEFAULT_BAUD_TIERS,
        }
    }

    /// Replace the baud-rate tiers tried by [`SerialDriver::init`]
    pub fn with_tiers(mut self, tiers: &'static [BaudTier]) -> Self {
        self.tiers = tiers;
        self
    }

    pub fn uart(&self) -> &U {
        &self.uart
    }

    pub fn tiers(&self) -> &'static [BaudTier] {
        self.tiers
    }

    /// Configure the peripheral and bind pins
    ///
    /// Either pin may be absent, giving a receive-only or transmit-only
    /// port. A transmit pin without output routing is treated as absent.
    /// The receiver or transmitter of an absent pin is switched off, so a
    /// re-init never leaves a unit running from a previous binding.
    /// On success returns the achieved baud rate. On failure neither the
    /// peripheral, the pins nor `state` are touched.
    pub fn init<'p, R: Register, const N: usize>(
        &self,
        state: &mut SerialState<'p, R, N>,
        rc_pin: Option<&'p PinDescriptor<'p, R>>,
        tx_pin: Option<&'p PinDescriptor<'p, R>>,
        baud_rate: u32,
    ) -> Result<u32, SerialError> {
        let selection = select_baud(self.clock.hz(), baud_rate, self.tiers).inspect_err(|_| {
            warn!(
                "serial: no baud divisor for {} baud at {} Hz",
                baud_rate,
                self.clock.hz()
            );
        })?;

        self.uart.set_async_mode();
        self.uart.set_baud(selection.setting());

        state.receive_queue.clear();
        state.rc_pin = rc_pin;
        if let Some(pin) = rc_pin {
            pin.set_direction(Direction::Input);
            pin.set_analog_mode(InputMode::Digital);
            self.uart.route_receive(pin.alternate_function());
            self.uart.set_receiver_enabled(true);
        } else {
            self.uart.set_receiver_enabled(false);
        }

        state.send_queue.clear();
        state.send_cursor = 0;
        state.tx_pin = tx_pin.filter(|pin| pin.has_output_routing());
        if tx_pin.is_some() && state.tx_pin.is_none() {
            warn!("serial: transmit pin has no output routing, transmit disabled");
        }
        if let Some(pin) = state.tx_pin {
            pin.set_direction(Direction::Output);
            pin.route_output(U::TX_OUTPUT_SOURCE);
            self.uart.set_transmitter_enabled(true);
        } else {
            self.uart.set_transmitter_enabled(false);
        }

        state.had_error = false;
        self.uart.set_port_enabled(true);

        info!(
            "serial: {} baud (requested {}), divisor {}, brg16 {}, brgh {}",
            selection.actual,
            baud_rate,
            selection.divisor,
            selection.tier.brg16,
            selection.tier.brgh
        );
        Ok(selection.actual)
    }

    /// Service the peripheral once
    ///
    /// Drains every byte the receiver holds into the receive queue and hands
    /// at most one byte to the transmitter. Runs inside a critical section;
    /// the previous interrupt-enable state is restored on return.
    pub fn process<R, const N: usize>(&self, state: &mut SerialState<'_, R, N>) {
        with_critical_section(&self.irq, |_| {
            if state.rc_pin.is_some() {
                self.receive(state);
            }
            if state.tx_pin.is_some() {
                self.transmit(state);
            }
        });
    }

    fn receive<R, const N: usize>(&self, state: &mut SerialState<'_, R, N>) {
        if self.uart.overrun_error() {
            // Only toggling the receiver clears a latched overrun
            self.uart.set_receiver_enabled(false);
            self.uart.set_receiver_enabled(true);
            state.had_error = true;
            warn!("serial: receive overrun");
            return;
        }

        while self.uart.rx_ready() {
            if self.uart.framing_error() {
                let _ = self.uart.read_byte();
                state.had_error = true;
                warn!("serial: framing error");
                continue;
            }

            let byte = self.uart.read_byte();
            if state.receive_queue.push(byte).is_err() {
                state.had_error = true;
                warn!("serial: receive queue full, dropped {=u8:#x}", byte);
            }
        }
    }

    fn transmit<R, const N: usize>(&self, state: &mut SerialState<'_, R, N>) {
        if state.send_cursor >= state.send_queue.len() || !self.uart.tx_ready() {
            return;
        }
        self.uart.write_byte(state.send_queue[state.send_cursor]);
        state.send_cursor += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Device;
    use crate::pins::{PinId, PinMap};
    use pic170x_hal::{BaudSetting, Mutex};
    use pic170x_hal_sim::{SimChip, SimRegister, SimUart};

    type Driver<'a> = SerialDriver<&'a SimUart, &'a pic170x_hal_sim::SimInterrupts>;

    fn driver(chip: &SimChip) -> Driver<'_> {
        SerialDriver::new(&chip.uart, &chip.gie, ClockFrequency::Mhz8)
    }

    /// Initialize with RC5 receive and RC4 transmit, the default UART pins
    fn init_port<'p, const N: usize>(
        driver: &Driver<'_>,
        map: &'p PinMap<'p, SimRegister>,
        state: &mut SerialState<'p, SimRegister, N>,
    ) {
        let actual = driver
            .init(state, map.get(PinId::Rc5), map.get(PinId::Rc4), 9600)
            .unwrap();
        assert_eq!(actual, 9615);
    }

    /// Run `process` until the send queue drains, completing each byte
    fn drain(driver: &Driver<'_>, uart: &SimUart, state: &mut SerialState<'_, SimRegister>) {
        for _ in 0..=state.send_queue.len() {
            driver.process(state);
            uart.finish_transmit();
        }
    }

    #[test]
    fn test_init_configures_peripheral_and_pins() {
        let chip = SimChip::new();
        let map = PinMap::new(Device::Pic16f1705, &chip.ports);
        let driver = driver(&chip);
        let mut state: SerialState<'_, SimRegister> = SerialState::new();
        state.had_error = true;

        init_port(&driver, &map, &mut state);

        assert!(chip.uart.is_async());
        assert_eq!(
            chip.uart.baud(),
            Some(BaudSetting {
                divisor: 12,
                brg16: false,
                brgh: false,
            })
        );
        assert_eq!(chip.uart.rx_select(), Some(0x15));
        assert!(chip.uart.receiver_enabled());
        assert!(chip.uart.transmitter_enabled());
        assert!(chip.uart.port_enabled());
        assert!(!state.had_error);

        // RC5 digital input, RC4 output routed to TX
        assert_eq!(chip.ports.c.tris.value(), 0b1110_1111);
        assert_eq!(chip.ports.c.ansel.value(), 0xFF);
        assert_eq!(chip.ports.c.pps[4].value(), SimUart::TX_OUTPUT_SOURCE);
        assert!(state.rc_pin().is_some());
        assert!(state.tx_pin().is_some());
    }

    #[test]
    fn test_init_analog_rc_pin_made_digital() {
        let chip = SimChip::new();
        let map = PinMap::new(Device::Pic16f1709, &chip.ports);
        let driver = driver(&chip);
        let mut state: SerialState<'_, SimRegister> = SerialState::new();

        driver
            .init(&mut state, map.get(PinId::Rb5), map.get(PinId::Rb7), 9600)
            .unwrap();

        assert_eq!(chip.ports.b.ansel.value(), 0b1101_1111);
        assert_eq!(chip.uart.rx_select(), Some(0x0D));
        assert_eq!(chip.ports.b.pps[7].value(), SimUart::TX_OUTPUT_SOURCE);
    }

    #[test]
    fn test_init_unsupported_baud_touches_nothing() {
        let chip = SimChip::new();
        let map = PinMap::new(Device::Pic16f1705, &chip.ports);
        let driver = SerialDriver::new(&chip.uart, &chip.gie, ClockFrequency::Khz500);
        let mut state: SerialState<'_, SimRegister> = SerialState::new();
        state.receive_queue.push(7).unwrap();
        state.had_error = true;

        let result = driver.init(&mut state, map.get(PinId::Rc5), map.get(PinId::Rc4), 115_200);

        assert_eq!(
            result,
            Err(SerialError::UnsupportedBaudRate { requested: 115_200 })
        );
        assert_eq!(chip.uart.baud(), None);
        assert!(!chip.uart.port_enabled());
        assert_eq!(chip.ports.c.tris.value(), 0xFF);
        assert_eq!(chip.ports.c.pps[4].value(), 0);
        assert_eq!(state.receive_queue, [7]);
        assert!(state.had_error);
        assert!(state.rc_pin().is_none());
    }

    #[test]
    fn test_tx_pin_without_routing_disables_transmit() {
        let chip = SimChip::new();
        let map = PinMap::new(Device::Pic16f1705, &chip.ports);
        let driver = driver(&chip);
        let mut state: SerialState<'_, SimRegister> = SerialState::new();

        let result = driver.init(&mut state, map.get(PinId::Rc5), map.get(PinId::Ra3), 9600);

        assert_eq!(result, Ok(9615));
        assert!(state.tx_pin().is_none());
        assert!(!chip.uart.transmitter_enabled());
        assert!(chip.uart.receiver_enabled());

        state.load_send(b"x");
        driver.process(&mut state);
        assert!(chip.uart.transmitted().is_empty());
        assert_eq!(state.send_cursor, 0);
    }

    #[test]
    fn test_reinit_disables_units_without_pins() {
        let chip = SimChip::new();
        let map = PinMap::new(Device::Pic16f1705, &chip.ports);
        let driver = driver(&chip);
        let mut state: SerialState<'_, SimRegister> = SerialState::new();
        init_port(&driver, &map, &mut state);
        state.load_send(b"a");
        drain(&driver, &chip.uart, &mut state);
        assert_eq!(chip.uart.transmitted(), b"a");
        chip.uart.clear_transmitted();

        let result = driver.init(&mut state, None, map.get(PinId::Ra3), 9600);

        assert_eq!(result, Ok(9615));
        assert!(!driver.uart().receiver_enabled());
        assert!(!driver.uart().transmitter_enabled());
        assert!(driver.uart().port_enabled());
        assert!(state.rc_pin().is_none());
        assert!(state.tx_pin().is_none());

        // Nothing received or sent through the stale binding
        assert!(!chip.uart.inject_byte(b'z'));
        state.load_send(b"b");
        drain(&driver, &chip.uart, &mut state);
        assert!(chip.uart.transmitted().is_empty());
        assert!(state.receive_queue.is_empty());
    }

    #[test]
    fn test_custom_tiers() {
        static HIGH_SPEED_ONLY: [BaudTier; 1] = [BaudTier {
            scale: 4,
            brg16: true,
            brgh: true,
            min_divisor: 2,
            max_divisor: 0xFFFF,
        }];

        let chip = SimChip::new();
        let map = PinMap::new(Device::Pic16f1705, &chip.ports);
        let driver = driver(&chip).with_tiers(&HIGH_SPEED_ONLY);
        let mut state: SerialState<'_, SimRegister> = SerialState::new();
        assert_eq!(driver.tiers(), &HIGH_SPEED_ONLY);
        assert_eq!(
            SerialDriver::new(&chip.uart, &chip.gie, ClockFrequency::Mhz8).tiers(),
            DEFAULT_BAUD_TIERS
        );

        init_port(&driver, &map, &mut state);

        // 8 MHz / 9600 / 4 = 208, minus one
        assert_eq!(
            chip.uart.baud(),
            Some(BaudSetting {
                divisor: 207,
                brg16: true,
                brgh: true,
            })
        );
    }

    #[test]
    fn test_transmit_one_byte_per_process() {
        let chip = SimChip::new();
        let map = PinMap::new(Device::Pic16f1705, &chip.ports);
        let driver = driver(&chip);
        let mut state: SerialState<'_, SimRegister> = SerialState::new();
        init_port(&driver, &map, &mut state);

        assert_eq!(state.load_send(b"hi"), 2);
        driver.process(&mut state);
        // Shift register still busy
        driver.process(&mut state);
        assert_eq!(state.send_cursor, 1);
        assert_eq!(chip.uart.transmitted(), b"h");

        chip.uart.finish_transmit();
        driver.process(&mut state);
        assert_eq!(state.send_cursor, 2);
        assert_eq!(chip.uart.transmitted(), b"hi");
    }

    #[test]
    fn test_send_round_trip_in_order() {
        let chip = SimChip::new();
        let map = PinMap::new(Device::Pic16f1705, &chip.ports);
        let driver = driver(&chip);
        let mut state: SerialState<'_, SimRegister> = SerialState::new();
        init_port(&driver, &map, &mut state);

        state.load_send(b"hello, world");
        drain(&driver, &chip.uart, &mut state);

        assert_eq!(chip.uart.transmitted(), b"hello, world");
        assert_eq!(state.send_cursor, state.send_queue.len());
        assert_eq!(state.pending_send(), 0);

        // Nothing left, nothing more sent
        drain(&driver, &chip.uart, &mut state);
        assert_eq!(chip.uart.transmitted().len(), 12);
    }

    #[test]
    fn test_receive_appends_in_order() {
        let chip = SimChip::new();
        let map = PinMap::new(Device::Pic16f1705, &chip.ports);
        let driver = driver(&chip);
        let mut state: SerialState<'_, SimRegister> = SerialState::new();
        init_port(&driver, &map, &mut state);

        chip.uart.inject_byte(b'o');
        chip.uart.inject_byte(b'k');
        driver.process(&mut state);

        assert_eq!(state.receive_queue, *b"ok");
        assert_eq!(chip.uart.rx_pending(), 0);
        assert!(!state.had_error);
    }

    #[test]
    fn test_receive_overflow_keeps_buffered_bytes() {
        let chip = SimChip::new();
        let map = PinMap::new(Device::Pic16f1705, &chip.ports);
        let driver = driver(&chip);
        let mut state: SerialState<'_, SimRegister, 4> = SerialState::new();
        init_port(&driver, &map, &mut state);

        for byte in [1, 2, 3, 4] {
            chip.uart.inject_byte(byte);
            driver.process(&mut state);
        }
        assert!(!state.had_error);

        chip.uart.inject_byte(5);
        driver.process(&mut state);

        assert_eq!(state.receive_queue, [1, 2, 3, 4]);
        assert!(state.had_error);
        assert_eq!(chip.uart.rx_pending(), 0);
    }

    #[test]
    fn test_overrun_toggles_receiver_and_flags() {
        let chip = SimChip::new();
        let map = PinMap::new(Device::Pic16f1705, &chip.ports);
        let driver = driver(&chip);
        let mut state: SerialState<'_, SimRegister> = SerialState::new();
        init_port(&driver, &map, &mut state);
        state.receive_queue.push(b'a').unwrap();

        chip.uart.inject_byte(b'b');
        chip.uart.inject_byte(b'c');
        // Third byte overflows the two-deep FIFO
        assert!(!chip.uart.inject_byte(b'd'));
        assert!(chip.uart.overrun_error());

        driver.process(&mut state);

        assert!(state.had_error);
        assert_eq!(state.receive_queue, [b'a']);
        assert!(!chip.uart.overrun_error());
        assert!(chip.uart.receiver_enabled());

        // Receiver works again afterwards
        chip.uart.inject_byte(b'e');
        driver.process(&mut state);
        assert_eq!(state.receive_queue, *b"ae");
    }

    #[test]
    fn test_asserted_overrun_leaves_queue_unchanged() {
        let chip = SimChip::new();
        let map = PinMap::new(Device::Pic16f1705, &chip.ports);
        let driver = driver(&chip);
        let mut state: SerialState<'_, SimRegister> = SerialState::new();
        init_port(&driver, &map, &mut state);

        chip.uart.inject_byte(b'x');
        chip.uart.assert_overrun();
        driver.process(&mut state);

        assert!(state.had_error);
        assert!(state.receive_queue.is_empty());
    }

    #[test]
    fn test_framing_error_discards_byte() {
        let chip = SimChip::new();
        let map = PinMap::new(Device::Pic16f1705, &chip.ports);
        let driver = driver(&chip);
        let mut state: SerialState<'_, SimRegister> = SerialState::new();
        init_port(&driver, &map, &mut state);

        chip.uart.inject_framing_error(0xFF);
        chip.uart.inject_byte(b'z');
        driver.process(&mut state);

        assert_eq!(state.receive_queue, [b'z']);
        assert!(state.had_error);
        assert!(state.clear_error());
        assert!(!state.had_error);
        assert!(!state.clear_error());
    }

    #[test]
    fn test_transmit_only_port_ignores_receiver() {
        let chip = SimChip::new();
        let map = PinMap::new(Device::Pic16f1705, &chip.ports);
        let driver = driver(&chip);
        let mut state: SerialState<'_, SimRegister> = SerialState::new();

        driver
            .init(&mut state, None, map.get(PinId::Rc4), 9600)
            .unwrap();

        assert!(!chip.uart.receiver_enabled());
        state.load_send(b"a");
        driver.process(&mut state);
        assert_eq!(chip.uart.transmitted(), b"a");
        assert!(state.receive_queue.is_empty());
    }

    #[test]
    fn test_process_restores_interrupt_flag() {
        let chip = SimChip::new();
        let map = PinMap::new(Device::Pic16f1705, &chip.ports);
        let driver = driver(&chip);
        let mut state: SerialState<'_, SimRegister> = SerialState::new();
        init_port(&driver, &map, &mut state);

        chip.gie.set_interrupts_enabled(true);
        driver.process(&mut state);
        assert!(chip.gie.interrupts_enabled());
        assert_eq!(chip.gie.disable_count(), 1);

        chip.gie.set_interrupts_enabled(false);
        driver.process(&mut state);
        assert!(!chip.gie.interrupts_enabled());
    }

    #[test]
    fn test_shared_state_behind_mutex() {
        let chip = SimChip::new();
        let map = PinMap::new(Device::Pic16f1705, &chip.ports);
        let driver = driver(&chip);
        let shared: Mutex<SerialState<'_, SimRegister>> = Mutex::new(SerialState::new());

        shared.with_mut(&chip.gie, |state| init_port(&driver, &map, state));
        chip.uart.inject_byte(b'q');
        shared.with_mut(&chip.gie, |state| driver.process(state));

        let mut buf = [0u8; 4];
        let n = shared.with_mut(&chip.gie, |state| state.take_received(&mut buf));
        assert_eq!(&buf[..n], b"q");
    }

    #[test]
    fn test_enqueue_send_compacts() {
        let mut state: SerialState<'_, SimRegister, 4> = SerialState::new();

        assert_eq!(state.load_send(b"abc"), 3);
        state.send_cursor = 2;
        assert_eq!(state.enqueue_send(b"xyz"), 3);

        assert_eq!(state.send_queue, *b"cxyz");
        assert_eq!(state.send_cursor, 0);
        assert_eq!(state.pending_send(), 4);
        assert_eq!(state.enqueue_send(b"!"), 0);
    }

    #[test]
    fn test_load_send_truncates() {
        let mut state: SerialState<'_, SimRegister, 4> = SerialState::new();

        assert_eq!(state.load_send(b"abcdef"), 4);
        assert_eq!(state.send_queue, *b"abcd");
    }

    #[test]
    fn test_take_received_partial() {
        let mut state: SerialState<'_, SimRegister> = SerialState::new();
        state.receive_queue.extend_from_slice(b"abcde").unwrap();

        let mut buf = [0u8; 3];
        assert_eq!(state.take_received(&mut buf), 3);
        assert_eq!(&buf, b"abc");
        assert_eq!(state.receive_queue, *b"de");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            SerialError::UnsupportedBaudRate { requested: 300 }.to_string(),
            "unsupported baud rate: 300"
        );
    }
}
