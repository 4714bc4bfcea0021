//! Interrupt event dispatch
//!
//! The hardware has a single interrupt vector. Instead of a bare handler
//! function, the application registers [`EventHandler`]s with a
//! [`Dispatcher`] and calls [`Dispatcher::service_all`] from the vector.
//! Host tests call [`Dispatcher::dispatch`] with a specific [`Event`] to
//! exercise the servicing logic deterministically.
//!
//! Handlers are `Sync`, so the dispatcher and everything it services can
//! live in `static`s that the interrupt vector reaches:
//!
//! ```no_run
//! use pic170x_core::{ClockFrequency, Dispatcher, TimerService, TimerState, TimerTask};
//! use pic170x_hal::Mutex;
//! use pic170x_hal_sim::{SimInterrupts, SimTimer};
//!
//! static GIE: SimInterrupts = SimInterrupts::new(false);
//! static TIMER0: SimTimer = SimTimer::new();
//! static TIMER: TimerService<&SimTimer> = TimerService::new(&TIMER0, ClockFrequency::Mhz8);
//! static TIMER_STATE: Mutex<TimerState> = Mutex::new(TimerState::new());
//! static TIMER_TASK: TimerTask<'static, &SimTimer> = TimerTask::new(&TIMER, &TIMER_STATE);
//! static DISPATCHER: Mutex<Dispatcher<'static, &SimInterrupts, 2>> =
//!     Mutex::new(Dispatcher::new(&GIE));
//!
//! fn interrupt_vector() {
//!     DISPATCHER.with(&GIE, |dispatcher| dispatcher.service_all());
//! }
//!
//! TIMER_STATE.with_mut(&GIE, |state| TIMER.init(state));
//! DISPATCHER
//!     .with_mut(&GIE, |dispatcher| dispatcher.register(&TIMER_TASK))
//!     .unwrap();
//! interrupt_vector();
//! ```

use core::fmt;

use heapless::Vec;
use pic170x_hal::{
    with_critical_section, CriticalSection, InterruptControl, Mutex, TickTimer, UartPeripheral,
};

use crate::serial::{SerialDriver, SerialState};
use crate::timer::{TimerService, TimerState};

/// Interrupt causes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Tick timer overflowed
    TickPending,
    /// UART received a byte
    ReceiveReady,
    /// UART transmit register is empty
    TransmitReady,
    /// UART receive overrun latched
    Overrun,
    /// UART received a byte with a bad stop bit
    FramingError,
}

impl Event {
    pub const fn is_serial(self) -> bool {
        !matches!(self, Event::TickPending)
    }
}

/// Interrupt-context service routine
///
/// Handlers run with interrupts disabled and must finish quickly.
pub trait EventHandler {
    /// Whether this handler services `event`
    fn handles(&self, event: Event) -> bool;

    /// Service the peripheral, checking its own flags
    fn service(&self, cs: &CriticalSection<'_>);
}

/// Dispatch errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatchError {
    /// Handler table is full
    TooManyHandlers,
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::TooManyHandlers => write!(f, "too many event handlers"),
        }
    }
}

/// Runs registered handlers inside a critical section
pub struct Dispatcher<'a, I, const H: usize = 4> {
    irq: I,
    handlers: Vec<&'a (dyn EventHandler + Sync), H>,
}

impl<'a, I: InterruptControl, const H: usize> Dispatcher<'a, I, H> {
    pub const fn new(irq: I) -> Self {
        Self {
            irq,
            handlers: Vec::new(),
        }
    }

    pub fn register(
        &mut self,
        handler: &'a (dyn EventHandler + Sync),
    ) -> Result<(), DispatchError> {
        self.handlers
            .push(handler)
            .map_err(|_| DispatchError::TooManyHandlers)
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Deliver one event
    ///
    /// Returns how many handlers serviced it.
    pub fn dispatch(&self, event: Event) -> usize {
        with_critical_section(&self.irq, |cs| {
            let mut serviced = 0;
            for handler in self.handlers.iter().filter(|h| h.handles(event)) {
                handler.service(cs);
                serviced += 1;
            }
            trace!("dispatch: {} -> {} handlers", event, serviced);
            serviced
        })
    }

    /// Run every handler, as the shared interrupt vector does
    pub fn service_all(&self) {
        with_critical_section(&self.irq, |cs| {
            for handler in &self.handlers {
                handler.service(cs);
            }
        });
    }
}

/// Advances a shared [`TimerState`] on tick events
pub struct TimerTask<'a, T> {
    service: &'a TimerService<T>,
    state: &'a Mutex<TimerState>,
}

impl<'a, T: TickTimer> TimerTask<'a, T> {
    pub const fn new(service: &'a TimerService<T>, state: &'a Mutex<TimerState>) -> Self {
        Self { service, state }
    }
}

impl<T: TickTimer> EventHandler for TimerTask<'_, T> {
    fn handles(&self, event: Event) -> bool {
        event == Event::TickPending
    }

    fn service(&self, cs: &CriticalSection<'_>) {
        self.service.tick(&mut self.state.borrow_mut(cs));
    }
}

/// Services a shared [`SerialState`] on UART events
pub struct SerialTask<'a, 'p, U, I, R, const N: usize> {
    driver: &'a SerialDriver<U, I>,
    state: &'a Mutex<SerialState<'p, R, N>>,
}

impl<'a, 'p, U, I, R, const N: usize> SerialTask<'a, 'p, U, I, R, N>
where
    U: UartPeripheral,
    I: InterruptControl,
{
    pub const fn new(
        driver: &'a SerialDriver<U, I>,
        state: &'a Mutex<SerialState<'p, R, N>>,
    ) -> Self {
        Self { driver, state }
    }
}

impl<U, I, R, const N: usize> EventHandler for SerialTask<'_, '_, U, I, R, N>
where
    U: UartPeripheral,
    I: InterruptControl,
{
    fn handles(&self, event: Event) -> bool {
        event.is_serial()
    }

    fn service(&self, cs: &CriticalSection<'_>) {
        self.driver.process(&mut self.state.borrow_mut(cs));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Device;
    use crate::freq::ClockFrequency;
    use crate::pins::{Direction, Pin, PinId, PinMap};
    use core::sync::atomic::{AtomicU32, Ordering};
    use embedded_hal::digital::StatefulOutputPin;
    use pic170x_hal_sim::{SimChip, SimInterrupts, SimRegister, SimTimer};

    struct Counter {
        event: Event,
        calls: AtomicU32,
    }

    impl Counter {
        const fn new(event: Event) -> Self {
            Self {
                event,
                calls: AtomicU32::new(0),
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::Relaxed)
        }
    }

    impl EventHandler for Counter {
        fn handles(&self, event: Event) -> bool {
            event == self.event
        }

        fn service(&self, _cs: &CriticalSection<'_>) {
            self.calls.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[test]
    fn test_dispatch_routes_by_event() {
        let chip = SimChip::new();
        let tick = Counter::new(Event::TickPending);
        let rx = Counter::new(Event::ReceiveReady);
        let mut dispatcher: Dispatcher<'_, _, 2> = Dispatcher::new(&chip.gie);
        dispatcher.register(&tick).unwrap();
        dispatcher.register(&rx).unwrap();

        assert_eq!(dispatcher.dispatch(Event::ReceiveReady), 1);
        assert_eq!(dispatcher.dispatch(Event::Overrun), 0);
        dispatcher.service_all();

        assert_eq!(tick.calls(), 1);
        assert_eq!(rx.calls(), 2);
    }

    #[test]
    fn test_register_full() {
        let chip = SimChip::new();
        let tick = Counter::new(Event::TickPending);
        let mut dispatcher: Dispatcher<'_, _, 1> = Dispatcher::new(&chip.gie);

        assert_eq!(dispatcher.register(&tick), Ok(()));
        assert_eq!(
            dispatcher.register(&tick),
            Err(DispatchError::TooManyHandlers)
        );
        assert_eq!(dispatcher.handler_count(), 1);
    }

    #[test]
    fn test_dispatch_runs_in_critical_section() {
        let chip = SimChip::new();
        chip.gie.set_interrupts_enabled(true);
        let dispatcher: Dispatcher<'_, _> = Dispatcher::new(&chip.gie);

        dispatcher.dispatch(Event::TickPending);

        assert_eq!(chip.gie.disable_count(), 1);
        assert!(chip.gie.interrupts_enabled());
    }

    #[test]
    fn test_serial_events_classified() {
        assert!(!Event::TickPending.is_serial());
        for event in [
            Event::ReceiveReady,
            Event::TransmitReady,
            Event::Overrun,
            Event::FramingError,
        ] {
            assert!(event.is_serial());
        }
    }

    /// Everything the interrupt vector touches lives in statics
    #[test]
    fn test_static_dispatcher() {
        static GIE: SimInterrupts = SimInterrupts::new(false);
        static TIMER0: SimTimer = SimTimer::new();
        static TIMER: TimerService<&SimTimer> = TimerService::new(&TIMER0, ClockFrequency::Mhz8);
        static TIMER_STATE: Mutex<TimerState> = Mutex::new(TimerState::new());
        static TIMER_TASK: TimerTask<'static, &SimTimer> = TimerTask::new(&TIMER, &TIMER_STATE);
        static DISPATCHER: Mutex<Dispatcher<'static, &SimInterrupts, 1>> =
            Mutex::new(Dispatcher::new(&GIE));

        TIMER_STATE.with_mut(&GIE, |state| TIMER.init(state));
        DISPATCHER
            .with_mut(&GIE, |dispatcher| dispatcher.register(&TIMER_TASK))
            .unwrap();
        GIE.set_interrupts_enabled(true);

        for _ in 0..3 {
            TIMER.timer().fire();
            DISPATCHER.with(&GIE, |dispatcher| dispatcher.service_all());
        }

        // 3 ticks of 32.768 ms
        let state = TIMER_STATE.with(&GIE, |state| *state);
        assert_eq!(state, TimerState { ms: 98, us: 304 });
        assert!(!TIMER0.is_pending());
        assert!(GIE.interrupts_enabled());
        assert_eq!(DISPATCHER.with(&GIE, |dispatcher| dispatcher.handler_count()), 1);
    }

    /// Toggle an LED every second from the main loop, time kept by the tick
    #[test]
    fn test_blink_flow() {
        const CLOCK: ClockFrequency = ClockFrequency::require(8_000_000);

        let chip = SimChip::new();
        crate::freq::apply_oscillator(&chip.osccon, CLOCK);
        let map = PinMap::new(Device::Pic16f1705, &chip.ports);
        let mut led = Pin::new(map.get(PinId::Rc0).unwrap()).into_output(false);

        let timer = TimerService::new(&chip.timer0, CLOCK);
        let timer_state = Mutex::new(TimerState::new());
        timer_state.with_mut(&chip.gie, |state| timer.init(state));
        let timer_task = TimerTask::new(&timer, &timer_state);

        let mut dispatcher: Dispatcher<'_, _, 1> = Dispatcher::new(&chip.gie);
        dispatcher.register(&timer_task).unwrap();
        chip.gie.set_interrupts_enabled(true);

        let mut toggles = 0;
        // 100 ticks of 32.768 ms = 3.2768 s
        for _ in 0..100 {
            chip.timer0.fire();
            dispatcher.service_all();

            if timer_state.with_mut(&chip.gie, |state| state.take_period(1000)) {
                led.toggle().unwrap();
                toggles += 1;
            }
        }

        assert_eq!(toggles, 3);
        assert!(led.is_set_high().unwrap());
        assert_eq!(chip.osccon.value(), 0b0111_0010);
        assert_eq!(map.get(PinId::Rc0).unwrap().direction(), Some(Direction::Output));
    }

    /// Echo every received byte back, serviced by interrupt events
    #[test]
    fn test_echo_flow() {
        let chip = SimChip::new();
        let map = PinMap::new(Device::Pic16f1709, &chip.ports);
        let driver = SerialDriver::new(&chip.uart, &chip.gie, ClockFrequency::Mhz16);
        let serial_state: Mutex<SerialState<'_, SimRegister>> = Mutex::new(SerialState::new());

        let actual = serial_state
            .with_mut(&chip.gie, |state| {
                driver.init(state, map.get(PinId::Rb5), map.get(PinId::Rb7), 19_200)
            })
            .unwrap();
        // 16 MHz / 19200 / 64 = 13, minus one
        assert_eq!(actual, 19_230);

        let serial_task = SerialTask::new(&driver, &serial_state);
        let mut dispatcher: Dispatcher<'_, _, 1> = Dispatcher::new(&chip.gie);
        dispatcher.register(&serial_task).unwrap();

        for &byte in b"ping" {
            chip.uart.inject_byte(byte);
            dispatcher.dispatch(Event::ReceiveReady);

            // Main loop: move whatever arrived into the send queue
            serial_state.with_mut(&chip.gie, |state| {
                let mut buf = [0u8; 8];
                let n = state.take_received(&mut buf);
                state.enqueue_send(&buf[..n]);
            });

            dispatcher.dispatch(Event::TransmitReady);
            chip.uart.finish_transmit();
        }

        assert_eq!(chip.uart.transmitted(), b"ping");
        assert!(!serial_state.with(&chip.gie, |state| state.had_error));
    }
}
