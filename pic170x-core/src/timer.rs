//! Coarse millisecond timer
//!
//! Timer0 overflows at a fixed period determined by the clock frequency
//! (8.192 ms at 32 MHz up to 131.072 ms at 2 MHz and below). Each overflow
//! is a tick; the interrupt handler calls [`TimerService::tick`], which
//! advances a running [`TimerState`] by one tick period.
//!
//! The state only ever moves forward. Applications measure intervals by
//! comparing against it, or consume elapsed time with
//! [`TimerState::take_period`].

use pic170x_hal::TickTimer;

use crate::freq::{ClockFrequency, FrequencyConfig};

/// Running time since the timer was initialized
///
/// `us` is always below 1000 after a tick. `ms` wraps after roughly
/// 49.7 days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerState {
    pub ms: u32,
    pub us: u16,
}

impl TimerState {
    pub const fn new() -> Self {
        Self { ms: 0, us: 0 }
    }

    /// Return to zero
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Add an interval and carry whole milliseconds out of `us`
    pub fn advance(&mut self, ms: u32, us: u16) {
        let us = self.us as u32 + us as u32;
        self.ms = self.ms.wrapping_add(ms).wrapping_add(us / 1000);
        self.us = (us % 1000) as u16;
    }

    /// Consume `period_ms` of elapsed time if that much has accumulated
    ///
    /// Returns `true` when a period elapsed. The remainder is kept, so
    /// calling this from the main loop yields periods that do not drift.
    pub fn take_period(&mut self, period_ms: u32) -> bool {
        if self.ms < period_ms {
            return false;
        }
        self.ms -= period_ms;
        true
    }
}

/// Periodic tick service for one tick timer
#[derive(Debug)]
pub struct TimerService<T> {
    timer: T,
    config: FrequencyConfig,
}

impl<T: TickTimer> TimerService<T> {
    pub const fn new(timer: T, frequency: ClockFrequency) -> Self {
        Self {
            timer,
            config: frequency.config(),
        }
    }

    pub fn config(&self) -> &FrequencyConfig {
        &self.config
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Program the prescaler, enable the tick interrupt and zero `state`
    ///
    /// Global interrupts are left alone; the application enables them once
    /// everything is initialized.
    pub fn init(&self, state: &mut TimerState) {
        state.reset();
        self.timer.configure(self.config.timer_prescale_bits);
        self.timer.enable_interrupt();
        info!(
            "timer: prescale bits {=u8}, tick {} ms + {} us",
            self.config.timer_prescale_bits,
            self.config.tick_ms,
            self.config.tick_us
        );
    }

    /// Service a pending tick
    ///
    /// Returns `false` without touching anything if no tick is pending.
    /// Otherwise advances `state` by one period and only then acknowledges
    /// the interrupt.
    pub fn tick(&self, state: &mut TimerState) -> bool {
        if !self.timer.is_pending() {
            return false;
        }
        state.advance(self.config.tick_ms, self.config.tick_us);
        self.timer.clear_pending();
        true
    }
}
