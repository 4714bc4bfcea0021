//! Clock frequency configuration
//!
//! Every timing-dependent component assumes the processor clock is chosen
//! once, at build time, and never changes. Only the internal-oscillator
//! frequencies below are supported; slower clocks would make the coarse
//! timer's steps uselessly large.
//!
//! ```
//! use pic170x_core::freq::ClockFrequency;
//!
//! // Fails to compile for an unsupported frequency
//! const CLOCK: ClockFrequency = ClockFrequency::require(8_000_000);
//! assert_eq!(CLOCK.config().tick_ms, 32);
//! ```

use pic170x_hal::Register;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Lowest supported clock frequency in Hz
pub const MIN_CLOCK_HZ: u32 = 500_000;

/// Supported processor clock frequencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ClockFrequency {
    Mhz32,
    Mhz16,
    Mhz8,
    Mhz4,
    Mhz2,
    Mhz1,
    Khz500,
}

/// Per-frequency register settings and timer increments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrequencyConfig {
    /// Value for the oscillator control register
    pub osccon_bits: u8,
    /// Timer prescaler selection bits
    pub timer_prescale_bits: u8,
    /// Whole milliseconds per timer tick
    pub tick_ms: u32,
    /// Additional microseconds per timer tick (always < 1000)
    pub tick_us: u16,
}

impl FrequencyConfig {
    /// Tick period in microseconds
    pub const fn tick_period_us(&self) -> u32 {
        self.tick_ms * 1000 + self.tick_us as u32
    }
}

impl ClockFrequency {
    /// All supported frequencies, fastest first
    pub const ALL: [ClockFrequency; 7] = [
        ClockFrequency::Mhz32,
        ClockFrequency::Mhz16,
        ClockFrequency::Mhz8,
        ClockFrequency::Mhz4,
        ClockFrequency::Mhz2,
        ClockFrequency::Mhz1,
        ClockFrequency::Khz500,
    ];

    /// Frequency in Hz
    pub const fn hz(self) -> u32 {
        match self {
            ClockFrequency::Mhz32 => 32_000_000,
            ClockFrequency::Mhz16 => 16_000_000,
            ClockFrequency::Mhz8 => 8_000_000,
            ClockFrequency::Mhz4 => 4_000_000,
            ClockFrequency::Mhz2 => 2_000_000,
            ClockFrequency::Mhz1 => 1_000_000,
            ClockFrequency::Khz500 => 500_000,
        }
    }

    /// Look up a supported frequency
    pub const fn from_hz(hz: u32) -> Option<Self> {
        match hz {
            32_000_000 => Some(ClockFrequency::Mhz32),
            16_000_000 => Some(ClockFrequency::Mhz16),
            8_000_000 => Some(ClockFrequency::Mhz8),
            4_000_000 => Some(ClockFrequency::Mhz4),
            2_000_000 => Some(ClockFrequency::Mhz2),
            1_000_000 => Some(ClockFrequency::Mhz1),
            500_000 => Some(ClockFrequency::Khz500),
            _ => None,
        }
    }

    /// Look up a supported frequency in a const context
    ///
    /// # Panics
    ///
    /// Panics for unsupported frequencies. Used to initialize a `const`,
    /// the panic becomes a compile error.
    pub const fn require(hz: u32) -> Self {
        match Self::from_hz(hz) {
            Some(freq) => freq,
            None if hz < MIN_CLOCK_HZ => {
                panic!("unsupported clock frequency (frequencies < 500 kHz not supported)")
            }
            None => panic!("unsupported clock frequency"),
        }
    }

    /// Register settings for this frequency
    ///
    /// Timer0 counts Fosc/4 through an 8-bit counter, so one tick lasts
    /// `4 * 256 * prescaler / Fosc` seconds.
    pub const fn config(self) -> FrequencyConfig {
        match self {
            ClockFrequency::Mhz32 => FrequencyConfig {
                osccon_bits: 0b1111_0010,
                timer_prescale_bits: 0x07,
                tick_ms: 8,
                tick_us: 192,
            },
            ClockFrequency::Mhz16 => FrequencyConfig {
                osccon_bits: 0b0111_1010,
                timer_prescale_bits: 0x07,
                tick_ms: 16,
                tick_us: 384,
            },
            ClockFrequency::Mhz8 => FrequencyConfig {
                osccon_bits: 0b0111_0010,
                timer_prescale_bits: 0x07,
                tick_ms: 32,
                tick_us: 768,
            },
            ClockFrequency::Mhz4 => FrequencyConfig {
                osccon_bits: 0b0110_1010,
                timer_prescale_bits: 0x07,
                tick_ms: 65,
                tick_us: 536,
            },
            ClockFrequency::Mhz2 => FrequencyConfig {
                osccon_bits: 0b0110_0010,
                timer_prescale_bits: 0x07,
                tick_ms: 131,
                tick_us: 72,
            },
            // Smaller prescalers keep the tick at 131.072 ms below 2 MHz
            ClockFrequency::Mhz1 => FrequencyConfig {
                osccon_bits: 0b0101_1010,
                timer_prescale_bits: 0x06,
                tick_ms: 131,
                tick_us: 72,
            },
            ClockFrequency::Khz500 => FrequencyConfig {
                osccon_bits: 0b0011_1010,
                timer_prescale_bits: 0x05,
                tick_ms: 131,
                tick_us: 72,
            },
        }
    }
}

/// Switch the internal oscillator to `frequency`
///
/// Applications call this first, before initializing anything else.
pub fn apply_oscillator<R: Register>(osccon: &R, frequency: ClockFrequency) {
    let bits = frequency.config().osccon_bits;
    debug!("oscillator: OSCCON = {=u8:#x}", bits);
    osccon.write(bits);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pic170x_hal_sim::SimRegister;

    #[test]
    fn test_round_trip_hz() {
        for freq in ClockFrequency::ALL {
            assert_eq!(ClockFrequency::from_hz(freq.hz()), Some(freq));
        }
    }

    #[test]
    fn test_unsupported_frequencies() {
        assert_eq!(ClockFrequency::from_hz(0), None);
        assert_eq!(ClockFrequency::from_hz(250_000), None);
        assert_eq!(ClockFrequency::from_hz(20_000_000), None);
    }

    #[test]
    fn test_require_in_const() {
        const CLOCK: ClockFrequency = ClockFrequency::require(16_000_000);
        assert_eq!(CLOCK, ClockFrequency::Mhz16);
    }

    #[test]
    #[should_panic(expected = "unsupported clock frequency")]
    fn test_require_rejects_at_runtime() {
        ClockFrequency::require(12_000_000);
    }

    #[test]
    fn test_tick_matches_timer_period() {
        // 4 clocks per instruction, 256 counts per overflow
        for freq in ClockFrequency::ALL {
            let config = freq.config();
            let prescaler = 1u64 << (config.timer_prescale_bits + 1);
            let period_us = 4 * 256 * prescaler * 1_000_000 / freq.hz() as u64;
            assert_eq!(config.tick_period_us() as u64, period_us, "{:?}", freq);
            assert!(config.tick_us < 1000);
        }
    }

    #[test]
    fn test_apply_oscillator() {
        let osccon = SimRegister::new(0b0011_1000);
        apply_oscillator(&osccon, ClockFrequency::Mhz8);
        assert_eq!(osccon.value(), 0b0111_0010);
    }
}
