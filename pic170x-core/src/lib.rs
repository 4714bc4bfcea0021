//! Board-agnostic core of the pic170x hardware abstraction library
//!
//! This crate contains the logic that sits between application firmware and
//! the `pic170x-hal` traits:
//!
//! - Frequency configuration table and build-configuration check
//! - Pin registry (symbolic pins, register-level pin semantics)
//! - Coarse millisecond timer driven by a periodic tick interrupt
//! - Interrupt-serviced UART driver with fixed-capacity byte queues
//! - Interrupt event dispatch
//!
//! Nothing here owns global state. The application creates the state
//! objects, shares them with the interrupt handler through
//! [`pic170x_hal::Mutex`], and passes them into every operation.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod config;
pub mod dispatch;
pub mod freq;
pub mod pins;
pub mod serial;
pub mod timer;

pub use config::{BuildConfig, ConfigMismatch, Device};
pub use dispatch::{Dispatcher, Event, EventHandler, SerialTask, TimerTask};
pub use freq::{ClockFrequency, FrequencyConfig};
pub use pins::{Direction, InputMode, Pin, PinDescriptor, PinId, PinMap};
pub use serial::{BaudTier, SerialDriver, SerialError, SerialState, SERIAL_QUEUE_LEN};
pub use timer::{TimerService, TimerState};
