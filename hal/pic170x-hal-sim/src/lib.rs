//! Simulated PIC16(L)F170x peripherals
//!
//! This crate implements every `pic170x-hal` trait in software so the core
//! library can be driven deterministically from host tests:
//!
//! - [`SimRegister`] - an atomic 8-bit register
//! - [`SimInterrupts`] - the global interrupt-enable flag
//! - [`SimTimer`] - Timer0 with a manually fired overflow
//! - [`SimUart`] - the EUSART with a 2-deep receive FIFO
//! - [`SimChip`] - all of the above with power-on reset values
//!
//! Test code keeps shared references to the simulated peripherals and uses
//! their injection methods (`fire`, `inject_byte`, `finish_transmit`, ...)
//! to play the role of the outside world. Every peripheral is `Sync`, so
//! tests can also place them in `static`s the way firmware places the real
//! chip.

#![no_std]
#![deny(unsafe_code)]

pub mod chip;
pub mod interrupt;
pub mod register;
pub mod timer;
pub mod uart;

pub use chip::SimChip;
pub use interrupt::SimInterrupts;
pub use register::SimRegister;
pub use timer::SimTimer;
pub use uart::{SimUart, RX_FIFO_DEPTH, TX_LOG_CAPACITY};
