//! pic170x Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits the core library is
//! written against. A chip crate implements them on top of the real
//! special-function registers; the simulation crate implements them in
//! software so the same core logic can be exercised on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application firmware                   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pic170x-core (pins, timer, serial)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pic170x-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ pic170x-hal-  │       │ pic170x-hal-  │
//! │    pic16      │       │     sim       │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`register::Register`] - Addressable 8-bit register access
//! - [`interrupt::InterruptControl`] - Global interrupt-enable flag
//! - [`timer::TickTimer`] - Periodic tick timer peripheral
//! - [`uart::UartPeripheral`] - Asynchronous serial peripheral
//!
//! All traits take `&self`: memory-mapped hardware is shared by the
//! background and interrupt contexts, so implementations use volatile
//! access or interior mutability.

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod interrupt;
pub mod register;
pub mod timer;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use gpio::{Port, PortBank, PortBanks};
pub use interrupt::{with_critical_section, CriticalSection, InterruptControl, Mutex};
pub use register::Register;
pub use timer::TickTimer;
pub use uart::{BaudSetting, UartPeripheral};
