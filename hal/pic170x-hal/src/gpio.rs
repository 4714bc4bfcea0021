//! GPIO port register banks
//!
//! Each I/O port is controlled by a fixed group of registers. A pin
//! occupies the same bit position in all of them:
//!
//! - `tris`  - direction (bit set = input)
//! - `port`  - electrical input level
//! - `latch` - commanded output level
//! - `ansel` - analog select (bit set = analog input)
//! - `pps`   - per-pin peripheral output source selection

/// Number of pins per port
pub const PINS_PER_PORT: usize = 8;

/// I/O port identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Port {
    A,
    B,
    C,
}

impl Port {
    /// Index used in peripheral pin-select codes
    pub const fn index(self) -> u8 {
        match self {
            Port::A => 0,
            Port::B => 1,
            Port::C => 2,
        }
    }
}

/// Registers controlling one I/O port
#[derive(Debug)]
pub struct PortBank<R> {
    /// Direction register (TRISx)
    pub tris: R,
    /// Input level register (PORTx)
    pub port: R,
    /// Output latch register (LATx)
    pub latch: R,
    /// Analog select register (ANSELx)
    pub ansel: R,
    /// Output source selection registers (RxyPPS), indexed by bit
    pub pps: [R; PINS_PER_PORT],
}

/// Register banks for every port a chip family may have
///
/// Chips without a given port still provide a bank; the pin map simply
/// never hands out descriptors that reference it.
#[derive(Debug)]
pub struct PortBanks<R> {
    pub a: PortBank<R>,
    pub b: PortBank<R>,
    pub c: PortBank<R>,
}

impl<R> PortBanks<R> {
    /// Get the bank for a port
    pub fn bank(&self, port: Port) -> &PortBank<R> {
        match port {
            Port::A => &self.a,
            Port::B => &self.b,
            Port::C => &self.c,
        }
    }
}
