//! Pin registry
//!
//! A [`PinDescriptor`] bundles the register handles that control one
//! physical pin together with its bit mask. Handles are optional because not
//! every pin has every capability: RA3 is input-only and has no direction,
//! latch, analog-select or output-routing register, and several pins have no
//! analog function.
//!
//! Operations on a capability the pin lacks are silent no-ops, and so are
//! operations on an absent pin (see the free functions below, which accept
//! `Option<&PinDescriptor>`).

mod digital;
mod map;

pub use digital::Pin;
pub use map::{PinId, PinMap};

use core::fmt;

use pic170x_hal::Register;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Pin direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    Input,
    Output,
}

/// Input buffer mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InputMode {
    Digital,
    Analog,
}

/// Register-level description of one physical pin
pub struct PinDescriptor<'r, R> {
    alternate_function: u8,
    mask: u8,
    port: &'r R,
    direction: Option<&'r R>,
    latch: Option<&'r R>,
    analog_select: Option<&'r R>,
    output_routing: Option<&'r R>,
}

// Manual impls: the descriptor only holds references, so `R` needs no bounds
impl<R> Clone for PinDescriptor<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for PinDescriptor<'_, R> {}

impl<R> fmt::Debug for PinDescriptor<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PinDescriptor")
            .field("alternate_function", &self.alternate_function)
            .field("mask", &self.mask)
            .field("direction", &self.direction.is_some())
            .field("latch", &self.latch.is_some())
            .field("analog_select", &self.analog_select.is_some())
            .field("output_routing", &self.output_routing.is_some())
            .finish()
    }
}

impl<'r, R> PinDescriptor<'r, R> {
    /// Input-only pin reading `port`
    ///
    /// `mask` has exactly one bit set.
    pub const fn new(alternate_function: u8, mask: u8, port: &'r R) -> Self {
        Self {
            alternate_function,
            mask,
            port,
            direction: None,
            latch: None,
            analog_select: None,
            output_routing: None,
        }
    }

    pub const fn with_direction(mut self, tris: &'r R) -> Self {
        self.direction = Some(tris);
        self
    }

    pub const fn with_latch(mut self, latch: &'r R) -> Self {
        self.latch = Some(latch);
        self
    }

    pub const fn with_analog_select(mut self, ansel: &'r R) -> Self {
        self.analog_select = Some(ansel);
        self
    }

    pub const fn with_output_routing(mut self, pps: &'r R) -> Self {
        self.output_routing = Some(pps);
        self
    }

    /// Code selecting this pin as a peripheral input
    pub const fn alternate_function(&self) -> u8 {
        self.alternate_function
    }

    pub const fn mask(&self) -> u8 {
        self.mask
    }

    pub const fn has_direction(&self) -> bool {
        self.direction.is_some()
    }

    pub const fn has_latch(&self) -> bool {
        self.latch.is_some()
    }

    pub const fn has_analog_select(&self) -> bool {
        self.analog_select.is_some()
    }

    pub const fn has_output_routing(&self) -> bool {
        self.output_routing.is_some()
    }

    /// Output-routing register, if the pin can be driven by a peripheral
    pub const fn output_routing(&self) -> Option<&'r R> {
        self.output_routing
    }
}

impl<R: Register> PinDescriptor<'_, R> {
    /// Set the pin direction
    pub fn set_direction(&self, direction: Direction) {
        if let Some(tris) = self.direction {
            tris.write_bits(self.mask, direction == Direction::Input);
        }
    }

    /// Current direction, `None` if the pin has no direction register
    pub fn direction(&self) -> Option<Direction> {
        self.direction.map(|tris| {
            if tris.is_set(self.mask) {
                Direction::Input
            } else {
                Direction::Output
            }
        })
    }

    /// Select analog or digital input buffering
    pub fn set_analog_mode(&self, mode: InputMode) {
        if let Some(ansel) = self.analog_select {
            ansel.write_bits(self.mask, mode == InputMode::Analog);
        }
    }

    /// Read the pin level
    ///
    /// Output pins report the level they are being driven to (the latch);
    /// everything else reports the sampled port level.
    pub fn read_input(&self) -> bool {
        let source = match (self.direction, self.latch) {
            (Some(tris), Some(latch)) if !tris.is_set(self.mask) => latch,
            _ => self.port,
        };
        source.is_set(self.mask)
    }

    /// Drive the output latch
    pub fn write_output(&self, high: bool) {
        if let Some(latch) = self.latch {
            latch.write_bits(self.mask, high);
        }
    }

    /// Level held in the output latch, `None` if the pin has no latch
    pub fn output_level(&self) -> Option<bool> {
        self.latch.map(|latch| latch.is_set(self.mask))
    }

    /// Connect a peripheral output to the pin
    ///
    /// Returns `false` if the pin has no output-routing register.
    pub fn route_output(&self, source: u8) -> bool {
        match self.output_routing {
            Some(pps) => {
                pps.write(source);
                true
            }
            None => false,
        }
    }
}

/// Set the direction of an optional pin
pub fn set_direction<'p, 'r: 'p, R: Register + 'r>(
    pin: impl Into<Option<&'p PinDescriptor<'r, R>>>,
    direction: Direction,
) {
    if let Some(pin) = pin.into() {
        pin.set_direction(direction);
    }
}

/// Select analog or digital buffering of an optional pin
pub fn set_analog_mode<'p, 'r: 'p, R: Register + 'r>(
    pin: impl Into<Option<&'p PinDescriptor<'r, R>>>,
    mode: InputMode,
) {
    if let Some(pin) = pin.into() {
        pin.set_analog_mode(mode);
    }
}

/// Read an optional pin; an absent pin reads low
pub fn read_input<'p, 'r: 'p, R: Register + 'r>(
    pin: impl Into<Option<&'p PinDescriptor<'r, R>>>,
) -> bool {
    pin.into().is_some_and(|pin| pin.read_input())
}

/// Drive an optional pin's output latch
pub fn write_output<'p, 'r: 'p, R: Register + 'r>(
    pin: impl Into<Option<&'p PinDescriptor<'r, R>>>,
    high: bool,
) {
    if let Some(pin) = pin.into() {
        pin.write_output(high);
    }
}
