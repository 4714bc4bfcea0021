//! `embedded-hal` digital pin adapter
//!
//! Lets drivers written against `embedded_hal::digital` run on top of a
//! [`PinDescriptor`]. Capabilities the pin lacks behave as elsewhere in the
//! registry: writes to an input-only pin are ignored.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin, StatefulOutputPin};
use pic170x_hal::Register;

use super::{Direction, InputMode, PinDescriptor};

/// Digital I/O pin
#[derive(Debug)]
pub struct Pin<'p, 'r, R> {
    descriptor: &'p PinDescriptor<'r, R>,
}

impl<'p, 'r, R: Register> Pin<'p, 'r, R> {
    /// Wrap a descriptor without touching its configuration
    pub fn new(descriptor: &'p PinDescriptor<'r, R>) -> Self {
        Self { descriptor }
    }

    /// Configure as a digital output driving `initially_high`
    ///
    /// The latch is written before the direction changes so the pin never
    /// glitches to the previous latch level.
    pub fn into_output(self, initially_high: bool) -> Self {
        self.descriptor.write_output(initially_high);
        self.descriptor.set_analog_mode(InputMode::Digital);
        self.descriptor.set_direction(Direction::Output);
        self
    }

    /// Configure as a digital input
    pub fn into_input(self) -> Self {
        self.descriptor.set_analog_mode(InputMode::Digital);
        self.descriptor.set_direction(Direction::Input);
        self
    }

    pub fn descriptor(&self) -> &'p PinDescriptor<'r, R> {
        self.descriptor
    }
}

impl<R> ErrorType for Pin<'_, '_, R> {
    type Error = Infallible;
}

impl<R: Register> OutputPin for Pin<'_, '_, R> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.descriptor.write_output(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.descriptor.write_output(true);
        Ok(())
    }
}

impl<R: Register> StatefulOutputPin for Pin<'_, '_, R> {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.descriptor.output_level().unwrap_or(false))
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.descriptor.output_level().unwrap_or(false))
    }
}

impl<R: Register> InputPin for Pin<'_, '_, R> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.descriptor.read_input())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.descriptor.read_input())
    }
}
