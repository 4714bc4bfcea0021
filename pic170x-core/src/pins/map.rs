//! Symbolic pin names and per-device pin tables

use core::fmt;

use pic170x_hal::{Port, PortBanks};

use super::PinDescriptor;
use crate::config::Device;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Symbolic pin name
///
/// Covers every pin of the device family. Which of them exist depends on
/// the [`Device`]; see [`PinMap::get`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PinId {
    Ra0,
    Ra1,
    Ra2,
    Ra3,
    Ra4,
    Ra5,
    Rb4,
    Rb5,
    Rb6,
    Rb7,
    Rc0,
    Rc1,
    Rc2,
    Rc3,
    Rc4,
    Rc5,
    Rc6,
    Rc7,
}

/// Which optional registers a pin has
#[derive(Debug, Clone, Copy)]
struct Capabilities {
    /// Direction and latch registers
    output: bool,
    analog: bool,
    routing: bool,
}

impl Capabilities {
    const FULL: Self = Self {
        output: true,
        analog: true,
        routing: true,
    };
    const DIGITAL: Self = Self {
        analog: false,
        ..Self::FULL
    };
    const INPUT_ONLY: Self = Self {
        output: false,
        analog: false,
        routing: false,
    };
}

impl PinId {
    pub const COUNT: usize = 18;

    pub const ALL: [PinId; Self::COUNT] = [
        PinId::Ra0,
        PinId::Ra1,
        PinId::Ra2,
        PinId::Ra3,
        PinId::Ra4,
        PinId::Ra5,
        PinId::Rb4,
        PinId::Rb5,
        PinId::Rb6,
        PinId::Rb7,
        PinId::Rc0,
        PinId::Rc1,
        PinId::Rc2,
        PinId::Rc3,
        PinId::Rc4,
        PinId::Rc5,
        PinId::Rc6,
        PinId::Rc7,
    ];

    pub const fn port(self) -> Port {
        match self {
            PinId::Ra0 | PinId::Ra1 | PinId::Ra2 | PinId::Ra3 | PinId::Ra4 | PinId::Ra5 => Port::A,
            PinId::Rb4 | PinId::Rb5 | PinId::Rb6 | PinId::Rb7 => Port::B,
            _ => Port::C,
        }
    }

    /// Bit position within the port
    pub const fn bit(self) -> u8 {
        match self {
            PinId::Ra0 | PinId::Rc0 => 0,
            PinId::Ra1 | PinId::Rc1 => 1,
            PinId::Ra2 | PinId::Rc2 => 2,
            PinId::Ra3 | PinId::Rc3 => 3,
            PinId::Ra4 | PinId::Rb4 | PinId::Rc4 => 4,
            PinId::Ra5 | PinId::Rb5 | PinId::Rc5 => 5,
            PinId::Rb6 | PinId::Rc6 => 6,
            PinId::Rb7 | PinId::Rc7 => 7,
        }
    }

    /// Peripheral input selection code: port index in bits 4:3, bit in 2:0
    pub const fn alternate_function(self) -> u8 {
        (self.port().index() << 3) | self.bit()
    }

    pub const fn name(self) -> &'static str {
        match self {
            PinId::Ra0 => "RA0",
            PinId::Ra1 => "RA1",
            PinId::Ra2 => "RA2",
            PinId::Ra3 => "RA3",
            PinId::Ra4 => "RA4",
            PinId::Ra5 => "RA5",
            PinId::Rb4 => "RB4",
            PinId::Rb5 => "RB5",
            PinId::Rb6 => "RB6",
            PinId::Rb7 => "RB7",
            PinId::Rc0 => "RC0",
            PinId::Rc1 => "RC1",
            PinId::Rc2 => "RC2",
            PinId::Rc3 => "RC3",
            PinId::Rc4 => "RC4",
            PinId::Rc5 => "RC5",
            PinId::Rc6 => "RC6",
            PinId::Rc7 => "RC7",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }

    /// Registers the pin has on `device`, `None` if it is not bonded out
    fn capabilities(self, device: Device) -> Option<Capabilities> {
        match self {
            PinId::Rb4 | PinId::Rb5 | PinId::Rb6 | PinId::Rb7 | PinId::Rc6 | PinId::Rc7
                if !device.has_port_b() =>
            {
                None
            }
            PinId::Ra3 => Some(Capabilities::INPUT_ONLY),
            PinId::Ra5 | PinId::Rc4 | PinId::Rc5 | PinId::Rb6 | PinId::Rb7 => {
                Some(Capabilities::DIGITAL)
            }
            _ => Some(Capabilities::FULL),
        }
    }
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Descriptors for every pin of one device
///
/// Built once from the chip's register banks; lookups of pins the device
/// lacks return `None`.
pub struct PinMap<'r, R> {
    device: Device,
    pins: [Option<PinDescriptor<'r, R>>; PinId::COUNT],
}

impl<R> fmt::Debug for PinMap<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'r, R> PinMap<'r, R> {
    pub fn new(device: Device, banks: &'r PortBanks<R>) -> Self {
        let pins = core::array::from_fn(|i| describe(device, PinId::ALL[i], banks));
        Self { device, pins }
    }

    pub fn device(&self) -> Device {
        self.device
    }

    /// Look up a pin, `None` if the device does not have it
    pub fn get(&self, id: PinId) -> Option<&PinDescriptor<'r, R>> {
        self.pins[id.index()].as_ref()
    }

    /// Pins present on the device, in [`PinId::ALL`] order
    pub fn iter(&self) -> impl Iterator<Item = (PinId, &PinDescriptor<'r, R>)> + '_ {
        PinId::ALL
            .into_iter()
            .zip(self.pins.iter())
            .filter_map(|(id, pin)| pin.as_ref().map(|pin| (id, pin)))
    }
}

fn describe<'r, R>(
    device: Device,
    id: PinId,
    banks: &'r PortBanks<R>,
) -> Option<PinDescriptor<'r, R>> {
    let caps = id.capabilities(device)?;
    let bank = banks.bank(id.port());
    let bit = id.bit();

    let mut pin = PinDescriptor::new(id.alternate_function(), 1 << bit, &bank.port);
    if caps.output {
        pin = pin.with_direction(&bank.tris).with_latch(&bank.latch);
    }
    if caps.analog {
        pin = pin.with_analog_select(&bank.ansel);
    }
    if caps.routing {
        pin = pin.with_output_routing(&bank.pps[bit as usize]);
    }
    Some(pin)
}
