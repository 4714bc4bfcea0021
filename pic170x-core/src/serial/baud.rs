//! Baud-rate generator selection
//!
//! The EUSART divides the instruction clock by `scale * (divisor + 1)`.
//! Three generator modes trade range for resolution; each is a
//! [`BaudTier`]. Selection tries the tiers in order and takes the first
//! whose divisor lands inside the tier's accepted band, so coarse modes
//! (cheaper, 8-bit) win whenever they are accurate enough.

use pic170x_hal::BaudSetting;

use super::SerialError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One baud-rate generator mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BaudTier {
    /// Clock divisions per bit for a divisor of zero
    pub scale: u32,
    pub brg16: bool,
    pub brgh: bool,
    /// Smallest accepted divisor
    pub min_divisor: u32,
    /// Largest accepted divisor
    pub max_divisor: u32,
}

impl BaudTier {
    /// Divisor for `baud` at `clock_hz`
    ///
    /// `None` if the quotient underflows (baud too fast for this tier) or
    /// `baud`/`scale` is zero.
    pub const fn divisor(&self, clock_hz: u32, baud: u32) -> Option<u32> {
        let Some(per_bit) = clock_hz.checked_div(baud) else {
            return None;
        };
        match per_bit.checked_div(self.scale) {
            Some(quotient) => quotient.checked_sub(1),
            None => None,
        }
    }

    pub const fn accepts(&self, divisor: u32) -> bool {
        divisor >= self.min_divisor && divisor <= self.max_divisor
    }

    /// Baud rate actually produced by `divisor`
    pub const fn actual_baud(&self, clock_hz: u32, divisor: u32) -> u32 {
        clock_hz / ((divisor + 1) * self.scale)
    }
}

/// Generator modes of the PIC16F170x EUSART, tried in order
///
/// The lower bounds keep the rounding error of the truncated divisor small;
/// the 8-bit mode stops below 255 because its register is 8 bits wide.
pub const DEFAULT_BAUD_TIERS: &[BaudTier] = &[
    // 8-bit, low speed
    BaudTier {
        scale: 64,
        brg16: false,
        brgh: false,
        min_divisor: 10,
        max_divisor: 254,
    },
    // 16-bit, low speed
    BaudTier {
        scale: 16,
        brg16: true,
        brgh: false,
        min_divisor: 20,
        max_divisor: 0xFFFF,
    },
    // 16-bit, high speed
    BaudTier {
        scale: 4,
        brg16: true,
        brgh: true,
        min_divisor: 2,
        max_divisor: 0xFFFF,
    },
];

/// Outcome of baud-rate selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BaudSelection {
    pub tier: BaudTier,
    pub divisor: u16,
    /// Achieved baud rate (differs from the request by rounding)
    pub actual: u32,
}

impl BaudSelection {
    /// Register programming for this selection
    pub const fn setting(&self) -> BaudSetting {
        BaudSetting {
            divisor: self.divisor,
            brg16: self.tier.brg16,
            brgh: self.tier.brgh,
        }
    }
}

/// Pick the first tier that can produce `baud` from `clock_hz`
pub fn select_baud(
    clock_hz: u32,
    baud: u32,
    tiers: &[BaudTier],
) -> Result<BaudSelection, SerialError> {
    if baud == 0 {
        return Err(SerialError::ZeroBaudRate);
    }

    tiers
        .iter()
        .find_map(|tier| {
            let divisor = tier.divisor(clock_hz, baud)?;
            if !tier.accepts(divisor) {
                return None;
            }
            let divisor = u16::try_from(divisor).ok()?;
            Some(BaudSelection {
                tier: *tier,
                divisor,
                actual: tier.actual_baud(clock_hz, divisor as u32),
            })
        })
        .ok_or(SerialError::UnsupportedBaudRate { requested: baud })
}
