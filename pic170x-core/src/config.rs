//! Device selection and build-configuration check
//!
//! The library is built for exactly one device and one clock frequency.
//! Application firmware states what it expects and calls
//! [`BuildConfig::verify`] at startup to catch a mismatched build.

use core::fmt;

use crate::freq::ClockFrequency;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Supported microcontroller variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Device {
    /// PIC16F1705, 14 pins
    Pic16f1705,
    /// PIC16LF1705, 14 pins, low voltage
    Pic16lf1705,
    /// PIC16F1709, 20 pins
    Pic16f1709,
    /// PIC16LF1709, 20 pins, low voltage
    Pic16lf1709,
}

impl Device {
    pub const ALL: [Device; 4] = [
        Device::Pic16f1705,
        Device::Pic16lf1705,
        Device::Pic16f1709,
        Device::Pic16lf1709,
    ];

    /// Canonical device name
    pub const fn name(self) -> &'static str {
        match self {
            Device::Pic16f1705 => "PIC16F1705",
            Device::Pic16lf1705 => "PIC16LF1705",
            Device::Pic16f1709 => "PIC16F1709",
            Device::Pic16lf1709 => "PIC16LF1709",
        }
    }

    /// Look up a device by name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|device| device.name().eq_ignore_ascii_case(name))
    }

    /// Whether the package bonds out port B and RC6/RC7
    pub const fn has_port_b(self) -> bool {
        matches!(self, Device::Pic16f1709 | Device::Pic16lf1709)
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Device and clock frequency a binary was built for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BuildConfig {
    pub device: Device,
    pub frequency: ClockFrequency,
}

/// Reason a build-configuration check failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigMismatch {
    Device {
        library: Device,
        application: Device,
    },
    Frequency {
        library: ClockFrequency,
        application: ClockFrequency,
    },
}

impl fmt::Display for ConfigMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigMismatch::Device {
                library,
                application,
            } => write!(
                f,
                "library built for {}, application expects {}",
                library, application
            ),
            ConfigMismatch::Frequency {
                library,
                application,
            } => write!(
                f,
                "library built for {} Hz, application expects {} Hz",
                library.hz(),
                application.hz()
            ),
        }
    }
}

impl BuildConfig {
    pub const fn new(device: Device, frequency: ClockFrequency) -> Self {
        Self { device, frequency }
    }

    /// Check that `application` matches this (library) configuration
    ///
    /// The device is compared by name, then the frequency.
    pub fn verify(&self, application: &BuildConfig) -> Result<(), ConfigMismatch> {
        if self.device.name() != application.device.name() {
            error!(
                "build check: device mismatch, library {} application {}",
                self.device,
                application.device
            );
            return Err(ConfigMismatch::Device {
                library: self.device,
                application: application.device,
            });
        }

        if self.frequency != application.frequency {
            error!(
                "build check: frequency mismatch, library {} application {}",
                self.frequency,
                application.frequency
            );
            return Err(ConfigMismatch::Frequency {
                library: self.frequency,
                application: application.frequency,
            });
        }

        Ok(())
    }
}
