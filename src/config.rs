//! Configuration of the touch screen driver
use crate::electrode::Level;
use crate::pressure::PressureModel;
use crate::sampling::{DEFAULT_SAMPLES, MAX_SAMPLES};

/// Problems with the driver configuration
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Copy, Clone, core::fmt::Debug, PartialEq, Eq, ufmt::derive::uDebug)]
pub enum ConfigError {
    /// oversampling depth of 0 or above [`MAX_SAMPLES`]
    InvalidSamples(u8),
}

/// Errors of an acquisition. A bounced or absent touch is not an error, it is
/// reported through the pressure of the returned point.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Copy, Clone, core::fmt::Debug, PartialEq, Eq, ufmt::derive::uDebug)]
pub enum TouchError<E> {
    /// the platform failed to switch a pin or to convert a sample
    Bus(E),
    Config(ConfigError),
}

impl<E> From<ConfigError> for TouchError<E> {
    fn from(value: ConfigError) -> Self {
        TouchError::Config(value)
    }
}

/// Default pressure threshold, kept for callers, not used by the driver
pub const DEFAULT_PRESSURE_THRESHOLD: i16 = 10;

/// Configuration builder
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub(crate) plate_resistance: u16,
    pub(crate) samples: u8,
    pub(crate) settle_us: u32,
    pub(crate) idle_level: Level,
    pub(crate) exclusive: bool,
}

impl Config {
    /// Creates a new configuration object with default values
    pub fn new() -> Self {
        Config {
            plate_resistance: 0,
            samples: DEFAULT_SAMPLES,
            settle_us: 0,
            idle_level: Level::Low,
            exclusive: false,
        }
    }

    /// resistance of the X plate in ohms, 0 if unknown
    pub fn plate_resistance(&mut self, ohms: u16) -> &mut Self {
        self.plate_resistance = ohms;
        self
    }

    /// oversampling depth of each axis read
    pub fn samples(&mut self, samples: u8) -> &mut Self {
        self.samples = samples;
        self
    }

    /// Wait after every electrode reconfiguration.
    /// Fast ARM parts need about 20us before the voltages have settled.
    pub fn settle_us(&mut self, us: u32) -> &mut Self {
        self.settle_us = us;
        self
    }

    /// level all electrodes are driven to between acquisitions
    pub fn idle_level(&mut self, level: Level) -> &mut Self {
        self.idle_level = level;
        self
    }

    /// Run every acquisition inside a critical section, for pins that are
    /// also touched from interrupt context (e.g. by a display driver).
    pub fn exclusive(&mut self, exclusive: bool) -> &mut Self {
        self.exclusive = exclusive;
        self
    }

    pub fn pressure_model(&self) -> PressureModel {
        PressureModel::from_plate(self.plate_resistance)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.samples == 0 || self.samples as usize > MAX_SAMPLES {
            return Err(ConfigError::InvalidSamples(self.samples));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
