//! Four-wire resistive touch screen driver library
//!
//! Two resistive sheets are multiplexed over four host pins. Driving one sheet
//! as a voltage divider and sensing on the other gives a position; driving
//! the sheets against each other gives a pressure estimate.
//!
//! The host provides the pins through [`ElectrodeBus`], the driver sequences
//! the electrode roles, oversamples and computes the [`Point`].

#![no_std]

use embedded_hal::delay::DelayNs;

pub mod config;
pub mod electrode;
pub mod hal;
pub mod pressure;
pub mod sampling;

#[cfg(test)]
mod mock;

pub use config::{Config, ConfigError, TouchError};
pub use electrode::{Electrode, Level, PinMode, Phase, Role, Wiring};
pub use hal::ElectrodeBus;
pub use pressure::PressureModel;

use pressure::ADC_MAX;
use sampling::{Filtered, Samples};

/// One sampled touch.
///
/// `x` and `y` are raw panel positions in `0..=1023`. `z == 0` means the
/// sample bounced or nothing touched the panel, `x` and `y` are meaningless
/// then.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, ufmt::derive::uDebug)]
pub struct Point {
    pub x: u16,
    pub y: u16,
    pub z: u16,
}

impl Point {
    pub fn new(x: u16, y: u16, z: u16) -> Self {
        Self { x, y, z }
    }

    pub fn is_valid(&self) -> bool {
        self.z != 0
    }
}

/// Position of one axis read
#[derive(Copy, Clone, Debug)]
struct Axis {
    position: u16,
    valid: bool,
}

impl From<Filtered> for Axis {
    fn from(f: Filtered) -> Self {
        Self {
            position: ADC_MAX.saturating_sub(f.value),
            valid: f.valid,
        }
    }
}

/// Driver for a resistive panel wired to four pins of `B`
pub struct TouchScreen<B: ElectrodeBus> {
    /// pin access of the host
    bus: B,
    /// which pin is which electrode
    wiring: Wiring<B::Pin>,
    config: Config,
    /// Not consulted by [`TouchScreen::is_touching`], which uses the fixed
    /// [`pressure::TOUCH_PRESSURE_MIN`]..[`pressure::TOUCH_PRESSURE_MAX`] band.
    pub pressure_threshold: i16,
}

impl<B, E> TouchScreen<B>
where
    B: ElectrodeBus<Error = E>,
{
    /// Creates a driver with default configuration and unknown plate
    /// resistance. Nothing is touched before the first acquisition.
    pub fn default(bus: B, wiring: Wiring<B::Pin>) -> Self {
        Self {
            bus,
            wiring,
            config: Config::new(),
            pressure_threshold: config::DEFAULT_PRESSURE_THRESHOLD,
        }
    }

    /// Takes a config object to initialize the driver
    pub fn new(bus: B, wiring: Wiring<B::Pin>, config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            bus,
            wiring,
            config,
            pressure_threshold: config::DEFAULT_PRESSURE_THRESHOLD,
        })
    }

    /// Default configuration with a known X plate resistance in ohms
    pub fn with_plate_resistance(bus: B, wiring: Wiring<B::Pin>, ohms: u16) -> Self {
        let mut driver = Self::default(bus, wiring);
        driver.config.plate_resistance(ohms);
        driver
    }

    /// Destroy driver instance, consume self and return the pin bus.
    pub fn destroy(self) -> B {
        self.bus
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Samples position and pressure of the current touch.
    ///
    /// Both axes are oversampled. If either of them bounced the returned
    /// point has `z == 0`.
    pub fn acquire(&mut self, delay: &mut dyn DelayNs) -> Result<Point, TouchError<E>> {
        self.session(|ts| ts.sample_point(delay))
    }

    /// Single, not oversampled, X position
    pub fn read_axis_x(&mut self, delay: &mut dyn DelayNs) -> Result<u16, TouchError<E>> {
        self.session(|ts| ts.sample_once(Phase::ReadX, delay))
    }

    /// Single, not oversampled, Y position
    pub fn read_axis_y(&mut self, delay: &mut dyn DelayNs) -> Result<u16, TouchError<E>> {
        self.session(|ts| ts.sample_once(Phase::ReadY, delay))
    }

    /// Pressure of the current touch without position oversampling.
    /// With a known plate resistance this also takes one X position sample.
    pub fn pressure(&mut self, delay: &mut dyn DelayNs) -> Result<u16, TouchError<E>> {
        self.session(|ts| ts.sample_pressure(delay))
    }

    /// Measures the pressure and checks it against the contact band.
    /// This is a full pressure acquisition, not a cached flag.
    pub fn is_touching(&mut self, delay: &mut dyn DelayNs) -> Result<bool, TouchError<E>> {
        let z = self.pressure(delay)?;
        Ok(pressure::in_contact_band(z))
    }

    /// Runs `f` and parks the electrodes afterwards, whatever `f` returned.
    fn session<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, E>,
    ) -> Result<T, TouchError<E>> {
        let run = |ts: &mut Self| -> Result<T, E> {
            let result = f(ts);
            let parked = ts.park();
            // the first failure is the interesting one
            let value = result?;
            parked?;
            Ok(value)
        };
        let result = if self.config.exclusive {
            critical_section::with(|_crit_sec| run(self))
        } else {
            run(self)
        };
        result.map_err(TouchError::Bus)
    }

    fn sample_point(&mut self, delay: &mut dyn DelayNs) -> Result<Point, E> {
        let y = self.sample_axis(Phase::ReadY, delay)?;
        let x = self.sample_axis(Phase::ReadX, delay)?;

        self.enter(Phase::Pressure, delay)?;
        let z1 = self.bus.read_analog(self.wiring.xm)?;
        let z2 = self.bus.read_analog(self.wiring.yp)?;

        let z = if x.valid && y.valid {
            self.config.pressure_model().pressure(z1, z2, x.position)
        } else {
            #[cfg(feature = "defmt")]
            defmt::debug!("axis bounced, x valid {} y valid {}", x.valid, y.valid);
            0
        };
        #[cfg(feature = "defmt")]
        defmt::trace!("z1 {} z2 {} -> z {}", z1, z2, z);
        Ok(Point::new(x.position, y.position, z))
    }

    fn sample_pressure(&mut self, delay: &mut dyn DelayNs) -> Result<u16, E> {
        let model = self.config.pressure_model();
        let x = match model {
            PressureModel::PlateResistance(_) => self.sample_once(Phase::ReadX, delay)?,
            PressureModel::Proxy => 0,
        };
        self.enter(Phase::Pressure, delay)?;
        let z1 = self.bus.read_analog(self.wiring.xm)?;
        let z2 = self.bus.read_analog(self.wiring.yp)?;
        Ok(model.pressure(z1, z2, x))
    }

    /// oversampled read of the sensing electrode of an axis phase
    fn sample_axis(&mut self, phase: Phase, delay: &mut dyn DelayNs) -> Result<Axis, E> {
        self.enter(phase, delay)?;
        let pin = self.sense_pin(phase);
        let mut samples = Samples::new();
        for _ in 0..self.config.samples {
            let sample = self.bus.read_analog(pin)?;
            // depth is validated against the capacity
            let _ = samples.push(sample);
        }
        let axis = Axis::from(sampling::filter(&mut samples));
        #[cfg(feature = "defmt")]
        if !axis.valid {
            defmt::debug!("{} bounced: {}", phase, samples.as_slice());
        }
        Ok(axis)
    }

    fn sample_once(&mut self, phase: Phase, delay: &mut dyn DelayNs) -> Result<u16, E> {
        self.enter(phase, delay)?;
        let pin = self.sense_pin(phase);
        let raw = self.bus.read_analog(pin)?;
        Ok(ADC_MAX.saturating_sub(raw))
    }

    fn sense_pin(&self, phase: Phase) -> B::Pin {
        self.wiring.pin(phase.sense()[0])
    }

    fn enter(&mut self, phase: Phase, delay: &mut dyn DelayNs) -> Result<(), E> {
        #[cfg(feature = "defmt")]
        defmt::trace!("enter {}", phase);
        self.bus.apply(&self.wiring.assign(phase))?;
        if self.config.settle_us > 0 {
            delay.delay_us(self.config.settle_us);
        }
        Ok(())
    }

    /// drives all electrodes so none of them floats next to the display
    fn park(&mut self) -> Result<(), E> {
        self.bus
            .apply(&self.wiring.assign(Phase::Idle(self.config.idle_level)))
    }
}
