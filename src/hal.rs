//! Platform contract the touch screen driver talks to.
//!
//! The host provides pin direction control, digital output and a one-shot
//! analog read on the four electrode pins. Analog reads are expected in the
//! 10-bit range `0..=1023`.

use crate::electrode::{Level, PinMode, Role};

/// Direction, level and ADC access for the pins the panel is wired to.
///
/// `apply` has a portable default built on the three required calls. A
/// platform that can switch a whole port at once (e.g. by writing direction
/// and output registers directly) overrides `apply` and nothing else.
pub trait ElectrodeBus {
    /// Pin identifier, usually a pin number
    type Pin: Copy;
    type Error;

    fn set_mode(&mut self, pin: Self::Pin, mode: PinMode) -> Result<(), Self::Error>;

    fn write(&mut self, pin: Self::Pin, level: Level) -> Result<(), Self::Error>;

    /// One analog conversion on `pin`
    fn read_analog(&mut self, pin: Self::Pin) -> Result<u16, Self::Error>;

    /// Puts every pin into its role.
    ///
    /// Inputs are switched first and written low so no pull-up is left
    /// enabled on a sensing pin, then the supply and ground pins are driven.
    fn apply(&mut self, pins: &[(Self::Pin, Role); 4]) -> Result<(), Self::Error> {
        for &(pin, role) in pins.iter().filter(|(_, role)| !role.is_driven()) {
            self.set_mode(pin, role.mode())?;
            self.write(pin, Level::Low)?;
        }
        for &(pin, role) in pins.iter() {
            if let Role::Drive(level) = role {
                self.set_mode(pin, PinMode::Output)?;
                self.write(pin, level)?;
            }
        }
        Ok(())
    }
}
