//! Pressure estimation from the two readings of the pressure phase.

/// Largest value the 10-bit ADC returns
pub const ADC_MAX: u16 = 1023;
/// Number of ADC steps, divisor of the plate resistance model
pub const ADC_SPAN: u16 = 1024;

/// Pressure at or below this is no contact
pub const TOUCH_PRESSURE_MIN: u16 = 20;
/// Pressure at or above this is a saturated or shorted panel
pub const TOUCH_PRESSURE_MAX: u16 = 980;

/// How z1/z2 are turned into a pressure value
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, ufmt::derive::uDebug)]
pub enum PressureModel {
    /// unitless `1023 - (z2 - z1)`, grows with contact
    Proxy,
    /// approximate contact resistance in ohms for a known X-plate resistance,
    /// lower is firmer
    PlateResistance(u16),
}

impl PressureModel {
    /// 0 ohms means the plate resistance is unknown
    pub fn from_plate(ohms: u16) -> Self {
        match ohms {
            0 => PressureModel::Proxy,
            ohms => PressureModel::PlateResistance(ohms),
        }
    }

    /// Computes the pressure of one sample pair.
    ///
    /// `x` is the X position of the same touch, only used by the plate
    /// resistance model. A zero `z1` never reaches the division and reads as
    /// no contact.
    pub fn pressure(self, z1: u16, z2: u16, x: u16) -> u16 {
        match self {
            PressureModel::Proxy => {
                let z = ADC_MAX as i32 - (z2 as i32 - z1 as i32);
                z.clamp(0, u16::MAX as i32) as u16
            }
            PressureModel::PlateResistance(ohms) => {
                if z1 == 0 {
                    #[cfg(feature = "defmt")]
                    defmt::trace!("z1 is zero, no contact");
                    return 0;
                }
                let mut rtouch = z2 as f32 / z1 as f32;
                rtouch -= 1.0;
                rtouch *= x as f32;
                rtouch *= ohms as f32;
                rtouch /= ADC_SPAN as f32;
                // saturating cast, negative ratios end up as 0
                rtouch as u16
            }
        }
    }
}

/// True for pressure strictly between [`TOUCH_PRESSURE_MIN`] and
/// [`TOUCH_PRESSURE_MAX`]
pub fn in_contact_band(z: u16) -> bool {
    z > TOUCH_PRESSURE_MIN && z < TOUCH_PRESSURE_MAX
}
