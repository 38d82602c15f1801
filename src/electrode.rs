//! Electrodes of a four-wire resistive panel and the roles they take in each
//! measurement phase.
//!
//! The phase table in [`Phase::roles`] is the only place that knows which
//! electrode drives, which one senses and which one floats.

/// One of the four sheet edges wired to the host.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, ufmt::derive::uDebug)]
pub enum Electrode {
    XPlus,
    YPlus,
    XMinus,
    YMinus,
}

impl Electrode {
    pub const ALL: [Electrode; 4] = [
        Electrode::XPlus,
        Electrode::YPlus,
        Electrode::XMinus,
        Electrode::YMinus,
    ];

    /// Position in [`Electrode::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, ufmt::derive::uDebug)]
pub enum PinMode {
    Input,
    Output,
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, ufmt::derive::uDebug)]
pub enum Level {
    Low,
    High,
}

/// What an electrode does during a phase
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, ufmt::derive::uDebug)]
pub enum Role {
    /// output, driven to the given level
    Drive(Level),
    /// high-impedance input whose analog voltage gets sampled
    Sense,
    /// high-impedance input, not sampled
    Float,
}

impl Role {
    pub fn mode(self) -> PinMode {
        match self {
            Role::Drive(_) => PinMode::Output,
            Role::Sense | Role::Float => PinMode::Input,
        }
    }

    pub fn is_driven(self) -> bool {
        matches!(self, Role::Drive(_))
    }
}

/// Electrode configuration for one step of an acquisition.
///
/// Position along an axis is measured by putting a voltage gradient across the
/// opposite sheet and sensing where the other sheet's undriven electrode sits
/// on it, hence `ReadY` drives the X electrodes and senses on Y+.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, ufmt::derive::uDebug)]
pub enum Phase {
    ReadY,
    ReadX,
    Pressure,
    /// all electrodes driven, nothing left floating next to the display
    Idle(Level),
}

impl Phase {
    /// Role of every electrode, in [`Electrode::ALL`] order.
    pub const fn roles(self) -> [(Electrode, Role); 4] {
        use Electrode::*;
        match self {
            Phase::ReadY => [
                (XPlus, Role::Drive(Level::High)),
                (YPlus, Role::Sense),
                (XMinus, Role::Drive(Level::Low)),
                (YMinus, Role::Float),
            ],
            Phase::ReadX => [
                (XPlus, Role::Float),
                (YPlus, Role::Drive(Level::High)),
                (XMinus, Role::Sense),
                (YMinus, Role::Drive(Level::Low)),
            ],
            Phase::Pressure => [
                (XPlus, Role::Drive(Level::Low)),
                (YPlus, Role::Sense),
                (XMinus, Role::Sense),
                (YMinus, Role::Drive(Level::High)),
            ],
            Phase::Idle(level) => [
                (XPlus, Role::Drive(level)),
                (YPlus, Role::Drive(level)),
                (XMinus, Role::Drive(level)),
                (YMinus, Role::Drive(level)),
            ],
        }
    }

    /// Electrodes sampled during this phase, in read order.
    /// Pressure reads z1 on X- before z2 on Y+.
    pub const fn sense(self) -> &'static [Electrode] {
        match self {
            Phase::ReadY => &[Electrode::YPlus],
            Phase::ReadX => &[Electrode::XMinus],
            Phase::Pressure => &[Electrode::XMinus, Electrode::YPlus],
            Phase::Idle(_) => &[],
        }
    }
}

/// Host pins the four electrodes are soldered to
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Wiring<P> {
    pub xp: P,
    pub yp: P,
    pub xm: P,
    pub ym: P,
}

impl<P: Copy> Wiring<P> {
    pub fn new(xp: P, yp: P, xm: P, ym: P) -> Self {
        Self { xp, yp, xm, ym }
    }

    pub fn pin(&self, electrode: Electrode) -> P {
        match electrode {
            Electrode::XPlus => self.xp,
            Electrode::YPlus => self.yp,
            Electrode::XMinus => self.xm,
            Electrode::YMinus => self.ym,
        }
    }

    /// translates the electrode roles of a phase into pin roles
    pub fn assign(&self, phase: Phase) -> [(P, Role); 4] {
        phase.roles().map(|(electrode, role)| (self.pin(electrode), role))
    }
}
