//! Host command catalogue

use std::fmt;
use std::str::FromStr;

use encoder::Axis;

use crate::error::BridgeError;

/// The seven commands the bridge registers with the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    SelectAltitude,
    SelectVerticalSpeed,
    SelectHeading,
    SelectCourse,
    SelectAirspeed,
    KnobUp,
    KnobDown,
}

impl Command {
    /// Registration order
    pub const ALL: [Command; 7] = [
        Command::SelectAltitude,
        Command::SelectVerticalSpeed,
        Command::SelectHeading,
        Command::SelectCourse,
        Command::SelectAirspeed,
        Command::KnobUp,
        Command::KnobDown,
    ];

    /// Host command path
    pub fn path(self) -> &'static str {
        match self {
            Command::SelectAltitude => "HCBravo/Alt",
            Command::SelectVerticalSpeed => "HCBravo/VS",
            Command::SelectHeading => "HCBravo/HDG",
            Command::SelectCourse => "HCBravo/CRS",
            Command::SelectAirspeed => "HCBravo/IAS",
            Command::KnobUp => "HCBravo/Inc",
            Command::KnobDown => "HCBravo/Dec",
        }
    }

    /// Human readable description shown by the host
    pub fn description(self) -> &'static str {
        match self {
            Command::SelectAltitude => "Autopilot Altitude Knob",
            Command::SelectVerticalSpeed => "Autopilot Vertical Speed Knob",
            Command::SelectHeading => "Autopilot Heading Knob",
            Command::SelectCourse => "Autopilot Course Knob",
            Command::SelectAirspeed => "Autopilot Indicated Air Speed Knob",
            Command::KnobUp => "Autopilot Knob Up",
            Command::KnobDown => "Autopilot Knob Down",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.path() == path)
    }

    /// Axis picked by a selector command
    pub fn axis(self) -> Option<Axis> {
        match self {
            Command::SelectAltitude => Some(Axis::Altitude),
            Command::SelectVerticalSpeed => Some(Axis::VerticalSpeed),
            Command::SelectHeading => Some(Axis::Heading),
            Command::SelectCourse => Some(Axis::Course),
            Command::SelectAirspeed => Some(Axis::Airspeed),
            Command::KnobUp | Command::KnobDown => None,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Command {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_path(s).ok_or_else(|| BridgeError::UnknownCommand(s.to_string()))
    }
}
