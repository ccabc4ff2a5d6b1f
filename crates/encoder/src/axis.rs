//! Selectable knob axes and their step table

use std::fmt;

/// Autopilot value the knob currently drives
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Axis {
    #[default]
    Altitude,
    VerticalSpeed,
    Heading,
    Course,
    Airspeed,
}

/// Step magnitudes for one axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub slow: f32,
    pub fast: f32,
}

impl Axis {
    pub const ALL: [Axis; 5] = [
        Axis::Altitude,
        Axis::VerticalSpeed,
        Axis::Heading,
        Axis::Course,
        Axis::Airspeed,
    ];

    pub fn step(self) -> Step {
        let (slow, fast) = match self {
            Axis::Altitude => (100.0, 1000.0),
            Axis::VerticalSpeed => (100.0, 100.0),
            Axis::Heading | Axis::Course => (1.0, 5.0),
            Axis::Airspeed => (1.0, 2.0),
        };
        Step { slow, fast }
    }

    /// Whether the value is floored at zero after a step
    pub fn clamps_at_zero(self) -> bool {
        matches!(self, Axis::Altitude | Axis::Airspeed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Axis::Altitude => "altitude",
            Axis::VerticalSpeed => "vertical_speed",
            Axis::Heading => "heading",
            Axis::Course => "course",
            Axis::Airspeed => "airspeed",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Knob rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn sign(self) -> f32 {
        match self {
            Direction::Up => 1.0,
            Direction::Down => -1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}
